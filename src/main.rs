//! Main entry point for the paddle-points session shell
//!
//! This is the thin presentation layer over the match ledger: it parses
//! line-oriented commands, applies them to the ledger, and renders the
//! derived summary. All rating logic lives in the library.

use anyhow::Result;
use clap::Parser;
use paddle_points::config::AppConfig;
use paddle_points::ledger::{FieldEdit, MatchLedger};
use paddle_points::rating::tables::categories_for;
use paddle_points::types::{CompetitionClass, MatchId, MatchOutcome};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

/// Paddle Points - rating calculator for table-tennis federation rankings
#[derive(Parser)]
#[command(
    name = "paddle-points",
    version,
    about = "Compute rating-point adjustments for a session of table-tennis results",
    long_about = "Paddle Points tracks a growing, editable list of match results and \
                 folds the federation's point-delta formula over the completed ones, \
                 reporting the rating before and after each match."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Current rating text to start the session with
    #[arg(short, long, value_name = "RATING", help = "Initial current-rating value")]
    rating: Option<String>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Emit summaries as JSON instead of a table
    #[arg(long, help = "Render the summary as JSON")]
    json: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without starting a session")]
    dry_run: bool,
}

/// One parsed session command
enum Command {
    Add,
    Set(MatchId, FieldEdit),
    Complete(MatchId),
    Edit(MatchId),
    Cancel(MatchId),
    Remove(MatchId),
    Rating(String),
    List,
    Summary,
    Categories,
    Help,
    Quit,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }
    if args.debug {
        config.service.log_level = "debug".to_string();
    }
    if let Some(rating) = &args.rating {
        config.session.current_rating = Some(rating.clone());
    }

    Ok(config)
}

fn parse_id(token: Option<&str>) -> Result<MatchId> {
    let token = token.ok_or_else(|| anyhow::anyhow!("missing match id"))?;
    token
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid match id '{token}'"))
}

fn parse_command(line: &str) -> Result<Command> {
    let mut tokens = line.split_whitespace();
    let Some(verb) = tokens.next() else {
        return Ok(Command::Help);
    };

    match verb {
        "add" => Ok(Command::Add),
        "set" => {
            let id = parse_id(tokens.next())?;
            let field = tokens
                .next()
                .ok_or_else(|| anyhow::anyhow!("missing field name"))?;
            let value = tokens.collect::<Vec<_>>().join(" ");

            let edit = match field {
                "outcome" => match value.as_str() {
                    "victory" => FieldEdit::Outcome(MatchOutcome::Victory),
                    "defeat" => FieldEdit::Outcome(MatchOutcome::Defeat),
                    other => anyhow::bail!("unknown outcome '{other}'"),
                },
                "class" => FieldEdit::Class(value.parse::<CompetitionClass>()?),
                "category" => FieldEdit::Category(value),
                "opponent" => FieldEdit::OpponentRating(value),
                other => anyhow::bail!("unknown field '{other}'"),
            };
            Ok(Command::Set(id, edit))
        }
        "ok" => Ok(Command::Complete(parse_id(tokens.next())?)),
        "edit" => Ok(Command::Edit(parse_id(tokens.next())?)),
        "cancel" => Ok(Command::Cancel(parse_id(tokens.next())?)),
        "rm" => Ok(Command::Remove(parse_id(tokens.next())?)),
        "rating" => Ok(Command::Rating(tokens.collect::<Vec<_>>().join(" "))),
        "list" => Ok(Command::List),
        "summary" => Ok(Command::Summary),
        "categories" => Ok(Command::Categories),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => anyhow::bail!("unknown command '{other}' (try 'help')"),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  add                       add a new match and open it for editing");
    println!("  set <id> outcome <v>      victory | defeat");
    println!("  set <id> class <v>        club-league | open-tournament");
    println!("  set <id> category <name>  category within the match's class");
    println!("  set <id> opponent <text>  opponent rating");
    println!("  ok <id>                   confirm the match");
    println!("  edit <id>                 re-open a match for editing");
    println!("  cancel <id>               cancel editing (removes unconfirmed matches)");
    println!("  rm <id>                   delete a match");
    println!("  rating <text>             set the current rating");
    println!("  list | summary | categories | help | quit");
}

fn print_list(ledger: &MatchLedger) {
    if ledger.is_empty() {
        println!("(no matches)");
        return;
    }
    for record in ledger.records() {
        let marker = if ledger.editing_id() == Some(record.id) {
            "*"
        } else if record.complete {
            " "
        } else {
            "?"
        };
        println!(
            "{} #{:<3} {:7} {:15} {:30} vs {}",
            marker,
            record.id,
            record.outcome.to_string(),
            record.class.to_string(),
            record.category,
            if record.opponent_rating.is_empty() {
                "-"
            } else {
                record.opponent_rating.as_str()
            }
        );
    }
}

/// Whether a refused confirmation should prompt for an opponent rating
///
/// The edit pointer can reference an id with no record behind it (edit on an
/// unknown id), in which case there is nothing to prompt about.
fn needs_opponent_hint(ledger: &MatchLedger, id: MatchId) -> bool {
    ledger.editing_id() == Some(id) && ledger.records().iter().any(|record| record.id == id)
}

fn print_summary(ledger: &MatchLedger, rating_text: &str, as_json: bool) -> Result<()> {
    let Some(summary) = ledger.compute_summary(rating_text) else {
        println!("(no summary: set a rating and confirm at least one match)");
        return Ok(());
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Starting rating: {:.2}", summary.starting_rating);
    for result in &summary.results {
        println!(
            "  #{:<3} {:7} {:+8.2}  {:8.2} -> {:.2}",
            result.match_id,
            result.outcome.to_string(),
            result.points_delta,
            result.rating_before,
            result.rating_after
        );
    }
    println!("Ending rating:   {:.2}", summary.ending_rating);
    println!("Total change:    {:+.2}", summary.total_change);
    Ok(())
}

fn print_categories() {
    for class in [
        CompetitionClass::ClubLeague,
        CompetitionClass::OpenTournament,
    ] {
        println!("{class}:");
        for entry in categories_for(class) {
            println!("  {:30} x{}", entry.name, entry.coefficient);
        }
    }
}

fn run_session(config: AppConfig, as_json: bool) -> Result<()> {
    let mut ledger = MatchLedger::with_defaults(
        config.session.default_class,
        &config.session.default_category,
    );
    let mut rating_text = config.session.current_rating.unwrap_or_default();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF ends the session
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("error: {e}");
                continue;
            }
        };

        match command {
            Command::Add => {
                ledger.add_match();
                print_list(&ledger);
            }
            Command::Set(id, edit) => ledger.update_match(id, edit),
            Command::Complete(id) => {
                ledger.complete_match(id);
                if needs_opponent_hint(&ledger, id) {
                    println!("match {id} needs an opponent rating before confirming");
                }
            }
            Command::Edit(id) => ledger.edit_match(id),
            Command::Cancel(id) => ledger.cancel_edit(id),
            Command::Remove(id) => ledger.remove_match(id),
            Command::Rating(text) => rating_text = text,
            Command::List => print_list(&ledger),
            Command::Summary => print_summary(&ledger, &rating_text, as_json)?,
            Command::Categories => print_categories(),
            Command::Help => print_help(),
            Command::Quit => break,
        }
    }

    let stats = ledger.stats();
    info!(
        "Session finished: {} added, {} completed, {} removed",
        stats.matches_added, stats.matches_completed, stats.matches_removed
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Paddle Points v{}", paddle_points::VERSION);
    info!(
        "Session defaults: {} / {}",
        config.session.default_class, config.session.default_category
    );

    if args.dry_run {
        info!("Configuration validation successful");
        info!("Dry run completed - exiting without starting a session");
        return Ok(());
    }

    run_session(config, args.json)
}
