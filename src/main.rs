use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

use scorebook::aggregate::{grand_total, PlayerAggregation};
use scorebook::report::{player_report, ReportQuery};
use scorebook::store::{RecordId, RecordStore, ScoreRecord, ScoreStore, StoreError};
use scorebook::submission::{parse_score, submit, SubmissionForm, SubmitError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Submit(#[from] SubmitError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid player entry '{0}': expected NAME=SCORE")]
    PlayerEntry(String),

    #[error("Invalid score '{0}': must be a valid number")]
    Score(String),
}

#[derive(Parser)]
#[command(name = "scorebook")]
#[command(about = "Record per-player event scores and review totals")]
struct Cli {
    /// Store path
    #[arg(long, global = true, default_value = ".scorebook", env = "SCOREBOOK_PATH")]
    path: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new score store
    Init,

    /// Record one event: every player's score, sharing a date and place
    Add {
        /// Event date (free text)
        #[arg(long)]
        date: Option<String>,

        /// Event place (free text)
        #[arg(long)]
        place: Option<String>,

        /// Player scores as NAME=SCORE, in order
        #[arg(required = false)]
        players: Vec<String>,
    },

    /// List every record
    List,

    /// Show a single record
    Show {
        /// Record id
        id: RecordId,
    },

    /// Change the score of a record
    Edit {
        /// Record id
        id: RecordId,

        /// New score
        #[arg(allow_hyphen_values = true)]
        score: String,
    },

    /// Sum of every recorded score
    Total,

    /// List distinct player names
    Players,

    /// Per-player totals and individual scores
    Scores {
        /// Only include these players (repeatable)
        #[arg(long = "player")]
        players: Vec<String>,
    },

    /// Report on chosen players with chart-ready columns
    Report {
        /// Players to include (repeatable)
        #[arg(long = "player", required = true)]
        players: Vec<String>,

        /// Date label for the report (does not filter)
        #[arg(long)]
        date: Option<String>,

        /// Place label for the report (does not filter)
        #[arg(long)]
        place: Option<String>,

        /// Include per-player totals
        #[arg(long)]
        per_player: bool,
    },
}

/// Split `NAME=SCORE` at the last '=' so names may contain '='.
fn split_player(entry: &str) -> Result<(&str, &str), AppError> {
    entry
        .rsplit_once('=')
        .ok_or_else(|| AppError::PlayerEntry(entry.to_string()))
}

fn print_record(record: &ScoreRecord) {
    println!(
        "{:>6}  {:<20} {:>10}  {:<12} {}",
        record.id,
        record.name,
        record.score,
        record.date_label(),
        record.place_label()
    );
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_aggregation(aggregation: &PlayerAggregation) {
    for player in aggregation.players() {
        let scores: Vec<String> = player.scores.iter().map(f64::to_string).collect();
        println!("{}: {} [{}]", player.name, player.total, scores.join(", "));
    }
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        ScoreStore::init(&cli.path)?;
        println!("Initialized score store at {}", cli.path.display());
        return Ok(());
    }

    let store = ScoreStore::open(&cli.path)?;

    match cli.command {
        Commands::Init => Ok(()),
        Commands::Add {
            date,
            place,
            players,
        } => {
            let mut form = SubmissionForm::new(players.len(), date, place);
            for (index, entry) in players.iter().enumerate() {
                let (name, score) = split_player(entry)?;
                form = form.with_player(index, name, score);
            }

            let outcome = submit(&store, &form)?;
            if cli.json {
                return print_json(&outcome);
            }
            println!(
                "Added {} player(s), total score {}",
                outcome.records.len(),
                outcome.total_score
            );
            for record in &outcome.records {
                print_record(record);
            }
            Ok(())
        }
        Commands::List => {
            let records = store.read_all()?;
            if cli.json {
                return print_json(&records);
            }
            for record in &records {
                print_record(record);
            }
            Ok(())
        }
        Commands::Show { id } => {
            let record = store.read_by_id(id)?;
            if cli.json {
                return print_json(&record);
            }
            print_record(&record);
            Ok(())
        }
        Commands::Edit { id, score } => {
            let score = parse_score(&score).ok_or(AppError::Score(score))?;
            let record = store.update_score(id, score)?;
            if cli.json {
                return print_json(&record);
            }
            print_record(&record);
            Ok(())
        }
        Commands::Total => {
            let total = grand_total(&store.read_all()?);
            if cli.json {
                return print_json(&serde_json::json!({ "total_score": total }));
            }
            println!("{}", total);
            Ok(())
        }
        Commands::Players => {
            let names = store.list_distinct_names()?;
            if cli.json {
                return print_json(&names);
            }
            for name in names {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Scores { players } => {
            let records = if players.is_empty() {
                store.read_all()?
            } else {
                let names: HashSet<String> = players.into_iter().collect();
                store.read_by_names(&names)?
            };
            let aggregation = PlayerAggregation::from_records(&records);
            if cli.json {
                return print_json(&aggregation);
            }
            print_aggregation(&aggregation);
            Ok(())
        }
        Commands::Report {
            players,
            date,
            place,
            per_player,
        } => {
            let query = ReportQuery {
                players,
                date,
                place,
                per_player,
            };
            let report = player_report(&store, &query)?;
            if cli.json {
                return print_json(&report);
            }

            if let Some(date) = &report.annotations.date {
                println!("Date: {}", date);
            }
            if let Some(place) = &report.annotations.place {
                println!("Place: {}", place);
            }
            for record in &report.records {
                print_record(record);
            }
            println!("Total: {}", report.total_score);
            if let Some(aggregation) = &report.aggregation {
                print_aggregation(aggregation);
            }
            Ok(())
        }
    }
}
