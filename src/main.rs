/// Command-line front end for the habit counter
///
/// Sets up logging, resolves configuration, opens the session and runs one
/// command against it.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use habit_counter::tools::{self, AddOptionParams, CreateHabitParams, EditOptionParams, HistoryParams,
    LogEntryParams, ShowHabitParams, UnlogEntryParams, UpdateHabitParams};
use habit_counter::{open_session, BackendKind, Config};

/// Command line arguments for the habit counter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Storage backend: sqlite, file or memory
    #[arg(long, default_value = "sqlite")]
    backend: BackendKind,

    /// Directory holding the stored data
    /// If not provided, uses HABIT_COUNTER_DATA_DIR or a default location in the home directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Print responses as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all habits with their current counts
    List,
    /// Create a new habit
    Create {
        name: String,
        #[arg(long)]
        icon: Option<String>,
        /// Target value per period
        #[arg(long)]
        target: Option<f64>,
        /// Target period: day, week, month or year
        #[arg(long)]
        period: Option<String>,
    },
    /// Show a habit's options, target progress and recent entries
    Show {
        habit: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Log an entry using an option label or a custom value
    Log {
        habit: String,
        #[arg(long)]
        option: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        value: Option<f64>,
        #[arg(long)]
        label: Option<String>,
    },
    /// Remove a logged entry
    Unlog { habit: String, entry_id: String },
    /// List a habit's entries, newest first
    History {
        habit: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Rename a habit
    Rename { habit: String, name: String },
    /// Set or clear a habit's target
    Target {
        habit: String,
        value: Option<f64>,
        period: Option<String>,
        #[arg(long)]
        clear: bool,
    },
    /// Manage quick-entry options
    #[command(subcommand, name = "option")]
    Opt(OptionCommand),
    /// Delete a habit with its options and entries
    Delete { habit: String },
    /// Replace all data with demo data
    Demo,
    /// Delete all data
    Clear,
}

#[derive(Subcommand, Debug)]
enum OptionCommand {
    /// Add an option to a habit
    Add {
        habit: String,
        label: String,
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },
    /// Change an option's label or value
    Edit {
        option_id: String,
        #[arg(long)]
        label: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        value: Option<f64>,
    },
    /// Remove an option (a habit keeps at least one)
    Remove { option_id: String },
}

fn print_response<T: Serialize>(json: bool, message: &str, response: &T) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else {
        println!("{}", message);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_counter={}", log_level))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::resolve(args.backend, args.data_dir)?;
    info!("Using {} storage at: {}", config.backend, config.data_dir.display());

    let mut session = open_session(&config).await?;
    let json = args.json;

    match args.command {
        Command::List => {
            let r = tools::list_habits(&session).await?;
            print_response(json, &r.message, &r)?;
        }
        Command::Create { name, icon, target, period } => {
            let params = CreateHabitParams { name, icon, target_value: target, period };
            let r = tools::create_habit(&mut session, params).await?;
            print_response(json, &r.message, &r)?;
        }
        Command::Show { habit, limit } => {
            let r = tools::show_habit(&mut session, ShowHabitParams { habit, limit }).await?;
            print_response(json, &r.message, &r)?;
        }
        Command::Log { habit, option, value, label } => {
            let params = LogEntryParams { habit, option, value, label };
            let r = tools::log_entry(&mut session, params).await?;
            print_response(json, &r.message, &r)?;
        }
        Command::Unlog { habit, entry_id } => {
            let r = tools::unlog_entry(&mut session, UnlogEntryParams { habit, entry_id }).await?;
            print_response(json, &r.message, &r)?;
        }
        Command::History { habit, limit } => {
            let r = tools::habit_history(&mut session, HistoryParams { habit, limit }).await?;
            print_response(json, &r.message, &r)?;
        }
        Command::Rename { habit, name } => {
            let params = UpdateHabitParams { habit, name: Some(name), ..Default::default() };
            let r = tools::update_habit(&mut session, params).await?;
            print_response(json, &r.message, &r)?;
        }
        Command::Target { habit, value, period, clear } => {
            let params = UpdateHabitParams {
                habit,
                target_value: value,
                period,
                clear_target: clear,
                ..Default::default()
            };
            let r = tools::update_habit(&mut session, params).await?;
            print_response(json, &r.message, &r)?;
        }
        Command::Opt(OptionCommand::Add { habit, label, value }) => {
            let r = tools::add_option(&mut session, AddOptionParams { habit, label, value }).await?;
            print_response(json, &r.message, &r)?;
        }
        Command::Opt(OptionCommand::Edit { option_id, label, value }) => {
            let r = tools::edit_option(&mut session, EditOptionParams { option_id, label, value }).await?;
            print_response(json, &r.message, &r)?;
        }
        Command::Opt(OptionCommand::Remove { option_id }) => {
            let r = tools::remove_option(&mut session, &option_id).await?;
            print_response(json, &r.message, &r)?;
        }
        Command::Delete { habit } => {
            let r = tools::delete_habit(&mut session, &habit).await?;
            print_response(json, &r.message, &r)?;
        }
        Command::Demo => {
            let r = tools::populate_demo_data(&mut session).await?;
            print_response(json, &r.message, &r)?;
        }
        Command::Clear => {
            let r = tools::clear_all_data(&mut session).await?;
            print_response(json, &r.message, &r)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_option_subcommands_parse() {
        let args = Args::try_parse_from(["habit-counter", "option", "remove", "abc"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Opt(OptionCommand::Remove { ref option_id }) if option_id == "abc"
        ));

        let args = Args::try_parse_from(["habit-counter", "option", "add", "Water", "Spill", "-1"]).unwrap();
        assert!(matches!(args.command, Command::Opt(OptionCommand::Add { value, .. }) if value == -1.0));
    }

    #[test]
    fn test_global_flags_and_target() {
        let args = Args::try_parse_from([
            "habit-counter", "--backend", "file", "--json", "target", "Reading", "10", "week",
        ])
        .unwrap();
        assert_eq!(args.backend, BackendKind::File);
        assert!(args.json);
        assert!(matches!(
            args.command,
            Command::Target { value: Some(v), period: Some(ref p), clear: false, .. } if v == 10.0 && p == "week"
        ));
    }
}
