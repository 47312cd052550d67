//! Command-line surface of the `roster` binary.

use clap::{Args, Parser, Subcommand};
use roster_core::config::DEFAULT_DB_FILE_NAME;
use roster_core::{default_log_level, RosterConfig};
use std::path::PathBuf;

/// roster - manage a student roster stored in a local SQLite file
#[derive(Debug, Parser)]
#[command(name = "roster", version, about, long_about = None)]
pub struct Cli {
    /// Roster database file
    #[arg(long, global = true, value_name = "FILE", default_value = DEFAULT_DB_FILE_NAME)]
    pub db: PathBuf,

    /// Absolute directory for rolling log files (logging is off when omitted)
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new student
    Add(AddArgs),
    /// List all students in roster order
    List,
    /// Block a student
    Block(TargetArgs),
    /// Edit a student's name, birth date or email
    Edit(EditArgs),
    /// Delete a student
    Delete(TargetArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long, default_value = "")]
    pub id: String,
    #[arg(long, default_value = "")]
    pub name: String,
    /// Birth date as YYYY-MM-DD
    #[arg(long, default_value = "")]
    pub birth: String,
    #[arg(long, default_value = "")]
    pub email: String,
}

#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Student id
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Student id (not editable)
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    /// Birth date as YYYY-MM-DD
    #[arg(long)]
    pub birth: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl Cli {
    pub fn config(&self) -> RosterConfig {
        RosterConfig {
            db_path: self.db.clone(),
            log_level: self
                .log_level
                .clone()
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: self.log_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_feed_config() {
        let cli = Cli::parse_from([
            "roster",
            "--db",
            "/tmp/class.sqlite3",
            "--log-level",
            "warn",
            "list",
        ]);
        let config = cli.config();
        assert_eq!(config.db_path, PathBuf::from("/tmp/class.sqlite3"));
        assert_eq!(config.log_level, "warn");
        assert!(config.log_dir.is_none());
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn edit_accepts_partial_changes() {
        let cli = Cli::parse_from(["roster", "edit", "S1", "--email", "an@x.com", "-y"]);
        match cli.command {
            Command::Edit(args) => {
                assert_eq!(args.id, "S1");
                assert_eq!(args.email.as_deref(), Some("an@x.com"));
                assert!(args.name.is_none());
                assert!(args.yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
