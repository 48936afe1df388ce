//! Command-line interface definitions.

pub mod run;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

/// Wait for a database port to accept connections, then exec a command.
#[derive(Parser, Debug)]
#[command(name = "dbwait")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the database port (default 3306)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,

    /// Hostname or IP address of the database
    pub host: String,

    /// Command to run once the database is up
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<OsString>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_only() {
        let cli = Cli::try_parse_from(["dbwait", "db"]).unwrap();
        assert_eq!(cli.host, "db");
        assert!(cli.command.is_empty());
        assert_eq!(cli.port, None);
    }

    #[test]
    fn command_keeps_its_own_flags() {
        let cli = Cli::try_parse_from(["dbwait", "db", "ls", "-la", "--port", "9"]).unwrap();
        assert_eq!(cli.port, None);
        assert_eq!(
            cli.command,
            vec![
                OsString::from("ls"),
                OsString::from("-la"),
                OsString::from("--port"),
                OsString::from("9"),
            ]
        );
    }

    #[test]
    fn options_before_host() {
        let cli =
            Cli::try_parse_from(["dbwait", "-p", "5432", "--json-logs", "db", "true"]).unwrap();
        assert_eq!(cli.port, Some(5432));
        assert!(cli.json_logs);
        assert_eq!(cli.command, vec![OsString::from("true")]);
    }

    #[test]
    fn host_is_required() {
        assert!(Cli::try_parse_from(["dbwait"]).is_err());
    }
}
