//! Handler for the top-level command.

use std::io;

use tracing::info;

use crate::cli::Cli;
use crate::config::Config;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::poller::Poller;
use crate::workload::Workload;

/// Merge configuration sources from the parsed arguments.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(port) = cli.port {
        config.poll.port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.json_logs {
        config.logging.format = "json".to_string();
    }

    config.validate()?;
    Ok(config)
}

/// Wait for the database, then hand over to the command.
///
/// Returns the exit code to terminate with when the command did not replace
/// this process.
pub async fn execute(cli: &Cli) -> Result<i32> {
    let config = resolve_config(cli)?;
    config.init_logging();

    let endpoint = Endpoint::try_new(cli.host.as_str(), config.poll.port)?;
    let workload = Workload::new(cli.command.iter().cloned());

    let poller = Poller::new(endpoint);
    info!(
        endpoint = %poller.endpoint(),
        program = ?workload.program(),
        "waiting for database"
    );

    let readiness = poller.wait(&mut io::stdout()).await;
    info!(attempts = readiness.attempts, "database ready");

    workload.launch()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn cli_overrides_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[poll]\nport = 5432\n[logging]\nlevel = \"info\"").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["dbwait", "-c", path, "--port", "6000", "db"]).unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.poll.port, 6000);
        assert_eq!(config.logging.level, "info");

        let cli = Cli::try_parse_from(["dbwait", "-c", path, "db"]).unwrap();
        assert_eq!(resolve_config(&cli).unwrap().poll.port, 5432);
    }

    #[test]
    fn json_logs_flag_sets_format() {
        let cli = Cli::try_parse_from(["dbwait", "--json-logs", "db"]).unwrap();
        assert_eq!(resolve_config(&cli).unwrap().logging.format, "json");
    }

    #[test]
    fn port_zero_override_is_rejected() {
        let cli = Cli::try_parse_from(["dbwait", "--port", "0", "db"]).unwrap();
        assert!(resolve_config(&cli).is_err());
    }
}
