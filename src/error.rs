use miette::Diagnostic;
use thiserror::Error;

/// Exit code used when the target program cannot be found.
pub const EXIT_NOT_FOUND: i32 = 127;

/// Exit code used when the target program exists but cannot be started.
pub const EXIT_NOT_EXECUTABLE: i32 = 126;

/// Endpoint validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum EndpointError {
    #[error("host must not be empty")]
    #[diagnostic(
        code(dbwait::endpoint::host),
        help("pass a hostname or IP literal as the first argument")
    )]
    EmptyHost,

    #[error("port must be between 1 and 65535")]
    #[diagnostic(code(dbwait::endpoint::port))]
    InvalidPort,
}

/// Configuration-related errors with structured variants.
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    #[diagnostic(code(dbwait::config::read))]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    #[diagnostic(code(dbwait::config::parse))]
    Parse(#[source] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    #[diagnostic(code(dbwait::config::invalid))]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Endpoint(#[from] EndpointError),

    #[error("failed to execute {program}: {source}")]
    #[diagnostic(code(dbwait::exec), help("check that the command exists and is executable"))]
    Exec {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for {program}: {source}")]
    #[diagnostic(code(dbwait::wait))]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Process exit code to report for this error.
    ///
    /// Launch failures follow the shell convention of 127 for a missing
    /// program and 126 for anything else that prevents it from starting.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Exec { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                EXIT_NOT_FOUND
            }
            Error::Exec { .. } => EXIT_NOT_EXECUTABLE,
            Error::Config(_) | Error::Endpoint(_) | Error::Wait { .. } => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn exec_error(kind: io::ErrorKind) -> Error {
        Error::Exec {
            program: "psql".into(),
            source: io::Error::from(kind),
        }
    }

    #[test]
    fn missing_program_exits_127() {
        assert_eq!(exec_error(io::ErrorKind::NotFound).exit_code(), 127);
    }

    #[test]
    fn unexecutable_program_exits_126() {
        assert_eq!(exec_error(io::ErrorKind::PermissionDenied).exit_code(), 126);
        assert_eq!(exec_error(io::ErrorKind::Other).exit_code(), 126);
    }

    #[test]
    fn validation_errors_exit_1() {
        assert_eq!(Error::from(EndpointError::EmptyHost).exit_code(), 1);
        let config = ConfigError::InvalidValue {
            field: "poll.port",
            reason: "must not be 0".into(),
        };
        assert_eq!(Error::from(config).exit_code(), 1);
    }

    #[test]
    fn exec_error_names_the_program() {
        let message = exec_error(io::ErrorKind::NotFound).to_string();
        assert!(message.contains("failed to execute psql"), "{message}");
    }
}
