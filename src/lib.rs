//! dbwait - block startup until a database accepts connections.
//!
//! The binary polls `host:3306` once a second until a TCP connection
//! succeeds, printing a status line after every failed attempt, and then
//! replaces itself with the command given after the host.
//!
//! # Modules
//!
//! - [`endpoint`] - Validated host/port target
//! - [`poller`] - Fixed-interval availability polling
//! - [`workload`] - The wrapped command and process replacement
//! - [`config`] - Optional TOML configuration and logging setup
//! - [`cli`] - Argument parsing and the top-level handler
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use dbwait::endpoint::Endpoint;
//! use dbwait::poller::Poller;
//!
//! # async fn run() -> Result<(), dbwait::error::Error> {
//! let poller = Poller::new(Endpoint::database("db")?);
//! let readiness = poller.wait(&mut std::io::stdout()).await;
//! assert!(readiness.attempts >= 1);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod poller;
pub mod workload;
