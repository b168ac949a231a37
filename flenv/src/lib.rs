//! Command-line flag parsing layered over environment variables and
//! hard-coded defaults.
//!
//! `flenv` resolves every registered flag from three sources with fixed
//! precedence: command line over environment over default. Failures from
//! all sources are aggregated into a single report rather than stopping
//! at the first, and required flags are validated once resolution is
//! done. A `--help` toggle is always registered; a `--version` toggle
//! appears when a version string is configured.
//!
//! Long-form flags only. Grammar:
//!
//! - `--name=value`: direct assignment
//! - `--name value`: the next token is the value, unless it starts with
//!   `--` or the input ends, in which case `--name` acts as a toggle
//! - `--`: end of flags; trailing tokens are an error (positional
//!   arguments are unsupported)
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use flenv::Registry;
//!
//! let mut registry = Registry::builder()
//!     .app_name("worker")
//!     .version("1.2.3")
//!     .env_prefix("WORKER_")
//!     .build();
//!
//! let verbose = registry.toggle("verbose", "Enable verbose output");
//! let jobs = registry.integer("jobs", "Parallel jobs").default_value(4);
//! let timeout = registry
//!     .duration("timeout", "Per-job timeout")
//!     .default_value(Duration::from_secs(30));
//! let output = registry.string("output", "Destination path").required();
//!
//! registry.resolve(["--verbose", "--output", "result.txt", "--timeout=90s"])?;
//! registry.check_required()?;
//!
//! assert!(verbose.get().unwrap_or(false));
//! assert_eq!(jobs.get(), Some(4));
//! assert_eq!(timeout.get(), Some(Duration::from_secs(90)));
//! assert_eq!(output.get().as_deref(), Some("result.txt"));
//! # Ok::<(), flenv::Errors>(())
//! ```
//!
//! Binaries that want the conventional exit behaviour call
//! [`Registry::parse`] instead of `resolve`/`check_required`: it prints
//! aggregated errors (or help/version output) and exits, returning only
//! when the program should proceed.

mod error;
mod flag;
mod registry;

pub use error::{Error, Errors};
pub use flag::{Flag, FlagType};
pub use registry::{Builder, Registry, RunOutcome};

// The URL flag type is part of the public surface.
pub use url::Url;
