//! Command-line front door.
//!
//! `main` parses the arguments first; everything except
//! [`CliCommand::RunTui`] finishes without touching the terminal UI.

pub mod args;
pub mod signup;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use signup::run_signup;
pub use version::{version_line, USAGE, VERSION};
