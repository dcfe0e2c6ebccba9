//! CLI command implementations

pub mod init;
pub mod simulate;
pub mod validate;

/// How a command prints its result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
