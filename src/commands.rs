//! Subcommand implementations for the `jv` binary.
pub mod generate;
