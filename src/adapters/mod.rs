// Adapters layer: concrete implementations of the domain ports.
// The file-backed storage lives with its configuration in config::cli.

pub mod memory;
pub mod terminal;
