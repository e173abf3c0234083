//! CLI subcommands that work on the content directory directly

pub mod list;
pub mod new;
