//! CLI subcommand implementations.

pub mod correct;
pub mod postings;
