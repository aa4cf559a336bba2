//! CLI subcommands.

pub mod check;
pub mod export;
pub mod init;
pub mod resolve;
