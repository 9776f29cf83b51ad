//! Shared helpers: subprocess capture, cached file reads, parsing

pub mod command;
pub mod file;
pub mod parsing;
