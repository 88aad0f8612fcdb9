//! Library surface of the fardel CLI.
//!
//! Exposed as a library so integration tests can drive commands without
//! spawning a process, mirroring the binary in `main.rs`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;
