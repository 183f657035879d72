//! Pokedex CLI Library
//!
//! Exposes the response cache, API client, commands and REPL for the binary
//! and for integration tests.

pub mod api;
pub mod cache;
pub mod catch;
pub mod cli;
pub mod commands;
pub mod pokedex;
pub mod repl;
