//! Core library for the `wblg` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, configuration loading, interface discovery, the interface-bound HTTP
//! fetcher, and the two-tier load scheduler that turns a run into a
//! [`load::Report`]. The primary user-facing interface is the `wblg`
//! command-line application.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod load;
pub mod shutdown;
pub mod system;
