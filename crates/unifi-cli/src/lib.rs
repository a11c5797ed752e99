#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::redundant_pub_crate)]

//! Command-line client for the UniFi Site Manager API.
//!
//! Layout:
//! - `cli.rs`: argument parsing, validation, and action dispatch
//! - `registry.rs`: supported operations and interval validation
//! - `client.rs`: shared HTTP client, errors, and the request dispatcher
//! - `commands/`: response handlers per action
//! - `output.rs`: table renderers and diagnostics
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod commands;
pub(crate) mod output;
pub(crate) mod registry;

pub use cli::run;
