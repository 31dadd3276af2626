//! Gearsmith: armor-effect authoring core and its local API server.
//!
//! The domain core lives under [`data`]: content-addressed configuration
//! identities, the saved-configuration store, the untrusted-data sanitizer
//! and importer, and the equip/aggregate projection. [`server`] exposes it
//! over a small local HTTP API for the browser editor; [`cli`] dispatches
//! the `serve`/`import`/`export`/`validate` commands.

pub mod cli;
pub mod data;
pub mod server;
