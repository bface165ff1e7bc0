//! Vitrina Core - Shared domain types.
//!
//! This crate provides common types used across all Vitrina components:
//! - `client` - Console engine (API client, session, item list controller)
//! - `cli` - Command-line console driving the client
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Items and display projections, category taxonomy, SKU
//!   formatting, minor-unit money, merchant credentials

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
