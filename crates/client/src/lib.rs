//! Vitrina Client - Console engine for the merchant inventory backend.
//!
//! This crate implements everything between the rendering surface and the
//! backend HTTP API:
//!
//! - [`config`] - Environment-driven configuration
//! - [`api`] - Stateless request/response mapping to the five backend
//!   operations, behind the [`api::MerchantApi`] trait
//! - [`session`] - Authenticated identity and the derived
//!   "credentials configured" flag
//! - [`list`] - Incremental page loading, the in-flight guard, and
//!   client-side filtering over the accumulated list
//! - [`create`] - Product creation flow with SKU allocation and the
//!   post-creation reset handshake
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrina_client::{api::ApiClient, config::Config, list::ItemListController};
//! use vitrina_core::UserId;
//!
//! let config = Config::from_env()?;
//! let api = ApiClient::new(&config)?;
//! let list = ItemListController::new(api, UserId::new("u-1"), config.page_size);
//!
//! list.activate().await?;
//! while list.snapshot().has_more {
//!     list.notify_near_end().await?;
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod create;
pub mod list;
pub mod session;

pub use api::{ApiClient, ApiError, MerchantApi, NewProduct, StoredCredentials};
pub use config::{Config, ConfigError};
pub use create::{ImageAttachment, ProductCreationFlow, ProductDraft};
pub use list::{FetchOutcome, ItemFilter, ItemListController, ListPhase, ListSnapshot};
pub use session::{SessionProvider, SessionState};
