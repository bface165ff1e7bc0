//! Core types for Vitrina.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod credentials;
pub mod id;
pub mod item;
pub mod money;

pub use category::{Category, CategoryError, category_filter_options, format_sku};
pub use credentials::{MerchantCredentials, is_configured};
pub use id::{ItemId, UserId};
pub use item::{Item, ItemRow, PLACEHOLDER_LABEL};
pub use money::{MoneyError, format_minor, format_minor_opt, to_minor};
