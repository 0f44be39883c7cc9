//! Dgency Core - Shared types library.
//!
//! This crate provides common types used across the Dgency storefront
//! components:
//! - `storefront` - Public-facing e-commerce site and API
//! - `integration-tests` - Cross-crate test suite
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, currency settings, and
//!   the storefront identity model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
