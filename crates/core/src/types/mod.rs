//! Core type definitions.
//!
//! - [`id`] - Type-safe entity ID newtypes
//! - [`price`] - Currency settings and price formatting
//! - [`identity`] - Guest/authenticated identity model

pub mod id;
pub mod identity;
pub mod price;

pub use id::*;
pub use identity::*;
pub use price::*;
