//! Go Marketplace Core - Shared types library.
//!
//! This crate provides the types shared by every Go Marketplace component:
//! - `cart` - Cart state container and its persistence layer
//! - `cli` - Command-line front end for inspecting and editing a cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no async
//! runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for line item ids, prices, and quantities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
