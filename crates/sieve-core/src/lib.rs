//! Sieve Core Library
//!
//! This crate provides the core functionality for Sieve:
//! - A loosely typed [`Value`] model for decoded documents
//! - Primitive converters and string/list filters
//! - Named filter dispatch with aliases
//! - The [`Filtration`] engine binding filter chains to document fields
//! - YAML rule sets
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Raw data   │────▶│ Filtration  │────▶│ Clean data  │
//! │   (Map)     │     │ rules+chain │     │   (Map)     │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use sieve_core::filter;
//!
//! let out = filter::apply("snakeCase", "RangePrice", &[]).unwrap();
//! assert_eq!(out.as_str(), Some("range_price"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod convert;
pub mod error;
pub mod filter;
pub mod filtration;
pub mod lists;
pub mod path;
pub mod registry;
pub mod strings;
pub mod time;
pub mod value;

pub use config::RuleSet;
pub use error::{Error, FilterError, Result};
pub use filter::{FilterSpec, apply};
pub use filtration::{Filtration, Rule, RuleSpec};
pub use value::{Map, Value};
