//! # quern-query
//!
//! The Quern query engine.
//!
//! Operates over flat collections of [`quern_core::ProcessedDocument`]
//! maps: AND-combined filtering, stable multi-key sorting, projection with
//! aliases and computed functions, value counting, and pagination. The
//! pipeline order is fixed: filter → sort → project → paginate.
//!
//! Two small embedded DSLs live here as dedicated parsers:
//!
//! - property expressions: `prop`, `prop as alias`,
//!   `fn(prop, arg…) as alias` ([`expr`])
//! - the computed-function registry dispatching on `(name, value kind)`
//!   with built-ins `format`, `substring`, `length` ([`functions`])
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`expr`]: property expression parsing
//! - [`functions`]: computed-function registry
//! - [`engine`]: filter/sort/project/count/paginate
//! - [`types`]: request/response row types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod expr;
pub mod functions;
pub mod types;

pub use engine::{paginate, QueryEngine};
pub use error::{Error, Result};
pub use expr::PropertyExpr;
pub use functions::FunctionRegistry;
pub use types::{FilterOperator, FilterRow, Page, PropertyCount, SortOrder, SortRow};
