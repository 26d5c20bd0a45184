//! Quern markdown CMS backend — umbrella crate.
//!
//! This crate re-exports all Quern components for convenience.

#![doc = include_str!("../README.md")]

pub use quern_cms as cms;
pub use quern_core as core;
pub use quern_markdown as markdown;
pub use quern_query as query;
pub use quern_registry as registry;
