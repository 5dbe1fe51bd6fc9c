//! Domain types and pure rules for the marquee movie catalog.
//!
//! This crate has no I/O. It is shared by the storage layer, the HTTP API and
//! the client so that all three agree on the shape of a movie, a category and
//! a search filter.

pub mod catalog;
pub mod error;
pub mod search;
pub mod types;
