//! Course and event discovery for a university campus.
//!
//! The [`repository::ContentRepository`] resolves catalog content through a
//! memory snapshot, a durable cache, a remote source and a static fallback.
//! Bookmarks and accounts live alongside it in the same key-value store.

pub mod bookmarks;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod remote;
pub mod repository;
pub mod session;
pub mod store;
