//! Core types, traits, and algorithms for the Peck pairwise ranker.
//!
//! This crate is deliberately free of filesystem and UI dependencies.
//! All other crates depend on it; it depends only on the capability traits
//! in [`store`] (a document store and an item source), never on a concrete
//! backend.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod event;
pub mod history;
pub mod item;
pub mod pairing;
pub mod rating;
pub mod session;
pub mod storage;
pub mod store;

pub use error::{Error, Result};
