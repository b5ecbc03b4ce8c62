//! Shared primitives for the Physalia phylogenetics workspace.
//!
//! `physalia-core` provides the foundation the other Physalia crates build on:
//!
//! - **Error types** — [`PhysaliaError`] and [`Result`] for structured error handling
//! - **Traits** — [`Sequence`], [`Scored`], [`Summarizable`]

pub mod error;
pub mod traits;

pub use error::{PhysaliaError, Result};
pub use traits::*;
