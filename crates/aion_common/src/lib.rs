//! Shared foundational types used across the Aion workspace.
//!
//! This crate provides content hashing and the common internal result/error
//! types shared by every other crate in the workspace.

#![warn(missing_docs)]

pub mod hash;
pub mod result;

pub use hash::ContentHash;
pub use result::{AionResult, InternalError};
