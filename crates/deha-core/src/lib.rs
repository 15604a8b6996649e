//! # DEHA-Core
//!
//! Core types for the DEHA real-time pose feedback engine: the 33-point body
//! landmark schema produced by the detector, validated per-frame landmark
//! sets in pixel space, and the joint-angle geometry every pose check is
//! built on.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{Error, Result};
pub use geometry::*;
pub use types::*;
