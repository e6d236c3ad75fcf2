//! Render pipeline definitions.
//!
//! - `basic` holds the opaque, depth-tested, instanced cube pipeline

pub mod basic;
