//! Domain model for frames, circles and their geometry.
//!
//! # Responsibility
//! - Define the persisted records and candidate field sets.
//! - Provide the pure geometry primitives the validators rely on.
//!
//! # Invariants
//! - Every persisted object is identified by a stable UUID.
//! - A circle is owned by exactly one frame.

pub mod circle;
pub mod frame;
pub mod geometry;
