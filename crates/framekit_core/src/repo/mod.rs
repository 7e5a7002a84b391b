//! Collection access for frames and circles.
//!
//! # Responsibility
//! - Define the data access contract the lifecycle services depend on.
//! - Isolate SQLite query details from validation and orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic not-found errors in addition to
//!   storage errors.
//! - Spatial rules live in `validation`, never here.

pub mod spatial_repo;
