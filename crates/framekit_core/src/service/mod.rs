//! Frame and circle use-case services.
//!
//! # Responsibility
//! - Run the validators against the live collection and persist only on
//!   success.
//! - Keep callers decoupled from storage details.
//!
//! # Invariants
//! - Every mutation reads, validates and writes inside one write lock.
//! - Services never bypass the validators.

pub mod circle_service;
pub mod frame_service;
