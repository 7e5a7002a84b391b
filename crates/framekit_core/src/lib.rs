//! Core domain logic for frames and the circles they own.
//! This crate is the single source of truth for the spatial invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::circle::{Circle, CircleDraft, CircleId, CirclePatch};
pub use model::frame::{Frame, FrameDraft, FrameId, FramePatch};
pub use model::geometry::{Disk, Edges, Point, Rect, Side};
pub use repo::spatial_repo::{RepoError, RepoResult, SpatialRepository, SqliteSpatialRepository};
pub use service::circle_service::{CircleQuery, CircleService, CircleServiceError};
pub use service::frame_service::{FrameService, FrameServiceError, FrameSummary};
pub use validation::circle_validator::{validate_circle, CircleValidationError};
pub use validation::errors::{ErrorField, FieldError, ValidationErrors};
pub use validation::frame_validator::{validate_frame, validate_frame_update};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
