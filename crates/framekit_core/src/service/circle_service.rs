//! Circle lifecycle and query service.
//!
//! # Responsibility
//! - Create and update circles under the store's write lock.
//! - Delete circles idempotently.
//! - List and search circles by frame and enclosing radius.
//!
//! # Invariants
//! - A circle is validated against its owning frame and that frame's other
//!   circles inside the same write transaction that persists it.
//! - A missing owning frame is reported as `FrameNotFound`, never as a
//!   validation error.
//! - Deleting an absent circle is a no-op.

use crate::model::circle::{Circle, CircleDraft, CircleId, CirclePatch};
use crate::model::frame::FrameId;
use crate::model::geometry::Point;
use crate::repo::spatial_repo::{
    require_circle, require_frame, RepoError, RepoResult, SpatialRepository,
};
use crate::validation::circle_validator::{validate_circle, CircleValidationError};
use crate::validation::errors::ValidationErrors;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from circle use-cases.
#[derive(Debug)]
pub enum CircleServiceError {
    /// Candidate failed field or geometric validation.
    Invalid(ValidationErrors),
    /// Owning frame does not exist.
    FrameNotFound(FrameId),
    /// Target circle does not exist.
    CircleNotFound(CircleId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for CircleServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(errors) => write!(f, "invalid circle: {errors}"),
            Self::FrameNotFound(id) => write!(f, "frame not found: {id}"),
            Self::CircleNotFound(id) => write!(f, "circle not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CircleServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CircleServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::FrameNotFound(id) => Self::FrameNotFound(id),
            RepoError::CircleNotFound(id) => Self::CircleNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Filter for [`CircleService::query_circles`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CircleQuery {
    /// Restrict to one frame. A frame that does not exist yields no circles.
    pub frame_id: Option<FrameId>,
    /// Keep only circles fully enclosed by the disk `(center, radius)`.
    pub within: Option<(Point, f64)>,
}

/// Circle use-case service over a repository implementation.
pub struct CircleService<R: SpatialRepository> {
    repo: R,
}

impl<R: SpatialRepository> CircleService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates `draft` inside frame `frame_id` and persists it.
    pub fn create_circle(
        &self,
        frame_id: FrameId,
        draft: &CircleDraft,
    ) -> Result<Circle, CircleServiceError> {
        let result = self.repo.write_locked(|repo| -> Result<Circle, CircleServiceError> {
            let frame = require_frame(repo, frame_id)?;
            let siblings = repo.list_circles(frame_id)?;
            let disk = validate_circle(draft, frame_id, Some(&frame), &siblings, None)
                .map_err(rejection)?;

            let circle = Circle::new(frame_id, disk);
            repo.insert_circle(&circle)?;
            Ok(circle)
        });
        log_outcome("circle_create", &result);
        result
    }

    /// Merges `patch` onto the stored circle, re-validates and persists.
    ///
    /// The circle stays in its frame and is excluded from its own overlap scan.
    pub fn update_circle(
        &self,
        id: CircleId,
        patch: &CirclePatch,
    ) -> Result<Circle, CircleServiceError> {
        let result = self.repo.write_locked(|repo| -> Result<Circle, CircleServiceError> {
            let stored = require_circle(repo, id)?;
            let frame_id = stored.frame_uuid;
            let frame = repo.find_frame(frame_id)?;
            let siblings = repo.list_circles(frame_id)?;

            let candidate = stored.to_draft().merged(patch);
            let disk =
                validate_circle(&candidate, frame_id, frame.as_ref(), &siblings, Some(id))
                    .map_err(rejection)?;

            let circle = Circle::with_id(id, frame_id, disk);
            repo.update_circle(&circle)?;
            Ok(circle)
        });
        log_outcome("circle_update", &result);
        result
    }

    /// Deletes one circle. Returns whether it existed.
    ///
    /// Removing a circle can never break a spatial invariant, so this only
    /// fails on storage errors.
    pub fn delete_circle(&self, id: CircleId) -> Result<bool, CircleServiceError> {
        match self.repo.delete_circle(id) {
            Ok(removed) => {
                info!(
                    "event=circle_delete module=circle_service status=ok circle={id} removed={removed}"
                );
                Ok(removed)
            }
            Err(err) => {
                error!("event=circle_delete module=circle_service status=error error={err}");
                Err(err.into())
            }
        }
    }

    /// Gets one circle by ID.
    pub fn get_circle(&self, id: CircleId) -> RepoResult<Option<Circle>> {
        self.repo.find_circle(id)
    }

    /// Lists the circles of an existing frame in insertion order.
    pub fn list_circles(&self, frame_id: FrameId) -> Result<Vec<Circle>, CircleServiceError> {
        require_frame(&self.repo, frame_id)?;
        Ok(self.repo.list_circles(frame_id)?)
    }

    /// Searches circles by optional frame and enclosing disk.
    pub fn query_circles(&self, query: &CircleQuery) -> RepoResult<Vec<Circle>> {
        let circles = match query.frame_id {
            Some(frame_id) => self.repo.list_circles(frame_id)?,
            None => self.repo.list_all_circles()?,
        };

        Ok(match query.within {
            Some((center, radius)) => circles
                .into_iter()
                .filter(|circle| circle.within_radius(center, radius))
                .collect(),
            None => circles,
        })
    }
}

fn rejection(err: CircleValidationError) -> CircleServiceError {
    match err {
        CircleValidationError::FrameNotFound(id) => CircleServiceError::FrameNotFound(id),
        CircleValidationError::Invalid(errors) => CircleServiceError::Invalid(errors),
    }
}

fn log_outcome(event: &str, result: &Result<Circle, CircleServiceError>) {
    match result {
        Ok(circle) => info!(
            "event={event} module=circle_service status=ok circle={} frame={}",
            circle.uuid, circle.frame_uuid
        ),
        Err(CircleServiceError::Invalid(errors)) => warn!(
            "event={event} module=circle_service status=rejected error_count={}",
            errors.len()
        ),
        Err(CircleServiceError::FrameNotFound(id)) => warn!(
            "event={event} module=circle_service status=rejected frame={id} error_code=frame_not_found"
        ),
        Err(CircleServiceError::CircleNotFound(id)) => warn!(
            "event={event} module=circle_service status=rejected circle={id} error_code=not_found"
        ),
        Err(CircleServiceError::Repo(err)) => {
            error!("event={event} module=circle_service status=error error={err}")
        }
    }
}
