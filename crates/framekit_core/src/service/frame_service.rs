//! Frame lifecycle service.
//!
//! # Responsibility
//! - Create, update and delete frames under the store's write lock.
//! - Provide frame reads and per-frame circle statistics.
//!
//! # Invariants
//! - A frame is persisted only after validating against the live collection
//!   inside the same write transaction.
//! - A failed validation leaves storage untouched.
//! - `delete_frame` is guarded; `delete_frame_cascade` removes circles first.

use crate::model::circle::Circle;
use crate::model::frame::{Frame, FrameDraft, FrameId, FramePatch};
use crate::model::geometry::Point;
use crate::repo::spatial_repo::{require_frame, RepoError, RepoResult, SpatialRepository};
use crate::validation::errors::ValidationErrors;
use crate::validation::frame_validator::{validate_frame, validate_frame_update};
use log::{error, info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from frame use-cases.
#[derive(Debug)]
pub enum FrameServiceError {
    /// Candidate failed field or geometric validation.
    Invalid(ValidationErrors),
    /// Target frame does not exist.
    FrameNotFound(FrameId),
    /// Guarded delete refused because the frame still owns circles.
    HasCircles { frame_id: FrameId, circle_count: u64 },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for FrameServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(errors) => write!(f, "invalid frame: {errors}"),
            Self::FrameNotFound(id) => write!(f, "frame not found: {id}"),
            Self::HasCircles { .. } => write!(f, "Cannot delete frame with circles"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FrameServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for FrameServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::FrameNotFound(id) => Self::FrameNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationErrors> for FrameServiceError {
    fn from(value: ValidationErrors) -> Self {
        Self::Invalid(value)
    }
}

/// Circle statistics for one frame.
///
/// Positions are circle centers; each is `None` when the frame is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSummary {
    pub frame: Frame,
    pub total_circles: usize,
    pub highest: Option<Point>,
    pub lowest: Option<Point>,
    pub leftmost: Option<Point>,
    pub rightmost: Option<Point>,
}

impl FrameSummary {
    fn build(frame: Frame, circles: &[Circle]) -> Self {
        // Ties keep the earliest circle in listing order.
        let pick = |better: fn(&Circle, &Circle) -> bool| {
            circles
                .iter()
                .fold(None::<&Circle>, |best, circle| match best {
                    Some(current) if !better(circle, current) => Some(current),
                    _ => Some(circle),
                })
                .map(Circle::center)
        };

        Self {
            total_circles: circles.len(),
            highest: pick(|a, b| a.center_y > b.center_y),
            lowest: pick(|a, b| a.center_y < b.center_y),
            leftmost: pick(|a, b| a.center_x < b.center_x),
            rightmost: pick(|a, b| a.center_x > b.center_x),
            frame,
        }
    }
}

/// Frame use-case service over a repository implementation.
pub struct FrameService<R: SpatialRepository> {
    repo: R,
}

impl<R: SpatialRepository> FrameService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates `draft` against every stored frame and persists it.
    pub fn create_frame(&self, draft: &FrameDraft) -> Result<Frame, FrameServiceError> {
        let result = self.repo.write_locked(|repo| -> Result<Frame, FrameServiceError> {
            let existing = repo.list_frames()?;
            let rect = validate_frame(draft, &existing, None)?;
            let frame = Frame::new(rect);
            repo.insert_frame(&frame)?;
            Ok(frame)
        });
        log_outcome("frame_create", &result, |frame| frame.uuid.to_string());
        result
    }

    /// Merges `patch` onto the stored frame, re-validates and persists.
    ///
    /// The frame is excluded from its own overlap scan. A move or resize that
    /// would leave one of its circles outside is rejected, and that error is
    /// reported alongside an overlap error when both apply.
    pub fn update_frame(
        &self,
        id: FrameId,
        patch: &FramePatch,
    ) -> Result<Frame, FrameServiceError> {
        let result = self.repo.write_locked(|repo| -> Result<Frame, FrameServiceError> {
            let stored = require_frame(repo, id)?;
            let candidate = stored.to_draft().merged(patch);

            let existing = repo.list_frames()?;
            let owned = repo.list_circles(id)?;
            let rect = validate_frame_update(&candidate, &existing, id, &owned)?;

            let frame = Frame::with_id(id, rect);
            repo.update_frame(&frame)?;
            Ok(frame)
        });
        log_outcome("frame_update", &result, |frame| frame.uuid.to_string());
        result
    }

    /// Deletes a frame that owns no circles.
    ///
    /// # Errors
    /// - `HasCircles` when any circle remains; nothing is deleted.
    pub fn delete_frame(&self, id: FrameId) -> Result<(), FrameServiceError> {
        let result = self.repo.write_locked(|repo| -> Result<(), FrameServiceError> {
            require_frame(repo, id)?;
            let circle_count = repo.count_circles(id)?;
            if circle_count > 0 {
                return Err(FrameServiceError::HasCircles {
                    frame_id: id,
                    circle_count,
                });
            }
            repo.delete_frame(id)?;
            Ok(())
        });
        log_outcome("frame_delete", &result, |_| id.to_string());
        result
    }

    /// Deletes a frame together with all of its circles.
    ///
    /// Returns how many circles were removed.
    pub fn delete_frame_cascade(&self, id: FrameId) -> Result<u64, FrameServiceError> {
        let result = self.repo.write_locked(|repo| -> Result<u64, FrameServiceError> {
            require_frame(repo, id)?;
            let removed = repo.delete_circles_of_frame(id)?;
            repo.delete_frame(id)?;
            Ok(removed)
        });
        log_outcome("frame_delete_cascade", &result, |removed| {
            format!("{id} circles_removed={removed}")
        });
        result
    }

    /// Gets one frame by ID.
    pub fn get_frame(&self, id: FrameId) -> RepoResult<Option<Frame>> {
        self.repo.find_frame(id)
    }

    /// Lists every frame in insertion order.
    pub fn list_frames(&self) -> RepoResult<Vec<Frame>> {
        self.repo.list_frames()
    }

    /// Builds circle statistics for one frame.
    pub fn frame_summary(&self, id: FrameId) -> Result<FrameSummary, FrameServiceError> {
        let frame = require_frame(&self.repo, id)?;
        let circles = self.repo.list_circles(id)?;
        Ok(FrameSummary::build(frame, &circles))
    }
}

fn log_outcome<T>(
    event: &str,
    result: &Result<T, FrameServiceError>,
    describe: impl FnOnce(&T) -> String,
) {
    match result {
        Ok(value) => info!(
            "event={event} module=frame_service status=ok frame={}",
            describe(value)
        ),
        Err(FrameServiceError::Invalid(errors)) => warn!(
            "event={event} module=frame_service status=rejected error_count={}",
            errors.len()
        ),
        Err(FrameServiceError::HasCircles {
            frame_id,
            circle_count,
        }) => warn!(
            "event={event} module=frame_service status=rejected frame={frame_id} error_code=has_circles circle_count={circle_count}"
        ),
        Err(FrameServiceError::FrameNotFound(id)) => warn!(
            "event={event} module=frame_service status=rejected frame={id} error_code=not_found"
        ),
        Err(FrameServiceError::Repo(err)) => error!(
            "event={event} module=frame_service status=error error={err}"
        ),
    }
}
