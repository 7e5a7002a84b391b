//! Frame validation rules.
//!
//! # Responsibility
//! - Check frame fields (numeric centers, positive size).
//! - Check that a frame neither overlaps nor touches any other frame.
//! - Check that a moved or resized frame still contains its own circles.
//!
//! # Invariants
//! - The candidate's own identifier is excluded from the overlap scan.
//! - The overlap scan reports at most one error.

use super::errors::{
    ErrorField, ValidationErrors, MSG_FRAME_OVERLAP, MSG_FRAME_STRANDS_CIRCLE,
};
use super::{require_number, require_positive};
use crate::model::circle::Circle;
use crate::model::frame::{Frame, FrameDraft, FrameId};
use crate::model::geometry::{circle_fits_in_frame, frames_overlap_or_touch, Point, Rect};

/// Validates a candidate frame against every other frame in `existing`.
///
/// Returns the trusted shape on success so callers never re-read the
/// optional draft fields.
///
/// # Errors
/// - One field error per missing, non-numeric or non-positive field.
/// - One base error when any other frame overlaps or touches the candidate.
pub fn validate_frame(
    candidate: &FrameDraft,
    existing: &[Frame],
    exclude_id: Option<FrameId>,
) -> Result<Rect, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let Some(rect) = check_fields(candidate, &mut errors) else {
        return Err(errors);
    };
    check_overlap(&rect, existing, exclude_id, &mut errors);
    errors.into_result(rect)
}

/// Validates an edit of a stored frame that owns `owned_circles`.
///
/// Runs every [`validate_frame`] rule with the frame excluded from its own
/// overlap scan, then requires every owned circle to stay inside the new
/// edges. Overlap and stranding errors are reported together.
pub fn validate_frame_update(
    candidate: &FrameDraft,
    existing: &[Frame],
    frame_id: FrameId,
    owned_circles: &[Circle],
) -> Result<Rect, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let Some(rect) = check_fields(candidate, &mut errors) else {
        return Err(errors);
    };
    check_overlap(&rect, existing, Some(frame_id), &mut errors);
    if owned_circles
        .iter()
        .any(|circle| !circle_fits_in_frame(&circle.disk(), &rect))
    {
        errors.add(ErrorField::Base, MSG_FRAME_STRANDS_CIRCLE);
    }
    errors.into_result(rect)
}

fn check_fields(candidate: &FrameDraft, errors: &mut ValidationErrors) -> Option<Rect> {
    let center_x = require_number(errors, ErrorField::CenterX, candidate.center_x);
    let center_y = require_number(errors, ErrorField::CenterY, candidate.center_y);
    let width = require_positive(errors, ErrorField::Width, candidate.width);
    let height = require_positive(errors, ErrorField::Height, candidate.height);
    Some(Rect::new(Point::new(center_x?, center_y?), width?, height?))
}

/// At most one error, however many frames collide.
fn check_overlap(
    rect: &Rect,
    existing: &[Frame],
    exclude_id: Option<FrameId>,
    errors: &mut ValidationErrors,
) {
    let collides = existing
        .iter()
        .filter(|other| Some(other.uuid) != exclude_id)
        .any(|other| frames_overlap_or_touch(rect, &other.rect()));
    if collides {
        errors.add(ErrorField::Base, MSG_FRAME_OVERLAP);
    }
}
