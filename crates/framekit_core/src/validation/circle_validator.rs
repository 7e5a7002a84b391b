//! Circle validation rules.
//!
//! # Responsibility
//! - Check circle fields (numeric centers, positive diameter).
//! - Check containment in the owning frame, reporting every crossed edge.
//! - Check that a circle neither overlaps nor touches its sibling circles.
//!
//! # Invariants
//! - A missing owning frame is terminal and is never mixed with field errors.
//! - Only circles owned by the same frame are compared.
//! - The candidate's own identifier is excluded from the overlap scan.

use super::errors::{ErrorField, ValidationErrors, MSG_CIRCLE_OVERLAP};
use super::{require_number, require_positive};
use crate::model::circle::{Circle, CircleDraft, CircleId};
use crate::model::frame::{Frame, FrameId};
use crate::model::geometry::{circles_overlap_or_touch, escaped_sides, Disk, Point, Side};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why a circle candidate was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum CircleValidationError {
    /// The owning frame could not be resolved.
    FrameNotFound(FrameId),
    /// Field and geometric failures, in discovery order.
    Invalid(ValidationErrors),
}

impl Display for CircleValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FrameNotFound(id) => write!(f, "owning frame not found: {id}"),
            Self::Invalid(errors) => write!(f, "{errors}"),
        }
    }
}

impl Error for CircleValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::FrameNotFound(_) => None,
            Self::Invalid(errors) => Some(errors),
        }
    }
}

/// Validates a candidate circle against its owning frame and siblings.
///
/// `owning_frame` is the caller's lookup of `frame_id`; `None` means it does
/// not exist. `siblings` may contain circles of other frames; they are ignored.
pub fn validate_circle(
    candidate: &CircleDraft,
    frame_id: FrameId,
    owning_frame: Option<&Frame>,
    siblings: &[Circle],
    exclude_id: Option<CircleId>,
) -> Result<Disk, CircleValidationError> {
    let frame = owning_frame.ok_or(CircleValidationError::FrameNotFound(frame_id))?;
    let mut errors = ValidationErrors::new();

    let center_x = require_number(&mut errors, ErrorField::CenterX, candidate.center_x);
    let center_y = require_number(&mut errors, ErrorField::CenterY, candidate.center_y);
    let diameter = require_positive(&mut errors, ErrorField::Diameter, candidate.diameter);

    let (Some(center_x), Some(center_y), Some(diameter)) = (center_x, center_y, diameter) else {
        return Err(CircleValidationError::Invalid(errors));
    };
    let disk = Disk::new(Point::new(center_x, center_y), diameter);

    for side in escaped_sides(&disk, &frame.rect()) {
        let field = match side {
            Side::Left | Side::Right => ErrorField::CenterX,
            Side::Bottom | Side::Top => ErrorField::CenterY,
        };
        errors.add(
            field,
            format!("Circle extends beyond {} edge of frame", side.as_str()),
        );
    }

    let collides = siblings
        .iter()
        .filter(|other| other.frame_uuid == frame_id)
        .filter(|other| Some(other.uuid) != exclude_id)
        .any(|other| circles_overlap_or_touch(&disk, &other.disk()));
    if collides {
        errors.add(ErrorField::Base, MSG_CIRCLE_OVERLAP);
    }

    errors
        .into_result(disk)
        .map_err(CircleValidationError::Invalid)
}
