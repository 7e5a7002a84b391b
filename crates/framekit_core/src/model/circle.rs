//! Circle domain model.
//!
//! # Responsibility
//! - Define the persisted circle record and its derived metrics.
//! - Define candidate field sets used by create and update paths.
//!
//! # Invariants
//! - Every circle belongs to exactly one frame for its whole lifetime.
//! - A persisted `Circle` always has finite centers and positive diameter.

use crate::model::frame::FrameId;
use crate::model::geometry::{distance, Disk, Point};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a circle.
pub type CircleId = Uuid;

/// Disk owned by a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub uuid: CircleId,
    /// Owning frame. Never changes after creation.
    pub frame_uuid: FrameId,
    pub center_x: f64,
    pub center_y: f64,
    pub diameter: f64,
}

impl Circle {
    /// Builds a circle with a fresh identifier from a validated shape.
    pub fn new(frame_uuid: FrameId, disk: Disk) -> Self {
        Self::with_id(Uuid::new_v4(), frame_uuid, disk)
    }

    pub fn with_id(uuid: CircleId, frame_uuid: FrameId, disk: Disk) -> Self {
        Self {
            uuid,
            frame_uuid,
            center_x: disk.center.x,
            center_y: disk.center.y,
            diameter: disk.diameter,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    pub fn disk(&self) -> Disk {
        Disk::new(self.center(), self.diameter)
    }

    pub fn radius(&self) -> f64 {
        self.disk().radius()
    }

    pub fn area(&self) -> f64 {
        self.disk().area()
    }

    pub fn circumference(&self) -> f64 {
        self.disk().circumference()
    }

    /// Returns whether this circle lies completely inside the disk of
    /// `search_radius` around `point`.
    pub fn within_radius(&self, point: Point, search_radius: f64) -> bool {
        distance(self.center(), point) + self.radius() <= search_radius
    }

    /// Candidate view of this circle, used as the base of an update.
    pub fn to_draft(&self) -> CircleDraft {
        CircleDraft {
            center_x: Some(self.center_x),
            center_y: Some(self.center_y),
            diameter: Some(self.diameter),
        }
    }
}

/// Proposed circle fields. `None` means the field was not supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CircleDraft {
    pub center_x: Option<f64>,
    pub center_y: Option<f64>,
    pub diameter: Option<f64>,
}

impl CircleDraft {
    pub fn new(center_x: f64, center_y: f64, diameter: f64) -> Self {
        Self {
            center_x: Some(center_x),
            center_y: Some(center_y),
            diameter: Some(diameter),
        }
    }

    /// Overlays the fields set in `patch` on top of this draft.
    pub fn merged(mut self, patch: &CirclePatch) -> Self {
        if patch.center_x.is_some() {
            self.center_x = patch.center_x;
        }
        if patch.center_y.is_some() {
            self.center_y = patch.center_y;
        }
        if patch.diameter.is_some() {
            self.diameter = patch.diameter;
        }
        self
    }
}

/// Partial circle update. The owning frame cannot be changed.
///
/// Unset fields keep their stored value; a patch cannot clear a field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CirclePatch {
    pub center_x: Option<f64>,
    pub center_y: Option<f64>,
    pub diameter: Option<f64>,
}
