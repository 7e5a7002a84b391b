//! Frame domain model.
//!
//! # Responsibility
//! - Define the persisted frame record and its derived geometry.
//! - Define candidate field sets used by create and update paths.
//!
//! # Invariants
//! - A persisted `Frame` always has finite centers and positive size.
//! - `FrameDraft` may hold missing or non-finite values; only the frame
//!   validator turns it into a trusted shape.

use crate::model::geometry::{Edges, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a frame.
pub type FrameId = Uuid;

/// Axis-aligned rectangle that owns circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub uuid: FrameId,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    /// Builds a frame with a fresh identifier from a validated shape.
    pub fn new(rect: Rect) -> Self {
        Self::with_id(Uuid::new_v4(), rect)
    }

    pub fn with_id(uuid: FrameId, rect: Rect) -> Self {
        Self {
            uuid,
            center_x: rect.center.x,
            center_y: rect.center.y,
            width: rect.width,
            height: rect.height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.center(), self.width, self.height)
    }

    pub fn edges(&self) -> Edges {
        self.rect().edges()
    }

    pub fn left_edge(&self) -> f64 {
        self.edges().left
    }

    pub fn right_edge(&self) -> f64 {
        self.edges().right
    }

    pub fn top_edge(&self) -> f64 {
        self.edges().top
    }

    pub fn bottom_edge(&self) -> f64 {
        self.edges().bottom
    }

    pub fn area(&self) -> f64 {
        self.rect().area()
    }

    /// Candidate view of this frame, used as the base of an update.
    pub fn to_draft(&self) -> FrameDraft {
        FrameDraft {
            center_x: Some(self.center_x),
            center_y: Some(self.center_y),
            width: Some(self.width),
            height: Some(self.height),
        }
    }
}

/// Proposed frame fields. `None` means the field was not supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameDraft {
    pub center_x: Option<f64>,
    pub center_y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl FrameDraft {
    pub fn new(center_x: f64, center_y: f64, width: f64, height: f64) -> Self {
        Self {
            center_x: Some(center_x),
            center_y: Some(center_y),
            width: Some(width),
            height: Some(height),
        }
    }

    /// Overlays the fields set in `patch` on top of this draft.
    pub fn merged(mut self, patch: &FramePatch) -> Self {
        if patch.center_x.is_some() {
            self.center_x = patch.center_x;
        }
        if patch.center_y.is_some() {
            self.center_y = patch.center_y;
        }
        if patch.width.is_some() {
            self.width = patch.width;
        }
        if patch.height.is_some() {
            self.height = patch.height;
        }
        self
    }
}

/// Partial frame update. Unset fields keep their stored value.
///
/// A patch cannot clear a field, so updates never produce blank errors.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FramePatch {
    pub center_x: Option<f64>,
    pub center_y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}
