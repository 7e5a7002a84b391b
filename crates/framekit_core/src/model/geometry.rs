//! Pure geometry primitives behind every spatial rule.
//!
//! # Responsibility
//! - Compute edges, radius, area and distances for frames and circles.
//! - Decide containment and overlap between shapes.
//!
//! # Invariants
//! - Circles that are exactly tangent *touch*, and touching is an overlap.
//! - Rectangles sharing an edge *touch*, and touching is an overlap.
//! - A circle flush with a frame edge is still contained.
//!
//! Inputs are assumed finite; field validation runs before any of these.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Position on the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle described by its center and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Point,
    pub width: f64,
    pub height: f64,
}

/// Edge coordinates of a [`Rect`]. `top` is the larger y value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edges {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(center: Point, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    pub fn edges(&self) -> Edges {
        let half_width = self.width / 2.0;
        let half_height = self.height / 2.0;
        Edges {
            left: self.center.x - half_width,
            right: self.center.x + half_width,
            top: self.center.y + half_height,
            bottom: self.center.y - half_height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Closed disk described by its center and diameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disk {
    pub center: Point,
    pub diameter: f64,
}

impl Disk {
    pub fn new(center: Point, diameter: f64) -> Self {
        Self { center, diameter }
    }

    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    pub fn area(&self) -> f64 {
        PI * self.radius().powi(2)
    }

    pub fn circumference(&self) -> f64 {
        PI * self.diameter
    }
}

/// Frame edge a circle can cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Bottom,
    Top,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Top => "top",
        }
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Returns `true` when two disks overlap or are externally tangent.
pub fn circles_overlap_or_touch(a: &Disk, b: &Disk) -> bool {
    distance(a.center, b.center) <= a.radius() + b.radius()
}

/// Lists the frame edges a disk crosses, in `left, right, bottom, top` order.
///
/// A disk flush with an edge does not cross it.
pub fn escaped_sides(disk: &Disk, frame: &Rect) -> Vec<Side> {
    let edges = frame.edges();
    let radius = disk.radius();
    let mut sides = Vec::new();

    if disk.center.x - radius < edges.left {
        sides.push(Side::Left);
    }
    if disk.center.x + radius > edges.right {
        sides.push(Side::Right);
    }
    if disk.center.y - radius < edges.bottom {
        sides.push(Side::Bottom);
    }
    if disk.center.y + radius > edges.top {
        sides.push(Side::Top);
    }

    sides
}

/// Returns `true` when the disk lies entirely inside the frame, boundary included.
pub fn circle_fits_in_frame(disk: &Disk, frame: &Rect) -> bool {
    escaped_sides(disk, frame).is_empty()
}

/// Returns `true` when two rectangles intersect or share any edge point.
pub fn frames_overlap_or_touch(a: &Rect, b: &Rect) -> bool {
    let a = a.edges();
    let b = b.edges();
    !(a.right < b.left || a.left > b.right || a.top < b.bottom || a.bottom > b.top)
}
