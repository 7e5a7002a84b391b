//! Structured validation outcome shared by the frame and circle validators.
//!
//! # Invariants
//! - Errors keep the order in which checks discovered them.
//! - An empty `ValidationErrors` never leaves a validator as `Err`.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MSG_BLANK: &str = "can't be blank";
pub const MSG_NOT_A_NUMBER: &str = "is not a number";
pub const MSG_NOT_POSITIVE: &str = "must be greater than 0";
pub const MSG_FRAME_OVERLAP: &str = "Frame cannot touch or intersect with another frame";
pub const MSG_CIRCLE_OVERLAP: &str = "Circle cannot touch another circle within the same frame";
pub const MSG_FRAME_STRANDS_CIRCLE: &str = "Frame must keep all of its circles inside its edges";

/// Scope an error is attached to.
///
/// `Base` covers the whole entity; overlap errors use it because they
/// implicate two entities and no single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorField {
    CenterX,
    CenterY,
    Width,
    Height,
    Diameter,
    Base,
}

impl ErrorField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CenterX => "center_x",
            Self::CenterY => "center_y",
            Self::Width => "width",
            Self::Height => "height",
            Self::Diameter => "diameter",
            Self::Base => "base",
        }
    }

    fn label(self) -> Option<&'static str> {
        match self {
            Self::CenterX => Some("Center x"),
            Self::CenterY => Some("Center y"),
            Self::Width => Some("Width"),
            Self::Height => Some("Height"),
            Self::Diameter => Some("Diameter"),
            Self::Base => None,
        }
    }
}

/// One field-scoped (or base-scoped) validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: ErrorField,
    pub message: String,
}

impl FieldError {
    /// Renders the user-facing sentence, e.g. `Center x can't be blank`.
    pub fn full_message(&self) -> String {
        match self.field.label() {
            Some(label) => format!("{label} {}", self.message),
            None => self.message.clone(),
        }
    }
}

/// Ordered, aggregated list of validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: ErrorField, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Messages attached to one field, in discovery order.
    pub fn on(&self, field: ErrorField) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|error| error.field == field)
            .map(|error| error.message.as_str())
            .collect()
    }

    pub fn full_messages(&self) -> Vec<String> {
        self.errors.iter().map(FieldError::full_message).collect()
    }

    /// Returns `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_messages().join("; "))
    }
}

impl Error for ValidationErrors {}
