//! Command set applied by the engine's reducer.

use crate::object::{Color, ObjectId, ObjectKind};
use crate::tools::ToolKind;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Partial update for an object; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub color: Option<Color>,
    pub text: Option<String>,
    pub font_size: Option<f64>,
}

impl ObjectPatch {
    /// Patch that only replaces the text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Patch that only replaces the color.
    pub fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }
}

/// Partial update for the viewport; `None` fields are left untouched.
/// Zoom values clamp to the camera's allowed range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportPatch {
    pub pan_x: Option<f64>,
    pub pan_y: Option<f64>,
    pub zoom: Option<f64>,
}

/// All state transitions the engine supports.
///
/// Every command is plain data; the reducer in [`crate::engine`] is the single
/// point of mutation. Commands referencing an id absent from the document are
/// silent no-ops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Append a new object with a fresh id. `None` fields fall back to the
    /// kind's defaults. Reverts the active tool to `Select` (one-shot tools).
    CreateObject {
        kind: ObjectKind,
        position: Point,
        width: Option<f64>,
        height: Option<f64>,
        text: Option<String>,
        color: Option<Color>,
    },
    /// Merge fields into the matching object.
    UpdateObject { id: ObjectId, patch: ObjectPatch },
    /// Remove an object, clearing selection/editing pointers to it.
    DeleteObject { id: ObjectId },
    /// Set position only. Not recorded in history (live drag).
    MoveObject { id: ObjectId, position: Point },
    /// Set bounds, clamped to the kind minimum. Not recorded in history
    /// (live resize). Text objects rescale their font size.
    ResizeObject { id: ObjectId, bounds: Rect },
    SelectObject { id: ObjectId },
    DeselectAll,
    /// Switch tools; clears the current selection.
    SetTool { tool: ToolKind },
    SetViewport { patch: ViewportPatch },
    Undo,
    Redo,
    /// Enter inline text-edit mode (sticky/text kinds only); selects the object.
    StartEditText { id: ObjectId },
    StopEditText,
    /// Clone an object with a fresh id, offset by (+20, +20), appended on top.
    DuplicateObject { id: ObjectId },
    BringToFront { id: ObjectId },
    SendToBack { id: ObjectId },
}

impl Command {
    /// Shorthand for a creation command using all kind defaults.
    pub fn create(kind: ObjectKind, position: Point) -> Self {
        Command::CreateObject {
            kind,
            position,
            width: None,
            height: None,
            text: None,
            color: None,
        }
    }
}
