//! Tool modes for the whiteboard.

use crate::object::ObjectKind;
use serde::{Deserialize, Serialize};

/// Available tools. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Sticky,
    Rectangle,
    Text,
    Hand,
}

impl ToolKind {
    /// The object kind this tool places, for the one-shot creation tools.
    pub fn creates(self) -> Option<ObjectKind> {
        match self {
            ToolKind::Sticky => Some(ObjectKind::Sticky),
            ToolKind::Rectangle => Some(ObjectKind::Rectangle),
            ToolKind::Text => Some(ObjectKind::Text),
            ToolKind::Select | ToolKind::Hand => None,
        }
    }
}
