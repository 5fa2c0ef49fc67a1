//! Slate Core Library
//!
//! Platform-agnostic document model, command reducer, and interaction
//! state machine for the Slate whiteboard.

pub mod board;
pub mod camera;
pub mod command;
pub mod controller;
pub mod engine;
pub mod handles;
pub mod history;
pub mod input;
pub mod object;
pub mod tools;

pub use board::BoardDocument;
pub use camera::{Camera, MAX_ZOOM, MIN_ZOOM};
pub use command::{Command, ObjectPatch, ViewportPatch};
pub use controller::{Controller, Gesture, TextEditSession};
pub use engine::{Engine, RenderSnapshot};
pub use handles::{corner_handles, Corner, Handle, HANDLE_SIZE};
pub use history::History;
pub use input::{InputState, Key, Modifiers, MouseButton};
pub use object::{BoardObject, Color, IdGen, ObjectId, ObjectKind};
pub use tools::ToolKind;
