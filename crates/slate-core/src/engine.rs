//! The whiteboard engine: command reducer, history layering, render contract.

use crate::board::BoardDocument;
use crate::camera::Camera;
use crate::command::{Command, ObjectPatch, ViewportPatch};
use crate::history::History;
use crate::object::{BoardObject, IdGen, ObjectId, ObjectKind, MIN_FONT_SIZE};
use crate::tools::ToolKind;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// World-space offset applied to duplicated objects.
const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// Read-only snapshot handed to the renderer.
///
/// Enough to draw all objects in z-order, highlight the selection, place its
/// resize handles, and mount an inline edit surface when `editing_text` is
/// set.
#[derive(Debug, Clone, Copy)]
pub struct RenderSnapshot<'a> {
    /// Objects in z-order (back to front).
    pub objects: &'a [BoardObject],
    pub selected: Option<ObjectId>,
    pub editing_text: Option<ObjectId>,
    pub camera: &'a Camera,
}

/// One whiteboard instance: document, history, viewport, and active tool.
///
/// [`Engine::dispatch`] is the single point of mutation; one dispatch is one
/// atomic state transition. Commands referencing a missing object id leave
/// the state unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engine {
    document: BoardDocument,
    history: History,
    camera: Camera,
    tool: ToolKind,
    id_gen: IdGen,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine with an empty board.
    pub fn new() -> Self {
        Self {
            document: BoardDocument::new(),
            history: History::new(),
            camera: Camera::new(),
            tool: ToolKind::default(),
            id_gen: IdGen::new(),
        }
    }

    pub fn document(&self) -> &BoardDocument {
        &self.document
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The outbound render contract.
    pub fn render_snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot {
            objects: self.document.objects(),
            selected: self.document.selected,
            editing_text: self.document.editing_text,
            camera: &self.camera,
        }
    }

    /// Apply a command, producing the next state.
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::CreateObject {
                kind,
                position,
                width,
                height,
                text,
                color,
            } => self.create_object(kind, position, width, height, text, color),
            Command::UpdateObject { id, patch } => self.update_object(id, patch),
            Command::DeleteObject { id } => self.delete_object(id),
            Command::MoveObject { id, position } => {
                if let Some(object) = self.document.get_mut(id) {
                    object.position = position;
                }
            }
            Command::ResizeObject { id, bounds } => self.resize_object(id, bounds),
            Command::SelectObject { id } => {
                if self.document.contains(id) {
                    self.document.selected = Some(id);
                }
            }
            Command::DeselectAll => self.document.selected = None,
            Command::SetTool { tool } => {
                self.tool = tool;
                self.document.selected = None;
            }
            Command::SetViewport { patch } => self.set_viewport(patch),
            Command::Undo => {
                let current = self.document.objects().to_vec();
                if let Some(snapshot) = self.history.undo(current) {
                    log::debug!("undo: restoring {} objects", snapshot.len());
                    self.document.restore(snapshot);
                }
            }
            Command::Redo => {
                let current = self.document.objects().to_vec();
                if let Some(snapshot) = self.history.redo(current) {
                    log::debug!("redo: restoring {} objects", snapshot.len());
                    self.document.restore(snapshot);
                }
            }
            Command::StartEditText { id } => {
                if self
                    .document
                    .get(id)
                    .is_some_and(|object| object.kind.supports_text_edit())
                {
                    self.document.selected = Some(id);
                    self.document.editing_text = Some(id);
                }
            }
            Command::StopEditText => self.document.editing_text = None,
            Command::DuplicateObject { id } => self.duplicate_object(id),
            Command::BringToFront { id } => {
                if self.document.contains(id) {
                    self.record();
                    self.document.bring_to_front(id);
                }
            }
            Command::SendToBack { id } => {
                if self.document.contains(id) {
                    self.record();
                    self.document.send_to_back(id);
                }
            }
        }
    }

    /// Snapshot the pre-mutation object sequence for undo.
    fn record(&mut self) {
        self.history.record(self.document.objects().to_vec());
    }

    fn create_object(
        &mut self,
        kind: ObjectKind,
        position: Point,
        width: Option<f64>,
        height: Option<f64>,
        text: Option<String>,
        color: Option<crate::object::Color>,
    ) {
        self.record();

        let mut object = BoardObject::new(self.id_gen.next_id(), kind, position);
        let min = kind.min_size();
        if let Some(w) = width {
            object.width = w.max(min.width);
        }
        if let Some(h) = height {
            object.height = h.max(min.height);
        }
        if let Some(text) = text {
            object.text = text;
        }
        if let Some(color) = color {
            object.color = color;
        }

        log::debug!("create {:?} {} at {:?}", kind, object.id, position);
        self.document.push(object);

        // One-shot creation tools revert to select after placing one object.
        self.tool = ToolKind::Select;
    }

    fn update_object(&mut self, id: ObjectId, patch: ObjectPatch) {
        if !self.document.contains(id) {
            return;
        }
        self.record();

        let Some(object) = self.document.get_mut(id) else {
            return;
        };
        if let Some(x) = patch.x {
            object.position.x = x;
        }
        if let Some(y) = patch.y {
            object.position.y = y;
        }
        let min = object.kind.min_size();
        if let Some(w) = patch.width {
            object.width = w.max(min.width);
        }
        if let Some(h) = patch.height {
            object.height = h.max(min.height);
        }
        if let Some(color) = patch.color {
            object.color = color;
        }
        if let Some(text) = patch.text {
            object.text = text;
        }
        if let Some(font_size) = patch.font_size {
            object.font_size = font_size.max(MIN_FONT_SIZE);
        }
    }

    fn delete_object(&mut self, id: ObjectId) {
        if !self.document.contains(id) {
            return;
        }
        self.record();
        log::debug!("delete {id}");
        self.document.remove(id);
    }

    fn resize_object(&mut self, id: ObjectId, bounds: Rect) {
        let Some(object) = self.document.get_mut(id) else {
            return;
        };

        let min = object.kind.min_size();
        let new_width = bounds.width().max(min.width);
        let new_height = bounds.height().max(min.height);

        // Text rescales its font by the mean of the requested ratios. The
        // requested (pre-clamp) dimensions drive the scale so that shrinking
        // past the size minimum still pushes the font toward its floor.
        if object.kind == ObjectKind::Text {
            let ratio_w = bounds.width() / object.width;
            let ratio_h = bounds.height() / object.height;
            let scale = (ratio_w + ratio_h) / 2.0;
            object.font_size = (object.font_size * scale).max(MIN_FONT_SIZE);
        }

        object.position = bounds.origin();
        object.width = new_width;
        object.height = new_height;
    }

    fn duplicate_object(&mut self, id: ObjectId) {
        let Some(original) = self.document.get(id).cloned() else {
            return;
        };
        self.record();

        let mut clone = original;
        clone.id = self.id_gen.next_id();
        clone.position += DUPLICATE_OFFSET;
        let clone_id = clone.id;
        self.document.push(clone);
        self.document.selected = Some(clone_id);
    }

    fn set_viewport(&mut self, patch: ViewportPatch) {
        if let Some(pan_x) = patch.pan_x {
            self.camera.offset.x = pan_x;
        }
        if let Some(pan_y) = patch.pan_y {
            self.camera.offset.y = pan_y;
        }
        if let Some(zoom) = patch.zoom {
            self.camera.set_zoom(zoom);
        }
    }
}
