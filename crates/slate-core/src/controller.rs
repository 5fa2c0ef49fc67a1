//! Interaction controller: turns raw pointer, wheel, touch, and key events
//! into [`Command`]s against an [`Engine`].
//!
//! One pointer gesture is active at a time. Gesture-transient state (drag
//! anchors, live resize corners) lives here and never leaks into the
//! document; drag and resize dispatch transient commands per move, so a
//! whole gesture costs a single history entry at most (creation) or none.

use crate::camera::{PINCH_ZOOM_RATE, WHEEL_ZOOM_STEP};
use crate::command::{Command, ObjectPatch, ViewportPatch};
use crate::engine::Engine;
use crate::handles::{hit_test_handles, resize_toward, Corner, HANDLE_HIT_TOLERANCE};
use crate::input::{InputState, Key, Modifiers, MouseButton};
use crate::object::ObjectId;
use crate::tools::ToolKind;
use kurbo::{Point, Vec2};

/// The pointer gesture currently in progress. Gestures are mutually
/// exclusive; starting one implicitly means no other is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    /// Translating the camera with the pointer.
    Panning { last_screen: Point },
    /// Moving an object. `offset` is the world-space vector from the
    /// object's origin to the grab point, so the object does not jump
    /// under the pointer.
    Dragging { id: ObjectId, offset: Vec2 },
    /// Resizing an object by one of its corner handles.
    Resizing { id: ObjectId, corner: Corner },
    /// Two-finger touch pan, tracked by the centroid of the touches.
    TwoFingerPan { last_centroid: Point },
}

/// An open inline text edit. The buffer accumulates keystrokes locally and
/// is written to the document only on commit, as one undoable update.
#[derive(Debug, Clone)]
pub struct TextEditSession {
    pub id: ObjectId,
    buffer: String,
}

impl TextEditSession {
    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

/// Translates input events into engine commands.
#[derive(Debug, Clone)]
pub struct Controller {
    gesture: Gesture,
    session: Option<TextEditSession>,
    input: InputState,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            gesture: Gesture::Idle,
            session: None,
            input: InputState::new(),
        }
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn edit_session(&self) -> Option<&TextEditSession> {
        self.session.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    // --- pointer ---

    pub fn on_pointer_down(
        &mut self,
        engine: &mut Engine,
        screen: Point,
        button: MouseButton,
        modifiers: Modifiers,
    ) {
        self.input.set_modifiers(modifiers);
        self.input.register_press(screen, button);

        let world = engine.camera().screen_to_world(screen);

        // A press outside the edited object commits the edit, then the
        // press proceeds normally.
        if let Some(session) = &self.session {
            let inside = engine
                .document()
                .get(session.id)
                .is_some_and(|object| object.hit_test(world));
            if inside {
                return;
            }
            self.commit_text_edit(engine);
        }

        if button == MouseButton::Middle {
            self.gesture = Gesture::Panning {
                last_screen: screen,
            };
            return;
        }
        if button != MouseButton::Left {
            return;
        }

        if self.input.is_double_click() && engine.tool() == ToolKind::Select {
            if self.try_open_text_edit(engine, world) {
                return;
            }
        }

        match engine.tool() {
            ToolKind::Hand => {
                self.gesture = Gesture::Panning {
                    last_screen: screen,
                };
            }
            ToolKind::Select => self.select_press(engine, screen, world, modifiers),
            tool => {
                if let Some(kind) = tool.creates() {
                    engine.dispatch(Command::create(kind, world));
                }
            }
        }
    }

    fn select_press(
        &mut self,
        engine: &mut Engine,
        screen: Point,
        world: Point,
        modifiers: Modifiers,
    ) {
        // Modifier-press pans even with the select tool active.
        if modifiers.any() {
            self.gesture = Gesture::Panning {
                last_screen: screen,
            };
            return;
        }

        // Handles of the selected object win over object bodies.
        if let Some(selected) = engine.document().selected {
            if let Some(object) = engine.document().get(selected) {
                let tolerance = HANDLE_HIT_TOLERANCE / engine.camera().zoom();
                if let Some(corner) = hit_test_handles(object.bounds(), world, tolerance) {
                    self.gesture = Gesture::Resizing {
                        id: selected,
                        corner,
                    };
                    return;
                }
            }
        }

        if let Some(id) = engine.document().object_at(world) {
            engine.dispatch(Command::SelectObject { id });
            let position = match engine.document().get(id) {
                Some(object) => object.position,
                None => return,
            };
            self.gesture = Gesture::Dragging {
                id,
                offset: world - position,
            };
        } else {
            engine.dispatch(Command::DeselectAll);
            self.gesture = Gesture::Idle;
        }
    }

    fn try_open_text_edit(&mut self, engine: &mut Engine, world: Point) -> bool {
        let Some(id) = engine.document().object_at(world) else {
            return false;
        };
        let Some(object) = engine.document().get(id) else {
            return false;
        };
        if !object.kind.supports_text_edit() {
            return false;
        }

        let buffer = object.text.clone();
        engine.dispatch(Command::SelectObject { id });
        engine.dispatch(Command::StartEditText { id });
        self.session = Some(TextEditSession { id, buffer });
        self.gesture = Gesture::Idle;
        true
    }

    pub fn on_pointer_move(&mut self, engine: &mut Engine, screen: Point) {
        self.input.register_move(screen);

        match self.gesture {
            Gesture::Panning { last_screen } => {
                let offset = engine.camera().offset + (screen - last_screen);
                engine.dispatch(Command::SetViewport {
                    patch: ViewportPatch {
                        pan_x: Some(offset.x),
                        pan_y: Some(offset.y),
                        zoom: None,
                    },
                });
                self.gesture = Gesture::Panning {
                    last_screen: screen,
                };
            }
            Gesture::Dragging { id, offset } => {
                let world = engine.camera().screen_to_world(screen);
                engine.dispatch(Command::MoveObject {
                    id,
                    position: world - offset,
                });
            }
            Gesture::Resizing { id, corner } => {
                let world = engine.camera().screen_to_world(screen);
                let Some(object) = engine.document().get(id) else {
                    self.gesture = Gesture::Idle;
                    return;
                };
                let bounds = resize_toward(object, corner, world);
                engine.dispatch(Command::ResizeObject { id, bounds });
            }
            Gesture::Idle | Gesture::TwoFingerPan { .. } => {}
        }
    }

    pub fn on_pointer_up(&mut self, _engine: &mut Engine, screen: Point, button: MouseButton) {
        self.input.register_release(screen, button);
        if !matches!(self.gesture, Gesture::TwoFingerPan { .. }) {
            self.gesture = Gesture::Idle;
        }
    }

    /// Cancelled pointers (capture loss, palm rejection) end the gesture the
    /// same way a release does.
    pub fn on_pointer_cancel(&mut self, engine: &mut Engine, screen: Point, button: MouseButton) {
        self.on_pointer_up(engine, screen, button);
    }

    // --- wheel ---

    /// Wheel scroll zooms around the cursor. Plain ticks step by 5%;
    /// ctrl/meta wheel is trackpad pinch, scaled continuously by the delta.
    pub fn on_wheel(
        &mut self,
        engine: &mut Engine,
        screen: Point,
        delta: Vec2,
        modifiers: Modifiers,
    ) {
        // Purely horizontal scrolls carry no zoom intent.
        if delta.y == 0.0 {
            return;
        }
        let factor = if modifiers.command() {
            1.0 - delta.y * PINCH_ZOOM_RATE
        } else if delta.y < 0.0 {
            1.0 + WHEEL_ZOOM_STEP
        } else {
            1.0 - WHEEL_ZOOM_STEP
        };
        self.zoom_by(engine, screen, factor);
    }

    fn zoom_by(&mut self, engine: &mut Engine, anchor: Point, factor: f64) {
        let mut camera = engine.camera().clone();
        camera.zoom_at(anchor, factor);
        engine.dispatch(Command::SetViewport {
            patch: ViewportPatch {
                pan_x: Some(camera.offset.x),
                pan_y: Some(camera.offset.y),
                zoom: Some(camera.zoom()),
            },
        });
    }

    /// Zoom-in button: one wheel tick around the given anchor (usually the
    /// viewport centre).
    pub fn zoom_in(&mut self, engine: &mut Engine, anchor: Point) {
        self.zoom_by(engine, anchor, 1.0 + WHEEL_ZOOM_STEP);
    }

    pub fn zoom_out(&mut self, engine: &mut Engine, anchor: Point) {
        self.zoom_by(engine, anchor, 1.0 - WHEEL_ZOOM_STEP);
    }

    /// Reset zoom to 100%, keeping the anchor point fixed.
    pub fn zoom_reset(&mut self, engine: &mut Engine, anchor: Point) {
        let mut camera = engine.camera().clone();
        camera.zoom_to(anchor, 1.0);
        engine.dispatch(Command::SetViewport {
            patch: ViewportPatch {
                pan_x: Some(camera.offset.x),
                pan_y: Some(camera.offset.y),
                zoom: Some(camera.zoom()),
            },
        });
    }

    // --- touch ---

    /// Two simultaneous touches start a pan; a single touch is left for the
    /// host to forward as a pointer event. There is no touch pinch zoom.
    pub fn on_touch_start(&mut self, touches: &[Point]) {
        if touches.len() >= 2 {
            self.gesture = Gesture::TwoFingerPan {
                last_centroid: centroid(touches),
            };
        }
    }

    pub fn on_touch_move(&mut self, engine: &mut Engine, touches: &[Point]) {
        if let Gesture::TwoFingerPan { last_centroid } = self.gesture {
            if touches.len() < 2 {
                return;
            }
            let current = centroid(touches);
            let offset = engine.camera().offset + (current - last_centroid);
            engine.dispatch(Command::SetViewport {
                patch: ViewportPatch {
                    pan_x: Some(offset.x),
                    pan_y: Some(offset.y),
                    zoom: None,
                },
            });
            self.gesture = Gesture::TwoFingerPan {
                last_centroid: current,
            };
        }
    }

    /// `touches` is the set still on the surface after fingers lifted.
    ///
    /// Lifting a finger changes the centroid without any pan intent, so the
    /// tracked centroid is re-seeded when the pan continues.
    pub fn on_touch_end(&mut self, touches: &[Point]) {
        if matches!(self.gesture, Gesture::TwoFingerPan { .. }) {
            self.gesture = if touches.len() >= 2 {
                Gesture::TwoFingerPan {
                    last_centroid: centroid(touches),
                }
            } else {
                Gesture::Idle
            };
        }
    }

    // --- text editing ---

    /// Replace the pending edit buffer. The host calls this as the user
    /// types into the inline editor.
    pub fn set_pending_text(&mut self, text: impl Into<String>) {
        if let Some(session) = &mut self.session {
            session.buffer = text.into();
        }
    }

    /// Commit the edit buffer to the document as a single undoable update.
    /// An unchanged buffer only closes the session; it must not spend a
    /// history entry or clear the redo stack.
    pub fn commit_text_edit(&mut self, engine: &mut Engine) {
        if let Some(session) = self.session.take() {
            let unchanged = engine
                .document()
                .get(session.id)
                .is_some_and(|object| object.text == session.buffer);
            if !unchanged {
                engine.dispatch(Command::UpdateObject {
                    id: session.id,
                    patch: ObjectPatch::text(session.buffer),
                });
            }
            engine.dispatch(Command::StopEditText);
        }
    }

    /// Abandon the edit, leaving the object's text untouched.
    pub fn cancel_text_edit(&mut self, engine: &mut Engine) {
        if self.session.take().is_some() {
            engine.dispatch(Command::StopEditText);
        }
    }

    // --- keyboard ---

    pub fn on_key(&mut self, engine: &mut Engine, key: Key, modifiers: Modifiers) {
        self.input.set_modifiers(modifiers);

        // While editing, keys belong to the editor except for commit and
        // cancel. Shift+Enter stays in the buffer as a newline.
        if self.is_editing() {
            match key {
                Key::Escape => self.cancel_text_edit(engine),
                Key::Enter if !modifiers.shift => self.commit_text_edit(engine),
                _ => {}
            }
            return;
        }

        match key {
            Key::Char(c) if modifiers.command() => match c.to_ascii_lowercase() {
                'z' if modifiers.shift => engine.dispatch(Command::Redo),
                'z' => engine.dispatch(Command::Undo),
                'y' => engine.dispatch(Command::Redo),
                'd' => {
                    if let Some(id) = engine.document().selected {
                        engine.dispatch(Command::DuplicateObject { id });
                    }
                }
                _ => {}
            },
            Key::Delete | Key::Backspace => {
                if let Some(id) = engine.document().selected {
                    engine.dispatch(Command::DeleteObject { id });
                }
            }
            _ => {}
        }
    }
}

fn centroid(touches: &[Point]) -> Point {
    let sum = touches
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    (sum / touches.len() as f64).to_point()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectKind;

    fn sticky_at(engine: &mut Engine, x: f64, y: f64) -> ObjectId {
        engine.dispatch(Command::create(ObjectKind::Sticky, Point::new(x, y)));
        engine.document().objects().last().unwrap().id
    }

    fn press(controller: &mut Controller, engine: &mut Engine, x: f64, y: f64) {
        controller.on_pointer_down(
            engine,
            Point::new(x, y),
            MouseButton::Left,
            Modifiers::default(),
        );
    }

    fn release(controller: &mut Controller, engine: &mut Engine, x: f64, y: f64) {
        controller.on_pointer_up(engine, Point::new(x, y), MouseButton::Left);
    }

    #[test]
    fn drag_moves_object_without_history() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        let id = sticky_at(&mut engine, 0.0, 0.0);

        // Grab the sticky in its middle and drag 50px right and down.
        press(&mut controller, &mut engine, 100.0, 100.0);
        assert!(matches!(controller.gesture(), Gesture::Dragging { .. }));
        controller.on_pointer_move(&mut engine, Point::new(150.0, 150.0));
        release(&mut controller, &mut engine, 150.0, 150.0);

        let obj = engine.document().get(id).unwrap();
        assert!((obj.position.x - 50.0).abs() < f64::EPSILON);
        assert!((obj.position.y - 50.0).abs() < f64::EPSILON);

        // The drag itself is not undoable; one undo removes the creation.
        engine.dispatch(Command::Undo);
        assert!(engine.document().is_empty());
    }

    #[test]
    fn drag_keeps_grab_offset() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        let id = sticky_at(&mut engine, 0.0, 0.0);

        // Grab near the top-left corner, not the centre.
        press(&mut controller, &mut engine, 10.0, 5.0);
        controller.on_pointer_move(&mut engine, Point::new(110.0, 105.0));

        let obj = engine.document().get(id).unwrap();
        assert!((obj.position.x - 100.0).abs() < f64::EPSILON);
        assert!((obj.position.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn click_empty_space_deselects() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        let id = sticky_at(&mut engine, 0.0, 0.0);
        engine.dispatch(Command::SelectObject { id });

        press(&mut controller, &mut engine, 500.0, 500.0);
        assert_eq!(engine.document().selected, None);
        assert_eq!(controller.gesture(), Gesture::Idle);
    }

    #[test]
    fn topmost_object_is_picked() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        let _under = sticky_at(&mut engine, 0.0, 0.0);
        let over = sticky_at(&mut engine, 50.0, 50.0);

        press(&mut controller, &mut engine, 100.0, 100.0);
        assert_eq!(engine.document().selected, Some(over));
    }

    #[test]
    fn hand_tool_pans_camera() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        engine.dispatch(Command::SetTool {
            tool: ToolKind::Hand,
        });

        press(&mut controller, &mut engine, 100.0, 100.0);
        controller.on_pointer_move(&mut engine, Point::new(130.0, 80.0));
        release(&mut controller, &mut engine, 130.0, 80.0);

        assert!((engine.camera().offset.x - 30.0).abs() < f64::EPSILON);
        assert!((engine.camera().offset.y + 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn creation_tool_places_one_object() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        engine.dispatch(Command::SetTool {
            tool: ToolKind::Rectangle,
        });

        press(&mut controller, &mut engine, 40.0, 60.0);
        assert_eq!(engine.document().len(), 1);
        assert_eq!(engine.tool(), ToolKind::Select);

        let obj = &engine.document().objects()[0];
        assert_eq!(obj.kind, ObjectKind::Rectangle);
        assert!((obj.position.x - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn creation_uses_world_coordinates() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        engine.dispatch(Command::SetViewport {
            patch: ViewportPatch {
                pan_x: Some(100.0),
                pan_y: Some(0.0),
                zoom: Some(2.0),
            },
        });
        engine.dispatch(Command::SetTool {
            tool: ToolKind::Sticky,
        });

        press(&mut controller, &mut engine, 300.0, 200.0);
        let obj = &engine.document().objects()[0];
        assert!((obj.position.x - 100.0).abs() < f64::EPSILON);
        assert!((obj.position.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn corner_handle_starts_resize() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        let id = sticky_at(&mut engine, 0.0, 0.0);
        engine.dispatch(Command::SelectObject { id });

        // Press on the south-east corner of the 200x200 sticky.
        press(&mut controller, &mut engine, 200.0, 200.0);
        assert!(matches!(
            controller.gesture(),
            Gesture::Resizing {
                corner: Corner::SouthEast,
                ..
            }
        ));

        controller.on_pointer_move(&mut engine, Point::new(300.0, 260.0));
        let obj = engine.document().get(id).unwrap();
        assert!((obj.width - 300.0).abs() < f64::EPSILON);
        assert!((obj.height - 260.0).abs() < f64::EPSILON);
    }

    #[test]
    fn handle_tolerance_scales_with_zoom() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        let id = sticky_at(&mut engine, 0.0, 0.0);
        engine.dispatch(Command::SelectObject { id });
        engine.dispatch(Command::SetViewport {
            patch: ViewportPatch {
                pan_x: None,
                pan_y: None,
                zoom: Some(2.0),
            },
        });

        // 8 screen px from the corner: within the 10px screen tolerance,
        // which at 2x zoom is 5 world units.
        press(&mut controller, &mut engine, 408.0, 400.0);
        assert!(matches!(controller.gesture(), Gesture::Resizing { .. }));
    }

    #[test]
    fn pointer_cancel_ends_gesture() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        sticky_at(&mut engine, 0.0, 0.0);

        press(&mut controller, &mut engine, 100.0, 100.0);
        assert!(matches!(controller.gesture(), Gesture::Dragging { .. }));
        controller.on_pointer_cancel(&mut engine, Point::new(100.0, 100.0), MouseButton::Left);
        assert_eq!(controller.gesture(), Gesture::Idle);
    }

    #[test]
    fn wheel_tick_zooms_five_percent() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();

        controller.on_wheel(
            &mut engine,
            Point::ZERO,
            Vec2::new(0.0, -1.0),
            Modifiers::default(),
        );
        assert!((engine.camera().zoom() - 1.05).abs() < 1e-12);

        controller.on_wheel(
            &mut engine,
            Point::ZERO,
            Vec2::new(0.0, 1.0),
            Modifiers::default(),
        );
        assert!((engine.camera().zoom() - 0.9975).abs() < 1e-12);
    }

    #[test]
    fn pinch_wheel_scales_with_delta() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        let modifiers = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };

        controller.on_wheel(&mut engine, Point::ZERO, Vec2::new(0.0, -50.0), modifiers);
        assert!((engine.camera().zoom() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn wheel_zoom_keeps_cursor_anchored() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        let anchor = Point::new(320.0, 240.0);
        let before = engine.camera().screen_to_world(anchor);

        controller.on_wheel(&mut engine, anchor, Vec2::new(0.0, -1.0), Modifiers::default());
        let after = engine.camera().screen_to_world(anchor);

        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn zoom_reset_returns_to_full() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        let anchor = Point::new(400.0, 300.0);
        controller.zoom_in(&mut engine, anchor);
        controller.zoom_in(&mut engine, anchor);
        controller.zoom_reset(&mut engine, anchor);
        assert!((engine.camera().zoom() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn two_finger_touch_pans() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();

        controller.on_touch_start(&[Point::new(100.0, 100.0), Point::new(200.0, 100.0)]);
        assert!(matches!(controller.gesture(), Gesture::TwoFingerPan { .. }));

        controller.on_touch_move(
            &mut engine,
            &[Point::new(120.0, 130.0), Point::new(220.0, 130.0)],
        );
        assert!((engine.camera().offset.x - 20.0).abs() < f64::EPSILON);
        assert!((engine.camera().offset.y - 30.0).abs() < f64::EPSILON);
        // Zoom is untouched even if the fingers spread.
        assert!((engine.camera().zoom() - 1.0).abs() < f64::EPSILON);

        controller.on_touch_end(&[Point::new(120.0, 130.0)]);
        assert_eq!(controller.gesture(), Gesture::Idle);
    }

    #[test]
    fn single_touch_does_not_pan() {
        let mut controller = Controller::new();
        controller.on_touch_start(&[Point::new(100.0, 100.0)]);
        assert_eq!(controller.gesture(), Gesture::Idle);
    }

    #[test]
    fn double_click_opens_text_edit() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        let id = sticky_at(&mut engine, 0.0, 0.0);
        engine.dispatch(Command::UpdateObject {
            id,
            patch: ObjectPatch::text("hello"),
        });

        press(&mut controller, &mut engine, 100.0, 100.0);
        release(&mut controller, &mut engine, 100.0, 100.0);
        press(&mut controller, &mut engine, 100.0, 100.0);

        assert_eq!(engine.document().editing_text, Some(id));
        let session = controller.edit_session().unwrap();
        assert_eq!(session.id, id);
        assert_eq!(session.buffer(), "hello");
    }

    #[test]
    fn commit_writes_text_once() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        let id = sticky_at(&mut engine, 0.0, 0.0);

        press(&mut controller, &mut engine, 100.0, 100.0);
        release(&mut controller, &mut engine, 100.0, 100.0);
        press(&mut controller, &mut engine, 100.0, 100.0);
        release(&mut controller, &mut engine, 100.0, 100.0);

        controller.set_pending_text("note");
        controller.on_key(&mut engine, Key::Enter, Modifiers::default());

        assert!(!controller.is_editing());
        assert_eq!(engine.document().editing_text, None);
        assert_eq!(engine.document().get(id).unwrap().text, "note");

        // The whole edit is one history entry.
        engine.dispatch(Command::Undo);
        assert_eq!(engine.document().get(id).unwrap().text, "");
    }

    #[test]
    fn escape_discards_pending_text() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        let id = sticky_at(&mut engine, 0.0, 0.0);

        press(&mut controller, &mut engine, 100.0, 100.0);
        release(&mut controller, &mut engine, 100.0, 100.0);
        press(&mut controller, &mut engine, 100.0, 100.0);
        release(&mut controller, &mut engine, 100.0, 100.0);

        controller.set_pending_text("discarded");
        controller.on_key(&mut engine, Key::Escape, Modifiers::default());

        assert!(!controller.is_editing());
        assert_eq!(engine.document().get(id).unwrap().text, "");
    }

    #[test]
    fn click_outside_commits_edit() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        let id = sticky_at(&mut engine, 0.0, 0.0);

        press(&mut controller, &mut engine, 100.0, 100.0);
        release(&mut controller, &mut engine, 100.0, 100.0);
        press(&mut controller, &mut engine, 100.0, 100.0);
        release(&mut controller, &mut engine, 100.0, 100.0);
        controller.set_pending_text("kept");

        press(&mut controller, &mut engine, 600.0, 600.0);
        assert!(!controller.is_editing());
        assert_eq!(engine.document().get(id).unwrap().text, "kept");
    }

    #[test]
    fn delete_key_removes_selection() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        let id = sticky_at(&mut engine, 0.0, 0.0);
        engine.dispatch(Command::SelectObject { id });

        controller.on_key(&mut engine, Key::Delete, Modifiers::default());
        assert!(engine.document().is_empty());
    }

    #[test]
    fn delete_key_ignored_while_editing() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        let id = sticky_at(&mut engine, 0.0, 0.0);

        press(&mut controller, &mut engine, 100.0, 100.0);
        release(&mut controller, &mut engine, 100.0, 100.0);
        press(&mut controller, &mut engine, 100.0, 100.0);
        release(&mut controller, &mut engine, 100.0, 100.0);
        assert!(controller.is_editing());

        controller.on_key(&mut engine, Key::Backspace, Modifiers::default());
        assert!(engine.document().contains(id));
    }

    #[test]
    fn undo_redo_shortcuts() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        sticky_at(&mut engine, 0.0, 0.0);
        let cmd = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };

        controller.on_key(&mut engine, Key::Char('z'), cmd);
        assert!(engine.document().is_empty());

        controller.on_key(
            &mut engine,
            Key::Char('z'),
            Modifiers {
                ctrl: true,
                shift: true,
                ..Modifiers::default()
            },
        );
        assert_eq!(engine.document().len(), 1);

        controller.on_key(&mut engine, Key::Char('z'), cmd);
        controller.on_key(&mut engine, Key::Char('y'), cmd);
        assert_eq!(engine.document().len(), 1);
    }

    #[test]
    fn drag_respects_zoom() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        let id = sticky_at(&mut engine, 0.0, 0.0);
        engine.dispatch(Command::SetViewport {
            patch: ViewportPatch {
                pan_x: None,
                pan_y: None,
                zoom: Some(2.0),
            },
        });

        // 100 screen px of motion is 50 world units at 2x.
        press(&mut controller, &mut engine, 200.0, 200.0);
        controller.on_pointer_move(&mut engine, Point::new(300.0, 200.0));

        let obj = engine.document().get(id).unwrap();
        assert!((obj.position.x - 50.0).abs() < f64::EPSILON);
        assert!((obj.position.y - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn horizontal_wheel_does_not_zoom() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();

        controller.on_wheel(
            &mut engine,
            Point::ZERO,
            Vec2::new(10.0, 0.0),
            Modifiers::default(),
        );
        assert!((engine.camera().zoom() - 1.0).abs() < f64::EPSILON);
        assert!((engine.camera().offset.x - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn middle_button_pans() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        sticky_at(&mut engine, 0.0, 0.0);

        // Middle-button drag pans even over an object, without selecting it.
        controller.on_pointer_down(
            &mut engine,
            Point::new(100.0, 100.0),
            MouseButton::Middle,
            Modifiers::default(),
        );
        assert!(matches!(controller.gesture(), Gesture::Panning { .. }));
        controller.on_pointer_move(&mut engine, Point::new(140.0, 100.0));

        assert!((engine.camera().offset.x - 40.0).abs() < f64::EPSILON);
        assert_eq!(engine.document().selected, None);
    }

    #[test]
    fn duplicate_shortcut() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        let id = sticky_at(&mut engine, 0.0, 0.0);
        engine.dispatch(Command::SelectObject { id });

        controller.on_key(
            &mut engine,
            Key::Char('d'),
            Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
        );
        assert_eq!(engine.document().len(), 2);
        assert_ne!(engine.document().selected, Some(id));
    }

    #[test]
    fn lifting_to_two_fingers_does_not_jump() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        let kept = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];

        controller.on_touch_start(&[kept[0], kept[1], Point::new(200.0, 300.0)]);
        assert!(matches!(controller.gesture(), Gesture::TwoFingerPan { .. }));

        // Third finger lifts; the two that stay have not moved, so the next
        // move frame must not pan.
        controller.on_touch_end(&kept);
        controller.on_touch_move(&mut engine, &kept);

        assert!((engine.camera().offset.x - 0.0).abs() < f64::EPSILON);
        assert!((engine.camera().offset.y - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unchanged_commit_preserves_history() {
        let mut engine = Engine::new();
        let mut controller = Controller::new();
        sticky_at(&mut engine, 0.0, 0.0);
        sticky_at(&mut engine, 300.0, 300.0);
        engine.dispatch(Command::Undo);
        assert!(engine.can_redo());

        // Open and blur-commit an edit without typing anything.
        press(&mut controller, &mut engine, 100.0, 100.0);
        release(&mut controller, &mut engine, 100.0, 100.0);
        press(&mut controller, &mut engine, 100.0, 100.0);
        release(&mut controller, &mut engine, 100.0, 100.0);
        assert!(controller.is_editing());
        controller.commit_text_edit(&mut engine);

        assert!(!controller.is_editing());
        assert_eq!(engine.document().editing_text, None);
        assert!(engine.can_redo());
    }
}
