//! Board document: the ordered object list and selection pointers.

use crate::object::{BoardObject, ObjectId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The canonical document state of one whiteboard.
///
/// The order of `objects` encodes z-index: later entries draw on top.
/// `selected` and `editing_text` are pointers into the sequence; they always
/// reference an existing object or are `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardDocument {
    /// Unique board identifier.
    pub id: String,
    /// Board name.
    pub name: String,
    objects: Vec<BoardObject>,
    /// At most one object is selected at a time.
    pub selected: Option<ObjectId>,
    /// Object currently in inline text-edit mode, if any.
    pub editing_text: Option<ObjectId>,
}

impl Default for BoardDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardDocument {
    /// Create a new empty board.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            objects: Vec::new(),
            selected: None,
            editing_text: None,
        }
    }

    /// Objects in z-order (back to front).
    pub fn objects(&self) -> &[BoardObject] {
        &self.objects
    }

    /// Replace the whole object sequence (undo/redo restore path).
    ///
    /// Selection pointers referencing objects missing from the new sequence
    /// are cleared.
    pub fn restore(&mut self, objects: Vec<BoardObject>) {
        self.objects = objects;
        if self.selected.is_some_and(|id| !self.contains(id)) {
            self.selected = None;
        }
        if self.editing_text.is_some_and(|id| !self.contains(id)) {
            self.editing_text = None;
        }
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.iter().any(|o| o.id == id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&BoardObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut BoardObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Append an object on top of the stack.
    pub fn push(&mut self, object: BoardObject) {
        self.objects.push(object);
    }

    /// Remove an object, clearing any selection pointers that referenced it.
    pub fn remove(&mut self, id: ObjectId) -> Option<BoardObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        let removed = self.objects.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.editing_text == Some(id) {
            self.editing_text = None;
        }
        Some(removed)
    }

    /// Topmost object under a world point, iterating front to back.
    pub fn object_at(&self, point: Point) -> Option<ObjectId> {
        self.objects
            .iter()
            .rev()
            .find(|o| o.hit_test(point))
            .map(|o| o.id)
    }

    /// Move an object to the end of the sequence (topmost).
    pub fn bring_to_front(&mut self, id: ObjectId) {
        if let Some(index) = self.objects.iter().position(|o| o.id == id) {
            let object = self.objects.remove(index);
            self.objects.push(object);
        }
    }

    /// Move an object to the start of the sequence (bottommost).
    pub fn send_to_back(&mut self, id: ObjectId) {
        if let Some(index) = self.objects.iter().position(|o| o.id == id) {
            let object = self.objects.remove(index);
            self.objects.insert(0, object);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{IdGen, ObjectKind};

    fn board_with_two() -> (BoardDocument, ObjectId, ObjectId) {
        let mut ids = IdGen::new();
        let mut doc = BoardDocument::new();
        let a = ids.next_id();
        let b = ids.next_id();
        doc.push(BoardObject::new(a, ObjectKind::Rectangle, Point::ZERO));
        doc.push(BoardObject::new(b, ObjectKind::Rectangle, Point::ZERO));
        (doc, a, b)
    }

    #[test]
    fn topmost_object_wins_hit_test() {
        let (doc, a, b) = board_with_two();
        // Both cover the point; the later (topmost) one must win.
        assert_eq!(doc.object_at(Point::new(10.0, 10.0)), Some(b));

        let mut doc = doc;
        doc.bring_to_front(a);
        assert_eq!(doc.object_at(Point::new(10.0, 10.0)), Some(a));
    }

    #[test]
    fn miss_returns_none() {
        let (doc, _, _) = board_with_two();
        assert_eq!(doc.object_at(Point::new(-500.0, -500.0)), None);
    }

    #[test]
    fn reorder_preserves_fields() {
        let (mut doc, a, b) = board_with_two();
        let before = doc.get(a).cloned().unwrap();
        doc.send_to_back(b);
        assert_eq!(doc.objects()[0].id, b);
        assert_eq!(doc.get(a), Some(&before));
    }

    #[test]
    fn remove_clears_pointers() {
        let (mut doc, a, _) = board_with_two();
        doc.selected = Some(a);
        doc.editing_text = Some(a);
        doc.remove(a);
        assert_eq!(doc.selected, None);
        assert_eq!(doc.editing_text, None);
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn restore_clears_dangling_pointers() {
        let (mut doc, a, _) = board_with_two();
        doc.selected = Some(a);
        doc.restore(Vec::new());
        assert!(doc.is_empty());
        assert_eq!(doc.selected, None);
    }
}
