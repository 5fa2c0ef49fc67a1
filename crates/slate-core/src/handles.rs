//! Resize handles and corner-pinned resize math.

use crate::object::BoardObject;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Handle size in screen pixels (render hint).
pub const HANDLE_SIZE: f64 = 8.0;
/// Handle hit tolerance in screen pixels. Divide by the camera zoom before
/// hit-testing in world coordinates.
pub const HANDLE_HIT_TOLERANCE: f64 = 10.0;

/// Corner positions of a selection's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Corner {
    /// World position of this corner on a bounding box.
    pub fn position(self, bounds: Rect) -> Point {
        match self {
            Corner::NorthWest => Point::new(bounds.x0, bounds.y0),
            Corner::NorthEast => Point::new(bounds.x1, bounds.y0),
            Corner::SouthWest => Point::new(bounds.x0, bounds.y1),
            Corner::SouthEast => Point::new(bounds.x1, bounds.y1),
        }
    }

    /// The corner that stays pinned while this one is dragged.
    pub fn opposite(self) -> Corner {
        match self {
            Corner::NorthWest => Corner::SouthEast,
            Corner::NorthEast => Corner::SouthWest,
            Corner::SouthWest => Corner::NorthEast,
            Corner::SouthEast => Corner::NorthWest,
        }
    }
}

/// A resize handle with its world position.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    pub corner: Corner,
    pub position: Point,
}

impl Handle {
    /// Check if a world point hits this handle within `tolerance`.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// The four corner handles of a bounding box.
pub fn corner_handles(bounds: Rect) -> [Handle; 4] {
    [
        Corner::NorthWest,
        Corner::NorthEast,
        Corner::SouthWest,
        Corner::SouthEast,
    ]
    .map(|corner| Handle {
        corner,
        position: corner.position(bounds),
    })
}

/// Find which corner handle (if any) is hit at the given world point.
pub fn hit_test_handles(bounds: Rect, point: Point, tolerance: f64) -> Option<Corner> {
    corner_handles(bounds)
        .into_iter()
        .find(|h| h.hit_test(point, tolerance))
        .map(|h| h.corner)
}

/// Compute the bounds an object gets when `corner` is dragged to `pointer`.
///
/// The opposite corner stays pinned. Width and height are derived from the
/// pointer-to-pin delta and clamped to the object's kind minimum, so dragging
/// past the pin never inverts the box.
pub fn resize_toward(object: &BoardObject, corner: Corner, pointer: Point) -> Rect {
    let min = object.kind.min_size();
    let pin = corner.opposite().position(object.bounds());

    let width = match corner {
        Corner::NorthEast | Corner::SouthEast => (pointer.x - pin.x).max(min.width),
        Corner::NorthWest | Corner::SouthWest => (pin.x - pointer.x).max(min.width),
    };
    let height = match corner {
        Corner::SouthWest | Corner::SouthEast => (pointer.y - pin.y).max(min.height),
        Corner::NorthWest | Corner::NorthEast => (pin.y - pointer.y).max(min.height),
    };

    // x/y move only for corners on the left/top side; the se handle leaves
    // the origin untouched.
    let x0 = match corner {
        Corner::NorthWest | Corner::SouthWest => pin.x - width,
        Corner::NorthEast | Corner::SouthEast => pin.x,
    };
    let y0 = match corner {
        Corner::NorthWest | Corner::NorthEast => pin.y - height,
        Corner::SouthWest | Corner::SouthEast => pin.y,
    };

    Rect::new(x0, y0, x0 + width, y0 + height)
}
