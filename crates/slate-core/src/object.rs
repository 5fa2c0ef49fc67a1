//! Drawable objects for the whiteboard.

use kurbo::{Point, Rect, Size};
use peniko::Color as RenderColor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Font sizes derived from a resize never go below this.
pub const MIN_FONT_SIZE: f64 = 8.0;

/// Unique identifier for board objects.
///
/// Ids are handed out by [`IdGen`] in strictly increasing order and are never
/// reused for the lifetime of a board, even after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obj-{}", self.0)
    }
}

/// Monotonic id generator owned by the engine.
///
/// Each engine instance carries its own generator, so multiple boards on one
/// page never share counter state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdGen {
    next: u64,
}

impl IdGen {
    /// Create a generator starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next id.
    pub fn next_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next);
        self.next += 1;
        id
    }
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    /// Parse a hex color string (`#rgb`, `#rrggbb`, or `#rrggbbaa`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?.trim();
        // Length match below is in bytes; multibyte input must not reach
        // the slicing.
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Self::new(r, g, b, 255))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b, 255))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Format as `#rrggbb` (alpha omitted when opaque).
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for RenderColor {
    fn from(color: Color) -> Self {
        RenderColor::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

impl From<RenderColor> for Color {
    fn from(color: RenderColor) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

/// The three object kinds the board supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Sticky,
    Rectangle,
    Text,
}

impl ObjectKind {
    /// Minimum size enforced at every resize.
    pub fn min_size(self) -> Size {
        match self {
            ObjectKind::Sticky => Size::new(100.0, 100.0),
            ObjectKind::Rectangle => Size::new(50.0, 30.0),
            ObjectKind::Text => Size::new(50.0, 20.0),
        }
    }

    /// Size a freshly created object gets.
    pub fn default_size(self) -> Size {
        match self {
            ObjectKind::Sticky => Size::new(200.0, 200.0),
            ObjectKind::Rectangle => Size::new(160.0, 100.0),
            ObjectKind::Text => Size::new(160.0, 24.0),
        }
    }

    /// Fill color for stickies, stroke color for rectangles, text color for text.
    pub fn default_color(self) -> Color {
        let hex = match self {
            ObjectKind::Sticky => "#d4edda",
            ObjectKind::Rectangle => "#4a90d9",
            ObjectKind::Text => "#1f2933",
        };
        Color::from_hex(hex).unwrap_or(Color::black())
    }

    /// Font size for kinds that render text; rectangles carry no text.
    pub fn default_font_size(self) -> f64 {
        match self {
            ObjectKind::Sticky => 14.0,
            ObjectKind::Rectangle => 0.0,
            ObjectKind::Text => 16.0,
        }
    }

    /// Only stickies and text objects support inline text editing.
    pub fn supports_text_edit(self) -> bool {
        matches!(self, ObjectKind::Sticky | ObjectKind::Text)
    }
}

/// A drawable object on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    /// Top-left anchor in world coordinates.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub color: Color,
    /// Text content; empty for rectangles.
    pub text: String,
    /// Font size in world units; meaningful for sticky and text kinds.
    pub font_size: f64,
}

impl BoardObject {
    /// Create an object with the kind's default size, color, and font size.
    pub fn new(id: ObjectId, kind: ObjectKind, position: Point) -> Self {
        let size = kind.default_size();
        Self {
            id,
            kind,
            position,
            width: size.width,
            height: size.height,
            color: kind.default_color(),
            text: String::new(),
            font_size: kind.default_font_size(),
        }
    }

    /// Bounding box in world coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Check if a world point lands inside the bounding box.
    pub fn hit_test(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }
}
