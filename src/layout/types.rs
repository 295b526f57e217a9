use std::collections::BTreeMap;

use serde::Serialize;

/// Axis-aligned rectangle in diagram coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Identity of a diagram-scoped marker definition. Lines reference markers
/// by kind; each kind is defined exactly once per layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MarkerKind {
    ArrowRight,
    ArrowLeft,
    /// Square drawn at the start of the first message of a sequence.
    Tail,
    Empty,
}

impl MarkerKind {
    pub fn id(self) -> &'static str {
        match self {
            MarkerKind::ArrowRight => "arrow-right",
            MarkerKind::ArrowLeft => "arrow-left",
            MarkerKind::Tail => "arrow-tail",
            MarkerKind::Empty => "empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDef {
    pub kind: MarkerKind,
    /// `None` for the empty marker.
    pub path: Option<&'static str>,
    pub ref_x: f32,
    pub ref_y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectPrimitive {
    pub rect: Rect,
    pub corner_radius: f32,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub classes: Vec<String>,
    pub marker_start: MarkerKind,
    pub marker_mid: MarkerKind,
    pub marker_end: MarkerKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    PeerLabel,
    /// Background-colored copy behind a message label.
    Halo,
    MessageLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub role: TextRole,
    pub anchor: TextAnchor,
    pub classes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect(RectPrimitive),
    Line(LinePrimitive),
    Text(TextPrimitive),
}

/// One peer's lane for one sequence. Lanes of peers that do not take part
/// in the sequence are recorded with `visible == false` and never drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneLayout {
    pub peer: String,
    pub sequence: usize,
    pub rect: Rect,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArrowLayout {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
    pub head: MarkerKind,
    pub tail: MarkerKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageLayout {
    pub sequence: usize,
    pub index: usize,
    pub source: String,
    pub target: String,
    pub text: String,
    /// Vertical cursor the message was drawn at.
    pub y: f32,
    /// `None` for self-messages.
    pub arrow: Option<ArrowLayout>,
    pub label_anchor: (f32, f32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub style: String,
    pub markers: Vec<MarkerDef>,
    pub primitives: Vec<Primitive>,
    pub lanes: Vec<LaneLayout>,
    pub messages: Vec<MessageLayout>,
}

impl Layout {
    pub fn marker(&self, kind: MarkerKind) -> Option<&MarkerDef> {
        self.markers.iter().find(|marker| marker.kind == kind)
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn texts(&self, role: TextRole) -> impl Iterator<Item = &TextPrimitive> {
        self.primitives.iter().filter_map(move |p| match p {
            Primitive::Text(text) if text.role == role => Some(text),
            _ => None,
        })
    }

    pub fn visible_lanes(&self, sequence: usize) -> impl Iterator<Item = &LaneLayout> {
        self.lanes
            .iter()
            .filter(move |lane| lane.sequence == sequence && lane.visible)
    }
}
