use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub peer_fill: String,
    pub peer_stroke: String,
    pub peer_text_color: String,
    pub line_color: String,
    pub message_text_color: String,
    /// Canvas color; message label halos are painted in it.
    pub background: String,
}

impl Theme {
    /// Black strokes on white, the look swimlane diagrams have always had.
    pub fn classic() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 14.0,
            peer_fill: "white".to_string(),
            peer_stroke: "black".to_string(),
            peer_text_color: "black".to_string(),
            line_color: "black".to_string(),
            message_text_color: "black".to_string(),
            background: "white".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            peer_fill: "#F8FAFF".to_string(),
            peer_stroke: "#C7D2E5".to_string(),
            peer_text_color: "#1C2430".to_string(),
            line_color: "#7A8AA6".to_string(),
            message_text_color: "#1C2430".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "modern" => Some(Self::modern()),
            "classic" | "default" | "base" => Some(Self::classic()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
