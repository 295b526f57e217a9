use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted halo half-width; a label costs `(2r+1)^2 + 1` text nodes.
pub const MAX_HALO_RADIUS: i32 = 16;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Width of every peer lane.
    pub peer_rect_width: f32,
    /// Horizontal space between neighbouring lanes.
    pub peer_rect_gap: f32,
    /// Vertical distance between consecutive messages.
    pub message_gap: f32,
    /// Distance between a label's baseline and the line or lane it belongs to.
    pub text_padding: f32,
    /// Half-width of the square of halo copies behind a message label.
    pub halo_radius: i32,
    /// Share of the source midline in a message label's x anchor.
    pub label_source_weight: f32,
    /// Fraction of the lane width a self-message label is inset by.
    pub self_message_inset: f32,
    pub peer_corner_radius: f32,
    /// Empty space kept around the drawing in the output document.
    pub canvas_margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            peer_rect_width: 200.0,
            peer_rect_gap: 100.0,
            message_gap: 50.0,
            text_padding: 5.0,
            halo_radius: 3,
            label_source_weight: 0.75,
            self_message_inset: 0.1,
            peer_corner_radius: 0.0,
            canvas_margin: 50.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
    /// Fallback font for text the rasterizer cannot resolve from the stylesheet.
    pub font_family: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "white".to_string(),
            font_family: "sans-serif".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            font_family: theme.font_family.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<NumberOrString>,
    peer_fill: Option<String>,
    peer_stroke: Option<String>,
    peer_text_color: Option<String>,
    line_color: Option<String>,
    message_text_color: Option<String>,
    text_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    peer_rect_width: Option<f32>,
    peer_rect_gap: Option<f32>,
    message_gap: Option<f32>,
    text_padding: Option<f32>,
    halo_radius: Option<i32>,
    label_source_weight: Option<f32>,
    self_message_inset: Option<f32>,
    peer_corner_radius: Option<f32>,
    canvas_margin: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f32),
    String(String),
}

impl NumberOrString {
    fn as_f32(&self) -> Option<f32> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => val.trim().trim_end_matches("px").parse::<f32>().ok(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::by_name(theme_name) {
            Some(theme) => config.theme = theme,
            None => tracing::warn!(theme = theme_name, "unknown theme, keeping classic"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size.as_ref().and_then(NumberOrString::as_f32) {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.peer_fill {
            config.theme.peer_fill = v;
        }
        if let Some(v) = vars.peer_stroke {
            config.theme.peer_stroke = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.peer_text_color = v.clone();
            config.theme.message_text_color = v;
        }
        if let Some(v) = vars.peer_text_color {
            config.theme.peer_text_color = v;
        }
        if let Some(v) = vars.message_text_color {
            config.theme.message_text_color = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.peer_rect_width {
            config.layout.peer_rect_width = v;
        }
        if let Some(v) = layout.peer_rect_gap {
            config.layout.peer_rect_gap = v;
        }
        if let Some(v) = layout.message_gap {
            config.layout.message_gap = v;
        }
        if let Some(v) = layout.text_padding {
            config.layout.text_padding = v;
        }
        if let Some(v) = layout.halo_radius {
            if !(0..=MAX_HALO_RADIUS).contains(&v) {
                anyhow::bail!("layout.haloRadius must be between 0 and {MAX_HALO_RADIUS}, got {v}");
            }
            config.layout.halo_radius = v;
        }
        if let Some(v) = layout.label_source_weight {
            config.layout.label_source_weight = v.clamp(0.0, 1.0);
        }
        if let Some(v) = layout.self_message_inset {
            config.layout.self_message_inset = v;
        }
        if let Some(v) = layout.peer_corner_radius {
            config.layout.peer_corner_radius = v;
        }
        if let Some(v) = layout.canvas_margin {
            config.layout.canvas_margin = v;
        }
    }

    if config.layout.message_gap <= 0.0 {
        anyhow::bail!("layout.messageGap must be positive");
    }

    config.render.background = config.theme.background.clone();
    config.render.font_family = config.theme.font_family.clone();

    Ok(config)
}
