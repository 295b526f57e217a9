//! Swimlane diagrams: peers drawn as vertical lanes, messages as horizontal
//! arrows between them, grouped into vertically stacked sequences.
//!
//! ```
//! use swimlane::{InputFormat, RenderOptions, render_with_options};
//!
//! let input = r#"{
//!     "peers": ["client", "server"],
//!     "messages": [[
//!         ["client", "server", "Send request"],
//!         ["server", "client", "Send response"]
//!     ]]
//! }"#;
//! let svg = render_with_options(input, InputFormat::Json, RenderOptions::classic()).unwrap();
//! assert!(svg.contains("Send response"));
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use error::{Result, SwimlaneError};
pub use ir::{Message, MessageAttrs, Peer, Swimlane};
pub use layout::{Layout, compute_layout};
pub use parser::{InputFormat, normalize, parse_swimlane};
pub use render::render_svg;
pub use theme::Theme;

/// Theme and layout settings for a one-call render.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
        }
    }

    pub fn modern() -> Self {
        Self {
            theme: Theme::modern(),
            layout: LayoutConfig::default(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::classic()
    }
}

/// Parse, lay out and serialize `input` to SVG.
pub fn render_with_options(input: &str, format: InputFormat, options: RenderOptions) -> Result<String> {
    let diagram = parse_swimlane(input, format)?;
    let layout = compute_layout(&diagram, &options.theme, &options.layout)?;
    Ok(render_svg(&layout, &options.theme))
}

pub fn render(input: &str, format: InputFormat) -> Result<String> {
    render_with_options(input, format, RenderOptions::default())
}
