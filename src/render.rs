use crate::config::RenderConfig;
use crate::layout::{Layout, LinePrimitive, MarkerDef, Primitive, RectPrimitive, TextPrimitive, TextRole};
use crate::theme::Theme;
use anyhow::Result;
use std::fmt::Write;
use std::path::Path;

pub fn render_svg(layout: &Layout, theme: &Theme) -> String {
    let mut svg = String::new();
    let margin = layout.margin.max(0.0);
    let view_x = -margin;
    let view_y = -margin;
    let width = layout.width + margin * 2.0;
    let height = layout.height + margin * 2.0;

    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"{view_x:.2} {view_y:.2} {width:.2} {height:.2}\">",
    );
    let _ = write!(
        svg,
        "<rect x=\"{view_x:.2}\" y=\"{view_y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" fill=\"{}\"/>",
        escape_xml(&theme.background)
    );

    svg.push_str("<defs>");
    let _ = write!(svg, "<style>{}</style>", escape_xml(&layout.style));
    for marker in &layout.markers {
        svg.push_str(&marker_svg(marker, theme));
    }
    svg.push_str("</defs>");

    for primitive in &layout.primitives {
        match primitive {
            Primitive::Rect(rect) => svg.push_str(&rect_svg(rect, theme)),
            Primitive::Line(line) => svg.push_str(&line_svg(line, theme)),
            Primitive::Text(text) => svg.push_str(&text_svg(text, theme)),
        }
    }

    svg.push_str("</svg>");
    svg
}

fn marker_svg(marker: &MarkerDef, theme: &Theme) -> String {
    let Some(path) = marker.path else {
        return format!("<marker id=\"{}\"/>", marker.kind.id());
    };
    format!(
        "<marker id=\"{}\" refX=\"{}\" refY=\"{}\" markerWidth=\"{}\" markerHeight=\"{}\"><path d=\"{}\" fill=\"{}\"/></marker>",
        marker.kind.id(),
        marker.ref_x,
        marker.ref_y,
        marker.width,
        marker.height,
        path,
        escape_xml(&theme.line_color)
    )
}

fn rect_svg(prim: &RectPrimitive, theme: &Theme) -> String {
    let rect = &prim.rect;
    let mut out = format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" class=\"{}\"",
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        escape_xml(&prim.classes.join(" "))
    );
    if prim.corner_radius > 0.0 {
        let _ = write!(out, " rx=\"{r:.2}\" ry=\"{r:.2}\"", r = prim.corner_radius);
    }
    if !prim.attrs.contains_key("stroke") {
        let _ = write!(out, " stroke=\"{}\"", escape_xml(&theme.peer_stroke));
    }
    if !prim.attrs.contains_key("fill") {
        let _ = write!(out, " fill=\"{}\"", escape_xml(&theme.peer_fill));
    }
    for (key, value) in &prim.attrs {
        let _ = write!(out, " {}=\"{}\"", escape_xml(key), escape_xml(value));
    }
    match &prim.title {
        Some(title) => {
            let _ = write!(out, "><title>{}</title></rect>", escape_xml(title));
        }
        None => out.push_str("/>"),
    }
    out
}

fn line_svg(line: &LinePrimitive, theme: &Theme) -> String {
    format!(
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" class=\"{}\" stroke=\"{}\" marker-start=\"url(#{})\" marker-mid=\"url(#{})\" marker-end=\"url(#{})\"/>",
        line.x1,
        line.y1,
        line.x2,
        line.y2,
        escape_xml(&line.classes.join(" ")),
        escape_xml(&theme.line_color),
        line.marker_start.id(),
        line.marker_mid.id(),
        line.marker_end.id()
    )
}

fn text_svg(text: &TextPrimitive, theme: &Theme) -> String {
    let fill = match text.role {
        TextRole::PeerLabel => theme.peer_text_color.as_str(),
        TextRole::Halo => theme.background.as_str(),
        TextRole::MessageLabel => theme.message_text_color.as_str(),
    };
    format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" class=\"{}\" text-anchor=\"{}\" fill=\"{}\">{}</text>",
        text.x,
        text.y,
        escape_xml(&text.classes.join(" ")),
        text.anchor.as_str(),
        escape_xml(fill),
        escape_xml(&text.text)
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = primary_family(&render_cfg.font_family);
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid render size {}x{}", render_cfg.width, render_cfg.height))?;
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;
    if let Some(color) = parse_background(&render_cfg.background) {
        pixmap.fill(color);
    }

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

/// First family of a CSS `font-family` list, unquoted.
#[cfg_attr(not(feature = "png"), allow(dead_code))]
fn primary_family(families: &str) -> String {
    families
        .split(',')
        .map(|family| family.trim().trim_matches(|c| c == '"' || c == '\''))
        .find(|family| !family.is_empty())
        .unwrap_or("sans-serif")
        .to_string()
}

#[cfg(feature = "png")]
fn parse_background(color: &str) -> Option<resvg::tiny_skia::Color> {
    match color.trim().to_ascii_lowercase().as_str() {
        "white" => return Some(resvg::tiny_skia::Color::WHITE),
        "black" => return Some(resvg::tiny_skia::Color::BLACK),
        "transparent" | "none" => return None,
        _ => {}
    }
    let hex = color.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).ok();
    Some(resvg::tiny_skia::Color::from_rgba8(channel(0)?, channel(2)?, channel(4)?, 255))
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    anyhow::bail!("PNG output requires the `png` feature")
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
