use serde::Deserialize;
use swimlane::{InputFormat, RenderOptions, render_with_options};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwimlaneRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    input_format: Option<String>,
}

fn build_render_options(options: &SwimlaneRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("modern") {
        RenderOptions::modern()
    } else {
        RenderOptions::classic()
    };

    if let Some(font_family) = &options.font_family {
        render_options.theme.font_family = font_family.clone();
    }
    if let Some(font_size) = options.font_size {
        render_options.theme.font_size = font_size;
    }

    render_options
}

fn input_format(options: &SwimlaneRenderOptions) -> InputFormat {
    match options.input_format.as_deref() {
        Some("yaml" | "yml") => InputFormat::Yaml,
        Some("json5") => InputFormat::Json5,
        _ => InputFormat::Json,
    }
}

#[wasm_bindgen]
pub fn render_swimlane_svg(source: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<SwimlaneRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        SwimlaneRenderOptions::default()
    };

    render_with_options(source, input_format(&options), build_render_options(&options))
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
