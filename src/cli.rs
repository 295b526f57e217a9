use crate::config::{Config, load_config};
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::parser::{InputFormat, parse_swimlane};
use crate::render::{render_svg, write_output_png, write_output_svg};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "swimlane", version, about = "Render swimlane diagrams from JSON/YAML to SVG")]
pub struct Args {
    /// Input file (.json, .json5, .yaml) or '-' for stdin
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Input format. Guessed from the file extension when omitted.
    #[arg(short = 'f', long = "inputFormat", value_enum)]
    pub input_format: Option<InputFormat>,

    /// Config JSON file (theme, themeVariables, layout)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Extra stylesheet appended after the input's css fragments
    #[arg(long = "css")]
    pub css: Vec<PathBuf>,

    /// PNG width used when the document carries no usable size
    #[arg(short = 'w', long = "width", default_value_t = 1200.0)]
    pub width: f32,

    /// PNG height used when the document carries no usable size
    #[arg(short = 'H', long = "height", default_value_t = 800.0)]
    pub height: f32,

    /// Write lane and message geometry as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Log layout progress to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())
        .with_context(|| format!("failed to load config {:?}", args.config))?;
    config.render.width = args.width;
    config.render.height = args.height;
    let (input, guessed_format) = read_input(args.input.as_deref())?;
    let format = args.input_format.unwrap_or(guessed_format);

    let mut diagram = parse_swimlane(&input, format)?;
    for path in &args.css {
        let css = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read stylesheet {}", path.display()))?;
        diagram.css.push(css);
    }

    render_to_output(&diagram, &config, &args)
}

fn render_to_output(diagram: &crate::ir::Swimlane, config: &Config, args: &Args) -> Result<()> {
    let layout = compute_layout(diagram, &config.theme, &config.layout)?;
    if let Some(path) = &args.dump_layout {
        write_layout_dump(path, &layout)
            .with_context(|| format!("failed to write layout dump {}", path.display()))?;
    }
    let svg = render_svg(&layout, &config.theme);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&svg, &output, &config.render)?;
        }
    }
    if let Some(path) = &args.output {
        tracing::info!(path = %path.display(), "wrote diagram");
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<(String, InputFormat)> {
    if let Some(path) = path {
        if path != Path::new("-") {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            return Ok((content, InputFormat::from_path(path)));
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok((buf, InputFormat::Json))
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
