//! Circuitry CLI - render generative circuit-board backgrounds.

use anyhow::Result;
use circuitry::circuit::{CircuitGenerator, GridSpacing, LayoutParams};
use circuitry::config::CircuitryConfig;
use circuitry::generators::{
    BoardGenerator, BoardStyle, Generator, JsonGenerator, Palette, Viewport,
};
use circuitry::random::seed_from_label;
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "circuitry")]
#[command(about = "Generate circuit-board graphs and render them as SVG or JSON")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "circuitry.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Generate a single board
    Generate {
        /// Render style
        #[arg(short, long, value_enum)]
        style: Option<StyleArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "svg")]
        format: FormatArg,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed for generation (a number, or any label to hash)
        #[arg(short = 'S', long)]
        seed: Option<String>,

        /// Requested node count before pruning
        #[arg(short, long)]
        nodes: Option<i64>,

        /// Grid spacing variant
        #[arg(long, value_enum)]
        spacing: Option<SpacingArg>,

        /// Width of the output
        #[arg(long)]
        width: Option<u32>,

        /// Height of the output
        #[arg(long)]
        height: Option<u32>,

        /// Background color (hex, e.g. "#020617")
        #[arg(long)]
        background: Option<String>,

        /// Trace color (hex)
        #[arg(long)]
        trace_color: Option<String>,

        /// Highlight/pulse color (hex)
        #[arg(long)]
        highlight_color: Option<String>,

        /// Also save the node/edge graph as JSON
        #[arg(long)]
        save_graph: bool,
    },

    /// Render every style and spacing variant for comparison
    Showcase {
        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Seed for consistent results
        #[arg(short = 'S', long, default_value = "42")]
        seed: String,
    },
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum StyleArg {
    /// Fully drawn board
    Static,
    /// Staggered reveal with travelling pulses
    Animated,
}

impl StyleArg {
    fn to_style(self) -> BoardStyle {
        match self {
            StyleArg::Static => BoardStyle::Static,
            StyleArg::Animated => BoardStyle::Animated,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum SpacingArg {
    /// Grid inset from the borders
    Padded,
    /// Grid touching the borders
    Stretched,
}

impl SpacingArg {
    fn to_spacing(self) -> GridSpacing {
        match self {
            SpacingArg::Padded => GridSpacing::Padded,
            SpacingArg::Stretched => GridSpacing::Stretched,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum FormatArg {
    Svg,
    Json,
}

fn style_name(style: BoardStyle) -> &'static str {
    match style {
        BoardStyle::Static => "static",
        BoardStyle::Animated => "animated",
    }
}

fn spacing_name(spacing: GridSpacing) -> &'static str {
    match spacing {
        GridSpacing::Padded => "padded",
        GridSpacing::Stretched => "stretched",
    }
}

fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("circuitry=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = CircuitryConfig::load(&cli.config)?;

    match cli.command {
        Commands::Generate {
            style,
            format,
            output,
            seed,
            nodes,
            spacing,
            width,
            height,
            background,
            trace_color,
            highlight_color,
            save_graph,
        } => {
            let width = width.unwrap_or(config.output.width);
            let height = height.unwrap_or(config.output.height);
            let seed = seed
                .as_deref()
                .map(seed_from_label)
                .unwrap_or_else(rand::random);
            let style = style
                .map(StyleArg::to_style)
                .unwrap_or(config.render.style);
            let save_graph = save_graph || config.output.save_graph;

            let mut params = config.generator;
            if let Some(nodes) = nodes {
                params.node_count = nodes;
            }
            if let Some(spacing) = spacing {
                params.spacing = spacing.to_spacing();
            }

            // Build palette - random by default, or custom if specified
            let palette = {
                let mut p = if background.is_some()
                    || trace_color.is_some()
                    || highlight_color.is_some()
                {
                    Palette::default()
                } else {
                    // Use randomized palette based on seed
                    Palette::random(seed)
                };
                if let Some(bg) = background.or_else(|| config.render.background.clone()) {
                    p.background = bg;
                }
                if let Some(trace) = trace_color {
                    p.trace = trace;
                }
                if let Some(highlight) = highlight_color {
                    p.highlight = highlight;
                }
                p
            };

            println!("Generating {} board with seed {}...", style_name(style), seed);
            let graph = CircuitGenerator::new(params).generate_seeded(seed);
            println!(
                "  {} nodes, {} edges ({} highlighted, {} chips)",
                graph.nodes.len(),
                graph.edges.len(),
                graph.highlighted_edges().count(),
                graph.decorated_nodes().count()
            );

            let json = JsonGenerator::new(true);
            let board = BoardGenerator::new(Viewport::from_pixels(width, height), style)
                .with_palette(palette)
                .with_timing(config.animation);
            let gen: &dyn Generator = match format {
                FormatArg::Svg => &board,
                FormatArg::Json => &json,
            };

            let output_dir = PathBuf::from(&config.output.directory);
            let output_path = output.unwrap_or_else(|| {
                output_dir.join(format!("circuitry_{}.{}", seed, gen.extension()))
            });

            write_artifact(&output_path, &gen.generate(&graph))?;
            println!("Saved to {}", output_path.display());

            if save_graph && gen.extension() != json.extension() {
                let graph_path = output_path.with_extension(json.extension());
                write_artifact(&graph_path, &json.to_json(&graph)?)?;
                println!("Saved graph to {}", graph_path.display());
            }
        }

        Commands::Showcase { output_dir, seed } => {
            let output_dir = output_dir
                .unwrap_or_else(|| PathBuf::from(&config.output.directory).join("showcase"));
            fs::create_dir_all(&output_dir)?;

            let seed = seed_from_label(&seed);
            println!("Generating showcase with seed {}...", seed);

            // Generate multiple sizes
            let sizes: [(u32, u32, &str); 3] =
                [(800, 600, "small"), (1920, 1080, "hd"), (3840, 2160, "4k")];
            let palette = Palette::random(seed);

            for spacing in [GridSpacing::Padded, GridSpacing::Stretched] {
                let params = LayoutParams {
                    spacing,
                    ..config.generator
                };
                let graph = CircuitGenerator::new(params).generate_seeded(seed);
                println!(
                    "  {}: {} nodes, {} edges",
                    spacing_name(spacing),
                    graph.nodes.len(),
                    graph.edges.len()
                );

                for style in [BoardStyle::Static, BoardStyle::Animated] {
                    for (width, height, label) in &sizes {
                        let gen = BoardGenerator::new(Viewport::from_pixels(*width, *height), style)
                            .with_palette(palette.clone())
                            .with_timing(config.animation);
                        let result = gen.generate(&graph);

                        let filename = format!(
                            "{}_{}_{}.{}",
                            spacing_name(spacing),
                            style_name(style),
                            label,
                            gen.extension()
                        );
                        write_artifact(&output_dir.join(&filename), &result)?;
                        println!("  Created {}", filename);
                    }
                }

                let filename = format!("{}.json", spacing_name(spacing));
                write_artifact(&output_dir.join(&filename), &JsonGenerator::new(true).to_json(&graph)?)?;
                println!("  Created {}", filename);
            }

            println!("Done! Showcase saved to {}", output_dir.display());
        }
    }

    Ok(())
}
