use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recolor::assets::{AssetCategory, AssetLoader, CONFIG_ENV, PALETTES_ENV};
use recolor::models::AppConfig;
use recolor::palette_file::PaletteBook;
use recolor::services::{ConvertRequest, Converter, EdgeMethod, EdgeRequest};
use recolor_core::Mode;

#[derive(Parser)]
#[command(name = "recolor")]
#[command(about = "Color reduction for PNG images: palette mapping, level reduction, edge-aware smoothing")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $RECOLOR_CONFIG, then the embedded config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Palette definitions file (defaults to $RECOLOR_PALETTES, then the embedded palettes)
    #[arg(long, global = true)]
    palettes: Option<PathBuf>,

    /// Log debug details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reduce the colors of a PNG image
    Convert {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file (default: <stem>_<palette or mode>.png beside the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Mode: search, equidistant, self, self-sort or bw
        #[arg(short, long)]
        mode: Option<String>,

        /// Palette name for search and equidistant
        #[arg(short, long)]
        palette: Option<String>,

        /// Number of levels for self, self-sort and bw (at least 2)
        #[arg(short, long)]
        resolution: Option<u32>,

        /// Blur flat regions before quantizing (pixel radius, 0 disables)
        #[arg(short, long)]
        blur: Option<usize>,

        /// Blur along edges after quantizing (pixel radius, 0 disables)
        #[arg(short, long)]
        antialias: Option<usize>,

        /// Pixels handled by each search worker thread
        #[arg(long)]
        chunk_pixels: Option<usize>,

        /// Recompress the output with oxipng
        #[arg(long)]
        optimize: bool,
    },
    /// Render an edge map of a PNG image
    Edges {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file (default: <stem>_<method>.png beside the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Method: dog, sobel, horizontal or vertical
        #[arg(short, long, default_value = "dog")]
        method: String,

        /// Narrow deviation for dog
        #[arg(short, long)]
        sigma: Option<f32>,

        /// Recompress the output with oxipng
        #[arg(long)]
        optimize: bool,
    },
    /// List palettes or show the colors of one
    Palettes {
        /// Palette to print
        #[arg(long)]
        show: Option<String>,
    },
    /// Extract embedded palettes.txt and config.yaml for customization
    Init {
        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "recolor=debug,recolor_core=debug"
    } else {
        "recolor=info,recolor_core=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let loader = AssetLoader::from_env(cli.palettes, cli.config);

    match cli.command {
        Some(Commands::Convert {
            input,
            output,
            mode,
            palette,
            resolution,
            blur,
            antialias,
            chunk_pixels,
            optimize,
        }) => {
            let config = AppConfig::load_from_assets(&loader);
            let mode: Mode = mode
                .unwrap_or_else(|| config.mode.clone())
                .parse()
                .context("Invalid mode")?;
            let request = ConvertRequest {
                input,
                output,
                mode,
                palette: Some(palette.unwrap_or_else(|| config.palette.clone())),
                resolution: resolution.unwrap_or(config.resolution),
                blur_radius: blur.unwrap_or(config.blur_radius),
                antialias_radius: antialias.unwrap_or(config.antialias_radius),
                chunk_pixels: chunk_pixels.unwrap_or(config.chunk_pixels),
                optimize: optimize || config.optimize,
            };
            run_convert_command(&loader, &request)
        }
        Some(Commands::Edges {
            input,
            output,
            method,
            sigma,
            optimize,
        }) => {
            let config = AppConfig::load_from_assets(&loader);
            let request = EdgeRequest {
                input,
                output,
                method: method.parse()?,
                sigma: sigma.unwrap_or(config.edges.sigma),
                optimize: optimize || config.optimize,
            };
            run_edges_command(&request)
        }
        Some(Commands::Palettes { show }) => run_palettes_command(&loader, show.as_deref()),
        Some(Commands::Init { force, list }) => run_init_command(&loader, force, list),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn load_palette_book(loader: &AssetLoader) -> anyhow::Result<PaletteBook> {
    let text = loader
        .read_palettes_string()
        .context("Failed to read palette definitions")?;
    Ok(PaletteBook::parse(&text))
}

/// Quantize one image
fn run_convert_command(loader: &AssetLoader, request: &ConvertRequest) -> anyhow::Result<()> {
    let palettes = if request.mode.needs_palette() {
        load_palette_book(loader)?
    } else {
        PaletteBook::default()
    };
    let converter = Converter::new(palettes);

    let report = converter
        .convert(request)
        .with_context(|| format!("Failed to convert {}", request.input.display()))?;
    println!(
        "Wrote {} ({}x{}, {} bytes)",
        report.output.display(),
        report.width,
        report.height,
        report.bytes
    );
    Ok(())
}

/// Render one edge map
fn run_edges_command(request: &EdgeRequest) -> anyhow::Result<()> {
    let converter = Converter::new(PaletteBook::default());
    let report = converter
        .edges(request)
        .with_context(|| format!("Failed to render edges of {}", request.input.display()))?;
    println!(
        "Wrote {} ({}x{}, {} bytes)",
        report.output.display(),
        report.width,
        report.height,
        report.bytes
    );
    Ok(())
}

/// List palettes, or print the colors of one
fn run_palettes_command(loader: &AssetLoader, show: Option<&str>) -> anyhow::Result<()> {
    let book = load_palette_book(loader)?;

    match show {
        Some(name) => {
            let palette = book.palette(name)?;
            println!("[{name}] {} colors", palette.len());
            for [r, g, b] in palette.iter() {
                println!("  {r:>3} {g:>3} {b:>3}  #{r:02X}{g:02X}{b:02X}");
            }
        }
        None => {
            for name in book.names() {
                match book.colors(name) {
                    Ok(colors) => println!("  {name:<16} {} colors", colors.len()),
                    Err(e) => println!("  {name:<16} ({e})"),
                }
            }
        }
    }
    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(loader: &AssetLoader, force: bool, list: bool) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:");
        for f in AssetLoader::list_embedded() {
            println!("  {f}");
        }
        return Ok(());
    }

    let report = loader.init(&AssetCategory::ALL, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var(CONFIG_ENV).ok();
    let palettes_file = std::env::var(PALETTES_ENV).ok();

    println!("Recolor v{VERSION}");
    println!("Color reduction for PNG images\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV:<17} = {}",
        config_file.as_deref().unwrap_or("(embedded)")
    );
    println!(
        "  {PALETTES_ENV:<17} = {}",
        palettes_file.as_deref().unwrap_or("(embedded)")
    );

    println!("\nModes:");
    for mode in Mode::ALL {
        let note = if mode.needs_palette() {
            "uses --palette"
        } else {
            "uses --resolution"
        };
        println!("  {:<12} {note}", mode.as_str());
    }

    println!("\nEdge methods:");
    for method in EdgeMethod::ALL {
        println!("  {method}");
    }

    println!("\nCommands:");
    println!("  recolor convert <INPUT>   Reduce the colors of an image");
    println!("  recolor edges <INPUT>     Render an edge map");
    println!("  recolor palettes          List available palettes");
    println!("  recolor init              Extract embedded palettes and config");
}
