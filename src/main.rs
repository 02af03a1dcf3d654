//! Gridnoise CLI - gradient noise heightmap generator.
//!
//! Generates a square gradient noise field and exports it as a heightmap,
//! a shaded preview and an optional grid/gradient debug overlay.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use gridnoise::export::{
    export_noise_png, export_noise_raw, export_overlay_png, export_preview_png,
    OverlayOptions, PngExportOptions, RawFormat,
};
use gridnoise::noise::{generate_with_config, NoiseConfig};

/// Grid-based gradient noise generator.
#[derive(Parser)]
#[command(name = "gridnoise")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a noise field and export it.
    Generate(GenerateArgs),

    /// Display information about a noise configuration.
    Info {
        /// Output side length in pixels.
        #[arg(short, long, default_value = "800")]
        size: u32,

        /// Grid cell side length in pixels.
        #[arg(short, long, default_value = "100")]
        grid: u32,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Output side length in pixels.
    #[arg(short, long, default_value = "800")]
    size: u32,

    /// Grid cell side length in pixels; must divide the size.
    #[arg(short, long, default_value = "100")]
    grid: u32,

    /// Random seed for reproducible generation.
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory for generated files.
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Base name for output files.
    #[arg(short, long, default_value = "noise")]
    name: String,

    /// Heightmap export format.
    #[arg(short, long, default_value = "png")]
    format: ExportFormat,

    /// Stretch the heightmap over the field's actual value range.
    #[arg(long)]
    auto_range: bool,

    /// Also export an 8-bit shaded preview.
    #[arg(long)]
    preview: bool,

    /// Also export a grid and gradient overlay.
    #[arg(long)]
    overlay: bool,

    /// Tint overlay pixels by nearest cell corner.
    #[arg(long, requires = "overlay")]
    tint_corners: bool,

    /// Border around the overlay in pixels.
    #[arg(long, default_value = "0")]
    margin: u32,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    /// 16-bit PNG.
    Png,
    /// 16-bit RAW little-endian.
    Raw,
    /// 32-bit float RAW.
    RawFloat,
}

const MAX_SIZE: u32 = 8192;
const MAX_MARGIN: u32 = 1024;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Info { size, grid } => run_info(size, grid),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "gridnoise=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_generate(args: GenerateArgs) {
    if args.size > MAX_SIZE {
        eprintln!("Error: Size must be at most {}", MAX_SIZE);
        std::process::exit(1);
    }
    if args.margin > MAX_MARGIN {
        eprintln!("Error: Margin must be at most {}", MAX_MARGIN);
        std::process::exit(1);
    }

    // Generate seed if not provided
    let seed = args.seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    let config = NoiseConfig::new(args.size, args.grid)
        .seed(seed)
        .classify_corners(args.tint_corners);

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    println!("Gridnoise - Gradient Noise Generator");
    println!("====================================");
    println!("Size: {}x{}", config.size, config.size);
    println!("Grid: {} px ({} corners per axis)", config.grid, config.corners());
    println!("Seed: {}", seed);
    println!("Output: {}", args.output.display());

    let start = Instant::now();
    println!("\nGenerating noise field...");
    let noise = generate_with_config(&config).unwrap_or_else(|e| {
        eprintln!("Error during generation: {}", e);
        std::process::exit(1);
    });
    println!("Generation completed in {:.2?}", start.elapsed());

    let (min_v, max_v) = noise.field.value_range();
    println!("Value range: [{:.4}, {:.4}]", min_v, max_v);

    println!("\nExporting...");
    std::fs::create_dir_all(&args.output).unwrap_or_else(|e| {
        eprintln!("Error creating output directory: {}", e);
        std::process::exit(1);
    });

    let (lo, hi) = if args.auto_range && min_v < max_v {
        (min_v, max_v)
    } else {
        (-1.0, 1.0)
    };

    match args.format {
        ExportFormat::Png => {
            let path = args.output.join(format!("{}.png", args.name));
            let options = PngExportOptions {
                min_value: lo,
                max_value: hi,
                ..Default::default()
            };
            export_noise_png(&noise.field, &path, &options).unwrap_or_else(|e| {
                eprintln!("Error exporting PNG: {}", e);
                std::process::exit(1);
            });
            println!("  Exported 16-bit PNG: {}", path.display());
        }
        ExportFormat::Raw | ExportFormat::RawFloat => {
            let (format, ext) = match args.format {
                ExportFormat::RawFloat => (RawFormat::R32Float, "r32"),
                _ => (RawFormat::R16LittleEndian, "raw"),
            };
            let path = args.output.join(format!("{}.{}", args.name, ext));
            export_noise_raw(&noise.field, &path, format, lo, hi).unwrap_or_else(|e| {
                eprintln!("Error exporting RAW: {}", e);
                std::process::exit(1);
            });
            println!("  Exported RAW ({:?}): {}", format, path.display());
        }
    }

    if args.preview {
        let path = args.output.join(format!("{}_preview.png", args.name));
        export_preview_png(&noise.field, &path).unwrap_or_else(|e| {
            eprintln!("Error exporting preview: {}", e);
            std::process::exit(1);
        });
        println!("  Exported preview: {}", path.display());
    }

    if args.overlay {
        let path = args.output.join(format!("{}_overlay.png", args.name));
        let options = OverlayOptions {
            margin: args.margin,
            tint_corners: args.tint_corners,
            ..Default::default()
        };
        export_overlay_png(&noise, &path, &options).unwrap_or_else(|e| {
            eprintln!("Error exporting overlay: {}", e);
            std::process::exit(1);
        });
        println!("  Exported overlay: {}", path.display());
    }

    println!("\nDone in {:.2?}", start.elapsed());
}

fn run_info(size: u32, grid: u32) {
    let config = NoiseConfig::new(size, grid);

    println!("Gridnoise - Configuration Info");
    println!("==============================");
    println!();
    println!("Size: {}x{}", size, size);
    println!("Grid: {} px", grid);

    if let Err(e) = config.validate() {
        println!();
        println!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let cells = config.cells() as u64;
    let corners = config.corners() as u64;
    let pixels = (size as u64) * (size as u64);

    let bytes_values = pixels * 8; // f64
    let bytes_gradients = corners * corners * 16; // DVec2
    let bytes_png = pixels * 2;
    let bytes_raw_r32 = pixels * 4;
    let mb = |b: u64| b as f64 / 1024.0 / 1024.0;

    println!();
    println!("Cells:     {:>12} ({}x{})", cells * cells, cells, cells);
    println!("Corners:   {:>12} ({}x{})", corners * corners, corners, corners);
    println!("Pixels:    {:>12}", pixels);
    println!();
    println!("Memory usage (in-memory):");
    println!("  Values:    {:>12} bytes ({:.2} MB)", bytes_values, mb(bytes_values));
    println!("  Gradients: {:>12} bytes ({:.2} MB)", bytes_gradients, mb(bytes_gradients));
    println!();
    println!("Export file sizes:");
    println!("  PNG/RAW (16-bit): {:>10} bytes ({:.2} MB)", bytes_png, mb(bytes_png));
    println!("  RAW (R32):        {:>10} bytes ({:.2} MB)", bytes_raw_r32, mb(bytes_raw_r32));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tint_corners_requires_overlay() {
        let result = Cli::try_parse_from(["gridnoise", "generate", "--tint-corners"]);
        assert!(result.is_err());

        let cli =
            Cli::try_parse_from(["gridnoise", "generate", "--overlay", "--tint-corners"]).unwrap();
        match cli.command {
            Commands::Generate(args) => assert!(args.overlay && args.tint_corners),
            Commands::Info { .. } => panic!("expected generate"),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
