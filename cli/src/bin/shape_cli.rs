use clap::{Parser, Subcommand};
use cli::{DetectionConfig, annotated_output_path};
use color_eyre::eyre::{Result, WrapErr};
use shapes::{Legend, ShapeDetector, ShapeDetectorCommand, annotate, load_font, save_image};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect and classify shapes in an image
    Detect {
        /// Path to the input image
        #[arg(short, long)]
        input: PathBuf,
        /// Optional TOML or JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Where to write the annotated image (defaults to <input>_shapes.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also export the contours and their categories as GeoJSON
        #[arg(long)]
        geojson: Option<PathBuf>,
        /// Font for the legend text (overrides the config file)
        #[arg(long)]
        font: Option<PathBuf>,
        /// Lower Canny threshold (overrides the config file)
        #[arg(long)]
        low: Option<f32>,
        /// Upper Canny threshold (overrides the config file)
        #[arg(long)]
        high: Option<f32>,
        /// Gaussian blur kernel size (overrides the config file)
        #[arg(long)]
        blur: Option<u32>,
    },
    /// Write the default configuration file
    InitConfig {
        /// Destination (.toml or .json)
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List the detection commands and print their JSON schema
    Commands,
}

struct DetectArgs<'a> {
    input: &'a Path,
    output: Option<&'a Path>,
    geojson: Option<&'a Path>,
    config: DetectionConfig,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Detect {
            input,
            config,
            output,
            geojson,
            font,
            low,
            high,
            blur,
        } => {
            let mut detection_config = match config {
                Some(path) => DetectionConfig::from_file(path)
                    .wrap_err_with(|| format!("Failed to read configuration {}", path.display()))?,
                None => DetectionConfig::default(),
            };
            if let Some(low) = low {
                detection_config.canny_low = *low;
            }
            if let Some(high) = high {
                detection_config.canny_high = *high;
            }
            if let Some(blur) = blur {
                detection_config.blur_kernel_size = *blur;
            }
            if let Some(font) = font {
                detection_config.font = Some(font.to_string_lossy().to_string());
            }

            let args = DetectArgs {
                input: input.as_path(),
                output: output.as_deref(),
                geojson: geojson.as_deref(),
                config: detection_config,
            };

            // Load and processing errors end the run with a message and status 1
            if let Err(e) = detect(&args) {
                error!("{e:#}");
                eprintln!("Error processing image: {e:#}");
                std::process::exit(1);
            }
        }
        Commands::InitConfig { output } => {
            DetectionConfig::default().to_file(output)?;
            info!("📄 Configuration saved to: {:?}", output);
        }
        Commands::Commands => {
            print_commands()?;
        }
    }

    Ok(())
}

fn detect(args: &DetectArgs<'_>) -> Result<()> {
    info!("🔍 Detecting shapes in {:?}", args.input);

    let pipeline = args.config.pipeline();
    let report = ShapeDetector::new()
        .detect_with(args.input, &pipeline)
        .wrap_err_with(|| format!("Could not process {}", args.input.display()))?;

    let font = match &args.config.font {
        Some(path) => Some(load_font(path).wrap_err_with(|| format!("Could not load font {path}"))?),
        None => None,
    };

    let annotated = annotate(&report.image, &report.output, &args.config.style, font.as_ref());
    let output_path = args
        .output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| annotated_output_path(args.input));
    save_image(&annotated, &output_path)?;
    info!("🖼️  Annotated image saved to: {:?}", output_path);

    if let Some(geojson) = args.geojson {
        report.output.save_geojson(geojson)?;
        info!("📄 GeoJSON saved to: {:?}", geojson);
    }

    println!("{}", Legend::from_counts(&report.output.classification.counts));
    Ok(())
}

fn print_commands() -> Result<()> {
    println!("📋 Available commands:");
    for (i, name) in ShapeDetectorCommand::command_names().iter().enumerate() {
        println!("   {}. {}", i + 1, name);
    }

    println!("\n📋 JSON Schema for ShapeDetectorCommand:");
    println!("{}", serde_json::to_string_pretty(&ShapeDetectorCommand::schema())?);

    println!("\n📋 JSON Schema for the configuration file:");
    println!("{}", serde_json::to_string_pretty(&DetectionConfig::schema())?);
    Ok(())
}
