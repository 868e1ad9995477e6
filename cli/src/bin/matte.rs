use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use matte::{Base64Reporter, ColorPolicy, MatteSettings, OutputFormat, Predicate, StrategyKind};
use matte_cli::{load_settings, parse_channels, MatteJob, SettingsOverrides};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

/// Make the near-white background of an image transparent
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Image to read
    input_path: PathBuf,
    /// Where to write the transparent image
    output_path: PathBuf,
    /// Settings file (.toml or .json); flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Lower background bound as R,G,B
    #[arg(long, value_parser = parse_channels)]
    lower: Option<[i64; 3]>,
    /// Upper background bound as R,G,B
    #[arg(long, value_parser = parse_channels)]
    upper: Option<[i64; 3]>,
    /// Bound comparison: inclusive or strict
    #[arg(long)]
    predicate: Option<Predicate>,
    /// RGB of cleared pixels: preserve, white or black
    #[arg(long)]
    background_color: Option<ColorPolicy>,
    /// Traversal: scalar, masked or parallel
    #[arg(long)]
    strategy: Option<StrategyKind>,
    /// Output format (png or tiff); inferred from the output extension by default
    #[arg(short, long)]
    format: Option<OutputFormat>,
    /// Skip the base64 block on stdout
    #[arg(long)]
    no_base64: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => load_settings(path)
            .wrap_err_with(|| format!("Could not load settings from {}", path.display()))?,
        None => MatteSettings::default(),
    };
    SettingsOverrides {
        lower: cli.lower,
        upper: cli.upper,
        predicate: cli.predicate,
        background_color: cli.background_color,
        strategy: cli.strategy,
    }
    .apply_to(&mut settings);

    let mut job = MatteJob::new(&cli.input_path, &cli.output_path);
    job.settings = settings;
    if let Some(format) = cli.format {
        job.format = format;
    }

    let summary = job
        .run()
        .wrap_err_with(|| format!("Could not process {}", cli.input_path.display()))?;
    info!(
        "Processed {}x{} image, {} background pixels",
        summary.width, summary.height, summary.background_pixels
    );
    println!("Saved transparent image to {}", cli.output_path.display());

    if !cli.no_base64 {
        Base64Reporter::stdout()
            .emit_file(&cli.output_path)
            .wrap_err_with(|| format!("Could not read back {}", cli.output_path.display()))?;
    }

    Ok(())
}
