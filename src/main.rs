use clap::{Parser, Subcommand};
use embedder::sizing::{NaturalSize, SizeProfile};
use embedder::{asset_url, config, export, output, photo, sizing, template};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shared flags for commands that read the export configuration.
#[derive(clap::Args, Clone)]
struct ConfigArgs {
    /// Directory containing embedder.toml
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,

    /// Read the template from this file instead of the config
    #[arg(long)]
    template: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "embedder")]
#[command(about = "Generate HTML embed code for hosted photos")]
#[command(long_about = "\
Generate HTML embed code for hosted photos

Each selected photo is sized twice (small and large) against the host's
resize URL scheme and then run through a template. Placeholders such as
$TITLE, $SAFE_DESCRIPTION, $SMALL_URL or $LARGE_WIDTH are replaced with
the photo's values; missing metadata becomes an empty string.

Photos are read from a JSON array of flat records:

  [{\"title\": \"Harbor\", \"width\": 1200, \"height\": 800,
    \"thumbnail_url\": \"https://host.example/a/b/s72/harbor.jpg\"}]

Run 'embedder gen-config' to generate a documented embedder.toml.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render embed code for every photo in a JSON file
    Export {
        /// JSON array of photo records, in selection order
        #[arg(long)]
        photos: PathBuf,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Show display size and resize code for one photo and profile
    Plan {
        /// Natural width of the photo
        #[arg(long)]
        width: u32,
        /// Natural height of the photo
        #[arg(long)]
        height: u32,
        #[arg(long)]
        max_width: Option<u32>,
        #[arg(long)]
        max_height: Option<u32>,
        /// Pixel density multiplier for the fetched image
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
        /// Crop to the exact box (needs both bounds)
        #[arg(long)]
        crop: bool,
        /// Thumbnail URL to rewrite with the resize code
        #[arg(long)]
        url: Option<String>,
    },
    /// Validate configuration and list the placeholders the template uses
    Check(ConfigArgs),
    /// Print a stock embedder.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Export { photos, config } => {
            let embed_config = load_config(&config)?;
            init_thread_pool(&embed_config.processing);
            let selection = photo::load_photos(&photos)?;
            let report = export::export(&selection, &embed_config);
            print!("{}", report.html);
            output::print_export_summary(&report);
        }
        Command::Plan {
            width,
            height,
            max_width,
            max_height,
            scale,
            crop,
            url,
        } => {
            let profile = SizeProfile {
                crop,
                scale,
                max_width,
                max_height,
            };
            config::validate_profile("plan", &profile)?;
            let natural = NaturalSize::new(width, height);
            let result = sizing::plan(&profile, natural)?;
            let resized = url
                .as_deref()
                .map(|u| asset_url::resized_or_original(u, &result.resize_code.to_string()));
            output::print_plan(natural, &result, resized.as_deref());
        }
        Command::Check(config) => {
            let embed_config = load_config(&config)?;
            let used = template::Expander::shared().placeholders_in(&embed_config.template);
            output::print_check(&embed_config, &used);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr so stdout carries only generated output.
///
/// Level comes from `RUST_LOG`, defaulting to warnings.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Layer stock defaults, `embedder.toml`, then `--template`.
fn load_config(args: &ConfigArgs) -> Result<config::EmbedConfig, Box<dyn std::error::Error>> {
    let mut overlays = Vec::new();
    if let Some(file) = config::load_raw_config(&args.config_dir)? {
        overlays.push(file);
    }
    if let Some(path) = &args.template {
        overlays.push(config::template_overlay(&std::fs::read_to_string(path)?));
    }
    Ok(config::resolve_config(
        config::stock_defaults_value(),
        overlays,
    )?)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
