use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use cvgen_core::format::ExportFormat;
use cvgen_core::geometry::PageGeometry;
use cvgen_core::models::CvData;
use cvgen_export::persist::write_atomic;
use cvgen_export::surface::{ImageSurface, RenderableSurface};
use cvgen_export::{ExportRequest, Exporter};
use eyre::{Result, WrapErr};

use cvgen_cli::config::{self, CvgenConfig};

#[derive(Parser)]
#[command(name = "cvgen")]
#[command(version)]
#[command(about = "Export CVs as paginated image PDFs, DOCX or Markdown", long_about = None)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "CVGEN_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export one CV
    Export {
        /// CV data as JSON
        #[arg(long, value_name = "FILE")]
        cv: PathBuf,

        /// Rendered template image (PNG or JPEG); required for image-pdf
        #[arg(long, value_name = "FILE")]
        surface: Option<PathBuf>,

        /// image-pdf (pdf), structured (docx) or outline (md)
        #[arg(short, long, default_value_t = ExportFormat::ImagePdf)]
        format: ExportFormat,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Capture scale factor (>= 1)
        #[arg(long)]
        scale: Option<f32>,

        /// JPEG quality for embedded page images (1-100)
        #[arg(long)]
        quality: Option<u8>,

        #[arg(long, value_enum)]
        paper: Option<PaperArg>,
    },

    /// Show or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config
    Show,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    Letter,
}

impl From<PaperArg> for PageGeometry {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => PageGeometry::A4,
            PaperArg::Letter => PageGeometry::LETTER,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };

    match cli.command {
        Commands::Export {
            cv,
            surface,
            format,
            out,
            scale,
            quality,
            paper,
        } => {
            let mut config = config::load_config(&config_path)?;
            if let Some(scale) = scale {
                config.export.scale_factor = scale;
            }
            if let Some(quality) = quality {
                config.export.jpeg_quality = quality;
            }
            if let Some(paper) = paper {
                config.export.geometry = paper.into();
            }
            run_export(&config, &cv, surface.as_deref(), format, out).await
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let config = config::load_config(&config_path)?;
                println!("{}", serde_json::to_string_pretty(&config)?);
                Ok(())
            }
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    return Err(eyre::eyre!(
                        "{} already exists (use --force to overwrite)",
                        config_path.display()
                    ));
                }
                config::save_config(&config_path, &CvgenConfig::default())?;
                println!("{}", config_path.display());
                Ok(())
            }
        },
    }
}

async fn run_export(
    config: &CvgenConfig,
    cv_path: &Path,
    surface_path: Option<&Path>,
    format: ExportFormat,
    out: Option<PathBuf>,
) -> Result<()> {
    let json = std::fs::read_to_string(cv_path)
        .wrap_err_with(|| format!("failed to read CV data at {}", cv_path.display()))?;
    let data = CvData::from_json(&json)?;

    let surface = match surface_path {
        Some(path) if format.needs_surface() => Some(ImageSurface::open(path)?),
        Some(_) => {
            tracing::debug!(%format, "surface ignored for data-model export");
            None
        }
        None => None,
    };

    let mut exporter =
        Exporter::new(config.export.clone()).styles(config.styles.clone());
    if let Some(template_path) = &config.outline_template {
        let template = std::fs::read_to_string(template_path).wrap_err_with(|| {
            format!("failed to read outline template {}", template_path.display())
        })?;
        exporter = exporter.outline_template(template);
    }

    let request = ExportRequest {
        surface: surface.as_ref().map(|s| s as &dyn RenderableSurface),
        data: &data,
        format,
        // Access is gated by whoever invokes the CLI.
        can_export: true,
    };

    let document = match exporter.export(request).await {
        Ok(document) => document,
        Err(e) => {
            eprintln!("{}", e.user_message());
            if e.is_retryable() {
                eprintln!("This is usually temporary; run the export again.");
            }
            return Err(e.into());
        }
    };

    let dir = out
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let path = write_atomic(&dir, &document)?;
    println!("{}", path.display());
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
