use clap::{Parser, Subcommand};
use img_preview::metadata::MetadataReader;
use img_preview::{config, output, scan};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("IMG_PREVIEW_ON_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("IMG_PREVIEW_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "img-preview")]
#[command(about = "List images in a directory tree with their pixel dimensions")]
#[command(long_about = "\
List images in a directory tree with their pixel dimensions

Dimensions are read from file headers only (the first 64 KiB by default),
so large images cost no more than small ones.

Supported: .png .jpg .jpeg .gif .bmp .webp (sized) and .svg (tagged only).
Hidden directories and node_modules are skipped.

Configuration is read from img-preview.toml in the scanned directory.
Run 'img-preview gen-config' to print a documented default.

Set RUST_LOG=img_preview=debug to see which files fell back to content
sniffing or could not be read.")]
#[command(version = version_string())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a directory and list every image with its dimensions
    List {
        /// Directory to scan
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
        /// Bytes read from the start of each file (overrides config)
        #[arg(long)]
        window_size: Option<usize>,
    },
    /// Report the dimensions of individual files
    Info {
        /// Files to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Bytes read from the start of each file
        #[arg(long)]
        window_size: Option<usize>,
    },
    /// Print a stock img-preview.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::List {
            dir,
            json,
            window_size,
        } => {
            let mut scan_config = config::load_config(&dir)?;
            if let Some(n) = window_size {
                scan_config.window_size = n;
            }
            scan_config.validate()?;

            let listing = scan::list(&dir, &scan_config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                output::print_listing(&listing);
            }
        }
        Command::Info {
            files,
            json,
            window_size,
        } => {
            let mut reader = MetadataReader::new();
            if let Some(n) = window_size {
                if n == 0 {
                    return Err("--window-size must be greater than 0".into());
                }
                reader = reader.window_size(n);
            }

            let dims = reader.dimensions_all(&files);
            let results: Vec<_> = files.into_iter().zip(dims).collect();
            if json {
                let entries: Vec<_> = results
                    .iter()
                    .map(|(path, d)| {
                        serde_json::json!({
                            "path": path,
                            "width": d.width(),
                            "height": d.height(),
                            "format": d.format(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                output::print_info(&results);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default: info for this crate).
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("img_preview=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
