//! Photobox CLI: countdown photo sessions and themed photo strips.
//!
//! Usage:
//!   photobox shoot [OPTIONS]          Take photos with the webcam and compose them
//!   photobox compose <IMAGES>...      Compose existing photos
//!   photobox geometry --count N       Print the layout geometry as JSON
//!   photobox themes                   List frame themes
//!   photobox check                    Check webcam and share support

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use photobox_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "photobox",
    about = "Countdown photo booth with themed collage frames",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a sequence of photos with the webcam and compose them
    Shoot {
        /// Number of photos (3, 4 or 5)
        #[arg(short, long)]
        count: Option<usize>,

        /// Frame theme: simple-white, simple-black, neon
        #[arg(long)]
        theme: Option<String>,

        /// Layout: natural-aspect-grid, fixed-ratio-grid, vertical-strip
        #[arg(long)]
        layout: Option<String>,

        /// V4L2 device (defaults to the best /dev/video* node)
        #[arg(long)]
        device: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Hand the result to the share command instead of only saving it
        #[arg(long)]
        share: bool,
    },

    /// Compose existing photos into one image
    Compose {
        /// Photos in display order
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Frame theme: simple-white, simple-black, neon
        #[arg(long)]
        theme: Option<String>,

        /// Layout: natural-aspect-grid, fixed-ratio-grid, vertical-strip
        #[arg(long)]
        layout: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Header title
        #[arg(long)]
        title: Option<String>,

        /// Footer date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
    },

    /// Print the layout geometry for a photo count
    Geometry {
        /// Number of photos
        #[arg(short, long)]
        count: usize,

        /// Layout: natural-aspect-grid, fixed-ratio-grid, vertical-strip
        #[arg(long, default_value = "natural-aspect-grid")]
        layout: String,

        /// Source aspect ratio (width / height)
        #[arg(long, default_value = "1.3333333333333333")]
        aspect: f64,
    },

    /// List frame themes
    Themes,

    /// Check webcam and share support
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load();
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    photobox_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Shoot {
            count,
            theme,
            layout,
            device,
            output,
            share,
        } => {
            commands::shoot::run(
                &config,
                commands::shoot::ShootArgs {
                    count,
                    theme,
                    layout,
                    device,
                    output,
                    share,
                },
            )
            .await
        }
        Commands::Compose {
            images,
            theme,
            layout,
            output,
            title,
            date,
        } => commands::compose::run(
            &config,
            commands::compose::ComposeArgs {
                images,
                theme,
                layout,
                output,
                title,
                date,
            },
        ),
        Commands::Geometry {
            count,
            layout,
            aspect,
        } => commands::geometry::run(count, &layout, aspect),
        Commands::Themes => commands::themes::run(),
        Commands::Check => commands::check::run(&config),
    }
}
