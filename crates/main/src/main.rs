use std::error::Error;
use std::path::PathBuf;

use boring_log::shell::{run_download, run_preview};
use boring_log::FormConfig;
use clap::{Parser, Subcommand};

/// Renders the BoreDM boring log form.
///
/// Fonts are looked up under `assets/fonts` next to the binary or in the
/// directory named by `BORING_LOG_FONTS_DIR`; a system sans-serif family is
/// used when neither holds the bundled Roboto files.
#[derive(Parser)]
#[command(author, version, about = "Boring log form renderer")]
struct Cli {
    /// JSON file with field values, metrics and the download file name.
    #[arg(long, global = true, env = "BORING_LOG_CONFIG")]
    config: Option<PathBuf>,

    /// Page padding in points, overriding the configuration.
    #[arg(long, global = true)]
    margin: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the HTML preview page and the PDF it links to.
    Preview {
        /// Where to write the page.
        #[arg(long, default_value = "preview.html")]
        out: PathBuf,
    },

    /// Render the PDF into a directory.
    #[command(aliases = ["pdf"])]
    Download {
        /// Directory receiving the PDF.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => FormConfig::from_path(path)?,
        None => FormConfig::default(),
    };
    if let Some(margin) = cli.margin {
        config = config.with_page_padding(margin);
        config.metrics.validate()?;
    }

    match cli.command {
        Commands::Preview { out } => {
            let pdf = run_preview(&config, &out)?;
            println!("Wrote {} and {}", out.display(), pdf.display());
        }
        Commands::Download { out_dir } => {
            let path = run_download(&config, &out_dir, |status| {
                log::info!("{}", status);
            })?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
