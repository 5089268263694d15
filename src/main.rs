use clap::{Parser, Subcommand};
use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use thumbcrop::config::{self, Overrides, ThumbsConfig};
use thumbcrop::{output, process};

#[derive(Parser)]
#[command(name = "thumbcrop")]
#[command(about = "Fixed-size, center-cropped thumbnails for a directory of images")]
#[command(long_about = "\
Fixed-size, center-cropped thumbnails for a directory of images

Every top-level file in the source directory that decodes as an image is
scaled to cover the target box and center-cropped to exactly that size.
Files that are not images are skipped.

  static/gallery/            static/gallery_thumb/
  ├── wide.jpg   800x400     ├── wide_thumb.jpeg    400x400
  ├── tall.jpg   400x800  →  ├── tall_thumb.jpeg    400x400
  ├── square.jpg 500x500     └── square_thumb.jpeg  400x400
  └── notes.txt  (skipped)

Settings come from thumbs.toml in the working directory (or --config),
and command-line flags override them.

Run 'thumbcrop gen-config' to generate a documented thumbs.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./thumbs.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Source image directory
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output directory
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Thumbnail width in pixels
    #[arg(long, global = true)]
    width: Option<u32>,

    /// Thumbnail height in pixels
    #[arg(long, global = true)]
    height: Option<u32>,

    /// Output format (JPEG, PNG, WEBP, ...); "" infers it from the file name
    #[arg(long, global = true)]
    format: Option<String>,

    /// Output name pattern using {name}, {stem} and {ext}
    #[arg(long, global = true)]
    name_template: Option<String>,

    /// Show skipped files and wait for Enter before exiting
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate thumbnails
    Generate,
    /// Show what would be generated without writing anything
    Plan,
    /// Print a stock thumbs.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate => {
            let spec = resolve_config(&cli)?.to_target_spec()?;
            let verbose = spec.verbose;
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_process_event(&event, verbose) {
                        println!("{}", line);
                    }
                }
            });
            let result = process::generate(&spec, Some(tx));
            printer
                .join()
                .map_err(|_| "progress printer thread panicked")?;
            let report = result?;
            println!();
            println!("{}", output::format_summary(&report));
            if verbose {
                wait_for_enter()?;
            }
        }
        Command::Plan => {
            let spec = resolve_config(&cli)?.to_target_spec()?;
            let planned = process::plan(&spec)?;
            output::print_plan(&planned);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config file and layer command-line flags on top.
fn resolve_config(cli: &Cli) -> Result<ThumbsConfig, config::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(Path::new("."))?,
    };
    config.apply_overrides(Overrides {
        source_dir: cli.source.clone(),
        output_dir: cli.output.clone(),
        width: cli.width,
        height: cli.height,
        format: cli.format.clone(),
        name_template: cli.name_template.clone(),
        verbose: cli.verbose,
    });
    Ok(config)
}

/// Hold the terminal open so skipped files can be reviewed.
///
/// Without a terminal on stdin there is nobody to press Enter.
fn wait_for_enter() -> std::io::Result<()> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        log::info!("done; stdin is not a terminal, not pausing");
        return Ok(());
    }
    print!("Done! Press enter to terminate...");
    std::io::stdout().flush()?;
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(())
}
