use clap::{Parser, Subcommand};
use docgen::{config, generate, output, scan, watch};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docgen")]
#[command(about = "Static documentation generator for a folder of markdown files")]
#[command(long_about = "\
Static documentation generator for a folder of markdown files

Every markdown file directly inside the source directory becomes one HTML
page, rendered into a shared template. An index page lists all documents as
cards, grouped by section.

Source structure:

  docs/
  ├── getting-started.md           # Document → site/getting-started.html
  ├── colors.md                    # Document → site/colors.html
  ├── README.md                    # Skipped (README*)
  ├── generator/
  │   ├── template.html            # Page template with {{PLACEHOLDER}} slots
  │   └── assets/                  # Copied to site/assets/ if copy_assets = true
  └── site/                        # Output

Frontmatter (optional, between --- fences):
  title:        Page title (default: file name without .md)
  subtitle:     Shown under the title and on the index card
  description:  <meta name=\"description\">
  section:      Section group (default: uncategorized)
  order:        Position within the section (default: 999)

Run 'docgen gen-config' to generate a documented docgen.toml.")]
#[command(version)]
struct Cli {
    /// Config file (missing file → stock defaults)
    #[arg(long, default_value = config::CONFIG_FILE, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the site once
    #[command(alias = "generate")]
    Build,
    /// Generate the site, then regenerate on every change
    Watch,
    /// List the documents the build would render
    Scan {
        /// Print the scan manifest as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Print a stock docgen.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let config = config::load_config(&cli.config)?;
            println!(
                "==> Generating {} → {}",
                config.paths.source_dir.display(),
                config.paths.output_dir.display()
            );
            let report = generate::generate(&config)?;
            output::print_generate_output(&report);
            println!("==> Build complete: {}", report.output_dir.display());
        }
        Command::Watch => {
            let config = config::load_config(&cli.config)?;
            println!("==> Watching {}", config.paths.source_dir.display());
            watch::watch(&cli.config, config)?;
        }
        Command::Scan { json } => {
            let config = config::load_config(&cli.config)?;
            let manifest = scan::scan(&config.paths.source_dir, &config.site)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            } else {
                output::print_scan_output(&manifest, &config.site);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
