use chrono::Local;
use clap::{Parser, Subcommand};
use simple_press::{commands, config::SiteConfig, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simple-press")]
#[command(about = "Static site builder for markdown blogs")]
#[command(long_about = "\
Static site builder for markdown blogs

Markdown documents become HTML pages through a shared hand-authored
template; a JSON sidecar tracks each post's creation date and template
version so re-renders never change publication dates.

Site structure:

  .
  ├── press.toml                   # Site config (optional, all defaults)
  ├── index.html                   # Site index (must contain a .post-list element)
  ├── post-data.json               # Per-post metadata (managed by simple-press)
  ├── src/
  │   ├── hello-world.md           # Source documents; filename stem = slug
  │   └── second-post.md
  └── posts/
      ├── _template.html           # Shared template (.post-title, .post-date, .post-content)
      ├── hello-world.html         # Generated pages
      └── second-post.html

A build converts sources with no generated page (new posts, added to the
index) and sources whose recorded version lags the global version (stale
posts, dates preserved). Bump the global version with 'simple-press
version' after changing the template, then rebuild.")]
#[command(version)]
struct Cli {
    /// Site root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Convert new and stale sources into posts (default)
    Build {
        /// Re-render existing posts even when their version is current
        #[arg(long, short)]
        force: bool,
    },
    /// Set the global version, marking posts rendered before it as stale
    Version {
        /// New version string, e.g. 1.2.0
        new_version: String,
    },
    /// Re-render every post in place: dates preserved, index untouched
    Regenerate,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = SiteConfig::load(&cli.root)?;
    let paths = config.resolve(&cli.root);
    let today = Local::now().date_naive();

    match cli.command.unwrap_or(Command::Build { force: false }) {
        Command::Build { force } => {
            let report = commands::build(&config, &paths, force, today)?;
            output::print_build_output(&report, &cli.root);
        }
        Command::Version { new_version } => {
            let changed = commands::set_version(&paths, &new_version)?;
            output::print_version_output(changed, &new_version);
        }
        Command::Regenerate => {
            let report = commands::regenerate(&config, &paths, today)?;
            output::print_regenerate_output(&report, &cli.root);
        }
    }

    Ok(())
}
