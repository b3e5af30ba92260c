use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Main CLI parser structure
#[derive(Parser)]
#[command(name = "docs-toc")]
#[command(about = "Adds a table of contents and heading anchors to rendered documentation pages", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Source directory (defaults to ./)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub source: Option<PathBuf>,

    /// Custom configuration file(s), merged in order
    #[arg(long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<Vec<PathBuf>>,

    /// Show the full backtrace when an error occurs
    #[arg(short, long, default_value_t = false, global = true)]
    pub trace: bool,

    /// Enable verbose debugging
    #[arg(short = 'g', long, default_value_t = false, global = true)]
    pub debug: bool,

    /// Silence everything but errors
    #[arg(short, long, default_value_t = false, global = true)]
    pub quiet: bool,
}

/// Subcommands for the CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Add the table of contents to every page of the site
    #[command(alias = "r")]
    Render {
        /// Destination directory (defaults to ./_site)
        #[arg(short, long, value_name = "DIR")]
        destination: Option<PathBuf>,

        /// Rewrite the source pages instead of writing to the destination
        #[arg(short = 'i', long, default_value_t = false)]
        in_place: bool,
    },

    /// Print the outline of a single page
    #[command(alias = "o")]
    Outline {
        /// Rendered page to read
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutlineFormat::Html)]
        format: OutlineFormat,
    },

    /// Inspect the effective configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value, e.g. `toc.minimumHeaders`
    Get {
        key: String,
    },
    /// Print the whole configuration
    List {},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutlineFormat {
    /// The markup written into the TOC container
    Html,
    /// A nested markdown list of links
    Markdown,
    /// The full plan: outline and per-heading augmentation
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_in_place() {
        let cli = Cli::parse_from(["docs-toc", "render", "--in-place", "-s", "site"]);
        assert_eq!(cli.source, Some(PathBuf::from("site")));
        match cli.command {
            Some(Commands::Render { in_place, destination }) => {
                assert!(in_place);
                assert!(destination.is_none());
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_parse_outline_format() {
        let cli = Cli::parse_from(["docs-toc", "outline", "page.html", "--format", "markdown"]);
        match cli.command {
            Some(Commands::Outline { file, format }) => {
                assert_eq!(file, PathBuf::from("page.html"));
                assert_eq!(format, OutlineFormat::Markdown);
            }
            _ => panic!("expected outline"),
        }
    }
}
