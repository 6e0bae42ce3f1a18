mod commands;
mod logger;
mod site;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use commands::feed::FeedFormat;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "garden")]
#[command(version, about = "Static site tooling for a personal blog and its RSS feed", long_about = None)]
struct Cli {
    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Initialize a new site directory
    Init {
        /// Path to create the site in
        path: PathBuf,

        /// Site title
        #[arg(long)]
        title: Option<String>,

        /// Site base URL, e.g. https://example.com
        #[arg(long)]
        url: Option<String>,
    },

    /// Validate configuration and content collections
    Validate {
        /// Path to site directory
        path: PathBuf,
    },

    /// Print the feed document to stdout
    Feed {
        /// Path to site directory
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = FeedFormat::Rss)]
        format: FeedFormat,
    },

    /// Build the static site
    Build {
        /// Path to site directory
        path: PathBuf,

        /// Output directory for generated site
        #[arg(short, long, default_value = "dist")]
        output: PathBuf,
    },

    /// Preview site locally with hot reload
    Preview {
        /// Path to site directory
        path: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "4321")]
        port: u16,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose);

    match cli.command {
        Command::Init { path, title, url } => commands::init::run(path, title, url).await,
        Command::Validate { path } => commands::validate::run(path).await,
        Command::Feed { path, format } => commands::feed::run(path, format).await,
        Command::Build { path, output } => commands::build::run(path, output).await,
        Command::Preview { path, port } => commands::preview::run(path, port).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "garden", &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_feed_format() {
        let cli = Cli::try_parse_from(["garden", "feed", "site", "--format", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Feed {
                format: FeedFormat::Json,
                ..
            }
        ));
    }

    #[test]
    fn test_build_output_default() {
        let cli = Cli::try_parse_from(["garden", "-v", "build", "site"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Build { output, .. } => assert_eq!(output, PathBuf::from("dist")),
            _ => panic!("expected build"),
        }
    }
}
