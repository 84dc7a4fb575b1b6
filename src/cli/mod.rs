//! Command-line interface for search
//!
//! Parses arguments with clap, merges them over the layered configuration
//! and drives a [`SearchEngine`] with results on stdout and diagnostics on
//! stderr.

use std::fmt::Display;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use serde_json::{Value, json};
use tracing::debug;

use crate::config::SearchConfig;
use crate::engine::{OutputFormat, Printer, SearchEngine, SearchOptions};
use crate::error::ConfigError;

mod output;

pub use output::Output;

#[derive(Parser, Debug)]
#[command(
    name = "search",
    version = env!("CARGO_PKG_VERSION"),
    about = "Find files by type, date, size, name and content in a single pass",
    long_about = "Walks each PATH depth-first and prints every entry that passes all filters. \
                  Name patterns are combined with OR, content patterns with AND on each line. \
                  A leading '!' inverts a pattern. Patterns are case-insensitive regular \
                  expressions. With content patterns, matching lines are printed as path:line."
)]
pub struct Cli {
    /// Entry must be modified at or after DATE (YYYY[-MM[-DD[ HH[:MM[:SS[ ZONE]]]]]])
    #[arg(short, long, value_name = "DATE")]
    pub after: Option<String>,

    /// Entry must be modified at or before DATE
    #[arg(short, long, value_name = "DATE")]
    pub before: Option<String>,

    /// Line pattern; every one must match the same line (repeatable)
    #[arg(short = 'c', long = "content", value_name = "REGEX", allow_hyphen_values = true)]
    pub contents: Vec<String>,

    /// Pathname pattern; any one must match (repeatable)
    #[arg(short = 'n', long = "name", value_name = "REGEX", allow_hyphen_values = true)]
    pub names: Vec<String>,

    /// Minimum size, e.g. 512, 10K, 4Mi, 0x400
    #[arg(short, long, value_name = "SIZE")]
    pub size: Option<String>,

    /// Entry types: f (file), d (directory), or both
    #[arg(short = 't', long = "type", value_name = "TYPES")]
    pub types: Option<String>,

    /// Roots to search, walked in order [default: .]
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory", value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress logging and non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Treat a leading '!' as part of the regex
    #[arg(long)]
    pub no_negation: bool,

    /// Follow symbolic links
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Descend at most N levels below each root
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Skip entries excluded by .gitignore and .ignore files
    #[arg(long)]
    pub gitignore: bool,

    /// Skip hidden files and directories
    #[arg(long)]
    pub no_hidden: bool,

    /// Output format for results
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print a summary to stderr when done
    #[arg(long)]
    pub stats: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        // Change directory if specified
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("Failed to change directory to {}", dir.display()))?;
        }

        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose, self.quiet);

        let config = SearchConfig::load(self.config.as_deref(), Some(self.config_overrides()))
            .unwrap_or_else(|e| usage_error(e));
        debug!("Effective config: {:?}", config);

        let options = self.search_options(&config).unwrap_or_else(|e| usage_error(e));
        let roots = options
            .roots
            .iter()
            .map(|root| root.display().to_string())
            .collect::<Vec<_>>();
        output.verbose(&format!("Searching {}", roots.join(", ")));

        let engine = SearchEngine::new(options);
        let mut printer = Printer::new(io::stdout().lock(), config.output.format);

        match engine.run(&mut printer, |error| output.error(&error.to_string())) {
            Ok(stats) => {
                if config.output.stats {
                    output.stats(&stats);
                }
                Ok(())
            }
            Err(e) if e.is_broken_pipe() => {
                debug!("Output closed by reader, stopping");
                Ok(())
            }
            Err(e) => Err(e).context("Search aborted"),
        }
    }

    /// Settings given on the command line, shaped like [`SearchConfig`].
    /// Flags left at their defaults are omitted so lower layers still apply.
    fn config_overrides(&self) -> Value {
        let mut overrides = json!({});
        if self.no_negation {
            overrides["patterns"]["negation"] = json!(false);
        }
        if self.follow_symlinks {
            overrides["walk"]["follow_symlinks"] = json!(true);
        }
        if let Some(depth) = self.max_depth {
            overrides["walk"]["max_depth"] = json!(depth);
        }
        if self.gitignore {
            overrides["walk"]["gitignore"] = json!(true);
        }
        if self.no_hidden {
            overrides["walk"]["hidden"] = json!(false);
        }
        if let Some(format) = self.format {
            overrides["output"]["format"] = json!(format);
        }
        if self.stats {
            overrides["output"]["stats"] = json!(true);
        }
        overrides
    }

    /// Compile the search criteria. Fails on the first bad argument.
    pub fn search_options(&self, config: &SearchConfig) -> Result<SearchOptions, ConfigError> {
        let mut builder = SearchOptions::builder().negation(config.patterns.negation);

        for raw in &self.names {
            builder = builder.name_pattern(raw)?;
        }
        for raw in &self.contents {
            builder = builder.content_pattern(raw)?;
        }
        if let Some(types) = &self.types {
            builder = builder.types(types)?;
        }
        if let Some(after) = &self.after {
            builder = builder.after(after)?;
        }
        if let Some(before) = &self.before {
            builder = builder.before(before)?;
        }
        if let Some(size) = &self.size {
            builder = builder.min_size(size)?;
        }

        Ok(builder
            .roots(self.paths.iter().cloned())
            .walk(config.walk.clone())
            .build())
    }
}

/// Print the error with usage and exit with status 2
fn usage_error(error: impl Display) -> ! {
    Cli::command()
        .error(ErrorKind::ValueValidation, error)
        .exit()
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // Keep walker internals quiet unless everything was asked for
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("search").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_repeatable_patterns_keep_order() {
        let cli = parse(&["-n", "a", "--name", "b", "-c", "x", "-c", "!y", "src", "docs"]);
        assert_eq!(cli.names, ["a", "b"]);
        assert_eq!(cli.contents, ["x", "!y"]);
        assert_eq!(cli.paths, [PathBuf::from("src"), PathBuf::from("docs")]);
    }

    #[test]
    fn test_hyphen_leading_pattern() {
        let cli = parse(&["-c", "-v$"]);
        assert_eq!(cli.contents, ["-v$"]);
    }

    #[test]
    fn test_overrides_only_include_given_flags() {
        assert_eq!(parse(&[]).config_overrides(), json!({}));

        let cli = parse(&["--max-depth", "3", "--no-hidden", "--format", "json", "--no-negation"]);
        assert_eq!(
            cli.config_overrides(),
            json!({
                "patterns": { "negation": false },
                "walk": { "max_depth": 3, "hidden": false },
                "output": { "format": "json" },
            })
        );
    }

    #[test]
    fn test_search_options_from_flags() {
        let cli = parse(&["-n", r"\.rs$", "-t", "f", "-s", "1Ki", "-a", "2024", "lib"]);
        let options = cli.search_options(&SearchConfig::default()).unwrap();

        assert_eq!(options.names.len(), 1);
        assert!(options.contents.is_empty());
        assert_eq!(options.metadata.min_size, Some(1024));
        assert!(options.metadata.after.is_some());
        assert!(options.metadata.before.is_none());
        assert_eq!(options.roots, [PathBuf::from("lib")]);
    }

    #[test]
    fn test_search_options_default_root() {
        let options = parse(&[]).search_options(&SearchConfig::default()).unwrap();
        assert_eq!(options.roots, [PathBuf::from(".")]);
    }

    #[test]
    fn test_negation_follows_config() {
        let mut config = SearchConfig::default();
        config.patterns.negation = false;

        // '!' is a literal character now, and still a valid regex
        let options = parse(&["-n", "!x"]).search_options(&config).unwrap();
        assert!(options.names.matches(b"./!x"));
        assert!(!options.names.matches(b"./y"));
    }

    #[test]
    fn test_bad_arguments_are_config_errors() {
        let config = SearchConfig::default();
        assert!(matches!(
            parse(&["-n", "("]).search_options(&config),
            Err(ConfigError::InvalidRegex { .. })
        ));
        assert!(matches!(
            parse(&["-a", "yesterday"]).search_options(&config),
            Err(ConfigError::InvalidDate(_))
        ));
        assert!(matches!(
            parse(&["-s", "12Q"]).search_options(&config),
            Err(ConfigError::InvalidSize { .. })
        ));
        assert!(matches!(
            parse(&["-t", "x"]).search_options(&config),
            Err(ConfigError::InvalidType(_))
        ));
    }
}
