pub mod format;
pub mod toml_config;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "configstack", version, about = "Compose layered lint and theme configuration")]
pub struct Cli {
    /// Log composition details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the effective lint configuration
    Lint {
        #[arg(short, long, default_value = "configstack.toml")]
        config: PathBuf,

        /// Resolve the configuration for this file instead
        #[arg(long)]
        file: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "pretty")]
        format: OutputFormat,
    },
    /// Print the effective theme token table
    Theme {
        #[arg(short, long, default_value = "configstack.toml")]
        config: PathBuf,

        #[arg(long, value_enum, default_value = "pretty")]
        format: OutputFormat,
    },
    /// Resolve every file under the given paths
    Files {
        /// Files or directories to resolve
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        #[arg(short, long, default_value = "configstack.toml")]
        config: PathBuf,

        #[arg(long, value_enum, default_value = "pretty")]
        format: OutputFormat,
    },
    /// List the files matched by the theme content globs
    Content {
        #[arg(short, long, default_value = "configstack.toml")]
        config: PathBuf,

        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lint_with_file() {
        let cli = Cli::try_parse_from(["configstack", "lint", "--file", "src/App.vue", "--format", "json"]).unwrap();
        match cli.command {
            Commands::Lint { config, file, format } => {
                assert_eq!(config, PathBuf::from("configstack.toml"));
                assert_eq!(file, Some(PathBuf::from("src/App.vue")));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn files_defaults_to_cwd() {
        let cli = Cli::try_parse_from(["configstack", "-v", "files"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Files { paths, .. } => assert_eq!(paths, [PathBuf::from(".")]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["configstack", "theme", "--format", "yaml"]).is_err());
    }
}
