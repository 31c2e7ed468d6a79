use clap::Parser;
use configstack::cli::format;
use configstack::cli::{Cli, Commands, OutputFormat};
use configstack::{loader, scan};
use std::fmt::Display;
use std::process;

fn fail(e: impl Display) -> ! {
    eprintln!("\x1b[31merror\x1b[0m: {}", e);
    process::exit(2);
}

fn main() {
    let cli = Cli::parse();
    configstack::init_tracing(cli.verbose);

    match cli.command {
        Commands::Lint {
            config,
            file,
            format: output_format,
        } => {
            let loaded = loader::load(&config).unwrap_or_else(|e| fail(e));

            let Some(file) = file else {
                match output_format {
                    OutputFormat::Pretty => format::print_lint_pretty(&loaded.lint),
                    OutputFormat::Json => format::print_lint_json(&loaded.lint),
                }
                return;
            };

            let file = scan::relative_to_root(&scan::project_root(&config), &file);
            match loaded.lint.config_for_file(&file) {
                Some(file_config) => match output_format {
                    OutputFormat::Pretty => format::print_file_pretty(&file, &file_config),
                    OutputFormat::Json => format::print_file_json(&file, &file_config),
                },
                None => {
                    eprintln!("{} is ignored by the configuration", file.display());
                    process::exit(1);
                }
            }
        }
        Commands::Theme {
            config,
            format: output_format,
        } => {
            let loaded = loader::load(&config).unwrap_or_else(|e| fail(e));
            match output_format {
                OutputFormat::Pretty => format::print_theme_pretty(&loaded.theme),
                OutputFormat::Json => format::print_theme_json(&loaded.theme),
            }
        }
        Commands::Files {
            paths,
            config,
            format: output_format,
        } => {
            let result = scan::resolve_files(&config, &paths).unwrap_or_else(|e| fail(e));
            match output_format {
                OutputFormat::Pretty => format::print_files_pretty(&result),
                OutputFormat::Json => format::print_files_json(&result),
            }
        }
        Commands::Content { config, root } => {
            let files = scan::content_files(&config, &root).unwrap_or_else(|e| fail(e));
            format::print_content(&files);
        }
    }
}
