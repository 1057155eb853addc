//! shlforge CLI - Build entry point for release scripts
//!
//! Commands: template, validate, build, render
//! Outputs JSON to stdout (render prints the artifact itself)
//! Logs go to stderr
//! Returns 2 on validation failure, 1 on any other error

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use shlforge_core::{
    AmalgamationPipeline, AmalgamationRequest, BuildDate, HeaderTemplate, PipelineError,
    SourcePaths, SourceSet,
};

#[derive(Parser)]
#[command(name = "shlforge-cli", version)]
#[command(about = "shlforge CLI - Single-header library amalgamator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Header template JSON (defaults are derived from the input file names)
    #[arg(short, long, global = true)]
    template: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct Inputs {
    /// Public header (declarations)
    #[arg(long, default_value = "include/embedded_cli.h")]
    header: PathBuf,

    /// Implementation source
    #[arg(long, default_value = "src/embedded_cli.c")]
    source: PathBuf,

    /// License text embedded in the banner
    #[arg(long, default_value = "../LICENSE.txt")]
    license: PathBuf,
}

impl Inputs {
    fn paths(&self) -> SourcePaths {
        SourcePaths {
            header: self.header.clone(),
            source: self.source.clone(),
            license: self.license.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective header template
    Template {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Validate the template against the inputs
    Validate {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Build the single-header artifact
    Build {
        #[command(flatten)]
        inputs: Inputs,

        /// Destination of the artifact
        #[arg(short, long, default_value = "shl/embedded_cli.h")]
        output: PathBuf,

        /// Build date (YYYY-MM-DD), today if omitted
        #[arg(long)]
        date: Option<BuildDate>,
    },

    /// Print the artifact to stdout without writing it
    Render {
        #[command(flatten)]
        inputs: Inputs,

        /// Build date (YYYY-MM-DD), today if omitted
        #[arg(long)]
        date: Option<BuildDate>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let inputs = match &cli.command {
        Commands::Template { inputs }
        | Commands::Validate { inputs }
        | Commands::Build { inputs, .. }
        | Commands::Render { inputs, .. } => inputs,
    };

    let template = match load_template(cli.template.as_deref(), &inputs.paths()) {
        Ok(t) => t,
        Err(e) => {
            print_json(&serde_json::json!({ "success": false, "error": e }));
            return ExitCode::FAILURE;
        }
    };

    let pipeline = AmalgamationPipeline::new(template);

    match cli.command {
        Commands::Template { .. } => print_json(pipeline.template()),

        Commands::Validate { inputs } => {
            let sources = match SourceSet::load(&inputs.paths()) {
                Ok(s) => s,
                Err(e) => {
                    print_json(&serde_json::json!({ "valid": false, "error": e.to_string() }));
                    return ExitCode::FAILURE;
                }
            };

            match pipeline.validate(&sources) {
                Ok(result) if result.valid => print_json(&result),
                Ok(result) => {
                    print_json(&result);
                    ExitCode::from(2)  // Validation failure
                }
                Err(e) => {
                    print_json(&serde_json::json!({ "valid": false, "error": e.to_string() }));
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Build { inputs, output, date } => {
            let date = date.unwrap_or_else(BuildDate::today);

            match pipeline.build(&inputs.paths(), &output, date) {
                Ok(amalgamation) => print_json(&serde_json::json!({
                    "success": true,
                    "output": output.display().to_string(),
                    "amalgamation": amalgamation,
                })),
                Err(e) => {
                    print_json(&serde_json::json!({ "success": false, "error": e.to_string() }));
                    failure_code(&e)
                }
            }
        }

        Commands::Render { inputs, date } => {
            let sources = match SourceSet::load(&inputs.paths()) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{}", e);
                    return ExitCode::FAILURE;
                }
            };
            let request = AmalgamationRequest {
                sources,
                date: date.unwrap_or_else(BuildDate::today),
            };

            match pipeline.assemble(&request) {
                Ok(amalgamation) => {
                    print!("{}", amalgamation.text);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("{}", e);
                    failure_code(&e)
                }
            }
        }
    }
}

fn load_template(path: Option<&Path>, inputs: &SourcePaths) -> Result<HeaderTemplate, String> {
    match path {
        Some(p) => HeaderTemplate::load_from_file(p).map_err(|e| e.to_string()),
        None => Ok(HeaderTemplate::for_header(&inputs.header_name(), &inputs.source_name())),
    }
}

fn failure_code(err: &PipelineError) -> ExitCode {
    match err {
        PipelineError::ValidationFailed(_) => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{}", s);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            ExitCode::FAILURE
        }
    }
}
