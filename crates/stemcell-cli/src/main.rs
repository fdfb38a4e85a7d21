mod commands;

use clap::{Parser, Subcommand};
use commands::{EXIT_FAILURE, EXIT_MANIFEST_ERROR};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "stemcell",
    version,
    about = "Inspect, customize, and clean up extracted stemcells"
)]
struct Cli {
    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the manifest of an extracted stemcell.
    Inspect {
        /// Directory the stemcell was extracted into.
        dir: PathBuf,
    },
    /// Rename, re-version, or override cloud properties, then rewrite stemcell.MF.
    Repack {
        /// Directory the stemcell was extracted into.
        dir: PathBuf,
        /// New stemcell name.
        #[arg(long)]
        name: Option<String>,
        /// New stemcell version.
        #[arg(long)]
        version: Option<String>,
        /// YAML mapping merged into cloud_properties.
        #[arg(long)]
        cloud_properties: Option<String>,
        /// File holding a YAML mapping merged into cloud_properties (applied last).
        #[arg(long)]
        cloud_properties_file: Option<PathBuf>,
    },
    /// Remove an extracted stemcell directory.
    Delete {
        /// Directory the stemcell was extracted into.
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("STEMCELL_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let json_output = cli.json;
    let result = match cli.command {
        Commands::Inspect { dir } => commands::inspect::run(&dir, json_output),
        Commands::Repack {
            dir,
            name,
            version,
            cloud_properties,
            cloud_properties_file,
        } => commands::repack::run(
            &dir,
            &commands::repack::RepackOptions {
                name: name.as_deref(),
                version: version.as_deref(),
                cloud_properties: cloud_properties.as_deref(),
                cloud_properties_file: cloud_properties_file.as_deref(),
            },
            json_output,
        ),
        Commands::Delete { dir } => commands::delete::run(&dir, json_output),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            let code = if msg.starts_with("manifest error:") {
                EXIT_MANIFEST_ERROR
            } else {
                EXIT_FAILURE
            };
            ExitCode::from(code)
        }
    }
}
