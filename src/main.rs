use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process;

use dialer::config::{resolve_request, RequestOverrides};
use dialer::core::validate_request;
use dialer::logging;
use dialer::render::{render_json, render_text};
use dialer::{build_plan, DialerError};

#[derive(Parser)]
#[command(name = "dialer")]
#[command(version = "0.1.0")]
#[command(about = "Dialer - Windows installation plan generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, help = "Enable verbose output", global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Validate a request and print its installation plan")]
    Plan {
        #[command(flatten)]
        request: RequestArgs,

        #[arg(long, help = "Print the plan as JSON")]
        json: bool,
    },

    #[command(about = "Validate a request without planning")]
    Validate {
        #[command(flatten)]
        request: RequestArgs,
    },
}

#[derive(Args)]
struct RequestArgs {
    #[arg(short, long, help = "JSON request file")]
    file: Option<PathBuf>,

    #[arg(long = "os", help = "Target operating system")]
    operating_system: Option<String>,

    #[arg(long, help = "Product to install (ODS or CCS)")]
    product: Option<String>,

    #[arg(long, help = "Desired state (only 'installed' is supported)")]
    ensure: Option<String>,

    #[arg(long, help = "Product version")]
    product_version: Option<String>,

    #[arg(long, help = "SQL Server hosting the CCS database")]
    ccs_server_name: Option<String>,

    #[arg(long, help = "Path to the installation ISO")]
    iso_path: Option<String>,

    #[arg(long, help = "Drive letter to mount the ISO on")]
    drive_letter: Option<char>,

    #[arg(long, help = "CCS database name")]
    database_name: Option<String>,

    #[arg(long, help = "CCS connection file path")]
    connection_file: Option<String>,
}

impl RequestArgs {
    fn split(self) -> (Option<PathBuf>, RequestOverrides) {
        let overrides = RequestOverrides {
            operating_system: self.operating_system,
            product: self.product,
            ensure: self.ensure,
            version: self.product_version,
            ccs_server_name: self.ccs_server_name,
            iso_path: self.iso_path,
            drive_letter: self.drive_letter,
            database_name: self.database_name,
            connection_file: self.connection_file,
        };
        (self.file, overrides)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        eprintln!("{}", "Verbose mode enabled".dimmed());
    }
    logging::init_logging(cli.verbose)?;
    logging::log_system_info();

    let outcome = match cli.command {
        Commands::Plan { request, json } => plan(request, json),
        Commands::Validate { request } => validate(request),
    };

    if let Err(err) = outcome {
        eprint!("{err}");
        process::exit(1);
    }

    Ok(())
}

fn plan(args: RequestArgs, json: bool) -> Result<(), DialerError> {
    let (file, overrides) = args.split();
    let request = resolve_request(file.as_deref(), overrides)?;
    let plan = build_plan(&request)?;
    logging::log_plan_summary(&plan);

    if json {
        println!("{}", render_json(&plan, chrono::Utc::now())?);
    } else {
        print!("{}", render_text(&plan));
    }
    Ok(())
}

fn validate(args: RequestArgs) -> Result<(), DialerError> {
    let (file, overrides) = args.split();
    let request = resolve_request(file.as_deref(), overrides)?;
    let validated = validate_request(&request)?;

    println!(
        "{} Request is valid: {} {} ({})",
        "✓".green(),
        validated.product.as_str().cyan(),
        validated.version,
        validated.ensure
    );
    Ok(())
}
