use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use permfrost::config::Config;
use permfrost::flags::Flagger;
use permfrost::output::OutputFormat;
use permfrost::AuditOptions;

#[derive(Parser)]
#[command(
    name = "permfrost",
    about = "Audit IAM roles for risky permissions with no recorded recent use",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a collected role snapshot
    Audit {
        /// Path to the role snapshot JSON produced by the collector
        path: PathBuf,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json, markdown)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// How many roles to highlight in the summary
        #[arg(long)]
        top: Option<usize>,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List the built-in risk flags
    ListFlags {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .permfrost.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Audit {
            path,
            config,
            format,
            top,
            output,
        } => cmd_audit(path, config, format, top, output),
        Commands::ListFlags { format } => cmd_list_flags(format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn cmd_audit(
    path: PathBuf,
    config: Option<PathBuf>,
    format_str: String,
    top: Option<usize>,
    output_path: Option<PathBuf>,
) -> Result<i32, permfrost::error::AuditError> {
    let format = OutputFormat::from_str_lenient(&format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using console", format_str);
        OutputFormat::Console
    });

    let options = AuditOptions {
        config_path: config,
        format,
        top_override: top,
    };

    let report = permfrost::audit(&path, &options)?;
    let rendered = permfrost::render_report(&report, format)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    // Exit code: 0 = nothing flagged, 1 = unused risky permissions found
    Ok(if report.report.is_empty() { 0 } else { 1 })
}

fn cmd_list_flags(format_str: String) -> Result<i32, permfrost::error::AuditError> {
    let flagger = Flagger::new();
    let flags = flagger.list_flags();

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&flags)?;
            println!("{}", json);
        }
        _ => {
            println!("{:<20} {:<20} {:<8} DESCRIPTION", "FLAG", "NAME", "WEIGHT");
            println!("{}", "-".repeat(80));
            for flag in &flags {
                println!(
                    "{:<20} {:<20} {:<8} {}",
                    flag.flag.to_string(),
                    flag.name,
                    flag.weight,
                    flag.description,
                );
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, permfrost::error::AuditError> {
    let path = PathBuf::from(".permfrost.toml");

    if path.exists() && !force {
        eprintln!(".permfrost.toml already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created .permfrost.toml");

    Ok(0)
}
