use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use contract_abi::config::{self, Config};
use contract_abi::infrastructure::{load_abi_file, AbiScanner};
use contract_abi::modules::export;
use contract_abi::modules::toolkit::{decode, encode, inspect, ToolResult};
use contract_abi::ValidationOptions;

#[derive(Debug, Parser)]
#[command(
    name = "contract-abi",
    version,
    about = "Validate contract ABIs and encode/decode SCALE call payloads"
)]
struct Args {
    /// Config file (defaults to $CONTRACT_ABI_CONFIG or ~/.config/contract-abi/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ignore unknown keys in ABI entries
    #[arg(long, global = true)]
    allow_unknown_keys: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate an ABI file
    Validate { abi: PathBuf },

    /// List deploy and message entries
    Messages {
        abi: PathBuf,

        /// Write the method table to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Encode a call payload
    Encode {
        abi: PathBuf,

        /// `deploy` or a message name (declared or camelCase)
        method: String,

        /// Positional arguments, as JSON or plain strings
        #[arg(allow_negative_numbers = true)]
        args: Vec<String>,

        /// Prefix the payload with its compact length
        #[arg(long)]
        prefixed: bool,
    },

    /// Decode a hex call payload
    Decode {
        abi: PathBuf,
        payload: String,

        /// Decode as a constructor call
        #[arg(long)]
        deploy: bool,

        /// Payload carries a compact length prefix
        #[arg(long)]
        prefixed: bool,

        /// Write the decoded call to a JSON file
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Find ABI files under the given directories (defaults to config `abi_paths`)
    Scan { roots: Vec<PathBuf> },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    };
    init_tracing(&config);

    let mut options = config.validation_options();
    options.allow_unknown_keys |= args.allow_unknown_keys;
    debug!(?options, "validation options");

    match args.command {
        Command::Validate { abi } => {
            let abi = load_abi_file(&abi, options)?;
            print(&inspect::summary(&abi));
        }
        Command::Messages { abi, csv } => {
            let abi = load_abi_file(&abi, options)?;
            print(&inspect::method_table(&abi));
            if let Some(path) = csv {
                let rows = export::write_methods(&path, &abi)?;
                info!(path = %path.display(), rows, "exported method table");
            }
        }
        Command::Encode {
            abi,
            method,
            args,
            prefixed,
        } => {
            let abi = load_abi_file(&abi, options)?;
            let prefixed = prefixed || config.length_prefix;
            let result = encode::encode_call(&abi, &method, &args, prefixed)?;
            print(&result);
        }
        Command::Decode {
            abi,
            payload,
            deploy,
            prefixed,
            json,
        } => {
            let abi = load_abi_file(&abi, options)?;
            let prefixed = prefixed || config.length_prefix;
            let call = decode::decode_payload(&abi, &payload, deploy, prefixed)?;
            print(&decode::decoded_result(&call));
            if let Some(path) = json {
                export::write_decoded(&path, &call)?;
                info!(path = %path.display(), "exported decoded call");
            }
        }
        Command::Scan { roots } => {
            let roots = if roots.is_empty() {
                config.abi_roots()
            } else {
                roots
            };
            if roots.is_empty() {
                anyhow::bail!("no scan roots given and no abi_paths configured");
            }
            scan(&roots, options);
        }
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.log_level.as_deref().unwrap_or("warn");
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn scan(roots: &[PathBuf], options: ValidationOptions) {
    let report = AbiScanner::new(options).scan_roots(roots);

    let mut result = ToolResult::new(format!(
        "Scanned {} files in {}ms",
        report.scanned_files, report.scan_ms
    ));
    for found in &report.contracts {
        let name = found.abi.name().unwrap_or("<unnamed>");
        result = result.add(
            found.path.display().to_string(),
            format!("{} ({} messages)", name, found.abi.len()),
        );
    }
    print(&result);

    for err in &report.errors {
        eprintln!("error: {}", err);
    }
}

fn print(result: &ToolResult) {
    println!("{}", result.render());
}
