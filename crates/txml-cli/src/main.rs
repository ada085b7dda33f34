//! `txml` CLI — convert between JSON and typed XML from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Encode JSON to typed XML (stdin → stdout)
//! echo '{"name":"Alice","age":30}' | txml encode
//!
//! # Encode from file to file, single line, no declaration
//! txml encode -i data.json -o data.xml --compact --no-declaration
//!
//! # Encode for a Latin-1 consumer
//! txml encode -i data.json --encoding iso-8859-1
//!
//! # Decode typed XML back to pretty-printed JSON
//! txml decode -i data.xml
//!
//! # Validate a document without converting it
//! txml check -i data.xml
//!
//! # Compare JSON and XML sizes
//! txml stats -i data.json
//! ```
//!
//! Set `RUST_LOG` (or pass `-v`) to see what the tool is doing on stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read, Write};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use txml_core::{DecodeOptions, DuplicateKeyPolicy, EncodeOptions, Value};

#[derive(Parser)]
#[command(name = "txml", version, about = "Typed XML ⇄ JSON converter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode JSON to typed XML
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Write everything on one line
        #[arg(long)]
        compact: bool,
        /// Omit the `<?xml ...?>` declaration
        #[arg(long)]
        no_declaration: bool,
        /// Output character set (utf-8, us-ascii, iso-8859-1)
        #[arg(long, default_value = "utf-8")]
        encoding: String,
    },
    /// Decode typed XML to JSON
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[command(flatten)]
        decode: DecodeArgs,
    },
    /// Check that a typed XML document decodes cleanly
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[command(flatten)]
        decode: DecodeArgs,
    },
    /// Show the size of a JSON document and of its typed XML encodings
    Stats {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(clap::Args)]
struct DecodeArgs {
    /// Maximum element nesting depth
    #[arg(long, default_value_t = txml_core::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Fail on duplicate object keys instead of keeping the last one
    #[arg(long)]
    reject_duplicate_keys: bool,
}

impl DecodeArgs {
    fn options(&self) -> DecodeOptions {
        let policy = if self.reject_duplicate_keys {
            DuplicateKeyPolicy::Reject
        } else {
            txml_core::DEFAULT_DUPLICATE_KEY_POLICY
        };
        DecodeOptions::default()
            .with_max_depth(self.max_depth)
            .with_duplicate_keys(policy)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Encode {
            input,
            output,
            compact,
            no_declaration,
            encoding,
        } => {
            let options = EncodeOptions::default()
                .with_pretty(!compact)
                .with_declaration(!no_declaration)
                .with_encoding(&encoding)?;
            debug!(?options, "encoding JSON to typed XML");

            let json = read_input(input.as_deref())?;
            let value = parse_json(&json)?;
            let xml = txml_core::encode_to_text(&value, &options);
            info!(json_bytes = json.len(), xml_bytes = xml.len(), "encoded");
            write_output(output.as_deref(), &xml)?;
        }
        Commands::Decode {
            input,
            output,
            decode,
        } => {
            let options = decode.options();
            debug!(?options, "decoding typed XML to JSON");

            let xml = read_input(input.as_deref())?;
            let value = txml_core::decode_from_text_with(&xml, &options)
                .context("Failed to decode typed XML")?;
            let mut json = serde_json::to_string_pretty(&value)?;
            json.push('\n');
            info!(xml_bytes = xml.len(), json_bytes = json.len(), "decoded");
            write_output(output.as_deref(), json.as_bytes())?;
        }
        Commands::Check { input, decode } => {
            let xml = read_input(input.as_deref())?;
            let value = txml_core::decode_from_text_with(&xml, &decode.options())
                .context("Document is not valid typed XML")?;
            println!("ok: root is {}", value.type_tag());
        }
        Commands::Stats { input } => {
            let json = read_input(input.as_deref())?;
            let value = parse_json(&json)?;
            let compact = txml_core::encode_to_text(&value, &EncodeOptions::compact());
            let pretty = txml_core::encode_to_text(&value, &EncodeOptions::default());
            let ratio = if json.is_empty() {
                0.0
            } else {
                compact.len() as f64 / json.len() as f64
            };
            println!("JSON size:         {} bytes", json.len());
            println!("XML size:          {} bytes", compact.len());
            println!("XML size (pretty): {} bytes", pretty.len());
            println!("Expansion:         {:.2}x", ratio);
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_json(json: &[u8]) -> Result<Value> {
    serde_json::from_slice(json).context("Failed to parse JSON input")
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
