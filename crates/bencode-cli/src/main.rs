//! Command-line front end: decode bencoded literals to JSON and print the
//! derived fields of torrent files. All failure reporting lives here; the
//! library itself never prints.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use bencode::{Metainfo, Value, decode};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect bencoded data and torrent files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a bencoded value and print it as JSON
    Decode {
        /// The bencoded value, e.g. "d3:foo3:bare"
        value: String,
    },
    /// Print the derived fields of a torrent file
    Info {
        /// Path to the torrent file
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Decode { value } => {
            let decoded = decode(value.as_bytes()).context("failed to decode value")?;
            println!("{}", to_json(&decoded));
        }
        Command::Info { path } => {
            let buf = fs::read(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let meta = Metainfo::from_bytes(&buf).context("failed to parse torrent")?;
            println!("Tracker URL: {}", meta.announce);
            println!("Length: {}", meta.total_length());
            println!("Info Hash: {}", meta.info_hash);
            println!("Piece Length: {}", meta.piece_length);
            println!("Piece Hashes:");
            for piece in &meta.pieces {
                println!("{}", hex::encode(piece));
            }
        }
    }
    Ok(())
}

/// Renders a decoded value as JSON, decoding byte strings lossily. Non-text
/// bytes become replacement characters; the torrent convention keys are
/// ASCII so this only affects binary payloads the caller asked to see.
fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Integer(i) => serde_json::Value::from(*i),
        Value::Bytes(bytes) => {
            serde_json::Value::from(String::from_utf8_lossy(bytes).into_owned())
        }
        Value::List(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Dict(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(key, item)| (String::from_utf8_lossy(key).into_owned(), to_json(item)))
                .collect(),
        ),
    }
}
