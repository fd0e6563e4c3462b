//! rowpack CLI - Command-line tool for columnar JSON packing
//!
//! This binary provides command-line interfaces for:
//! - pack: JSON records -> packed JSON text
//! - unpack: packed JSON text -> records
//! - compress: JSON records -> gzip transport payload
//! - decompress: gzip transport payload -> records
//! - size: report raw/packed/compressed byte sizes

use clap::{Parser, Subcommand};
use rowpack_io::{ByteSize, Compression, Pipeline, Schema};
use serde_json::Value;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rowpack")]
#[command(about = "Columnar packing for homogeneous JSON record arrays")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack a JSON file into its columnar form
    Pack {
        /// Input file (JSON array of records, or any document with --schema)
        input: PathBuf,
        /// Output file (packed JSON text)
        #[arg(short, long)]
        output: PathBuf,
        /// Dot-path to a record array inside the document (repeatable)
        #[arg(long = "schema", value_name = "PATH")]
        schema: Vec<String>,
    },
    /// Unpack a packed JSON file back into records
    Unpack {
        /// Input file (packed JSON text)
        input: PathBuf,
        /// Output file (JSON records)
        #[arg(short, long)]
        output: PathBuf,
        /// Dot-paths used when the file was packed, in the same order
        #[arg(long = "schema", value_name = "PATH")]
        schema: Vec<String>,
    },
    /// Pack and gzip a JSON file into a transport payload
    Compress {
        /// Input file (JSON)
        input: PathBuf,
        /// Output file (gzip payload)
        #[arg(short, long)]
        output: PathBuf,
        /// Dot-path to a record array inside the document (repeatable)
        #[arg(long = "schema", value_name = "PATH")]
        schema: Vec<String>,
        /// Gzip compression level (0-9)
        #[arg(long, default_value = "6", value_parser = clap::value_parser!(u32).range(0..=9))]
        level: u32,
    },
    /// Decompress a transport payload back into JSON records
    Decompress {
        /// Input file (gzip payload)
        input: PathBuf,
        /// Output file (JSON records)
        #[arg(short, long)]
        output: PathBuf,
        /// Dot-paths used when the payload was compressed, in the same order
        #[arg(long = "schema", value_name = "PATH")]
        schema: Vec<String>,
    },
    /// Report raw, packed, and compressed byte sizes for a JSON file
    Size {
        /// Input file (JSON)
        input: PathBuf,
        /// Dot-path to a record array inside the document (repeatable)
        #[arg(long = "schema", value_name = "PATH")]
        schema: Vec<String>,
    },
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Pack {
            input,
            output,
            schema,
        } => handle_pack(&input, &output, &schema)?,
        Commands::Unpack {
            input,
            output,
            schema,
        } => handle_unpack(&input, &output, &schema)?,
        Commands::Compress {
            input,
            output,
            schema,
            level,
        } => handle_compress(&input, &output, &schema, level)?,
        Commands::Decompress {
            input,
            output,
            schema,
        } => handle_decompress(&input, &output, &schema)?,
        Commands::Size { input, schema } => handle_size(&input, &schema)?,
    }

    Ok(())
}

fn parse_schema(paths: &[String]) -> Result<Option<Schema>, Box<dyn Error>> {
    if paths.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Schema::parse(paths)?))
    }
}

fn read_json(path: &Path) -> Result<Value, Box<dyn Error>> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

fn handle_pack(input: &Path, output: &Path, schema: &[String]) -> Result<(), Box<dyn Error>> {
    let document = read_json(input)?;
    let schema = parse_schema(schema)?;
    let text = Pipeline::new().stringify(document, schema.as_ref())?;
    fs::write(output, text)?;
    Ok(())
}

fn handle_unpack(input: &Path, output: &Path, schema: &[String]) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(input)?;
    let schema = parse_schema(schema)?;
    let records = Pipeline::new().parse(&text, schema.as_ref())?;
    fs::write(output, serde_json::to_string(&records)?)?;
    Ok(())
}

fn handle_compress(
    input: &Path,
    output: &Path,
    schema: &[String],
    level: u32,
) -> Result<(), Box<dyn Error>> {
    let document = read_json(input)?;
    let schema = parse_schema(schema)?;
    let pipeline = Pipeline::new().level(Compression::new(level));
    let payload = pipeline.compress(document, schema.as_ref())?;
    fs::write(output, payload)?;
    Ok(())
}

fn handle_decompress(input: &Path, output: &Path, schema: &[String]) -> Result<(), Box<dyn Error>> {
    let payload = fs::read(input)?;
    let schema = parse_schema(schema)?;
    let records = Pipeline::new().decompress(&payload, schema.as_ref())?;
    fs::write(output, serde_json::to_string(&records)?)?;
    Ok(())
}

fn handle_size(input: &Path, schema: &[String]) -> Result<(), Box<dyn Error>> {
    let document = read_json(input)?;
    let raw = document.byte_size();
    let schema = parse_schema(schema)?;
    let text = Pipeline::new().stringify(document, schema.as_ref())?;
    let payload = rowpack_io::gzip(text.as_bytes())?;

    println!("raw:        {raw} bytes");
    println!("packed:     {} bytes", text.byte_size());
    println!("compressed: {} bytes", payload.len());
    Ok(())
}
