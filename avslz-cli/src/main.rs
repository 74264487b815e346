//! avslz - AVS-LZ stream compressor
//!
//! Compresses standard input (or a file) into an AVS-LZ stream, or with `-d`
//! decompresses one.

mod utils;

use avslz::{LzReader, LzWriter};
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use utils::{CountingWriter, create_progress_bar, format_summary, open_input, open_output};

#[derive(Parser)]
#[command(name = "avslz")]
#[command(author, version, about = "Compress or decompress AVS-LZ streams")]
#[command(long_about = "
Compress or decompress AVS-LZ (LZSS) streams.
Input and output default to standard input and standard output.

Examples:
  avslz -i image.bmp -o image.bmp.lz
  avslz -d -i image.bmp.lz -o image.bmp
  cat data.bin | avslz > data.bin.lz
  avslz -d < data.bin.lz > data.bin
")]
struct Cli {
    /// Decompress instead of compress
    #[arg(short = 'd', long)]
    decompress: bool,

    /// Path to the input file, or "-" for standard input
    #[arg(short = 'i', long, default_value = utils::STDIO_PATH)]
    input: PathBuf,

    /// Path to the output file, or "-" for standard output
    #[arg(short = 'o', long, default_value = utils::STDIO_PATH)]
    output: PathBuf,

    /// Print a size summary to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Show a progress bar (file input only)
    #[arg(short = 'P', long)]
    progress: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr: stdout may carry the compressed stream.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (input, input_len) = open_input(&cli.input)?;
    let progress = create_progress_bar(input_len.unwrap_or(0), cli.progress && input_len.is_some());
    let mut input = progress.wrap_read(input);
    let mut output = CountingWriter::new(open_output(&cli.output)?);

    let mode = if cli.decompress { "decompress" } else { "compress" };
    info!(
        mode,
        input = %cli.input.display(),
        output = %cli.output.display(),
        "starting"
    );

    let (original, compressed) = if cli.decompress {
        let mut reader = LzReader::new(&mut input);
        io::copy(&mut reader, &mut output)
            .map_err(|e| format!("failed to decompress data: {}", e))?;
        (output.count(), reader.total_in())
    } else {
        let consumed = compress_stream(&mut input, &mut output)
            .map_err(|e| format!("failed to compress data: {}", e))?;
        (consumed, output.count())
    };

    output
        .flush()
        .map_err(|e| format!("failed to close output: {}", e))?;
    progress.finish_and_clear();

    debug!(original, compressed, "done");
    if cli.verbose {
        eprintln!("{}", format_summary(original, compressed));
    }

    Ok(())
}

/// Compress `input` into `output`, returning the number of bytes consumed.
fn compress_stream<R: Read, W: Write>(input: &mut R, output: &mut W) -> io::Result<u64> {
    let mut writer = LzWriter::new(output);
    let consumed = io::copy(input, &mut writer)?;
    writer.finish()?;
    Ok(consumed)
}
