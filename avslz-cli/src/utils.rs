//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Path value selecting standard input or output.
pub const STDIO_PATH: &str = "-";

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_PATH
}

/// Open the input stream, returning its length when it is a regular file.
pub fn open_input(path: &Path) -> Result<(Box<dyn Read>, Option<u64>), String> {
    if is_stdio(path) {
        return Ok((Box::new(io::stdin().lock()), None));
    }

    let file = File::open(path).map_err(|e| format!("cannot open {}: {}", path.display(), e))?;
    let len = file.metadata().ok().filter(|m| m.is_file()).map(|m| m.len());
    Ok((Box::new(BufReader::new(file)), len))
}

/// Create the output stream.
pub fn open_output(path: &Path) -> Result<Box<dyn Write>, String> {
    if is_stdio(path) {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    }

    let file =
        File::create(path).map_err(|e| format!("cannot create {}: {}", path.display(), e))?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Create a byte progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// A writer that counts the bytes passed through it.
pub struct CountingWriter<W: Write> {
    inner: W,
    count: u64,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.count += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// One-line size summary: `original -> compressed` with space savings.
pub fn format_summary(original: u64, compressed: u64) -> String {
    let savings = if original > 0 {
        format!("{:.1}%", (1.0 - compressed as f64 / original as f64) * 100.0)
    } else {
        "-".to_string()
    };

    format!(
        "{} bytes uncompressed, {} bytes compressed, savings {}",
        original, compressed, savings
    )
}
