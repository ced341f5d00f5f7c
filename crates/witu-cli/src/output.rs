//! Output sinks: a file given with `-o`, or stdout.

use std::fs;
use std::io::{self, Write};

use tracing::info;

use witu_core::{Error, Result};

/// Write `content` to `path`, or to stdout when no path is given.
///
/// Failures surface as `SinkFailed`; the content itself is left untouched.
pub fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).map_err(|err| {
                Error::sink_failed(path, err.to_string())
                    .with_operation("output::write_output")
                    .set_source(err)
            })?;
            info!(path, bytes = content.len(), "output written");
        }
        None => write_stdout(content).map_err(|err| {
            Error::sink_failed("stdout", err.to_string())
                .with_operation("output::write_output")
                .set_source(err)
        })?,
    }
    Ok(())
}

fn write_stdout(content: &str) -> io::Result<()> {
    let mut lock = io::stdout().lock();
    lock.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        lock.write_all(b"\n")?;
    }
    lock.flush()
}
