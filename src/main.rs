#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

use anyhow::Context;
use clap::Parser;
use http2py_lib::{ParsedRequest, RenderMode, render};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Read a raw HTTP request and print a Python script that sends a similar
/// request. Useful when a request must be replayed, fuzzed or scripted.
#[derive(Parser)]
#[command(name = "http2py", version, about, long_about = None)]
struct Cli {
    /// File containing a raw HTTP request. Reads standard input if omitted.
    request_file: Option<PathBuf>,

    /// Generate a script using the `requests` module rather than `http.client`.
    #[arg(long)]
    requests: bool,

    /// Write the script to this file instead of standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("warn"));
    // Standard output is reserved for the generated script.
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .init();
}

fn read_input(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("Failed to read request file {}", path.display())),
        None => {
            let mut raw = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut raw)
                .context("Failed to read request from stdin")?;
            Ok(raw)
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let raw = read_input(cli.request_file.as_deref())?;
    debug!(bytes = raw.len(), "Read request");

    let request = ParsedRequest::parse(&raw).context("Failed to parse request")?;
    let mode = if cli.requests {
        RenderMode::Session
    } else {
        RenderMode::Connection
    };
    let script = render(&request, mode);

    write_output(cli.output.as_deref(), &script)?;
    info!(?mode, bytes = script.len(), "Wrote script");
    Ok(())
}

fn write_output(path: Option<&Path>, script: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => std::fs::write(path, script)
            .with_context(|| format!("Failed to write script to {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(script.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write script to stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("http2py-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_missing_request_file_is_an_error() {
        let path = scratch_path("does-not-exist.txt");
        let err = read_input(Some(path.as_path())).unwrap_err();
        assert!(
            err.to_string().starts_with("Failed to read request file"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_file_to_file_conversion() {
        let input = scratch_path("request.txt");
        let output = scratch_path("script.py");
        std::fs::write(&input, b"POST /x HTTP/1.1\r\nHost: h:443\r\n\r\nabc").unwrap();

        let raw = read_input(Some(input.as_path())).unwrap();
        let request = ParsedRequest::parse(&raw).unwrap();
        let script = render(&request, RenderMode::Session);
        write_output(Some(output.as_path()), &script).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, script);
        assert!(written.contains("    body = (b'abc')\n"));
        assert!(written.contains("protocol = 'https'\n"));

        std::fs::remove_file(&input).unwrap();
        std::fs::remove_file(&output).unwrap();
    }

    #[test]
    fn test_unwritable_output_is_an_error() {
        let path = scratch_path("missing-dir").join("script.py");
        let err = write_output(Some(path.as_path()), "print()\n").unwrap_err();
        assert!(err.to_string().starts_with("Failed to write script to"));
    }
}
