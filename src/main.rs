//! `charset-resolve`: decode a captured HTTP body with charset resolution.
//!
//! ```text
//! charset-resolve page.html                      # text on stdout, charset on stderr
//! charset-resolve --json page.html               # JSON report with diagnostics
//! curl -s $URL | charset-resolve --content-type "text/html; charset=koi8-r"
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;

use body_charset::config::{load_config, ResolverConfig};
use body_charset::observability::logging::init_logging;
use body_charset::{ByteBody, Charset, DefaultStrategy, Diagnostics, HttpBody};

#[derive(Parser)]
#[command(name = "charset-resolve")]
#[command(about = "Resolve the charset of an HTTP body and print it as text", long_about = None)]
struct Cli {
    /// Body file to read ("-" reads stdin)
    #[arg(default_value = "-")]
    input: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content-Type header value received with the body
    #[arg(long)]
    content_type: Option<String>,

    /// Explicit charset; skips resolution
    #[arg(long)]
    charset: Option<String>,

    /// Do not sniff the body; decode with the default charset
    #[arg(long)]
    plain: bool,

    /// Print a JSON report instead of the text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    charset: Option<Charset>,
    explicit: bool,
    bytes: usize,
    text: &'a str,
    diagnostics: &'a Diagnostics,
}

fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut bytes = Vec::new();
        io::stdin().lock().read_to_end(&mut bytes)?;
        Ok(bytes)
    } else {
        fs::read(path)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ResolverConfig::default(),
    };
    init_logging(&config.observability)?;

    let mut body = HttpBody::configured(&config.resolution)?;
    if cli.plain {
        body = body.with_strategy(Arc::new(DefaultStrategy));
    }
    body.set_bytes(read_input(&cli.input)?);

    if let Some(content_type) = &cli.content_type {
        body.set_charset_from_content_type(content_type);
    }
    if let Some(label) = &cli.charset {
        body.set_explicit_charset(Some(Charset::for_label(label)?));
    }

    tracing::debug!(
        input = %cli.input.display(),
        bytes = body.len(),
        explicit = ?body.explicit_charset(),
        "Body loaded"
    );

    let resolution = body.resolve();
    let mut stdout = io::stdout().lock();

    if cli.json {
        let report = Report {
            charset: resolution.charset,
            explicit: body.explicit_charset().is_some(),
            bytes: body.len(),
            text: &resolution.text,
            diagnostics: &resolution.diagnostics,
        };
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
    } else {
        stdout.write_all(resolution.text.as_bytes())?;
        eprintln!(
            "charset: {}",
            resolution.charset.map_or("(unresolved)", |c| c.name())
        );
    }

    Ok(())
}
