use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use linekit::{
    ensure_directory, ensure_file, read_json_lines, read_lines, write_json_lines, write_lines,
    DirectoryOptions, FileOptions, JsonReadOptions, JsonWriteOptions, LineOptions, TextOptions,
};
use serde_json::Value;

use crate::cli::{Cli, CodecArgs, Commands};

pub fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    // Our crate at the requested level; warnings (malformed JSON lines, failed
    // resets) stay visible by default.
    use tracing_subscriber::EnvFilter;
    let crate_level = if cli.debug { "debug" } else if cli.verbose { "info" } else { "warn" };
    let filter_str = format!("linekit={crate}", crate = crate_level);
    let env_filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new(crate_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let base_text = match &cli.config {
        Some(path) => TextOptions::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TextOptions::default(),
    };

    match cli.command {
        Commands::Dir { path, exists, reset, touch } => {
            let options = DirectoryOptions { exists, reset, touch };
            let path = ensure_directory(&path, &options)?;
            println!("{}", path.display());
        }
        Commands::File { path, exists } => {
            let path = ensure_file(&path, &FileOptions { exists })?;
            println!("{}", path.display());
        }
        Commands::Lines { path, raw, skip_empty, progress, output, codec } => {
            let options = LineOptions {
                text: merge_codec(base_text, &codec),
                strip: !raw,
                skip_empty,
                progress,
            };
            run_lines(&path, output, &options)?;
        }
        Commands::Json { path, skip_empty, ignore_errors, silent, progress, unicode, output, codec } => {
            let text = merge_codec(base_text, &codec);
            let read = JsonReadOptions { text, skip_empty, ignore_errors, silent, progress };
            let write = JsonWriteOptions {
                text,
                skip_empty,
                ascii_only: !unicode,
                ignore_errors,
                silent,
                progress: false,
            };
            run_json(&path, output, &read, &write)?;
        }
    }
    Ok(())
}

fn merge_codec(base: TextOptions, codec: &CodecArgs) -> TextOptions {
    TextOptions {
        encoding: codec.encoding.unwrap_or(base.encoding),
        errors: codec.errors.unwrap_or(base.errors),
        newline: codec.newline.unwrap_or(base.newline),
        buffering: codec.buffering.unwrap_or(base.buffering),
    }
}

fn run_lines(path: &Path, output: Option<PathBuf>, options: &LineOptions) -> anyhow::Result<()> {
    let path = ensure_file(path, &FileOptions { exists: true })?;
    let lines = read_lines(&path, options)?;

    match output {
        Some(out) => {
            // collect first so reading and writing the same file is safe
            let records = lines.collect::<linekit::Result<Vec<_>>>()?;
            let records = records.iter().map(|line| without_terminator(line));
            let count = write_lines(&out, records, options)?;
            tracing::info!(input = %path.display(), output = %out.display(), count, "lines rewritten");
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            for line in lines {
                let line = line?;
                if options.strip {
                    writeln!(handle, "{}", line)?;
                } else {
                    write!(handle, "{}", line)?;
                }
            }
            handle.flush()?;
        }
    }
    Ok(())
}

fn without_terminator(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}

fn run_json(
    path: &Path,
    output: Option<PathBuf>,
    read: &JsonReadOptions,
    write: &JsonWriteOptions,
) -> anyhow::Result<()> {
    let path = ensure_file(path, &FileOptions { exists: true })?;
    let records = read_json_lines::<Value>(&path, read)?
        .collect::<linekit::Result<Vec<_>>>()?;

    match output {
        Some(out) => {
            let count = write_json_lines(&out, &records, write)?;
            tracing::info!(input = %path.display(), output = %out.display(), count, "records rewritten");
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            for record in &records {
                writeln!(handle, "{}", serde_json::to_string(record)?)?;
            }
            handle.flush()?;
        }
    }
    Ok(())
}
