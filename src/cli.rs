use std::path::PathBuf;

use clap::Parser;
use linekit::{Buffering, Encoding, ErrorMode, Newline};

#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable detailed debug logging (global)
    #[arg(long, global = true, default_value_t = false)]
    pub debug: bool,

    /// Enable verbose logging (global)
    #[arg(long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// JSON file with default text settings (encoding, errors, newline, buffering)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Text codec flags shared by the streaming commands. Unset flags fall back to `--config`.
#[derive(clap::Args, Debug, Clone)]
pub struct CodecArgs {
    /// Character encoding: utf-8, ascii, latin-1
    #[arg(long)]
    pub encoding: Option<Encoding>,

    /// Codec error handling: strict, replace, ignore
    #[arg(long)]
    pub errors: Option<ErrorMode>,

    /// Newline mode: universal, untranslated, lf, cr, crlf
    #[arg(long)]
    pub newline: Option<Newline>,

    /// Buffer size in bytes, or "line" / "default"
    #[arg(long)]
    pub buffering: Option<Buffering>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Check or prepare a directory
    Dir {
        path: PathBuf,

        /// Fail unless the directory already exists
        #[arg(long, default_value_t = false)]
        exists: bool,

        /// Delete everything at the path and recreate it empty
        #[arg(long, default_value_t = false)]
        reset: bool,

        /// Create the directory (and parents) when missing
        #[arg(long, default_value_t = false)]
        touch: bool,
    },

    /// Check that a path is an existing regular file
    File {
        path: PathBuf,

        #[arg(long, default_value_t = false)]
        exists: bool,
    },

    /// Stream the lines of a text file to stdout or into another file
    Lines {
        path: PathBuf,

        /// Keep surrounding whitespace and line terminators
        #[arg(long, default_value_t = false)]
        raw: bool,

        /// Drop empty lines
        #[arg(long, default_value_t = false)]
        skip_empty: bool,

        /// Show a progress spinner on stderr
        #[arg(long, default_value_t = false)]
        progress: bool,

        /// Write the normalized lines here instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        codec: CodecArgs,
    },

    /// Validate a JSON Lines file, printing or rewriting each record compactly
    Json {
        path: PathBuf,

        /// Drop null, false, zero and empty records
        #[arg(long, default_value_t = false)]
        skip_empty: bool,

        /// Skip malformed lines instead of stopping
        #[arg(long, default_value_t = false)]
        ignore_errors: bool,

        /// Do not log malformed lines
        #[arg(long, default_value_t = false)]
        silent: bool,

        #[arg(long, default_value_t = false)]
        progress: bool,

        /// Emit non-ASCII characters literally instead of \u escapes
        #[arg(long, default_value_t = false)]
        unicode: bool,

        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        codec: CodecArgs,
    },
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
