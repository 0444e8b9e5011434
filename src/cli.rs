use clap::Parser;
use std::path::PathBuf;

/// Extract the plain text of an e-book (PDF, EPUB, TXT, DOC/DOCX)
#[derive(Parser, Debug)]
#[command(name = "book-extract", version, about)]
pub struct Cli {
    /// Path to the input document
    pub input: PathBuf,

    /// Declared MIME type of the input. Guessed from the file extension when omitted.
    #[arg(short = 't', long)]
    pub mime_type: Option<String>,

    /// Write the extracted text to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Prepend a metadata header when the document carries metadata
    #[arg(long, default_value_t = false)]
    pub metadata: bool,

    /// Emit the whole result (text and metadata) as JSON
    #[arg(long, default_value_t = false, conflicts_with = "metadata")]
    pub json: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
