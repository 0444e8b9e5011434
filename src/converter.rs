use crate::cli::Cli;
use anyhow::{Context, Result};
use book_extract::metadata::format_metadata;
use book_extract::ParseResult;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub fn convert(cli: &Cli) -> Result<()> {
    let data = fs::read(&cli.input)
        .with_context(|| format!("Failed to read input: {}", cli.input.display()))?;
    let mime_type = resolve_mime_type(cli)?;

    let result = book_extract::parse_file_content(&data, &mime_type)
        .with_context(|| format!("Failed to extract {}", cli.input.display()))?;

    let rendered = render(&result, cli)?;
    match cli.output {
        Some(ref path) => write_output(path, &rendered)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }

    info!(
        input = %cli.input.display(),
        mime_type = %mime_type,
        chars = result.text.chars().count(),
        "Extraction finished"
    );
    Ok(())
}

fn resolve_mime_type(cli: &Cli) -> Result<String> {
    if let Some(ref mime) = cli.mime_type {
        return Ok(mime.clone());
    }

    mime_guess::from_path(&cli.input)
        .first_raw()
        .map(str::to_string)
        .with_context(|| {
            format!(
                "Cannot guess the MIME type of {}; pass --mime-type",
                cli.input.display()
            )
        })
}

fn render(result: &ParseResult, cli: &Cli) -> Result<String> {
    if cli.json {
        let mut json =
            serde_json::to_string_pretty(result).context("Failed to serialize result")?;
        json.push('\n');
        return Ok(json);
    }

    let mut content = String::new();
    if cli.metadata {
        if let Some(ref metadata) = result.metadata {
            content.push_str(&format_metadata(metadata));
        }
    }
    content.push_str(&result.text);
    Ok(content)
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("book-extract").chain(args.iter().copied()))
    }

    #[test]
    fn writes_text_file_to_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        let output = dir.path().join("out/notes.txt");
        fs::write(&input, "Read me aloud.\n").unwrap();

        convert(&cli(&[
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]))
        .unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "Read me aloud.\n");
    }

    #[test]
    fn explicit_mime_type_overrides_extension() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("book.bin");
        let output = dir.path().join("book.json");
        fs::write(&input, "Chapter text").unwrap();

        convert(&cli(&[
            input.to_str().unwrap(),
            "--mime-type",
            "text/plain",
            "--json",
            "-o",
            output.to_str().unwrap(),
        ]))
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["text"], "Chapter text");
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn unsupported_mime_type_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("picture.png");
        fs::write(&input, [0x89, b'P', b'N', b'G']).unwrap();

        let err = convert(&cli(&[input.to_str().unwrap()])).unwrap_err();
        let typed = err.downcast_ref::<book_extract::ExtractError>().unwrap();
        assert!(matches!(
            typed,
            book_extract::ExtractError::UnsupportedFormat(m) if m == "image/png"
        ));
    }

    #[test]
    fn missing_extension_requires_mime_type() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("README");
        fs::write(&input, "text").unwrap();

        assert!(convert(&cli(&[input.to_str().unwrap()])).is_err());
    }
}
