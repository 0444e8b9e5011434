use crate::epub_package::{self, ContainerIndex, Package, CONTAINER_PATH};
use crate::error::{ExtractError, Result};
use crate::html_text;
use crate::reader::ParseResult;
use tracing::{debug, info, warn};

/// Separator appended after every chapter, including the last.
const CHAPTER_SEPARATOR: &str = "\n\n";

/// Extract the text of an EPUB in spine order.
///
/// The container chain (`container.xml` -> package document) must be intact;
/// individual spine entries that do not resolve to an archive entry are
/// skipped so a slightly inconsistent book still yields its readable chapters.
pub fn extract_epub(data: &[u8]) -> Result<ParseResult> {
    let index = ContainerIndex::from_zip(data)?;

    let container = index.get(CONTAINER_PATH).ok_or_else(|| {
        ExtractError::invalid_container(format!("{CONTAINER_PATH} not found"))
    })?;
    let package_path = epub_package::rootfile_path(container)?;

    let package_xml = index
        .get(&package_path)
        .ok_or_else(|| ExtractError::invalid_container(format!("{package_path} not found")))?;
    let package = Package::parse(package_xml, &package_path)?;

    let base = epub_package::content_base_path(&package_path);
    let mut text = String::new();
    let mut chapters = 0usize;

    for idref in package.spine() {
        let Some(item) = package.item(idref) else {
            warn!(idref = %idref, "Spine entry has no manifest item, skipping");
            continue;
        };

        let chapter_path = epub_package::resolve_href(base, &item.href);
        let Some(chapter) = index.get(&chapter_path) else {
            warn!(path = %chapter_path, "Chapter missing from archive, skipping");
            continue;
        };

        let chapter_text = html_text::body_text(&String::from_utf8_lossy(chapter));
        debug!(
            path = %chapter_path,
            added_chars = chapter_text.len(),
            "Parsed chapter"
        );
        text.push_str(&chapter_text);
        text.push_str(CHAPTER_SEPARATOR);
        chapters += 1;
    }

    info!(
        chapters,
        spine_entries = package.spine().len(),
        total_chars = text.len(),
        "Extracted EPUB text"
    );

    Ok(ParseResult::text(text))
}
