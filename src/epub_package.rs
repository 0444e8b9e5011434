//! The EPUB container model: the archive index, the `container.xml` rootfile
//! pointer, and the package document's manifest and spine.
//!
//! All of these are built once per extraction and dropped with it.

use crate::error::{ExtractError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::fmt::Display;
use std::io::{Cursor, Read};
use tracing::{debug, warn};

pub const CONTAINER_PATH: &str = "META-INF/container.xml";

/// Archive-internal path to raw entry bytes.
pub struct ContainerIndex {
    entries: HashMap<String, Vec<u8>>,
}

impl ContainerIndex {
    /// Read every file entry of a ZIP archive into memory.
    ///
    /// Entries that cannot be decompressed are left out; lookups for them
    /// then behave like lookups for missing entries.
    pub fn from_zip(data: &[u8]) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(Cursor::new(data))
            .map_err(|e| ExtractError::invalid_container(format!("not a ZIP archive: {e}")))?;

        let mut entries = HashMap::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = match archive.by_index(i) {
                Ok(file) => file,
                Err(e) => {
                    warn!(index = i, "Skipping unreadable archive entry: {e}");
                    continue;
                }
            };
            if file.is_dir() {
                continue;
            }

            let name = file.name().to_string();
            // The declared size comes from the archive itself; never trust
            // it beyond the size of the whole buffer.
            let capacity = file.size().min(data.len() as u64) as usize;
            let mut bytes = Vec::with_capacity(capacity);
            if let Err(e) = file.read_to_end(&mut bytes) {
                warn!(entry = %name, "Skipping unreadable archive entry: {e}");
                continue;
            }
            entries.insert(name, bytes);
        }

        debug!(entries = entries.len(), "Indexed EPUB archive");
        Ok(Self { entries })
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.entries.get(path).map(Vec::as_slice)
    }
}

/// Read the package document path from `META-INF/container.xml`: the
/// `full-path` of the first `rootfile` element, relative to the archive root.
pub fn rootfile_path(container_xml: &[u8]) -> Result<String> {
    let xml = String::from_utf8_lossy(container_xml);
    let mut reader = Reader::from_str(&xml);

    loop {
        match reader.read_event().map_err(xml_error(CONTAINER_PATH))? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"rootfile" => {
                return attribute(&e, b"full-path")?.ok_or_else(|| {
                    ExtractError::invalid_container("rootfile element has no full-path")
                });
            }
            Event::Eof => {
                return Err(ExtractError::invalid_container(format!(
                    "{CONTAINER_PATH} declares no rootfile"
                )))
            }
            _ => {}
        }
    }
}

/// A manifest entry: one content file available in the publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestItem {
    pub id: String,
    pub href: String,
}

/// The package document's manifest (by id) and spine (reading order).
#[derive(Debug, Default)]
pub struct Package {
    manifest: HashMap<String, ManifestItem>,
    spine: Vec<String>,
}

impl Package {
    pub fn parse(package_xml: &[u8], path: &str) -> Result<Self> {
        let xml = String::from_utf8_lossy(package_xml);
        let mut reader = Reader::from_str(&xml);

        let mut package = Package::default();
        let mut section = Section::Other;
        let (mut saw_manifest, mut saw_spine) = (false, false);

        loop {
            let event = reader.read_event().map_err(xml_error(path))?;
            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    match (e.local_name().as_ref(), section) {
                        (b"manifest", _) => {
                            saw_manifest = true;
                            if matches!(event, Event::Start(_)) {
                                section = Section::Manifest;
                            }
                        }
                        (b"spine", _) => {
                            saw_spine = true;
                            if matches!(event, Event::Start(_)) {
                                section = Section::Spine;
                            }
                        }
                        (b"item", Section::Manifest) => package.add_item(e)?,
                        (b"itemref", Section::Spine) => {
                            if let Some(idref) = attribute(e, b"idref")? {
                                package.spine.push(idref);
                            }
                        }
                        _ => {}
                    }
                }
                Event::End(ref e)
                    if matches!(e.local_name().as_ref(), b"manifest" | b"spine") =>
                {
                    section = Section::Other;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !saw_manifest {
            return Err(ExtractError::invalid_container(format!(
                "{path} has no manifest"
            )));
        }
        if !saw_spine {
            return Err(ExtractError::invalid_container(format!("{path} has no spine")));
        }

        debug!(
            manifest_items = package.manifest.len(),
            spine_entries = package.spine.len(),
            "Parsed package document"
        );
        Ok(package)
    }

    fn add_item(&mut self, e: &BytesStart<'_>) -> Result<()> {
        let (Some(id), Some(href)) = (attribute(e, b"id")?, attribute(e, b"href")?) else {
            debug!("Ignoring manifest item without id or href");
            return Ok(());
        };
        // First declaration of an id wins.
        self.manifest
            .entry(id.clone())
            .or_insert(ManifestItem { id, href });
        Ok(())
    }

    pub fn item(&self, id: &str) -> Option<&ManifestItem> {
        self.manifest.get(id)
    }

    /// Spine idrefs in reading order.
    pub fn spine(&self) -> &[String] {
        &self.spine
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Manifest,
    Spine,
    Other,
}

/// Directory of the package document inside the archive; empty at the root.
pub fn content_base_path(package_path: &str) -> &str {
    package_path
        .rfind('/')
        .map(|i| &package_path[..i])
        .unwrap_or("")
}

/// Resolve a manifest href against the package directory into an archive
/// path. Fragments are dropped and `.`/`..` segments collapsed.
pub fn resolve_href(base: &str, href: &str) -> String {
    let href = href.split('#').next().unwrap_or(href);
    let joined = if base.is_empty() {
        href.to_string()
    } else {
        format!("{base}/{href}")
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

fn attribute(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes().with_checks(false).flatten() {
        if attr.key.local_name().as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|err| ExtractError::invalid_container(format!("bad attribute: {err}")))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn xml_error<E: Display>(path: &str) -> impl Fn(E) -> ExtractError + '_ {
    move |e| ExtractError::invalid_container(format!("malformed XML in {path}: {e}"))
}
