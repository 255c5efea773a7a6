//! Page dump formats accepted on the command line

use std::path::Path;

use anyhow::Context;
use quality_types::{PageInput, SourceDocument};
use serde::Deserialize;

/// Either a full document object or a bare array of pages
#[derive(Deserialize)]
#[serde(untagged)]
enum InputFile {
    Pages(Vec<PageInput>),
    Document(SourceDocument),
}

/// Parse a page dump.
///
/// `file_name` overrides the name stored in the dump; bare page arrays fall
/// back to the name of the input file.
pub fn parse_document(
    json: &str,
    source: &Path,
    file_name: Option<&str>,
) -> anyhow::Result<SourceDocument> {
    let parsed: InputFile = serde_json::from_str(json).with_context(|| {
        format!(
            "{} is neither a page array nor a {{\"file_name\", \"pages\"}} object",
            source.display()
        )
    })?;

    let mut document = match parsed {
        InputFile::Document(document) => document,
        InputFile::Pages(pages) => {
            let name = source
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "document".to_string());
            SourceDocument::new(name, pages)
        }
    };
    if let Some(name) = file_name {
        document.file_name = name.to_string();
    }
    Ok(document)
}
