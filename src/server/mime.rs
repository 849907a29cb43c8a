//! Extension to content-type lookup.

use std::path::Path;

/// Fallback for extensions not in the table.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Known extensions (without the dot) and their content types.
const MIME_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("js", "text/javascript"),
    ("css", "text/css"),
    ("json", "application/json"),
    ("png", "image/png"),
    ("jpg", "image/jpg"),
    ("gif", "image/gif"),
    ("wav", "audio/wav"),
    ("mp3", "audio/mpeg"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
];

/// Guess the content type of a file from its extension.
///
/// Matching is case-insensitive.
pub fn mime_type_for(path: &Path) -> &'static str {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        return DEFAULT_MIME_TYPE;
    };

    MIME_TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(extension))
        .map(|&(_, mime)| mime)
        .unwrap_or(DEFAULT_MIME_TYPE)
}
