use std::path::Path;

/// Content type used when the extension is unknown.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Looks up the content type for a file path by extension.
pub fn mime_type_of(path: &Path) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_MIME)
}
