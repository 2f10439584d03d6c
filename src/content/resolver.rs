//! URL path to filesystem path resolution
//!
//! Resolution is pure path algebra plus a canonicalization step; whether
//! the target can actually be opened is the caller's concern.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Extensions (lower-case) the server is willing to serve.
const ALLOWED_EXTENSIONS: &[&str] = &[
    "pdf", "jpeg", "jpg", "png", "txt", "gif", "html", "mp4", "json", "js", "css",
];

/// Outcome of resolving a request path against the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// Canonical path proven to lie within the document root.
    File(PathBuf),
    /// The target does not exist on disk.
    NotFound,
    /// The target canonicalizes to a location outside the document root.
    /// Must be reported to the client exactly like `NotFound` so the
    /// sandbox leaks no existence information.
    OutsideRoot,
}

fn strip_query(path: &str) -> &str {
    match path.find('?') {
        Some(idx) => &path[..idx],
        None => path,
    }
}

fn strip_fragment(path: &str) -> &str {
    match path.find('#') {
        Some(idx) => &path[..idx],
        None => path,
    }
}

/// Bare routes resolve to HTML pages: `/about` means `/about.html`.
fn with_html_suffix(path: &str) -> String {
    if path != "/" && !path.contains('.') {
        format!("{path}.html")
    } else {
        path.to_string()
    }
}

/// Whether a decoded request path names a servable resource.
///
/// The extension check runs before any filesystem access so that
/// disallowed paths are rejected identically whether or not they exist.
pub fn is_allowed_resource(path: &str) -> bool {
    let path = with_html_suffix(strip_fragment(strip_query(path)));
    if path == "/" {
        return true;
    }
    let lower = path.to_ascii_lowercase();
    ALLOWED_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

/// Resolves a decoded URL path to a file under `root`.
///
/// `root` must already be canonical; `default_document` is the
/// root-relative page served for `/`. Containment is checked on whole
/// path segments, so a sibling of the root whose name shares a prefix
/// (`/srv/www` vs `/srv/wwwevil`) is rejected.
pub fn resolve(decoded_path: &str, root: &Path, default_document: &str) -> ResolvedTarget {
    let mut path = with_html_suffix(strip_query(decoded_path));

    // The error pages live in a fixed subtree the server controls.
    if matches!(path.as_str(), "/400.html" | "/403.html" | "/404.html") {
        path = format!("/errors{path}");
    }

    let relative = if path == "/" {
        default_document
    } else {
        path.strip_prefix('/').unwrap_or(&path)
    };

    let candidate = root.join(relative);
    match candidate.canonicalize() {
        Ok(canonical) if canonical.starts_with(root) => ResolvedTarget::File(canonical),
        Ok(canonical) => {
            tracing::warn!(
                "{} resolves outside the document root",
                canonical.display()
            );
            ResolvedTarget::OutsideRoot
        }
        Err(e) if e.kind() == ErrorKind::NotFound => ResolvedTarget::NotFound,
        Err(e) => {
            tracing::warn!("cannot canonicalize {}: {}", candidate.display(), e);
            ResolvedTarget::NotFound
        }
    }
}
