//! Source reference resolution and filename derivation.
//!
//! A download's source can be a drive-style share link (`/file/d/<id>`,
//! `/d/<id>`, `?id=<id>`), a bare file identifier, or a plain direct URL.
//! Share links and bare ids are rewritten to the provider's direct download
//! endpoint before probing; direct URLs pass through untouched.

use url::Url;

/// Default filename when neither the payload, headers, nor the URL path
/// yield anything usable.
const DEFAULT_FILENAME: &str = "download.bin";

/// Direct download endpoint for share-link file ids.
const DIRECT_ENDPOINT: &str = "https://drive.google.com/uc";

fn is_file_id(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Extracts the file identifier from a drive-style share link.
///
/// Recognizes `/file/d/<id>`, `/d/<id>`, and an `id=<id>` query parameter.
/// Returns `None` for anything else (including direct URLs).
pub fn extract_file_id(source: &str) -> Option<String> {
    let parsed = Url::parse(source).ok()?;

    let segments: Vec<&str> = parsed
        .path()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    for window in segments.windows(2) {
        if window[0] == "d" && is_file_id(window[1]) {
            return Some(window[1].to_string());
        }
    }

    parsed
        .query_pairs()
        .find(|(k, _)| k == "id")
        .map(|(_, v)| v.into_owned())
        .filter(|v| is_file_id(v))
}

/// Resolves a source reference to the URL the metadata probe should HEAD.
///
/// Share links and bare file ids become a direct download URL; anything that
/// parses as an http(s) URL is used as-is.
pub fn direct_download_url(source: &str) -> String {
    if let Some(file_id) = extract_file_id(source) {
        return format!("{DIRECT_ENDPOINT}?export=download&id={file_id}&confirm=t");
    }
    match Url::parse(source) {
        Ok(u) if u.scheme() == "http" || u.scheme() == "https" => source.to_string(),
        _ => format!("{DIRECT_ENDPOINT}?export=download&id={source}&confirm=t"),
    }
}

/// Last path segment of a URL, as a filename hint.
fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Filename from a `Content-Disposition` header value, if present.
fn filename_from_content_disposition(value: &str) -> Option<String> {
    let (_, rest) = value.split_once("filename=")?;
    let rest = rest.trim();
    let name = if let Some(stripped) = rest.strip_prefix('"') {
        stripped.split('"').next()?
    } else {
        rest.split(';').next()?.trim()
    };
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Strips path separators and control characters, then leading/trailing dots
/// and whitespace, so a header value cannot escape the download directory.
fn sanitize(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0') && !c.is_control())
        .collect();
    cleaned.trim_matches(|c: char| c == '.' || c.is_whitespace()).to_string()
}

/// Derives the stored filename for a download.
///
/// Preference order: `Content-Disposition` header, then the last URL path
/// segment, then a fixed default. The result is sanitized.
pub fn derive_filename(url: &str, content_disposition: Option<&str>) -> String {
    let candidate = content_disposition
        .and_then(filename_from_content_disposition)
        .or_else(|| filename_from_url_path(url));

    let raw = match candidate {
        Some(c) => c,
        None => return DEFAULT_FILENAME.to_string(),
    };

    let sanitized = sanitize(&raw);
    if sanitized.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}
