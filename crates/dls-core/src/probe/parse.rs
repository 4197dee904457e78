//! Parse HTTP response header lines into HeadInfo.

/// Result of a HEAD request: the headers the lifecycle service cares about.
#[derive(Debug, Clone, Default)]
pub struct HeadInfo {
    /// Total size in bytes, if `Content-Length` is present.
    pub content_length: Option<u64>,
    /// `Content-Disposition` value if present (filename hint).
    pub content_disposition: Option<String>,
}

/// Parse collected header lines into HeadInfo.
pub(crate) fn parse_headers(lines: &[String]) -> HeadInfo {
    let mut content_length = None;
    let mut content_disposition = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<u64>() {
                    content_length = Some(n);
                }
            }
            if name.eq_ignore_ascii_case("content-disposition") {
                content_disposition = Some(value.to_string());
            }
        }
    }

    HeadInfo {
        content_length,
        content_disposition,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_headers_content_length() {
        let lines = [
            "HTTP/1.1 200 OK".to_string(),
            "Content-Length: 12345".to_string(),
        ];
        let info = parse_headers(&lines);
        assert_eq!(info.content_length, Some(12345));
        assert!(info.content_disposition.is_none());
    }

    #[test]
    fn parse_headers_content_disposition() {
        let lines = [
            "HTTP/1.1 200 OK".to_string(),
            "Content-Disposition: attachment; filename=\"game.zip\"".to_string(),
        ];
        let info = parse_headers(&lines);
        assert_eq!(
            info.content_disposition.as_deref(),
            Some("attachment; filename=\"game.zip\"")
        );
    }

    #[test]
    fn parse_headers_case_insensitive_and_redirect_chain() {
        // With follow_location the header callback sees every response in the
        // chain; the final response's values win.
        let lines = [
            "HTTP/1.1 302 Found".to_string(),
            "content-length: 0".to_string(),
            "Location: https://cdn.example.com/real".to_string(),
            "HTTP/1.1 200 OK".to_string(),
            "CONTENT-LENGTH: 999".to_string(),
        ];
        let info = parse_headers(&lines);
        assert_eq!(info.content_length, Some(999));
    }

    #[test]
    fn parse_headers_ignores_garbage() {
        let lines = [
            "".to_string(),
            "not-a-header".to_string(),
            "Content-Length: not-a-number".to_string(),
        ];
        let info = parse_headers(&lines);
        assert_eq!(info.content_length, None);
    }
}
