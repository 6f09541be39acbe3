//! Configuration options for HTML rendering

/// Options for rendering a document to HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Escape text content and attribute values.
    /// Turning this off interpolates stored text verbatim.
    pub escape_text: bool,

    /// `target` attribute written on every link
    pub link_target: String,

    /// `rel` attribute written on every link
    pub link_rel: String,

    /// Optional `class` attribute written on every link
    pub link_class: Option<String>,

    /// URL schemes a link may use. A link with any other scheme renders its
    /// text without the anchor; scheme-less (relative) URLs are always kept.
    /// `None` accepts every scheme.
    pub link_schemes: Option<Vec<String>>,

    /// Insert an empty `<p></p>` after a list that is followed by a heading
    /// or quote, so the editing surface keeps the blocks apart.
    pub separate_lists: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            escape_text: true,
            link_target: "_self".to_string(),
            link_rel: "noopener noreferrer nofollow".to_string(),
            link_class: None,
            link_schemes: Some(
                ["http", "https", "mailto", "tel"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
            separate_lists: true,
        }
    }
}

impl HtmlOptions {
    pub fn with_escape_text(mut self, escape: bool) -> Self {
        self.escape_text = escape;
        self
    }

    pub fn with_link_target(mut self, target: impl Into<String>) -> Self {
        self.link_target = target.into();
        self
    }

    pub fn with_link_rel(mut self, rel: impl Into<String>) -> Self {
        self.link_rel = rel.into();
        self
    }

    pub fn with_link_class(mut self, class: impl Into<String>) -> Self {
        self.link_class = Some(class.into());
        self
    }

    /// Restrict link URLs to `schemes`
    pub fn with_link_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.link_schemes = Some(schemes.into_iter().map(Into::into).collect());
        self
    }

    /// Accept links with any scheme
    pub fn allow_any_scheme(mut self) -> Self {
        self.link_schemes = None;
        self
    }

    /// Whether a link to `url` may be written as an anchor
    pub fn allows_url(&self, url: &str) -> bool {
        match (&self.link_schemes, url_scheme(url)) {
            (None, _) | (_, None) => true,
            (Some(allowed), Some(scheme)) => {
                allowed.iter().any(|s| s.eq_ignore_ascii_case(&scheme))
            }
        }
    }

    pub fn with_separate_lists(mut self, separate: bool) -> Self {
        self.separate_lists = separate;
        self
    }
}

/// Scheme of `url`, lowercased, or `None` for a relative URL.
///
/// Browsers drop leading whitespace and control characters and ignore tabs
/// and newlines inside the scheme, so those are skipped here too.
fn url_scheme(url: &str) -> Option<String> {
    let cleaned: String = url
        .trim_start_matches(|c: char| c.is_whitespace() || c.is_control())
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect();
    let end = cleaned.find([':', '/', '?', '#'])?;
    if cleaned[end..].starts_with(':') {
        Some(cleaned[..end].to_ascii_lowercase())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schemes() {
        let options = HtmlOptions::default();
        assert!(options.allows_url("https://example.com"));
        assert!(options.allows_url("HTTP://example.com"));
        assert!(options.allows_url("mailto:guru@sekolah.id"));
        assert!(options.allows_url("/uploads/a.png"));
        assert!(options.allows_url("?page=2"));
        assert!(options.allows_url("#top"));
        assert!(!options.allows_url("javascript:alert(1)"));
        assert!(!options.allows_url("  JavaScript:alert(1)"));
        assert!(!options.allows_url("java\tscript:alert(1)"));
        assert!(!options.allows_url("data:text/html,x"));
    }

    #[test]
    fn test_custom_schemes() {
        let options = HtmlOptions::default().with_link_schemes(["https"]);
        assert!(options.allows_url("https://example.com"));
        assert!(!options.allows_url("http://example.com"));

        let open = HtmlOptions::default().allow_any_scheme();
        assert!(open.allows_url("javascript:void(0)"));
    }
}
