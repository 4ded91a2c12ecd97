/// RSS-specific utility functions for the watcher

/// URL utilities for RSS feeds
pub mod url {
    use url::Url;

    /// Extract domain from URL
    pub fn extract_domain(url_str: &str) -> Option<String> {
        if let Ok(url) = Url::parse(url_str) {
            url.domain().map(|d| d.to_string())
        } else {
            None
        }
    }

    /// Validate RSS feed URL format
    pub fn is_valid_rss_url(url_str: &str) -> bool {
        if let Ok(url) = Url::parse(url_str) {
            url.scheme() == "http" || url.scheme() == "https"
        } else {
            false
        }
    }
}

/// Text shaping for feed bodies
pub mod feed {
    use once_cell::sync::Lazy;
    use regex::Regex;

    // Only tag-shaped markup; a bare "<" in prose is text.
    static MARKUP: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?s)<!--.*?-->|</?[A-Za-z][^<>]*>").expect("markup pattern")
    });

    const SENTENCE_MARKS: [char; 4] = ['.', '。', '!', '?'];

    /// Extract clean text content from HTML
    pub fn extract_text_from_html(html: &str) -> String {
        // Tags separate words, e.g. "<p>a</p><p>b</p>".
        let stripped = MARKUP.replace_all(html, " ");
        html_escape::decode_html_entities(&stripped)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Truncate text to at most `max_chars` characters, preferring a sentence
    /// or word boundary. Never splits a multi-byte character.
    ///
    /// A sentence boundary in the first half of the window is ignored so a
    /// leading "..." or "1." does not shrink the result to a few characters.
    pub fn smart_truncate(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            return text.to_string();
        }

        let cut = text
            .char_indices()
            .nth(max_chars)
            .map(|(idx, _)| idx)
            .unwrap_or(text.len());
        let truncated = &text[..cut];

        let sentence_end = truncated
            .char_indices()
            .filter(|(_, c)| SENTENCE_MARKS.contains(c))
            .map(|(idx, c)| idx + c.len_utf8())
            .last()
            .filter(|&end| truncated[..end].chars().count() >= max_chars / 2);

        if let Some(end) = sentence_end {
            truncated[..end].to_string()
        } else if let Some(last_space) = truncated.rfind(' ') {
            format!("{}...", &truncated[..last_space])
        } else {
            format!("{}...", truncated)
        }
    }
}
