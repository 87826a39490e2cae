// src/ingest/mod.rs
pub mod ndjson;
pub mod types;

use once_cell::sync::OnceCell;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Bodies Reddit substitutes for content that is no longer available.
pub const REMOVED_PLACEHOLDERS: [&str; 2] = ["[deleted]", "[removed]"];

/// Cleaned, lowercase text. Only [`normalize`] constructs a non-empty value,
/// so every downstream tagger sees the same canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Wraps text that already went through [`normalize`], such as a
    /// record's `clean_text`.
    pub(crate) fn from_normalized(clean: String) -> Self {
        Self(clean)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whitespace-delimited words, in order.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.split(' ').filter(|w| !w.is_empty())
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn re_script_style() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
            .expect("script/style regex")
    })
}

fn re_tags() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"(?is)<!--.*?-->|</?[a-z!][^>]*>").expect("tag regex"))
}

fn re_urls() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    // Case-insensitive so that "HTTPS://..." cannot survive until lowercasing.
    RE.get_or_init(|| Regex::new(r"(?i)http\S+|www\.\S+").expect("url regex"))
}

fn re_handles() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"u/[A-Za-z0-9_-]+|r/[A-Za-z0-9_+-]+").expect("handle regex"))
}

fn re_disallowed() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9' -]").expect("charset regex"))
}

fn re_ws() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"))
}

/// Strip markup and keep the visible text: script/style bodies and comments
/// are dropped, tags become spaces, entities are decoded.
pub fn strip_html(s: &str) -> String {
    let out = re_script_style().replace_all(s, " ");
    let out = re_tags().replace_all(&out, " ");
    html_escape::decode_html_entities(&out).into_owned()
}

/// Canonical form used by every tagger.
///
/// Order matters, each step narrows the character set further:
/// 1) strip HTML, 2) drop URLs and `u/`/`r/` handles, 3) replace anything
/// outside `[A-Za-z0-9' -]` with a space, 4) collapse whitespace and trim,
/// 5) lowercase. Applying it twice yields the same text.
pub fn normalize(raw: &str) -> NormalizedText {
    if raw.is_empty() {
        return NormalizedText::default();
    }

    // 1) HTML
    let out = strip_html(raw);

    // 2) URLs + handles (space, not empty, so neighbours don't fuse)
    let out = re_urls().replace_all(&out, " ");
    let out = re_handles().replace_all(&out, " ");

    // 3) Charset
    let out = re_disallowed().replace_all(&out, " ");

    // 4) Whitespace
    let out = re_ws().replace_all(&out, " ");
    let out = out.trim();

    // 5) Lowercase (ASCII only remains at this point)
    NormalizedText(out.to_ascii_lowercase())
}

/// Null-tolerant variant: a missing body is treated as empty text.
pub fn normalize_opt(raw: Option<&str>) -> NormalizedText {
    raw.map(normalize).unwrap_or_default()
}

/// True for Reddit's `[deleted]` / `[removed]` stand-ins.
pub fn is_removed_placeholder(body: &str) -> bool {
    let t = body.trim();
    REMOVED_PLACEHOLDERS.iter().any(|p| *p == t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_urls_handles_and_punct() {
        let s = "Check https://example.com/a?b=1 and www.foo.org, thanks u/some_user in r/Futurology!!";
        assert_eq!(normalize(s).as_str(), "check and thanks in");
    }

    #[test]
    fn normalize_keeps_apostrophes_and_hyphens() {
        assert_eq!(
            normalize("It's a Wind-Assisted ship; 12% cheaper?").as_str(),
            "it's a wind-assisted ship 12 cheaper"
        );
    }

    #[test]
    fn uppercase_url_is_removed_before_lowercasing() {
        let once = normalize("see HTTPS://X.Y/Z now");
        assert_eq!(once.as_str(), "see now");
        assert_eq!(normalize(once.as_str()), once);
    }

    #[test]
    fn html_visible_text_only() {
        let s = "<p>Rotor&nbsp;<b>sails</b></p><script>var x = 1;</script><!-- hidden -->";
        assert_eq!(normalize(s).as_str(), "rotor sails");
    }

    #[test]
    fn placeholders_detected() {
        assert!(is_removed_placeholder("[deleted]"));
        assert!(is_removed_placeholder(" [removed] "));
        assert!(!is_removed_placeholder("removed"));
    }

    #[test]
    fn null_body_is_empty() {
        assert!(normalize_opt(None).is_empty());
    }
}
