//! Declarative delimiter-pair extraction rules.
//!
//! A [`Rule`] names a field, optionally narrows the markup to a scope, then
//! tries each candidate [`Slice`] in order until one matches. The first match
//! is post-processed into the field value. Alternative spellings of the same
//! field on differently versioned pages are just extra candidates.

use crate::error::{Error, Result};
use crate::utils::text::{html_unescape, slice_between, strip_chars, TITLE_ILLEGAL_CHARS};

/// A start/end marker pair; the value is the text strictly between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub start: &'static str,
    pub end: &'static str,
}

impl Slice {
    /// Create a new [`Slice`].
    pub const fn new(start: &'static str, end: &'static str) -> Self {
        Self { start, end }
    }

    /// Apply the slice to `markup`.
    pub fn apply<'a>(&self, markup: &'a str) -> Option<&'a str> {
        slice_between(markup, self.start, self.end)
    }
}

/// One field extraction rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Field name, used in errors and logs.
    pub name: &'static str,
    /// Region of the markup the candidates are searched in. `None` searches
    /// the whole page.
    pub scope: Option<Slice>,
    /// Candidate slices, tried in order.
    pub candidates: &'static [Slice],
    /// A required field turns a miss into [`Error::Extraction`].
    pub required: bool,
    /// Turns the raw slice into the field value.
    pub post_process: fn(&str) -> String,
}

impl Rule {
    /// Return the post-processed value of the first matching candidate.
    pub fn apply(&self, markup: &str) -> Option<String> {
        let scoped = match self.scope {
            Some(scope) => scope.apply(markup)?,
            None => markup,
        };

        self.candidates
            .iter()
            .find_map(|candidate| candidate.apply(scoped))
            .map(self.post_process)
            .filter(|value| !value.is_empty())
    }

    /// Apply the rule, failing only when a required field is missing.
    pub fn evaluate(&self, markup: &str) -> Result<Option<String>> {
        match self.apply(markup) {
            Some(value) => Ok(Some(value)),
            None if self.required => Err(Error::Extraction(format!(
                "could not find the {} in the page markup",
                self.name
            ))),
            None => Ok(None),
        }
    }
}

/// Keep the slice as is.
pub fn verbatim(raw: &str) -> String {
    raw.to_string()
}

/// Decode HTML entities and trim surrounding whitespace.
pub fn decoded(raw: &str) -> String {
    html_unescape(raw).trim().to_string()
}

/// Title clean-up: drop the fixed two-character prefix that precedes the
/// description text, decode entities and strip filesystem-illegal characters.
pub fn title(raw: &str) -> String {
    let without_prefix: String = raw.chars().skip(2).collect();
    strip_chars(&html_unescape(&without_prefix), TITLE_ILLEGAL_CHARS)
        .trim()
        .to_string()
}

/// Page title, taken from the description meta tag up to the " by " separator.
pub const TITLE: Rule = Rule {
    name: "title",
    scope: None,
    candidates: &[Slice::new("<meta name=\"Description\" content=", " by ")],
    required: true,
    post_process: title,
};

/// Artist name from the page data block. Both spacing conventions seen in the
/// wild are accepted.
pub const ARTIST: Rule = Rule {
    name: "artist",
    scope: Some(Slice::new("var BandData = {", "}")),
    candidates: &[
        Slice::new("name : \"", "\","),
        Slice::new("name: \"", "\","),
    ],
    required: false,
    post_process: decoded,
};

/// Name of the album a page belongs to.
pub const ALBUM: Rule = Rule {
    name: "album",
    scope: None,
    candidates: &[Slice::new("<span itemprop=\"name\">", "</span>")],
    required: false,
    post_process: decoded,
};

/// Full size artwork link.
pub const ARTWORK: Rule = Rule {
    name: "artwork URL",
    scope: None,
    candidates: &[Slice::new("<a class=\"popupImage\" href=\"", "\">")],
    required: false,
    post_process: verbatim,
};

/// Body of the first embedded track information object, without its braces.
pub const TRACK_INFO: Rule = Rule {
    name: "track information",
    scope: None,
    candidates: &[Slice::new("trackinfo: [{", "}]")],
    required: false,
    post_process: verbatim,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_rule() {
        let markup = "<meta name=\"Description\" content=\"\nA &amp; B by Artist, released 2020\">";
        assert_eq!(TITLE.apply(markup).as_deref(), Some("A & B"));
    }

    #[test]
    fn test_title_rule_strips_illegal_characters() {
        let markup = "<meta name=\"Description\" content=\"\nWhy? Part: 2 by Artist\">";
        assert_eq!(TITLE.apply(markup).as_deref(), Some("Why Part 2"));
    }

    #[test]
    fn test_required_rule_errors() {
        let err = TITLE.evaluate("<html></html>").unwrap_err();
        assert!(matches!(err, Error::Extraction(msg) if msg.contains("title")));
    }

    #[test]
    fn test_optional_rule_yields_none() {
        assert_eq!(ALBUM.evaluate("<html></html>").unwrap(), None);
    }

    #[test]
    fn test_artist_fallback_spelling() {
        let spaced = "var BandData = {\n id : 1,\n name : \"Spaced\",\n}";
        let tight = "var BandData = {\n id: 1,\n name: \"Tight &amp; Co\",\n}";
        assert_eq!(ARTIST.apply(spaced).as_deref(), Some("Spaced"));
        assert_eq!(ARTIST.apply(tight).as_deref(), Some("Tight & Co"));
    }

    #[test]
    fn test_artist_scope_is_respected() {
        // A name outside the data block must not be picked up.
        let markup = "name: \"Outside\", var BandData = {\n id: 1\n}";
        assert_eq!(ARTIST.apply(markup), None);
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        assert_eq!(ALBUM.apply("<span itemprop=\"name\"></span>"), None);
    }
}
