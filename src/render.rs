// Search result rendering: turns a search hit into a `[url]` line and,
// for content searches, a `[match]` line where the words the service
// wrapped in `<b>...</b>` are highlighted.
//
// Markers are stripped with plain substring replacement. A match that
// spans several words (`<b>quick brown</b>`) only highlights the first
// word and leaves the trailing `</b>` on the last one as-is. Only spaces
// separate words, so a marked word right after a newline or tab stays
// glued to the previous word and keeps its markers.

use crate::api::{SearchField, SearchHit};
use crossterm::style::Stylize;
use std::fmt;

const OPEN: &str = "<b>";
const CLOSE: &str = "</b>";

/// A word of the match line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Highlight(String),
}

/// A hit ready to print. `matched` is `None` when only the URL is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedHit {
    pub url: String,
    pub matched: Option<Vec<Segment>>,
}

/// Render `hit`. Content is skipped for URL-only output and for searches
/// on the URL field.
pub fn render_hit(hit: &SearchHit, url_only: bool, field: Option<SearchField>) -> RenderedHit {
    let matched = if url_only || field == Some(SearchField::Url) {
        None
    } else {
        Some(segments(&hit.content))
    };
    RenderedHit {
        url: hit.url.clone(),
        matched,
    }
}

/// Split `content` on single spaces, so runs of spaces survive the
/// rejoin unchanged.
pub fn segments(content: &str) -> Vec<Segment> {
    content
        .split(' ')
        .map(|word| {
            if word.starts_with(OPEN) {
                Segment::Highlight(word.replace(OPEN, "").replace(CLOSE, ""))
            } else {
                Segment::Plain(word.to_string())
            }
        })
        .collect()
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Plain(word) => f.write_str(word),
            Segment::Highlight(word) => write!(f, "{}", word.as_str().yellow()),
        }
    }
}

impl fmt::Display for RenderedHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", "[url]".green(), self.url.as_str().underlined())?;
        if let Some(segments) = &self.matched {
            write!(f, "\n{}: ", "[match]".green())?;
            for (i, segment) in segments.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", segment)?;
            }
        }
        Ok(())
    }
}

/// Render a whole result list, one hit after another.
pub fn render_hits(hits: &[SearchHit], url_only: bool, field: Option<SearchField>) -> String {
    hits.iter()
        .map(|hit| render_hit(hit, url_only, field).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(content: &str) -> SearchHit {
        SearchHit {
            url: "https://example.com".into(),
            content: content.into(),
        }
    }

    fn plain(s: &str) -> Segment {
        Segment::Plain(s.into())
    }

    fn bold(s: &str) -> Segment {
        Segment::Highlight(s.into())
    }

    #[test]
    fn highlights_only_marked_word() {
        let rendered = render_hit(&hit("the <b>quick</b> fox"), false, Some(SearchField::Content));
        assert_eq!(
            rendered.matched,
            Some(vec![plain("the"), bold("quick"), plain("fox")])
        );
    }

    #[test]
    fn url_only_ignores_content() {
        let rendered = render_hit(&hit("the <b>quick</b> fox"), true, Some(SearchField::Content));
        assert_eq!(rendered.matched, None);
        assert_eq!(
            rendered.to_string(),
            format!("{}: {}", "[url]".green(), "https://example.com".underlined())
        );
    }

    #[test]
    fn url_field_search_shows_url_line_only() {
        let rendered = render_hit(&hit("whatever"), false, Some(SearchField::Url));
        assert_eq!(rendered.matched, None);
    }

    #[test]
    fn missing_field_renders_content() {
        let rendered = render_hit(&hit("a <b>b</b>"), false, None);
        assert_eq!(rendered.matched, Some(vec![plain("a"), bold("b")]));
    }

    #[test]
    fn clean_content_keeps_spacing() {
        let content = "no  markers here ";
        let words = segments(content);
        assert!(words.iter().all(|s| matches!(s, Segment::Plain(_))));
        let rejoined = words.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(" ");
        assert_eq!(rejoined, content);
    }

    #[test]
    fn empty_content_yields_empty_match_section() {
        let rendered = render_hit(&hit(""), false, None);
        assert_eq!(rendered.matched, Some(vec![plain("")]));
        assert!(rendered.to_string().ends_with(&format!("{}: ", "[match]".green())));
    }

    #[test]
    fn marker_spanning_words_is_not_an_error() {
        assert_eq!(
            segments("<b>quick brown</b> fox"),
            vec![bold("quick"), plain("brown</b>"), plain("fox")]
        );
    }

    #[test]
    fn marker_after_newline_or_tab_is_left_in_place() {
        assert_eq!(
            segments("foo\n<b>bar</b> baz"),
            vec![plain("foo\n<b>bar</b>"), plain("baz")]
        );
        assert_eq!(segments("a\t<b>b</b>"), vec![plain("a\t<b>b</b>")]);
    }

    #[test]
    fn highlighted_word_keeps_trailing_punctuation() {
        assert_eq!(segments("<b>rust</b>, ok"), vec![bold("rust,"), plain("ok")]);
    }

    #[test]
    fn display_joins_url_and_match_lines() {
        let rendered = render_hit(&hit("the <b>quick</b> fox"), false, None);
        let expected = format!(
            "{}: {}\n{}: the {} fox",
            "[url]".green(),
            "https://example.com".underlined(),
            "[match]".green(),
            "quick".yellow()
        );
        assert_eq!(rendered.to_string(), expected);
    }

    #[test]
    fn hits_are_separated_by_newlines() {
        let hits = vec![hit("a"), hit("b")];
        let out = render_hits(&hits, true, None);
        assert_eq!(out.lines().count(), 2);
    }
}
