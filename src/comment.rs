//! Conversion of schema comments into display-ready markup.

use std::fmt;

use serde::Serialize;

/// A documentation comment attached to a schema element.
///
/// The comment is stored as a sequence of paragraphs. Consecutive non-blank lines form a
/// paragraph and are joined with a single space, while one or more blank lines start a new
/// paragraph.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Comment {
    paragraphs: Vec<String>,
}

/// Controls how much of a [`Comment`] is rendered by [`format`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CommentMode {
    /// Render only the first paragraph, for compact summaries.
    FirstParagraph,
    /// Render every paragraph in order.
    FullText,
}

/// Text which has already been escaped for inclusion in HTML, and must not be escaped again.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Comment {
    /// Creates a comment from its raw lines, as they appear after the comment marker.
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut paragraphs = Vec::new();
        let mut current = String::new();

        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() {
                if !current.is_empty() {
                    paragraphs.push(std::mem::take(&mut current));
                }
            } else {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(line);
            }
        }

        if !current.is_empty() {
            paragraphs.push(current);
        }

        Comment { paragraphs }
    }

    /// Creates a comment from raw text, splitting it into lines.
    pub fn parse(text: &str) -> Self {
        Comment::from_lines(text.lines())
    }

    /// The paragraphs of this comment, with lines joined and surrounding whitespace removed.
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// Returns `true` if the comment contains no text.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Comment {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Comment::from_lines(iter)
    }
}

impl Markup {
    /// Wraps text which is already safe to embed in HTML.
    pub fn from_safe(text: impl Into<String>) -> Self {
        Markup(text.into())
    }

    /// Escapes `text` and wraps the result.
    pub fn escape(text: &str) -> Self {
        let mut markup = Markup::default();
        push_escaped(&mut markup.0, text);
        markup
    }

    /// The markup as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if there is no markup.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts into the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Markup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Markup {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Markup {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Formats a comment as a sequence of HTML paragraphs.
///
/// Each paragraph is escaped and rendered as `<p>...</p>` followed by a newline. An absent
/// comment produces empty markup.
pub fn format(comment: Option<&Comment>, mode: CommentMode) -> Markup {
    let comment = match comment {
        Some(comment) => comment,
        None => return Markup::default(),
    };

    let count = match mode {
        CommentMode::FirstParagraph => 1,
        CommentMode::FullText => comment.paragraphs.len(),
    };

    let mut result = String::new();
    for paragraph in comment.paragraphs.iter().take(count) {
        result.push_str("<p>");
        push_escaped(&mut result, paragraph);
        result.push_str("</p>\n");
    }
    Markup(result)
}

fn push_escaped(buf: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '"' => buf.push_str("&#34;"),
            '\'' => buf.push_str("&#39;"),
            _ => buf.push(ch),
        }
    }
}
