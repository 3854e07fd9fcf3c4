//! Minimal rich text for license descriptions.
//!
//! License descriptions are authored as a tiny HTML subset: bold, links and
//! line breaks. [`RichText::from_html`] parses that subset into a [`Span`]
//! tree; every other tag is dropped and its text kept. Rendering to a
//! specific output (terminal, HTML, a widget toolkit) is the caller's job;
//! [`RichText::plain_text`] and [`RichText::to_html`] cover the common cases.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One node of a [`RichText`] tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Span {
    /// A run of text.
    Text { text: String },
    /// Emphasised content.
    Bold { children: Vec<Span> },
    /// A hyperlink around its children.
    Link { href: String, children: Vec<Span> },
    /// A hard line break.
    LineBreak,
}

impl Span {
    fn is_empty(&self) -> bool {
        match self {
            Span::Text { text } => text.is_empty(),
            Span::Bold { children } | Span::Link { children, .. } => {
                children.iter().all(Span::is_empty)
            }
            Span::LineBreak => false,
        }
    }

    fn write_plain(&self, out: &mut String) {
        match self {
            Span::Text { text } => out.push_str(text),
            Span::Bold { children } | Span::Link { children, .. } => {
                for child in children {
                    child.write_plain(out);
                }
            }
            Span::LineBreak => out.push('\n'),
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Span::Text { text } => escape_into(text, out),
            Span::Bold { children } => {
                out.push_str("<b>");
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</b>");
            }
            Span::Link { href, children } => {
                out.push_str("<a href=\"");
                escape_into(href, out);
                out.push_str("\">");
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</a>");
            }
            Span::LineBreak => out.push_str("<br>"),
        }
    }
}

/// Formatted text: a flat list of [`Span`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText {
    spans: Vec<Span>,
}

impl RichText {
    /// Empty rich text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap plain text verbatim, with no markup interpretation.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::default();
        }
        Self {
            spans: vec![Span::Text { text }],
        }
    }

    /// Build rich text from already-constructed spans.
    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Parse the supported HTML subset.
    ///
    /// `<b>`/`<strong>` become [`Span::Bold`], `<a href>` becomes
    /// [`Span::Link`], `<br>` a line break and `<p>` a paragraph break.
    /// Whitespace runs collapse to one space, as in HTML. Malformed markup
    /// never fails: unknown or unbalanced tags are ignored.
    ///
    /// ```
    /// use homage_license::RichText;
    ///
    /// let text = RichText::from_html("Use <b>freely</b>.<br>See &amp; share.");
    /// assert_eq!(text.plain_text(), "Use freely.\nSee & share.");
    /// ```
    pub fn from_html(html: &str) -> Self {
        HtmlParser::new().parse(html)
    }

    /// The top-level spans.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// `true` when there is no visible text and no line break.
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(Span::is_empty)
    }

    /// Render without markup; line breaks become `\n`.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for span in &self.spans {
            span.write_plain(&mut out);
        }
        out
    }

    /// Render back to the HTML subset accepted by [`RichText::from_html`].
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for span in &self.spans {
            span.write_html(&mut out);
        }
        out
    }
}

impl fmt::Display for RichText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain_text())
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for RichText {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

// ---- HTML subset parser ----

#[derive(Debug, PartialEq, Eq)]
enum FrameKind {
    Root,
    Bold,
    Link(String),
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    children: Vec<Span>,
}

impl Frame {
    fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(Span::Text { text: last }) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(Span::Text {
                text: text.to_string(),
            });
        }
    }

    fn into_span(self) -> Option<Span> {
        if self.children.is_empty() {
            return None;
        }
        match self.kind {
            FrameKind::Root => None,
            FrameKind::Bold => Some(Span::Bold {
                children: self.children,
            }),
            FrameKind::Link(href) => Some(Span::Link {
                href,
                children: self.children,
            }),
        }
    }
}

struct HtmlParser {
    stack: Vec<Frame>,
    at_line_start: bool,
    after_space: bool,
}

impl HtmlParser {
    fn new() -> Self {
        Self {
            stack: vec![Frame::new(FrameKind::Root)],
            at_line_start: true,
            after_space: false,
        }
    }

    fn parse(mut self, html: &str) -> RichText {
        let mut rest = html;
        while !rest.is_empty() {
            match rest.find('<') {
                Some(0) => match rest.find('>') {
                    Some(end) => {
                        self.tag(&rest[1..end]);
                        rest = &rest[end + 1..];
                    }
                    None => {
                        self.text(rest);
                        rest = "";
                    }
                },
                Some(start) => {
                    self.text(&rest[..start]);
                    rest = &rest[start..];
                }
                None => {
                    self.text(rest);
                    rest = "";
                }
            }
        }
        self.close_to(1);
        let root = self.stack.pop().map(|f| f.children).unwrap_or_default();
        RichText { spans: root }
    }

    fn current(&mut self) -> &mut Frame {
        // The root frame is never popped before `parse` finishes.
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn text(&mut self, raw: &str) {
        let decoded = decode_entities(raw);
        let mut collapsed = String::with_capacity(decoded.len());
        for ch in decoded.chars() {
            if ch.is_ascii_whitespace() {
                if !self.at_line_start && !self.after_space {
                    collapsed.push(' ');
                    self.after_space = true;
                }
                continue;
            }
            self.after_space = false;
            self.at_line_start = false;
            collapsed.push(ch);
        }
        if !collapsed.is_empty() {
            self.current().push_text(&collapsed);
        }
    }

    fn line_break(&mut self) {
        self.current().children.push(Span::LineBreak);
        self.at_line_start = true;
        self.after_space = false;
    }

    fn tag(&mut self, body: &str) {
        let body = body.trim();
        let (closing, body) = match body.strip_prefix('/') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, body),
        };
        let name_len = body
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(body.len());
        let name = body[..name_len].to_ascii_lowercase();
        let attrs = &body[name_len..];

        match (name.as_str(), closing) {
            ("b" | "strong", false) => self.stack.push(Frame::new(FrameKind::Bold)),
            ("b" | "strong", true) => self.close_matching(|k| *k == FrameKind::Bold),
            ("a", false) => {
                let href = attribute(attrs, "href").unwrap_or_default();
                self.stack.push(Frame::new(FrameKind::Link(href)));
            }
            ("a", true) => self.close_matching(|k| matches!(k, FrameKind::Link(_))),
            ("br", _) => self.line_break(),
            ("p", false) => {
                if !self.at_line_start {
                    self.line_break();
                    self.line_break();
                }
            }
            _ => {}
        }
    }

    fn close_matching(&mut self, matches: impl Fn(&FrameKind) -> bool) {
        if let Some(index) = self.stack.iter().rposition(|f| matches(&f.kind)) {
            if index > 0 {
                self.close_to(index);
            }
        }
    }

    /// Pop frames until `depth` remain, folding each into its parent.
    fn close_to(&mut self, depth: usize) {
        while self.stack.len() > depth.max(1) {
            let Some(frame) = self.stack.pop() else { break };
            if let Some(span) = frame.into_span() {
                self.current().children.push(span);
            }
        }
    }
}

/// Extract an attribute value from the text following a tag name.
fn attribute(attrs: &str, wanted: &str) -> Option<String> {
    let mut rest = attrs.trim_start_matches('/');
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return None;
        }
        let name_end = rest
            .find(|c: char| c == '=' || c.is_ascii_whitespace() || c == '/')
            .unwrap_or(rest.len());
        let name = &rest[..name_end];
        rest = rest[name_end..].trim_start();

        let value = if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let (value, remainder) = match after_eq.chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    let inner = &after_eq[1..];
                    match inner.find(quote) {
                        Some(end) => (&inner[..end], &inner[end + 1..]),
                        None => (inner, ""),
                    }
                }
                _ => {
                    let end = after_eq
                        .find(|c: char| c.is_ascii_whitespace())
                        .unwrap_or(after_eq.len());
                    (&after_eq[..end], &after_eq[end..])
                }
            };
            rest = remainder;
            Some(value)
        } else {
            if name.is_empty() {
                // Stray character such as a lone '/'.
                rest = rest.get(1..).unwrap_or("");
            }
            None
        };

        if name.eq_ignore_ascii_case(wanted) {
            return Some(decode_entities(value.unwrap_or("")));
        }
    }
}

fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&rest[1..semi]).map(|ch| (ch, semi)));
        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}
