//! HTML backend.
//!
//! Produces HTML5 for containers and delegates ordinary text runs to
//! pulldown-cmark.

use std::fmt::Write;

use pulldown_cmark::{Options, Parser, html};

use crate::backend::RenderBackend;
use crate::ial::{AttributeList, DocumentPart};

/// HTML render backend.
///
/// Produces:
/// - `<blockquote>` for `>`
/// - `<aside class="note">` for `N>` and `<aside>` for `A>`
/// - `<section class="abstract">` for `AB>`
/// - `<figure>` for `F>` and `<figure class="table">` for `T>`
///
/// Attribute lists attached before a container are merged and written on
/// its opening tag.
pub struct HtmlBackend {
    attributes: Option<AttributeList>,
    gfm: bool,
}

impl Default for HtmlBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlBackend {
    /// Create a backend with GitHub Flavored Markdown enabled for text runs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attributes: None,
            gfm: true,
        }
    }

    /// Enable or disable GFM extensions (tables, strikethrough, task lists).
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES
        } else {
            Options::empty()
        }
    }

    fn wrap(&mut self, out: &mut String, tag: &str, class: Option<&str>, cooked: &str) {
        let attrs = self.attributes.take().unwrap_or_default();

        out.push('<');
        out.push_str(tag);
        if let Some(id) = &attrs.id {
            write!(out, r#" id="{}""#, escape_html(id)).unwrap();
        }

        let classes: Vec<&str> = class
            .into_iter()
            .chain(attrs.classes.iter().map(String::as_str))
            .collect();
        if !classes.is_empty() {
            write!(out, r#" class="{}""#, escape_html(&classes.join(" "))).unwrap();
        }

        for (key, value) in &attrs.attributes {
            if key == "id" || key == "class" || !is_attribute_name(key) {
                continue;
            }
            write!(out, r#" {key}="{}""#, escape_html(value)).unwrap();
        }
        out.push_str(">\n");

        out.push_str(cooked);
        writeln!(out, "</{tag}>").unwrap();
    }
}

impl RenderBackend for HtmlBackend {
    fn attach_attributes(&mut self, lists: Vec<AttributeList>) {
        self.attributes = Some(AttributeList::merge(&lists));
    }

    fn block_quote(&mut self, out: &mut String, cooked: &str) {
        self.wrap(out, "blockquote", None, cooked);
    }

    fn note(&mut self, out: &mut String, cooked: &str) {
        self.wrap(out, "aside", Some("note"), cooked);
    }

    fn aside(&mut self, out: &mut String, cooked: &str) {
        self.wrap(out, "aside", None, cooked);
    }

    fn abstract_block(&mut self, out: &mut String, cooked: &str) {
        self.wrap(out, "section", Some("abstract"), cooked);
    }

    fn figure(&mut self, out: &mut String, cooked: &str) {
        self.wrap(out, "figure", None, cooked);
    }

    fn table_figure(&mut self, out: &mut String, cooked: &str) {
        self.wrap(out, "figure", Some("table"), cooked);
    }

    fn text(&mut self, out: &mut String, text: &str) {
        html::push_html(out, Parser::new_ext(text, self.parser_options()));
    }

    fn document_part(&mut self, out: &mut String, part: DocumentPart) {
        writeln!(out, "<!-- {} -->", part.keyword()).unwrap();
    }
}

/// Whether `name` is safe to emit as an HTML attribute name.
fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

/// Escape special HTML characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
