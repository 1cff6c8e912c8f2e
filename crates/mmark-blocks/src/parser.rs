//! Block dispatcher.
//!
//! Walks a document line by line, hands container lines to the extractor,
//! queues attribute lists, and re-enters itself on every container's
//! stripped content.

use tracing::{debug, warn};

use crate::backend::RenderBackend;
use crate::container::extract;
use crate::fence::FenceTracker;
use crate::ial::{self, DocumentPart};
use crate::kind::ContainerKind;
use crate::options::ParserOptions;
use crate::session::Session;
use crate::util::{is_blank, line_end};

/// Block parser generic over its render backend.
///
/// # Example
///
/// ```
/// use mmark_blocks::{BlockParser, HtmlBackend};
///
/// let mut parser = BlockParser::new(HtmlBackend::new());
/// let html = parser.parse("{#tip}\n> Quoted text\n");
/// assert!(html.starts_with(r#"<blockquote id="tip">"#));
/// ```
pub struct BlockParser<B: RenderBackend> {
    options: ParserOptions,
    backend: B,
}

impl<B: RenderBackend> BlockParser<B> {
    /// Create a parser with default options.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, ParserOptions::default())
    }

    /// Create a parser with custom options.
    #[must_use]
    pub fn with_options(backend: B, options: ParserOptions) -> Self {
        Self { options, backend }
    }

    /// Parser options.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Borrow the backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consume the parser and return its backend.
    #[must_use]
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Parse a whole document with a fresh session.
    pub fn parse(&mut self, input: &str) -> String {
        let mut session = Session::new();
        let out = self.parse_blocks(&mut session, input);

        let left = session.pending().len();
        if left > 0 {
            debug!(count = left, "attribute lists left unattached at end of document");
        }
        out
    }

    /// Parse `input` as block content within an existing session.
    ///
    /// Used for the document itself and, recursively, for the stripped
    /// content of every container.
    pub fn parse_blocks(&mut self, session: &mut Session, input: &str) -> String {
        let bytes = input.as_bytes();
        let mut out = String::with_capacity(input.len());
        let mut fence = FenceTracker::new();
        let mut text_start: Option<usize> = None;
        let mut pos = 0;

        while pos < bytes.len() {
            let end = line_end(bytes, pos);
            let line = &bytes[pos..end];

            if fence.in_fence() {
                fence.update(line);
                pos = end;
                continue;
            }
            if fence.update(line) {
                text_start.get_or_insert(pos);
                pos = end;
                continue;
            }
            if is_blank(line) {
                pos = end;
                continue;
            }

            if let Some((part, len)) = DocumentPart::scan(&input[pos..end])
                && is_blank(&line[len..])
            {
                self.flush_text(input, &mut text_start, pos, &mut out);
                self.backend.document_part(&mut out, part);
                pos = end;
                continue;
            }

            if let Some((list, len)) = ial::scan(&input[pos..end])
                && is_blank(&line[len..])
            {
                self.flush_text(input, &mut text_start, pos, &mut out);
                session.push_pending(list);
                pos = end;
                continue;
            }

            if let Some(kind) = ContainerKind::detect(line) {
                self.flush_text(input, &mut text_start, pos, &mut out);
                let extraction = extract(&input[pos..], kind, self.options.lazy_continuation);
                self.finish_container(session, kind, &extraction.raw, &mut out);
                pos += extraction.end.max(end - pos);
                continue;
            }

            text_start.get_or_insert(pos);
            pos = end;
        }

        self.flush_text(input, &mut text_start, bytes.len(), &mut out);
        out
    }

    /// Re-parse a container's raw content and hand the result to the backend.
    fn finish_container(
        &mut self,
        session: &mut Session,
        kind: ContainerKind,
        raw: &str,
        out: &mut String,
    ) {
        // Lists written before the container belong to it, not to containers
        // nested inside its content.
        let attached = if self.options.attaches(kind) {
            session.take_pending()
        } else {
            Vec::new()
        };

        let mut cooked = String::new();
        if session.depth() >= self.options.max_depth {
            warn!(
                %kind,
                depth = session.depth(),
                "container nesting too deep, keeping content as text"
            );
            self.backend.text(&mut cooked, raw);
        } else {
            session.enter();
            cooked = self.parse_blocks(session, raw);
            session.leave();
        }

        if !attached.is_empty() {
            debug!(%kind, count = attached.len(), "attaching attribute lists");
            self.backend.attach_attributes(attached);
        }
        debug!(%kind, depth = session.depth(), "rendering container");
        self.backend.container(kind, out, &cooked);
    }

    fn flush_text(
        &mut self,
        input: &str,
        text_start: &mut Option<usize>,
        end: usize,
        out: &mut String,
    ) {
        if let Some(start) = text_start.take() {
            self.backend.text(out, &input[start..end]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ial::AttributeList;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Attach(Vec<AttributeList>),
        Container(ContainerKind, String),
        Text(String),
        Part(DocumentPart),
    }

    /// Backend that records every call and renders containers as `[kind|cooked]`.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Recorder {
        fn emit(&mut self, kind: ContainerKind, out: &mut String, cooked: &str) {
            self.calls.push(Call::Container(kind, cooked.to_owned()));
            out.push_str(&format!("[{kind}|{cooked}]"));
        }
    }

    impl RenderBackend for Recorder {
        fn attach_attributes(&mut self, lists: Vec<AttributeList>) {
            self.calls.push(Call::Attach(lists));
        }

        fn block_quote(&mut self, out: &mut String, cooked: &str) {
            self.emit(ContainerKind::BlockQuote, out, cooked);
        }

        fn note(&mut self, out: &mut String, cooked: &str) {
            self.emit(ContainerKind::Note, out, cooked);
        }

        fn aside(&mut self, out: &mut String, cooked: &str) {
            self.emit(ContainerKind::Aside, out, cooked);
        }

        fn abstract_block(&mut self, out: &mut String, cooked: &str) {
            self.emit(ContainerKind::Abstract, out, cooked);
        }

        fn figure(&mut self, out: &mut String, cooked: &str) {
            self.emit(ContainerKind::Figure, out, cooked);
        }

        fn table_figure(&mut self, out: &mut String, cooked: &str) {
            self.emit(ContainerKind::TableFigure, out, cooked);
        }

        fn text(&mut self, out: &mut String, text: &str) {
            self.calls.push(Call::Text(text.to_owned()));
            out.push_str(text);
        }

        fn document_part(&mut self, out: &mut String, part: DocumentPart) {
            self.calls.push(Call::Part(part));
            out.push_str(&format!("<{}>", part.keyword()));
        }
    }

    fn run(input: &str, options: ParserOptions) -> (String, Vec<Call>) {
        let mut parser = BlockParser::with_options(Recorder::default(), options);
        let out = parser.parse(input);
        (out, parser.into_backend().calls)
    }

    fn list(syntax: &str) -> AttributeList {
        ial::scan(syntax).unwrap().0
    }

    fn text(s: &str) -> Call {
        Call::Text(s.to_owned())
    }

    fn container(kind: ContainerKind, s: &str) -> Call {
        Call::Container(kind, s.to_owned())
    }

    #[test]
    fn test_note_end_to_end() {
        let (out, calls) = run(
            "N> first line\nN> second line\n\nplain text\n",
            ParserOptions::default(),
        );
        assert_eq!(out, "[note|first line\nsecond line\n]plain text\n");
        assert_eq!(
            calls,
            vec![
                text("first line\nsecond line\n"),
                container(ContainerKind::Note, "first line\nsecond line\n"),
                text("plain text\n"),
            ]
        );
    }

    #[test]
    fn test_every_kind_dispatched() {
        let input = "> q\n\nN> n\n\nA> a\n\nAB> ab\n\nF> f\n\nT> t\n";
        let (out, _) = run(input, ParserOptions::default());
        assert_eq!(
            out,
            "[blockquote|q\n][note|n\n][aside|a\n][abstract|ab\n][figure|f\n][table|t\n]"
        );
    }

    #[test]
    fn test_block_quote_consumes_pending_attributes() {
        let (_, calls) = run("{#q .x}\n> quoted\n", ParserOptions::default());
        assert_eq!(
            calls,
            vec![
                text("quoted\n"),
                Call::Attach(vec![list("{#q .x}")]),
                container(ContainerKind::BlockQuote, "quoted\n"),
            ]
        );
    }

    #[test]
    fn test_pending_attributes_accumulate() {
        let (_, calls) = run("{#a}\n{.b}\n> q\n", ParserOptions::default());
        assert_eq!(calls[1], Call::Attach(vec![list("{#a}"), list("{.b}")]));
    }

    #[test]
    fn test_note_leaves_pending_attributes_by_default() {
        let (_, calls) = run("{#n}\nN> note\n> quote\n", ParserOptions::default());
        assert_eq!(
            calls,
            vec![
                text("note\n"),
                container(ContainerKind::Note, "note\n"),
                text("quote\n"),
                Call::Attach(vec![list("{#n}")]),
                container(ContainerKind::BlockQuote, "quote\n"),
            ]
        );
    }

    #[test]
    fn test_all_kinds_can_attach() {
        let options = ParserOptions::new().with_attributes_on_all();
        let (_, calls) = run("{#n}\nN> note\n", options);
        assert_eq!(
            calls,
            vec![
                text("note\n"),
                Call::Attach(vec![list("{#n}")]),
                container(ContainerKind::Note, "note\n"),
            ]
        );
    }

    #[test]
    fn test_no_attach_without_pending() {
        let (_, calls) = run("> one\n\ntext\n\n> two\n", ParserOptions::default());
        assert!(!calls.iter().any(|c| matches!(c, Call::Attach(_))));
    }

    #[test]
    fn test_attributes_consumed_once() {
        let (_, calls) = run("{#a}\n> one\n\ntext\n\n> two\n", ParserOptions::default());
        let attaches = calls
            .iter()
            .filter(|c| matches!(c, Call::Attach(_)))
            .count();
        assert_eq!(attaches, 1);
    }

    #[test]
    fn test_outer_quote_owns_preceding_attributes() {
        let (_, calls) = run("{#outer}\n> > inner\n", ParserOptions::default());
        assert_eq!(
            calls,
            vec![
                text("inner\n"),
                container(ContainerKind::BlockQuote, "inner\n"),
                Call::Attach(vec![list("{#outer}")]),
                container(ContainerKind::BlockQuote, "[blockquote|inner\n]"),
            ]
        );
    }

    #[test]
    fn test_attribute_list_inside_container() {
        let (_, calls) = run("N> {.inner}\nN> > quoted\n", ParserOptions::default());
        assert!(calls.contains(&Call::Attach(vec![list("{.inner}")])));
    }

    #[test]
    fn test_attribute_list_with_trailing_text_is_text() {
        let (out, calls) = run("{.x} hello\n> q\n", ParserOptions::default());
        assert_eq!(out, "{.x} hello\n[blockquote|q\n]");
        assert!(!calls.iter().any(|c| matches!(c, Call::Attach(_))));
    }

    #[test]
    fn test_reserved_keyword_is_document_part() {
        let (out, calls) = run(
            "{frontmatter}\nintro\n{mainmatter}\n> q\n",
            ParserOptions::default(),
        );
        assert_eq!(out, "<frontmatter>intro\n<mainmatter>[blockquote|q\n]");
        assert_eq!(calls[0], Call::Part(DocumentPart::Front));
        assert!(!calls.iter().any(|c| matches!(c, Call::Attach(_))));
    }

    #[test]
    fn test_text_run_ends_at_container() {
        let (out, _) = run("para\n> quote\nafter\n", ParserOptions::default());
        assert_eq!(out, "para\n[blockquote|quote\n]after\n");
    }

    #[test]
    fn test_lazy_continuation_option() {
        let options = ParserOptions::new().with_lazy_continuation(true);
        let (out, _) = run("> quote\nlazy\n\nafter\n", options);
        assert_eq!(out, "[blockquote|quote\nlazy\n]after\n");
    }

    #[test]
    fn test_fenced_code_hides_markers() {
        let input = "```\n> not a quote\n{#not-an-ial}\n```\n";
        let (out, calls) = run(input, ParserOptions::default());
        assert_eq!(out, input);
        assert_eq!(calls, vec![text(input)]);
    }

    #[test]
    fn test_indented_marker_is_text() {
        let (out, _) = run("    > code\n", ParserOptions::default());
        assert_eq!(out, "    > code\n");
    }

    #[test]
    fn test_nesting_depth_guard() {
        let options = ParserOptions::new().with_max_depth(1);
        let (out, _) = run("> > > deep\n", options);
        assert_eq!(out, "[blockquote|[blockquote|> deep\n]]");
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut parser = BlockParser::new(Recorder::default());
        parser.parse("{#stale}\n");
        parser.parse("> q\n");
        let calls = parser.into_backend().calls;
        assert!(!calls.iter().any(|c| matches!(c, Call::Attach(_))));
    }

    #[test]
    fn test_empty_input() {
        let (out, calls) = run("", ParserOptions::default());
        assert_eq!(out, "");
        assert!(calls.is_empty());
    }
}
