//! Container block and inline attribute list parser.
//!
//! This crate recognizes line-prefixed container blocks and the inline
//! attribute lists that annotate them, re-parses each container's content as
//! ordinary block content, and hands the result to a [`RenderBackend`].
//!
//! # Containers
//!
//! | Kind | Marker |
//! |---|---|
//! | [`BlockQuote`](ContainerKind::BlockQuote) | `>` |
//! | [`Note`](ContainerKind::Note) | `N>` |
//! | [`Aside`](ContainerKind::Aside) | `A>` |
//! | [`Abstract`](ContainerKind::Abstract) | `AB>` |
//! | [`Figure`](ContainerKind::Figure) | `F>` |
//! | [`TableFigure`](ContainerKind::TableFigure) | `T>` |
//!
//! Each marker may be indented by up to three spaces and is followed by at
//! most one space that belongs to the prefix.
//!
//! # Attribute lists
//!
//! A line holding `{#id .class key="value"}` queues an [`AttributeList`] for
//! the next container of a kind that accepts attributes (block quotes by
//! default, see [`ParserOptions`]).
//!
//! # Example
//!
//! ```
//! use mmark_blocks::{BlockParser, HtmlBackend};
//!
//! let mut parser = BlockParser::new(HtmlBackend::new());
//! let html = parser.parse("N> first line\nN> second line\n\nplain text\n");
//! assert_eq!(
//!     html,
//!     "<aside class=\"note\">\n<p>first line\nsecond line</p>\n</aside>\n<p>plain text</p>\n"
//! );
//! ```

mod backend;
pub mod container;
mod fence;
mod html;
pub mod ial;
mod kind;
mod options;
mod parser;
mod session;
mod util;

pub use backend::RenderBackend;
pub use container::{Extraction, extract};
pub use html::{HtmlBackend, escape_html};
pub use ial::{AttributeList, DocumentPart};
pub use kind::{ContainerKind, MAX_INDENT, UnknownKind, prefix_len};
pub use options::ParserOptions;
pub use parser::BlockParser;
pub use session::Session;

/// Render a document to HTML with the given options.
#[must_use]
pub fn render_html(input: &str, options: ParserOptions) -> String {
    BlockParser::with_options(HtmlBackend::new(), options).parse(input)
}
