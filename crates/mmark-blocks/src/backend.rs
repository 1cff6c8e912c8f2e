//! Render backend trait for format-specific output.
//!
//! The block parser finds containers and attribute lists; a backend turns the
//! cooked content of each container into output markup.

use crate::ial::{AttributeList, DocumentPart};
use crate::kind::ContainerKind;

/// Backend trait for format-specific rendering operations.
///
/// Every container method receives `cooked`, the already rendered content of
/// the container, and appends the markup for exactly one container to `out`.
///
/// Before a container whose kind consumes attribute lists is rendered, the
/// parser calls [`attach_attributes`](Self::attach_attributes) once with
/// every pending list. The call is skipped when nothing is pending.
pub trait RenderBackend {
    /// Receive the attribute lists for the next container.
    fn attach_attributes(&mut self, lists: Vec<AttributeList>);

    /// Render a `>` block quotation.
    fn block_quote(&mut self, out: &mut String, cooked: &str);

    /// Render an `N>` note.
    fn note(&mut self, out: &mut String, cooked: &str);

    /// Render an `A>` aside.
    fn aside(&mut self, out: &mut String, cooked: &str);

    /// Render an `AB>` abstract.
    fn abstract_block(&mut self, out: &mut String, cooked: &str);

    /// Render an `F>` figure.
    fn figure(&mut self, out: &mut String, cooked: &str);

    /// Render a `T>` table figure.
    fn table_figure(&mut self, out: &mut String, cooked: &str);

    /// Render a run of ordinary lines that belong to no container.
    fn text(&mut self, out: &mut String, text: &str);

    /// Render a `{frontmatter}`, `{mainmatter}` or `{backmatter}` marker.
    ///
    /// Default emits nothing.
    fn document_part(&mut self, _out: &mut String, _part: DocumentPart) {}

    /// Dispatch to the method for `kind`.
    fn container(&mut self, kind: ContainerKind, out: &mut String, cooked: &str) {
        match kind {
            ContainerKind::BlockQuote => self.block_quote(out, cooked),
            ContainerKind::Note => self.note(out, cooked),
            ContainerKind::Aside => self.aside(out, cooked),
            ContainerKind::Abstract => self.abstract_block(out, cooked),
            ContainerKind::Figure => self.figure(out, cooked),
            ContainerKind::TableFigure => self.table_figure(out, cooked),
        }
    }
}
