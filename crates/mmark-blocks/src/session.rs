//! Per-document parsing state.

use crate::ial::AttributeList;

/// State owned by one document parse.
///
/// Holds the attribute lists scanned but not yet attached to a block, and
/// the current container nesting depth. Each parse creates its own session;
/// sessions are never shared between documents.
#[derive(Debug, Default)]
pub struct Session {
    pending: Vec<AttributeList>,
    depth: usize,
}

impl Session {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an attribute list for the next eligible container.
    pub fn push_pending(&mut self, list: AttributeList) {
        self.pending.push(list);
    }

    /// Attribute lists waiting to be attached.
    #[must_use]
    pub fn pending(&self) -> &[AttributeList] {
        &self.pending
    }

    /// Take every pending list, leaving none behind.
    pub fn take_pending(&mut self) -> Vec<AttributeList> {
        std::mem::take(&mut self.pending)
    }

    /// Current container nesting depth (0 at document level).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn enter(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
