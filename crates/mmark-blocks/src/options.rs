//! Parser configuration.

use crate::kind::ContainerKind;

/// Options controlling container extraction and attribute attachment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserOptions {
    /// Container kinds that consume pending attribute lists.
    ///
    /// Default: block quotes only.
    pub attach_attributes: Vec<ContainerKind>,
    /// Keep unprefixed, non-blank lines inside a container.
    ///
    /// Default: `false`
    pub lazy_continuation: bool,
    /// Maximum container nesting depth before content is kept as text.
    ///
    /// Default: 16
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserOptions {
    /// Create options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attach_attributes: vec![ContainerKind::BlockQuote],
            lazy_continuation: false,
            max_depth: 16,
        }
    }

    /// Set the container kinds that consume pending attribute lists.
    #[must_use]
    pub fn with_attach_attributes(mut self, kinds: impl IntoIterator<Item = ContainerKind>) -> Self {
        self.attach_attributes = kinds.into_iter().collect();
        self
    }

    /// Let every container kind consume pending attribute lists.
    #[must_use]
    pub fn with_attributes_on_all(self) -> Self {
        self.with_attach_attributes(ContainerKind::ALL)
    }

    /// Enable or disable lazy continuation lines.
    #[must_use]
    pub fn with_lazy_continuation(mut self, enabled: bool) -> Self {
        self.lazy_continuation = enabled;
        self
    }

    /// Set the maximum container nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Whether containers of `kind` consume pending attribute lists.
    #[must_use]
    pub fn attaches(&self, kind: ContainerKind) -> bool {
        self.attach_attributes.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParserOptions::default();
        assert!(options.attaches(ContainerKind::BlockQuote));
        assert!(!options.attaches(ContainerKind::Note));
        assert!(!options.lazy_continuation);
        assert_eq!(options.max_depth, 16);
    }

    #[test]
    fn test_attributes_on_all() {
        let options = ParserOptions::new().with_attributes_on_all();
        assert!(ContainerKind::ALL.into_iter().all(|k| options.attaches(k)));
    }

    #[test]
    fn test_builder() {
        let options = ParserOptions::new()
            .with_attach_attributes([ContainerKind::Figure])
            .with_lazy_continuation(true)
            .with_max_depth(2);
        assert!(options.attaches(ContainerKind::Figure));
        assert!(!options.attaches(ContainerKind::BlockQuote));
        assert!(options.lazy_continuation);
        assert_eq!(options.max_depth, 2);
    }
}
