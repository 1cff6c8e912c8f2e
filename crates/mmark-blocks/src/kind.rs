//! Container kinds and their line prefixes.
//!
//! Every container is a run of lines that start with a fixed marker such as
//! `>` or `N>`, optionally indented by up to three spaces.

use std::fmt;
use std::str::FromStr;

/// Maximum number of leading spaces allowed before a container marker.
pub const MAX_INDENT: usize = 3;

/// Line-prefixed container block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ContainerKind {
    /// `>` block quotation.
    BlockQuote,
    /// `N>` note.
    Note,
    /// `A>` aside.
    Aside,
    /// `AB>` abstract.
    Abstract,
    /// `F>` figure.
    Figure,
    /// `T>` table figure.
    #[cfg_attr(feature = "serde", serde(rename = "table"))]
    TableFigure,
}

impl ContainerKind {
    /// All kinds, in the order the dispatcher tries them.
    pub const ALL: [Self; 6] = [
        Self::BlockQuote,
        Self::Note,
        Self::Aside,
        Self::Abstract,
        Self::Figure,
        Self::TableFigure,
    ];

    /// Marker bytes that open every line of this container.
    #[must_use]
    pub fn marker(self) -> &'static [u8] {
        match self {
            Self::BlockQuote => b">",
            Self::Note => b"N>",
            Self::Aside => b"A>",
            Self::Abstract => b"AB>",
            Self::Figure => b"F>",
            Self::TableFigure => b"T>",
        }
    }

    /// Name used in configuration files and on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::BlockQuote => "blockquote",
            Self::Note => "note",
            Self::Aside => "aside",
            Self::Abstract => "abstract",
            Self::Figure => "figure",
            Self::TableFigure => "table",
        }
    }

    /// Length of this kind's prefix at the start of `line`, or 0.
    #[must_use]
    pub fn prefix_len(self, line: &[u8]) -> usize {
        prefix_len(line, self.marker())
    }

    /// Find the kind whose prefix opens `line`.
    #[must_use]
    pub fn detect(line: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.prefix_len(line) > 0)
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a container kind name is not recognized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown container kind: {}", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for ContainerKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownKind(s.to_owned()))
    }
}

/// Length of `indent + marker (+ one space)` at the start of `line`.
///
/// Returns 0 when the marker is absent or indented by four or more spaces.
#[must_use]
pub fn prefix_len(line: &[u8], marker: &[u8]) -> usize {
    let indent = line
        .iter()
        .take(MAX_INDENT)
        .take_while(|&&b| b == b' ')
        .count();

    let Some(rest) = line.get(indent..) else {
        return 0;
    };
    if marker.is_empty() || !rest.starts_with(marker) {
        return 0;
    }

    let len = indent + marker.len();
    if line.get(len) == Some(&b' ') {
        len + 1
    } else {
        len
    }
}
