//! Line scanning helpers shared by the extractor and the dispatcher.

/// Offset just past the line starting at `start`, including its `\n`.
///
/// A final line without a terminator extends to the end of input.
#[must_use]
pub(crate) fn line_end(input: &[u8], start: usize) -> usize {
    input
        .get(start..)
        .and_then(|rest| rest.iter().position(|&b| b == b'\n'))
        .map_or(input.len(), |pos| start + pos + 1)
}

/// Whether a line holds nothing but spaces, tabs and its line ending.
#[must_use]
pub(crate) fn is_blank(line: &[u8]) -> bool {
    line.iter().all(|&b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
}
