//! Container extraction.
//!
//! A container is the maximal run of lines that carry its prefix, plus the
//! interior blank lines between them. Extraction strips the prefix from each
//! line and reports where the container ends so the dispatcher can resume.

use tracing::trace;

use crate::kind::ContainerKind;
use crate::util::{is_blank, line_end};

/// Stripped content of one container and the offset just past it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Prefix-stripped lines, newlines preserved.
    pub raw: String,
    /// Offset of the first byte not belonging to the container.
    pub end: usize,
}

/// Extract the container of `kind` that starts at the beginning of `input`.
///
/// Termination rules, checked line by line:
///
/// - a line carrying the prefix is stripped and kept;
/// - a blank line ends the container when it is the last line of input, or
///   when the next line is neither blank nor prefixed; otherwise it is kept;
/// - any other line ends the container, unless `lazy` is set, in which case
///   it is kept unstripped as a lazy continuation line.
///
/// A blank line that ends the container is not consumed.
#[must_use]
pub fn extract(input: &str, kind: ContainerKind, lazy: bool) -> Extraction {
    let bytes = input.as_bytes();
    let mut raw = String::with_capacity(input.len().min(4096));
    let mut beg = 0;
    let mut lines = 0usize;

    while beg < bytes.len() {
        let end = line_end(bytes, beg);
        let line = &bytes[beg..end];

        let pre = kind.prefix_len(line);
        if pre > 0 {
            raw.push_str(&input[beg + pre..end]);
        } else if is_blank(line) {
            if end >= bytes.len() {
                break;
            }
            let next = &bytes[end..line_end(bytes, end)];
            if kind.prefix_len(next) == 0 && !is_blank(next) {
                break;
            }
            raw.push_str(&input[beg..end]);
        } else if lazy {
            raw.push_str(&input[beg..end]);
        } else {
            break;
        }

        lines += 1;
        beg = end;
    }

    trace!(%kind, lines, end = beg, "extracted container");

    Extraction { raw, end: beg }
}
