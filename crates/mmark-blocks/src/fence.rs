//! Code fence tracking for the block dispatcher.
//!
//! Container markers and attribute lists inside a fenced code block are
//! literal text, so the dispatcher follows fence state line by line.

/// Tracks whether the dispatcher is inside a fenced code block.
///
/// A fence opens with three or more backticks or tildes, indented by at most
/// three spaces, and closes with a run of the same character at least as long
/// followed only by whitespace.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<(u8, usize)>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed one line. Returns `true` if it opened or closed a fence.
    pub(crate) fn update(&mut self, line: &[u8]) -> bool {
        let Some((ch, len, rest)) = fence_run(line) else {
            return false;
        };

        match self.open {
            Some((open_ch, open_len)) => {
                if ch == open_ch && len >= open_len && rest.iter().all(u8::is_ascii_whitespace) {
                    self.open = None;
                    return true;
                }
                false
            }
            None => {
                // Backtick fences cannot carry backticks in their info string.
                if ch == b'`' && rest.contains(&b'`') {
                    return false;
                }
                self.open = Some((ch, len));
                true
            }
        }
    }
}

/// Split a line into its fence character, run length and remainder.
fn fence_run(line: &[u8]) -> Option<(u8, usize, &[u8])> {
    let indent = line.iter().take(4).take_while(|&&b| b == b' ').count();
    if indent > 3 {
        return None;
    }

    let body = &line[indent..];
    let ch = *body.first().filter(|&&b| b == b'`' || b == b'~')?;
    let len = body.iter().take_while(|&&b| b == ch).count();
    (len >= 3).then(|| (ch, len, &body[len..]))
}
