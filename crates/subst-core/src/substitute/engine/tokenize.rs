//! Tokenization for the substitution engine
//!
//! Provides O(n) placeholder scanning using a state machine, used to
//! enumerate brace-free names. Matching a known name goes through
//! [`placeholder_token`] instead, so names containing braces still match.

/// Literal `{name}` text matched for a placeholder
pub(crate) fn placeholder_token(name: &str) -> String {
    format!("{{{name}}}")
}

/// Tokenization state machine
///
/// ```text
/// Normal ──{───> InToken ──}───> [Yield name] → Normal
///                  │  ▲
///                  └{─┘  (restart: the innermost `{` opens the token)
/// ```
///
/// An unclosed `{` never yields a token. Because a second `{` restarts the
/// token, names never contain braces: `{{foo}` yields `foo`.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ScanState {
    /// Scanning plain text
    Normal,
    /// Inside `{...`, waiting for `}`
    InToken {
        /// Byte position of the opening `{`
        start: usize,
    },
}

/// Iterator over the names of `{name}` tokens in a string
///
/// Forward-only: each byte is inspected exactly once. Braces are ASCII, so
/// every slice boundary falls on a char boundary.
pub(crate) struct TokenStream<'a> {
    text: &'a str,
    pos: usize,
    state: ScanState,
}

impl<'a> TokenStream<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            state: ScanState::Normal,
        }
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.text.as_bytes();

        while self.pos < bytes.len() {
            let pos = self.pos;
            self.pos += 1;

            match (self.state, bytes[pos]) {
                (_, b'{') => {
                    self.state = ScanState::InToken { start: pos };
                }
                (ScanState::InToken { start }, b'}') => {
                    self.state = ScanState::Normal;
                    return Some(&self.text[start + 1..pos]);
                }
                _ => {}
            }
        }

        None
    }
}
