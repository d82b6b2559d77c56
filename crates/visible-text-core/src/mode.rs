//! White-space processing modes

/// How literal whitespace is folded into the output.
///
/// See <https://drafts.csswg.org/css-text-3/#white-space-property>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Forced preformatted text (`<pre>`, `<textarea>` content).
    /// Every newline and blank is kept.
    Pre,
    /// Sequences of white space are collapsed. Newline characters
    /// are handled the same as other white space.
    #[default]
    Normal,
    /// CSS `pre` and `pre-wrap`. Blanks are kept, newlines are kept
    /// except at the start of a block.
    PreCollapseNewlines,
    /// CSS `pre-line`. Blanks collapse, newlines are kept.
    PreLine,
}

impl Mode {
    /// Map a CSS `white-space` keyword to a mode.
    ///
    /// Returns `None` for empty or unknown values so callers can keep
    /// looking further up the tree.
    pub fn from_white_space(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("normal") || value.eq_ignore_ascii_case("nowrap") {
            Some(Mode::Normal)
        } else if value.eq_ignore_ascii_case("pre") || value.eq_ignore_ascii_case("pre-wrap") {
            Some(Mode::PreCollapseNewlines)
        } else if value.eq_ignore_ascii_case("pre-line") {
            Some(Mode::PreLine)
        } else {
            None
        }
    }

    /// Whether blanks are emitted verbatim in this mode.
    pub fn preserves_blanks(self) -> bool {
        matches!(self, Mode::Pre | Mode::PreCollapseNewlines)
    }
}
