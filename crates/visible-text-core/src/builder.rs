//! Whitespace-collapsing text builder
//!
//! Text is pushed through the CSS white-space rules for the active
//! [`Mode`]. Everything past the trim-right mark is collapsible trailing
//! whitespace that has not been committed yet; it is dropped by block
//! separators, breaks and [`TextBuilder::text`].

use crate::mode::Mode;

const NBSP: char = '\u{00A0}';
const FORM_FEED: char = '\u{000C}';

/// What kind of trailing whitespace is pending at the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Nothing was written yet (or everything was trimmed away).
    Empty,
    /// The buffer ends with committed content.
    Default,
    /// The buffer ends with a blank.
    BlankAtEnd,
    /// The buffer ends with a blank that follows a newline.
    ///
    /// No transition enters this state; block separators still handle it.
    BlankAtEndAfterNewline,
    /// The buffer ends with a newline taken from the source text.
    NewlineAtEnd,
    /// The buffer ends with an explicit line break (`<br>`).
    BreakAtEnd,
    /// The buffer ends with a block separator.
    BlockSeparatorAtEnd,
}

/// Where the latest run of preserved blanks started, so a `<pre>` can
/// drop its final run.
#[derive(Debug, Clone, Copy)]
struct BlankRun {
    start: usize,
    trim_right_pos: usize,
    state: State,
}

/// Accumulates visible text for one serialization run.
#[derive(Debug, Clone)]
pub struct TextBuilder {
    text: String,
    state: State,
    trim_right_pos: usize,
    content_added: bool,
    blank_run: Option<BlankRun>,
}

impl TextBuilder {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            state: State::Empty,
            trim_right_pos: 0,
            content_added: false,
            blank_run: None,
        }
    }

    /// Append literal text, folding whitespace according to `mode`.
    ///
    /// A `\r` only counts as a newline when it ends the chunk; everywhere
    /// else it is dropped.
    pub fn append(&mut self, content: &str, mode: Mode) {
        let mut chars = content.chars().peekable();
        while let Some(mut c) = chars.next() {
            if c == '\r' {
                if chars.peek().is_some() {
                    continue;
                }
                c = '\n';
            }

            if !(mode.preserves_blanks() && matches!(c, ' ' | '\t' | FORM_FEED)) {
                self.blank_run = None;
            }
            match c {
                '\n' => self.append_newline(mode),
                ' ' | '\t' | FORM_FEED => self.append_whitespace(c, mode),
                NBSP => {
                    self.append_blank();
                    if matches!(mode, Mode::Normal | Mode::PreLine) {
                        self.state = State::Default;
                    }
                }
                _ => {
                    self.text.push(c);
                    self.state = State::Default;
                    self.trim_right_pos = self.text.len();
                    self.content_added = true;
                }
            }
        }
    }

    fn append_newline(&mut self, mode: Mode) {
        match mode {
            Mode::Pre => {
                self.text.push('\n');
                self.state = State::NewlineAtEnd;
                self.trim_right_pos = self.text.len();
            }
            Mode::PreCollapseNewlines | Mode::PreLine => {
                if !matches!(self.state, State::Empty | State::BlockSeparatorAtEnd) {
                    self.text.push('\n');
                    self.state = State::NewlineAtEnd;
                    self.trim_right_pos = self.text.len();
                }
            }
            Mode::Normal => self.collapse_blank(),
        }
    }

    fn append_whitespace(&mut self, c: char, mode: Mode) {
        match mode {
            Mode::Pre | Mode::PreCollapseNewlines => {
                if self.blank_run.is_none() {
                    self.blank_run = Some(BlankRun {
                        start: self.text.len(),
                        trim_right_pos: self.trim_right_pos,
                        state: self.state,
                    });
                }
                self.text.push(c);
                self.state = State::BlankAtEnd;
                self.trim_right_pos = self.text.len();
            }
            Mode::PreLine => {
                if !matches!(
                    self.state,
                    State::Empty
                        | State::BlankAtEnd
                        | State::BlankAtEndAfterNewline
                        | State::BreakAtEnd
                ) {
                    self.text.push(' ');
                    self.state = State::BlankAtEnd;
                }
            }
            Mode::Normal => self.collapse_blank(),
        }
    }

    /// Collapsed blank for `Normal` mode; only written after content.
    fn collapse_blank(&mut self) {
        if self.state == State::Default {
            self.text.push(' ');
            self.state = State::BlankAtEnd;
        }
    }

    /// Insert a paragraph break around block-level content.
    ///
    /// Runs of separators, and separators next to pending blanks or
    /// newlines, collapse to a single `\n`. Nothing is written into an
    /// empty buffer.
    pub fn append_block_separator(&mut self) {
        self.blank_run = None;
        match self.state {
            State::Empty | State::BlockSeparatorAtEnd => {}
            State::BlankAtEnd => {
                self.text.truncate(self.trim_right_pos);
                self.finish_block_separator();
            }
            State::BlankAtEndAfterNewline => {
                let pos = self.prev_char_boundary(self.trim_right_pos);
                self.text.truncate(pos);
                self.trim_right_pos = self.trim_right_pos.min(self.text.len());
                self.finish_block_separator();
            }
            State::NewlineAtEnd | State::BreakAtEnd => {
                self.text.pop();
                self.trim_right_pos = self.trim_right_pos.saturating_sub(1).min(self.text.len());
                self.finish_block_separator();
            }
            State::Default => {
                self.text.push('\n');
                self.state = State::BlockSeparatorAtEnd;
            }
        }
    }

    fn finish_block_separator(&mut self) {
        if self.text.is_empty() {
            self.state = State::Empty;
        } else {
            self.text.push('\n');
            self.state = State::BlockSeparatorAtEnd;
        }
    }

    /// Force a line break (`<br>`), regardless of the current state.
    pub fn append_break(&mut self, _mode: Mode) {
        self.blank_run = None;
        self.text.truncate(self.trim_right_pos);
        self.text.push('\n');
        self.state = State::BreakAtEnd;
        self.trim_right_pos = self.text.len();
    }

    /// Append one committed blank.
    pub fn append_blank(&mut self) {
        self.blank_run = None;
        self.text.push(' ');
        self.state = State::BlankAtEnd;
        self.trim_right_pos = self.text.len();
    }

    /// Drop all pending trailing whitespace.
    ///
    /// In [`Mode::Pre`] a single dangling newline at the very end is
    /// dropped as well.
    pub fn trim_right(&mut self, mode: Mode) {
        self.blank_run = None;
        if mode == Mode::Pre
            && matches!(
                self.state,
                State::BlockSeparatorAtEnd | State::NewlineAtEnd | State::BreakAtEnd
            )
            && self.trim_right_pos == self.text.len()
        {
            self.trim_right_pos = self.prev_char_boundary(self.trim_right_pos);
        }

        self.text.truncate(self.trim_right_pos);
        self.state = if self.text.is_empty() {
            State::Empty
        } else {
            State::Default
        };
    }

    /// Undo the preserved blanks written last, if nothing followed them.
    ///
    /// Used at the end of a preformatted block: interior blanks stay, the
    /// final run is dropped.
    pub fn drop_trailing_blank_run(&mut self) {
        if let Some(run) = self.blank_run.take() {
            self.text.truncate(run.start);
            self.trim_right_pos = run.trim_right_pos;
            self.state = run.state;
        }
    }

    /// Whether content was added since the last reset.
    pub fn content_added(&self) -> bool {
        self.content_added
    }

    pub fn reset_content_added(&mut self) {
        self.content_added = false;
    }

    /// Set the flag again, e.g. after a nested reset.
    pub fn mark_content_added(&mut self) {
        self.content_added = true;
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// The committed text, without pending trailing whitespace.
    pub fn text(&self) -> &str {
        &self.text[..self.trim_right_pos]
    }

    pub fn into_text(mut self) -> String {
        self.text.truncate(self.trim_right_pos);
        self.text
    }

    fn prev_char_boundary(&self, pos: usize) -> usize {
        let mut pos = pos.min(self.text.len()).saturating_sub(1);
        while !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}

impl Default for TextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn built(chunks: &[(&str, Mode)]) -> TextBuilder {
        let mut builder = TextBuilder::new();
        for (chunk, mode) in chunks {
            builder.append(chunk, *mode);
        }
        builder
    }

    #[test]
    fn test_empty_input_is_noop() {
        let mut builder = TextBuilder::new();
        builder.append("", Mode::Normal);
        assert_eq!(builder.state(), State::Empty);
        assert_eq!(builder.text(), "");
        assert!(!builder.content_added());
    }

    #[rstest]
    #[case("  a   b  ", "a b")]
    #[case("\n\ta \n\x0C b\n", "a b")]
    #[case("a\u{00A0}\u{00A0}b", "a  b")]
    #[case("   ", "")]
    fn test_normal_collapse(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(built(&[(input, Mode::Normal)]).text(), expected);
    }

    #[test]
    fn test_normal_collapse_across_chunks() {
        let builder = built(&[("a ", Mode::Normal), ("  b", Mode::Normal)]);
        assert_eq!(builder.text(), "a b");
    }

    #[test]
    fn test_nbsp_resets_state_in_normal() {
        let mut builder = TextBuilder::new();
        builder.append("a\u{00A0}", Mode::Normal);
        assert_eq!(builder.state(), State::Default);
        builder.append(" b", Mode::Normal);
        assert_eq!(builder.text(), "a  b");
    }

    #[test]
    fn test_nbsp_keeps_blank_state_in_pre() {
        let mut builder = TextBuilder::new();
        builder.append("a\u{00A0}", Mode::Pre);
        assert_eq!(builder.state(), State::BlankAtEnd);
        assert_eq!(builder.text(), "a ");
    }

    #[rstest]
    #[case("  line1\n  line2  ", "  line1\n  line2  ")]
    #[case("a  ", "a  ")]
    #[case("a\n\n\nb", "a\n\n\nb")]
    #[case("\n\na", "\n\na")]
    #[case("a\tb", "a\tb")]
    fn test_pre_keeps_interior_whitespace(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(built(&[(input, Mode::Pre)]).text(), expected);
    }

    #[test]
    fn test_pre_collapse_newlines_skips_leading_newline() {
        let builder = built(&[("\na\n  b", Mode::PreCollapseNewlines)]);
        assert_eq!(builder.text(), "a\n  b");
    }

    #[test]
    fn test_pre_line_collapses_blanks_keeps_newlines() {
        let builder = built(&[("  a   b \n c", Mode::PreLine)]);
        assert_eq!(builder.text(), "a b \n c");
    }

    #[rstest]
    #[case("a\r\nb", "a\nb")]
    #[case("a\rb", "ab")]
    fn test_carriage_return_inside_chunk_dropped(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(built(&[(input, Mode::Pre)]).text(), expected);
    }

    #[test]
    fn test_trailing_carriage_return_is_newline() {
        let builder = built(&[("a\r", Mode::Pre), ("b", Mode::Pre)]);
        assert_eq!(builder.text(), "a\nb");
    }

    #[test]
    fn test_content_added_tracking() {
        let mut builder = TextBuilder::new();
        builder.append("   ", Mode::Normal);
        assert!(!builder.content_added());
        builder.append("x", Mode::Normal);
        assert!(builder.content_added());
        builder.reset_content_added();
        assert!(!builder.content_added());
        builder.append_block_separator();
        assert!(!builder.content_added());
    }

    #[test]
    fn test_block_separator_on_empty_is_noop() {
        let mut builder = TextBuilder::new();
        builder.append_block_separator();
        assert_eq!(builder.state(), State::Empty);
        assert_eq!(builder.text(), "");
    }

    #[test]
    fn test_block_separator_is_idempotent() {
        let mut builder = built(&[("a", Mode::Normal)]);
        builder.append_block_separator();
        builder.append_block_separator();
        builder.append_block_separator();
        builder.append("b", Mode::Normal);
        assert_eq!(builder.text(), "a\nb");
    }

    #[test]
    fn test_block_separator_is_pending_until_content() {
        let mut builder = built(&[("a", Mode::Normal)]);
        builder.append_block_separator();
        assert_eq!(builder.text(), "a");
    }

    // State x event matrix for the block separator.
    #[rstest]
    #[case::default(&[("a", Mode::Normal)], State::Default, "a\nb")]
    #[case::blank_at_end(&[("a ", Mode::Normal)], State::BlankAtEnd, "a\nb")]
    #[case::pre_blanks(&[("a  ", Mode::Pre)], State::BlankAtEnd, "a  \nb")]
    #[case::newline_at_end(&[("a\n", Mode::Pre)], State::NewlineAtEnd, "a\nb")]
    #[case::only_newline(&[("\n", Mode::Pre)], State::NewlineAtEnd, "b")]
    #[case::only_blank(&[("  ", Mode::Pre)], State::BlankAtEnd, "  \nb")]
    fn test_block_separator_matrix(
        #[case] chunks: &[(&str, Mode)],
        #[case] before: State,
        #[case] expected: &str,
    ) {
        let mut builder = built(chunks);
        assert_eq!(builder.state(), before);
        builder.append_block_separator();
        builder.append("b", Mode::Normal);
        assert_eq!(builder.text(), expected);
    }

    #[derive(Debug, Clone, Copy)]
    enum Step {
        Text(&'static str, Mode),
        Break,
        Separator,
    }

    const A: Step = Step::Text("a", Mode::Normal);

    fn run(steps: &[Step]) -> TextBuilder {
        let mut builder = TextBuilder::new();
        for step in steps {
            match *step {
                Step::Text(chunk, mode) => builder.append(chunk, mode),
                Step::Break => builder.append_break(Mode::Normal),
                Step::Separator => builder.append_block_separator(),
            }
        }
        builder
    }

    // Newlines, blanks and nbsp arriving in each pending state.
    #[rstest]
    #[case::pre_collapse_newline_after_separator(
        &[A, Step::Separator, Step::Text("\n", Mode::PreCollapseNewlines)],
        State::BlockSeparatorAtEnd,
        "a"
    )]
    #[case::pre_line_newline_after_separator(
        &[A, Step::Separator, Step::Text("\n", Mode::PreLine)],
        State::BlockSeparatorAtEnd,
        "a"
    )]
    #[case::pre_line_blank_after_break(
        &[A, Step::Break, Step::Text("  ", Mode::PreLine)],
        State::BreakAtEnd,
        "a\n"
    )]
    #[case::normal_newline_after_newline(
        &[Step::Text("a\n", Mode::Pre), Step::Text("\n", Mode::Normal)],
        State::NewlineAtEnd,
        "a\n"
    )]
    #[case::normal_newline_after_break(
        &[A, Step::Break, Step::Text("\n", Mode::Normal)],
        State::BreakAtEnd,
        "a\n"
    )]
    #[case::nbsp_pre_collapse_newlines(
        &[Step::Text("a\u{00A0}", Mode::PreCollapseNewlines)],
        State::BlankAtEnd,
        "a "
    )]
    #[case::nbsp_pre_line(
        &[Step::Text("a\u{00A0}", Mode::PreLine)],
        State::Default,
        "a "
    )]
    fn test_pending_state_matrix(
        #[case] steps: &[Step],
        #[case] after: State,
        #[case] expected: &str,
    ) {
        let builder = run(steps);
        assert_eq!(builder.state(), after);
        assert_eq!(builder.text(), expected);
    }

    #[rstest]
    #[case::pre_collapse_newline(Mode::PreCollapseNewlines, "\nb", "a\nb")]
    #[case::pre_line_newline(Mode::PreLine, "\nb", "a\nb")]
    #[case::pre_line_nbsp(Mode::PreLine, "\u{00A0} b", "a\n  b")]
    #[case::normal_newline(Mode::Normal, "\nb", "a\nb")]
    fn test_text_after_separator(
        #[case] mode: Mode,
        #[case] chunk: &'static str,
        #[case] expected: &str,
    ) {
        let builder = run(&[A, Step::Separator, Step::Text(chunk, mode)]);
        assert_eq!(builder.text(), expected);
    }

    #[test]
    fn test_nbsp_then_blank_in_pre_line() {
        let builder = run(&[
            Step::Text("a\u{00A0}", Mode::PreLine),
            Step::Text(" b", Mode::PreLine),
        ]);
        assert_eq!(builder.text(), "a  b");
    }

    #[test]
    fn test_pre_blanks_survive_break() {
        let builder = run(&[Step::Text("a  ", Mode::Pre), Step::Break, Step::Text("b", Mode::Pre)]);
        assert_eq!(builder.text(), "a  \nb");
    }

    #[test]
    fn test_drop_trailing_blank_run() {
        let mut builder = run(&[A, Step::Break]);
        builder.append(" \t ", Mode::Pre);
        assert_eq!(builder.text(), "a\n \t ");
        builder.drop_trailing_blank_run();
        assert_eq!(builder.state(), State::BreakAtEnd);
        assert_eq!(builder.text(), "a\n");

        builder.append("b  c ", Mode::PreCollapseNewlines);
        builder.drop_trailing_blank_run();
        assert_eq!(builder.state(), State::Default);
        assert_eq!(builder.text(), "a\nb  c");
    }

    #[rstest]
    #[case::after_content(&[Step::Text("a  b", Mode::Pre)], "a  b")]
    #[case::after_separator(&[Step::Text("a  ", Mode::Pre), Step::Separator], "a  ")]
    #[case::normal_blanks(&[Step::Text("a  ", Mode::Normal)], "a")]
    fn test_drop_trailing_blank_run_without_run(#[case] steps: &[Step], #[case] expected: &str) {
        let mut builder = run(steps);
        let state = builder.state();
        builder.drop_trailing_blank_run();
        assert_eq!(builder.state(), state);
        assert_eq!(builder.text(), expected);
    }

    #[test]
    fn test_block_separator_after_break() {
        let mut builder = built(&[("a", Mode::Normal)]);
        builder.append_break(Mode::Normal);
        assert_eq!(builder.state(), State::BreakAtEnd);
        builder.append_block_separator();
        assert_eq!(builder.state(), State::BlockSeparatorAtEnd);
        builder.append("b", Mode::Normal);
        assert_eq!(builder.text(), "a\nb");
    }

    #[test]
    fn test_block_separator_after_lone_break_empties() {
        let mut builder = TextBuilder::new();
        builder.append_break(Mode::Normal);
        builder.append_block_separator();
        assert_eq!(builder.state(), State::Empty);
        assert_eq!(builder.text(), "");
    }

    #[test]
    fn test_break_always_breaks() {
        let mut builder = built(&[("a  ", Mode::Normal)]);
        builder.append_break(Mode::Normal);
        builder.append_break(Mode::Normal);
        builder.append("b", Mode::Normal);
        assert_eq!(builder.text(), "a\n\nb");
    }

    #[test]
    fn test_break_is_committed() {
        let mut builder = built(&[("a", Mode::Normal)]);
        builder.append_break(Mode::Normal);
        assert_eq!(builder.text(), "a\n");
    }

    #[test]
    fn test_blank_after_break_collapses() {
        let mut builder = built(&[("a", Mode::Normal)]);
        builder.append_break(Mode::Normal);
        builder.append("  b", Mode::Normal);
        assert_eq!(builder.text(), "a\nb");
    }

    #[test]
    fn test_append_blank_is_committed() {
        let mut builder = built(&[("a", Mode::Normal)]);
        builder.append_blank();
        assert_eq!(builder.state(), State::BlankAtEnd);
        assert_eq!(builder.text(), "a ");
    }

    #[test]
    fn test_trim_right_pre_drops_one_dangling_newline() {
        let mut builder = built(&[("a\n\n", Mode::Pre)]);
        builder.trim_right(Mode::Pre);
        assert_eq!(builder.text(), "a\n");
        assert_eq!(builder.state(), State::Default);
    }

    #[test]
    fn test_trim_right_normal_keeps_newline() {
        let mut builder = built(&[("a\n", Mode::Pre)]);
        builder.trim_right(Mode::Normal);
        assert_eq!(builder.text(), "a\n");
    }

    #[test]
    fn test_trim_right_to_empty() {
        let mut builder = built(&[("\n", Mode::Pre)]);
        builder.trim_right(Mode::Pre);
        assert_eq!(builder.state(), State::Empty);
        assert_eq!(builder.text(), "");
    }

    #[test]
    fn test_text_is_idempotent() {
        let builder = built(&[("a b ", Mode::Normal)]);
        assert_eq!(builder.text(), "a b");
        assert_eq!(builder.text(), "a b");
        assert_eq!(builder.into_text(), "a b");
    }

    #[test]
    fn test_multibyte_content() {
        let mut builder = built(&[("grüß ", Mode::Normal), ("世界", Mode::Normal)]);
        builder.append_block_separator();
        builder.append("é\n", Mode::Pre);
        builder.trim_right(Mode::Pre);
        assert_eq!(builder.text(), "grüß 世界\né");
    }
}
