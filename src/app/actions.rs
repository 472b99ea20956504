//! Mode and input buffer logic for trek.
//!
//! Contains the [ActionContext] struct, tracking the current [Mode] and the query typed in the
//! search and filter prompts.

/// The interaction mode of the browser.
///
/// * `Browsing` - Default mode, keys map to navigation actions.
/// * `Searching` - The prompt edits a recursive search query.
/// * `Filtering` - The prompt edits a live filter on the current directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browsing,
    Searching,
    Filtering,
}

impl Mode {
    pub fn is_input(self) -> bool {
        !matches!(self, Mode::Browsing)
    }

    /// Prompt prefix shown in front of the query.
    pub fn prompt(self) -> &'static str {
        match self {
            Mode::Browsing => "",
            Mode::Searching => "search: ",
            Mode::Filtering => "filter: ",
        }
    }
}

/// Tracks the current mode and the input buffer with its cursor.
#[derive(Debug, Default)]
pub struct ActionContext {
    mode: Mode,
    input_buffer: String,
    input_cursor_pos: usize,
}

impl ActionContext {
    // Getters / accessors

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn input_cursor_pos(&self) -> usize {
        self.input_cursor_pos
    }

    pub fn is_input_mode(&self) -> bool {
        self.mode.is_input()
    }

    // Mode functions

    /// Switches to `mode` with an empty query.
    pub fn enter_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.input_buffer.clear();
        self.input_cursor_pos = 0;
    }

    pub fn exit_mode(&mut self) {
        self.enter_mode(Mode::Browsing);
    }

    /// Replaces the query, moving the cursor to its end.
    pub fn set_input_buffer(&mut self, text: &str) {
        self.input_buffer.clear();
        self.input_buffer.push_str(text);
        self.input_cursor_pos = self.input_buffer.len();
    }

    // Cursor actions

    /// Moves the input cursor one character to the left, if possible.
    pub fn action_move_cursor_left(&mut self) {
        if let Some((previous, _)) = self.input_buffer[..self.input_cursor_pos]
            .char_indices()
            .next_back()
        {
            self.input_cursor_pos = previous;
        }
    }

    /// Moves the input cursor one character to the right, if possible.
    pub fn action_move_cursor_right(&mut self) {
        if let Some(ch) = self.input_buffer[self.input_cursor_pos..].chars().next() {
            self.input_cursor_pos += ch.len_utf8();
        }
    }

    /// Inserts a character at the current cursor position in the input buffer.
    pub fn action_insert_at_cursor(&mut self, ch: char) {
        self.input_buffer.insert(self.input_cursor_pos, ch);
        self.input_cursor_pos += ch.len_utf8();
    }

    /// Deletes the character before the current cursor position.
    /// Returns `false` when there was nothing to delete.
    pub fn action_backspace_at_cursor(&mut self) -> bool {
        if self.input_cursor_pos > 0
            && let Some((previous, _)) = self.input_buffer[..self.input_cursor_pos]
                .char_indices()
                .next_back()
        {
            self.input_buffer.remove(previous);
            self.input_cursor_pos = previous;
            return true;
        }
        false
    }

    pub fn action_cursor_home(&mut self) {
        self.input_cursor_pos = 0;
    }

    pub fn action_cursor_end(&mut self) {
        self.input_cursor_pos = self.input_buffer.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_and_exit_clear_query() {
        let mut ctx = ActionContext::default();
        ctx.enter_mode(Mode::Searching);
        ctx.action_insert_at_cursor('a');
        assert_eq!(ctx.input_buffer(), "a");
        assert!(ctx.is_input_mode());

        ctx.enter_mode(Mode::Filtering);
        assert_eq!(ctx.input_buffer(), "");

        ctx.exit_mode();
        assert_eq!(ctx.mode(), Mode::Browsing);
        assert!(!ctx.is_input_mode());
    }

    #[test]
    fn cursor_edits_respect_char_boundaries() {
        let mut ctx = ActionContext::default();
        ctx.enter_mode(Mode::Filtering);
        for ch in "aé🦀".chars() {
            ctx.action_insert_at_cursor(ch);
        }
        ctx.action_move_cursor_left();
        ctx.action_move_cursor_left();
        ctx.action_insert_at_cursor('x');
        assert_eq!(ctx.input_buffer(), "axé🦀");

        ctx.action_cursor_end();
        assert!(ctx.action_backspace_at_cursor());
        assert_eq!(ctx.input_buffer(), "axé");

        ctx.action_cursor_home();
        assert!(!ctx.action_backspace_at_cursor());
        ctx.action_move_cursor_right();
        ctx.action_move_cursor_right();
        ctx.action_move_cursor_right();
        ctx.action_move_cursor_right();
        assert_eq!(ctx.input_cursor_pos(), ctx.input_buffer().len());
    }
}
