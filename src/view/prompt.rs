//! Single-line text prompt used by the create dialogs

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rust_i18n::t;

/// What the prompt is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptType {
    CreateFile,
    CreateFolder,
}

impl PromptType {
    /// Dialog title
    pub fn title(self) -> String {
        match self {
            PromptType::CreateFile => t!("prompt.create_file").to_string(),
            PromptType::CreateFolder => t!("prompt.create_folder").to_string(),
        }
    }
}

/// Result of feeding a key to the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    /// Enter: the current input
    Confirm(String),
    /// Esc
    Cancel,
    /// Key consumed (or ignored), prompt stays open
    Continue,
}

#[derive(Debug, Clone)]
pub struct Prompt {
    pub prompt_type: PromptType,
    pub input: String,
    /// Byte offset of the cursor in `input`, always on a char boundary
    pub cursor_pos: usize,
}

impl Prompt {
    pub fn new(prompt_type: PromptType) -> Self {
        Self {
            prompt_type,
            input: String::new(),
            cursor_pos: 0,
        }
    }

    pub fn message(&self) -> String {
        match self.prompt_type {
            PromptType::CreateFile => t!("prompt.file_name").to_string(),
            PromptType::CreateFolder => t!("prompt.folder_name").to_string(),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    /// Insert pasted text, dropping line breaks
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.insert_char(c);
        }
    }

    fn prev_boundary(&self) -> usize {
        self.input[..self.cursor_pos]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.input[self.cursor_pos..]
            .chars()
            .next()
            .map_or(self.cursor_pos, |c| self.cursor_pos + c.len_utf8())
    }

    pub fn backspace(&mut self) {
        if self.cursor_pos > 0 {
            let start = self.prev_boundary();
            self.input.replace_range(start..self.cursor_pos, "");
            self.cursor_pos = start;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor_pos < self.input.len() {
            let end = self.next_boundary();
            self.input.replace_range(self.cursor_pos..end, "");
        }
    }

    /// Delete back to the start of the previous word
    pub fn delete_word_backward(&mut self) {
        let before = &self.input[..self.cursor_pos];
        let trimmed = before.trim_end();
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(i, c)| i + c.len_utf8());
        self.input.replace_range(start..self.cursor_pos, "");
        self.cursor_pos = start;
    }

    pub fn cursor_left(&mut self) {
        self.cursor_pos = self.prev_boundary();
    }

    pub fn cursor_right(&mut self) {
        self.cursor_pos = self.next_boundary();
    }

    pub fn move_to_start(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor_pos = self.input.len();
    }

    pub fn handle_key(&mut self, event: &KeyEvent) -> PromptAction {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);

        match event.code {
            KeyCode::Enter => return PromptAction::Confirm(self.input.clone()),
            KeyCode::Esc => return PromptAction::Cancel,
            KeyCode::Char('c') if ctrl => return PromptAction::Cancel,
            KeyCode::Char('w') if ctrl => self.delete_word_backward(),
            KeyCode::Char('a') if ctrl => self.move_to_start(),
            KeyCode::Char('e') if ctrl => self.move_to_end(),
            KeyCode::Char('u') if ctrl => {
                self.input.replace_range(..self.cursor_pos, "");
                self.cursor_pos = 0;
            }
            KeyCode::Char(c) if !ctrl && !event.modifiers.contains(KeyModifiers::ALT) => {
                self.insert_char(c)
            }
            KeyCode::Backspace if ctrl => self.delete_word_backward(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor_left(),
            KeyCode::Right => self.cursor_right(),
            KeyCode::Home => self.move_to_start(),
            KeyCode::End => self.move_to_end(),
            _ => {}
        }
        PromptAction::Continue
    }
}
