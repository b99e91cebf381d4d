use crate::view::prompt::Prompt;
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use rust_i18n::t;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, Default)]
pub struct PromptLayout {
    pub popup: Rect,
}

pub struct PromptRenderer;

impl PromptRenderer {
    /// Render the prompt as a centred modal over `area`
    pub fn render(frame: &mut Frame, area: Rect, prompt: &Prompt) -> PromptLayout {
        let width = area.width.saturating_sub(4).clamp(20, 60);
        let popup = super::centered_rect(width, 5, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", prompt.prompt_type.title()))
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(popup);

        frame.render_widget(Clear, popup);
        frame.render_widget(block, popup);

        let lines = vec![
            Line::from(prompt.message()),
            Line::from(Span::styled(
                prompt.input.clone(),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                t!("prompt.hint").to_string(),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);

        let cursor_x = prompt.input[..prompt.cursor_pos].width() as u16;
        if inner.height > 1 && cursor_x < inner.width {
            frame.set_cursor_position(Position::new(inner.x + cursor_x, inner.y + 1));
        }

        PromptLayout { popup }
    }
}
