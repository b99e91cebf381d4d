use crate::app::session::BrowserSession;
use crate::model::filesystem::EntryKind;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use rust_i18n::t;
use unicode_width::UnicodeWidthStr;

/// One of the five command buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarButton {
    CreateFile,
    CreateFolder,
    Delete,
    Move,
    Copy,
}

impl ToolbarButton {
    pub const ALL: [ToolbarButton; 5] = [
        ToolbarButton::CreateFile,
        ToolbarButton::CreateFolder,
        ToolbarButton::Delete,
        ToolbarButton::Move,
        ToolbarButton::Copy,
    ];

    pub fn label(self) -> String {
        match self {
            ToolbarButton::CreateFile => t!("toolbar.create_file"),
            ToolbarButton::CreateFolder => t!("toolbar.create_folder"),
            ToolbarButton::Delete => t!("toolbar.delete"),
            ToolbarButton::Move => t!("toolbar.move"),
            ToolbarButton::Copy => t!("toolbar.copy"),
        }
        .to_string()
    }
}

/// What the bottom line shows
#[derive(Debug, Clone, Copy)]
pub enum StatusLine<'a> {
    /// Key hints
    Hint,
    Info(&'a str),
    Error(&'a str),
    /// An operation is running in the background
    Working(&'a str),
}

/// Where the clickable parts of the browser were drawn
#[derive(Debug, Clone, Default)]
pub struct BrowserLayout {
    pub toolbar_buttons: Vec<(ToolbarButton, Rect)>,
    /// Rows of the listing that hold an entry, below the table header
    pub rows_area: Rect,
    /// Number of rows the listing can show, filled or not
    pub viewport_rows: u16,
    /// Index of the entry drawn on the first row of `rows_area`
    pub list_offset: usize,
}

impl BrowserLayout {
    pub fn button_at(&self, column: u16, row: u16) -> Option<ToolbarButton> {
        self.toolbar_buttons
            .iter()
            .find(|(_, rect)| super::contains(*rect, column, row))
            .map(|(button, _)| *button)
    }

    /// Listing index under the cell, if it is on a drawn row
    pub fn entry_index_at(&self, column: u16, row: u16) -> Option<usize> {
        if !super::contains(self.rows_area, column, row) {
            return None;
        }
        Some(self.list_offset + (row - self.rows_area.y) as usize)
    }

    /// Selection steps taken by PageUp/PageDown
    pub fn page_size(&self) -> usize {
        self.viewport_rows.max(1) as usize
    }
}

pub struct BrowserRenderer;

impl BrowserRenderer {
    /// Render the whole browser screen
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        session: &BrowserSession,
        table_state: &mut TableState,
        status: StatusLine<'_>,
        busy: bool,
    ) -> BrowserLayout {
        let [header_area, toolbar_area, list_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        Self::render_header(frame, header_area, session);
        let toolbar_buttons = Self::render_toolbar(frame, toolbar_area, busy);
        let (rows_area, viewport_rows, list_offset) =
            Self::render_listing(frame, list_area, session, table_state);
        Self::render_status(frame, status_area, status);

        BrowserLayout {
            toolbar_buttons,
            rows_area,
            viewport_rows,
            list_offset,
        }
    }

    fn render_header(frame: &mut Frame, area: Rect, session: &BrowserSession) {
        let line = Line::from(vec![
            Span::styled(" ", Style::default()),
            Span::styled(
                session.working_dir().display().to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_toolbar(frame: &mut Frame, area: Rect, busy: bool) -> Vec<(ToolbarButton, Rect)> {
        let style = if busy {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Black).bg(Color::Gray)
        };

        let mut spans = vec![Span::raw(" ")];
        let mut buttons = Vec::with_capacity(ToolbarButton::ALL.len());
        let mut x = area.x + 1;
        for button in ToolbarButton::ALL {
            let text = format!("[{}]", button.label());
            let width = text.width() as u16;
            if x + width > area.x + area.width {
                break;
            }
            buttons.push((button, Rect::new(x, area.y, width, 1)));
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
            x += width + 1;
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
        buttons
    }

    /// Returns the drawn rows area, the viewport height in rows and the
    /// first drawn entry index
    fn render_listing(
        frame: &mut Frame,
        area: Rect,
        session: &BrowserSession,
        table_state: &mut TableState,
    ) -> (Rect, u16, usize) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", t!("list.title")))
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);

        let header = Row::new(vec![
            Cell::from(t!("list.name").to_string()),
            Cell::from(t!("list.type").to_string()),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = session
            .entries()
            .iter()
            .map(|entry| {
                let style = match entry.kind {
                    EntryKind::Folder => Style::default().fg(Color::Cyan),
                    EntryKind::File => Style::default().fg(Color::White),
                };
                Row::new(vec![
                    Cell::from(entry.name.clone()).style(style),
                    Cell::from(entry.kind.label()).style(Style::default().fg(Color::Gray)),
                ])
            })
            .collect();

        let is_empty = rows.is_empty();
        let table = Table::new(rows, [Constraint::Min(10), Constraint::Length(8)])
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));

        table_state.select(session.selected());
        frame.render_stateful_widget(table, area, table_state);

        let rows_area = Rect {
            y: inner.y.saturating_add(1),
            height: inner.height.saturating_sub(1),
            ..inner
        };

        if is_empty && rows_area.height > 0 {
            let placeholder = Paragraph::new(Span::styled(
                t!("list.empty").to_string(),
                Style::default().fg(Color::DarkGray),
            ));
            frame.render_widget(placeholder, Rect { height: 1, ..rows_area });
        }

        // Only rows that actually hold an entry are clickable
        let drawn = session
            .entries()
            .len()
            .saturating_sub(table_state.offset())
            .min(rows_area.height as usize) as u16;
        (
            Rect {
                height: drawn,
                ..rows_area
            },
            rows_area.height,
            table_state.offset(),
        )
    }

    fn render_status(frame: &mut Frame, area: Rect, status: StatusLine<'_>) {
        let (text, style) = match status {
            StatusLine::Hint => (t!("status.hint").to_string(), Style::default().fg(Color::DarkGray)),
            StatusLine::Info(msg) => (msg.to_string(), Style::default().fg(Color::Green)),
            StatusLine::Error(msg) => (
                msg.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            StatusLine::Working(msg) => (msg.to_string(), Style::default().fg(Color::Yellow)),
        };
        frame.render_widget(Paragraph::new(Span::styled(text, style)), area);
    }
}
