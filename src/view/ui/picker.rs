use crate::app::picker::DestinationPicker;
use crate::view::destination_tree::{DestinationTreeView, NodeId, NodeState};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use rust_i18n::t;
use unicode_width::UnicodeWidthStr;

/// Where the picker dialog was drawn
#[derive(Debug, Clone, Copy, Default)]
pub struct PickerLayout {
    /// Whole dialog, border included; clicks outside it cancel
    pub popup: Rect,
    /// Folder rows
    pub rows_area: Rect,
    /// Index (into visible nodes) of the first drawn row
    pub scroll_offset: usize,
    pub select_button: Rect,
}

impl PickerLayout {
    /// Visible-node index under the cell, if it is on a folder row
    pub fn row_index_at(&self, column: u16, row: u16) -> Option<usize> {
        if !super::contains(self.rows_area, column, row) {
            return None;
        }
        Some(self.scroll_offset + (row - self.rows_area.y) as usize)
    }
}

pub struct PickerRenderer;

impl PickerRenderer {
    pub fn render(frame: &mut Frame, area: Rect, picker: &mut DestinationPicker) -> PickerLayout {
        let width = (area.width * 3 / 5).max(40);
        let height = (area.height * 7 / 10).max(8);
        let popup = super::centered_rect(width, height, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", t!("picker.title")))
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(popup);

        frame.render_widget(Clear, popup);
        frame.render_widget(block, popup);

        let [list_area, button_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        let view = picker.view_mut();
        view.set_viewport_height(list_area.height as usize);
        view.update_scroll_for_selection();
        let rows_area = Self::render_folders(frame, list_area, view);
        let scroll_offset = view.get_scroll_offset();

        let select_button = Self::render_buttons(frame, button_area);

        PickerLayout {
            popup,
            rows_area,
            scroll_offset,
            select_button,
        }
    }

    /// Returns the area covered by drawn rows
    fn render_folders(frame: &mut Frame, area: Rect, view: &DestinationTreeView) -> Rect {
        let display_nodes = view.get_display_nodes();
        if display_nodes.is_empty() {
            let placeholder = Paragraph::new(Span::styled(
                t!("picker.no_folders").to_string(),
                Style::default().fg(Color::DarkGray),
            ));
            frame.render_widget(placeholder, area);
            return Rect { height: 0, ..area };
        }

        let scroll_offset = view.get_scroll_offset();
        let items: Vec<ListItem> = display_nodes
            .iter()
            .skip(scroll_offset)
            .take(area.height as usize)
            .map(|&(node_id, indent)| Self::render_node(view, node_id, indent))
            .collect();
        let drawn = items.len() as u16;

        let list = List::new(items)
            .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));

        let mut list_state = ListState::default();
        if let Some(selected) = view.get_selected_index() {
            if selected >= scroll_offset {
                list_state.select(Some(selected - scroll_offset));
            }
        }

        frame.render_stateful_widget(list, area, &mut list_state);
        Rect {
            height: drawn,
            ..area
        }
    }

    fn render_node(view: &DestinationTreeView, node_id: NodeId, indent: usize) -> ListItem<'static> {
        let Some(node) = view.tree().get_node(node_id) else {
            return ListItem::new(Line::default());
        };

        let mut spans = Vec::new();
        if indent > 0 {
            spans.push(Span::raw("  ".repeat(indent)));
        }

        let indicator = match node.state {
            NodeState::Expanded => "▼ ",
            NodeState::Collapsed => "▶ ",
            NodeState::Cycle => "↻ ",
            NodeState::Error(_) => "! ",
        };
        spans.push(Span::styled(indicator, Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(
            node.entry.name.clone(),
            Style::default().fg(Color::Cyan),
        ));

        match &node.state {
            NodeState::Error(reason) => {
                spans.push(Span::styled(
                    format!(" {} {}", t!("picker.error"), reason),
                    Style::default().fg(Color::Red),
                ));
            }
            NodeState::Cycle => {
                spans.push(Span::styled(
                    format!(" {}", t!("picker.cycle")),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            _ => {}
        }

        ListItem::new(Line::from(spans))
    }

    /// Draw `[ Select ]` and the hint; returns the button rect
    fn render_buttons(frame: &mut Frame, area: Rect) -> Rect {
        let label = t!("picker.select").to_string();
        let hint = t!("picker.hint").to_string();
        let label_width = label.width() as u16;

        let line = Line::from(vec![
            Span::styled(
                label,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(hint, Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line), area);

        Rect {
            width: label_width.min(area.width),
            ..area
        }
    }
}
