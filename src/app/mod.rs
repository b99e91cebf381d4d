//! Main browser controller
//!
//! `App` owns the browser session and whatever modal is open, turns key and
//! mouse events into session commands, and runs filesystem operations off
//! the UI thread when a tokio runtime is available.

pub mod picker;
pub mod session;

use crate::config::Config;
use crate::model::filesystem::FsResult;
use crate::model::operation::FileOperation;
use crate::services::async_bridge::{AsyncBridge, AsyncMessage};
use crate::services::time_source::SharedTimeSource;
use crate::view::prompt::{Prompt, PromptAction, PromptType};
use crate::view::ui::{
    BrowserLayout, BrowserRenderer, PickerLayout, PickerRenderer, PromptRenderer, StatusLine,
    ToolbarButton,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use picker::{DestinationPicker, PickerOutcome};
use ratatui::widgets::TableState;
use ratatui::Frame;
use rust_i18n::t;
use session::BrowserSession;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Which destination-based command opened the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    Move,
    Copy,
}

/// What currently receives input
#[derive(Debug)]
pub enum Mode {
    Browse,
    Prompt(Prompt),
    Picker {
        picker: DestinationPicker,
        kind: TransferKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

/// Something a click landed on, for double-click detection
///
/// Listing entries are identified by path so a click on a row whose entry
/// changed since the previous click never pairs with it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ClickTarget {
    Entry(PathBuf),
    PickerNode(crate::view::destination_tree::NodeId),
}

fn operation_label(operation: &FileOperation) -> String {
    let button = match operation {
        FileOperation::CreateFile { .. } => ToolbarButton::CreateFile,
        FileOperation::CreateFolder { .. } => ToolbarButton::CreateFolder,
        FileOperation::Delete { .. } => ToolbarButton::Delete,
        FileOperation::Move { .. } => ToolbarButton::Move,
        FileOperation::Copy { .. } => ToolbarButton::Copy,
    };
    button.label()
}

pub struct App {
    session: BrowserSession,
    config: Config,
    mode: Mode,
    status: Option<StatusMessage>,
    /// Operation running in the background; mutating commands are refused
    /// while this is set
    in_flight: Option<FileOperation>,
    /// Runtime handle for background operations; `None` runs them inline
    runtime: Option<tokio::runtime::Handle>,
    async_bridge: AsyncBridge,
    time_source: SharedTimeSource,
    table_state: TableState,
    browser_layout: BrowserLayout,
    picker_layout: Option<PickerLayout>,
    last_click: Option<(ClickTarget, Instant)>,
    should_quit: bool,
}

impl App {
    pub fn new(
        session: BrowserSession,
        config: Config,
        runtime: Option<tokio::runtime::Handle>,
        time_source: SharedTimeSource,
    ) -> Self {
        Self {
            session,
            config,
            mode: Mode::Browse,
            status: None,
            in_flight: None,
            runtime,
            async_bridge: AsyncBridge::new(),
            time_source,
            table_state: TableState::default(),
            browser_layout: BrowserLayout::default(),
            picker_layout: None,
            last_click: None,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &BrowserSession {
        &self.session
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Whether an operation is running in the background
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
        });
    }

    fn double_click_time(&self) -> Duration {
        Duration::from_millis(self.config.browser.double_click_time_ms)
    }

    /// Record a click and report whether it completes a double-click
    fn register_click(&mut self, target: ClickTarget) -> bool {
        let now = self.time_source.now();
        let is_double = matches!(
            &self.last_click,
            Some((previous, at)) if *previous == target
                && now.saturating_duration_since(*at) <= self.double_click_time()
        );
        self.last_click = if is_double { None } else { Some((target, now)) };
        is_double
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Refuse a mutating command while another operation runs
    fn refuse_if_busy(&mut self) -> bool {
        if let Some(op) = &self.in_flight {
            let text = t!("status.busy", operation = operation_label(op)).to_string();
            self.set_status(text, StatusLevel::Error);
            return true;
        }
        false
    }

    pub fn refresh(&mut self) {
        if let Err(e) = self.session.refresh() {
            self.report_refresh_error(e.to_string());
        }
        *self.table_state.offset_mut() = 0;
        self.last_click = None;
    }

    fn report_refresh_error(&mut self, reason: String) {
        tracing::warn!("Refresh of {:?} failed: {}", self.session.working_dir(), reason);
        let text = t!("status.refresh_failed", reason = reason).to_string();
        self.set_status(text, StatusLevel::Error);
    }

    /// `NavigateInto` for the selected entry
    pub fn open_selected(&mut self) {
        if let Some(index) = self.session.selected() {
            self.navigate_into(index);
        }
    }

    fn navigate_into(&mut self, index: usize) {
        match self.session.navigate_into(index) {
            Ok(true) => {
                *self.table_state.offset_mut() = 0;
                self.last_click = None;
                self.status = None;
            }
            Ok(false) => {}
            Err(e) => self.report_refresh_error(e.to_string()),
        }
    }

    pub fn open_prompt(&mut self, prompt_type: PromptType) {
        if self.refuse_if_busy() {
            return;
        }
        self.mode = Mode::Prompt(Prompt::new(prompt_type));
    }

    /// Open the destination picker for the selected entry
    pub fn open_picker(&mut self, kind: TransferKind) {
        if self.session.selected_entry().is_none() || self.refuse_if_busy() {
            return;
        }
        match DestinationPicker::open(
            self.session.fs().clone(),
            self.session.base_dir(),
            self.config.picker.show_hidden,
        ) {
            Ok(picker) => self.mode = Mode::Picker { picker, kind },
            Err(e) => {
                tracing::warn!("Failed to open destination picker: {}", e);
                let text = t!("status.picker_failed", reason = e.to_string()).to_string();
                self.set_status(text, StatusLevel::Error);
            }
        }
    }

    pub fn delete_selected(&mut self) {
        if self.refuse_if_busy() {
            return;
        }
        if let Some(op) = self.session.plan_delete() {
            self.dispatch_operation(op);
        }
    }

    pub fn trigger(&mut self, button: ToolbarButton) {
        match button {
            ToolbarButton::CreateFile => self.open_prompt(PromptType::CreateFile),
            ToolbarButton::CreateFolder => self.open_prompt(PromptType::CreateFolder),
            ToolbarButton::Delete => self.delete_selected(),
            ToolbarButton::Move => self.open_picker(TransferKind::Move),
            ToolbarButton::Copy => self.open_picker(TransferKind::Copy),
        }
    }

    fn confirm_prompt(&mut self, prompt_type: PromptType, name: &str) {
        let op = match prompt_type {
            PromptType::CreateFile => self.session.plan_create_file(name),
            PromptType::CreateFolder => self.session.plan_create_folder(name),
        };
        if let Some(op) = op {
            self.dispatch_operation(op);
        }
    }

    fn finish_picker(&mut self, kind: TransferKind, outcome: PickerOutcome) {
        self.picker_layout = None;
        self.last_click = None;
        let PickerOutcome::Confirmed(dest) = outcome else {
            tracing::debug!("Destination picker cancelled");
            return;
        };
        let op = match kind {
            TransferKind::Move => self.session.plan_move(&dest),
            TransferKind::Copy => self.session.plan_copy(&dest),
        };
        if let Some(op) = op {
            self.dispatch_operation(op);
        }
    }

    // ========================================================================
    // Operation dispatch
    // ========================================================================

    /// Run `operation` on the runtime's blocking pool, or inline when there
    /// is no runtime
    pub fn dispatch_operation(&mut self, operation: FileOperation) {
        if self.refuse_if_busy() {
            return;
        }
        tracing::debug!("Dispatching {}", operation);

        let Some(runtime) = &self.runtime else {
            let result = operation.execute(self.session.fs().as_ref());
            self.finish_operation(operation, result);
            return;
        };

        let fs = self.session.fs().clone();
        let sender = self.async_bridge.sender();
        let task_operation = operation.clone();
        runtime.spawn_blocking(move || {
            let result = task_operation.execute(fs.as_ref());
            let _ = sender.send(AsyncMessage::OperationFinished {
                operation: task_operation,
                result,
            });
        });

        let text = t!(
            "status.working",
            operation = operation_label(&operation),
            name = operation.subject_name()
        )
        .to_string();
        self.set_status(text, StatusLevel::Info);
        self.in_flight = Some(operation);
    }

    fn finish_operation(&mut self, operation: FileOperation, result: FsResult<()>) {
        self.in_flight = None;
        let label = operation_label(&operation);

        match result {
            Ok(()) => {
                tracing::info!("{} completed", operation);
                let text = t!("status.done", operation = label, name = operation.subject_name())
                    .to_string();
                self.set_status(text, StatusLevel::Info);
            }
            Err(e) => {
                tracing::warn!("{} failed: {} ({})", operation, e, e.kind_name());
                let text = t!("status.failed", operation = label, reason = e.to_string())
                    .to_string();
                self.set_status(text, StatusLevel::Error);
            }
        }

        // A refresh error replaces a success message, never an operation error
        if let Err(e) = self.session.refresh() {
            if self.status.as_ref().map(|s| s.level) != Some(StatusLevel::Error) {
                self.report_refresh_error(e.to_string());
            } else {
                tracing::warn!("Refresh after {} failed: {}", operation, e);
            }
        }
        *self.table_state.offset_mut() = 0;
        self.last_click = None;
    }

    /// Apply results posted by background operations.
    ///
    /// Returns true if anything changed and a redraw is needed.
    pub fn process_async_messages(&mut self) -> bool {
        let messages = self.async_bridge.try_recv_all();
        let changed = !messages.is_empty();
        for message in messages {
            match message {
                AsyncMessage::OperationFinished { operation, result } => {
                    self.finish_operation(operation, result)
                }
            }
        }
        changed
    }

    // ========================================================================
    // Input
    // ========================================================================

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl_c =
            key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl_c {
            self.quit();
            return;
        }

        match std::mem::replace(&mut self.mode, Mode::Browse) {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Prompt(mut prompt) => match prompt.handle_key(&key) {
                PromptAction::Confirm(name) => self.confirm_prompt(prompt.prompt_type, &name),
                PromptAction::Cancel => {}
                PromptAction::Continue => self.mode = Mode::Prompt(prompt),
            },
            Mode::Picker { mut picker, kind } => match picker.handle_key(key) {
                Some(outcome) => self.finish_picker(kind, outcome),
                None => self.mode = Mode::Picker { picker, kind },
            },
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Up | KeyCode::Char('k') => self.session.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.session.select_next(),
            KeyCode::Home => self.session.select_first(),
            KeyCode::End => self.session.select_last(),
            KeyCode::PageUp => {
                for _ in 0..self.browser_layout.page_size() {
                    self.session.select_prev();
                }
            }
            KeyCode::PageDown => {
                for _ in 0..self.browser_layout.page_size() {
                    self.session.select_next();
                }
            }
            KeyCode::Enter => self.open_selected(),
            KeyCode::Esc => self.session.select(None),
            KeyCode::Char('r') | KeyCode::F(5) => self.refresh(),
            KeyCode::Char('f') => self.trigger(ToolbarButton::CreateFile),
            KeyCode::Char('n') => self.trigger(ToolbarButton::CreateFolder),
            KeyCode::Delete | KeyCode::Char('x') => self.trigger(ToolbarButton::Delete),
            KeyCode::Char('m') => self.trigger(ToolbarButton::Move),
            KeyCode::Char('c') => self.trigger(ToolbarButton::Copy),
            _ => {}
        }
    }

    /// Text pasted from the terminal goes into an open prompt
    pub fn paste_text(&mut self, text: &str) {
        if let Mode::Prompt(prompt) = &mut self.mode {
            prompt.insert_str(text);
        }
    }

    /// Handle a mouse event; returns true if a redraw is needed
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(mouse.column, mouse.row);
                true
            }
            MouseEventKind::ScrollDown => {
                self.scroll(true);
                true
            }
            MouseEventKind::ScrollUp => {
                self.scroll(false);
                true
            }
            _ => false,
        }
    }

    fn scroll(&mut self, down: bool) {
        match &mut self.mode {
            Mode::Browse if down => self.session.select_next(),
            Mode::Browse => self.session.select_prev(),
            Mode::Picker { picker, .. } if down => picker.view_mut().select_next(),
            Mode::Picker { picker, .. } => picker.view_mut().select_prev(),
            Mode::Prompt(_) => {}
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        if matches!(self.mode, Mode::Browse) {
            self.handle_browse_click(column, row);
        } else if matches!(self.mode, Mode::Picker { .. }) {
            self.handle_picker_click(column, row);
        }
    }

    fn handle_browse_click(&mut self, column: u16, row: u16) {
        if let Some(button) = self.browser_layout.button_at(column, row) {
            self.last_click = None;
            self.trigger(button);
            return;
        }

        let Some(index) = self.browser_layout.entry_index_at(column, row) else {
            return;
        };
        let Some(path) = self.session.entries().get(index).map(|e| e.path.clone()) else {
            return;
        };
        self.session.select(Some(index));
        if self.register_click(ClickTarget::Entry(path)) {
            self.navigate_into(index);
        }
    }

    fn handle_picker_click(&mut self, column: u16, row: u16) {
        let Some(layout) = self.picker_layout else {
            return;
        };
        let Mode::Picker { picker, kind } = &mut self.mode else {
            return;
        };
        let kind = *kind;

        if !crate::view::ui::contains(layout.popup, column, row) {
            let outcome = picker.cancel();
            self.mode = Mode::Browse;
            self.finish_picker(kind, outcome);
            return;
        }

        if crate::view::ui::contains(layout.select_button, column, row) {
            if let Some(outcome) = picker.confirm() {
                self.mode = Mode::Browse;
                self.finish_picker(kind, outcome);
            }
            return;
        }

        let Some(node_id) = layout
            .row_index_at(column, row)
            .and_then(|index| picker.view().get_node_at_index(index))
        else {
            return;
        };
        picker.select(node_id);
        if self.register_click(ClickTarget::PickerNode(node_id)) {
            if let Mode::Picker { picker, .. } = &mut self.mode {
                picker.toggle(node_id);
            }
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let status = match (&self.in_flight, &self.status) {
            (_, Some(msg)) if msg.level == StatusLevel::Error => StatusLine::Error(&msg.text),
            (Some(_), Some(msg)) => StatusLine::Working(&msg.text),
            (None, Some(msg)) => StatusLine::Info(&msg.text),
            (_, None) => StatusLine::Hint,
        };
        self.browser_layout = BrowserRenderer::render(
            frame,
            area,
            &self.session,
            &mut self.table_state,
            status,
            self.in_flight.is_some(),
        );

        self.picker_layout = None;
        match &mut self.mode {
            Mode::Browse => {}
            Mode::Prompt(prompt) => {
                PromptRenderer::render(frame, area, prompt);
            }
            Mode::Picker { picker, .. } => {
                self.picker_layout = Some(PickerRenderer::render(frame, area, picker));
            }
        }
    }

    /// Where the browser screen was last drawn
    pub fn browser_layout(&self) -> &BrowserLayout {
        &self.browser_layout
    }

    /// Where the picker was last drawn, if it is open
    pub fn picker_layout(&self) -> Option<PickerLayout> {
        self.picker_layout
    }

    /// Working directory, for tests and the terminal title
    pub fn working_dir(&self) -> &Path {
        self.session.working_dir()
    }
}
