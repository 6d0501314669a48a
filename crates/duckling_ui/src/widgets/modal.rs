use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::{Alignment, Buffer, Constraint, Layout, Position, Rect, Widget},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    handlers::key_event::handle_text_input,
    widgets::{
        buttons::{Button, ButtonTone, Buttons},
        config_form::ConfigForm,
        select::{Selector, SelectorList},
        text_input::TextInput,
    },
};

/// Centre a `width` x `height` box inside `area`, clamped to fit
#[must_use]
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn frame(area: Rect, buf: &mut Buffer, title: &str, border: Color) {
    let block = Block::default()
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(Color::Black));
    Clear.render(area, buf);
    block.render(area, buf);
}

const CONNECTIONS_BUTTONS: [&str; 4] = ["New", "Save", "Delete", "Close"];
const CONNECTIONS_WIDTH: u16 = 72;
const CONNECTIONS_HEIGHT: u16 = 16;

/// What the user asked the connections modal to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionsAction {
    None,
    /// Load the highlighted list entry into the form
    Load,
    New,
    Save,
    Delete,
    Close,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionsFocus {
    #[default]
    List,
    Name,
    Path,
    ReadOnly,
    Button(usize),
}

impl ConnectionsFocus {
    const fn next(self) -> Self {
        match self {
            Self::List => Self::Name,
            Self::Name => Self::Path,
            Self::Path => Self::ReadOnly,
            Self::ReadOnly => Self::Button(0),
            Self::Button(idx) if idx + 1 < CONNECTIONS_BUTTONS.len() => {
                Self::Button(idx + 1)
            }
            Self::Button(_) => Self::List,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::List => Self::Button(CONNECTIONS_BUTTONS.len() - 1),
            Self::Name => Self::List,
            Self::Path => Self::Name,
            Self::ReadOnly => Self::Path,
            Self::Button(0) => Self::ReadOnly,
            Self::Button(idx) => Self::Button(idx - 1),
        }
    }
}

/// UI state of the connection-management modal. The list and form it
/// shows are owned by the caller.
#[derive(Debug, Clone, Default)]
pub struct ConnectionsModal {
    pub is_open: bool,
    pub focus: ConnectionsFocus,
}

impl ConnectionsModal {
    pub fn open(&mut self) {
        self.is_open = true;
        self.focus = ConnectionsFocus::List;
    }

    pub const fn close(&mut self) {
        self.is_open = false;
    }

    /// Screen rectangle of the modal inside `area`
    #[must_use]
    pub fn area(area: Rect) -> Rect {
        centered(area, CONNECTIONS_WIDTH, CONNECTIONS_HEIGHT)
    }

    /// Handle a key; list highlight and form edits are applied in place,
    /// everything that needs the server is returned as an action
    pub fn handle_key_events(
        &mut self,
        key: KeyEvent,
        list: &mut Selector,
        form: &mut ConfigForm,
    ) -> ConnectionsAction {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => return self.finish(ConnectionsAction::Close),
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => {
                return ConnectionsAction::Save;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('n')) => {
                self.focus = ConnectionsFocus::Name;
                return ConnectionsAction::New;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('d')) => {
                return ConnectionsAction::Delete;
            }
            (_, KeyCode::Tab) => {
                self.focus = self.focus.next();
                return ConnectionsAction::None;
            }
            (_, KeyCode::BackTab) => {
                self.focus = self.focus.prev();
                return ConnectionsAction::None;
            }
            _ => {}
        }

        match self.focus {
            ConnectionsFocus::List => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    list.select_previous();
                    ConnectionsAction::None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    list.select_next();
                    ConnectionsAction::None
                }
                KeyCode::Enter | KeyCode::Char(' ') => ConnectionsAction::Load,
                _ => ConnectionsAction::None,
            },
            ConnectionsFocus::Name => {
                Self::edit_field(key, &mut form.name);
                Self::enter_saves(key)
            }
            ConnectionsFocus::Path => {
                Self::edit_field(key, &mut form.path);
                Self::enter_saves(key)
            }
            ConnectionsFocus::ReadOnly => match key.code {
                KeyCode::Char(' ') => {
                    form.toggle_read_only();
                    ConnectionsAction::None
                }
                KeyCode::Enter => ConnectionsAction::Save,
                _ => ConnectionsAction::None,
            },
            ConnectionsFocus::Button(idx) => match key.code {
                KeyCode::Left => {
                    self.focus = ConnectionsFocus::Button(
                        (idx + CONNECTIONS_BUTTONS.len() - 1)
                            % CONNECTIONS_BUTTONS.len(),
                    );
                    ConnectionsAction::None
                }
                KeyCode::Right => {
                    self.focus = ConnectionsFocus::Button(
                        (idx + 1) % CONNECTIONS_BUTTONS.len(),
                    );
                    ConnectionsAction::None
                }
                KeyCode::Enter => match idx {
                    0 => ConnectionsAction::New,
                    1 => ConnectionsAction::Save,
                    2 => ConnectionsAction::Delete,
                    _ => self.finish(ConnectionsAction::Close),
                },
                _ => ConnectionsAction::None,
            },
        }
    }

    fn finish(&mut self, action: ConnectionsAction) -> ConnectionsAction {
        self.close();
        action
    }

    fn edit_field(key: KeyEvent, input: &mut TextInput) {
        handle_text_input(key, input);
    }

    fn enter_saves(key: KeyEvent) -> ConnectionsAction {
        if key.code == KeyCode::Enter {
            ConnectionsAction::Save
        } else {
            ConnectionsAction::None
        }
    }
}

/// Borrowed rendering of the connections modal
pub struct ConnectionsModalView<'a> {
    pub modal: &'a ConnectionsModal,
    pub list: &'a Selector,
    pub form: &'a ConfigForm,
    pub title: &'a str,
}

impl ConnectionsModalView<'_> {
    /// Where the terminal cursor goes when a text field has focus
    #[must_use]
    pub fn cursor_position(&self, area: Rect) -> Option<Position> {
        let (row, input) = match self.modal.focus {
            ConnectionsFocus::Name => (0, &self.form.name),
            ConnectionsFocus::Path => (1, &self.form.path),
            ConnectionsFocus::List
            | ConnectionsFocus::ReadOnly
            | ConnectionsFocus::Button(_) => return None,
        };
        let (_, form_area) = Self::split(ConnectionsModal::area(area));
        let column = u16::try_from(input.cursor_column()).unwrap_or(0);
        Some(Position::new(
            form_area.x + FIELD_LABEL_WIDTH + column,
            form_area.y + 2 + row,
        ))
    }

    fn split(modal_area: Rect) -> (Rect, Rect) {
        let inner = modal_area.inner(ratatui::layout::Margin::new(1, 1));
        let [list, form] = Layout::horizontal([
            Constraint::Percentage(35),
            Constraint::Percentage(65),
        ])
        .spacing(2)
        .areas(inner);
        (list, form)
    }
}

const FIELD_LABEL_WIDTH: u16 = 11;

impl Widget for ConnectionsModalView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.modal.is_open {
            return;
        }

        let modal_area = ConnectionsModal::area(area);
        frame(modal_area, buf, "Manage Connections", Color::Blue);
        let (list_area, form_area) = Self::split(modal_area);

        let list_block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray));
        let list_inner = list_block.inner(list_area);
        list_block.render(list_area, buf);
        SelectorList {
            selector: self.list,
            is_focused: self.modal.focus == ConnectionsFocus::List,
        }
        .render(list_inner, buf);

        let [title_row, _, name_row, path_row, read_only_row, _, buttons_row] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .areas(form_area);

        Line::from(Span::styled(self.title, Style::default().fg(Color::Cyan)))
            .render(title_row, buf);

        let field_style = |focused: bool| {
            if focused {
                Style::default().fg(Color::Yellow).bg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            }
        };
        let label_width = usize::from(FIELD_LABEL_WIDTH);
        for (row, label, input, focus) in [
            (name_row, "Name:", &self.form.name, ConnectionsFocus::Name),
            (path_row, "Path:", &self.form.path, ConnectionsFocus::Path),
        ] {
            Paragraph::new(format!("{label:<label_width$}{}", input.text()))
                .style(field_style(self.modal.focus == focus))
                .render(row, buf);
        }

        let checkbox = if self.form.read_only {
            "[x] Read-only"
        } else {
            "[ ] Read-only"
        };
        Paragraph::new(checkbox)
            .style(field_style(
                self.modal.focus == ConnectionsFocus::ReadOnly,
            ))
            .render(read_only_row, buf);

        let selected = match self.modal.focus {
            ConnectionsFocus::Button(idx) => Some(idx),
            ConnectionsFocus::List
            | ConnectionsFocus::Name
            | ConnectionsFocus::Path
            | ConnectionsFocus::ReadOnly => None,
        };
        Buttons {
            buttons: CONNECTIONS_BUTTONS
                .iter()
                .map(|label| {
                    let tone = if *label == "Delete" {
                        ButtonTone::Danger
                    } else {
                        ButtonTone::Neutral
                    };
                    Button::new(label).tone(tone)
                })
                .collect(),
            selected,
        }
        .render(buttons_row, buf);
    }
}

/// Yes/No question; answers `true` for Yes
#[derive(Debug, Clone)]
pub struct ConfirmationModal {
    pub title: String,
    pub message: String,
    pub selected_button: usize,
}

impl ConfirmationModal {
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            selected_button: 0,
        }
    }

    /// `Some(answer)` once the user has decided
    pub const fn handle_key_events(&mut self, key: KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Enter => Some(self.selected_button == 0),
            KeyCode::Esc | KeyCode::Char('n' | 'N') => Some(false),
            KeyCode::Char('y' | 'Y') => Some(true),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.selected_button = (self.selected_button + 1) % 2;
                None
            }
            _ => None,
        }
    }
}

impl Widget for &ConfirmationModal {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered(area, 56, 8);
        frame(modal_area, buf, &self.title, Color::Red);

        let [message_area, buttons_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)])
                .margin(1)
                .areas(modal_area);

        Paragraph::new(self.message.as_str())
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(message_area, buf);

        Buttons {
            buttons: vec![Button::new("Yes"), Button::new("No")],
            selected: Some(self.selected_button),
        }
        .render(buttons_area, buf);
    }
}

/// A message the user has to acknowledge
#[derive(Debug, Clone)]
pub struct AlertModal {
    pub message: String,
}

impl AlertModal {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Whether the key dismissed the alert
    #[must_use]
    pub const fn handle_key_events(key: KeyEvent) -> bool {
        matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' '))
    }
}

impl Widget for &AlertModal {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered(area, 56, 8);
        frame(modal_area, buf, "Notice", Color::Yellow);

        let [message_area, buttons_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)])
                .margin(1)
                .areas(modal_area);

        Paragraph::new(self.message.as_str())
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(message_area, buf);
        Buttons {
            buttons: vec![Button::new("OK")],
            selected: Some(0),
        }
        .render(buttons_area, buf);
    }
}

/// Width and height of the info dialog
pub const INFO_MODAL_SIZE: (u16, u16) = (50, 9);

/// Application name and version
#[derive(Debug, Clone)]
pub struct InfoModal {
    pub title: String,
    pub body: String,
}

impl Widget for &InfoModal {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, height) = INFO_MODAL_SIZE;
        let modal_area = centered(area, width, height);
        frame(modal_area, buf, &self.title, Color::Cyan);

        let [body_area, buttons_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)])
                .margin(1)
                .areas(modal_area);
        Paragraph::new(self.body.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(body_area, buf);
        Buttons {
            buttons: vec![Button::new("OK")],
            selected: Some(0),
        }
        .render(buttons_area, buf);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Submitted(String),
    Cancelled,
}

/// Single-line text prompt, e.g. for a file name
#[derive(Debug, Clone)]
pub struct PromptModal {
    pub title: String,
    pub prompt: String,
    pub input: TextInput,
}

impl PromptModal {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        prompt: impl Into<String>,
        initial: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            prompt: prompt.into(),
            input: TextInput::with_text(initial.into()),
        }
    }

    pub fn handle_key_events(&mut self, key: KeyEvent) -> Option<PromptOutcome> {
        match key.code {
            KeyCode::Enter => {
                Some(PromptOutcome::Submitted(self.input.text().to_string()))
            }
            KeyCode::Esc => Some(PromptOutcome::Cancelled),
            _ => {
                handle_text_input(key, &mut self.input);
                None
            }
        }
    }

    #[must_use]
    pub fn cursor_position(&self, area: Rect) -> Position {
        let modal_area = centered(area, 60, 7);
        let column = u16::try_from(self.input.cursor_column()).unwrap_or(0);
        Position::new(
            (modal_area.x + 1 + column).min(modal_area.right().saturating_sub(2)),
            modal_area.y + 3,
        )
    }
}

impl Widget for &PromptModal {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered(area, 60, 7);
        frame(modal_area, buf, &self.title, Color::Yellow);

        let [prompt_area, input_area, _, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .margin(1)
        .areas(modal_area);

        Paragraph::new(self.prompt.as_str()).render(prompt_area, buf);
        Paragraph::new(self.input.text())
            .style(Style::default().fg(Color::Yellow).bg(Color::DarkGray))
            .render(input_area, buf);
        Paragraph::new("Enter to accept, Esc to cancel")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(hint_area, buf);
    }
}

/// Owns every modal; at most one dialog sits above the connections modal
#[derive(Default, Debug)]
pub struct ModalManager {
    pub connections: ConnectionsModal,
    pub confirmation: Option<ConfirmationModal>,
    pub alert: Option<AlertModal>,
    pub prompt: Option<PromptModal>,
    pub info: Option<InfoModal>,
}

impl ModalManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_any_modal_open(&self) -> bool {
        self.connections.is_open || self.has_dialog()
    }

    /// A dialog captures input ahead of the connections modal
    #[must_use]
    pub const fn has_dialog(&self) -> bool {
        self.confirmation.is_some()
            || self.alert.is_some()
            || self.prompt.is_some()
            || self.info.is_some()
    }

    pub fn open_confirmation_modal(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.confirmation = Some(ConfirmationModal::new(title, message));
    }

    pub fn open_alert_modal(&mut self, message: impl Into<String>) {
        self.alert = Some(AlertModal::new(message));
    }

    pub fn open_prompt_modal(&mut self, prompt: PromptModal) {
        self.prompt = Some(prompt);
    }

    pub fn open_info_modal(&mut self, title: &str, body: &str) {
        self.info = Some(InfoModal {
            title: title.to_string(),
            body: body.to_string(),
        });
    }

    /// Render every open dialog, most urgent last so it ends up on top
    pub fn render_dialogs(&self, area: Rect, buf: &mut Buffer) {
        if let Some(info) = &self.info {
            info.render(area, buf);
        }
        if let Some(prompt) = &self.prompt {
            prompt.render(area, buf);
        }
        if let Some(confirmation) = &self.confirmation {
            confirmation.render(area, buf);
        }
        if let Some(alert) = &self.alert {
            alert.render(area, buf);
        }
    }
}
