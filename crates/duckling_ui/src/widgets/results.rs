use ratatui::{
    prelude::{Buffer, Constraint, Layout, Rect, StatefulWidget, Widget},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
};

use super::table::{DataTable, ResultTable, TableViewState};

/// Colour family of a notice in the results panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Gray,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: Tone,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Tone::Info, text)
    }

    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Tone::Success, text)
    }

    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Tone::Warning, text)
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Tone::Error, text)
    }

    fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

/// What the results panel shows: an optional notice above an optional
/// table. Replaced wholesale by each action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsView {
    pub notice: Option<Notice>,
    pub table: Option<ResultTable>,
}

impl ResultsView {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            notice: None,
            table: None,
        }
    }

    #[must_use]
    pub const fn with_notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            table: None,
        }
    }

    #[must_use]
    pub const fn with_table(
        table: ResultTable,
        notice: Option<Notice>,
    ) -> Self {
        Self {
            notice,
            table: Some(table),
        }
    }
}

/// Renders a [`ResultsView`]; the table part goes through [`DataTable`]
pub struct ResultsPanel<'a> {
    pub notice: Option<&'a Notice>,
    pub table: Option<&'a DataTable>,
}

impl StatefulWidget for ResultsPanel<'_> {
    type State = TableViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let notice_height = u16::from(self.notice.is_some());
        let [notice_area, table_area] = Layout::vertical([
            Constraint::Length(if self.table.is_some() {
                notice_height
            } else {
                area.height
            }),
            Constraint::Min(0),
        ])
        .areas(area);

        if let Some(notice) = self.notice {
            Paragraph::new(notice.text.as_str())
                .style(Style::default().fg(notice.tone.color()))
                .wrap(Wrap { trim: true })
                .render(notice_area, buf);
        }

        if let Some(table) = self.table {
            StatefulWidget::render(table, table_area, buf, state);
        }
    }
}
