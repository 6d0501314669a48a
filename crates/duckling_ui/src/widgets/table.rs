use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Text,
    widgets::{Cell, HighlightSpacing, Row, StatefulWidget, Table, TableState},
};
use unicode_width::UnicodeWidthStr;

/// A query result ready for display: header names and stringified cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    #[must_use]
    pub const fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }
}

/// View state for the table (selection and horizontal scroll)
#[derive(Clone, Debug, Default)]
pub struct TableViewState {
    pub state: TableState,
    pub column_offset: usize,
}

/// Results table widget: the data plus its cached column widths
#[derive(Clone, Debug, Default)]
pub struct DataTable {
    pub model: ResultTable,
    pub longest_item_lens: Vec<u16>,
    pub view: TableViewState,
}

impl DataTable {
    #[must_use]
    pub fn new(model: ResultTable) -> Self {
        let longest_item_lens = constraint_len_calculator(&model);
        let selected = (!model.rows.is_empty()).then_some(0);
        Self {
            model,
            longest_item_lens,
            view: TableViewState {
                state: TableState::default().with_selected(selected),
                column_offset: 0,
            },
        }
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.model.columns.len()
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.model.rows.len()
    }

    /// Adjusts `column_offset` to ensure the selected column is visible
    pub fn adjust_offset_for_selected_column(
        &mut self,
        selected_col: usize,
        area_width: u16,
    ) {
        if self.longest_item_lens.is_empty() {
            return;
        }

        let visible_end = visible_columns(
            &self.longest_item_lens,
            self.view.column_offset,
            area_width,
        )
        .last()
        .map_or(self.view.column_offset, |&idx| idx + 1);

        if selected_col < self.view.column_offset || selected_col >= visible_end
        {
            self.view.column_offset = selected_col;
        }

        if self.view.column_offset >= self.longest_item_lens.len() {
            self.view.column_offset =
                self.longest_item_lens.len().saturating_sub(1);
        }
    }
}

/// Column indices that fit in `area_width`, starting at `offset`.
/// Always yields at least one column when there are any.
fn visible_columns(lens: &[u16], offset: usize, area_width: u16) -> Vec<usize> {
    let mut cols = Vec::new();
    let mut cumulative_width = 0u16;
    for (idx, &len) in lens.iter().enumerate().skip(offset) {
        let col_width = len.saturating_add(1);
        if cumulative_width.saturating_add(col_width) > area_width {
            break;
        }
        cumulative_width += col_width;
        cols.push(idx);
    }
    if cols.is_empty() && !lens.is_empty() {
        cols.push(offset.min(lens.len() - 1));
    }
    cols
}

/// Visible columns for rendering, scrolled so the selected column shows.
/// Returns the columns and the selected column's position among them.
fn calculate_visible_columns(
    lens: &[u16],
    column_offset: usize,
    selected_col: Option<usize>,
    area_width: u16,
) -> (Vec<usize>, Option<usize>) {
    let Some(selected_col) = selected_col else {
        return (visible_columns(lens, column_offset, area_width), None);
    };

    let mut offset = column_offset.min(selected_col);
    let fits = visible_columns(lens, offset, area_width);
    if !fits.contains(&selected_col) {
        offset = selected_col;
    }
    offset = offset.min(lens.len().saturating_sub(1));

    let cols = visible_columns(lens, offset, area_width);
    let relative = cols.iter().position(|&idx| idx == selected_col);
    (cols, Some(relative.unwrap_or(0)))
}

impl StatefulWidget for &DataTable {
    type State = TableViewState;

    fn render(
        self,
        area: Rect,
        buf: &mut ratatui::buffer::Buffer,
        state: &mut Self::State,
    ) {
        if self.longest_item_lens.is_empty() {
            return;
        }

        let original_col = state.state.selected_column();
        let (visible_cols, relative_selected_col) = calculate_visible_columns(
            &self.longest_item_lens,
            state.column_offset,
            original_col,
            area.width,
        );
        state.state.select_column(relative_selected_col);

        let header = visible_cols
            .iter()
            .map(|&idx| {
                Cell::from(
                    self.model.columns.get(idx).cloned().unwrap_or_default(),
                )
            })
            .collect::<Row>()
            .style(Style::default().add_modifier(Modifier::BOLD))
            .height(1);

        let rows = self.model.rows.iter().map(|row| {
            visible_cols
                .iter()
                .map(|&idx| Cell::from(row.get(idx).cloned().unwrap_or_default()))
                .collect::<Row>()
                .height(1)
        });

        let constraints = visible_cols
            .iter()
            .map(|&idx| {
                let len = self.longest_item_lens.get(idx).copied().unwrap_or(1);
                Constraint::Length(len.saturating_add(1))
            })
            .collect::<Vec<_>>();

        let (row_style, col_style, cell_style, symbol) = create_table_styles();
        let table = Table::new(rows, constraints)
            .header(header)
            .row_highlight_style(row_style)
            .column_highlight_style(col_style)
            .cell_highlight_style(cell_style)
            .highlight_symbol(symbol)
            .highlight_spacing(HighlightSpacing::Always);

        StatefulWidget::render(table, area, buf, &mut state.state);
        state.state.select_column(original_col);
    }
}

/// Display width of the widest line in each column, header included
fn constraint_len_calculator(model: &ResultTable) -> Vec<u16> {
    let mut longest = model
        .columns
        .iter()
        .map(|name| u16::try_from(name.width()).unwrap_or(u16::MAX))
        .collect::<Vec<u16>>();

    for row in &model.rows {
        for (len, value) in longest.iter_mut().zip(row) {
            let width = value.lines().map(UnicodeWidthStr::width).max();
            if let Some(width) = width.and_then(|w| u16::try_from(w).ok()) {
                *len = (*len).max(width);
            }
        }
    }

    longest
}

fn create_table_styles() -> (Style, Style, Style, Text<'static>) {
    let selected_row_style = Style::default()
        .add_modifier(Modifier::BOLD)
        .fg(Color::Black)
        .bg(Color::Yellow);
    let selected_col_style = Style::default().fg(Color::Cyan);
    let selected_cell_style = Style::default()
        .add_modifier(Modifier::REVERSED)
        .fg(Color::Magenta);
    (
        selected_row_style,
        selected_col_style,
        selected_cell_style,
        Text::from(" > "),
    )
}
