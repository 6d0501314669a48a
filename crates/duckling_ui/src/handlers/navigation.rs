use crossterm::event::KeyCode;

use crate::widgets::table::DataTable;

/// Default terminal width used for column offset calculations
const DEFAULT_TERMINAL_WIDTH: u16 = 80;

/// Helper for results table navigation
pub struct TableNavigationHandler;

impl TableNavigationHandler {
    /// Clamps the row selection to valid bounds
    pub fn clamp_selection(table: &mut DataTable) {
        let rows = table.num_rows();
        if let Some(selected) = table.view.state.selected()
            && selected >= rows
        {
            table.view.state.select(rows.checked_sub(1));
        }
    }

    /// Clamps the column selection and offset to valid bounds
    pub fn clamp_columns(table: &mut DataTable) {
        let num_columns = table.num_columns();

        if let Some(selected_col) = table.view.state.selected_column()
            && selected_col >= num_columns
        {
            table.view.state.select_column(num_columns.checked_sub(1));
        }

        if table.view.column_offset >= num_columns {
            table.view.column_offset = num_columns.saturating_sub(1);
        }
    }

    /// vi-style and arrow-key navigation over rows and columns
    pub fn navigate(table: &mut DataTable, key: KeyCode) {
        match key {
            KeyCode::Char('j') | KeyCode::Down => {
                table.view.state.select_next();
                Self::clamp_selection(table);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                table.view.state.select_previous();
                Self::clamp_selection(table);
            }
            KeyCode::Char('h' | 'b') | KeyCode::Left => {
                // start from the last column when none is selected
                if table.view.state.selected_column().is_none() {
                    let num_cols = table.num_columns();
                    if num_cols > 0 {
                        table
                            .view
                            .state
                            .select_column(Some(num_cols.saturating_sub(1)));
                    }
                } else {
                    table.view.state.select_previous_column();
                }
                Self::follow_column(table);
            }
            KeyCode::Char('l' | 'w') | KeyCode::Right => {
                if table.view.state.selected_column().is_none() {
                    table.view.state.select_column(Some(0));
                } else {
                    table.view.state.select_next_column();
                }
                Self::follow_column(table);
            }
            KeyCode::Char('0') => {
                table.view.state.select_column(Some(0));
                table.view.column_offset = 0;
                Self::clamp_columns(table);
            }
            KeyCode::Char('$') => {
                let last_col = table.num_columns().saturating_sub(1);
                table.view.state.select_column(Some(last_col));
                Self::follow_column(table);
            }
            KeyCode::Char('g') | KeyCode::Home => {
                table.view.state.select(Some(0));
                Self::clamp_selection(table);
                table.view.column_offset = 0;
            }
            KeyCode::Char('G') | KeyCode::End => {
                table.view.state.select(table.num_rows().checked_sub(1));
            }
            _ => {}
        }
    }

    fn follow_column(table: &mut DataTable) {
        Self::clamp_columns(table);
        if let Some(selected_col) = table.view.state.selected_column() {
            // refined against the real width at render time
            table.adjust_offset_for_selected_column(
                selected_col,
                DEFAULT_TERMINAL_WIDTH,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::table::ResultTable;

    fn table(rows: usize) -> DataTable {
        DataTable::new(ResultTable::new(
            vec!["a".to_string(), "b".to_string()],
            (0..rows)
                .map(|i| vec![i.to_string(), format!("v{i}")])
                .collect(),
        ))
    }

    #[test]
    fn test_row_navigation_is_clamped() {
        let mut table = table(2);
        TableNavigationHandler::navigate(&mut table, KeyCode::Down);
        TableNavigationHandler::navigate(&mut table, KeyCode::Down);
        TableNavigationHandler::navigate(&mut table, KeyCode::Down);
        assert_eq!(table.view.state.selected(), Some(1));

        TableNavigationHandler::navigate(&mut table, KeyCode::Char('g'));
        assert_eq!(table.view.state.selected(), Some(0));
        TableNavigationHandler::navigate(&mut table, KeyCode::Char('G'));
        assert_eq!(table.view.state.selected(), Some(1));
    }

    #[test]
    fn test_column_navigation() {
        let mut table = table(1);
        TableNavigationHandler::navigate(&mut table, KeyCode::Left);
        assert_eq!(table.view.state.selected_column(), Some(1));
        TableNavigationHandler::navigate(&mut table, KeyCode::Right);
        assert_eq!(table.view.state.selected_column(), Some(1));
        TableNavigationHandler::navigate(&mut table, KeyCode::Char('0'));
        assert_eq!(table.view.state.selected_column(), Some(0));
    }

    #[test]
    fn test_empty_table_has_no_selection() {
        let mut table = table(0);
        TableNavigationHandler::navigate(&mut table, KeyCode::Down);
        assert_eq!(table.view.state.selected(), None);
        TableNavigationHandler::navigate(&mut table, KeyCode::Char('G'));
        assert_eq!(table.view.state.selected(), None);
    }
}
