use std::ops::Range;

use duckling_api::{ConsoleApi, QueryResult, ResultRow};
use duckling_ui::widgets::{
    results::{Notice, ResultsView},
    table::ResultTable,
};
use serde_json::Value;
use tracing::{debug, warn};

use super::Console;

/// The selected text when the selection is non-empty, else the whole
/// buffer; trimmed. `None` when nothing is left to send.
#[must_use]
pub fn query_to_send(text: &str, selection: Option<Range<usize>>) -> Option<&str> {
    let source = selection
        .filter(|range| !range.is_empty())
        .and_then(|range| text.get(range))
        .unwrap_or(text);
    let query = source.trim();
    (!query.is_empty()).then_some(query)
}

/// Display text of one result cell. Strings lose their quotes and
/// missing or null values read `NULL`.
#[must_use]
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "NULL".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn to_table(columns: &[String], data: &[ResultRow]) -> ResultTable {
    let rows = data
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| cell_text(row.get(column)))
                .collect()
        })
        .collect();
    ResultTable::new(columns.to_vec(), rows)
}

/// Results panel contents and status line for a successful reply. The
/// status line is `None` when it should be left alone.
#[must_use]
pub fn render_query_result(result: &QueryResult) -> (ResultsView, Option<String>) {
    match result {
        QueryResult::Error { error } => (
            ResultsView::with_notice(Notice::error(format!(
                "Query Error: {error}"
            ))),
            Some("Query Error.".to_string()),
        ),
        QueryResult::Message { message, .. } => (
            ResultsView::with_notice(Notice::success(message.as_str())),
            Some("Query successful.".to_string()),
        ),
        QueryResult::Table {
            columns,
            data,
            rows_affected,
            ..
        } => {
            let view = if !data.is_empty() {
                ResultsView::with_table(to_table(columns, data), None)
            } else if !columns.is_empty() {
                ResultsView::with_table(
                    to_table(columns, data),
                    Some(Notice::info(
                        "Query executed. Columns returned, but no data rows.",
                    )),
                )
            } else {
                ResultsView::with_notice(Notice::info(
                    "Query executed successfully, no data returned.",
                ))
            };
            let rows = rows_affected
                .map_or_else(|| "N/A".to_string(), |n| n.to_string());
            (view, Some(format!("Query successful. Rows: {rows}")))
        }
        QueryResult::Unknown => (ResultsView::empty(), None),
    }
}

impl<A: ConsoleApi> Console<A> {
    /// Run the editor selection (or the whole editor) on the server
    pub async fn run_query(&mut self, text: &str, selection: Option<Range<usize>>) {
        let Some(query) = query_to_send(text, selection) else {
            self.show(Notice::warning(
                "Query is empty (or selected part is empty).",
            ));
            return;
        };

        debug!(query, "running query");
        match self.api.run_query(query).await {
            Ok(result) => {
                let (results, status_line) = render_query_result(&result);
                self.view.results = results;
                if let Some(status_line) = status_line {
                    self.view.status_line = status_line;
                }
            }
            Err(err) if err.is_server() => {
                warn!(%err, "query rejected");
                self.show(Notice::error(format!(
                    "Error: {}",
                    err.message_or("Unknown server error")
                )));
                self.view.status_line = "Server Error.".to_string();
            }
            Err(err) => {
                warn!(%err, "query request failed");
                self.show(Notice::error(format!(
                    "Network or server error: {err}"
                )));
                self.view.status_line = "Network Error.".to_string();
            }
        }
    }
}
