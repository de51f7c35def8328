use crate::dom;
use crate::models::DataRecord;

pub(crate) fn table_id(source: &str) -> String {
    format!("data-editor-{source}")
}

/// One body cell: its optional `data-field` override and its text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub field: Option<String>,
    pub text: String,
}

/// Builds one record per row. A cell is keyed by its own field name, else
/// by the header in the same column; cells with neither are dropped.
pub(crate) fn build_records(headers: &[String], rows: &[Vec<Cell>]) -> Vec<DataRecord> {
    rows.iter()
        .map(|row| {
            let mut rec = DataRecord::new();
            for (i, cell) in row.iter().enumerate() {
                let key = cell
                    .field
                    .as_deref()
                    .filter(|f| !f.is_empty())
                    .or_else(|| headers.get(i).map(String::as_str));
                if let Some(key) = key {
                    rec.insert(key.to_string(), cell.text.clone());
                }
            }
            rec
        })
        .collect()
}

/// Headers are every `th` in document order; rows come from `tbody tr`.
pub(crate) fn read_table(table: &web_sys::Element) -> (Vec<String>, Vec<Vec<Cell>>) {
    let headers = dom::query_all_in::<web_sys::Element>(table, "th")
        .into_iter()
        .map(|th| th.text_content().unwrap_or_default())
        .collect();

    let rows = dom::query_all_in::<web_sys::Element>(table, "tbody tr")
        .into_iter()
        .map(|tr| {
            dom::query_all_in::<web_sys::Element>(&tr, "td")
                .into_iter()
                .map(|td| Cell {
                    field: td.get_attribute("data-field"),
                    text: td.text_content().unwrap_or_default(),
                })
                .collect()
        })
        .collect();

    (headers, rows)
}
