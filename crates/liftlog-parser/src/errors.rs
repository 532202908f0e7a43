use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("required column(s) missing from header: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<&'static str> },

    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("data row {line_index} invalid in column '{column}': {message}")]
    DataRow {
        line_index: u64,
        column: &'static str,
        message: String,
    },

    #[error("data row {line_index} malformed: expected {expected} columns but found {found}")]
    RaggedRow {
        line_index: u64,
        expected: usize,
        found: usize,
    },

    #[error("file did not contain any data rows")]
    EmptyData,
}

impl ParserError {
    pub(crate) fn data_row(line_index: u64, column: &'static str, message: impl Into<String>) -> Self {
        ParserError::DataRow {
            line_index,
            column,
            message: message.into(),
        }
    }
}
