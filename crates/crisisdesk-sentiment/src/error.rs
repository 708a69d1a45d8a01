use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("malformed input{}: {reason}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    MalformedInput { line: Option<u64>, reason: String },

    #[error("empty dataset: cannot compute {context}")]
    EmptyDataset { context: &'static str },

    #[error("insufficient data: media and comment datasets are both empty")]
    InsufficientData,

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("report formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}

impl AnalysisError {
    pub(crate) fn malformed(line: Option<u64>, reason: impl Into<String>) -> Self {
        AnalysisError::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}
