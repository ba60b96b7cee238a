use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Malformed or incomplete source data. Fatal at startup.
    #[error("data integrity error: {0}")]
    DataIntegrity(String),

    #[error("unknown team '{name}'{}", suggestion_suffix(.suggestion))]
    UnknownTeam {
        name: String,
        suggestion: Option<String>,
    },

    #[error("unknown chart kind '{0}'")]
    UnknownChartKind(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

impl DashboardError {
    pub fn integrity(message: impl Into<String>) -> Self {
        DashboardError::DataIntegrity(message.into())
    }
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean '{}'?)", s))
        .unwrap_or_default()
}
