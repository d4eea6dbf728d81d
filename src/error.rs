use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HobbyistError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Corrupt document: {0}")]
    Corrupt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl HobbyistError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        HobbyistError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Machine-readable code placed in `extensions.code` of a GraphQL error.
    pub fn code(&self) -> &'static str {
        match self {
            HobbyistError::InvalidArgument(_) => "INVALID_ARGUMENT",
            HobbyistError::NotFound { .. } => "NOT_FOUND",
            HobbyistError::StoreUnavailable(_) | HobbyistError::Io(_) => "STORE_UNAVAILABLE",
            HobbyistError::Config(_)
            | HobbyistError::Corrupt(_)
            | HobbyistError::Json(_)
            | HobbyistError::Toml(_) => "INTERNAL",
        }
    }
}

impl ErrorExtensions for HobbyistError {
    fn extend(&self) -> async_graphql::Error {
        match self {
            HobbyistError::InvalidArgument(_) | HobbyistError::NotFound { .. } => {
                tracing::debug!(error = %self, "Request failed");
            }
            _ => tracing::error!(error = %self, "Server error"),
        }

        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

pub type Result<T> = std::result::Result<T, HobbyistError>;
