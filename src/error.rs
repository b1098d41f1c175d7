use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Classification failed: {0}")]
    Classification(String),

    #[error("{0}")]
    Generation(String),

    #[error("Formatting failed: {0}")]
    Formatting(String),

    #[error("Could not fetch recommendations: {0}")]
    Recommendation(String),

    #[error("A generation is already in progress for session {session_id}")]
    Busy { session_id: String },

    #[error("Session not found: {session_id}")]
    SessionNotFound { session_id: String },

    #[error("Invalid state transition: {current} -> {requested}")]
    InvalidTransition { current: String, requested: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("OpenAI error: {0}")]
    OpenAi(#[from] async_openai::error::OpenAIError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Clone for Error {
    fn clone(&self) -> Self {
        match self {
            Self::Validation(s) => Self::Validation(s.clone()),
            Self::Config(s) => Self::Config(s.clone()),
            Self::Llm(s) => Self::Llm(s.clone()),
            Self::Classification(s) => Self::Classification(s.clone()),
            Self::Generation(s) => Self::Generation(s.clone()),
            Self::Formatting(s) => Self::Formatting(s.clone()),
            Self::Recommendation(s) => Self::Recommendation(s.clone()),
            Self::Busy { session_id } => Self::Busy {
                session_id: session_id.clone(),
            },
            Self::SessionNotFound { session_id } => Self::SessionNotFound {
                session_id: session_id.clone(),
            },
            Self::InvalidTransition { current, requested } => Self::InvalidTransition {
                current: current.clone(),
                requested: requested.clone(),
            },
            Self::Internal(s) => Self::Internal(s.clone()),
            // Source errors are not Clone; keep their message
            Self::Serialization(e) => Self::Internal(format!("Serialization error: {}", e)),
            Self::Yaml(e) => Self::Internal(format!("YAML error: {}", e)),
            Self::Io(e) => Self::Internal(format!("IO error: {}", e)),
            Self::AddrParse(e) => Self::Internal(format!("Address parse error: {}", e)),
            Self::OpenAi(e) => Self::Internal(format!("OpenAI error: {}", e)),
        }
    }
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    pub fn classification(msg: impl Into<String>) -> Self {
        Self::Classification(msg.into())
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    pub fn formatting(msg: impl Into<String>) -> Self {
        Self::Formatting(msg.into())
    }

    pub fn recommendation(msg: impl Into<String>) -> Self {
        Self::Recommendation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True for failures reported by (or while talking to) the model backend.
    pub fn is_backend(&self) -> bool {
        matches!(
            self,
            Self::Llm(_)
                | Self::Classification(_)
                | Self::Generation(_)
                | Self::Formatting(_)
                | Self::Recommendation(_)
                | Self::OpenAi(_)
        )
    }
}
