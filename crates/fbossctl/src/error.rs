use miette::Diagnostic;
use thiserror::Error;

/// The error type for fbossctl with miette diagnostic reporting
#[derive(Debug, Error, Diagnostic)]
pub enum CtlError {
    /// I/O error
    #[error("I/O error")]
    #[diagnostic(code(fbossctl::io))]
    Io(#[from] std::io::Error),

    /// Config file error
    #[error("Could not load config: {0:#}")]
    #[diagnostic(code(fbossctl::config))]
    Config(anyhow::Error),

    /// SDK error
    #[error("Error talking to the agent")]
    #[diagnostic(code(fbossctl::sdk))]
    Sdk(#[from] fboss_sdk::Error),

    /// Running config parse error
    #[error("Could not parse the agent's running config")]
    #[diagnostic(code(fbossctl::json))]
    Json(#[from] serde_json::Error),

    /// The agent rejected the request
    #[error("Fboss Error: {0}")]
    #[diagnostic(code(fbossctl::agent))]
    Agent(String),
}

impl CtlError {
    /// Wraps an SDK error, singling out errors the agent itself reported.
    pub fn from_agent(error: fboss_sdk::Error) -> Self {
        match error.agent_status().map(|status| status.message().to_string()) {
            Some(message) => Self::Agent(message),
            None => Self::Sdk(error),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Agent(_) => 2,
            _ => 1,
        }
    }
}

impl From<anyhow::Error> for CtlError {
    fn from(error: anyhow::Error) -> Self {
        Self::Config(error)
    }
}

pub type CtlResult<T> = Result<T, CtlError>;
