use clap::Args;

#[derive(Debug, Args)]
pub struct Verbosity {
    /// Verbosity level, as understood by the agent's -v flag
    pub level: String,
}
