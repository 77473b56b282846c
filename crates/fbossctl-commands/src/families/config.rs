use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum Config {
    /// Print the running config
    Show {
        /// Which config to show. Only the agent keeps one
        #[arg(default_value = "agent")]
        config_type: String,
    },
    /// Reload the agent's config without restarting it
    Reload,
}
