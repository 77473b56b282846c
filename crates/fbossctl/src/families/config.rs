use fboss_sdk::ConnectionBuilder;
use fbossctl_commands::families::config::Config;
use futures::{stream::BoxStream, StreamExt as _};

use crate::{
    boxed_try_stream,
    error::{CtlError, CtlResult},
    out::CommandOutput,
    util::CommandFamily,
};

const AGENT_CONFIG: &str = "agent";
const NO_CONFIG: &str = "No Config Info Found";

impl CommandFamily for Config {
    fn run(self, agent: ConnectionBuilder) -> BoxStream<'static, CtlResult<CommandOutput>> {
        match self {
            Config::Show { config_type } => boxed_try_stream! {
                if config_type != AGENT_CONFIG {
                    tracing::debug!(%config_type, "Only the agent config can be shown");
                    yield CommandOutput::message(NO_CONFIG);
                    return;
                }

                let connection = agent.connect().await?;
                match connection.config().running_config().await? {
                    Some(config) => {
                        let document = serde_json::from_str(&config)?;
                        yield CommandOutput::document(document);
                    }
                    None => yield CommandOutput::message(NO_CONFIG),
                }
            },
            Config::Reload => boxed_try_stream! {
                let connection = agent.connect().await?;
                connection
                    .config()
                    .reload()
                    .await
                    .map_err(CtlError::from_agent)?;

                yield CommandOutput::message("Config reloaded");
            },
        }
    }
}
