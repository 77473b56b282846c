use fboss_core::grpc::{fboss_ctrl_client::FbossCtrlClient, Empty};
use tonic::transport::Channel;

use crate::{connection::Connection, error::Result};

/// A handle to the agent config service.
#[derive(Debug, Clone)]
pub struct Service {
    client: FbossCtrlClient<Channel>,
}

impl Service {
    pub(crate) fn new(connection: &Connection) -> Self {
        let client = FbossCtrlClient::new(connection.channel.clone());

        Self { client }
    }

    /// Returns the config the agent is running with, as the JSON document the agent keeps.
    /// `None` if the agent has no config.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails.
    #[tracing::instrument(skip(self))]
    pub async fn running_config(&mut self) -> Result<Option<String>> {
        let config = self
            .client
            .get_running_config(Empty {})
            .await?
            .into_inner()
            .config;

        Ok(Some(config).filter(|config| !config.is_empty()))
    }

    /// Instructs the agent to reload its config as if it were restarting, without restarting.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails, including when the agent rejects the new config.
    #[tracing::instrument(skip(self))]
    pub async fn reload(&mut self) -> Result<()> {
        self.client.reload_config(Empty {}).await?;
        Ok(())
    }
}
