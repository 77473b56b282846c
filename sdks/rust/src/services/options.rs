use fboss_core::grpc::{fboss_ctrl_client::FbossCtrlClient, SetOptionRequest};
use tonic::transport::Channel;

use crate::{connection::Connection, error::Result};

const VERBOSITY_OPTION: &str = "v";

/// A handle to the agent's runtime options.
#[derive(Debug, Clone)]
pub struct Service {
    client: FbossCtrlClient<Channel>,
}

impl Service {
    pub(crate) fn new(connection: &Connection) -> Self {
        let client = FbossCtrlClient::new(connection.channel.clone());

        Self { client }
    }

    /// Sets the agent option `name` to `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails.
    #[tracing::instrument(skip(self))]
    pub async fn set_option(&mut self, name: &str, value: &str) -> Result<()> {
        self.client
            .set_option(SetOptionRequest {
                name: name.to_string(),
                value: value.to_string(),
            })
            .await?;
        Ok(())
    }

    /// Sets the agent's logging verbosity.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails.
    pub async fn set_verbosity(&mut self, verbosity: &str) -> Result<()> {
        self.set_option(VERBOSITY_OPTION, verbosity).await
    }
}
