use fboss_core::{
    grpc::{fboss_ctrl_client::FbossCtrlClient, Empty},
    port::PortMap,
};
use tonic::transport::Channel;

use crate::{connection::Connection, error::Result};

/// A handle to the agent's port information.
#[derive(Debug, Clone)]
pub struct Service {
    client: FbossCtrlClient<Channel>,
}

impl Service {
    pub(crate) fn new(connection: &Connection) -> Self {
        let client = FbossCtrlClient::new(connection.channel.clone());

        Self { client }
    }

    /// Returns all ports the agent knows about.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails.
    #[tracing::instrument(skip(self))]
    pub async fn all_port_info(&mut self) -> Result<PortMap> {
        Ok(self.client.get_all_port_info(Empty {}).await?.into_inner().into())
    }
}
