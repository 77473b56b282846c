use std::{net::Ipv6Addr, time::Duration};

use fboss_core::{DEFAULT_AGENT_HOST, DEFAULT_AGENT_PORT};
use tonic::transport::{Channel, Endpoint};

use crate::{
    error::Result,
    services::{ConfigService, NeighborService, OptionService, PortService},
};

/// A builder for configuring a connection to the agent.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
///
/// use fboss_sdk::Connection;
///
/// # #[tokio::main]
/// # async fn main() {
/// let connection = Connection::builder()
///     .host("rsw1aa.example.com")
///     .port(5909)
///     .timeout(Duration::from_secs(5))
///     .connect()
///     .await
///     .unwrap();
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionBuilder {
    host: String,
    port: u16,
    timeout: Option<Duration>,
}

impl Default for ConnectionBuilder {
    fn default() -> Self {
        Self {
            host: DEFAULT_AGENT_HOST.to_string(),
            port: DEFAULT_AGENT_PORT,
            timeout: None,
        }
    }
}

impl ConnectionBuilder {
    /// Creates a builder for the agent on the local switch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Host name or IP address of the switch running the agent.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Bounds both connection establishment and every call made over the connection.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn endpoint(&self) -> Result<Endpoint> {
        let host = if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };

        let mut endpoint = Endpoint::from_shared(format!("http://{host}:{}", self.port))?;
        if let Some(timeout) = self.timeout {
            endpoint = endpoint.connect_timeout(timeout).timeout(timeout);
        }

        Ok(endpoint)
    }

    /// Establishes the connection to the agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the host doesn't form a valid URI or the agent can't be reached.
    #[tracing::instrument(skip(self), fields(host = %self.host, port = self.port))]
    pub async fn connect(self) -> Result<Connection> {
        let channel = self.endpoint()?.connect().await?;
        tracing::debug!("Connected to agent");

        Ok(Connection { channel })
    }
}

/// A connection to the agent.
///
/// This struct provides access to the various services provided by the agent.
///
/// # Example
///
/// ```no_run
/// use fboss_sdk::Connection;
///
/// # #[tokio::main]
/// # async fn main() {
/// let connection = Connection::builder().connect().await.unwrap();
/// let config = connection.config().running_config().await.unwrap();
///
/// println!("{}", config.unwrap_or_default());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Connection {
    pub(crate) channel: Channel,
}

impl Connection {
    /// Creates a new builder for configuring a connection to the agent.
    #[must_use]
    pub fn builder() -> ConnectionBuilder {
        ConnectionBuilder::new()
    }

    /// Returns a handle to the neighbor table service.
    #[must_use]
    pub fn neighbors(&self) -> NeighborService {
        NeighborService::new(self)
    }

    /// Returns a handle to the agent config service.
    #[must_use]
    pub fn config(&self) -> ConfigService {
        ConfigService::new(self)
    }

    /// Returns a handle to the agent option service.
    #[must_use]
    pub fn options(&self) -> OptionService {
        OptionService::new(self)
    }

    /// Returns a handle to the port info service.
    #[must_use]
    pub fn ports(&self) -> PortService {
        PortService::new(self)
    }
}
