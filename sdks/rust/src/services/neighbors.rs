use fboss_core::{
    grpc::{fboss_ctrl_client::FbossCtrlClient, Empty, FlushNeighborEntryRequest},
    neighbor::{FlushFilter, FlushType, NeighborEntry},
    BinaryAddress, Error as CoreError,
};
use tonic::transport::Channel;

use crate::{connection::Connection, error::Result};

/// A handle to the neighbor table service.
///
/// Exposes methods to read the agent's ARP and NDP tables and to flush entries from them.
///
/// # Example
///
/// ```no_run
/// use fboss_sdk::Connection;
///
/// # #[tokio::main]
/// # async fn main() {
/// let connection = Connection::builder().connect().await.unwrap();
/// let mut neighbor_service = connection.neighbors();
///
/// for entry in neighbor_service.ndp_table().await.unwrap() {
///     println!("{} is at {}", entry.ip.ip, entry.mac);
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Service {
    client: FbossCtrlClient<Channel>,
}

impl Service {
    pub(crate) fn new(connection: &Connection) -> Self {
        let client = FbossCtrlClient::new(connection.channel.clone());

        Self { client }
    }

    /// Returns the agent's ARP (IPv4) table.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails or an entry has an undecodable address.
    #[tracing::instrument(skip(self))]
    pub async fn arp_table(&mut self) -> Result<Vec<NeighborEntry>> {
        self.client
            .get_arp_table(Empty {})
            .await?
            .into_inner()
            .try_into()
            .map_err(Into::into)
    }

    /// Returns the agent's NDP (IPv6) table.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails or an entry has an undecodable address.
    #[tracing::instrument(skip(self))]
    pub async fn ndp_table(&mut self) -> Result<Vec<NeighborEntry>> {
        self.client
            .get_ndp_table(Empty {})
            .await?
            .into_inner()
            .try_into()
            .map_err(Into::into)
    }

    /// Returns the table selected by `flush_type`.
    ///
    /// # Errors
    ///
    /// See [`Service::arp_table`] and [`Service::ndp_table`].
    pub async fn table(&mut self, flush_type: FlushType) -> Result<Vec<NeighborEntry>> {
        match flush_type {
            FlushType::Arp => self.arp_table().await,
            FlushType::Ndp => self.ndp_table().await,
        }
    }

    /// Flushes the entry for `address` on `vlan_id` and returns how many entries the agent
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails.
    #[tracing::instrument(skip(self, address), fields(ip = %address.ip))]
    pub async fn flush_entry(&mut self, address: BinaryAddress, vlan_id: i32) -> Result<u32> {
        let count = self
            .client
            .flush_neighbor_entry(FlushNeighborEntryRequest {
                ip: Some(address.into()),
                vlan_id,
            })
            .await?
            .into_inner()
            .count;

        tracing::debug!(count, "Flushed neighbor entry");

        u32::try_from(count).map_err(|_| CoreError::NegativeCount(count).into())
    }

    /// Flushes every entry of the `flush_type` table that `filter` selects and returns the
    /// total the agent reports as removed. The total is summed as a `u64`, which cannot overflow
    /// for any table the agent can return.
    ///
    /// A host network (`/32` or `/128`) is flushed with a single call without reading the
    /// table. Otherwise the table is fetched once and one flush call is made per matching
    /// entry, in table order. The first failing call aborts the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if any RPC call fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fboss_sdk::{
    ///     core::neighbor::{parse_network, FlushFilter, FlushType, VlanFilter},
    ///     Connection,
    /// };
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let connection = Connection::builder().connect().await.unwrap();
    /// let network = parse_network("2401:db00::/64").unwrap();
    /// let filter = FlushFilter::new(network, VlanFilter::Only(2000));
    /// let flushed = connection
    ///     .neighbors()
    ///     .flush_subnet(FlushType::Ndp, &filter)
    ///     .await
    ///     .unwrap();
    ///
    /// println!("Flushed {flushed} entries");
    /// # }
    /// ```
    #[tracing::instrument(skip(self, filter), fields(filter = %filter))]
    pub async fn flush_subnet(
        &mut self,
        flush_type: FlushType,
        filter: &FlushFilter,
    ) -> Result<u64> {
        if let Some(host) = filter.host() {
            return self
                .flush_entry(BinaryAddress::new(host), filter.vlan().wire_vlan_id())
                .await
                .map(u64::from);
        }

        let table = self.table(flush_type).await?;
        tracing::debug!(entries = table.len(), "Fetched {flush_type} table");

        let mut flushed = 0u64;
        for entry in filter.select(&table) {
            flushed += u64::from(self.flush_entry(entry.ip.clone(), entry.vlan_id).await?);
        }

        Ok(flushed)
    }
}
