use fboss_core::{
    neighbor::{FlushType, NeighborEntry},
    port::PortMap,
};
use fboss_sdk::ConnectionBuilder;
use fbossctl_commands::families::neighbor::Neighbor;
use futures::{stream::BoxStream, StreamExt as _};

use crate::{
    boxed_try_stream,
    error::CtlResult,
    out::{Column, CommandOutput},
    util::CommandFamily,
};

/// A neighbor command together with the table it was invoked on (`arp` or `ndp`).
pub struct NeighborTable {
    pub flush_type: FlushType,
    pub command: Neighbor,
}

impl CommandFamily for NeighborTable {
    fn run(self, agent: ConnectionBuilder) -> BoxStream<'static, CtlResult<CommandOutput>> {
        let Self {
            flush_type,
            command: Neighbor::Table,
        } = self;

        boxed_try_stream! {
            let connection = agent.connect().await?;
            let entries = connection.neighbors().table(flush_type).await?;
            let ports = connection.ports().all_port_info().await?;

            yield table(flush_type, entries, &ports);
        }
    }
}

fn columns(flush_type: FlushType) -> Vec<Column> {
    let ip_width = match flush_type {
        FlushType::Arp => 16,
        FlushType::Ndp => 40,
    };

    vec![
        Column::new("ip", "IP Address", ip_width),
        Column::new("mac", "MAC Address", 18),
        Column::new("port", "Port", 10).with_gap(2),
        Column::new("vlan", "VLAN", 18),
        Column::new("state", "State", 12),
        Column::new("ttl", "TTL", 0),
    ]
}

fn table(
    flush_type: FlushType,
    mut entries: Vec<NeighborEntry>,
    ports: &PortMap,
) -> CommandOutput {
    entries.sort_by_key(|entry| entry.ip.octets());

    entries
        .into_iter()
        .fold(CommandOutput::table(columns(flush_type)), |output, entry| {
            let state = if entry.state.is_empty() {
                "NA".to_string()
            } else {
                entry.state
            };
            let ttl = entry
                .ttl
                .map_or_else(|| "?".to_string(), |ttl| format!("{}s", ttl.as_secs()));

            output.with_row(vec![
                entry.ip.ip.to_string(),
                entry.mac,
                ports.label(entry.port),
                format!("{} ({})", entry.vlan_name, entry.vlan_id),
                state,
                ttl,
            ])
        })
}
