use cidr::IpCidr;
use clap::Args;
use fboss_core::neighbor::{parse_network, FlushFilter, FlushType, VlanFilter};

#[derive(Debug, Args)]
pub struct Flush {
    /// Neighbor table to flush from
    #[arg(value_enum, ignore_case = true)]
    pub flush_type: FlushType,
    /// Network (CIDR) whose entries to flush, or a single address
    #[arg(value_parser = parse_network)]
    pub network: IpCidr,
    /// Only flush entries on this VLAN. 0 matches every VLAN, like omitting it
    #[arg(long)]
    pub vlan: Option<u16>,
}

impl Flush {
    #[must_use]
    pub fn vlan_filter(&self) -> VlanFilter {
        VlanFilter::from_vlan_id(self.vlan)
    }

    #[must_use]
    pub fn filter(&self) -> FlushFilter {
        FlushFilter::new(self.network, self.vlan_filter())
    }
}
