use std::{fmt, net::IpAddr, str::FromStr, time::Duration};

use cidr::IpCidr;

use crate::{
    error::{Error, Result},
    grpc, BinaryAddress,
};

/// Which of the agent's neighbor tables to operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum FlushType {
    /// IPv4 neighbors
    Arp,
    /// IPv6 neighbors
    Ndp,
}

impl fmt::Display for FlushType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arp => f.write_str("arp"),
            Self::Ndp => f.write_str("ndp"),
        }
    }
}

impl FromStr for FlushType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("arp") {
            Ok(Self::Arp)
        } else if s.eq_ignore_ascii_case("ndp") {
            Ok(Self::Ndp)
        } else {
            Err(Error::InvalidFlushType(s.to_string()))
        }
    }
}

/// Restricts a flush to entries on one VLAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VlanFilter {
    #[default]
    Any,
    Only(u16),
}

impl VlanFilter {
    /// Builds the filter from a command-line VLAN option.
    ///
    /// VLAN 0 is the 802.1Q priority tag and never names a real VLAN, so it is
    /// accepted as an alias for [`VlanFilter::Any`].
    #[must_use]
    pub fn from_vlan_id(vlan_id: Option<u16>) -> Self {
        match vlan_id {
            None | Some(0) => Self::Any,
            Some(vlan_id) => Self::Only(vlan_id),
        }
    }

    #[must_use]
    pub fn matches(self, vlan_id: i32) -> bool {
        match self {
            Self::Any => true,
            Self::Only(id) => i32::from(id) == vlan_id,
        }
    }

    /// The VLAN ID to send with a direct flush. The agent treats 0 as "any".
    #[must_use]
    pub fn wire_vlan_id(self) -> i32 {
        match self {
            Self::Any => 0,
            Self::Only(id) => i32::from(id),
        }
    }
}

impl fmt::Display for VlanFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Only(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborEntry {
    pub ip: BinaryAddress,
    pub mac: String,
    pub port: i32,
    pub vlan_id: i32,
    pub vlan_name: String,
    pub state: String,
    /// Time until the agent expires the entry. `None` when the agent reports zero or a
    /// negative value, neither of which is a usable expiry.
    pub ttl: Option<Duration>,
}

impl TryFrom<grpc::NeighborEntry> for NeighborEntry {
    type Error = Error;

    fn try_from(entry: grpc::NeighborEntry) -> Result<Self> {
        Ok(Self {
            ip: entry.ip.ok_or(Error::MissingAddress)?.try_into()?,
            mac: entry.mac,
            port: entry.port,
            vlan_id: entry.vlan_id,
            vlan_name: entry.vlan_name,
            state: entry.state,
            ttl: u64::try_from(entry.ttl)
                .ok()
                .filter(|ttl| *ttl > 0)
                .map(Duration::from_millis),
        })
    }
}

impl From<NeighborEntry> for grpc::NeighborEntry {
    fn from(entry: NeighborEntry) -> Self {
        Self {
            mac: entry.mac,
            port: entry.port,
            vlan_name: entry.vlan_name,
            ip: Some(entry.ip.into()),
            vlan_id: entry.vlan_id,
            state: entry.state,
            ttl: entry
                .ttl
                .map_or(0, |ttl| i32::try_from(ttl.as_millis()).unwrap_or(i32::MAX)),
        }
    }
}

impl TryFrom<grpc::NeighborTable> for Vec<NeighborEntry> {
    type Error = Error;

    fn try_from(table: grpc::NeighborTable) -> Result<Self> {
        table.entries.into_iter().map(TryInto::try_into).collect()
    }
}

/// Parses a flush target: a CIDR network, or a bare address meaning that
/// single host. Host bits must be zero.
///
/// # Errors
///
/// Returns an error if `s` is neither an IP address nor a valid network.
pub fn parse_network(s: &str) -> Result<IpCidr> {
    if s.contains('/') {
        s.parse().map_err(Into::into)
    } else {
        Ok(IpCidr::new_host(s.parse::<IpAddr>()?))
    }
}

/// Whether `network` covers exactly one address (a /32 or a /128).
#[must_use]
pub fn is_host_network(network: &IpCidr) -> bool {
    match network {
        IpCidr::V4(network) => network.network_length() == 32,
        IpCidr::V6(network) => network.network_length() == 128,
    }
}

/// Decides which neighbor entries a flush of `network` on `vlan` removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushFilter {
    network: IpCidr,
    vlan: VlanFilter,
}

impl FlushFilter {
    #[must_use]
    pub fn new(network: IpCidr, vlan: VlanFilter) -> Self {
        Self { network, vlan }
    }

    #[must_use]
    pub fn network(&self) -> IpCidr {
        self.network
    }

    #[must_use]
    pub fn vlan(&self) -> VlanFilter {
        self.vlan
    }

    /// The single address to flush directly, if the network is a host network.
    /// No table lookup is needed in that case.
    #[must_use]
    pub fn host(&self) -> Option<IpAddr> {
        is_host_network(&self.network).then(|| self.network.first_address())
    }

    #[must_use]
    pub fn matches(&self, entry: &NeighborEntry) -> bool {
        self.network.contains(&entry.ip.ip) && self.vlan.matches(entry.vlan_id)
    }

    pub fn select<'a>(
        &'a self,
        entries: &'a [NeighborEntry],
    ) -> impl Iterator<Item = &'a NeighborEntry> + 'a {
        entries.iter().filter(move |entry| self.matches(entry))
    }
}

impl fmt::Display for FlushFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on vlan {}", self.network, self.vlan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ip: &str, vlan_id: i32) -> NeighborEntry {
        NeighborEntry {
            ip: BinaryAddress::new(ip.parse().unwrap()),
            mac: "02:00:00:00:00:01".to_string(),
            port: 1,
            vlan_id,
            vlan_name: format!("vlan{vlan_id}"),
            state: "REACHABLE".to_string(),
            ttl: None,
        }
    }

    #[test]
    fn test_flush_type_from_str() {
        assert_eq!("arp".parse::<FlushType>().unwrap(), FlushType::Arp);
        assert_eq!("NDP".parse::<FlushType>().unwrap(), FlushType::Ndp);
        assert!(matches!(
            "mpls".parse::<FlushType>(),
            Err(Error::InvalidFlushType(s)) if s == "mpls"
        ));
    }

    #[test]
    fn test_vlan_zero_means_any() {
        assert_eq!(VlanFilter::from_vlan_id(None), VlanFilter::Any);
        assert_eq!(VlanFilter::from_vlan_id(Some(0)), VlanFilter::Any);
        assert_eq!(VlanFilter::from_vlan_id(Some(5)), VlanFilter::Only(5));

        assert!(VlanFilter::Any.matches(0));
        assert!(VlanFilter::Any.matches(7));
        assert!(VlanFilter::Any.matches(4094));
        assert!(VlanFilter::Only(5).matches(5));
        assert!(!VlanFilter::Only(5).matches(7));

        assert_eq!(VlanFilter::Any.wire_vlan_id(), 0);
        assert_eq!(VlanFilter::Only(42).wire_vlan_id(), 42);
    }

    #[test]
    fn test_parse_network() {
        let network = parse_network("10.0.0.0/24").unwrap();
        assert!(!is_host_network(&network));

        let host = parse_network("10.0.0.5").unwrap();
        assert!(is_host_network(&host));
        assert_eq!(host, parse_network("10.0.0.5/32").unwrap());

        assert!(is_host_network(&parse_network("2401:db00::1/128").unwrap()));
        assert!(!is_host_network(&parse_network("2401:db00::/64").unwrap()));
    }

    #[test]
    fn test_parse_network_rejects_garbage() {
        assert!(matches!(
            parse_network("not-an-ip"),
            Err(Error::InvalidIp(_))
        ));
        assert!(matches!(
            parse_network("10.0.0.1/24"),
            Err(Error::InvalidNetwork(_))
        ));
        assert!(matches!(
            parse_network("10.0.0.0/33"),
            Err(Error::InvalidNetwork(_))
        ));
    }

    #[test]
    fn test_host_filter() {
        let filter = FlushFilter::new(parse_network("10.0.0.5/32").unwrap(), VlanFilter::Any);
        assert_eq!(filter.host(), Some("10.0.0.5".parse().unwrap()));

        let filter = FlushFilter::new(parse_network("10.0.0.0/24").unwrap(), VlanFilter::Any);
        assert_eq!(filter.host(), None);
    }

    #[test]
    fn test_select_by_network_and_vlan() {
        let table = vec![
            entry("10.0.0.5", 5),
            entry("10.0.0.9", 7),
            entry("10.0.1.1", 5),
        ];

        let filter = FlushFilter::new(
            parse_network("10.0.0.0/24").unwrap(),
            VlanFilter::Only(5),
        );
        let selected: Vec<_> = filter.select(&table).collect();
        assert_eq!(selected, vec![&table[0]]);

        let filter = FlushFilter::new(parse_network("10.0.0.0/24").unwrap(), VlanFilter::Any);
        assert_eq!(filter.select(&table).count(), 2);

        let filter = FlushFilter::new(parse_network("10.0.0.0/8").unwrap(), VlanFilter::Any);
        assert_eq!(filter.select(&table).count(), 3);
    }

    #[test]
    fn test_select_ignores_other_family() {
        let table = vec![entry("10.0.0.5", 1), entry("2401:db00::5", 1)];

        let filter = FlushFilter::new(parse_network("2401:db00::/32").unwrap(), VlanFilter::Any);
        let selected: Vec<_> = filter.select(&table).collect();
        assert_eq!(selected, vec![&table[1]]);
    }

    #[test]
    fn test_entry_from_grpc() {
        let entry = NeighborEntry::try_from(grpc::NeighborEntry {
            mac: "02:00:00:00:00:01".to_string(),
            port: 3,
            vlan_name: "vlan2000".to_string(),
            ip: Some(grpc::BinaryAddress {
                addr: vec![10, 0, 0, 1],
                if_name: None,
            }),
            vlan_id: 2000,
            state: String::new(),
            ttl: 12_500,
        })
        .unwrap();

        assert_eq!(entry.ip.ip, "10.0.0.1".parse::<IpAddr>().unwrap());
        assert_eq!(entry.ttl, Some(Duration::from_millis(12_500)));
        assert_eq!(entry.vlan_id, 2000);
    }

    #[test]
    fn test_entry_from_grpc_without_address() {
        let result = NeighborEntry::try_from(grpc::NeighborEntry::default());
        assert!(matches!(result, Err(Error::MissingAddress)));
    }

    #[test]
    fn test_entry_zero_ttl_is_unknown() {
        let mut entry: grpc::NeighborEntry = entry("10.0.0.1", 1).into();
        entry.ttl = 0;
        assert_eq!(NeighborEntry::try_from(entry).unwrap().ttl, None);
    }

    #[test]
    fn test_entry_negative_ttl_is_unknown() {
        let mut entry: grpc::NeighborEntry = entry("10.0.0.1", 1).into();
        entry.ttl = -1500;
        assert_eq!(NeighborEntry::try_from(entry).unwrap().ttl, None);
    }
}
