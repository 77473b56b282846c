#![warn(clippy::pedantic, clippy::expect_used, clippy::unwrap_used)]
#![allow(clippy::module_name_repetitions)]

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

pub use crate::error::{Error, Result};

pub mod error;
pub mod neighbor;
pub mod port;

pub mod grpc {
    #![allow(clippy::pedantic, clippy::expect_used, clippy::unwrap_used)]

    tonic::include_proto!("fboss.ctrl");
}

pub const CLIENT_NAME: &str = "fbossctl";
pub const DEFAULT_AGENT_HOST: &str = "::1";
pub const DEFAULT_AGENT_PORT: u16 = 5909;

/// An IP address as the agent stores it: raw network-order bytes, plus the
/// interface name for scoped (link-local) IPv6 addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryAddress {
    pub ip: IpAddr,
    pub if_name: Option<String>,
}

impl BinaryAddress {
    #[must_use]
    pub fn new(ip: IpAddr) -> Self {
        Self { ip, if_name: None }
    }

    /// The address in network byte order, 4 bytes for IPv4 and 16 for IPv6.
    #[must_use]
    pub fn octets(&self) -> Vec<u8> {
        match self.ip {
            IpAddr::V4(ip) => ip.octets().to_vec(),
            IpAddr::V6(ip) => ip.octets().to_vec(),
        }
    }
}

impl From<IpAddr> for BinaryAddress {
    fn from(ip: IpAddr) -> Self {
        Self::new(ip)
    }
}

impl From<BinaryAddress> for grpc::BinaryAddress {
    fn from(address: BinaryAddress) -> Self {
        Self {
            addr: address.octets(),
            if_name: address.if_name,
        }
    }
}

impl TryFrom<grpc::BinaryAddress> for BinaryAddress {
    type Error = Error;

    fn try_from(address: grpc::BinaryAddress) -> Result<Self> {
        Ok(Self {
            ip: ip_from_octets(&address.addr)?,
            if_name: address.if_name,
        })
    }
}

/// Decodes raw network-order address bytes into an [`IpAddr`].
///
/// # Errors
///
/// Returns [`Error::InvalidAddressLength`] unless `bytes` is 4 or 16 bytes long.
pub fn ip_from_octets(bytes: &[u8]) -> Result<IpAddr> {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        Ok(Ipv4Addr::from(octets).into())
    } else if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        Ok(Ipv6Addr::from(octets).into())
    } else {
        Err(Error::InvalidAddressLength(bytes.len()))
    }
}
