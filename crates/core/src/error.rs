#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid address: expected 4 or 16 bytes, got {0}")]
    InvalidAddressLength(usize),
    #[error("Address is missing")]
    MissingAddress,
    #[error("Invalid IP address: {0}")]
    InvalidIp(#[from] std::net::AddrParseError),
    #[error("Invalid network: {0}")]
    InvalidNetwork(#[from] cidr::errors::NetworkParseError),
    #[error("Invalid flush type '{0}': expected 'arp' or 'ndp'")]
    InvalidFlushType(String),
    #[error("Agent reported a negative entry count: {0}")]
    NegativeCount(i32),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
