#[doc(inline)]
pub use self::{
    config::Service as ConfigService, neighbors::Service as NeighborService,
    options::Service as OptionService, ports::Service as PortService,
};

pub mod config;
pub mod neighbors;
pub mod options;
pub mod ports;
