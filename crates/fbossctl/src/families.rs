pub mod config;
pub mod flush;
pub mod neighbor;
pub mod verbosity;
