#![warn(clippy::pedantic, clippy::expect_used, clippy::unwrap_used)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! # FBOSS SDK
//!
//! This crate provides an async client for the control service of an FBOSS switch agent.
//!
//! A [`Connection`] wraps a single gRPC channel to the agent. Service handles obtained from it
//! ([`Connection::neighbors`], [`Connection::config`], ...) share that channel, and the channel
//! is closed once the connection and every handle cloned from it have been dropped.
//!
//! ## Example
//!
//! ```no_run
//! use fboss_sdk::{
//!     core::neighbor::{parse_network, FlushFilter, FlushType, VlanFilter},
//!     Connection,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let connection = Connection::builder()
//!         .host("rsw1aa.example.com")
//!         .connect()
//!         .await
//!         .unwrap();
//!
//!     let filter = FlushFilter::new(parse_network("10.0.0.0/24").unwrap(), VlanFilter::Any);
//!     let flushed = connection
//!         .neighbors()
//!         .flush_subnet(FlushType::Arp, &filter)
//!         .await
//!         .unwrap();
//!
//!     println!("Flushed {flushed} entries");
//! }
//! ```

pub use fboss_core as core;

#[doc(inline)]
pub use crate::{
    connection::{Connection, ConnectionBuilder},
    error::Error,
};

pub mod connection;
pub mod error;
pub mod services;
