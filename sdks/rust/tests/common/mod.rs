#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use fboss_core::{
    grpc::{
        self,
        fboss_ctrl_server::{FbossCtrl, FbossCtrlServer},
    },
    neighbor::NeighborEntry,
    port::PortMap,
    BinaryAddress,
};
use fboss_sdk::Connection;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{transport::Server, Request, Response, Status};

/// Every RPC the fake agent has served.
#[derive(Debug, Default)]
pub struct Calls {
    pub arp_table: usize,
    pub ndp_table: usize,
    pub port_info: usize,
    pub running_config: usize,
    pub reloads: usize,
    pub flushes: Vec<(grpc::BinaryAddress, i32)>,
    pub options: Vec<(String, String)>,
}

/// An in-process agent serving canned tables and recording the calls it gets.
#[derive(Debug, Clone)]
pub struct FakeAgent {
    pub arp_table: Vec<NeighborEntry>,
    pub ndp_table: Vec<NeighborEntry>,
    pub ports: PortMap,
    pub running_config: String,
    /// What every flush call reports as removed.
    pub flush_count: i32,
    /// Fail every flush call after this many have succeeded.
    pub fail_flush_after: Option<usize>,
    pub reload_error: Option<String>,
    pub calls: Arc<Mutex<Calls>>,
}

impl Default for FakeAgent {
    fn default() -> Self {
        Self {
            arp_table: Vec::new(),
            ndp_table: Vec::new(),
            ports: PortMap::default(),
            running_config: String::new(),
            flush_count: 1,
            fail_flush_after: None,
            reload_error: None,
            calls: Arc::default(),
        }
    }
}

impl FakeAgent {
    fn calls(&self) -> std::sync::MutexGuard<'_, Calls> {
        self.calls.lock().unwrap()
    }
}

pub fn entry(ip: &str, vlan_id: i32) -> NeighborEntry {
    NeighborEntry {
        ip: BinaryAddress::new(ip.parse().unwrap()),
        mac: "02:90:fb:00:00:01".to_string(),
        port: 1,
        vlan_id,
        vlan_name: format!("vlan{vlan_id}"),
        state: "REACHABLE".to_string(),
        ttl: None,
    }
}

fn table(entries: &[NeighborEntry]) -> grpc::NeighborTable {
    grpc::NeighborTable {
        entries: entries.iter().cloned().map(Into::into).collect(),
    }
}

#[tonic::async_trait]
impl FbossCtrl for FakeAgent {
    async fn flush_neighbor_entry(
        &self,
        request: Request<grpc::FlushNeighborEntryRequest>,
    ) -> Result<Response<grpc::FlushCount>, Status> {
        let request = request.into_inner();
        let mut calls = self.calls();
        let succeeded = calls.flushes.len();
        calls
            .flushes
            .push((request.ip.unwrap_or_default(), request.vlan_id));

        if self
            .fail_flush_after
            .is_some_and(|limit| succeeded >= limit)
        {
            return Err(Status::internal("flush failed"));
        }

        Ok(Response::new(grpc::FlushCount {
            count: self.flush_count,
        }))
    }

    async fn get_arp_table(
        &self,
        _request: Request<grpc::Empty>,
    ) -> Result<Response<grpc::NeighborTable>, Status> {
        self.calls().arp_table += 1;
        Ok(Response::new(table(&self.arp_table)))
    }

    async fn get_ndp_table(
        &self,
        _request: Request<grpc::Empty>,
    ) -> Result<Response<grpc::NeighborTable>, Status> {
        self.calls().ndp_table += 1;
        Ok(Response::new(table(&self.ndp_table)))
    }

    async fn get_all_port_info(
        &self,
        _request: Request<grpc::Empty>,
    ) -> Result<Response<grpc::PortInfoMap>, Status> {
        self.calls().port_info += 1;
        Ok(Response::new(self.ports.clone().into()))
    }

    async fn get_running_config(
        &self,
        _request: Request<grpc::Empty>,
    ) -> Result<Response<grpc::RunningConfig>, Status> {
        self.calls().running_config += 1;
        Ok(Response::new(grpc::RunningConfig {
            config: self.running_config.clone(),
        }))
    }

    async fn reload_config(
        &self,
        _request: Request<grpc::Empty>,
    ) -> Result<Response<grpc::Empty>, Status> {
        self.calls().reloads += 1;
        match &self.reload_error {
            Some(message) => Err(Status::failed_precondition(message.clone())),
            None => Ok(Response::new(grpc::Empty {})),
        }
    }

    async fn set_option(
        &self,
        request: Request<grpc::SetOptionRequest>,
    ) -> Result<Response<grpc::Empty>, Status> {
        let grpc::SetOptionRequest { name, value } = request.into_inner();
        self.calls().options.push((name, value));
        Ok(Response::new(grpc::Empty {}))
    }
}

/// Starts `agent` on an ephemeral local port and connects to it.
pub async fn serve(agent: FakeAgent) -> (Connection, Arc<Mutex<Calls>>) {
    let calls = agent.calls.clone();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(
        Server::builder()
            .add_service(FbossCtrlServer::new(agent))
            .serve_with_incoming(TcpListenerStream::new(listener)),
    );

    let connection = Connection::builder()
        .host("127.0.0.1")
        .port(port)
        .connect()
        .await
        .unwrap();

    (connection, calls)
}
