use std::collections::BTreeMap;

use crate::grpc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    pub id: i32,
    pub name: String,
    pub description: String,
}

impl From<grpc::PortInfo> for PortInfo {
    fn from(info: grpc::PortInfo) -> Self {
        Self {
            id: info.port_id,
            name: info.name,
            description: info.description,
        }
    }
}

impl From<PortInfo> for grpc::PortInfo {
    fn from(info: PortInfo) -> Self {
        Self {
            port_id: info.id,
            name: info.name,
            description: info.description,
        }
    }
}

/// The agent's ports, keyed by port id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortMap(BTreeMap<i32, PortInfo>);

impl PortMap {
    #[must_use]
    pub fn get(&self, port: i32) -> Option<&PortInfo> {
        self.0.get(&port)
    }

    /// The port's name, falling back to its numeric id when the agent has no
    /// name for it.
    #[must_use]
    pub fn label(&self, port: i32) -> String {
        match self.get(port) {
            Some(info) if !info.name.is_empty() => info.name.clone(),
            _ => port.to_string(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<grpc::PortInfoMap> for PortMap {
    fn from(map: grpc::PortInfoMap) -> Self {
        Self(
            map.ports
                .into_iter()
                .map(|(id, info)| (id, info.into()))
                .collect(),
        )
    }
}

impl FromIterator<PortInfo> for PortMap {
    fn from_iter<I: IntoIterator<Item = PortInfo>>(iter: I) -> Self {
        Self(iter.into_iter().map(|info| (info.id, info)).collect())
    }
}

impl From<PortMap> for grpc::PortInfoMap {
    fn from(map: PortMap) -> Self {
        Self {
            ports: map.0.into_iter().map(|(id, info)| (id, info.into())).collect(),
        }
    }
}
