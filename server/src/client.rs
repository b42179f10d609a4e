use std::{collections::HashMap, fmt, sync::Arc};

use glrelay_shared::{ScreenInfo, SurfaceId};

use crate::{
    registry::DefaultsSlot,
    transport::{MessageSender, SocketState},
};

/// Identifies one renderer connection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientKey(u64);

impl ClientKey {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client#{}", self.0)
    }
}

/// Position and size of a remote canvas, in renderer pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl SurfaceGeometry {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

pub(crate) struct ClientData {
    pub sender: Arc<dyn MessageSender>,
    /// Set once the renderer answers the `connect` handshake
    pub screen: Option<ScreenInfo>,
    pub surfaces: Vec<SurfaceId>,
}

impl ClientData {
    pub fn new(sender: Arc<dyn MessageSender>) -> Self {
        Self {
            sender,
            screen: None,
            surfaces: Vec::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.sender.state() == SocketState::Connected
    }
}

pub(crate) struct SurfaceData {
    pub client: ClientKey,
    pub geometry: SurfaceGeometry,
    pub title: String,
    pub defaults: Arc<DefaultsSlot>,
}

#[derive(Default)]
pub(crate) struct Tables {
    pub clients: HashMap<ClientKey, ClientData>,
    pub surfaces: HashMap<SurfaceId, SurfaceData>,
}

impl Tables {
    pub fn client_of(&self, surface: SurfaceId) -> Option<&ClientData> {
        let client = self.surfaces.get(&surface)?.client;
        self.clients.get(&client)
    }
}
