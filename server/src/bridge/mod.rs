mod inbound;

use std::{
    io,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    thread,
};

use log::{debug, error, info, warn};
use smol::channel::{Receiver, Sender};

use glrelay_shared::{fragment, supported_functions, ServerMessage, SysInfo, Value};

use crate::{
    client::ClientKey, envelope::Envelope, error::ProxyError, registry::Registry,
    transport::MessageSender,
};

/// Work items processed in order by the bridge thread
pub(crate) enum BridgeEvent {
    Call(Envelope),
    Opened {
        client: ClientKey,
        sender: Arc<dyn MessageSender>,
    },
    Text {
        client: ClientKey,
        text: String,
    },
    Binary {
        client: ClientKey,
        payload: Vec<u8>,
    },
    Control {
        client: ClientKey,
        message: ServerMessage,
    },
    Closed {
        client: ClientKey,
    },
    Shutdown,
}

/// Cloneable handle for queueing work onto the bridge thread. Transports use
/// it to report socket activity; contexts use it to post calls.
#[derive(Clone)]
pub struct Poster {
    sender: Sender<BridgeEvent>,
    next_client: Arc<AtomicU64>,
}

impl Poster {
    pub(crate) fn new(sender: Sender<BridgeEvent>) -> Self {
        Self {
            sender,
            next_client: Arc::new(AtomicU64::new(1)),
        }
    }

    fn push(&self, event: BridgeEvent) -> Result<(), ProxyError> {
        self.sender
            .try_send(event)
            .map_err(|_| ProxyError::BridgeClosed)
    }

    /// A socket was accepted. Returns the key identifying it from now on.
    pub fn opened(&self, sender: Arc<dyn MessageSender>) -> ClientKey {
        let client = ClientKey::new(self.next_client.fetch_add(1, Ordering::SeqCst));
        if self.push(BridgeEvent::Opened { client, sender }).is_err() {
            warn!("{} opened after the bridge stopped", client);
        }
        client
    }

    /// A text message arrived from `client`
    pub fn text(&self, client: ClientKey, text: String) -> Result<(), ProxyError> {
        self.push(BridgeEvent::Text { client, text })
    }

    /// A binary message arrived from `client`
    pub fn binary(&self, client: ClientKey, payload: Vec<u8>) -> Result<(), ProxyError> {
        self.push(BridgeEvent::Binary { client, payload })
    }

    /// The socket of `client` closed
    pub fn closed(&self, client: ClientKey) -> Result<(), ProxyError> {
        self.push(BridgeEvent::Closed { client })
    }

    pub(crate) fn call(&self, envelope: Envelope) -> Result<(), ProxyError> {
        self.push(BridgeEvent::Call(envelope))
    }

    pub(crate) fn control(
        &self,
        client: ClientKey,
        message: ServerMessage,
    ) -> Result<(), ProxyError> {
        self.push(BridgeEvent::Control { client, message })
    }

    pub(crate) fn shutdown(&self) -> Result<(), ProxyError> {
        self.push(BridgeEvent::Shutdown)
    }
}

/// The single thread that owns every socket write and handles every socket
/// read. Caller threads never touch a socket directly.
pub struct Bridge {
    registry: Arc<Registry>,
    receiver: Receiver<BridgeEvent>,
}

impl Bridge {
    pub(crate) fn new(registry: Arc<Registry>, receiver: Receiver<BridgeEvent>) -> Self {
        Self { registry, receiver }
    }

    /// Process events until `Registry::shutdown` is called
    pub fn run(self) {
        info!("Bridge started");
        while let Ok(event) = self.receiver.recv_blocking() {
            if let BridgeEvent::Shutdown = event {
                break;
            }
            self.handle(event);
        }
        info!("Bridge stopped");
    }

    /// Run the bridge on its own named thread
    pub fn spawn(self) -> io::Result<thread::JoinHandle<()>> {
        thread::Builder::new()
            .name("glrelay-bridge".to_string())
            .spawn(move || self.run())
    }

    fn handle(&self, event: BridgeEvent) {
        match event {
            BridgeEvent::Call(envelope) => self.deliver(envelope),
            BridgeEvent::Opened { client, sender } => {
                self.registry.add_client(client, sender);
                let config = self.registry.config();
                self.send_control(
                    client,
                    ServerMessage::Connect {
                        debug: config.debug,
                        loading_screen: config.loading_screen.clone(),
                        sysinfo: SysInfo::current(),
                        supported_functions: supported_functions(),
                    },
                );
            }
            BridgeEvent::Text { client, text } => inbound::handle_text(&self.registry, client, &text),
            BridgeEvent::Binary { client, payload } => {
                debug!(
                    "Ignoring {} byte binary message from {}",
                    payload.len(),
                    client
                );
            }
            BridgeEvent::Control { client, message } => self.send_control(client, message),
            BridgeEvent::Closed { client } => self.registry.remove_client(client),
            BridgeEvent::Shutdown => {}
        }
    }

    fn send_control(&self, client: ClientKey, message: ServerMessage) {
        let Some(sender) = self.registry.client_sender(client) else {
            debug!("Dropping '{}' for unknown {}", message.type_name(), client);
            return;
        };
        if let Err(error) = sender.send_text(&message.to_json()) {
            warn!("Cannot send '{}' to {}: {}", message.type_name(), client, error);
        }
    }

    /// Encode one call and write it out in fragments
    fn deliver(&self, envelope: Envelope) {
        let Some(sender) = self.registry.surface_sender(envelope.surface) else {
            debug!(
                "Dropping '{}': surface {} has no client",
                envelope.function, envelope.surface
            );
            return;
        };

        let payload = match envelope.encode() {
            Ok(payload) => payload,
            Err(encode_error) => {
                error!("Cannot encode '{}': {}", envelope.function, encode_error);
                if let Some(id) = envelope.correlation_id {
                    self.registry.ledger().resolve(id, Value::Null);
                }
                return;
            }
        };

        for chunk in fragment(&payload, self.registry.config().chunk_size) {
            if let Err(send_error) = sender.send_binary(chunk) {
                warn!("Cannot send '{}': {}", envelope.function, send_error);
                return;
            }
        }
    }
}
