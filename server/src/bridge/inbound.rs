use log::{debug, warn};

use glrelay_shared::ClientMessage;

use crate::{client::ClientKey, events::ProxyEvent, registry::Registry};

/// Dispatch one JSON text message received from a renderer
pub(crate) fn handle_text(registry: &Registry, client: ClientKey, text: &str) {
    let message = match ClientMessage::parse(text) {
        Ok(message) => message,
        Err(error) => {
            warn!("Ignoring message from {}: {}", client, error);
            return;
        }
    };

    match message {
        ClientMessage::Connect(screen) => registry.client_connected(client, screen),
        ClientMessage::GlResponse { id, value } => {
            if !registry.ledger().resolve(id, value) {
                warn!("Unexpected id ({})", id);
            }
        }
        ClientMessage::DefaultContextParameters {
            surface,
            parameters,
        } => registry.store_defaults(surface, parameters),
        ClientMessage::CanvasResize {
            surface,
            width,
            height,
        } => registry.resize_surface(surface, width, height),
        ClientMessage::Input {
            kind,
            surface,
            payload,
        } => {
            debug!("{} input from {}", kind.as_str(), client);
            registry.push_event(ProxyEvent::Input {
                client,
                kind,
                surface,
                payload,
            });
        }
    }
}
