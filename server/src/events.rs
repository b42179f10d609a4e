use serde_json::Value as JsonValue;

use glrelay_shared::{InputKind, ScreenInfo, SurfaceId};

use crate::client::ClientKey;

/// Notifications for the host windowing layer, drained with
/// `Registry::take_events`
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyEvent {
    /// The renderer completed the handshake and reported its screen
    ClientConnected {
        client: ClientKey,
        screen: ScreenInfo,
    },
    /// The connection closed. Its canvases are gone.
    ClientDisconnected { client: ClientKey },
    CanvasResized {
        surface: SurfaceId,
        width: i32,
        height: i32,
    },
    /// Mouse, wheel, touch or keyboard input, not interpreted by the proxy
    Input {
        client: ClientKey,
        kind: InputKind,
        surface: Option<SurfaceId>,
        payload: JsonValue,
    },
}
