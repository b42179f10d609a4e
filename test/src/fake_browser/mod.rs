/// Renderer stand-in for end-to-end tests
/// Speaks the control handshake over an in-process socket, answers canvas
/// creation with default context parameters and decodes the calls it receives

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, warn};
use serde_json::{json, Map, Value as JsonValue};

use glrelay_server::transport::local::{Frame, LocalPeer};
use glrelay_server::{ClientKey, Poster};
use glrelay_shared::{
    decode_call, gl, CorrelationId, DecodedCall, Reassembler, ServerMessage, SurfaceId,
    MAX_CHUNK_SIZE,
};

pub const SCREEN_WIDTH: i32 = 1920;
pub const SCREEN_HEIGHT: i32 = 1080;

const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);
const SERVE_POLL: Duration = Duration::from_millis(20);

/// Something the proxy sent
#[derive(Debug, Clone, PartialEq)]
pub enum Received {
    Control(ServerMessage),
    Call(DecodedCall),
}

/// Default context parameters the way a WebGL canvas reports them: keyed by
/// the decimal enum value, with `name` holding the canvas id
pub fn default_parameters(surface: SurfaceId, width: i32, height: i32) -> JsonValue {
    let mut object = Map::new();
    object.insert("type".into(), json!("default_context_parameters"));
    object.insert("name".into(), json!(surface.to_string()));

    let mut set = |pname: u32, value: JsonValue| {
        object.insert(pname.to_string(), value);
    };
    set(gl::VENDOR, json!("FakeVendor"));
    set(gl::RENDERER, json!("FakeRenderer"));
    set(gl::VERSION, json!("OpenGL ES 2.0 (FakeBrowser)"));
    set(gl::EXTENSIONS, json!("OES_element_index_uint"));
    set(gl::BLEND, json!(false));
    set(gl::CULL_FACE, json!(false));
    set(gl::DEPTH_TEST, json!(false));
    set(gl::DITHER, json!(true));
    set(gl::SCISSOR_TEST, json!(false));
    set(gl::STENCIL_TEST, json!(false));
    set(gl::MAX_TEXTURE_SIZE, json!(16384));
    set(gl::MAX_VERTEX_ATTRIBS, json!(16));
    set(gl::UNPACK_ALIGNMENT, json!(4));
    set(gl::VIEWPORT, json!([0, 0, width, height]));

    JsonValue::Object(object)
}

pub struct FakeBrowser {
    peer: LocalPeer,
    reassembler: Reassembler,
}

impl FakeBrowser {
    /// Open a connection and complete the `connect` handshake
    pub fn connect(poster: &Poster) -> Self {
        let mut browser = Self {
            peer: LocalPeer::connect(poster),
            reassembler: Reassembler::new(MAX_CHUNK_SIZE),
        };

        match browser.receive(HANDSHAKE_TIMEOUT) {
            Some(Received::Control(ServerMessage::Connect { .. })) => {}
            other => panic!("expected a connect message, got {:?}", other),
        }
        browser.send_json(json!({
            "type": "connect",
            "width": SCREEN_WIDTH,
            "height": SCREEN_HEIGHT,
            "physicalWidth": f64::from(SCREEN_WIDTH),
            "physicalHeight": f64::from(SCREEN_HEIGHT),
        }));
        browser
    }

    pub fn client(&self) -> ClientKey {
        self.peer.client()
    }

    pub fn peer(&self) -> &LocalPeer {
        &self.peer
    }

    /// Next control message or reassembled call. Canvas creation is answered
    /// with default parameters before it is returned.
    pub fn receive(&mut self, timeout: Duration) -> Option<Received> {
        loop {
            match self.peer.receive_timeout(timeout)? {
                Frame::Text(text) => {
                    let message = ServerMessage::parse(&text)
                        .unwrap_or_else(|error| panic!("bad control message {}: {}", text, error));
                    if let ServerMessage::CreateCanvas {
                        win_id,
                        width,
                        height,
                        ..
                    } = &message
                    {
                        self.send_json(default_parameters(*win_id, *width, *height));
                    }
                    return Some(Received::Control(message));
                }
                Frame::Binary(fragment) => {
                    let Some(bytes) = self
                        .reassembler
                        .push(&fragment)
                        .unwrap_or_else(|error| panic!("bad fragment: {}", error))
                    else {
                        continue;
                    };
                    let call =
                        decode_call(&bytes).unwrap_or_else(|error| panic!("bad call: {}", error));
                    debug!("FakeBrowser received {}", call.function_name());
                    return Some(Received::Call(call));
                }
            }
        }
    }

    /// Next call, skipping control messages
    pub fn next_call(&mut self, timeout: Duration) -> Option<DecodedCall> {
        loop {
            match self.receive(timeout)? {
                Received::Call(call) => return Some(call),
                Received::Control(message) => debug!("Skipping {}", message.type_name()),
            }
        }
    }

    /// Next call, which must be `function`
    pub fn expect_call(&mut self, function: &str) -> DecodedCall {
        match self.next_call(HANDSHAKE_TIMEOUT) {
            Some(call) if call.function_name() == function => call,
            Some(call) => panic!("expected {}, got {}", function, call.function_name()),
            None => panic!("expected {}, got nothing", function),
        }
    }

    /// Next control message, skipping calls
    pub fn next_control(&mut self, timeout: Duration) -> Option<ServerMessage> {
        loop {
            match self.receive(timeout)? {
                Received::Control(message) => return Some(message),
                Received::Call(call) => debug!("Skipping {}", call.function_name()),
            }
        }
    }

    pub fn respond(&self, id: CorrelationId, value: JsonValue) {
        self.send_json(json!({ "type": "gl_response", "id": id, "value": value }));
    }

    pub fn send_json(&self, message: JsonValue) {
        if let Err(error) = self.peer.send_text(&message.to_string()) {
            warn!("FakeBrowser could not send: {}", error);
        }
    }

    pub fn close(&self) {
        self.peer.close();
    }

    /// Answer every blocking call from a background thread until stopped
    pub fn serve<F>(self, mut responder: F) -> ServedBrowser
    where
        F: FnMut(&DecodedCall) -> JsonValue + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let calls = Arc::new(Mutex::new(Vec::new()));
        let thread = {
            let stop = stop.clone();
            let calls = calls.clone();
            let mut browser = self;
            thread::spawn(move || {
                while !stop.load(Ordering::Acquire) {
                    let call = match browser.receive(SERVE_POLL) {
                        Some(Received::Call(call)) => call,
                        Some(Received::Control(_)) => continue,
                        // closed channels return at once
                        None => {
                            thread::sleep(SERVE_POLL / 4);
                            continue;
                        }
                    };
                    if let Some(id) = call.correlation_id {
                        browser.respond(id, responder(&call));
                    }
                    calls
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(call);
                }
                browser
            })
        };

        ServedBrowser {
            stop,
            calls,
            thread: Some(thread),
        }
    }
}

/// A `FakeBrowser` answering calls on its own thread
pub struct ServedBrowser {
    stop: Arc<AtomicBool>,
    calls: Arc<Mutex<Vec<DecodedCall>>>,
    thread: Option<JoinHandle<FakeBrowser>>,
}

impl ServedBrowser {
    /// Every call received so far
    pub fn calls(&self) -> Vec<DecodedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls()
            .iter()
            .map(DecodedCall::function_name)
            .collect()
    }

    /// Stop serving and hand the browser back
    pub fn stop(mut self) -> FakeBrowser {
        self.stop.store(true, Ordering::Release);
        self.thread
            .take()
            .expect("browser thread already joined")
            .join()
            .expect("browser thread panicked")
    }
}

impl Drop for ServedBrowser {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
