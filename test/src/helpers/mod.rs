use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use glrelay_server::{Context, ProxyConfig, ProxyEvent, Registry, SurfaceGeometry};
use glrelay_shared::{ServerMessage, SurfaceId};

use crate::fake_browser::FakeBrowser;

pub const CANVAS_WIDTH: i32 = 640;
pub const CANVAS_HEIGHT: i32 = 480;

const CONTROL_TIMEOUT: Duration = Duration::from_secs(5);
const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

/// A registry with its bridge thread running, shut down on drop
pub struct TestProxy {
    registry: Arc<Registry>,
    bridge: Option<JoinHandle<()>>,
}

impl TestProxy {
    pub fn start() -> Self {
        Self::with_config(ProxyConfig::default())
    }

    pub fn with_config(config: ProxyConfig) -> Self {
        let (registry, bridge) = Registry::new(config);
        let bridge = bridge.spawn().expect("failed to spawn bridge thread");
        Self {
            registry,
            bridge: Some(bridge),
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn connect_browser(&self) -> FakeBrowser {
        FakeBrowser::connect(self.registry.poster())
    }

    /// Create a canvas on `browser`'s client and let the browser answer it
    /// with default parameters
    pub fn open_canvas(&self, browser: &mut FakeBrowser) -> SurfaceId {
        let surface = self
            .registry
            .create_surface(
                browser.client(),
                SurfaceGeometry::new(0, 0, CANVAS_WIDTH, CANVAS_HEIGHT),
                "test canvas",
            )
            .expect("client not registered");
        match browser.next_control(CONTROL_TIMEOUT) {
            Some(ServerMessage::CreateCanvas { win_id, .. }) => assert_eq!(win_id, surface),
            other => panic!("expected create_canvas, got {:?}", other),
        }
        surface
    }

    /// Drain events until one matches `predicate`. Events before it are
    /// discarded.
    pub fn wait_for_event(&self, predicate: impl Fn(&ProxyEvent) -> bool) -> ProxyEvent {
        let deadline = Instant::now() + EVENT_TIMEOUT;
        loop {
            if let Some(event) = self.registry.take_events().into_iter().find(&predicate) {
                return event;
            }
            assert!(Instant::now() < deadline, "timed out waiting for an event");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    /// A fresh context made current on `surface`
    pub fn current_context(&self, surface: SurfaceId) -> Context {
        let mut context = Context::new(self.registry.clone());
        assert!(context.make_current(surface), "make_current failed");
        context
    }
}

impl Drop for TestProxy {
    fn drop(&mut self) {
        self.registry.shutdown();
        if let Some(bridge) = self.bridge.take() {
            let _ = bridge.join();
        }
    }
}
