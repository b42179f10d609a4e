use std::{
    collections::{BTreeMap, VecDeque},
    sync::{
        atomic::{AtomicBool, AtomicU32, Ordering},
        Arc, Condvar, Mutex, MutexGuard, PoisonError,
    },
};

use log::{debug, info, warn};
use smol::channel;

use glrelay_shared::{ContextId, GLenum, ScreenInfo, ServerMessage, SurfaceId, Value};

use crate::{
    bridge::{Bridge, Poster},
    client::{ClientData, ClientKey, SurfaceData, SurfaceGeometry, Tables},
    config::ProxyConfig,
    envelope::Envelope,
    events::ProxyEvent,
    function_table::FunctionTable,
    ledger::Ledger,
    transport::MessageSender,
};

pub(crate) type ContextDefaults = BTreeMap<GLenum, Value>;

/// Connect-time parameter snapshot of one canvas, filled in once by the
/// renderer's `default_context_parameters` message
pub(crate) struct DefaultsSlot {
    value: Mutex<Option<ContextDefaults>>,
    ready: Condvar,
}

impl DefaultsSlot {
    fn new() -> Self {
        Self {
            value: Mutex::new(None),
            ready: Condvar::new(),
        }
    }
}

/// Everything shared between caller threads and the bridge thread: the
/// function table, the correlation ledger, id counters, live clients and
/// their canvases, and the host event queue.
pub struct Registry {
    config: ProxyConfig,
    poster: Poster,
    functions: FunctionTable,
    ledger: Ledger,
    next_context_id: AtomicU32,
    next_surface_id: AtomicU32,
    tables: Mutex<Tables>,
    events: Mutex<VecDeque<ProxyEvent>>,
    swap_lock: Mutex<()>,
    stopped: AtomicBool,
}

impl Registry {
    /// Create the registry and the bridge that serves it. The bridge must be
    /// run (usually with `Bridge::spawn`) for any call to reach a renderer.
    pub fn new(config: ProxyConfig) -> (Arc<Self>, Bridge) {
        let (sender, receiver) = channel::unbounded();
        let registry = Arc::new(Self {
            config,
            poster: Poster::new(sender),
            functions: FunctionTable::standard(),
            ledger: Ledger::new(),
            next_context_id: AtomicU32::new(1),
            next_surface_id: AtomicU32::new(1),
            tables: Mutex::new(Tables::default()),
            events: Mutex::new(VecDeque::new()),
            swap_lock: Mutex::new(()),
            stopped: AtomicBool::new(false),
        });
        let bridge = Bridge::new(registry.clone(), receiver);
        (registry, bridge)
    }

    fn lock_tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Handle used by transports to feed socket events into the bridge
    pub fn poster(&self) -> &Poster {
        &self.poster
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub(crate) fn next_context_id(&self) -> ContextId {
        self.next_context_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Stop the bridge loop. From then on every surface reads as
    /// disconnected, so pending and future blocking calls abandon.
    pub fn shutdown(&self) {
        info!("Shutting down bridge");
        self.stopped.store(true, Ordering::SeqCst);
        if self.poster.shutdown().is_err() {
            debug!("Bridge already stopped");
        }
        let slots = self
            .lock_tables()
            .surfaces
            .values()
            .map(|data| data.defaults.clone())
            .collect::<Vec<_>>();
        for slot in slots {
            slot.ready.notify_all();
        }
        self.ledger.wake_all();
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub(crate) fn swap_lock(&self) -> MutexGuard<'_, ()> {
        self.swap_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Envelopes

    /// Hand an envelope to the bridge. A blocking envelope whose delivery is
    /// impossible is abandoned right away.
    pub(crate) fn post(&self, envelope: Envelope) -> bool {
        let id = envelope.correlation_id;
        match self.poster.call(envelope) {
            Ok(()) => true,
            Err(error) => {
                warn!("Dropping call: {}", error);
                if let Some(id) = id {
                    self.ledger.abandon(id);
                }
                false
            }
        }
    }

    // Clients

    pub(crate) fn add_client(&self, client: ClientKey, sender: Arc<dyn MessageSender>) {
        info!("{} opened", client);
        self.lock_tables()
            .clients
            .insert(client, ClientData::new(sender));
    }

    pub(crate) fn client_sender(&self, client: ClientKey) -> Option<Arc<dyn MessageSender>> {
        self.lock_tables()
            .clients
            .get(&client)
            .map(|data| data.sender.clone())
    }

    pub(crate) fn surface_sender(&self, surface: SurfaceId) -> Option<Arc<dyn MessageSender>> {
        self.lock_tables()
            .client_of(surface)
            .map(|data| data.sender.clone())
    }

    /// Record the renderer's handshake reply
    pub(crate) fn client_connected(&self, client: ClientKey, screen: ScreenInfo) {
        {
            let mut tables = self.lock_tables();
            let Some(data) = tables.clients.get_mut(&client) else {
                warn!("connect from unknown {}", client);
                return;
            };
            data.screen = Some(screen);
        }
        info!(
            "{} connected with a {}x{} screen",
            client, screen.width, screen.height
        );
        self.push_event(ProxyEvent::ClientConnected { client, screen });
    }

    /// Forget a closed client and its canvases, and wake everyone waiting on
    /// them so they can give up
    pub(crate) fn remove_client(&self, client: ClientKey) {
        let removed = {
            let mut tables = self.lock_tables();
            let Some(data) = tables.clients.remove(&client) else {
                return;
            };
            data.surfaces
                .iter()
                .filter_map(|surface| tables.surfaces.remove(surface))
                .map(|surface| surface.defaults)
                .collect::<Vec<_>>()
        };
        for slot in removed {
            slot.ready.notify_all();
        }
        self.ledger.wake_all();
        info!("{} disconnected", client);
        self.push_event(ProxyEvent::ClientDisconnected { client });
    }

    /// Screen reported by the client's handshake, once it has completed
    pub fn client_screen(&self, client: ClientKey) -> Option<ScreenInfo> {
        self.lock_tables()
            .clients
            .get(&client)
            .and_then(|data| data.screen)
    }

    pub fn clients(&self) -> Vec<ClientKey> {
        self.lock_tables().clients.keys().copied().collect()
    }

    // Surfaces

    /// Allocate a canvas on `client` and ask the renderer to create it
    pub fn create_surface(
        &self,
        client: ClientKey,
        geometry: SurfaceGeometry,
        title: &str,
    ) -> Option<SurfaceId> {
        let surface = {
            let mut tables = self.lock_tables();
            let data = tables.clients.get_mut(&client)?;
            let surface = self.next_surface_id.fetch_add(1, Ordering::SeqCst);
            data.surfaces.push(surface);
            tables.surfaces.insert(
                surface,
                SurfaceData {
                    client,
                    geometry,
                    title: title.to_string(),
                    defaults: Arc::new(DefaultsSlot::new()),
                },
            );
            surface
        };
        debug!("Surface {} created on {}", surface, client);

        self.send_control(
            client,
            ServerMessage::CreateCanvas {
                win_id: surface,
                x: geometry.x,
                y: geometry.y,
                width: geometry.width,
                height: geometry.height,
                title: title.to_string(),
            },
        );
        Some(surface)
    }

    pub fn destroy_surface(&self, surface: SurfaceId) {
        let client = {
            let mut tables = self.lock_tables();
            let Some(data) = tables.surfaces.remove(&surface) else {
                return;
            };
            if let Some(client) = tables.clients.get_mut(&data.client) {
                client.surfaces.retain(|id| *id != surface);
            }
            data.defaults.ready.notify_all();
            data.client
        };
        debug!("Surface {} destroyed", surface);
        self.send_control(client, ServerMessage::DestroyCanvas { win_id: surface });
    }

    pub fn set_title(&self, surface: SurfaceId, title: &str) {
        let client = {
            let mut tables = self.lock_tables();
            let Some(data) = tables.surfaces.get_mut(&surface) else {
                return;
            };
            data.title = title.to_string();
            data.client
        };
        self.send_control(
            client,
            ServerMessage::ChangeTitle {
                win_id: surface,
                title: title.to_string(),
            },
        );
    }

    pub fn set_cursor(&self, client: ClientKey, cursor: i32) {
        self.send_control(client, ServerMessage::ChangeCursor { cursor });
    }

    pub fn open_url(&self, client: ClientKey, url: &str) {
        self.send_control(
            client,
            ServerMessage::OpenUrl {
                url: url.to_string(),
            },
        );
    }

    fn send_control(&self, client: ClientKey, message: ServerMessage) {
        if let Err(error) = self.poster.control(client, message) {
            warn!("Dropping control message for {}: {}", client, error);
        }
    }

    pub(crate) fn resize_surface(&self, surface: SurfaceId, width: i32, height: i32) {
        {
            let mut tables = self.lock_tables();
            let Some(data) = tables.surfaces.get_mut(&surface) else {
                warn!("canvas_resize for unknown surface {}", surface);
                return;
            };
            data.geometry.width = width;
            data.geometry.height = height;
        }
        self.push_event(ProxyEvent::CanvasResized {
            surface,
            width,
            height,
        });
    }

    /// Whether calls targeting `surface` can currently be delivered
    pub fn is_surface_connected(&self, surface: SurfaceId) -> bool {
        if self.is_stopped() {
            return false;
        }
        self.lock_tables()
            .client_of(surface)
            .is_some_and(ClientData::is_connected)
    }

    pub fn surface_exists(&self, surface: SurfaceId) -> bool {
        self.lock_tables().surfaces.contains_key(&surface)
    }

    pub fn surface_geometry(&self, surface: SurfaceId) -> Option<SurfaceGeometry> {
        self.lock_tables()
            .surfaces
            .get(&surface)
            .map(|data| data.geometry)
    }

    pub fn surface_title(&self, surface: SurfaceId) -> Option<String> {
        self.lock_tables()
            .surfaces
            .get(&surface)
            .map(|data| data.title.clone())
    }

    // Default context parameters

    pub(crate) fn store_defaults(&self, surface: SurfaceId, defaults: ContextDefaults) {
        let Some(slot) = self
            .lock_tables()
            .surfaces
            .get(&surface)
            .map(|data| data.defaults.clone())
        else {
            warn!("default_context_parameters for unknown surface {}", surface);
            return;
        };
        debug!(
            "Surface {} received {} default parameters",
            surface,
            defaults.len()
        );
        *slot.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(defaults);
        slot.ready.notify_all();
    }

    /// Block until the renderer has sent `surface`'s default parameters.
    /// Returns `None` if the surface or its client goes away first.
    pub(crate) fn wait_defaults(&self, surface: SurfaceId) -> Option<ContextDefaults> {
        let poll = self.config.defaults_poll_interval;
        loop {
            if self.is_stopped() {
                return None;
            }
            let slot = self
                .lock_tables()
                .surfaces
                .get(&surface)
                .map(|data| data.defaults.clone())?;

            let guard = slot.value.lock().unwrap_or_else(PoisonError::into_inner);
            let (guard, _) = slot
                .ready
                .wait_timeout_while(guard, poll, |value| value.is_none())
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(defaults) = guard.as_ref() {
                return Some(defaults.clone());
            }
        }
    }

    // Events

    pub(crate) fn push_event(&self, event: ProxyEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(event);
    }

    /// Drain the events queued for the host windowing layer
    pub fn take_events(&self) -> Vec<ProxyEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }
}
