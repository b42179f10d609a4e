use std::{default::Default, time::Duration};

use glrelay_shared::{GLint, MAX_CHUNK_SIZE};

const LOADING_SCREEN_VAR: &str = "GLRELAY_LOADINGSCREEN";

/// Contains Config properties which will be used by the proxy
#[derive(Clone, Debug)]
pub struct ProxyConfig {
    /// Largest binary fragment written to a socket
    pub chunk_size: usize,
    /// Upper bound on each wait for a blocking call's response before the
    /// connection is re-checked
    pub poll_interval: Duration,
    /// How long `swap_buffers` waits for the renderer to acknowledge a frame
    pub swap_timeout: Duration,
    /// Poll interval while `make_current` waits for a canvas's default
    /// context parameters
    pub defaults_poll_interval: Duration,
    /// Answer for `MAX_TEXTURE_SIZE`, a ceiling imposed by the renderer
    pub max_texture_size: GLint,
    /// Reported to the renderer in the `connect` message
    pub debug: bool,
    /// Loading screen reported to the renderer in the `connect` message
    pub loading_screen: Option<String>,
}

impl ProxyConfig {
    /// Default config, with the loading screen taken from the environment
    pub fn from_env() -> Self {
        Self {
            loading_screen: std::env::var(LOADING_SCREEN_VAR).ok(),
            ..Self::default()
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            chunk_size: MAX_CHUNK_SIZE,
            poll_interval: Duration::from_millis(10),
            swap_timeout: Duration::from_millis(1000),
            defaults_poll_interval: Duration::from_millis(100),
            max_texture_size: 512,
            debug: cfg!(debug_assertions),
            loading_screen: None,
        }
    }
}
