//! In-process transport: the renderer end is a [`LocalPeer`] living in the
//! same process, connected to the proxy through channels. Used by tests and
//! by hosts that embed their own renderer.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use log::debug;
use smol::{
    channel,
    channel::{Receiver, Sender, TryRecvError},
    future::FutureExt,
    Timer,
};

use super::{MessageSender, SendError, SocketState};
use crate::{bridge::Poster, client::ClientKey, error::ProxyError};

/// One message as seen on the socket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
}

struct LocalSocket {
    frames: Sender<Frame>,
    open: Arc<AtomicBool>,
}

impl LocalSocket {
    fn push(&self, frame: Frame) -> Result<(), SendError> {
        if !self.open.load(Ordering::Acquire) {
            return Err(SendError);
        }
        self.frames.try_send(frame).map_err(|_| SendError)
    }
}

impl MessageSender for LocalSocket {
    fn send_binary(&self, payload: &[u8]) -> Result<(), SendError> {
        self.push(Frame::Binary(payload.to_vec()))
    }

    fn send_text(&self, text: &str) -> Result<(), SendError> {
        self.push(Frame::Text(text.to_string()))
    }

    fn state(&self) -> SocketState {
        if self.open.load(Ordering::Acquire) {
            SocketState::Connected
        } else {
            SocketState::Closed
        }
    }
}

/// Renderer-side end of an in-process connection
pub struct LocalPeer {
    client: ClientKey,
    frames: Receiver<Frame>,
    poster: Poster,
    open: Arc<AtomicBool>,
}

impl LocalPeer {
    /// Open a new connection to the proxy behind `poster`
    pub fn connect(poster: &Poster) -> Self {
        let (sender, receiver) = channel::unbounded();
        let open = Arc::new(AtomicBool::new(true));
        let socket = LocalSocket {
            frames: sender,
            open: open.clone(),
        };
        let client = poster.opened(Arc::new(socket));
        debug!("Local peer opened as {}", client);

        Self {
            client,
            frames: receiver,
            poster: poster.clone(),
            open,
        }
    }

    pub fn client(&self) -> ClientKey {
        self.client
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Next frame sent by the proxy, if one is already queued
    pub fn try_receive(&self) -> Option<Frame> {
        match self.frames.try_recv() {
            Ok(frame) => Some(frame),
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => None,
        }
    }

    /// Next frame sent by the proxy, waiting at most `timeout`
    pub fn receive_timeout(&self, timeout: Duration) -> Option<Frame> {
        smol::block_on(
            async { self.frames.recv().await.ok() }.or(async {
                Timer::after(timeout).await;
                None
            }),
        )
    }

    /// Send a JSON control message to the proxy
    pub fn send_text(&self, text: &str) -> Result<(), ProxyError> {
        if !self.is_open() {
            return Err(ProxyError::SendFailed(SendError));
        }
        self.poster.text(self.client, text.to_string())
    }

    /// Send a binary message to the proxy
    pub fn send_binary(&self, payload: &[u8]) -> Result<(), ProxyError> {
        if !self.is_open() {
            return Err(ProxyError::SendFailed(SendError));
        }
        self.poster.binary(self.client, payload.to_vec())
    }

    /// Close the connection. The proxy sees the socket as disconnected
    /// immediately and tears the client down on its bridge thread.
    pub fn close(&self) {
        if self.open.swap(false, Ordering::AcqRel) {
            debug!("Local peer {} closed", self.client);
            // the bridge may already be gone during teardown
            let _ = self.poster.closed(self.client);
        }
    }
}

impl Drop for LocalPeer {
    fn drop(&mut self) {
        self.close();
    }
}
