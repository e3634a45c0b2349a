//! Passive service discovery — UDP broadcast announcements.
//!
//! Host agents advertise themselves by broadcasting one JSON datagram per
//! announcement interval:
//!
//! ```json
//! {"app": "Hookshot", "hostname": "MEDIA-PC", "host": "192.168.1.20", "port": 8080}
//! ```
//!
//! [`DiscoveryListener::start`] binds the UDP port and spawns exactly one
//! receive loop, which parses each datagram, filters on the expected
//! application name (case-insensitive), and forwards matches onto an mpsc
//! channel in datagram arrival order. There is no handshake and no
//! acknowledgment; delivery is best-effort, at most once per broadcast.
//!
//! Per-datagram failures are logged and skipped — a stray or garbled
//! packet never takes the listener down. A socket-level failure is
//! reported once and ends the loop; restarting is the owner's call. The
//! channel closing (either side) is the stop signal: `stop()` cancels the
//! loop and the loop exits when every receiver is gone.

use std::io;
use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::addr::HostAddr;

/// The UDP port Hookshot agents broadcast on.
pub const DEFAULT_DISCOVERY_PORT: u16 = 2999;

/// The application name Hookshot agents announce themselves with.
pub const DEFAULT_APP_NAME: &str = "Hookshot";

/// One parsed discovery announcement. Ephemeral: the listener keeps no
/// state across datagrams, and deduplication against already-known hosts
/// is the consumer's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// Application identity, matched case-insensitively against the
    /// listener's expected name.
    pub app: String,
    /// The agent machine's self-reported hostname.
    pub hostname: String,
    /// Host or IP the agent is reachable at.
    pub host: String,
    /// The agent's HTTP port.
    pub port: u16,
}

impl Announcement {
    /// The address to direct RPC calls at.
    pub fn addr(&self) -> HostAddr {
        HostAddr::new(self.host.clone(), self.port)
    }
}

/// Handle to a running discovery receive loop.
///
/// Two states: constructing one via [`start`](Self::start) is the
/// `Stopped → Listening` transition; [`stop`](Self::stop), a fatal socket
/// error, or all receivers dropping is `Listening → Stopped`. The loop
/// never restarts itself.
#[derive(Debug)]
pub struct DiscoveryListener {
    local_addr: SocketAddr,
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl DiscoveryListener {
    /// Bind `0.0.0.0:port` for any-source datagrams and start the receive
    /// loop, expecting announcements from `app`.
    ///
    /// Returns the listener handle and the announcement channel. Pass
    /// port `0` to let the OS pick (useful under test); the bound port is
    /// available from [`local_addr`](Self::local_addr).
    pub async fn start(
        port: u16,
        app: impl Into<String>,
    ) -> io::Result<(Self, mpsc::Receiver<Announcement>)> {
        let app = app.into();
        let socket = UdpSocket::bind(("0.0.0.0", port)).await?;
        let local_addr = socket.local_addr()?;
        debug!("discovery: listening on {local_addr} for app '{app}'");

        let (events, receiver) = mpsc::channel(16);
        let shutdown = CancellationToken::new();
        let task = tokio::spawn(receive_loop(socket, app, events, shutdown.clone()));

        Ok((
            Self {
                local_addr,
                shutdown,
                task,
            },
            receiver,
        ))
    }

    /// The bound socket address.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// `true` while the receive loop is running.
    pub fn is_listening(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the receive loop and wait for it to exit. Unblocks a pending
    /// receive deterministically; no datagram needs to arrive.
    pub async fn stop(self) {
        self.shutdown.cancel();
        let _ = self.task.await;
    }
}

async fn receive_loop(
    socket: UdpSocket,
    app: String,
    events: mpsc::Sender<Announcement>,
    shutdown: CancellationToken,
) {
    let mut buf = vec![0u8; 2048];
    loop {
        let (len, from) = tokio::select! {
            () = shutdown.cancelled() => break,
            received = socket.recv_from(&mut buf) => match received {
                Ok(r) => r,
                Err(e) => {
                    error!("discovery: receive failed on {:?}: {e}", socket.local_addr());
                    break;
                }
            },
        };

        let Some(announcement) = parse(&buf[..len], from) else {
            continue;
        };

        // Announcements from other applications share the port; drop them.
        if !announcement.app.eq_ignore_ascii_case(&app) {
            continue;
        }

        debug!(
            "discovery: {} ({}) announced from {from}",
            announcement.hostname,
            announcement.addr()
        );

        tokio::select! {
            () = shutdown.cancelled() => break,
            sent = events.send(announcement) => {
                if sent.is_err() {
                    // Every receiver is gone; nobody is left to tell.
                    break;
                }
            }
        }
    }
    debug!("discovery: listener stopped");
}

fn parse(payload: &[u8], from: SocketAddr) -> Option<Announcement> {
    match serde_json::from_slice(payload) {
        Ok(announcement) => Some(announcement),
        Err(e) => {
            warn!("discovery: ignoring malformed datagram from {from}: {e}");
            None
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
