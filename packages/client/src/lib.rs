//! Network layer for the Hookshot remote-control client.
//!
//! Two independent pieces, sharing no locks or sockets:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | Async, cancellable RPC calls against one host agent |
//! | [`discovery`] | UDP broadcast listener that surfaces agents as they announce |
//! | [`addr`] | `host:port` addressing shared by both |
//!
//! The wire contract itself — endpoint descriptors, request and response
//! types, decoding — lives in [`hookshot_api`]; this crate supplies the
//! I/O around it.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use hookshot_client::{Client, DiscoveryListener, DEFAULT_APP_NAME, DEFAULT_DISCOVERY_PORT};
//! use hookshot_api::request;
//! use tokio_util::sync::CancellationToken;
//!
//! let (listener, mut hosts) =
//!     DiscoveryListener::start(DEFAULT_DISCOVERY_PORT, DEFAULT_APP_NAME).await?;
//!
//! let client = Client::new();
//! while let Some(announcement) = hosts.recv().await {
//!     let pong = client
//!         .call(&announcement.addr(), &request::Ping::new("hello"), &CancellationToken::new())
//!         .await?;
//!     println!("{} answered: {}", announcement.hostname, pong.msg);
//! }
//! ```

pub mod addr;
pub mod client;
pub mod discovery;

pub use addr::{AddrError, HostAddr};
pub use client::{Client, ClientError};
pub use discovery::{
    Announcement, DiscoveryListener, DEFAULT_APP_NAME, DEFAULT_DISCOVERY_PORT,
};
