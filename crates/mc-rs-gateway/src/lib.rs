//! Bedrock Edition → Java Edition translation gateway.
//!
//! Each Bedrock client gets a [`session::Session`] owned by one Tokio task.
//! Decoded packets from either side are dispatched through the
//! [`registry::PacketTranslatorRegistry`] tables built in [`translator`];
//! translators update the session's entity and login state and emit typed
//! packets to the other side. Byte codecs and sockets live in the
//! [`session::ClientEndpoint`] / [`session::BackendEndpoint`]
//! implementations supplied by the host.

pub mod auth;
pub mod config;
pub mod context;
pub mod entity;
pub mod error;
pub mod locale;
pub mod mappings;
pub mod registry;
pub mod session;
pub mod translator;

#[cfg(test)]
pub(crate) mod testing;
