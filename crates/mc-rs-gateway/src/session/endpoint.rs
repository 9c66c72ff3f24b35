//! The two network sides of a session.
//!
//! Implementors own the byte codecs; the gateway only hands them typed
//! packets. When a connection drops on its own, the implementor reports it
//! with [`SessionHandle::connection_lost`](super::SessionHandle::connection_lost).

use mc_rs_crypto::PacketEncryption;
use mc_rs_proto::bedrock::BedrockPacket;
use mc_rs_proto::java::ServerboundPacket;

/// Connection to the Bedrock client.
pub trait ClientEndpoint: Send {
    /// Queue a packet; it may be batched with others.
    fn send(&mut self, packet: BedrockPacket);

    /// Write a packet ahead of anything queued. Used for the handshake,
    /// which must reach the client before encryption starts.
    fn send_immediately(&mut self, packet: BedrockPacket) {
        self.send(packet);
    }

    /// Encrypt every byte from now on, in both directions.
    fn enable_encryption(&mut self, cipher: PacketEncryption);

    fn close(&mut self, reason: &str);

    fn is_closed(&self) -> bool;
}

/// Connection to the Java backend.
pub trait BackendEndpoint: Send {
    fn send(&mut self, packet: ServerboundPacket);

    fn close(&mut self, reason: &str);

    fn is_closed(&self) -> bool;
}
