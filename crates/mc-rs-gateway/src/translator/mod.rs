//! Every packet translator the gateway ships, by direction.

pub mod bedrock;
pub mod java;

use mc_rs_proto::bedrock::BedrockPacket;
use mc_rs_proto::java::{ClientboundPacket, ClientboundPacketKind};

use crate::error::RegistryError;
use crate::registry::PacketTranslatorRegistry;

/// Both registries, built once at start-up.
pub struct Translators {
    pub java: PacketTranslatorRegistry<ClientboundPacket>,
    pub bedrock: PacketTranslatorRegistry<BedrockPacket>,
}

impl Translators {
    pub fn new() -> Result<Self, RegistryError> {
        let mut java = PacketTranslatorRegistry::new();
        java::register(&mut java)?;
        java.ignore(ClientboundPacketKind::LightUpdate);
        java.ignore(ClientboundPacketKind::TabList);

        let mut bedrock = PacketTranslatorRegistry::new();
        bedrock::register(&mut bedrock)?;

        Ok(Self { java, bedrock })
    }
}
