//! Client → backend translators.

mod login;
mod play;

use mc_rs_proto::bedrock::{
    BedrockPacket, ClientToServerHandshake, Interact, Login, MobEquipment, ModalFormResponse, Text,
};

use crate::error::RegistryError;
use crate::registry::{PacketTranslatorRegistry, Stage};

pub fn register(registry: &mut PacketTranslatorRegistry<BedrockPacket>) -> Result<(), RegistryError> {
    registry.register::<Login, _>(Stage::Login, login::login)?;
    registry.register::<ClientToServerHandshake, _>(Stage::Login, login::client_to_server_handshake)?;
    registry.register::<ModalFormResponse, _>(Stage::Login, login::modal_form_response)?;

    registry.register::<Interact, _>(Stage::Play, play::interact)?;
    registry.register::<Text, _>(Stage::Play, play::text)?;
    registry.register::<MobEquipment, _>(Stage::Play, play::mob_equipment)?;
    Ok(())
}
