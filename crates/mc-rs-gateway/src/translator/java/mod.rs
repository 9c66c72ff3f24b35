//! Backend → client translators.

mod chat;
mod entity;
mod login;

use mc_rs_proto::java::{
    AddEntity, ClientboundPacket, Disconnect, EntityEvent, FinishConfiguration, JoinGame,
    KeepAlive, LoginFinished, MoveEntityPos, RemoveEntities, SetEntityData, SetEquipment,
    SetPassengers, SystemChat, UpdateAttributes,
};

use crate::error::RegistryError;
use crate::registry::{PacketTranslatorRegistry, Stage};

pub fn register(
    registry: &mut PacketTranslatorRegistry<ClientboundPacket>,
) -> Result<(), RegistryError> {
    registry.register::<LoginFinished, _>(Stage::Login, login::login_finished)?;
    registry.register::<FinishConfiguration, _>(Stage::Login, login::finish_configuration)?;
    registry.register::<KeepAlive, _>(Stage::Login, login::keep_alive)?;
    registry.register::<Disconnect, _>(Stage::Login, login::disconnect)?;

    registry.register::<JoinGame, _>(Stage::Play, login::join_game)?;
    registry.register::<AddEntity, _>(Stage::Play, entity::add_entity)?;
    registry.register::<RemoveEntities, _>(Stage::Play, entity::remove_entities)?;
    registry.register::<MoveEntityPos, _>(Stage::Play, entity::move_entity_pos)?;
    registry.register::<SetEntityData, _>(Stage::Play, entity::set_entity_data)?;
    registry.register::<SetEquipment, _>(Stage::Play, entity::set_equipment)?;
    registry.register::<UpdateAttributes, _>(Stage::Play, entity::update_attributes)?;
    registry.register::<EntityEvent, _>(Stage::Play, entity::entity_event)?;
    registry.register::<SetPassengers, _>(Stage::Play, entity::set_passengers)?;

    registry.register::<SystemChat, _>(Stage::Play, chat::system_chat)?;
    Ok(())
}
