//! Bedrock Edition packets exchanged with the client.

pub mod entity;
pub mod form;
pub mod item;
pub mod login;
pub mod misc;

pub use entity::{
    AddActor, AttributeData, EntityDataKey, EntityDataMap, EntityFlag, EntityFlags,
    MetadataValue, MoveActorAbsolute, RemoveEntity, SetEntityData, UpdateAttributes,
};
pub use form::{FormCancelReason, ModalFormRequest, ModalFormResponse};
pub use item::{ContainerId, ItemData, MobArmorEquipment, MobEquipment};
pub use login::{
    ClientToServerHandshake, Disconnect, Login, PlayStatus, PlayStatusType,
    ServerToClientHandshake,
};
pub use misc::{GameRule, GameRuleValue, GameRulesChanged, Interact, InteractAction, Text};

/// Newest client protocol version this model follows.
pub const PROTOCOL_VERSION: i32 = 924;

packet_set! {
    /// Every Bedrock packet the gateway reads from or writes to a client.
    BedrockPacket / BedrockPacketKind {
        Login,
        ServerToClientHandshake,
        ClientToServerHandshake,
        PlayStatus,
        Disconnect,
        ModalFormRequest,
        ModalFormResponse,
        AddActor,
        RemoveEntity,
        MoveActorAbsolute,
        SetEntityData,
        UpdateAttributes,
        MobEquipment,
        MobArmorEquipment,
        Interact,
        Text,
        GameRulesChanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let packet: BedrockPacket = ClientToServerHandshake.into();
        assert_eq!(packet.kind(), BedrockPacketKind::ClientToServerHandshake);
        assert_eq!(packet.kind().name(), "ClientToServerHandshake");
    }

    #[test]
    fn variant_extraction() {
        use crate::PacketVariant;

        let packet: BedrockPacket = Disconnect::with_message("bye").into();
        assert_eq!(Disconnect::KIND, BedrockPacketKind::Disconnect);
        assert!(Disconnect::extract(&packet).is_some());
        assert!(ClientToServerHandshake::extract(&packet).is_none());
    }

    #[test]
    fn all_kinds_are_listed_once() {
        let mut names: Vec<_> = BedrockPacketKind::ALL.iter().map(|k| k.name()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(total, 17);
    }
}
