//! Java Edition packets exchanged with the backend server.

pub mod entity;
pub mod item;

pub use entity::{
    AddEntity, Attribute, AttributeModifier, AttributeType, EntityEvent, EntityMetadata,
    EntityType, MetadataValue, ModifierOperation, MoveEntityPos, Particle, ParticleType, Pose,
    RemoveEntities, SetEntityData, SetPassengers, UpdateAttributes,
};
pub use item::{Equipment, EquipmentSlot, Equippable, ItemStack, SetEquipment};

use crate::types::Uuid;

/// Authenticated profile returned by the backend at the end of login.
#[derive(Debug, Clone, PartialEq)]
pub struct GameProfile {
    pub id: Uuid,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Clientbound (backend → gateway)
// ---------------------------------------------------------------------------

/// Login phase: the backend accepted the profile.
#[derive(Debug, Clone)]
pub struct LoginFinished {
    pub profile: GameProfile,
}

/// Configuration phase is over; play begins after the acknowledgement.
#[derive(Debug, Clone, Copy, Default)]
pub struct FinishConfiguration;

/// Play phase begins; carries the player's own entity ID.
#[derive(Debug, Clone, Copy)]
pub struct JoinGame {
    pub entity_id: i32,
}

/// Chunk light data. Bedrock computes lighting itself.
#[derive(Debug, Clone)]
pub struct LightUpdate {
    pub chunk_x: i32,
    pub chunk_z: i32,
}

/// Tab list header and footer. No Bedrock counterpart.
#[derive(Debug, Clone)]
pub struct TabList {
    pub header: String,
    pub footer: String,
}

#[derive(Debug, Clone, Copy)]
pub struct KeepAlive {
    pub id: i64,
}

/// Backend-initiated disconnect with a plain-text reason.
#[derive(Debug, Clone)]
pub struct Disconnect {
    pub reason: String,
}

/// System chat line (already flattened to legacy-formatted text).
#[derive(Debug, Clone)]
pub struct SystemChat {
    pub content: String,
    pub overlay: bool,
}

packet_set! {
    /// Packets the backend sends to the gateway.
    ClientboundPacket / ClientboundPacketKind {
        LoginFinished,
        FinishConfiguration,
        KeepAlive,
        Disconnect,
        JoinGame,
        AddEntity,
        RemoveEntities,
        MoveEntityPos,
        SetEntityData,
        SetEquipment,
        UpdateAttributes,
        EntityEvent,
        SetPassengers,
        LightUpdate,
        TabList,
        SystemChat,
    }
}

// ---------------------------------------------------------------------------
// Serverbound (gateway → backend)
// ---------------------------------------------------------------------------

/// Login start.
#[derive(Debug, Clone)]
pub struct Hello {
    pub name: String,
    pub profile_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct CustomPayload {
    pub channel: String,
    pub data: Vec<u8>,
}

/// Which hand the player treats as the main hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandPreference {
    Left,
    Right,
}

/// Client settings, sent once configuration starts.
#[derive(Debug, Clone)]
pub struct ClientInformation {
    pub locale: String,
    pub view_distance: u8,
    pub chat_colors: bool,
    pub main_hand: HandPreference,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FinishConfigurationAck;

#[derive(Debug, Clone, Copy)]
pub struct KeepAliveResponse {
    pub id: i64,
}

#[derive(Debug, Clone)]
pub struct Chat {
    pub message: String,
}

#[derive(Debug, Clone, Copy)]
pub struct SetCarriedItem {
    pub slot: u8,
}

packet_set! {
    /// Packets the gateway sends to the backend.
    ServerboundPacket / ServerboundPacketKind {
        Hello,
        CustomPayload,
        ClientInformation,
        FinishConfigurationAck,
        KeepAliveResponse,
        Chat,
        SetCarriedItem,
    }
}
