//! Item data and equipment packets.

/// A client-side item instance: network ID, count and damage.
///
/// Only the network ID matters for identity comparisons (banner, shield).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemData {
    /// Network runtime ID; 0 is air.
    pub id: i32,
    pub count: u8,
    pub damage: u16,
}

impl ItemData {
    pub const AIR: Self = Self {
        id: 0,
        count: 0,
        damage: 0,
    };

    pub fn new(id: i32, count: u8) -> Self {
        Self {
            id,
            count,
            damage: 0,
        }
    }

    pub fn is_air(&self) -> bool {
        self.id == 0
    }

    /// Whether both items share the same definition, ignoring count/damage.
    pub fn same_definition(&self, other: &ItemData) -> bool {
        self.id == other.id
    }
}

/// Container IDs used by `MobEquipment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ContainerId {
    Inventory = 0,
    Offhand = 119,
}

/// MobEquipment (0x1F) — Bidirectional.
///
/// Sent by the client when the player changes hotbar slot, or by the server
/// to show what another entity is holding.
#[derive(Debug, Clone)]
pub struct MobEquipment {
    pub runtime_entity_id: u64,
    pub item: ItemData,
    pub inventory_slot: u8,
    /// -1 when the item is not tied to a hotbar slot.
    pub hotbar_slot: i8,
    pub container_id: ContainerId,
}

/// MobArmorEquipment (0x20) — Server → Client.
#[derive(Debug, Clone)]
pub struct MobArmorEquipment {
    pub runtime_entity_id: u64,
    pub helmet: ItemData,
    pub chestplate: ItemData,
    pub leggings: ItemData,
    pub boots: ItemData,
    pub body: ItemData,
}
