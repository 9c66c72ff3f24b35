//! Entity packets: spawn, despawn, movement, metadata and attributes.

use std::collections::BTreeMap;

use crate::types::{BlockPos, Vec3};

/// Entity metadata keys (`ActorDataIDs`) the gateway writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u32)]
pub enum EntityDataKey {
    Flags = 0,
    StructuralIntegrity = 1,
    Name = 4,
    AirSupply = 7,
    EffectColor = 8,
    BedPosition = 28,
    Scale = 38,
    InteractText = 40,
    BoundingBoxWidth = 53,
    BoundingBoxHeight = 54,
    Flags2 = 92,
    FreezingEffectStrength = 120,
}

impl EntityDataKey {
    pub fn id(self) -> u32 {
        self as u32
    }
}

/// Entity metadata value. Wire type IDs follow `data_type()`.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Byte(u8),
    Short(i16),
    Int(i32),
    Float(f32),
    String(String),
    BlockPos(BlockPos),
    Long(i64),
    Vec3(Vec3),
}

impl MetadataValue {
    /// Data type ID (0=byte, 1=short, 2=int, 3=float, 4=string, 6=pos, 7=long, 8=vec3).
    pub fn data_type(&self) -> u32 {
        match self {
            Self::Byte(_) => 0,
            Self::Short(_) => 1,
            Self::Int(_) => 2,
            Self::Float(_) => 3,
            Self::String(_) => 4,
            Self::BlockPos(_) => 6,
            Self::Long(_) => 7,
            Self::Vec3(_) => 8,
        }
    }
}

impl From<f32> for MetadataValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<i32> for MetadataValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<String> for MetadataValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<BlockPos> for MetadataValue {
    fn from(v: BlockPos) -> Self {
        Self::BlockPos(v)
    }
}

/// Key-ordered metadata map, as carried by `SetEntityData` and `AddActor`.
pub type EntityDataMap = BTreeMap<EntityDataKey, MetadataValue>;

/// Entity flag bit indices (`ActorFlags`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EntityFlag {
    OnFire = 0,
    Sneaking = 1,
    Riding = 2,
    Sprinting = 3,
    UsingItem = 4,
    Invisible = 5,
    Saddled = 8,
    Baby = 11,
    CanShowName = 14,
    AlwaysShowName = 15,
    NoAi = 16,
    Silent = 17,
    CanClimb = 19,
    CanWalk = 22,
    WasdControlled = 44,
    Shaking = 40,
    HasCollision = 47,
    HasGravity = 48,
    DamageNearbyMobs = 55,
    Swimming = 56,
    Blocking = 71,
    Sleeping = 75,
    Emerging = 102,
}

/// 128-bit flag set, split across the `Flags` and `Flags2` metadata keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntityFlags(u128);

impl EntityFlags {
    pub fn set(&mut self, flag: EntityFlag, value: bool) {
        let bit = 1u128 << (flag as u8);
        if value {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
    }

    pub fn get(&self, flag: EntityFlag) -> bool {
        self.0 & (1u128 << (flag as u8)) != 0
    }

    /// Low word for `EntityDataKey::Flags`.
    pub fn low(&self) -> i64 {
        self.0 as u64 as i64
    }

    /// High word for `EntityDataKey::Flags2`.
    pub fn high(&self) -> i64 {
        (self.0 >> 64) as u64 as i64
    }
}

/// One client attribute entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeData {
    pub name: String,
    pub min: f32,
    pub max: f32,
    pub value: f32,
    pub default: f32,
}

/// UpdateAttributes (0x1D) — Server → Client.
#[derive(Debug, Clone)]
pub struct UpdateAttributes {
    pub runtime_entity_id: u64,
    pub attributes: Vec<AttributeData>,
    pub tick: u64,
}

/// SetEntityData (0x27) — Server → Client.
#[derive(Debug, Clone)]
pub struct SetEntityData {
    pub runtime_entity_id: u64,
    pub metadata: EntityDataMap,
    pub tick: u64,
}

/// AddActor (0x0D) — Server → Client.
#[derive(Debug, Clone)]
pub struct AddActor {
    pub unique_entity_id: i64,
    pub runtime_entity_id: u64,
    /// Namespaced entity identifier, e.g. `minecraft:pig`.
    pub identifier: String,
    pub position: Vec3,
    pub motion: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub head_yaw: f32,
    pub attributes: Vec<AttributeData>,
    pub metadata: EntityDataMap,
}

/// RemoveEntity (0x0E) — Server → Client.
#[derive(Debug, Clone)]
pub struct RemoveEntity {
    pub unique_entity_id: i64,
}

/// MoveActorAbsolute (0x12) — Server → Client.
#[derive(Debug, Clone)]
pub struct MoveActorAbsolute {
    pub runtime_entity_id: u64,
    pub position: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub head_yaw: f32,
    pub on_ground: bool,
}
