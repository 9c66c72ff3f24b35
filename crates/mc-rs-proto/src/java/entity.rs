//! Java entity packets, attributes and metadata.

use crate::types::{BlockPos, Uuid};

/// Java entity types the gateway knows how to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Player,
    Zombie,
    Skeleton,
    Creeper,
    Pig,
    Cow,
    Sheep,
    Horse,
    Donkey,
    Camel,
    Strider,
    HappyGhast,
    ArmorStand,
    Villager,
    Item,
    /// Anything else, by registry ID.
    Other(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Standing,
    FallFlying,
    Sleeping,
    Swimming,
    SpinAttack,
    Sneaking,
    LongJumping,
    Dying,
    Croaking,
    UsingTongue,
    Sitting,
    Roaring,
    Sniffing,
    Emerging,
    Digging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleType {
    EntityEffect,
    Dust,
    Flame,
    Smoke,
    Other(i32),
}

/// A particle option. Only the colour payload is modelled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub kind: ParticleType,
    /// Packed ARGB colour for colour-carrying particles.
    pub color: Option<i32>,
}

impl Particle {
    pub fn entity_effect(color: i32) -> Self {
        Self {
            kind: ParticleType::EntityEffect,
            color: Some(color),
        }
    }
}

/// Java entity metadata value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Byte(i8),
    Int(i32),
    Long(i64),
    Float(f32),
    String(String),
    Boolean(bool),
    Pose(Pose),
    OptionalPosition(Option<BlockPos>),
    Particles(Vec<Particle>),
}

/// One indexed metadata entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMetadata {
    pub index: u8,
    pub value: MetadataValue,
}

impl EntityMetadata {
    pub fn new(index: u8, value: MetadataValue) -> Self {
        Self { index, value }
    }
}

/// Attribute kinds. Unlisted registry entries arrive as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Armor,
    ArmorToughness,
    AttackDamage,
    AttackKnockback,
    AttackSpeed,
    FlyingSpeed,
    FollowRange,
    Gravity,
    JumpStrength,
    KnockbackResistance,
    Luck,
    MaxAbsorption,
    MaxHealth,
    MovementSpeed,
    Scale,
    SafeFallDistance,
    StepHeight,
    WaterMovementEfficiency,
    Custom(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierOperation {
    AddValue,
    AddMultipliedBase,
    AddMultipliedTotal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeModifier {
    pub id: String,
    pub amount: f64,
    pub operation: ModifierOperation,
}

/// An attribute as sent by the backend: base value plus modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub kind: AttributeType,
    pub base: f64,
    pub modifiers: Vec<AttributeModifier>,
}

impl Attribute {
    pub fn new(kind: AttributeType, base: f64) -> Self {
        Self {
            kind,
            base,
            modifiers: Vec::new(),
        }
    }

    /// Apply the modifiers in Java's order: additive, then multiplied-base,
    /// then multiplied-total.
    pub fn computed_value(&self) -> f64 {
        let mut value = self.base;
        for modifier in self.by_operation(ModifierOperation::AddValue) {
            value += modifier.amount;
        }
        let after_add = value;
        for modifier in self.by_operation(ModifierOperation::AddMultipliedBase) {
            value += after_add * modifier.amount;
        }
        for modifier in self.by_operation(ModifierOperation::AddMultipliedTotal) {
            value *= 1.0 + modifier.amount;
        }
        value
    }

    fn by_operation(
        &self,
        operation: ModifierOperation,
    ) -> impl Iterator<Item = &AttributeModifier> + '_ {
        self.modifiers
            .iter()
            .filter(move |m| m.operation == operation)
    }
}

/// Spawn entity.
#[derive(Debug, Clone)]
pub struct AddEntity {
    pub entity_id: i32,
    pub uuid: Uuid,
    pub entity_type: EntityType,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub motion_x: f64,
    pub motion_y: f64,
    pub motion_z: f64,
    pub yaw: f32,
    pub pitch: f32,
    pub head_yaw: f32,
}

#[derive(Debug, Clone)]
pub struct RemoveEntities {
    pub entity_ids: Vec<i32>,
}

/// Relative entity movement in blocks (already divided out of the 1/4096 units).
#[derive(Debug, Clone)]
pub struct MoveEntityPos {
    pub entity_id: i32,
    pub delta_x: f64,
    pub delta_y: f64,
    pub delta_z: f64,
    pub on_ground: bool,
}

#[derive(Debug, Clone)]
pub struct SetEntityData {
    pub entity_id: i32,
    pub metadata: Vec<EntityMetadata>,
}

#[derive(Debug, Clone)]
pub struct UpdateAttributes {
    pub entity_id: i32,
    pub attributes: Vec<Attribute>,
}

/// Entity status byte. Most statuses are animations the gateway skips.
#[derive(Debug, Clone, Copy)]
pub struct EntityEvent {
    pub entity_id: i32,
    pub status: i8,
}

impl EntityEvent {
    /// Main hand and off hand items traded places.
    pub const SWAP_HANDS: i8 = 55;
}

/// Full passenger list of a vehicle; the first passenger steers.
#[derive(Debug, Clone)]
pub struct SetPassengers {
    pub vehicle_id: i32,
    pub passenger_ids: Vec<i32>,
}
