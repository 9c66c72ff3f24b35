//! Java attribute kinds and their Bedrock counterparts.

use mc_rs_proto::bedrock::AttributeData;
use mc_rs_proto::java::AttributeType;

/// A Bedrock attribute type with its fixed range and default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientAttributeType {
    pub identifier: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl ClientAttributeType {
    pub const MOVEMENT_SPEED: Self = Self::new("minecraft:movement", 0.0, 1024.0, 0.1);
    pub const ATTACK_DAMAGE: Self = Self::new("minecraft:attack_damage", 0.0, 2048.0, 1.0);
    pub const FOLLOW_RANGE: Self = Self::new("minecraft:follow_range", 0.0, 2048.0, 32.0);
    pub const KNOCKBACK_RESISTANCE: Self =
        Self::new("minecraft:knockback_resistance", 0.0, 1.0, 0.0);
    pub const HORSE_JUMP_STRENGTH: Self =
        Self::new("minecraft:horse.jump_strength", 0.0, 2.0, 0.7);
    pub const HEALTH: Self = Self::new("minecraft:health", 0.0, 1024.0, 20.0);
    /// Scale is entity data on Bedrock; only the range is used.
    pub const SCALE: Self = Self::new("minecraft:scale", 0.0625, 16.0, 1.0);

    const fn new(identifier: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self {
            identifier,
            min,
            max,
            default,
        }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Attribute entry for `value`, clamped to this type's range.
    pub fn attribute(&self, value: f32) -> AttributeData {
        AttributeData {
            name: self.identifier.to_string(),
            min: self.min,
            max: self.max,
            value: self.clamp(value),
            default: self.default,
        }
    }
}

/// What the gateway does with one incoming Java attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeRoute {
    /// Floor to 1 and re-send health.
    MaxHealth,
    /// One Bedrock attribute entry.
    Client(ClientAttributeType),
    /// Entity data, via the living entity's scale.
    Scale,
    /// No Bedrock attribute; vehicle parameters only.
    VehicleOnly,
    Dropped,
}

pub fn route(kind: &AttributeType) -> AttributeRoute {
    match kind {
        AttributeType::MaxHealth => AttributeRoute::MaxHealth,
        AttributeType::MovementSpeed => AttributeRoute::Client(ClientAttributeType::MOVEMENT_SPEED),
        AttributeType::AttackDamage => AttributeRoute::Client(ClientAttributeType::ATTACK_DAMAGE),
        AttributeType::FollowRange => AttributeRoute::Client(ClientAttributeType::FOLLOW_RANGE),
        AttributeType::KnockbackResistance => {
            AttributeRoute::Client(ClientAttributeType::KNOCKBACK_RESISTANCE)
        }
        AttributeType::JumpStrength => {
            AttributeRoute::Client(ClientAttributeType::HORSE_JUMP_STRENGTH)
        }
        AttributeType::Scale => AttributeRoute::Scale,
        AttributeType::StepHeight
        | AttributeType::Gravity
        | AttributeType::WaterMovementEfficiency
        | AttributeType::FlyingSpeed => AttributeRoute::VehicleOnly,
        _ => AttributeRoute::Dropped,
    }
}
