//! Java entity types and how they appear on Bedrock.

use mc_rs_proto::java::EntityType;

/// Which kind of client-driven vehicle an entity can be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleKind {
    Ground,
    /// Also tracks flying speed.
    Flying,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityDefinition {
    pub entity_type: EntityType,
    pub identifier: &'static str,
    pub width: f32,
    pub height: f32,
    pub living: bool,
    /// Has a baby variant driven by entity data.
    pub ageable: bool,
    pub vehicle: Option<VehicleKind>,
}

impl EntityDefinition {
    fn mob(
        entity_type: EntityType,
        identifier: &'static str,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            entity_type,
            identifier,
            width,
            height,
            living: true,
            ageable: false,
            vehicle: None,
        }
    }

    fn ageable(mut self) -> Self {
        self.ageable = true;
        self
    }

    fn vehicle(mut self, kind: VehicleKind) -> Self {
        self.vehicle = Some(kind);
        self
    }
}

/// Bedrock definition for a Java entity type, or `None` when the type has
/// no Bedrock counterpart yet.
pub fn definition(entity_type: EntityType) -> Option<EntityDefinition> {
    use EntityDefinition as D;
    use EntityType as T;

    let def = match entity_type {
        T::Player => D::mob(T::Player, "minecraft:player", 0.6, 1.8),
        T::Zombie => D::mob(T::Zombie, "minecraft:zombie", 0.6, 1.95).ageable(),
        T::Skeleton => D::mob(T::Skeleton, "minecraft:skeleton", 0.6, 1.99),
        T::Creeper => D::mob(T::Creeper, "minecraft:creeper", 0.6, 1.7),
        T::Pig => D::mob(T::Pig, "minecraft:pig", 0.9, 0.9)
            .ageable()
            .vehicle(VehicleKind::Ground),
        T::Cow => D::mob(T::Cow, "minecraft:cow", 0.9, 1.4).ageable(),
        T::Sheep => D::mob(T::Sheep, "minecraft:sheep", 0.9, 1.3).ageable(),
        T::Horse => D::mob(T::Horse, "minecraft:horse", 1.3965, 1.6)
            .ageable()
            .vehicle(VehicleKind::Ground),
        T::Donkey => D::mob(T::Donkey, "minecraft:donkey", 1.3965, 1.5)
            .ageable()
            .vehicle(VehicleKind::Ground),
        T::Camel => D::mob(T::Camel, "minecraft:camel", 1.7, 2.375)
            .ageable()
            .vehicle(VehicleKind::Ground),
        T::Strider => D::mob(T::Strider, "minecraft:strider", 0.9, 1.7)
            .ageable()
            .vehicle(VehicleKind::Ground),
        T::HappyGhast => D::mob(T::HappyGhast, "minecraft:happy_ghast", 4.0, 4.0)
            .ageable()
            .vehicle(VehicleKind::Flying),
        T::ArmorStand => D::mob(T::ArmorStand, "minecraft:armor_stand", 0.5, 1.975),
        T::Villager => D::mob(T::Villager, "minecraft:villager_v2", 0.6, 1.95).ageable(),
        T::Item => EntityDefinition {
            entity_type: T::Item,
            identifier: "minecraft:item",
            width: 0.25,
            height: 0.25,
            living: false,
            ageable: false,
            vehicle: None,
        },
        T::Other(_) => return None,
    };
    Some(def)
}
