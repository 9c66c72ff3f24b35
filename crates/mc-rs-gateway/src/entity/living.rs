//! Entities with health, equipment and attributes.

use std::collections::BTreeMap;

use mc_rs_proto::bedrock::{
    AttributeData, ContainerId, EntityDataKey, EntityFlag, ItemData, MobArmorEquipment,
    MobEquipment, UpdateAttributes,
};
use mc_rs_proto::java::{Attribute, EquipmentSlot, ItemStack, Particle, ParticleType, Pose};
use mc_rs_proto::types::BlockPos;

use super::{Entity, EntityContext};
use crate::mappings::{route, AttributeRoute, ClientAttributeType, StoredItems};
use crate::session::ClientEndpoint;

/// Base scale of baby mobs.
pub const BABY_SCALE: f32 = 0.55;

/// Translated Bedrock items, one per equipment slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct WornItems {
    helmet: ItemData,
    chestplate: ItemData,
    leggings: ItemData,
    boots: ItemData,
    body: ItemData,
    saddle: ItemData,
    hand: ItemData,
    offhand: ItemData,
}

impl WornItems {
    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut ItemData {
        match slot {
            EquipmentSlot::Helmet => &mut self.helmet,
            EquipmentSlot::Chestplate => &mut self.chestplate,
            EquipmentSlot::Leggings => &mut self.leggings,
            EquipmentSlot::Boots => &mut self.boots,
            EquipmentSlot::Body => &mut self.body,
            EquipmentSlot::Saddle => &mut self.saddle,
            EquipmentSlot::MainHand => &mut self.hand,
            EquipmentSlot::OffHand => &mut self.offhand,
        }
    }
}

#[derive(Debug)]
pub struct LivingEntity {
    pub base: Entity,
    /// Raw Java stacks by slot.
    equipment: BTreeMap<EquipmentSlot, ItemStack>,
    worn: WornItems,
    health: f32,
    max_health: f32,
    max_frozen: bool,
    /// Pose-driven component, e.g. babies.
    scale: f32,
    /// Component sent through the Java `SCALE` attribute.
    attribute_scale: f32,
}

impl LivingEntity {
    pub fn new(mut base: Entity) -> Self {
        // Bedrock always reports this for living entities.
        base.dirty_mut().put(EntityDataKey::StructuralIntegrity, 1i32);
        Self {
            base,
            equipment: BTreeMap::new(),
            worn: WornItems::default(),
            // Java's values before any data or attributes arrive.
            health: 1.0,
            max_health: 20.0,
            max_frozen: false,
            scale: 1.0,
            attribute_scale: 1.0,
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.base.is_valid() && self.health > 0.0
    }

    pub fn is_max_frozen(&self) -> bool {
        self.max_frozen
    }

    pub fn equipment(&self, slot: EquipmentSlot) -> Option<&ItemStack> {
        self.equipment.get(&slot)
    }

    pub fn hand(&self) -> ItemData {
        self.worn.hand
    }

    pub fn offhand(&self) -> ItemData {
        self.worn.offhand
    }

    pub fn helmet(&self) -> ItemData {
        self.worn.helmet
    }

    pub fn chestplate(&self) -> ItemData {
        self.worn.chestplate
    }

    pub fn saddle(&self) -> ItemData {
        self.worn.saddle
    }

    /// Store and translate one slot. The saddle slot also refreshes the
    /// `SADDLED` flag and flushes entity data.
    pub fn set_equipment(
        &mut self,
        slot: EquipmentSlot,
        stack: ItemStack,
        ctx: &mut EntityContext<'_>,
    ) {
        *self.worn.slot_mut(slot) = ctx.items.to_bedrock(&stack);
        let saddled = slot == EquipmentSlot::Saddle
            && !stack.is_empty()
            && stack.equippable.map(|e| e.slot) == Some(EquipmentSlot::Saddle);
        self.equipment.insert(slot, stack);

        if slot == EquipmentSlot::Saddle {
            self.update_saddled(saddled, ctx);
        }
    }

    fn update_saddled(&mut self, saddled: bool, ctx: &mut EntityContext<'_>) {
        self.base.set_flag(EntityFlag::Saddled, saddled);
        if ctx.mouseover == Some(self.base.runtime_id) {
            self.base.update_interactive_tag();
        }
        self.base.update_bedrock_metadata(ctx.upstream);
    }

    /// Exchange main hand and off hand, raw and translated together.
    pub fn switch_hands(&mut self) {
        let main = self.equipment.remove(&EquipmentSlot::MainHand);
        let off = self.equipment.remove(&EquipmentSlot::OffHand);
        if let Some(stack) = off {
            self.equipment.insert(EquipmentSlot::MainHand, stack);
        }
        if let Some(stack) = main {
            self.equipment.insert(EquipmentSlot::OffHand, stack);
        }
        std::mem::swap(&mut self.worn.hand, &mut self.worn.offhand);
    }

    /// Java living flags byte: using item, off hand, riptide.
    pub fn set_living_flags(&mut self, flags: i8, stored: &StoredItems) {
        let flags = flags as u8;
        let using_item = flags & 0x01 != 0;
        let using_offhand = flags & 0x02 != 0;
        let using_shield = self.has_shield(using_offhand, stored);

        self.base
            .set_flag(EntityFlag::UsingItem, using_item && !using_shield);
        self.base
            .set_flag(EntityFlag::Blocking, using_item && using_shield);
        self.base
            .set_flag(EntityFlag::DamageNearbyMobs, flags & 0x04 != 0);
        self.base
            .set_flag(EntityFlag::Emerging, using_item && using_offhand);
    }

    fn has_shield(&self, offhand: bool, stored: &StoredItems) -> bool {
        let item = if offhand {
            &self.worn.offhand
        } else {
            &self.worn.hand
        };
        stored.shield.matches(item)
    }

    /// Health entry with the current values. Rounded up so `(0, 1]`
    /// never reads as dead on Bedrock.
    pub fn create_health_attribute(&self) -> AttributeData {
        AttributeData {
            name: ClientAttributeType::HEALTH.identifier.to_string(),
            min: 0.0,
            max: self.max_health,
            value: self.health.ceil(),
            default: self.max_health,
        }
    }

    /// Set health and send it right away.
    pub fn set_health(&mut self, health: f32, upstream: &mut dyn ClientEndpoint) {
        self.health = health;
        upstream.send(
            UpdateAttributes {
                runtime_entity_id: self.base.runtime_id,
                attributes: vec![self.create_health_attribute()],
                tick: 0,
            }
            .into(),
        );
    }

    /// Average colour of status-effect particles, packed as RGB.
    pub fn set_particles(&mut self, particles: &[Particle]) {
        let (mut r, mut g, mut b) = (0f32, 0f32, 0f32);
        let mut count = 0;
        for particle in particles {
            let (ParticleType::EntityEffect, Some(color)) = (particle.kind, particle.color) else {
                continue;
            };
            r += ((color >> 16) & 0xFF) as f32 / 255.0;
            g += ((color >> 8) & 0xFF) as f32 / 255.0;
            b += (color & 0xFF) as f32 / 255.0;
            count += 1;
        }

        let mut packed = 0i32;
        if count > 0 {
            let count = count as f32;
            let r = (r / count * 255.0) as i32;
            let g = (g / count * 255.0) as i32;
            let b = (b / count * 255.0) as i32;
            packed = r << 16 | g << 8 | b;
        }
        self.base
            .dirty_mut()
            .put(EntityDataKey::EffectColor, packed);
    }

    pub fn set_bed_position(&mut self, position: Option<BlockPos>) {
        if let Some(position) = position {
            self.base
                .dirty_mut()
                .put(EntityDataKey::BedPosition, position);
        }
    }

    pub fn set_freezing(&mut self, frozen_ticks: i32) -> f32 {
        let percentage = self.base.set_freezing(frozen_ticks);
        self.max_frozen = percentage >= 1.0;
        self.base.set_flag(EntityFlag::Shaking, self.max_frozen);
        percentage
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.base.set_pose(pose);
        if pose == Pose::Sleeping {
            self.base.set_bounding_box_width(0.2);
            self.base.set_bounding_box_height(0.2);
        } else {
            self.base.set_dimensions_from_pose(pose);
        }
    }

    pub fn set_baby(&mut self, baby: bool) {
        self.base.set_flag(EntityFlag::Baby, baby);
        self.set_scale(if baby { BABY_SCALE } else { 1.0 });
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.apply_scale();
    }

    fn set_attribute_scale(&mut self, scale: f32) {
        self.attribute_scale = ClientAttributeType::SCALE.clamp(scale);
        self.apply_scale();
    }

    pub fn final_scale(&self) -> f32 {
        ClientAttributeType::SCALE.clamp(self.scale * self.attribute_scale)
    }

    fn apply_scale(&mut self) {
        let scale = self.final_scale();
        self.base.dirty_mut().put(EntityDataKey::Scale, scale);
    }

    pub fn move_relative(
        &mut self,
        dx: f64,
        dy: f64,
        dz: f64,
        on_ground: bool,
        upstream: &mut dyn ClientEndpoint,
    ) {
        if let Some(vehicle) = self.base.vehicle.as_mut() {
            if vehicle.is_client_controlled() {
                return;
            }
            vehicle.move_relative(dx, dy, dz);
        }
        self.base.move_relative(dx, dy, dz, on_ground, upstream);
    }

    /// Send the armor slots. A banner worn on the head shows in the
    /// chestplate slot on Bedrock; a chestplate banner is hidden.
    pub fn update_armor(&self, ctx: &mut EntityContext<'_>) {
        if !self.base.is_valid() {
            return;
        }
        let mut helmet = self.worn.helmet;
        let mut chestplate = self.worn.chestplate;
        let banner = ctx.stored.banner;
        if chestplate.is_air() && banner.matches(&helmet) {
            chestplate = helmet;
            helmet = ItemData::AIR;
        } else if banner.matches(&chestplate) {
            chestplate = ItemData::AIR;
        }

        ctx.upstream.send(
            MobArmorEquipment {
                runtime_entity_id: self.base.runtime_id,
                helmet,
                chestplate,
                leggings: self.worn.leggings,
                boots: self.worn.boots,
                body: self.worn.body,
            }
            .into(),
        );
    }

    pub fn update_main_hand(&self, upstream: &mut dyn ClientEndpoint) {
        self.send_hand(self.worn.hand, ContainerId::Inventory, upstream);
    }

    pub fn update_off_hand(&self, upstream: &mut dyn ClientEndpoint) {
        self.send_hand(self.worn.offhand, ContainerId::Offhand, upstream);
    }

    fn send_hand(
        &self,
        item: ItemData,
        container_id: ContainerId,
        upstream: &mut dyn ClientEndpoint,
    ) {
        if !self.base.is_valid() {
            return;
        }
        upstream.send(
            MobEquipment {
                runtime_entity_id: self.base.runtime_id,
                item,
                inventory_slot: 0,
                hotbar_slot: -1,
                container_id,
            }
            .into(),
        );
    }

    /// Translate a batch of Java attributes. Sends one `UpdateAttributes`
    /// if anything translated, and flushes entity data once if scale moved.
    pub fn update_bedrock_attributes(
        &mut self,
        attributes: &[Attribute],
        upstream: &mut dyn ClientEndpoint,
    ) {
        if !self.base.is_valid() {
            return;
        }

        let mut translated = Vec::new();
        let mut scale_changed = false;
        for attribute in attributes {
            scale_changed |= self.update_attribute(attribute, &mut translated);
        }
        if scale_changed {
            self.base.update_bedrock_metadata(upstream);
        }
        if translated.is_empty() {
            return;
        }
        upstream.send(
            UpdateAttributes {
                runtime_entity_id: self.base.runtime_id,
                attributes: translated,
                tick: 0,
            }
            .into(),
        );
    }

    /// Returns true when the attribute changed entity data.
    fn update_attribute(&mut self, attribute: &Attribute, out: &mut Vec<AttributeData>) -> bool {
        let value = attribute.computed_value();
        match route(&attribute.kind) {
            AttributeRoute::MaxHealth => {
                // Bedrock kills entities whose max health is 0 or below.
                self.max_health = (value as f32).max(1.0);
                out.push(self.create_health_attribute());
            }
            AttributeRoute::Client(client_type) => {
                let data = client_type.attribute(value as f32);
                if client_type == ClientAttributeType::MOVEMENT_SPEED {
                    if let Some(vehicle) = self.base.vehicle.as_mut() {
                        vehicle.set_move_speed(data.value);
                    }
                }
                out.push(data);
            }
            AttributeRoute::Scale => {
                self.set_attribute_scale(value as f32);
                return true;
            }
            AttributeRoute::VehicleOnly => {
                if let Some(vehicle) = self.base.vehicle.as_mut() {
                    use mc_rs_proto::java::AttributeType as T;
                    match attribute.kind {
                        T::StepHeight => vehicle.set_step_height(value as f32),
                        T::Gravity => vehicle.set_gravity(value),
                        T::WaterMovementEfficiency => vehicle.set_water_movement_efficiency(value),
                        T::FlyingSpeed => vehicle.set_flying_speed(value as f32),
                        _ => {}
                    }
                }
            }
            AttributeRoute::Dropped => {}
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::mappings::{definition, MappedItemTranslator, StoredItems};
    use crate::testing::RecordingClient;
    use mc_rs_proto::bedrock::{BedrockPacket, MetadataValue};
    use mc_rs_proto::java::{
        AttributeModifier, AttributeType, EntityType, ModifierOperation,
    };
    use mc_rs_proto::types::{Uuid, Vec3};

    struct Fixture {
        client: RecordingClient,
        items: MappedItemTranslator,
        stored: StoredItems,
    }

    impl Fixture {
        fn new() -> Self {
            let stored = StoredItems::default();
            Self {
                client: RecordingClient::default(),
                items: MappedItemTranslator::new(&stored),
                stored,
            }
        }

        fn ctx(&mut self, mouseover: Option<u64>) -> EntityContext<'_> {
            EntityContext {
                upstream: &mut self.client,
                items: &self.items,
                stored: &self.stored,
                mouseover,
            }
        }

        fn spawn(&mut self, entity_type: EntityType) -> LivingEntity {
            let base = Entity::new(
                10,
                5,
                Uuid::ZERO,
                definition(entity_type).unwrap(),
                Vec3::ZERO,
                Vec3::ZERO,
                0.0,
                0.0,
                0.0,
            );
            let mut living = LivingEntity::new(base);
            living.base.spawn(&mut self.client);
            self.client.take();
            living
        }
    }

    fn attribute(kind: AttributeType, base: f64) -> Attribute {
        Attribute::new(kind, base)
    }

    fn only_attributes(sent: &[BedrockPacket]) -> Vec<&UpdateAttributes> {
        sent.iter()
            .filter_map(|p| match p {
                BedrockPacket::UpdateAttributes(u) => Some(u),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn scale_is_clamped_product_after_every_change() {
        let mut fx = Fixture::new();
        let mut horse = fx.spawn(EntityType::Horse);

        horse.set_baby(true);
        assert_eq!(horse.final_scale(), BABY_SCALE);

        horse.update_bedrock_attributes(&[attribute(AttributeType::Scale, 2.0)], &mut fx.client);
        assert!((horse.final_scale() - BABY_SCALE * 2.0).abs() < 1e-6);

        horse.update_bedrock_attributes(&[attribute(AttributeType::Scale, 100.0)], &mut fx.client);
        assert_eq!(horse.final_scale(), ClientAttributeType::SCALE.clamp(BABY_SCALE * 16.0));

        horse.set_baby(false);
        horse.update_bedrock_attributes(&[attribute(AttributeType::Scale, 0.01)], &mut fx.client);
        assert_eq!(horse.final_scale(), ClientAttributeType::SCALE.min);

        let sent = fx.client.take();
        let Some(BedrockPacket::SetEntityData(last)) = sent.last() else {
            panic!("expected entity data flush, got {sent:?}");
        };
        assert_eq!(
            last.metadata.get(&EntityDataKey::Scale),
            Some(&MetadataValue::Float(horse.final_scale()))
        );
    }

    #[test]
    fn untranslatable_attributes_send_nothing() {
        let mut fx = Fixture::new();
        let mut cow = fx.spawn(EntityType::Cow);
        cow.update_bedrock_attributes(
            &[
                attribute(AttributeType::Luck, 1.0),
                attribute(AttributeType::Armor, 4.0),
                attribute(AttributeType::StepHeight, 1.0),
            ],
            &mut fx.client,
        );
        assert!(fx.client.take().is_empty());
    }

    #[test]
    fn health_is_rounded_up() {
        let mut fx = Fixture::new();
        let mut cow = fx.spawn(EntityType::Cow);

        for (health, expected) in [(0.1f32, 1.0f32), (1.0, 1.0), (7.5, 8.0), (0.0, 0.0)] {
            cow.set_health(health, &mut fx.client);
            let sent = fx.client.take();
            let updates = only_attributes(&sent);
            assert_eq!(updates.len(), 1);
            assert_eq!(updates[0].attributes.len(), 1);
            assert_eq!(updates[0].attributes[0].value, expected);
        }
    }

    #[test]
    fn max_health_zero_floors_to_one() {
        let mut fx = Fixture::new();
        let mut cow = fx.spawn(EntityType::Cow);
        cow.update_bedrock_attributes(&[attribute(AttributeType::MaxHealth, 0.0)], &mut fx.client);

        assert_eq!(cow.max_health(), 1.0);
        let sent = fx.client.take();
        let updates = only_attributes(&sent);
        assert_eq!(updates.len(), 1);
        let health = &updates[0].attributes[0];
        assert_eq!(health.name, "minecraft:health");
        assert_eq!(health.max, 1.0);
        assert_eq!(health.default, 1.0);
    }

    #[test]
    fn movement_speed_reaches_vehicle() {
        let mut fx = Fixture::new();
        let mut horse = fx.spawn(EntityType::Horse);
        let mut speed = attribute(AttributeType::MovementSpeed, 0.2);
        speed.modifiers.push(AttributeModifier {
            id: "sprint".into(),
            amount: 0.5,
            operation: ModifierOperation::AddMultipliedTotal,
        });
        horse.update_bedrock_attributes(
            &[speed, attribute(AttributeType::Gravity, 0.04)],
            &mut fx.client,
        );

        let vehicle = horse.base.vehicle.as_ref().unwrap();
        assert!((vehicle.move_speed() - 0.3).abs() < 1e-6);
        assert_eq!(vehicle.gravity(), 0.04);

        let sent = fx.client.take();
        let updates = only_attributes(&sent);
        assert_eq!(updates[0].attributes.len(), 1);
        assert_eq!(updates[0].attributes[0].name, "minecraft:movement");
    }

    #[test]
    fn hand_swap_exchanges_raw_and_translated() {
        let mut fx = Fixture::new();
        let shield = ItemStack::new(fx.stored.shield.java_id, 1);
        let banner = ItemStack::new(fx.stored.banner.java_id, 1);
        let mut zombie = fx.spawn(EntityType::Zombie);
        zombie.set_equipment(EquipmentSlot::MainHand, shield.clone(), &mut fx.ctx(None));
        zombie.set_equipment(EquipmentSlot::OffHand, banner.clone(), &mut fx.ctx(None));
        let (hand, offhand) = (zombie.hand(), zombie.offhand());

        zombie.switch_hands();

        assert_eq!(zombie.equipment(EquipmentSlot::MainHand), Some(&banner));
        assert_eq!(zombie.equipment(EquipmentSlot::OffHand), Some(&shield));
        assert_eq!(zombie.hand(), offhand);
        assert_eq!(zombie.offhand(), hand);
    }

    #[test]
    fn hand_swap_with_one_empty_side() {
        let mut fx = Fixture::new();
        let shield = ItemStack::new(fx.stored.shield.java_id, 1);
        let mut zombie = fx.spawn(EntityType::Zombie);
        zombie.set_equipment(EquipmentSlot::MainHand, shield.clone(), &mut fx.ctx(None));

        zombie.switch_hands();

        assert!(zombie.equipment(EquipmentSlot::MainHand).is_none());
        assert_eq!(zombie.equipment(EquipmentSlot::OffHand), Some(&shield));
        assert!(zombie.hand().is_air());
        assert!(fx.stored.shield.matches(&zombie.offhand()));
    }

    #[test]
    fn helmet_banner_moves_to_empty_chestplate() {
        let mut fx = Fixture::new();
        let banner = ItemStack::new(fx.stored.banner.java_id, 1);
        let mut zombie = fx.spawn(EntityType::Zombie);
        zombie.set_equipment(EquipmentSlot::Helmet, banner, &mut fx.ctx(None));
        zombie.update_armor(&mut fx.ctx(None));

        let sent = fx.client.take();
        let BedrockPacket::MobArmorEquipment(armor) = &sent[0] else {
            panic!("expected MobArmorEquipment, got {sent:?}");
        };
        assert!(armor.helmet.is_air());
        assert!(fx.stored.banner.matches(&armor.chestplate));
    }

    #[test]
    fn chestplate_banner_is_hidden() {
        let mut fx = Fixture::new();
        let banner = ItemStack::new(fx.stored.banner.java_id, 1);
        let mut zombie = fx.spawn(EntityType::Zombie);
        zombie.set_equipment(EquipmentSlot::Chestplate, banner, &mut fx.ctx(None));
        zombie.update_armor(&mut fx.ctx(None));

        let sent = fx.client.take();
        let BedrockPacket::MobArmorEquipment(armor) = &sent[0] else {
            panic!("expected MobArmorEquipment");
        };
        assert!(armor.chestplate.is_air());
    }

    #[test]
    fn hand_packets_use_their_containers() {
        let mut fx = Fixture::new();
        let zombie = fx.spawn(EntityType::Zombie);
        zombie.update_main_hand(&mut fx.client);
        zombie.update_off_hand(&mut fx.client);

        let sent = fx.client.take();
        let containers: Vec<_> = sent
            .iter()
            .filter_map(|p| match p {
                BedrockPacket::MobEquipment(e) => Some((e.container_id, e.hotbar_slot)),
                _ => None,
            })
            .collect();
        assert_eq!(
            containers,
            vec![(ContainerId::Inventory, -1), (ContainerId::Offhand, -1)]
        );
    }

    #[test]
    fn saddle_sets_flag_and_refreshes_hint_when_looked_at() {
        let mut fx = Fixture::new();
        let saddle = ItemStack::new(fx.stored.saddle.java_id, 1).with_equippable(EquipmentSlot::Saddle);
        let mut horse = fx.spawn(EntityType::Horse);
        let runtime_id = horse.base.runtime_id;

        horse.set_equipment(EquipmentSlot::Saddle, saddle, &mut fx.ctx(Some(runtime_id)));

        assert!(horse.base.flag(EntityFlag::Saddled));
        let sent = fx.client.take();
        assert_eq!(sent.len(), 1);
        let BedrockPacket::SetEntityData(data) = &sent[0] else {
            panic!("expected SetEntityData");
        };
        assert_eq!(
            data.metadata.get(&EntityDataKey::InteractText),
            Some(&MetadataValue::String("action.interact.ride".into()))
        );

        horse.set_equipment(EquipmentSlot::Saddle, ItemStack::empty(), &mut fx.ctx(None));
        assert!(!horse.base.flag(EntityFlag::Saddled));
    }

    #[test]
    fn shield_use_blocks_instead_of_using_item() {
        let mut fx = Fixture::new();
        let shield = ItemStack::new(fx.stored.shield.java_id, 1);
        let mut zombie = fx.spawn(EntityType::Zombie);
        zombie.set_equipment(EquipmentSlot::OffHand, shield, &mut fx.ctx(None));

        zombie.set_living_flags(0x01 | 0x02, &fx.stored);
        assert!(zombie.base.flag(EntityFlag::Blocking));
        assert!(!zombie.base.flag(EntityFlag::UsingItem));
        assert!(zombie.base.flag(EntityFlag::Emerging));

        zombie.set_living_flags(0x01 | 0x04, &fx.stored);
        assert!(zombie.base.flag(EntityFlag::UsingItem));
        assert!(!zombie.base.flag(EntityFlag::Blocking));
        assert!(zombie.base.flag(EntityFlag::DamageNearbyMobs));
    }

    #[test]
    fn particle_colours_average() {
        let mut fx = Fixture::new();
        let mut cow = fx.spawn(EntityType::Cow);
        cow.set_particles(&[
            Particle::entity_effect(0xFF0000),
            Particle::entity_effect(0x0000FF),
            Particle {
                kind: ParticleType::Flame,
                color: None,
            },
        ]);
        let expected = (127 << 16) | 127;
        assert_eq!(
            cow.base.dirty().get(EntityDataKey::EffectColor),
            Some(&MetadataValue::Int(expected))
        );

        cow.set_particles(&[]);
        assert_eq!(
            cow.base.dirty().get(EntityDataKey::EffectColor),
            Some(&MetadataValue::Int(0))
        );
    }

    #[test]
    fn full_freeze_shakes() {
        let mut fx = Fixture::new();
        let mut cow = fx.spawn(EntityType::Cow);
        cow.set_freezing(140);
        assert!(cow.is_max_frozen());
        assert!(cow.base.flag(EntityFlag::Shaking));
        cow.set_freezing(10);
        assert!(!cow.base.flag(EntityFlag::Shaking));
    }

    #[test]
    fn sleeping_pose_shrinks_bounding_box() {
        let mut fx = Fixture::new();
        let mut villager = fx.spawn(EntityType::Villager);
        villager.set_pose(Pose::Sleeping);
        assert_eq!(villager.base.bounding_box(), (0.2, 0.2));
        assert!(villager.base.flag(EntityFlag::Sleeping));
        villager.set_pose(Pose::Standing);
        assert_eq!(villager.base.bounding_box(), (0.6, 1.95));
    }

    #[test]
    fn client_controlled_vehicle_ignores_relative_moves() {
        let mut fx = Fixture::new();
        let mut horse = fx.spawn(EntityType::Horse);
        horse
            .base
            .vehicle
            .as_mut()
            .unwrap()
            .set_client_controlled(true);
        horse.move_relative(5.0, 0.0, 0.0, true, &mut fx.client);
        assert_eq!(horse.base.position, Vec3::ZERO);
        assert!(fx.client.take().is_empty());
    }
}
