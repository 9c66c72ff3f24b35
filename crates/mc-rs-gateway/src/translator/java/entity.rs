use mc_rs_proto::java::{
    AddEntity, EntityEvent, EquipmentSlot, MoveEntityPos, RemoveEntities, SetEntityData,
    SetEquipment, SetPassengers, UpdateAttributes,
};
use mc_rs_proto::types::Vec3;
use tracing::debug;

use crate::entity::metadata::apply_metadata;
use crate::entity::{Entity, LivingEntity, SessionEntity};
use crate::error::TranslateError;
use crate::mappings::definition;
use crate::session::Session;

pub(super) fn add_entity(session: &mut Session, packet: &AddEntity) -> Result<(), TranslateError> {
    let Some(definition) = definition(packet.entity_type) else {
        debug!(
            "No Bedrock entity for {:?} (id {})",
            packet.entity_type, packet.entity_id
        );
        return Ok(());
    };

    let (entities, ctx) = session.entity_parts();
    if let Some(mut previous) = entities.remove_by_java(packet.entity_id) {
        previous.base_mut().despawn(ctx.upstream);
    }

    let runtime_id = entities.allocate_runtime_id();
    let base = Entity::new(
        packet.entity_id,
        runtime_id,
        packet.uuid,
        definition,
        Vec3::from_f64(packet.x, packet.y, packet.z),
        Vec3::from_f64(packet.motion_x, packet.motion_y, packet.motion_z),
        packet.yaw,
        packet.pitch,
        packet.head_yaw,
    );
    let mut entity = if definition.living {
        SessionEntity::Living(LivingEntity::new(base))
    } else {
        SessionEntity::Basic(base)
    };
    entity.base_mut().spawn(ctx.upstream);
    entities.add(entity);
    Ok(())
}

pub(super) fn remove_entities(
    session: &mut Session,
    packet: &RemoveEntities,
) -> Result<(), TranslateError> {
    let mouseover = session.mouseover;
    let mut lost_mouseover = false;
    let (entities, ctx) = session.entity_parts();
    for &entity_id in &packet.entity_ids {
        let Some(mut entity) = entities.remove_by_java(entity_id) else {
            continue;
        };
        lost_mouseover |= mouseover == Some(entity.base().runtime_id);
        entity.base_mut().despawn(ctx.upstream);
    }
    if lost_mouseover {
        session.mouseover = None;
    }
    Ok(())
}

pub(super) fn move_entity_pos(
    session: &mut Session,
    packet: &MoveEntityPos,
) -> Result<(), TranslateError> {
    let (entities, ctx) = session.entity_parts();
    let Some(entity) = entities.get_by_java_mut(packet.entity_id) else {
        debug!("Move for unknown entity {}", packet.entity_id);
        return Ok(());
    };
    entity.move_relative(
        packet.delta_x,
        packet.delta_y,
        packet.delta_z,
        packet.on_ground,
        ctx.upstream,
    );
    Ok(())
}

pub(super) fn set_entity_data(
    session: &mut Session,
    packet: &SetEntityData,
) -> Result<(), TranslateError> {
    let (entities, mut ctx) = session.entity_parts();
    let Some(entity) = entities.get_by_java_mut(packet.entity_id) else {
        debug!("Entity data for unknown entity {}", packet.entity_id);
        return Ok(());
    };
    apply_metadata(entity, &packet.metadata, &mut ctx);
    entity.base_mut().update_bedrock_metadata(ctx.upstream);
    Ok(())
}

pub(super) fn set_equipment(
    session: &mut Session,
    packet: &SetEquipment,
) -> Result<(), TranslateError> {
    let (entities, mut ctx) = session.entity_parts();
    let Some(entity) = entities.get_by_java_mut(packet.entity_id) else {
        debug!("Equipment for unknown entity {}", packet.entity_id);
        return Ok(());
    };
    let Some(living) = entity.as_living_mut() else {
        debug!("Equipment for non-living entity {}", packet.entity_id);
        return Ok(());
    };

    let (mut armor, mut main_hand, mut off_hand) = (false, false, false);
    for equipment in &packet.equipment {
        match equipment.slot {
            EquipmentSlot::MainHand => main_hand = true,
            EquipmentSlot::OffHand => off_hand = true,
            EquipmentSlot::Saddle => {}
            _ => armor = true,
        }
        living.set_equipment(equipment.slot, equipment.item.clone(), &mut ctx);
    }

    if armor {
        living.update_armor(&mut ctx);
    }
    if main_hand {
        living.update_main_hand(ctx.upstream);
    }
    if off_hand {
        living.update_off_hand(ctx.upstream);
    }
    Ok(())
}

pub(super) fn update_attributes(
    session: &mut Session,
    packet: &UpdateAttributes,
) -> Result<(), TranslateError> {
    let (entities, ctx) = session.entity_parts();
    let Some(living) = entities
        .get_by_java_mut(packet.entity_id)
        .and_then(SessionEntity::as_living_mut)
    else {
        debug!("Attributes for unknown or non-living entity {}", packet.entity_id);
        return Ok(());
    };
    living.update_bedrock_attributes(&packet.attributes, ctx.upstream);
    Ok(())
}

pub(super) fn entity_event(
    session: &mut Session,
    packet: &EntityEvent,
) -> Result<(), TranslateError> {
    if packet.status != EntityEvent::SWAP_HANDS {
        return Ok(());
    }
    let (entities, ctx) = session.entity_parts();
    let Some(living) = entities
        .get_by_java_mut(packet.entity_id)
        .and_then(SessionEntity::as_living_mut)
    else {
        debug!("Hand swap for unknown or non-living entity {}", packet.entity_id);
        return Ok(());
    };
    living.switch_hands();
    living.update_main_hand(ctx.upstream);
    living.update_off_hand(ctx.upstream);
    Ok(())
}

/// The client steers a vehicle while its player is the first passenger.
pub(super) fn set_passengers(
    session: &mut Session,
    packet: &SetPassengers,
) -> Result<(), TranslateError> {
    let driver = packet.passenger_ids.first().copied();
    let controlled = driver.is_some() && driver == session.player.entity_id;
    let name = session.display_name();

    let (entities, _) = session.entity_parts();
    let Some(entity) = entities.get_by_java_mut(packet.vehicle_id) else {
        debug!("Passengers for unknown entity {}", packet.vehicle_id);
        return Ok(());
    };
    let Some(vehicle) = entity.base_mut().vehicle.as_mut() else {
        return Ok(());
    };
    if vehicle.is_client_controlled() != controlled {
        debug!(
            "{name} {} control of vehicle {}",
            if controlled { "took" } else { "released" },
            packet.vehicle_id
        );
    }
    vehicle.set_client_controlled(controlled);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestSession;
    use crate::translator::Translators;
    use mc_rs_proto::bedrock::{BedrockPacket, ContainerId, EntityDataKey, EntityFlag};
    use mc_rs_proto::java::{
        Attribute, AttributeType, ClientboundPacket, EntityMetadata, EntityType, Equipment,
        ItemStack, JoinGame, MetadataValue,
    };
    use mc_rs_proto::types::Uuid;

    fn add(entity_id: i32, entity_type: EntityType) -> AddEntity {
        AddEntity {
            entity_id,
            uuid: Uuid::new(0, entity_id as u64),
            entity_type,
            x: 1.0,
            y: 64.0,
            z: 1.0,
            motion_x: 0.0,
            motion_y: 0.0,
            motion_z: 0.0,
            yaw: 90.0,
            pitch: 0.0,
            head_yaw: 90.0,
        }
    }

    fn runtime_id(test: &mut TestSession, entity_id: i32) -> u64 {
        test.session
            .entities
            .get_by_java_mut(entity_id)
            .unwrap()
            .base()
            .runtime_id
    }

    #[test]
    fn spawn_and_respawn() {
        let mut test = TestSession::playing();
        add_entity(&mut test.session, &add(10, EntityType::Cow)).unwrap();
        let first = runtime_id(&mut test, 10);
        assert!(matches!(
            test.client.take().as_slice(),
            [BedrockPacket::AddActor(a)] if a.identifier == "minecraft:cow"
        ));

        add_entity(&mut test.session, &add(10, EntityType::Pig)).unwrap();
        let sent = test.client.take();
        assert!(matches!(
            sent.as_slice(),
            [BedrockPacket::RemoveEntity(r), BedrockPacket::AddActor(a)]
                if r.unique_entity_id == first as i64 && a.identifier == "minecraft:pig"
        ));
        assert_eq!(test.session.entities.len(), 1);
        assert_ne!(runtime_id(&mut test, 10), first);
    }

    #[test]
    fn unknown_types_are_skipped() {
        let mut test = TestSession::playing();
        add_entity(&mut test.session, &add(11, EntityType::Other(999))).unwrap();
        assert!(test.client.take().is_empty());
        assert!(test.session.entities.is_empty());
    }

    #[test]
    fn removal_clears_mouseover() {
        let mut test = TestSession::playing();
        add_entity(&mut test.session, &add(12, EntityType::Horse)).unwrap();
        test.session.mouseover = Some(runtime_id(&mut test, 12));
        test.client.take();

        let packet = RemoveEntities {
            entity_ids: vec![12, 99],
        };
        remove_entities(&mut test.session, &packet).unwrap();
        assert!(test.session.mouseover.is_none());
        assert!(test.session.entities.is_empty());
        assert_eq!(test.client.take().len(), 1);
    }

    #[test]
    fn entity_data_flushes_once() {
        let mut test = TestSession::playing();
        add_entity(&mut test.session, &add(13, EntityType::Zombie)).unwrap();
        test.client.take();

        let packet = SetEntityData {
            entity_id: 13,
            metadata: vec![
                EntityMetadata::new(0, MetadataValue::Byte(0x01)),
                EntityMetadata::new(2, MetadataValue::String("Bob".into())),
                EntityMetadata::new(16, MetadataValue::Boolean(true)),
            ],
        };
        set_entity_data(&mut test.session, &packet).unwrap();
        let sent = test.client.take();
        let [BedrockPacket::SetEntityData(data)] = sent.as_slice() else {
            panic!("expected one SetEntityData, got {sent:?}");
        };
        assert!(data.metadata.contains_key(&EntityDataKey::Name));
        assert!(data.metadata.contains_key(&EntityDataKey::Scale));
        assert!(test
            .session
            .entities
            .get_by_java_mut(13)
            .unwrap()
            .base()
            .flag(EntityFlag::OnFire));
    }

    #[test]
    fn equipment_sends_armor_and_hands() {
        let mut test = TestSession::playing();
        add_entity(&mut test.session, &add(14, EntityType::Skeleton)).unwrap();
        test.client.take();
        let stored = test.session.context().stored;

        let packet = SetEquipment {
            entity_id: 14,
            equipment: vec![
                Equipment {
                    slot: EquipmentSlot::Helmet,
                    item: ItemStack::new(stored.banner.java_id, 1),
                },
                Equipment {
                    slot: EquipmentSlot::OffHand,
                    item: ItemStack::new(stored.shield.java_id, 1),
                },
            ],
        };
        set_equipment(&mut test.session, &packet).unwrap();
        let sent = test.client.take();
        let [BedrockPacket::MobArmorEquipment(armor), BedrockPacket::MobEquipment(hand)] =
            sent.as_slice()
        else {
            panic!("unexpected {sent:?}");
        };
        assert!(armor.helmet.is_air());
        assert!(stored.banner.matches(&armor.chestplate));
        assert!(stored.shield.matches(&hand.item));
    }

    #[test]
    fn attributes_reach_living_entities() {
        let mut test = TestSession::playing();
        add_entity(&mut test.session, &add(15, EntityType::Cow)).unwrap();
        add_entity(&mut test.session, &add(16, EntityType::Item)).unwrap();
        test.client.take();

        let packet = UpdateAttributes {
            entity_id: 15,
            attributes: vec![Attribute::new(AttributeType::MaxHealth, 10.0)],
        };
        update_attributes(&mut test.session, &packet).unwrap();
        assert!(matches!(
            test.client.take().as_slice(),
            [BedrockPacket::UpdateAttributes(u)] if u.attributes[0].max == 10.0
        ));

        let item = UpdateAttributes {
            entity_id: 16,
            ..packet
        };
        update_attributes(&mut test.session, &item).unwrap();
        assert!(test.client.take().is_empty());
    }

    #[test]
    fn hand_swap_event_resends_both_hands() {
        let translators = Translators::new().unwrap();
        let mut test = TestSession::playing();
        add_entity(&mut test.session, &add(17, EntityType::Zombie)).unwrap();
        let stored = test.session.context().stored;
        let equip = SetEquipment {
            entity_id: 17,
            equipment: vec![Equipment {
                slot: EquipmentSlot::MainHand,
                item: ItemStack::new(stored.shield.java_id, 1),
            }],
        };
        set_equipment(&mut test.session, &equip).unwrap();
        test.client.take();

        let hurt = EntityEvent {
            entity_id: 17,
            status: 2,
        };
        assert!(translators.java.translate(&mut test.session, &hurt.into()));
        assert!(test.client.take().is_empty());

        let swap = EntityEvent {
            entity_id: 17,
            status: EntityEvent::SWAP_HANDS,
        };
        assert!(translators.java.translate(&mut test.session, &swap.into()));
        let sent = test.client.take();
        let [BedrockPacket::MobEquipment(main), BedrockPacket::MobEquipment(off)] =
            sent.as_slice()
        else {
            panic!("expected both hands, got {sent:?}");
        };
        assert!(main.item.is_air());
        assert_eq!(main.container_id, ContainerId::Inventory);
        assert!(stored.shield.matches(&off.item));
        assert_eq!(off.container_id, ContainerId::Offhand);
    }

    #[test]
    fn riding_as_first_passenger_takes_control() {
        let translators = Translators::new().unwrap();
        let mut test = TestSession::playing();
        let join: ClientboundPacket = JoinGame { entity_id: 1 }.into();
        assert!(translators.java.translate(&mut test.session, &join));
        add_entity(&mut test.session, &add(18, EntityType::Horse)).unwrap();
        test.client.take();

        let mount = SetPassengers {
            vehicle_id: 18,
            passenger_ids: vec![1],
        };
        assert!(translators.java.translate(&mut test.session, &mount.into()));
        let step = MoveEntityPos {
            entity_id: 18,
            delta_x: 1.0,
            delta_y: 0.0,
            delta_z: 0.0,
            on_ground: true,
        };
        assert!(translators.java.translate(&mut test.session, &step.clone().into()));
        assert!(test.client.take().is_empty());

        let behind_someone = SetPassengers {
            vehicle_id: 18,
            passenger_ids: vec![40, 1],
        };
        assert!(translators.java.translate(&mut test.session, &behind_someone.into()));
        assert!(translators.java.translate(&mut test.session, &step.into()));
        assert!(matches!(
            test.client.take().as_slice(),
            [BedrockPacket::MoveActorAbsolute(_)]
        ));
    }
}
