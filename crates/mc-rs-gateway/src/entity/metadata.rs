//! Java entity data entries applied to session entities by index.

use mc_rs_proto::bedrock::EntityFlag;
use mc_rs_proto::java::{EntityMetadata, MetadataValue};
use tracing::debug;

use super::{EntityContext, SessionEntity};

/// Apply one batch of Java entity data. The caller flushes afterwards;
/// only health is sent from here, since it is an attribute on Bedrock.
pub fn apply_metadata(
    entity: &mut SessionEntity,
    entries: &[EntityMetadata],
    ctx: &mut EntityContext<'_>,
) {
    for entry in entries {
        if !apply_entry(entity, entry, ctx) {
            debug!(
                "Ignoring entity data index {} ({:?}) for {}",
                entry.index,
                entry.value,
                entity.base().definition.identifier
            );
        }
    }
}

/// Returns false when the entry has no effect on this entity.
fn apply_entry(
    entity: &mut SessionEntity,
    entry: &EntityMetadata,
    ctx: &mut EntityContext<'_>,
) -> bool {
    use MetadataValue as V;

    match (entry.index, &entry.value) {
        (0, V::Byte(flags)) => entity.base_mut().set_shared_flags(*flags),
        (1, V::Int(air)) => entity.base_mut().set_air_supply(*air),
        (2, V::String(name)) => entity.base_mut().set_custom_name(Some(name.as_str())),
        (3, V::Boolean(visible)) => entity.base_mut().set_name_visible(*visible),
        (4, V::Boolean(silent)) => entity.base_mut().set_silent(*silent),
        (5, V::Boolean(no_gravity)) => entity.base_mut().set_no_gravity(*no_gravity),
        (6, V::Pose(pose)) => entity.set_pose(*pose),
        (7, V::Int(ticks)) => {
            entity.set_freezing(*ticks);
        }
        _ => {
            let Some(living) = entity.as_living_mut() else {
                return false;
            };
            match (entry.index, &entry.value) {
                (8, V::Byte(flags)) => living.set_living_flags(*flags, ctx.stored),
                (9, V::Float(health)) => living.set_health(*health, ctx.upstream),
                (10, V::Particles(particles)) => living.set_particles(particles),
                (14, V::OptionalPosition(position)) => living.set_bed_position(*position),
                (15, V::Byte(flags)) => {
                    living.base.set_flag(EntityFlag::NoAi, *flags as u8 & 0x01 != 0)
                }
                (16, V::Boolean(baby)) if living.base.definition.ageable => living.set_baby(*baby),
                _ => return false,
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, LivingEntity};
    use crate::mappings::{definition, MappedItemTranslator, StoredItems};
    use crate::testing::RecordingClient;
    use mc_rs_proto::bedrock::{BedrockPacket, EntityDataKey, MetadataValue as BedrockValue};
    use mc_rs_proto::java::{EntityType, Pose};
    use mc_rs_proto::types::{BlockPos, Uuid, Vec3};

    fn spawned(entity_type: EntityType, client: &mut RecordingClient) -> SessionEntity {
        let def = definition(entity_type).unwrap();
        let base = Entity::new(1, 2, Uuid::ZERO, def, Vec3::ZERO, Vec3::ZERO, 0.0, 0.0, 0.0);
        let mut entity = if def.living {
            SessionEntity::Living(LivingEntity::new(base))
        } else {
            SessionEntity::Basic(base)
        };
        entity.base_mut().spawn(client);
        client.take();
        entity
    }

    #[test]
    fn shared_and_living_entries() {
        let mut client = RecordingClient::default();
        let stored = StoredItems::default();
        let items = MappedItemTranslator::new(&stored);
        let mut cow = spawned(EntityType::Cow, &mut client);

        let entries = [
            EntityMetadata::new(0, MetadataValue::Byte(0x02)),
            EntityMetadata::new(2, MetadataValue::String("Daisy".into())),
            EntityMetadata::new(14, MetadataValue::OptionalPosition(Some(BlockPos::new(1, 2, 3)))),
            EntityMetadata::new(16, MetadataValue::Boolean(true)),
            EntityMetadata::new(9, MetadataValue::Float(4.2)),
        ];
        let mut ctx = EntityContext {
            upstream: &mut client,
            items: &items,
            stored: &stored,
            mouseover: None,
        };
        apply_metadata(&mut cow, &entries, &mut ctx);

        let base = cow.base();
        assert!(base.flag(EntityFlag::Sneaking));
        assert!(base.flag(EntityFlag::Baby));
        assert_eq!(
            base.dirty().get(EntityDataKey::Name),
            Some(&BedrockValue::String("Daisy".into()))
        );
        assert_eq!(
            base.dirty().get(EntityDataKey::BedPosition),
            Some(&BedrockValue::BlockPos(BlockPos::new(1, 2, 3)))
        );

        // Health goes out on its own; everything else waits for the flush.
        let sent = client.take();
        assert_eq!(sent.len(), 1);
        let BedrockPacket::UpdateAttributes(update) = &sent[0] else {
            panic!("expected UpdateAttributes, got {sent:?}");
        };
        assert_eq!(update.attributes[0].value, 5.0);
    }

    #[test]
    fn living_entries_skip_plain_entities() {
        let mut client = RecordingClient::default();
        let stored = StoredItems::default();
        let items = MappedItemTranslator::new(&stored);
        let mut item = spawned(EntityType::Item, &mut client);

        let entries = [
            EntityMetadata::new(9, MetadataValue::Float(1.0)),
            EntityMetadata::new(6, MetadataValue::Pose(Pose::Swimming)),
        ];
        let mut ctx = EntityContext {
            upstream: &mut client,
            items: &items,
            stored: &stored,
            mouseover: None,
        };
        apply_metadata(&mut item, &entries, &mut ctx);

        assert!(item.base().flag(EntityFlag::Swimming));
        assert!(client.take().is_empty());
    }

    #[test]
    fn mismatched_value_types_are_ignored() {
        let mut client = RecordingClient::default();
        let stored = StoredItems::default();
        let items = MappedItemTranslator::new(&stored);
        let mut zombie = spawned(EntityType::Zombie, &mut client);

        let entries = [EntityMetadata::new(0, MetadataValue::Int(0x01))];
        let mut ctx = EntityContext {
            upstream: &mut client,
            items: &items,
            stored: &stored,
            mouseover: None,
        };
        apply_metadata(&mut zombie, &entries, &mut ctx);
        assert!(!zombie.base().flag(EntityFlag::OnFire));
    }
}
