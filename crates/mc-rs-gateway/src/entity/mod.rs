//! Per-session projection of backend entities onto the Bedrock client.
//!
//! Each entity accumulates changes in a [`DirtyMetadata`] map and flushes
//! them as one `SetEntityData` packet per update. Equipment, hand items and
//! health bypass the map and always send their own packets.

pub mod cache;
pub mod living;
pub mod metadata;
pub mod vehicle;

pub use cache::{EntityCache, SessionEntity};
pub use living::LivingEntity;
pub use vehicle::VehicleComponent;

use mc_rs_proto::bedrock::{
    AddActor, EntityDataKey, EntityDataMap, EntityFlag, EntityFlags, MetadataValue,
    MoveActorAbsolute, RemoveEntity, SetEntityData,
};
use mc_rs_proto::java::Pose;
use mc_rs_proto::types::{Uuid, Vec3};

use crate::mappings::{EntityDefinition, ItemTranslator, StoredItems};
use crate::session::ClientEndpoint;

/// Ticks of powder snow contact at which an entity is fully frozen.
pub const TICKS_REQUIRED_TO_FREEZE: i32 = 140;

/// Session services an entity needs while applying an update.
pub struct EntityContext<'a> {
    pub upstream: &'a mut dyn ClientEndpoint,
    pub items: &'a dyn ItemTranslator,
    pub stored: &'a StoredItems,
    /// Runtime ID of the entity under the client's crosshair.
    pub mouseover: Option<u64>,
}

/// Pending Bedrock entity data, coalesced until the next flush.
#[derive(Debug, Default)]
pub struct DirtyMetadata {
    values: EntityDataMap,
}

impl DirtyMetadata {
    pub fn put(&mut self, key: EntityDataKey, value: impl Into<MetadataValue>) {
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: EntityDataKey) -> Option<&MetadataValue> {
        self.values.get(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn take(&mut self) -> EntityDataMap {
        std::mem::take(&mut self.values)
    }
}

/// Base state shared by every entity kind.
#[derive(Debug)]
pub struct Entity {
    pub entity_id: i32,
    pub runtime_id: u64,
    pub uuid: Uuid,
    pub definition: EntityDefinition,
    pub position: Vec3,
    pub motion: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub head_yaw: f32,
    pub on_ground: bool,
    /// Present when the client may drive this entity.
    pub vehicle: Option<VehicleComponent>,
    flags: EntityFlags,
    flags_dirty: bool,
    dirty: DirtyMetadata,
    bounding_box_width: f32,
    bounding_box_height: f32,
    valid: bool,
}

impl Entity {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        entity_id: i32,
        runtime_id: u64,
        uuid: Uuid,
        definition: EntityDefinition,
        position: Vec3,
        motion: Vec3,
        yaw: f32,
        pitch: f32,
        head_yaw: f32,
    ) -> Self {
        let vehicle = definition.vehicle.map(|kind| {
            VehicleComponent::new(kind, definition.width, definition.height, position)
        });
        let mut entity = Self {
            entity_id,
            runtime_id,
            uuid,
            definition,
            position,
            motion,
            yaw,
            pitch,
            head_yaw,
            on_ground: false,
            vehicle,
            flags: EntityFlags::default(),
            flags_dirty: false,
            dirty: DirtyMetadata::default(),
            bounding_box_width: definition.width,
            bounding_box_height: definition.height,
            valid: false,
        };
        entity.initialize_metadata();
        entity
    }

    fn initialize_metadata(&mut self) {
        self.set_flag(EntityFlag::HasGravity, true);
        self.set_flag(EntityFlag::HasCollision, true);
        self.set_flag(EntityFlag::CanShowName, true);
        self.set_flag(EntityFlag::CanClimb, true);
        self.dirty.put(EntityDataKey::AirSupply, MetadataValue::Short(300));
        self.dirty.put(EntityDataKey::Scale, 1.0f32);
        self.dirty
            .put(EntityDataKey::BoundingBoxWidth, self.bounding_box_width);
        self.dirty
            .put(EntityDataKey::BoundingBoxHeight, self.bounding_box_height);
    }

    /// Spawned on the client and not yet despawned.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn flag(&self, flag: EntityFlag) -> bool {
        self.flags.get(flag)
    }

    pub fn set_flag(&mut self, flag: EntityFlag, value: bool) {
        if self.flags.get(flag) != value {
            self.flags.set(flag, value);
            self.flags_dirty = true;
        }
    }

    pub fn dirty(&self) -> &DirtyMetadata {
        &self.dirty
    }

    pub fn dirty_mut(&mut self) -> &mut DirtyMetadata {
        &mut self.dirty
    }

    fn collect_metadata(&mut self) -> EntityDataMap {
        if self.flags_dirty {
            self.dirty.put(EntityDataKey::Flags, MetadataValue::Long(self.flags.low()));
            self.dirty.put(EntityDataKey::Flags2, MetadataValue::Long(self.flags.high()));
            self.flags_dirty = false;
        }
        self.dirty.take()
    }

    /// Send the client everything needed to show this entity.
    pub fn spawn(&mut self, upstream: &mut dyn ClientEndpoint) {
        self.flags_dirty = true;
        let packet = AddActor {
            unique_entity_id: self.runtime_id as i64,
            runtime_entity_id: self.runtime_id,
            identifier: self.definition.identifier.to_string(),
            position: self.position,
            motion: self.motion,
            pitch: self.pitch,
            yaw: self.yaw,
            head_yaw: self.head_yaw,
            attributes: Vec::new(),
            metadata: self.collect_metadata(),
        };
        upstream.send(packet.into());
        self.valid = true;
    }

    pub fn despawn(&mut self, upstream: &mut dyn ClientEndpoint) {
        if self.valid {
            upstream.send(
                RemoveEntity {
                    unique_entity_id: self.runtime_id as i64,
                }
                .into(),
            );
        }
        self.valid = false;
    }

    /// Flush pending entity data. Returns whether a packet was sent.
    pub fn update_bedrock_metadata(&mut self, upstream: &mut dyn ClientEndpoint) -> bool {
        if !self.valid {
            return false;
        }
        let metadata = self.collect_metadata();
        if metadata.is_empty() {
            return false;
        }
        upstream.send(
            SetEntityData {
                runtime_entity_id: self.runtime_id,
                metadata,
                tick: 0,
            }
            .into(),
        );
        true
    }

    pub fn move_relative(
        &mut self,
        dx: f64,
        dy: f64,
        dz: f64,
        on_ground: bool,
        upstream: &mut dyn ClientEndpoint,
    ) {
        self.position = self.position + Vec3::from_f64(dx, dy, dz);
        self.on_ground = on_ground;
        if !self.valid {
            return;
        }
        upstream.send(
            MoveActorAbsolute {
                runtime_entity_id: self.runtime_id,
                position: self.position,
                pitch: self.pitch,
                yaw: self.yaw,
                head_yaw: self.head_yaw,
                on_ground,
            }
            .into(),
        );
    }

    pub fn bounding_box(&self) -> (f32, f32) {
        (self.bounding_box_width, self.bounding_box_height)
    }

    /// Returns whether the width changed. Mirrored to the vehicle.
    pub fn set_bounding_box_width(&mut self, width: f32) -> bool {
        if self.valid {
            if let Some(vehicle) = self.vehicle.as_mut() {
                vehicle.set_width(width);
            }
        }
        if width == self.bounding_box_width {
            return false;
        }
        self.bounding_box_width = width;
        self.dirty.put(EntityDataKey::BoundingBoxWidth, width);
        true
    }

    /// Returns whether the height changed. Mirrored to the vehicle.
    pub fn set_bounding_box_height(&mut self, height: f32) -> bool {
        if self.valid {
            if let Some(vehicle) = self.vehicle.as_mut() {
                vehicle.set_height(height);
            }
        }
        if height == self.bounding_box_height {
            return false;
        }
        self.bounding_box_height = height;
        self.dirty.put(EntityDataKey::BoundingBoxHeight, height);
        true
    }

    pub fn set_dimensions_from_pose(&mut self, _pose: Pose) {
        self.set_bounding_box_width(self.definition.width);
        self.set_bounding_box_height(self.definition.height);
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.set_flag(EntityFlag::Sleeping, pose == Pose::Sleeping);
        self.set_flag(EntityFlag::Swimming, pose == Pose::Swimming);
    }

    /// Java shared flags byte (index 0).
    pub fn set_shared_flags(&mut self, flags: i8) {
        let flags = flags as u8;
        self.set_flag(EntityFlag::OnFire, flags & 0x01 != 0);
        self.set_flag(EntityFlag::Sneaking, flags & 0x02 != 0);
        self.set_flag(EntityFlag::Sprinting, flags & 0x08 != 0);
        self.set_flag(EntityFlag::Swimming, flags & 0x10 != 0);
        self.set_flag(EntityFlag::Invisible, flags & 0x20 != 0);
    }

    pub fn set_air_supply(&mut self, air: i32) {
        let air = air.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        self.dirty.put(EntityDataKey::AirSupply, MetadataValue::Short(air));
    }

    pub fn set_custom_name(&mut self, name: Option<&str>) {
        self.dirty
            .put(EntityDataKey::Name, name.unwrap_or_default().to_string());
    }

    pub fn set_name_visible(&mut self, visible: bool) {
        self.set_flag(EntityFlag::AlwaysShowName, visible);
    }

    pub fn set_silent(&mut self, silent: bool) {
        self.set_flag(EntityFlag::Silent, silent);
    }

    pub fn set_no_gravity(&mut self, no_gravity: bool) {
        self.set_flag(EntityFlag::HasGravity, !no_gravity);
    }

    /// Returns the freezing percentage, `0.0..=1.0`.
    pub fn set_freezing(&mut self, frozen_ticks: i32) -> f32 {
        let percentage =
            frozen_ticks.clamp(0, TICKS_REQUIRED_TO_FREEZE) as f32 / TICKS_REQUIRED_TO_FREEZE as f32;
        self.dirty
            .put(EntityDataKey::FreezingEffectStrength, percentage);
        percentage
    }

    /// Hint shown when the client looks at this entity.
    pub fn interactive_tag(&self) -> &'static str {
        if self.vehicle.is_some() && self.flag(EntityFlag::Saddled) {
            "action.interact.ride"
        } else {
            ""
        }
    }

    pub fn update_interactive_tag(&mut self) {
        let tag = self.interactive_tag();
        self.dirty.put(EntityDataKey::InteractText, tag.to_string());
    }
}
