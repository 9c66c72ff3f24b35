//! Session-scoped entity table keyed by Bedrock runtime ID.

use std::collections::HashMap;

use mc_rs_proto::java::Pose;

use super::{Entity, LivingEntity};
use crate::session::ClientEndpoint;

/// Runtime ID reserved for the session's own player.
pub const PLAYER_RUNTIME_ID: u64 = 1;

/// An entity known to one session.
#[derive(Debug)]
pub enum SessionEntity {
    Basic(Entity),
    Living(LivingEntity),
}

impl SessionEntity {
    pub fn base(&self) -> &Entity {
        match self {
            Self::Basic(entity) => entity,
            Self::Living(living) => &living.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut Entity {
        match self {
            Self::Basic(entity) => entity,
            Self::Living(living) => &mut living.base,
        }
    }

    pub fn as_living_mut(&mut self) -> Option<&mut LivingEntity> {
        match self {
            Self::Living(living) => Some(living),
            Self::Basic(_) => None,
        }
    }

    pub fn set_pose(&mut self, pose: Pose) {
        match self {
            Self::Basic(entity) => {
                entity.set_pose(pose);
                entity.set_dimensions_from_pose(pose);
            }
            Self::Living(living) => living.set_pose(pose),
        }
    }

    pub fn set_freezing(&mut self, frozen_ticks: i32) -> f32 {
        match self {
            Self::Basic(entity) => entity.set_freezing(frozen_ticks),
            Self::Living(living) => living.set_freezing(frozen_ticks),
        }
    }

    pub fn move_relative(
        &mut self,
        dx: f64,
        dy: f64,
        dz: f64,
        on_ground: bool,
        upstream: &mut dyn ClientEndpoint,
    ) {
        match self {
            Self::Basic(entity) => entity.move_relative(dx, dy, dz, on_ground, upstream),
            Self::Living(living) => living.move_relative(dx, dy, dz, on_ground, upstream),
        }
    }
}

#[derive(Debug)]
pub struct EntityCache {
    entities: HashMap<u64, SessionEntity>,
    by_java_id: HashMap<i32, u64>,
    next_runtime_id: u64,
}

impl Default for EntityCache {
    fn default() -> Self {
        Self {
            entities: HashMap::new(),
            by_java_id: HashMap::new(),
            next_runtime_id: PLAYER_RUNTIME_ID + 1,
        }
    }
}

impl EntityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_runtime_id(&mut self) -> u64 {
        let id = self.next_runtime_id;
        self.next_runtime_id += 1;
        id
    }

    /// Track an entity. A previous entity with the same Java ID is
    /// returned so the caller can despawn it.
    pub fn add(&mut self, entity: SessionEntity) -> Option<SessionEntity> {
        let base = entity.base();
        let (java_id, runtime_id) = (base.entity_id, base.runtime_id);
        let previous = self
            .by_java_id
            .insert(java_id, runtime_id)
            .and_then(|old| self.entities.remove(&old));
        self.entities.insert(runtime_id, entity);
        previous
    }

    pub fn get_by_java_mut(&mut self, java_id: i32) -> Option<&mut SessionEntity> {
        let runtime_id = self.by_java_id.get(&java_id)?;
        self.entities.get_mut(runtime_id)
    }

    pub fn get_by_runtime_mut(&mut self, runtime_id: u64) -> Option<&mut SessionEntity> {
        self.entities.get_mut(&runtime_id)
    }

    pub fn remove_by_java(&mut self, java_id: i32) -> Option<SessionEntity> {
        let runtime_id = self.by_java_id.remove(&java_id)?;
        self.entities.remove(&runtime_id)
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.by_java_id.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
