//! Physical parameters of entities the client can steer.

use mc_rs_proto::types::Vec3;

use crate::mappings::{ClientAttributeType, VehicleKind};

/// Motion state mirrored for a client-driven vehicle.
///
/// While the client controls the vehicle its own prediction wins and
/// backend relative moves are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleComponent {
    kind: VehicleKind,
    move_speed: f32,
    step_height: f32,
    gravity: f64,
    water_movement_efficiency: f64,
    flying_speed: f32,
    width: f32,
    height: f32,
    position: Vec3,
    client_controlled: bool,
}

impl VehicleComponent {
    pub fn new(kind: VehicleKind, width: f32, height: f32, position: Vec3) -> Self {
        Self {
            kind,
            move_speed: ClientAttributeType::MOVEMENT_SPEED.default,
            step_height: 0.6,
            gravity: 0.08,
            water_movement_efficiency: 0.0,
            flying_speed: 0.05,
            width,
            height,
            position,
            client_controlled: false,
        }
    }

    pub fn kind(&self) -> VehicleKind {
        self.kind
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn set_move_speed(&mut self, speed: f32) {
        self.move_speed = speed;
    }

    pub fn step_height(&self) -> f32 {
        self.step_height
    }

    pub fn set_step_height(&mut self, height: f32) {
        self.step_height = height.max(0.0);
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: f64) {
        self.gravity = gravity;
    }

    pub fn water_movement_efficiency(&self) -> f64 {
        self.water_movement_efficiency
    }

    pub fn set_water_movement_efficiency(&mut self, efficiency: f64) {
        self.water_movement_efficiency = efficiency.clamp(0.0, 1.0);
    }

    pub fn flying_speed(&self) -> f32 {
        self.flying_speed
    }

    /// Only flying vehicles track flying speed.
    pub fn set_flying_speed(&mut self, speed: f32) {
        if self.kind == VehicleKind::Flying {
            self.flying_speed = speed;
        }
    }

    pub fn dimensions(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn move_relative(&mut self, dx: f64, dy: f64, dz: f64) {
        self.position = self.position + Vec3::from_f64(dx, dy, dz);
    }

    pub fn is_client_controlled(&self) -> bool {
        self.client_controlled
    }

    pub fn set_client_controlled(&mut self, controlled: bool) {
        self.client_controlled = controlled;
    }
}
