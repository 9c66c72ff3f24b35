//! Chat, interaction and game rule packets.

/// Text (0x09) — Bidirectional. Only chat messages are modelled.
#[derive(Debug, Clone)]
pub struct Text {
    pub source_name: String,
    pub message: String,
    pub xuid: String,
}

/// Interact actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractAction {
    StopRiding,
    LeaveVehicle,
    MouseOverEntity,
    OpenNpc,
    OpenInventory,
}

/// Interact (0x21) — Client → Server.
#[derive(Debug, Clone)]
pub struct Interact {
    pub action: InteractAction,
    /// Target entity; 0 when the cursor left every entity.
    pub runtime_entity_id: u64,
}

/// Game rule value.
#[derive(Debug, Clone, PartialEq)]
pub enum GameRuleValue {
    Bool(bool),
    Int(i32),
    Float(f32),
}

/// A single game rule entry.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRule {
    pub name: String,
    pub editable: bool,
    pub value: GameRuleValue,
}

/// GameRulesChanged (0x48) — Server → Client.
#[derive(Debug, Clone)]
pub struct GameRulesChanged {
    pub rules: Vec<GameRule>,
}

impl GameRulesChanged {
    /// Toggle the client-side daylight cycle.
    pub fn daylight_cycle(enabled: bool) -> Self {
        Self {
            rules: vec![GameRule {
                name: "dodaylightcycle".into(),
                editable: false,
                value: GameRuleValue::Bool(enabled),
            }],
        }
    }
}
