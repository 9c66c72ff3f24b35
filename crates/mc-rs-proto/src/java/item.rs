//! Java item stacks and equipment.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EquipmentSlot {
    MainHand,
    OffHand,
    Boots,
    Leggings,
    Chestplate,
    Helmet,
    Body,
    Saddle,
}

/// The `equippable` item component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Equippable {
    pub slot: EquipmentSlot,
}

/// A Java item stack with the components the gateway inspects.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemStack {
    /// Item registry ID; 0 is air.
    pub id: i32,
    pub count: i32,
    pub equippable: Option<Equippable>,
    pub custom_name: Option<String>,
}

impl ItemStack {
    pub fn new(id: i32, count: i32) -> Self {
        Self {
            id,
            count,
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.id == 0 || self.count <= 0
    }

    pub fn with_equippable(mut self, slot: EquipmentSlot) -> Self {
        self.equippable = Some(Equippable { slot });
        self
    }
}

#[derive(Debug, Clone)]
pub struct Equipment {
    pub slot: EquipmentSlot,
    pub item: ItemStack,
}

#[derive(Debug, Clone)]
pub struct SetEquipment {
    pub entity_id: i32,
    pub equipment: Vec<Equipment>,
}
