//! Java item stack to Bedrock item conversion.

use std::collections::HashMap;

use mc_rs_proto::bedrock::ItemData;
use mc_rs_proto::java::ItemStack;
use tracing::debug;

/// Converts one Java item stack into the Bedrock item shown to the client.
pub trait ItemTranslator: Send + Sync {
    fn to_bedrock(&self, stack: &ItemStack) -> ItemData;
}

/// A Java item ID paired with its Bedrock definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemMapping {
    pub java_id: i32,
    pub bedrock_id: i32,
}

impl ItemMapping {
    pub fn matches(&self, item: &ItemData) -> bool {
        item.id == self.bedrock_id
    }
}

/// Items the entity model compares against by identity.
#[derive(Debug, Clone, Copy)]
pub struct StoredItems {
    pub banner: ItemMapping,
    pub shield: ItemMapping,
    pub saddle: ItemMapping,
}

impl Default for StoredItems {
    fn default() -> Self {
        Self {
            banner: ItemMapping {
                java_id: 1139,
                bedrock_id: 567,
            },
            shield: ItemMapping {
                java_id: 1183,
                bedrock_id: 357,
            },
            saddle: ItemMapping {
                java_id: 780,
                bedrock_id: 374,
            },
        }
    }
}

/// Table-driven [`ItemTranslator`]. Unmapped items show as air.
pub struct MappedItemTranslator {
    by_java_id: HashMap<i32, i32>,
}

impl MappedItemTranslator {
    pub fn new(stored: &StoredItems) -> Self {
        let mut translator = Self {
            by_java_id: HashMap::new(),
        };
        for mapping in [stored.banner, stored.shield, stored.saddle] {
            translator.insert(mapping);
        }
        translator
    }

    pub fn insert(&mut self, mapping: ItemMapping) {
        self.by_java_id.insert(mapping.java_id, mapping.bedrock_id);
    }
}

impl ItemTranslator for MappedItemTranslator {
    fn to_bedrock(&self, stack: &ItemStack) -> ItemData {
        if stack.is_empty() {
            return ItemData::AIR;
        }
        match self.by_java_id.get(&stack.id) {
            Some(&bedrock_id) => ItemData::new(bedrock_id, stack.count.clamp(0, 255) as u8),
            None => {
                debug!("No Bedrock mapping for Java item {}", stack.id);
                ItemData::AIR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_items_translate() {
        let stored = StoredItems::default();
        let translator = MappedItemTranslator::new(&stored);
        let banner = translator.to_bedrock(&ItemStack::new(stored.banner.java_id, 1));
        assert!(stored.banner.matches(&banner));
        assert!(!stored.shield.matches(&banner));
    }

    #[test]
    fn empty_and_unknown_become_air() {
        let translator = MappedItemTranslator::new(&StoredItems::default());
        assert!(translator.to_bedrock(&ItemStack::empty()).is_air());
        assert!(translator.to_bedrock(&ItemStack::new(-5, 1)).is_air());
    }

    #[test]
    fn count_saturates() {
        let mut translator = MappedItemTranslator::new(&StoredItems::default());
        translator.insert(ItemMapping {
            java_id: 1,
            bedrock_id: 1,
        });
        assert_eq!(translator.to_bedrock(&ItemStack::new(1, 300)).count, 255);
    }
}
