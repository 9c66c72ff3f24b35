//! Static correspondences between the Java and Bedrock vocabularies.

pub mod attributes;
pub mod entities;
pub mod items;

pub use attributes::{route, AttributeRoute, ClientAttributeType};
pub use entities::{definition, EntityDefinition, VehicleKind};
pub use items::{ItemMapping, ItemTranslator, MappedItemTranslator, StoredItems};
