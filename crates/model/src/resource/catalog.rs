use std::collections::BTreeMap;

use super::{ResourceKey, ResourceType};

/// Capacity table for the text resource clusters.
///
/// Built once and shared read-only; capacities never change while a store is
/// running. Types without an entry, image clusters included, are unbounded.
#[derive(Clone, Debug)]
pub struct ResourceCatalog {
    max_entries: BTreeMap<ResourceType, usize>,
}

impl ResourceCatalog {
    pub const MAX_TRAP_MESSAGES: usize = 512;
    pub const MAX_WORDS: usize = 512;
    pub const MAX_LOG_CATEGORIES: usize = 16;
    pub const MAX_SCREEN_MESSAGES: usize = 120;
    /// 32 access cards with two strings each.
    pub const MAX_ACCESS_CARD_NAMES: usize = 64;
    pub const MAX_DATALET_MESSAGES: usize = 256;
    pub const MAX_PAPER_TEXTS: usize = 16;

    /// Maximum entry count for a resource type, or 0 if unbounded.
    pub fn max_entries_for(&self, resource_type: ResourceType) -> usize {
        self.max_entries.get(&resource_type).copied().unwrap_or(0)
    }

    /// True if the key's index is addressable within its type's capacity.
    pub fn admits(&self, key: ResourceKey) -> bool {
        let limit = self.max_entries_for(key.resource_type);
        limit == 0 || (key.index as usize) < limit
    }
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        let max_entries = BTreeMap::from([
            (ResourceType::PAPER_TEXTS, Self::MAX_PAPER_TEXTS),
            (ResourceType::TRAP_MESSAGES, Self::MAX_TRAP_MESSAGES),
            (ResourceType::WORDS, Self::MAX_WORDS),
            (ResourceType::LOG_CATEGORIES, Self::MAX_LOG_CATEGORIES),
            (ResourceType::SCREEN_MESSAGES, Self::MAX_SCREEN_MESSAGES),
            (ResourceType::ACCESS_CARD_NAMES, Self::MAX_ACCESS_CARD_NAMES),
            (ResourceType::DATALET_MESSAGES, Self::MAX_DATALET_MESSAGES),
        ]);
        Self { max_entries }
    }
}
