use crate::state::ItemHandle;

/// Read-only access to weapon definitions.
pub trait ItemOracle: Send + Sync {
    /// Returns the weapon definition for `handle`, or `None` if the handle is
    /// unknown or does not refer to a weapon.
    fn weapon(&self, handle: ItemHandle) -> Option<&WeaponDefinition>;
}

/// A weapon's display name and raw damage expression.
///
/// The damage string is kept as authored and parsed at attack time so a
/// malformed entry degrades to the unarmed roll instead of failing a load.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponDefinition {
    pub handle: ItemHandle,
    pub name: String,
    pub damage: String,
}

impl WeaponDefinition {
    pub fn new(handle: ItemHandle, name: impl Into<String>, damage: impl Into<String>) -> Self {
        Self {
            handle,
            name: name.into(),
            damage: damage.into(),
        }
    }
}

/// Item oracle with no items. Every attacker fights unarmed.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoItems;

impl ItemOracle for NoItems {
    fn weapon(&self, _handle: ItemHandle) -> Option<&WeaponDefinition> {
        None
    }
}

/// In-memory weapon table keyed by handle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WeaponCatalog {
    weapons: Vec<WeaponDefinition>,
}

impl WeaponCatalog {
    pub fn new(weapons: impl IntoIterator<Item = WeaponDefinition>) -> Self {
        let mut catalog = Self::default();
        for weapon in weapons {
            catalog.insert(weapon);
        }
        catalog
    }

    /// Adds `weapon`, replacing any definition with the same handle.
    pub fn insert(&mut self, weapon: WeaponDefinition) {
        match self.weapons.iter_mut().find(|w| w.handle == weapon.handle) {
            Some(existing) => *existing = weapon,
            None => self.weapons.push(weapon),
        }
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeaponDefinition> {
        self.weapons.iter()
    }
}

impl ItemOracle for WeaponCatalog {
    fn weapon(&self, handle: ItemHandle) -> Option<&WeaponDefinition> {
        self.weapons.iter().find(|w| w.handle == handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_same_handle() {
        let mut catalog = WeaponCatalog::new([
            WeaponDefinition::new(ItemHandle(1), "club", "1d6"),
            WeaponDefinition::new(ItemHandle(2), "spear", "1d8"),
        ]);
        catalog.insert(WeaponDefinition::new(ItemHandle(1), "iron club", "1d8+1"));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.weapon(ItemHandle(1)).map(|w| w.name.as_str()), Some("iron club"));
        assert!(catalog.weapon(ItemHandle(3)).is_none());
        assert!(NoItems.weapon(ItemHandle(1)).is_none());
    }
}
