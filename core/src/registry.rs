//! Insertion ordered, name indexed collection.
//!
//! Every table of the engine (options, states, symbols, parameters,
//! enumeration elements) is a [`NamedRegistry`]. Iteration follows insertion
//! order; lookups by name go through a hash index.

use core::ops::{Index, IndexMut};

use hashbrown::HashMap;

/// Returned when a name is appended twice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is already present")]
pub struct DuplicateName(pub String);

pub struct NamedRegistry<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> NamedRegistry<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Appends `value` under `name` and returns its position.
    pub fn append(&mut self, name: &str, value: T) -> Result<usize, DuplicateName> {
        if self.index.contains_key(name) {
            return Err(DuplicateName(name.to_string()));
        }
        let position = self.entries.len();
        self.index.insert(name.to_string(), position);
        self.entries.push((name.to_string(), value));
        Ok(position)
    }

    /// Position of `name`, appending `make()` first if it is absent.
    pub fn position_or_insert_with(&mut self, name: &str, make: impl FnOnce() -> T) -> usize {
        if let Some(position) = self.position(name) {
            return position;
        }
        let position = self.entries.len();
        self.index.insert(name.to_string(), position);
        self.entries.push((name.to_string(), make()));
        position
    }

    pub fn exists(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.position(name).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        let i = self.position(name)?;
        Some(&mut self.entries[i].1)
    }

    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.entries.get(index).map(|(_, value)| value)
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut T> {
        self.entries.get_mut(index).map(|(_, value)| value)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Consumes the registry, yielding entries in insertion order.
    pub fn into_entries(self) -> impl Iterator<Item = (String, T)> {
        self.entries.into_iter()
    }
}

impl<T> Default for NamedRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for NamedRegistry<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.entries[index].1
    }
}

impl<T> IndexMut<usize> for NamedRegistry<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.entries[index].1
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for NamedRegistry<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut registry = NamedRegistry::new();
        registry.append("zeta", 1).unwrap();
        registry.append("alpha", 2).unwrap();
        registry.append("mid", 3).unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry[1], 2);
        assert_eq!(registry.name(2), Some("mid"));
    }

    #[test]
    fn test_lookup_by_name() {
        let mut registry = NamedRegistry::new();
        registry.append("a", 10).unwrap();
        registry.append("b", 20).unwrap();
        assert!(registry.exists("b"));
        assert!(!registry.exists("c"));
        assert_eq!(registry.get("b"), Some(&20));
        assert_eq!(registry.position("b"), Some(1));
        assert_eq!(registry.get_index(5), None);
    }

    #[test]
    fn test_duplicate_append_is_rejected() {
        let mut registry = NamedRegistry::new();
        registry.append("a", 10).unwrap();
        assert_eq!(registry.append("a", 11), Err(DuplicateName("a".into())));
        assert_eq!(registry.get("a"), Some(&10));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut registry = NamedRegistry::new();
        registry.append("Ball", 1).unwrap();
        assert!(registry.append("ball", 2).is_ok());
    }

    #[test]
    fn test_position_or_insert_with() {
        let mut registry = NamedRegistry::new();
        assert_eq!(registry.position_or_insert_with("a", || 1), 0);
        assert_eq!(registry.position_or_insert_with("b", || 2), 1);
        assert_eq!(registry.position_or_insert_with("a", || 3), 0);
        assert_eq!(registry.values().copied().collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn test_get_mut() {
        let mut registry = NamedRegistry::new();
        registry.append("a", 1).unwrap();
        *registry.get_mut("a").unwrap() += 41;
        assert_eq!(registry.get("a"), Some(&42));
    }
}
