//! Insertion-ordered grouping and set structures.
//!
//! Chain assembly and merging break ties by first-seen order, so every
//! associative structure on those paths must iterate in insertion order.
//! A `HashMap` alone would make the fallbacks nondeterministic.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Values grouped by key, iterating groups in first-seen key order and
/// values in insertion order within each group.
#[derive(Debug, Clone)]
pub struct OrderedGroups<K, V> {
    index: HashMap<K, usize>,
    groups: Vec<(K, Vec<V>)>,
}

impl<K: Eq + Hash + Clone, V> OrderedGroups<K, V> {
    /// Creates an empty grouping.
    #[must_use]
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    /// Appends `value` to the group of `key`, creating the group at the end
    /// if the key is new.
    pub fn push(&mut self, key: K, value: V) {
        if let Some(&slot) = self.index.get(&key)
            && let Some((_, values)) = self.groups.get_mut(slot)
        {
            values.push(value);
            return;
        }
        self.index.insert(key.clone(), self.groups.len());
        self.groups.push((key, vec![value]));
    }

    /// Returns the group of `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&[V]> {
        let slot = *self.index.get(key)?;
        self.groups.get(slot).map(|(_, values)| values.as_slice())
    }

    /// Moves the values of `key` out, leaving an empty group in place.
    pub fn take(&mut self, key: &K) -> Vec<V> {
        let Some(&slot) = self.index.get(key) else {
            return Vec::new();
        };
        self.groups
            .get_mut(slot)
            .map(|(_, values)| std::mem::take(values))
            .unwrap_or_default()
    }

    /// `true` if `key` has a group.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|(key, _)| key)
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// `true` if there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<K: Eq + Hash + Clone, V> Default for OrderedGroups<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<(K, V)> for OrderedGroups<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut groups = Self::new();
        for (key, value) in iter {
            groups.push(key, value);
        }
        groups
    }
}

/// Set that remembers insertion order.
#[derive(Debug, Clone)]
pub struct OrderedSet<T> {
    seen: HashSet<T>,
    items: Vec<T>,
}

impl<T: Eq + Hash + Clone> OrderedSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
            items: Vec::new(),
        }
    }

    /// Inserts `item`; returns `false` if it was already present.
    pub fn insert(&mut self, item: T) -> bool {
        if self.seen.contains(&item) {
            return false;
        }
        self.seen.insert(item.clone());
        self.items.push(item);
        true
    }

    /// `true` if `item` is present.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.seen.contains(item)
    }

    /// First inserted item.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// Items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Eq + Hash + Clone> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_keep_first_seen_key_order() {
        let pairs = [("b", 1), ("a", 2), ("b", 3), ("c", 4)];
        let groups: OrderedGroups<&str, u32> = pairs.into_iter().collect();
        let keys: Vec<_> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(groups.get(&"b"), Some(&[1, 3][..]));
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn take_empties_group_but_keeps_key() {
        let mut groups: OrderedGroups<&str, u32> = [("a", 1), ("a", 2)].into_iter().collect();
        assert_eq!(groups.take(&"a"), vec![1, 2]);
        assert!(groups.take(&"a").is_empty());
        assert!(groups.contains_key(&"a"));
        assert!(groups.take(&"zzz").is_empty());
    }

    #[test]
    fn set_ignores_duplicates_and_keeps_order() {
        let mut set = OrderedSet::new();
        assert!(set.insert("y"));
        assert!(set.insert("x"));
        assert!(!set.insert("y"));
        assert_eq!(set.first(), Some(&"y"));
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["y", "x"]);
        assert!(set.contains(&"x"));
        assert_eq!(set.len(), 2);
    }
}
