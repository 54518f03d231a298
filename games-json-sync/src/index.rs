use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// A first-match lookup table over a sidecar sequence.
///
/// Built once per apply run. When several entries share a join key the
/// earliest one in sequence order wins, exactly as a linear scan would
/// choose; the later ones are kept aside so callers can report them.
pub struct FirstMatchIndex<'a, T> {
    /// Join key → first entry with that key
    by_key: HashMap<&'a str, &'a T>,
    /// Entries hidden behind an earlier entry with the same key, in order
    shadowed: Vec<&'a T>,
}

impl<'a, T> FirstMatchIndex<'a, T> {
    /// Index `entries` by the string returned from `key`.
    pub fn build(entries: &'a [T], key: impl Fn(&'a T) -> &'a str) -> Self {
        let mut by_key = HashMap::with_capacity(entries.len());
        let mut shadowed = Vec::new();
        for entry in entries {
            match by_key.entry(key(entry)) {
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
                Entry::Occupied(_) => shadowed.push(entry),
            }
        }
        Self { by_key, shadowed }
    }

    /// The first entry whose key equals `key`.
    pub fn first_match(&self, key: &str) -> Option<&'a T> {
        self.by_key.get(key).copied()
    }

    /// Entries that can never match because an earlier entry shares their key.
    pub fn shadowed(&self) -> &[&'a T] {
        &self.shadowed
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
