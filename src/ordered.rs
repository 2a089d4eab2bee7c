use indexmap::IndexMap;

/// String-keyed map that remembers insertion order.
///
/// Two maps are equal only if they hold the same entries in the same order.
#[derive(Debug, Clone)]
pub struct OrderedMap<V> {
    entries: IndexMap<String, V>,
}

/// Extension members of a problem details record.
pub type Extensions = OrderedMap<String>;

/// Validation messages keyed by the name of the field they belong to.
pub type ValidationErrors = OrderedMap<Vec<String>>;

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        OrderedMap {
            entries: IndexMap::new(),
        }
    }

    /// Inserts a value. An existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes a key, shifting later entries down so order is kept.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl ValidationErrors {
    /// Appends a message to `field`, creating the field at the end if needed.
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.entries
            .entry(field.into())
            .or_default()
            .push(message.into());
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        OrderedMap::new()
    }
}

impl<V: PartialEq> PartialEq for OrderedMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl<V: Eq> Eq for OrderedMap<V> {}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = indexmap::map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
