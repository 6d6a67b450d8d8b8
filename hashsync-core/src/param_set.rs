/// Ordered mapping from element id to its string value.
///
/// Keys are unique. Re-inserting a key replaces its value but keeps the
/// original position, so serialization order follows first insertion.
/// A value is `None` only when it came from a fragment segment without `=`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet {
    entries: Vec<(String, Option<String>)>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set a key to a value. Returns the previous value if the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.insert_raw(key.into(), Some(value.into())).flatten()
    }

    /// Set a key with no value, as produced by a bare `key;` segment.
    pub fn insert_missing(&mut self, key: impl Into<String>) {
        self.insert_raw(key.into(), None);
    }

    pub(crate) fn insert_raw(
        &mut self,
        key: String,
        value: Option<String>,
    ) -> Option<Option<String>> {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Value for a key. `None` both when the key is absent and when it has no value;
    /// use [`ParamSet::contains_key`] to tell them apart.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParamSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = ParamSet::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl IntoIterator for ParamSet {
    type Item = (String, Option<String>);
    type IntoIter = std::vec::IntoIter<(String, Option<String>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut params = ParamSet::new();
        params.insert("b", "2");
        params.insert("a", "1");
        params.insert("c", "3");
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_reinsert_overwrites_in_place() {
        let mut params = ParamSet::new();
        params.insert("a", "1");
        params.insert("b", "2");
        let previous = params.insert("a", "3");
        assert_eq!(previous.as_deref(), Some("1"));
        assert_eq!(params.get("a"), Some("3"));
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_missing_value_is_distinct_from_absent_key() {
        let mut params = ParamSet::new();
        params.insert_missing("a");
        assert!(params.contains_key("a"));
        assert_eq!(params.get("a"), None);
        assert!(!params.contains_key("b"));
    }
}
