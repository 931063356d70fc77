//! Per-window visit log

use mobility_places::Tags;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Visit-log entry of one window
#[derive(Debug, Clone, PartialEq)]
pub enum VisitLog {
    /// The window had no observed data
    Missing,
    /// Tags of every place matched in the window, possibly none
    Visits(Vec<Tags>),
}

impl VisitLog {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn visits(&self) -> &[Tags] {
        match self {
            Self::Missing => &[],
            Self::Visits(v) => v,
        }
    }
}

impl Serialize for VisitLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Missing => serializer.serialize_none(),
            Self::Visits(v) => v.serialize(serializer),
        }
    }
}

/// Window label to visit-log entry, in window order.
///
/// Serializes as a JSON object; missing entries become `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitLogMap {
    entries: Vec<(String, VisitLog)>,
}

impl VisitLogMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry for `key`, keeping its original position when the key
    /// repeats (e.g. an hour label reused on a DST fall-back).
    pub fn insert(&mut self, key: String, entry: VisitLog) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((key, entry)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&VisitLog> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VisitLog)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn to_json(&self) -> mobility_core::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for VisitLogMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(name: &str) -> Tags {
        let mut t = Tags::new();
        t.insert("name".into(), name.into());
        t
    }

    #[test]
    fn test_json_keeps_window_order_and_nulls() {
        let mut log = VisitLogMap::new();
        log.insert("2/3/2021".into(), VisitLog::Visits(vec![tags("Bean")]));
        log.insert("1/3/2021".into(), VisitLog::Missing);
        log.insert("3/3/2021".into(), VisitLog::Visits(vec![]));
        assert_eq!(
            log.to_json().unwrap(),
            r#"{"2/3/2021":[{"name":"Bean"}],"1/3/2021":null,"3/3/2021":[]}"#
        );
    }

    #[test]
    fn test_repeated_key_overwrites_in_place() {
        let mut log = VisitLogMap::new();
        log.insert("a".into(), VisitLog::Missing);
        log.insert("b".into(), VisitLog::Missing);
        log.insert("a".into(), VisitLog::Visits(vec![tags("x")]));
        assert_eq!(log.len(), 2);
        assert_eq!(log.iter().next().unwrap().0, "a");
        assert_eq!(log.get("a").unwrap().visits().len(), 1);
        assert!(log.get("b").unwrap().is_missing());
        assert!(log.get("c").is_none());
    }
}
