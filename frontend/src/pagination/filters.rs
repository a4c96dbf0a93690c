use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Scalar(String),
    Set(BTreeSet<String>),
}

/// Server-side filters mirrored on the client. Blank scalars and empty sets
/// are never stored, so equality means "same query".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet(BTreeMap<String, FilterValue>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scalar(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set_scalar(key, value);
        self
    }

    pub fn set_scalar(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.0.remove(key);
        } else {
            self.0
                .insert(key.to_string(), FilterValue::Scalar(trimmed.to_string()));
        }
    }

    pub fn set_members<I, S>(&mut self, key: &str, members: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members: BTreeSet<String> = members
            .into_iter()
            .map(Into::into)
            .filter(|m| !m.trim().is_empty())
            .collect();
        if members.is_empty() {
            self.0.remove(key);
        } else {
            self.0.insert(key.to_string(), FilterValue::Set(members));
        }
    }

    /// Adds `member` to the set under `key`, or removes it when present.
    pub fn toggle(&mut self, key: &str, member: &str) {
        let mut members = self.members(key).cloned().unwrap_or_default();
        if !members.remove(member) {
            members.insert(member.to_string());
        }
        self.set_members(key, members);
    }

    pub fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn scalar(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(FilterValue::Scalar(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn members(&self, key: &str) -> Option<&BTreeSet<String>> {
        match self.0.get(key) {
            Some(FilterValue::Set(members)) => Some(members),
            _ => None,
        }
    }

    pub fn contains(&self, key: &str, member: &str) -> bool {
        self.members(key)
            .map(|members| members.contains(member))
            .unwrap_or(false)
    }

    /// True when no filter is set for `key` or `value` satisfies it.
    pub fn admits(&self, key: &str, value: &str) -> bool {
        match self.0.get(key) {
            None => true,
            Some(FilterValue::Scalar(expected)) => expected == value,
            Some(FilterValue::Set(members)) => members.contains(value),
        }
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    FilterValue::Scalar(v) => v.clone(),
                    FilterValue::Set(members) => {
                        members.iter().cloned().collect::<Vec<_>>().join(",")
                    }
                };
                (key.clone(), value)
            })
            .collect()
    }
}
