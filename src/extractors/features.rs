use std::collections::HashMap;
use std::fmt;

/// Sparse feature vector. Absent keys read as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Features {
    values: HashMap<String, f64>,
}

impl Features {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> f64 {
        self.values.get(key).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), value);
    }

    pub fn add(&mut self, key: impl Into<String>, value: f64) {
        *self.values.entry(key.into()).or_insert(0.0) += value;
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        let mut entries: Vec<(&str, f64)> =
            self.values.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    pub fn divide_all(&mut self, divisor: f64) {
        for value in self.values.values_mut() {
            *value /= divisor;
        }
    }

    /// Linear score of these features against `weights`.
    pub fn dot(&self, weights: &Features) -> f64 {
        self.values
            .iter()
            .map(|(key, value)| value * weights.get(key))
            .sum()
    }
}

impl fmt::Display for Features {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let entries: Vec<String> = self
            .iter()
            .map(|(key, value)| format!("{}={:.4}", key, value))
            .collect();
        write!(formatter, "{{{}}}", entries.join(", "))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Features {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut features = Features::new();
        for (key, value) in iter {
            features.set(key, value);
        }
        features
    }
}
