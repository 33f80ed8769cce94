//! Memoization of subcatchments that differ only in area.

use std::collections::HashMap;

use crate::result::ResultSet;

/// Structural fingerprint of a subcatchment's calibratable parameters and
/// rain gage. Floats compare by bit pattern with `-0.0` folded into `0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TwinKey {
    gage: String,
    params: Vec<u64>,
}

impl TwinKey {
    /// Builds a key from the gage name and parameter values.
    pub fn new(gage: impl Into<String>, params: impl IntoIterator<Item = f64>) -> Self {
        Self {
            gage: gage.into(),
            params: params
                .into_iter()
                .map(|v| if v == 0.0 { 0 } else { v.to_bits() })
                .collect(),
        }
    }
}

/// A computed subcatchment available for reuse.
#[derive(Debug, Clone)]
pub struct Twin {
    name: String,
    area_m2: f64,
    results: ResultSet,
}

impl Twin {
    /// Returns the name of the subcatchment that was computed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns its area in m².
    pub fn area_m2(&self) -> f64 {
        self.area_m2
    }

    /// Results for a subcatchment of `area_m2` with the same parameters.
    pub fn scaled_to(&self, area_m2: f64) -> ResultSet {
        self.results.scaled(area_m2 / self.area_m2)
    }
}

/// First computed subcatchment per [`TwinKey`], for one run.
#[derive(Debug, Default)]
pub struct TwinCache {
    entries: HashMap<TwinKey, Twin>,
}

impl TwinCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the twin registered under `key`.
    pub fn get(&self, key: &TwinKey) -> Option<&Twin> {
        self.entries.get(key)
    }

    /// Registers a computed subcatchment unless `key` already has one.
    pub fn register(&mut self, key: TwinKey, name: &str, area_m2: f64, results: &ResultSet) {
        self.entries.entry(key).or_insert_with(|| Twin {
            name: name.to_string(),
            area_m2,
            results: results.clone(),
        });
    }

    /// Returns the number of distinct parameter sets seen.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
