#![deny(warnings)]

//! Core domain models for the cookie clicker simulator.
//!
//! This crate defines the purchasable item catalogue, the purchase history
//! record shared by strategies and the runtime, and the YAML configuration
//! used to supply non-default catalogues. Validation helpers guarantee the
//! basic invariants the simulation loop relies on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::trace;

/// Cost multiplier applied to an item after each purchase.
pub const BUILD_GROWTH: f64 = 1.15;

/// Production rate every run starts with, in cookies per second.
pub const INITIAL_CPS: f64 = 1.0;

/// Default simulation horizon in seconds.
pub const SIM_TIME: f64 = 10_000_000_000.0;

/// Reference item table: (identifier, cost, cps).
const DEFAULT_ITEMS: [(&str, f64, f64); 10] = [
    ("Cursor", 15.0, 0.1),
    ("Grandma", 100.0, 0.5),
    ("Farm", 500.0, 4.0),
    ("Factory", 3000.0, 10.0),
    ("Mine", 10000.0, 40.0),
    ("Shipment", 40000.0, 100.0),
    ("Alchemy Lab", 200000.0, 400.0),
    ("Portal", 1666666.0, 6666.0),
    ("Time Machine", 123456789.0, 98765.0),
    ("Antimatter Condenser", 3999999999.0, 999999.0),
];

/// Errors raised by catalogue lookups and construction.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CatalogueError {
    /// Identifier is not part of the catalogue.
    #[error("unknown item: {0}")]
    UnknownItem(String),
    /// Entry has a cost or cps outside the supported range.
    #[error("invalid entry for {item}: {reason}")]
    InvalidEntry { item: String, reason: &'static str },
    /// Growth factor must be finite and > 1.
    #[error("growth factor {0} must be finite and > 1")]
    InvalidGrowth(f64),
    /// Configuration document could not be parsed.
    #[error("invalid catalogue config: {0}")]
    Config(String),
}

/// Current cost and production yield of one item.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    /// Cookies required to buy the next unit.
    pub cost: f64,
    /// Cookies per second added once bought.
    pub cps: f64,
}

impl CatalogueEntry {
    pub fn new(cost: f64, cps: f64) -> Self {
        Self { cost, cps }
    }
}

/// One purchase event. The first record of every history is the sentinel
/// `(0.0, None, 0.0, 0.0)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// Simulated time of the purchase.
    pub time: f64,
    /// Purchased item, `None` only for the sentinel.
    pub item: Option<String>,
    /// Cookies paid.
    pub cost: f64,
    /// Cookies produced over the whole run up to this purchase.
    pub total_cookies: f64,
}

impl PurchaseRecord {
    pub fn sentinel() -> Self {
        Self {
            time: 0.0,
            item: None,
            cost: 0.0,
            total_cookies: 0.0,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.item.is_none()
    }
}

/// Simulation configuration parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimConfig {
    /// Horizon in simulated seconds.
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Production rate at time zero.
    #[serde(default = "default_initial_cps")]
    pub initial_cps: f64,
}

fn default_duration() -> f64 {
    SIM_TIME
}

fn default_initial_cps() -> f64 {
    INITIAL_CPS
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            duration: SIM_TIME,
            initial_cps: INITIAL_CPS,
        }
    }
}

/// Serializable catalogue description, e.g.
///
/// ```yaml
/// growth_factor: 1.15
/// items:
///   Cursor: { cost: 15.0, cps: 0.1 }
///   Grandma: { cost: 100.0, cps: 0.5 }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogueConfig {
    #[serde(default = "default_growth")]
    pub growth_factor: f64,
    pub items: BTreeMap<String, CatalogueEntry>,
}

fn default_growth() -> f64 {
    BUILD_GROWTH
}

impl CatalogueConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, CatalogueError> {
        serde_yaml::from_str(text).map_err(|e| CatalogueError::Config(e.to_string()))
    }
}

/// Purchasable items keyed by identifier, iterated in lexicographic order.
///
/// The identifier set is fixed at construction. `Clone` produces an
/// independent copy, so each run can mutate its own catalogue.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalogue {
    entries: BTreeMap<String, CatalogueEntry>,
    growth_factor: f64,
}

impl Catalogue {
    /// Build a catalogue from an external `id -> (cost, cps)` mapping.
    pub fn new<I, K>(items: I, growth_factor: f64) -> Result<Self, CatalogueError>
    where
        I: IntoIterator<Item = (K, (f64, f64))>,
        K: Into<String>,
    {
        let entries = items
            .into_iter()
            .map(|(id, (cost, cps))| (id.into(), CatalogueEntry::new(cost, cps)))
            .collect();
        Self::from_entries(entries, growth_factor)
    }

    pub fn from_entries(
        entries: BTreeMap<String, CatalogueEntry>,
        growth_factor: f64,
    ) -> Result<Self, CatalogueError> {
        if !growth_factor.is_finite() || growth_factor <= 1.0 {
            return Err(CatalogueError::InvalidGrowth(growth_factor));
        }
        for (id, entry) in &entries {
            validate_entry(id, entry)?;
        }
        Ok(Self {
            entries,
            growth_factor,
        })
    }

    pub fn from_config(config: CatalogueConfig) -> Result<Self, CatalogueError> {
        Self::from_entries(config.items, config.growth_factor)
    }

    /// All identifiers in lexicographic order.
    pub fn items(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Entries in lexicographic identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CatalogueEntry)> {
        self.entries.iter().map(|(id, e)| (id.as_str(), e))
    }

    /// Current cost of `item`.
    pub fn cost(&self, item: &str) -> Result<f64, CatalogueError> {
        self.entry(item).map(|e| e.cost)
    }

    /// Cookies per second contributed by one unit of `item`.
    pub fn yield_rate(&self, item: &str) -> Result<f64, CatalogueError> {
        self.entry(item).map(|e| e.cps)
    }

    /// Multiply the cost of `item` by the growth factor. Yield is unchanged.
    pub fn apply_growth(&mut self, item: &str) -> Result<(), CatalogueError> {
        let growth = self.growth_factor;
        let entry = self
            .entries
            .get_mut(item)
            .ok_or_else(|| CatalogueError::UnknownItem(item.to_string()))?;
        entry.cost *= growth;
        trace!(item, cost = entry.cost, "item cost grew");
        Ok(())
    }

    pub fn growth_factor(&self) -> f64 {
        self.growth_factor
    }

    pub fn contains(&self, item: &str) -> bool {
        self.entries.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, item: &str) -> Result<&CatalogueEntry, CatalogueError> {
        self.entries
            .get(item)
            .ok_or_else(|| CatalogueError::UnknownItem(item.to_string()))
    }
}

impl Default for Catalogue {
    /// The ten reference items with growth factor 1.15.
    fn default() -> Self {
        let entries = DEFAULT_ITEMS
            .iter()
            .map(|&(id, cost, cps)| (id.to_string(), CatalogueEntry::new(cost, cps)))
            .collect();
        Self {
            entries,
            growth_factor: BUILD_GROWTH,
        }
    }
}

/// Fresh copy of the reference catalogue.
pub fn default_catalogue() -> Catalogue {
    Catalogue::default()
}

fn validate_entry(id: &str, entry: &CatalogueEntry) -> Result<(), CatalogueError> {
    let invalid = |reason| CatalogueError::InvalidEntry {
        item: id.to_string(),
        reason,
    };
    if !entry.cost.is_finite() || entry.cost <= 0.0 {
        return Err(invalid("cost must be finite and > 0"));
    }
    if !entry.cps.is_finite() || entry.cps < 0.0 {
        return Err(invalid("cps must be finite and >= 0"));
    }
    Ok(())
}
