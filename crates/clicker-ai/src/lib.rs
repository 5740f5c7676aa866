#![deny(warnings)]

//! Purchase strategies for the cookie clicker simulator.
//!
//! A strategy looks at a read-only [`Snapshot`] of the game and names the
//! next item to buy, or returns `None` to stop buying. Any
//! `Fn(&Snapshot) -> Option<String>` is a strategy; the reference policies
//! below are plain functions plus [`SingleItem`].
//!
//! All reference policies scan the catalogue in lexicographic order and
//! only replace their current pick on a strict improvement, so the first
//! item wins ties.

use clicker_core::{Catalogue, PurchaseRecord};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::trace;

/// Game state handed to a strategy.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    /// Cookies currently in stock.
    pub cookies: f64,
    /// Current production rate.
    pub cps: f64,
    /// Purchases so far, sentinel first.
    pub history: &'a [PurchaseRecord],
    /// Simulated seconds left before the horizon.
    pub time_left: f64,
    pub catalogue: &'a Catalogue,
}

impl Snapshot<'_> {
    /// Cookies available by the horizon if nothing else is bought.
    pub fn budget(&self) -> f64 {
        self.cookies + self.cps * self.time_left
    }
}

/// Decision policy: the next item to buy, or `None` to stop.
pub trait Strategy {
    fn decide(&self, snapshot: &Snapshot<'_>) -> Option<String>;
}

impl<F> Strategy for F
where
    F: Fn(&Snapshot<'_>) -> Option<String>,
{
    fn decide(&self, snapshot: &Snapshot<'_>) -> Option<String> {
        self(snapshot)
    }
}

/// Never buy anything.
pub fn never_buy(_snapshot: &Snapshot<'_>) -> Option<String> {
    None
}

/// Cheapest item that can be paid for before the horizon.
pub fn cheapest_affordable(snapshot: &Snapshot<'_>) -> Option<String> {
    let budget = snapshot.budget();
    let mut cheapest = f64::INFINITY;
    let mut pick = None;
    for (id, entry) in snapshot.catalogue.iter() {
        if entry.cost < cheapest && entry.cost <= budget {
            cheapest = entry.cost;
            pick = Some(id);
        }
    }
    pick.map(str::to_string)
}

/// Most expensive item that can be paid for before the horizon.
pub fn most_expensive_affordable(snapshot: &Snapshot<'_>) -> Option<String> {
    let budget = snapshot.budget();
    let mut expensive = -1.0;
    let mut pick = None;
    for (id, entry) in snapshot.catalogue.iter() {
        if entry.cost > expensive && entry.cost <= budget {
            expensive = entry.cost;
            pick = Some(id);
        }
    }
    pick.map(str::to_string)
}

/// Highest cps per cookie spent. Does not check affordability, so it keeps
/// asking for items the runtime can no longer pay for near the horizon.
pub fn best_value(snapshot: &Snapshot<'_>) -> Option<String> {
    let mut best_ratio = -1.0;
    let mut pick = None;
    for (id, entry) in snapshot.catalogue.iter() {
        let ratio = entry.cps / entry.cost;
        if ratio > best_ratio {
            best_ratio = ratio;
            pick = Some(id);
        }
    }
    pick.map(str::to_string)
}

/// Always proposes the same item while a loose budget estimate says it might
/// be reachable. It never checks that the wait actually fits in the time
/// left; the runtime has to cope with that.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleItem {
    pub item: String,
}

impl SingleItem {
    pub fn new(item: impl Into<String>) -> Self {
        Self { item: item.into() }
    }
}

impl Strategy for SingleItem {
    fn decide(&self, snapshot: &Snapshot<'_>) -> Option<String> {
        // Unknown items are passed through and surface as a runtime error.
        if !snapshot.catalogue.contains(&self.item) {
            return Some(self.item.clone());
        }
        let cost = snapshot.catalogue.cost(&self.item).ok()?;
        (cost < snapshot.budget()).then(|| self.item.clone())
    }
}

/// Strategy name could not be resolved.
#[derive(Debug, Error, PartialEq)]
#[error("unknown strategy: {0}")]
pub struct UnknownStrategy(pub String);

/// Named reference policies, selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceStrategy {
    /// [`never_buy`]
    Never,
    /// [`SingleItem`] on `"Cursor"`.
    Cursor,
    /// [`cheapest_affordable`]
    Cheap,
    /// [`most_expensive_affordable`]
    Expensive,
    /// [`best_value`]
    Best,
}

impl ReferenceStrategy {
    /// Strategies run by default, in order.
    pub const ALL: [ReferenceStrategy; 4] = [Self::Cursor, Self::Cheap, Self::Expensive, Self::Best];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Never => "none",
            Self::Cursor => "cursor",
            Self::Cheap => "cheap",
            Self::Expensive => "expensive",
            Self::Best => "best",
        }
    }

    /// Display label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Never => "None",
            Self::Cursor => "Cursor",
            Self::Cheap => "Cheap",
            Self::Expensive => "Expensive",
            Self::Best => "Best",
        }
    }
}

impl Strategy for ReferenceStrategy {
    fn decide(&self, snapshot: &Snapshot<'_>) -> Option<String> {
        let choice = match self {
            Self::Never => never_buy(snapshot),
            Self::Cursor => SingleItem::new("Cursor").decide(snapshot),
            Self::Cheap => cheapest_affordable(snapshot),
            Self::Expensive => most_expensive_affordable(snapshot),
            Self::Best => best_value(snapshot),
        };
        trace!(strategy = self.name(), ?choice, "strategy decided");
        choice
    }
}

impl FromStr for ReferenceStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::Never),
            "cursor" => Ok(Self::Cursor),
            "cheap" => Ok(Self::Cheap),
            "expensive" => Ok(Self::Expensive),
            "best" => Ok(Self::Best),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for ReferenceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
