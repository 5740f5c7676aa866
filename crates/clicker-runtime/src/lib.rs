#![deny(warnings)]

//! Simulation runtime for the cookie clicker simulator.
//!
//! A [`Simulation`] owns the game state for one run and drives it through
//! three phases:
//!
//! ```text
//! Running     -> ask the strategy; None => wait out the horizon, Terminated
//!                item => look up cost/cps, compute wait, Waiting
//! Waiting     -> advance time (never past the horizon), buy if affordable
//!                bought or short mid-horizon => Running
//!                short at the horizon        => Terminated
//! Terminated  -> absorbing
//! ```
//!
//! Every run gets its own catalogue copy; the runtime has no shared state.

use clicker_ai::{Snapshot, Strategy};
use clicker_core::{Catalogue, CatalogueError, PurchaseRecord, SimConfig, INITIAL_CPS};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, trace};

/// Errors that abort a run.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    /// Strategy or caller named an item missing from the catalogue.
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
    /// Horizon must be finite and >= 0.
    #[error("horizon {0} must be finite and >= 0")]
    InvalidHorizon(f64),
    /// Starting production rate must be finite and > 0.
    #[error("initial cps {0} must be finite and > 0")]
    InvalidCps(f64),
}

pub type SimResult<T> = Result<T, SimError>;

/// Mutable game state of a single run.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickerState {
    total_cookies: f64,
    current_cookies: f64,
    time: f64,
    cps: f64,
    history: Vec<PurchaseRecord>,
}

impl Default for ClickerState {
    fn default() -> Self {
        Self::with_cps(INITIAL_CPS)
    }
}

impl ClickerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh state producing `cps` cookies per second.
    pub fn with_cps(cps: f64) -> Self {
        Self {
            total_cookies: 0.0,
            current_cookies: 0.0,
            time: 0.0,
            cps,
            history: vec![PurchaseRecord::sentinel()],
        }
    }

    /// Cookies in stock (not the all-time total).
    pub fn cookies(&self) -> f64 {
        self.current_cookies
    }

    pub fn cps(&self) -> f64 {
        self.cps
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Cookies produced since time zero, including those spent.
    pub fn total_cookies(&self) -> f64 {
        self.total_cookies
    }

    /// Copy of the purchase history, sentinel first.
    pub fn history(&self) -> Vec<PurchaseRecord> {
        self.history.clone()
    }

    /// Number of purchases made, excluding the sentinel.
    pub fn purchases(&self) -> usize {
        self.history.len() - 1
    }

    /// `(time, total_cookies)` at each history record, for plotting.
    pub fn total_cookies_series(&self) -> Vec<(f64, f64)> {
        self.history
            .iter()
            .map(|r| (r.time, r.total_cookies))
            .collect()
    }

    /// Whole seconds until `cookies` are in stock; 0 if already there.
    ///
    /// The result is the smallest whole `t` with
    /// `cookies() + cps() * t >= cookies`, evaluated with the same
    /// arithmetic as [`wait`](Self::wait), so waiting `t` always affords it.
    pub fn time_until(&self, cookies: f64) -> f64 {
        if self.current_cookies >= cookies {
            return 0.0;
        }
        let reached = |t: f64| self.current_cookies + self.cps * t >= cookies;
        let mut t = ((cookies - self.current_cookies) / self.cps).ceil();
        if !reached(t) {
            t += 1.0;
        } else if t > 1.0 && reached(t - 1.0) {
            t -= 1.0;
        }
        t
    }

    /// Produce for `time` seconds. Non-positive durations are ignored.
    pub fn wait(&mut self, time: f64) {
        if time > 0.0 {
            let produced = self.cps * time;
            self.time += time;
            self.current_cookies += produced;
            self.total_cookies += produced;
        }
    }

    /// Buy `item` if the stock covers `cost`. Returns whether it was bought.
    pub fn buy_item(&mut self, item: &str, cost: f64, additional_cps: f64) -> bool {
        if self.current_cookies < cost {
            return false;
        }
        self.current_cookies -= cost;
        self.cps += additional_cps;
        self.history.push(PurchaseRecord {
            time: self.time,
            item: Some(item.to_string()),
            cost,
            total_cookies: self.total_cookies,
        });
        true
    }

    fn snapshot<'a>(&'a self, time_left: f64, catalogue: &'a Catalogue) -> Snapshot<'a> {
        Snapshot {
            cookies: self.current_cookies,
            cps: self.cps,
            history: &self.history,
            time_left,
            catalogue,
        }
    }
}

impl fmt::Display for ClickerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time: {} Current Cookies: {} CPS: {} Total Cookies: {}",
            self.time, self.current_cookies, self.cps, self.total_cookies
        )
    }
}

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Strategy returned `None`; the rest of the horizon was produced idle.
    StrategyStopped,
    /// The horizon ran out while waiting for a purchase.
    HorizonReached,
}

/// Purchase chosen by the strategy, waiting to become affordable.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingPurchase {
    pub item: String,
    pub cost: f64,
    pub cps: f64,
    /// Seconds until the stock covers `cost`.
    pub wait: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Running,
    Waiting(PendingPurchase),
    Terminated(Termination),
}

/// Final state of a finished run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimOutcome {
    pub state: ClickerState,
    pub termination: Termination,
}

/// One run of the purchase loop over a borrowed catalogue.
pub struct Simulation<'a, S: Strategy + ?Sized> {
    catalogue: &'a mut Catalogue,
    strategy: &'a S,
    horizon: f64,
    state: ClickerState,
    phase: Phase,
}

impl<'a, S: Strategy + ?Sized> Simulation<'a, S> {
    pub fn new(catalogue: &'a mut Catalogue, horizon: f64, strategy: &'a S) -> SimResult<Self> {
        let config = SimConfig {
            duration: horizon,
            ..SimConfig::default()
        };
        Self::with_config(catalogue, &config, strategy)
    }

    pub fn with_config(
        catalogue: &'a mut Catalogue,
        config: &SimConfig,
        strategy: &'a S,
    ) -> SimResult<Self> {
        if !config.duration.is_finite() || config.duration < 0.0 {
            return Err(SimError::InvalidHorizon(config.duration));
        }
        if !config.initial_cps.is_finite() || config.initial_cps <= 0.0 {
            return Err(SimError::InvalidCps(config.initial_cps));
        }
        Ok(Self {
            catalogue,
            strategy,
            horizon: config.duration,
            state: ClickerState::with_cps(config.initial_cps),
            phase: Phase::Running,
        })
    }

    pub fn state(&self) -> &ClickerState {
        &self.state
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.phase, Phase::Terminated(_))
    }

    /// Advance the state machine by one transition.
    pub fn step(&mut self) -> SimResult<&Phase> {
        let phase = std::mem::replace(&mut self.phase, Phase::Running);
        self.phase = match phase {
            Phase::Running => self.consult()?,
            Phase::Waiting(pending) => self.settle(pending)?,
            done @ Phase::Terminated(_) => done,
        };
        Ok(&self.phase)
    }

    /// Step until terminated.
    pub fn run(mut self) -> SimResult<SimOutcome> {
        loop {
            self.step()?;
            if let Phase::Terminated(termination) = self.phase {
                return Ok(SimOutcome {
                    state: self.state,
                    termination,
                });
            }
        }
    }

    fn consult(&mut self) -> SimResult<Phase> {
        if self.state.time() > self.horizon {
            return Ok(Phase::Terminated(Termination::HorizonReached));
        }
        let time_left = self.horizon - self.state.time();
        let choice = self
            .strategy
            .decide(&self.state.snapshot(time_left, &*self.catalogue));
        let Some(item) = choice else {
            self.state.wait(time_left);
            return Ok(Phase::Terminated(Termination::StrategyStopped));
        };
        let cost = self.catalogue.cost(&item)?;
        let cps = self.catalogue.yield_rate(&item)?;
        let wait = self.state.time_until(cost);
        Ok(Phase::Waiting(PendingPurchase {
            item,
            cost,
            cps,
            wait,
        }))
    }

    fn settle(&mut self, pending: PendingPurchase) -> SimResult<Phase> {
        let remaining = self.horizon - self.state.time();
        let truncated = pending.wait > remaining;
        self.state
            .wait(if truncated { remaining } else { pending.wait });
        if self.state.buy_item(&pending.item, pending.cost, pending.cps) {
            self.catalogue.apply_growth(&pending.item)?;
            debug!(
                time = self.state.time(),
                item = %pending.item,
                cost = pending.cost,
                cps = self.state.cps(),
                "purchased"
            );
            return Ok(Phase::Running);
        }
        trace!(
            time = self.state.time(),
            item = %pending.item,
            cost = pending.cost,
            cookies = self.state.cookies(),
            "purchase skipped"
        );
        if truncated {
            Ok(Phase::Terminated(Termination::HorizonReached))
        } else {
            Ok(Phase::Running)
        }
    }
}

/// Run `strategy` for `duration` seconds on `catalogue`, mutating it as
/// purchases happen.
pub fn simulate_clicker<S: Strategy + ?Sized>(
    catalogue: &mut Catalogue,
    duration: f64,
    strategy: &S,
) -> SimResult<SimOutcome> {
    Simulation::new(catalogue, duration, strategy)?.run()
}

/// Summary of one named run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunReport {
    pub strategy: String,
    pub time: f64,
    pub cookies: f64,
    pub cps: f64,
    pub total_cookies: f64,
    pub purchases: usize,
    pub termination: Termination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<PurchaseRecord>>,
}

impl RunReport {
    pub fn new(strategy: impl Into<String>, outcome: &SimOutcome) -> Self {
        let state = &outcome.state;
        Self {
            strategy: strategy.into(),
            time: state.time(),
            cookies: state.cookies(),
            cps: state.cps(),
            total_cookies: state.total_cookies(),
            purchases: state.purchases(),
            termination: outcome.termination,
            history: Some(state.history()),
        }
    }

    /// Drop the purchase history, keeping the totals.
    pub fn without_history(mut self) -> Self {
        self.history = None;
        self
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} : Time: {} Current Cookies: {} CPS: {} Total Cookies: {}",
            self.strategy, self.time, self.cookies, self.cps, self.total_cookies
        )
    }
}

/// Run one strategy on a fresh copy of the default catalogue.
pub fn run_strategy<S: Strategy + ?Sized>(
    name: &str,
    duration: f64,
    strategy: &S,
) -> SimResult<RunReport> {
    run_strategy_with(&Catalogue::default(), name, duration, strategy)
}

/// Run one strategy on a copy of `template`; the template is not modified.
pub fn run_strategy_with<S: Strategy + ?Sized>(
    template: &Catalogue,
    name: &str,
    duration: f64,
    strategy: &S,
) -> SimResult<RunReport> {
    let mut catalogue = template.clone();
    let outcome = simulate_clicker(&mut catalogue, duration, strategy)?;
    let report = RunReport::new(name, &outcome);
    info!(
        strategy = name,
        time = report.time,
        cookies = report.cookies,
        cps = report.cps,
        total_cookies = report.total_cookies,
        purchases = report.purchases,
        termination = ?report.termination,
        "run complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clicker_ai::{ReferenceStrategy, SingleItem};
    use clicker_core::SIM_TIME;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest, TestCaseError};

    fn cursor_only() -> Catalogue {
        Catalogue::new([("Cursor", (15.0, 0.1))], 1.15).unwrap()
    }

    /// Requests `.0` every time, affordable or not.
    struct Always(&'static str);

    impl Strategy for Always {
        fn decide(&self, _snapshot: &Snapshot<'_>) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    fn strategy<F: Fn(&Snapshot<'_>) -> Option<String>>(f: F) -> F {
        f
    }

    #[test]
    fn fresh_state() {
        let s = ClickerState::new();
        assert_eq!(s.time(), 0.0);
        assert_eq!(s.cookies(), 0.0);
        assert_eq!(s.total_cookies(), 0.0);
        assert_eq!(s.cps(), 1.0);
        assert_eq!(s.history(), vec![PurchaseRecord::sentinel()]);
        assert_eq!(s.purchases(), 0);
    }

    #[test]
    fn wait_buy_and_time_until() {
        let mut s = ClickerState::new();
        s.wait(45.0);
        assert!(s.buy_item("item", 1.0, 3.5));
        assert_eq!(s.cookies(), 44.0);
        assert_eq!(s.cps(), 4.5);
        assert_eq!(s.total_cookies(), 45.0);
        // (49 - 44) / 4.5 = 1.11.. -> 2
        assert_eq!(s.time_until(49.0), 2.0);
        assert_eq!(s.time_until(44.0), 0.0);
        assert_eq!(s.time_until(0.0), 0.0);
        let last = s.history().pop().unwrap();
        assert_eq!(last.time, 45.0);
        assert_eq!(last.item.as_deref(), Some("item"));
        assert_eq!(last.cost, 1.0);
        assert_eq!(last.total_cookies, 45.0);
    }

    #[test]
    fn non_positive_wait_is_a_no_op() {
        let mut s = ClickerState::new();
        s.wait(3.0);
        let before = s.clone();
        s.wait(0.0);
        s.wait(-10.0);
        assert_eq!(s, before);
    }

    #[test]
    fn unaffordable_buy_changes_nothing() {
        let mut s = ClickerState::new();
        s.wait(4.0);
        let before = s.clone();
        assert!(!s.buy_item("Cursor", 15.0, 0.1));
        assert_eq!(s, before);
    }

    #[test]
    fn history_is_a_copy() {
        let mut s = ClickerState::new();
        let mut h = s.history();
        h.push(PurchaseRecord::sentinel());
        h[0].time = 99.0;
        assert_eq!(s.history(), vec![PurchaseRecord::sentinel()]);
        s.wait(1.0);
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn never_buy_runs_to_horizon() {
        let mut c = cursor_only();
        let out = simulate_clicker(&mut c, 5000.0, &clicker_ai::never_buy).unwrap();
        assert_eq!(out.termination, Termination::StrategyStopped);
        assert_eq!(out.state.time(), 5000.0);
        assert_eq!(out.state.cookies(), 5000.0);
        assert_eq!(out.state.total_cookies(), 5000.0);
        assert_eq!(out.state.cps(), 1.0);
        assert_eq!(out.state.history(), vec![PurchaseRecord::sentinel()]);
        assert_eq!(
            out.state.to_string(),
            "Time: 5000 Current Cookies: 5000 CPS: 1 Total Cookies: 5000"
        );
        assert_eq!(c, cursor_only());
    }

    #[test]
    fn growth_applied_once_per_purchase() {
        let mut c = Catalogue::new([("Cursor", (15.0, 0.1)), ("Grandma", (100.0, 0.5))], 1.15)
            .unwrap();
        let once = strategy(|s| (s.history.len() == 1).then(|| "Cursor".to_string()));
        let out = simulate_clicker(&mut c, 100.0, &once).unwrap();
        let h = out.state.history();
        assert_eq!(h.len(), 2);
        assert_eq!(h[1].time, 15.0);
        assert_eq!(h[1].cost, 15.0);
        assert_eq!(h[1].total_cookies, 15.0);
        assert_eq!(c.cost("Cursor").unwrap(), 15.0 * 1.15);
        assert_eq!(c.cost("Grandma").unwrap(), 100.0);
        assert_eq!(out.state.cps(), 1.1);
        assert_eq!(out.state.time(), 100.0);
    }

    #[test]
    fn same_instant_purchase_with_zero_wait() {
        let mut c = Catalogue::new([("A", (1.0, 0.0))], 1.15).unwrap();
        // 3 cookies at t=3 buy A at 1 and 1.15, leaving 0.85.
        let buy_late =
            strategy(|s| (s.time_left <= 7.0 && s.cookies >= 1.0).then(|| "A".to_string()));
        let mut sim = Simulation::new(&mut c, 10.0, &buy_late).unwrap();
        sim.state.wait(3.0);
        let out = sim.run().unwrap();
        let times: Vec<f64> = out.state.history().iter().skip(1).map(|r| r.time).collect();
        assert_eq!(times, vec![3.0, 3.0]);
        assert_eq!(out.state.time(), 10.0);
    }

    #[test]
    fn broken_strategy_is_tolerated() {
        let mut c = cursor_only();
        let out = simulate_clicker(&mut c, 10.0, &Always("Cursor")).unwrap();
        assert_eq!(out.termination, Termination::HorizonReached);
        assert_eq!(out.state.time(), 10.0);
        assert_eq!(out.state.cookies(), 10.0);
        assert_eq!(out.state.purchases(), 0);
        assert_eq!(c.cost("Cursor").unwrap(), 15.0);
    }

    #[test]
    fn truncated_wait_still_buys_when_affordable() {
        let mut c = Catalogue::new([("X", (2.5, 1.0))], 1.15).unwrap();
        let out = simulate_clicker(&mut c, 2.7, &Always("X")).unwrap();
        let h = out.state.history();
        assert_eq!(h.len(), 2);
        assert_eq!(h[1].time, 2.7);
        assert_eq!(out.state.time(), 2.7);
        assert_eq!(out.termination, Termination::HorizonReached);
    }

    #[test]
    fn phases_step_through_purchase() {
        let mut c = cursor_only();
        let strategy = SingleItem::new("Cursor");
        let mut sim = Simulation::new(&mut c, 20.0, &strategy).unwrap();
        assert_eq!(sim.phase(), &Phase::Running);
        let pending = match sim.step().unwrap() {
            Phase::Waiting(p) => p.clone(),
            other => panic!("expected waiting, got {other:?}"),
        };
        assert_eq!(pending.item, "Cursor");
        assert_eq!(pending.wait, 15.0);
        assert_eq!(sim.state().time(), 0.0);
        assert_eq!(sim.step().unwrap(), &Phase::Running);
        assert_eq!(sim.state().time(), 15.0);
        assert_eq!(sim.state().purchases(), 1);
        // 17.25 > 0 + 1.1 * 5 -> stop
        assert_eq!(
            sim.step().unwrap(),
            &Phase::Terminated(Termination::StrategyStopped)
        );
        assert!(sim.is_terminated());
        assert_eq!(sim.state().time(), 20.0);
        assert_eq!(
            sim.step().unwrap(),
            &Phase::Terminated(Termination::StrategyStopped)
        );
    }

    #[test]
    fn unknown_item_is_fatal() {
        let mut c = cursor_only();
        let err = simulate_clicker(&mut c, 100.0, &Always("Nope")).unwrap_err();
        assert_eq!(
            err,
            SimError::Catalogue(CatalogueError::UnknownItem("Nope".to_string()))
        );
    }

    #[test]
    fn invalid_config_rejected() {
        let mut c = cursor_only();
        let s = clicker_ai::never_buy;
        assert!(matches!(
            simulate_clicker(&mut c, f64::NAN, &s),
            Err(SimError::InvalidHorizon(_))
        ));
        assert_eq!(
            simulate_clicker(&mut c, -1.0, &s).unwrap_err(),
            SimError::InvalidHorizon(-1.0)
        );
        let cfg = SimConfig {
            duration: 10.0,
            initial_cps: 0.0,
        };
        assert!(Simulation::with_config(&mut c, &cfg, &s).is_err());
    }

    #[test]
    fn initial_cps_from_config() {
        let mut c = cursor_only();
        let cfg = SimConfig {
            duration: 10.0,
            initial_cps: 2.0,
        };
        let out = Simulation::with_config(&mut c, &cfg, &clicker_ai::never_buy)
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(out.state.cookies(), 20.0);
    }

    #[test]
    fn run_strategy_leaves_template_untouched() {
        let template = Catalogue::default();
        let report = run_strategy_with(&template, "Cheap", 10_000.0, &ReferenceStrategy::Cheap)
            .unwrap();
        assert!(report.purchases > 0);
        assert_eq!(template, Catalogue::default());
        assert_eq!(report.time, 10_000.0);
        let history = report.history.as_ref().unwrap();
        assert_eq!(history.len(), report.purchases + 1);
        assert!(report.to_string().starts_with("Cheap : Time: 10000 "));
    }

    #[test]
    fn report_json() {
        let report = run_strategy("None", 100.0, &ReferenceStrategy::Never)
            .unwrap()
            .without_history();
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["strategy"], "None");
        assert_eq!(v["termination"], "strategy_stopped");
        assert_eq!(v["cookies"], 100.0);
        assert!(v.get("history").is_none());
    }

    #[test]
    fn series_tracks_history() {
        let report_state = simulate_clicker(
            &mut Catalogue::default(),
            1000.0,
            &ReferenceStrategy::Cursor,
        )
        .unwrap()
        .state;
        let series = report_state.total_cookies_series();
        assert_eq!(series.len(), report_state.history().len());
        assert_eq!(series[0], (0.0, 0.0));
        assert_eq!(series[1], (15.0, 15.0));
    }

    #[test]
    fn cursor_run_at_full_horizon_is_reproducible() {
        let report = run_strategy("Cursor", SIM_TIME, &ReferenceStrategy::Cursor).unwrap();
        assert_eq!(report.purchases, 151);
        assert_eq!(report.cps, 16.099999999999962);
        assert_eq!(report.time, SIM_TIME);
        assert_eq!(report.termination, Termination::StrategyStopped);
        assert!(report
            .to_string()
            .ends_with("Total Cookies: 153308849165.89966"));
    }

    #[test]
    fn cps_never_decreases_between_steps() {
        let mut c = Catalogue::default();
        let strategy = ReferenceStrategy::Cheap;
        let mut sim = Simulation::new(&mut c, 100_000.0, &strategy).unwrap();
        let mut last_cps = sim.state().cps();
        let mut last_time = sim.state().time();
        let mut steps = 0;
        while !sim.is_terminated() {
            sim.step().unwrap();
            assert!(sim.state().cps() >= last_cps);
            assert!(sim.state().time() >= last_time);
            last_cps = sim.state().cps();
            last_time = sim.state().time();
            steps += 1;
        }
        assert!(steps > 2);
        assert!(last_cps > 1.0);
    }

    fn check_invariants(state: &ClickerState, horizon: f64) -> Result<(), TestCaseError> {
        let h = state.history();
        prop_assert!(h[0].is_sentinel());
        for pair in h.windows(2) {
            prop_assert!(pair[1].time >= pair[0].time);
            prop_assert!(pair[1].total_cookies >= pair[0].total_cookies);
            prop_assert!(pair[1].item.is_some());
        }
        prop_assert!(h.last().unwrap().time <= horizon);
        prop_assert!(state.cookies() >= 0.0);
        prop_assert!(state.total_cookies() >= state.cookies());
        prop_assert!(state.cps() >= 1.0);
        prop_assert_eq!(state.time(), horizon);
        Ok(())
    }

    proptest! {
        #[test]
        fn reference_runs_keep_invariants(
            horizon in 0.0f64..200_000.0,
            which in 0usize..5,
        ) {
            let strategy = [
                ReferenceStrategy::Never,
                ReferenceStrategy::Cursor,
                ReferenceStrategy::Cheap,
                ReferenceStrategy::Expensive,
                ReferenceStrategy::Best,
            ][which];
            let mut c = Catalogue::default();
            let out = simulate_clicker(&mut c, horizon, &strategy).unwrap();
            check_invariants(&out.state, horizon)?;
            for (item, entry) in c.iter() {
                let bought = out
                    .state
                    .history()
                    .iter()
                    .filter(|r| r.item.as_deref() == Some(item))
                    .count();
                let base = Catalogue::default().cost(item).unwrap();
                prop_assert_eq!(entry.cost, (0..bought).fold(base, |cost, _| cost * 1.15));
            }
        }

        #[test]
        fn time_until_is_whole_and_sufficient(
            stock in 0.0f64..1e6,
            cost in 0.0f64..1e7,
            cps in 0.1f64..1e3,
        ) {
            let mut s = ClickerState::with_cps(cps);
            s.current_cookies = stock;
            let t = s.time_until(cost);
            prop_assert!(t >= 0.0);
            prop_assert_eq!(t, t.trunc());
            if stock >= cost {
                prop_assert_eq!(t, 0.0);
            } else {
                prop_assert!(stock + cps * t >= cost);
                prop_assert!(t < 1.0 || stock + cps * (t - 1.0) < cost);
                s.wait(t);
                prop_assert!(s.buy_item("X", cost, 0.0));
            }
        }
    }
}
