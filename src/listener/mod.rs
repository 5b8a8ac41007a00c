// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Listener`] folding lifecycle notifications into [`TestSuite`]s.

pub mod context;

use std::time::SystemTime;

use tracing::{debug, warn};

use self::context::{FeatureContext, ScenarioUnit};
use crate::{
    config::{Config, Granularity},
    error::Result,
    event::{Event, FeatureElement, Lifecycle, StepResult},
    report::{ReportManager, ReportSink, TestSuite},
    status::Status,
};

/// Listener of a BDD framework's callbacks, recording them as [`TestSuite`]s
/// and handing each completed one over to a [`ReportSink`].
///
/// # Ordering
///
/// Callbacks are expected in the following order, repeated for each feature:
/// ```text
/// on_feature_start
///   → [on_scenario_start → [on_step_result]* → on_scenario_end]*
///   → on_feature_end
/// ```
/// Any deviation from it is tolerated: a missing feature or scenario is
/// synthesized (with a warning emitted via [`tracing`]), and a dangling one
/// is closed. Such reports may be grouped or timed wrongly, but are never
/// lost, as long as [`Listener::finish()`] is called at the end.
///
/// # Errors
///
/// Callbacks return an error only when the [`ReportSink`] fails to persist a
/// report.
#[derive(Debug)]
pub struct Listener<S> {
    /// [`ReportSink`] to hand completed [`TestSuite`]s over to.
    sink: S,

    /// Scope of a single [`TestSuite`].
    granularity: Granularity,

    /// Currently open feature.
    feature: Option<FeatureContext>,

    /// Currently open [`TestSuite`].
    suite: Option<TestSuite>,

    /// Currently open scenario.
    scenario: Option<ScenarioUnit>,
}

impl Listener<ReportManager> {
    /// Creates a new [`Listener`] writing XML files with a [`ReportManager`]
    /// configured by the given [`Config`].
    ///
    /// # Errors
    ///
    /// If the [`Config::category`] is empty.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::with_granularity(
            ReportManager::from_config(config)?,
            config.granularity,
        ))
    }
}

impl<S: ReportSink> Listener<S> {
    /// Creates a new [`Listener`] recording a [`TestSuite`] per feature.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self::with_granularity(sink, Granularity::default())
    }

    /// Creates a new [`Listener`] with the given [`Granularity`].
    #[must_use]
    pub const fn with_granularity(sink: S, granularity: Granularity) -> Self {
        Self {
            sink,
            granularity,
            feature: None,
            suite: None,
            scenario: None,
        }
    }

    /// Returns the [`Granularity`] of this [`Listener`].
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Returns the underlying [`ReportSink`].
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the name of the currently open feature, if any.
    #[must_use]
    pub fn current_feature(&self) -> Option<&str> {
        self.feature.as_ref().map(FeatureContext::name)
    }

    /// Returns the currently open scenario, if any.
    #[must_use]
    pub const fn current_scenario(&self) -> Option<&ScenarioUnit> {
        self.scenario.as_ref()
    }

    /// Returns the aggregated [`Status`] of the currently open scenario, if
    /// any.
    #[must_use]
    pub fn status(&self) -> Option<Status> {
        self.scenario.as_ref().map(ScenarioUnit::status)
    }

    /// Handles a feature with the given (possibly multi-line) `title` being
    /// started.
    ///
    /// # Errors
    ///
    /// If a dangling feature is closed and fails to be persisted.
    pub fn on_feature_start(&mut self, title: &str) -> Result<()> {
        self.feature_started(title, SystemTime::now())
    }

    /// Handles a feature with the given `title` being finished.
    ///
    /// # Errors
    ///
    /// If the feature's [`TestSuite`] fails to be persisted.
    pub fn on_feature_end(&mut self, title: &str) -> Result<()> {
        self.feature_finished(title, SystemTime::now())
    }

    /// Handles the given feature `element` being started.
    ///
    /// # Errors
    ///
    /// If a dangling scenario is closed and fails to be persisted.
    pub fn on_scenario_start<E>(&mut self, element: &E) -> Result<()>
    where
        E: FeatureElement + ?Sized,
    {
        self.scenario_started(element.name(), SystemTime::now())
    }

    /// Handles the given feature `element` being finished.
    ///
    /// # Errors
    ///
    /// If the scenario's [`TestSuite`] fails to be persisted.
    pub fn on_scenario_end<E>(&mut self, element: &E) -> Result<()>
    where
        E: FeatureElement + ?Sized,
    {
        self.scenario_finished(element.name(), SystemTime::now())
    }

    /// Handles the given [`StepResult`].
    pub fn on_step_result(&mut self, step: &StepResult) {
        self.step_finished(step, SystemTime::now());
    }

    /// Handles the given [`Lifecycle`] [`Event`], using its timestamp for
    /// the recorded timings.
    ///
    /// # Errors
    ///
    /// If the [`ReportSink`] fails.
    pub fn handle_event(&mut self, event: Event<Lifecycle>) -> Result<()> {
        let (ev, meta) = event.split();
        match ev {
            Lifecycle::FeatureStarted(title) => {
                self.feature_started(&title, meta.at)
            }
            Lifecycle::ScenarioStarted(name) => {
                self.scenario_started(&name, meta.at)
            }
            Lifecycle::Step(step) => {
                self.step_finished(&step, meta.at);
                Ok(())
            }
            Lifecycle::ScenarioFinished(name) => {
                self.scenario_finished(&name, meta.at)
            }
            Lifecycle::FeatureFinished(title) => {
                self.feature_finished(&title, meta.at)
            }
            Lifecycle::Finished => self.run_finished(meta.at),
        }
    }

    /// Finishes the test run: closes everything still open and lets the
    /// [`ReportSink`] persist its buffered reports.
    ///
    /// # Errors
    ///
    /// If the [`ReportSink`] fails.
    pub fn finish(mut self) -> Result<S> {
        self.run_finished(SystemTime::now())?;
        Ok(self.sink)
    }

    fn feature_started(&mut self, title: &str, at: SystemTime) -> Result<()> {
        if !self.is_idle() {
            warn!(
                feature = context::first_line(title),
                "feature started while another one is still open, closing it"
            );
            self.flush(at)?;
        }

        let feature = FeatureContext::new(title);
        if self.granularity == Granularity::Feature {
            self.suite = Some(context::open_suite(
                self.granularity,
                Some(&feature),
                "",
                at,
            ));
        }
        self.feature = Some(feature);
        Ok(())
    }

    fn feature_finished(&mut self, title: &str, at: SystemTime) -> Result<()> {
        if self.feature.is_none() {
            warn!(
                feature = context::first_line(title),
                "feature finished without being started"
            );
        }
        if let Some(unit) = &self.scenario {
            warn!(
                scenario = unit.name(),
                "feature finished while its scenario is still open"
            );
        }

        if self.granularity == Granularity::Feature && self.suite.is_none() {
            self.suite = Some(context::open_suite(
                self.granularity,
                Some(&FeatureContext::new(title)),
                "",
                at,
            ));
        }
        self.flush(at)
    }

    fn scenario_started(&mut self, name: &str, at: SystemTime) -> Result<()> {
        if let Some(unit) = self.scenario.take() {
            warn!(
                scenario = unit.name(),
                "scenario started while another one is still open, closing it"
            );
            self.close_scenario(unit, at)?;
        }
        if self.feature.is_none() {
            warn!(scenario = name, "scenario started outside of any feature");
        }

        match self.granularity {
            Granularity::Feature => {
                _ = self.ensure_suite(at);
            }
            Granularity::Scenario => {
                if let Some(stale) = self.suite.take() {
                    self.emit(stale, at)?;
                }
                self.suite = Some(context::open_suite(
                    self.granularity,
                    self.feature.as_ref(),
                    name,
                    at,
                ));
            }
        }
        self.scenario = Some(ScenarioUnit::start(name, at));
        Ok(())
    }

    fn scenario_finished(&mut self, name: &str, at: SystemTime) -> Result<()> {
        let unit = if let Some(unit) = self.scenario.take() {
            unit
        } else {
            warn!(
                scenario = name,
                "scenario finished without being started, recording it empty"
            );
            if self.suite.is_none() {
                self.suite = Some(context::open_suite(
                    self.granularity,
                    self.feature.as_ref(),
                    name,
                    at,
                ));
            }
            ScenarioUnit::start(name, at)
        };
        self.close_scenario(unit, at)
    }

    fn step_finished(&mut self, step: &StepResult, at: SystemTime) {
        if self.scenario.is_none() {
            warn!(
                step = %step.name,
                "no scenario was started for step, its timing won't be logged"
            );
        }
        _ = self.ensure_suite(at);
        self.scenario
            .get_or_insert_with(|| ScenarioUnit::start(step.name.clone(), at))
            .record(&step.outcome);
    }

    fn run_finished(&mut self, at: SystemTime) -> Result<()> {
        if !self.is_idle() {
            warn!(
                "test run finished while a feature or scenario is still open"
            );
            self.flush(at)?;
        }
        self.sink.finish()
    }

    /// Moves the given [`ScenarioUnit`] into the open [`TestSuite`], emitting
    /// the latter if it's scoped to a single scenario.
    fn close_scenario(
        &mut self,
        unit: ScenarioUnit,
        at: SystemTime,
    ) -> Result<()> {
        let case = unit.finish(at);
        self.ensure_suite(at).testcases.push(case);

        if self.granularity == Granularity::Scenario {
            if let Some(suite) = self.suite.take() {
                self.emit(suite, at)?;
            }
        }
        Ok(())
    }

    /// Returns the open [`TestSuite`], synthesizing a placeholder one if
    /// there is none.
    fn ensure_suite(&mut self, at: SystemTime) -> &mut TestSuite {
        let granularity = self.granularity;
        let feature = self.feature.as_ref();
        self.suite.get_or_insert_with(|| {
            warn!(
                feature = feature.map_or("", FeatureContext::name),
                "no report unit is open, synthesizing a placeholder, its \
                 timing will be wrong"
            );
            context::placeholder_suite(granularity, feature, at)
        })
    }

    /// Closes everything still open.
    fn flush(&mut self, at: SystemTime) -> Result<()> {
        self.feature = None;
        if let Some(unit) = self.scenario.take() {
            self.close_scenario(unit, at)?;
        }
        if let Some(suite) = self.suite.take() {
            self.emit(suite, at)?;
        }
        Ok(())
    }

    fn emit(&mut self, mut suite: TestSuite, at: SystemTime) -> Result<()> {
        suite.finish_at(at);
        debug!(
            suite = %suite.name,
            tests = suite.tests(),
            failures = suite.failures(),
            skipped = suite.skipped(),
            "report unit completed"
        );
        self.sink.write_report(suite)
    }

    const fn is_idle(&self) -> bool {
        self.feature.is_none()
            && self.suite.is_none()
            && self.scenario.is_none()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{
        error::ReportError,
        event::{StepException, StepOutcome},
    };

    use super::*;

    fn at(millis: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_millis(millis)
    }

    fn collecting(granularity: Granularity) -> Listener<Vec<TestSuite>> {
        Listener::with_granularity(vec![], granularity)
    }

    fn failed(name: &str) -> StepResult {
        StepResult::failed(name, StepException::new("AssertionError", name))
    }

    /// [`ReportSink`] failing on every write.
    struct Broken;

    impl ReportSink for Broken {
        fn write_report(&mut self, _: TestSuite) -> Result<()> {
            Err(ReportError::xml("broken"))
        }
    }

    #[test]
    fn tracks_open_feature_and_scenario() {
        let mut listener = collecting(Granularity::Feature);

        listener.on_feature_start("Cart\nAs a shopper").unwrap();
        assert_eq!(listener.current_feature(), Some("Cart"));
        assert!(listener.current_scenario().is_none());

        listener.on_scenario_start("add item").unwrap();
        assert_eq!(listener.status(), Some(Status::None));

        listener.on_step_result(&StepResult::skipped("Given a cart"));
        assert_eq!(listener.status(), Some(Status::Skipped));

        listener.on_scenario_end("add item").unwrap();
        assert!(listener.current_scenario().is_none());

        listener.on_feature_end("Cart\nAs a shopper").unwrap();
        assert!(listener.current_feature().is_none());
        assert!(listener.is_idle());
    }

    #[test]
    fn scenario_start_resets_status_and_failures() {
        let mut listener = collecting(Granularity::Feature);
        listener.on_feature_start("Cart").unwrap();
        listener.on_scenario_start("first").unwrap();
        listener.on_step_result(&failed("boom"));
        listener.on_scenario_end("first").unwrap();

        listener.on_scenario_start("second").unwrap();

        let unit = listener.current_scenario().unwrap();
        assert_eq!(unit.status(), Status::None);
        assert!(unit.failures().is_empty());
    }

    #[test]
    fn uses_event_timestamps() {
        let mut listener = collecting(Granularity::Feature);
        let events = [
            (Lifecycle::feature_started("Cart"), 0),
            (Lifecycle::scenario_started("add item"), 10),
            (StepResult::passed("Given a cart").into(), 20),
            (Lifecycle::scenario_finished("add item"), 110),
            (Lifecycle::feature_finished("Cart"), 200),
        ];
        for (ev, millis) in events {
            listener.handle_event(Event::at(ev, at(millis))).unwrap();
        }

        let suites = listener.finish().unwrap();
        let suite = &suites[0];
        assert_eq!(suite.duration(), Some(Duration::from_millis(200)));
        assert_eq!(
            suite.testcases[0].duration(),
            Some(Duration::from_millis(100)),
        );
    }

    #[test]
    fn scenario_granularity_emits_per_scenario() {
        let mut listener = collecting(Granularity::Scenario);
        listener.on_feature_start("Cart").unwrap();
        listener.on_scenario_start("add item").unwrap();
        listener.on_step_result(&StepResult::pending("When I add"));
        listener.on_scenario_end("add item").unwrap();
        assert_eq!(listener.sink().len(), 1);

        listener.on_scenario_start("remove item").unwrap();
        listener.on_scenario_end("remove item").unwrap();
        listener.on_feature_end("Cart").unwrap();

        let suites = listener.finish().unwrap();
        let names: Vec<_> = suites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Cart add item", "Cart remove item"]);
        assert_eq!(suites[0].testcases[0].name, "add item (PENDING)");
        assert_eq!(suites[1].testcases[0].name, "remove item");
    }

    #[test]
    fn dangling_scenario_is_closed_by_next_one() {
        let mut listener = collecting(Granularity::Feature);
        listener.on_feature_start("Cart").unwrap();
        listener.on_scenario_start("first").unwrap();
        listener.on_step_result(&StepResult::skipped("Given a cart"));
        listener.on_scenario_start("second").unwrap();
        listener.on_scenario_end("second").unwrap();
        listener.on_feature_end("Cart").unwrap();

        let suites = listener.finish().unwrap();
        let names: Vec<_> =
            suites[0].testcases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["first (SKIPPED)", "second"]);
    }

    #[test]
    fn dangling_feature_is_closed_by_next_one() {
        let mut listener = collecting(Granularity::Feature);
        listener.on_feature_start("Cart").unwrap();
        listener.on_scenario_start("add item").unwrap();
        listener.on_feature_start("Checkout").unwrap();
        listener.on_feature_end("Checkout").unwrap();

        let suites = listener.finish().unwrap();
        assert_eq!(suites.len(), 2);
        assert_eq!(suites[0].name, "Cart");
        assert_eq!(suites[0].testcases[0].name, "add item");
        assert_eq!(suites[1].name, "Checkout");
    }

    #[test]
    fn scenario_end_without_start_records_empty_case() {
        let mut listener = collecting(Granularity::Feature);
        listener.on_feature_start("Cart").unwrap();
        listener.on_scenario_end("ghost").unwrap();
        listener.on_feature_end("Cart").unwrap();

        let suites = listener.finish().unwrap();
        assert_eq!(suites[0].testcases[0].name, "ghost");
    }

    #[test]
    fn feature_end_without_start_still_reports() {
        let mut listener = collecting(Granularity::Feature);

        listener.on_feature_end("Cart\nAs a shopper").unwrap();

        assert_eq!(listener.sink().len(), 1);
        assert_eq!(listener.sink()[0].name, "Cart");
    }

    #[test]
    fn step_outside_scenario_in_scenario_granularity() {
        let mut listener = collecting(Granularity::Scenario);
        listener.on_feature_start("Cart").unwrap();

        listener.on_step_result(&StepResult::new(
            "Given a cart",
            StepOutcome::Undefined,
        ));
        listener.on_feature_end("Cart").unwrap();

        let suites = listener.finish().unwrap();
        assert_eq!(suites.len(), 1);
        assert_eq!(suites[0].name, "Cart Unspecified Feature Element");
        assert_eq!(suites[0].testcases[0].name, "Given a cart (PENDING)");
    }

    #[test]
    fn propagates_sink_errors() {
        let mut listener = Listener::new(Broken);
        listener.on_feature_start("Cart").unwrap();

        let res = listener.on_feature_end("Cart");

        assert!(matches!(res, Err(ReportError::Xml(_))));
        assert!(listener.is_idle());
    }

    #[test]
    fn failed_scenario_write_still_closes_feature() {
        let mut listener =
            Listener::with_granularity(Broken, Granularity::Scenario);
        listener.on_feature_start("Cart").unwrap();
        listener.on_scenario_start("add item").unwrap();

        let res = listener.on_feature_end("Cart");

        assert!(matches!(res, Err(ReportError::Xml(_))));
        assert!(listener.current_feature().is_none());
        assert!(listener.is_idle());
    }

    #[test]
    fn from_config_uses_granularity() {
        let config = Config {
            reports_dir: Some("unused".into()),
            granularity: Granularity::Scenario,
            ..Config::default()
        };

        let listener = Listener::from_config(&config).unwrap();

        assert_eq!(listener.granularity(), Granularity::Scenario);
        assert_eq!(listener.sink().dir(), std::path::Path::new("unused"));
    }
}
