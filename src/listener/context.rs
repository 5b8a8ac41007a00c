// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Transient state of a [`Listener`] and the synthesis of missing parts of
//! it.
//!
//! [`Listener`]: super::Listener

use std::time::SystemTime;

use crate::{
    config::Granularity,
    event::StepOutcome,
    failure::Failure,
    report::{TestCase, TestSuite},
    status::Status,
};

/// Name of a feature-level [`TestSuite`] synthesized without any feature
/// being started.
pub const UNSPECIFIED_FEATURE: &str = "Unspecified Feature";

/// Name of a feature element synthesized when none was started.
pub const UNSPECIFIED_ELEMENT: &str = "Unspecified Feature Element";

/// Currently open feature.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeatureContext {
    name: String,
}

impl FeatureContext {
    /// Opens a new [`FeatureContext`] out of a raw feature title, keeping its
    /// first line only.
    #[must_use]
    pub fn new(title: &str) -> Self {
        Self {
            name: first_line(title).to_owned(),
        }
    }

    /// Returns the name of this feature.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Returns the first line of a possibly multi-line title.
#[must_use]
pub fn first_line(title: &str) -> &str {
    title.lines().next().unwrap_or_default()
}

/// Feature element being recorded.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioUnit {
    case: TestCase,
    status: Status,
}

impl ScenarioUnit {
    /// Opens a new [`ScenarioUnit`] with the given base `name`, started at the
    /// given time.
    #[must_use]
    pub fn start(name: impl Into<String>, at: SystemTime) -> Self {
        let mut case = TestCase::new(name);
        case.start_at(at);
        Self {
            case,
            status: Status::None,
        }
    }

    /// Records a single step's [`StepOutcome`].
    pub fn record(&mut self, outcome: &StepOutcome) {
        _ = self.status.elevate(Status::rank(outcome));
        if let StepOutcome::Failed(exception) = outcome {
            self.case.failures.push(Failure::new(exception));
        }
    }

    /// Returns the base name of this [`ScenarioUnit`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.case.name
    }

    /// Returns the aggregated [`Status`] so far.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the [`Failure`]s recorded so far.
    #[must_use]
    pub fn failures(&self) -> &[Failure] {
        &self.case.failures
    }

    /// Closes this [`ScenarioUnit`] at the given time, turning it into a
    /// status-annotated [`TestCase`].
    #[must_use]
    pub fn finish(self, at: SystemTime) -> TestCase {
        let Self { mut case, status } = self;
        case.name = status.decorate(&case.name);
        case.status = status;
        case.finish_at(at);
        case
    }
}

/// Forms the name of a scenario-level [`TestSuite`].
#[must_use]
pub fn scenario_suite_name(
    feature: Option<&FeatureContext>,
    element: &str,
) -> String {
    format!("{} {element}", feature.map_or("", FeatureContext::name))
        .trim()
        .to_owned()
}

/// Opens the [`TestSuite`] a scenario is recorded into.
#[must_use]
pub fn open_suite(
    granularity: Granularity,
    feature: Option<&FeatureContext>,
    element: &str,
    at: SystemTime,
) -> TestSuite {
    let name = match granularity {
        Granularity::Feature => feature
            .map_or(UNSPECIFIED_FEATURE, FeatureContext::name)
            .to_owned(),
        Granularity::Scenario => scenario_suite_name(feature, element),
    };
    let mut suite = TestSuite::new(name);
    suite.start_at(at);
    suite
}

/// Synthesizes a placeholder [`TestSuite`] when none is open.
#[must_use]
pub fn placeholder_suite(
    granularity: Granularity,
    feature: Option<&FeatureContext>,
    at: SystemTime,
) -> TestSuite {
    open_suite(granularity, feature, UNSPECIFIED_ELEMENT, at)
}
