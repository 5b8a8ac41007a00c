// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Lifecycle notifications of a test run.

use super::StepResult;

/// Single notification in a lifecycle of a test run.
///
/// A well-behaved framework emits them in the following order, repeated for
/// each feature:
/// ```text
/// FeatureStarted
///   → [ScenarioStarted → [Step]* → ScenarioFinished]*
///   → FeatureFinished
/// ```
/// followed by a single [`Lifecycle::Finished`] at the very end.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Lifecycle {
    /// Feature with the given (possibly multi-line) title has started.
    FeatureStarted(String),

    /// Feature element with the given name has started.
    ScenarioStarted(String),

    /// Step has finished with the given [`StepResult`].
    Step(StepResult),

    /// Feature element with the given name has finished.
    ScenarioFinished(String),

    /// Feature with the given title has finished.
    FeatureFinished(String),

    /// Whole test run has finished.
    Finished,
}

impl Lifecycle {
    /// Constructs a [`Lifecycle::FeatureStarted`].
    #[must_use]
    pub fn feature_started(title: impl Into<String>) -> Self {
        Self::FeatureStarted(title.into())
    }

    /// Constructs a [`Lifecycle::ScenarioStarted`].
    #[must_use]
    pub fn scenario_started(name: impl Into<String>) -> Self {
        Self::ScenarioStarted(name.into())
    }

    /// Constructs a [`Lifecycle::ScenarioFinished`].
    #[must_use]
    pub fn scenario_finished(name: impl Into<String>) -> Self {
        Self::ScenarioFinished(name.into())
    }

    /// Constructs a [`Lifecycle::FeatureFinished`].
    #[must_use]
    pub fn feature_finished(title: impl Into<String>) -> Self {
        Self::FeatureFinished(title.into())
    }
}

impl From<StepResult> for Lifecycle {
    fn from(step: StepResult) -> Self {
        Self::Step(step)
    }
}
