// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Aggregated [`Status`] of a scenario.

use derive_more::with_trait::Display;

use crate::event::StepOutcome;

/// Worst outcome observed among the steps of a single scenario.
///
/// Variants are declared in ascending precedence, so the derived [`Ord`]
/// ranks them as `Failed > Skipped > Pending > None`.
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
pub enum Status {
    /// Nothing but passed steps so far.
    #[default]
    #[display("NONE")]
    None,

    /// At least one step is pending or undefined.
    #[display("PENDING")]
    Pending,

    /// At least one step was skipped.
    #[display("SKIPPED")]
    Skipped,

    /// At least one step has failed.
    #[display("FAILED")]
    Failed,
}

impl Status {
    /// Ranks a single [`StepOutcome`].
    ///
    /// [`StepOutcome::Pending`] and [`StepOutcome::Undefined`] are
    /// indistinguishable here.
    #[must_use]
    pub const fn rank(outcome: &StepOutcome) -> Self {
        match outcome {
            StepOutcome::Passed => Self::None,
            StepOutcome::Pending | StepOutcome::Undefined => Self::Pending,
            StepOutcome::Skipped => Self::Skipped,
            StepOutcome::Failed(_) => Self::Failed,
        }
    }

    /// Raises this [`Status`] to the `other` one if it has a higher
    /// precedence, returning whether it has changed.
    ///
    /// A [`Status`] never goes down.
    pub fn elevate(&mut self, other: Self) -> bool {
        let raised = other > *self;
        if raised {
            *self = other;
        }
        raised
    }

    /// Returns the suffix appended to a scenario name, if any.
    #[must_use]
    pub const fn suffix(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Pending => Some("(PENDING)"),
            Self::Skipped => Some("(SKIPPED)"),
            Self::Failed => Some("(FAILED)"),
        }
    }

    /// Decorates the given scenario `name` with the [`Status::suffix()`].
    #[must_use]
    pub fn decorate(self, name: &str) -> String {
        match self.suffix() {
            Some(suffix) => format!("{name} {suffix}"),
            None => name.trim().to_owned(),
        }
    }
}

impl From<&StepOutcome> for Status {
    fn from(outcome: &StepOutcome) -> Self {
        Self::rank(outcome)
    }
}

#[cfg(test)]
mod tests {
    use crate::event::StepException;

    use super::*;

    fn failed() -> StepOutcome {
        StepOutcome::Failed(StepException::new("Error", "boom"))
    }

    fn fold(outcomes: &[StepOutcome]) -> Status {
        outcomes.iter().fold(Status::None, |mut st, o| {
            _ = st.elevate(o.into());
            st
        })
    }

    #[test]
    fn precedence_order() {
        assert!(Status::Failed > Status::Skipped);
        assert!(Status::Skipped > Status::Pending);
        assert!(Status::Pending > Status::None);
        assert_eq!(Status::default(), Status::None);
    }

    #[test]
    fn ranks_outcomes() {
        assert_eq!(Status::rank(&StepOutcome::Passed), Status::None);
        assert_eq!(Status::rank(&StepOutcome::Pending), Status::Pending);
        assert_eq!(Status::rank(&StepOutcome::Undefined), Status::Pending);
        assert_eq!(Status::rank(&StepOutcome::Skipped), Status::Skipped);
        assert_eq!(Status::rank(&failed()), Status::Failed);
    }

    #[test]
    fn elevates_to_highest_regardless_of_order() {
        let pending_skipped_failed =
            [StepOutcome::Pending, StepOutcome::Skipped, failed()];
        let skipped_pending = [StepOutcome::Skipped, StepOutcome::Pending];
        let failed_then_rest =
            [failed(), StepOutcome::Skipped, StepOutcome::Pending];

        assert_eq!(fold(&pending_skipped_failed), Status::Failed);
        assert_eq!(fold(&skipped_pending), Status::Skipped);
        assert_eq!(fold(&failed_then_rest), Status::Failed);
        assert_eq!(fold(&[StepOutcome::Passed]), Status::None);
    }

    #[test]
    fn elevate_reports_changes() {
        let mut st = Status::Skipped;

        assert!(!st.elevate(Status::Pending));
        assert!(!st.elevate(Status::Skipped));
        assert!(st.elevate(Status::Failed));
        assert_eq!(st, Status::Failed);
    }

    #[test]
    fn decorates_names() {
        assert_eq!(Status::None.decorate("  Checkout "), "Checkout");
        assert_eq!(Status::Pending.decorate("Checkout"), "Checkout (PENDING)");
        assert_eq!(Status::Skipped.decorate("Checkout"), "Checkout (SKIPPED)");
        assert_eq!(Status::Failed.decorate("Checkout"), "Checkout (FAILED)");
    }

    #[test]
    fn displays_upper_case() {
        assert_eq!(Status::Skipped.to_string(), "SKIPPED");
    }
}
