// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Failure`] records of failed steps.

use crate::event::StepException;

/// Failure of a single step, as recorded in a report.
///
/// Always a failure-class result, never an error-class one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Failure {
    name: String,
    message: String,
    location: String,
}

impl Failure {
    /// Captures the given [`StepException`] into a new [`Failure`].
    #[must_use]
    pub fn new(exception: &StepException) -> Self {
        Self {
            name: exception.type_name.clone(),
            message: exception.message.clone(),
            location: exception.backtrace.join("\n"),
        }
    }

    /// Always `true`.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        true
    }

    /// Always `false`.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !self.is_failure()
    }

    /// Type name of the underlying exception.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Message of the underlying exception.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Backtrace of the underlying exception, one frame per line.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl From<&StepException> for Failure {
    fn from(exception: &StepException) -> Self {
        Self::new(exception)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> Failure {
        Failure::new(
            &StepException::new("Exception name", "Exception message")
                .with_backtrace(["First line", "Second line"]),
        )
    }

    #[test]
    fn is_always_a_failure() {
        assert!(failure().is_failure());
        assert!(!failure().is_error());
    }

    #[test]
    fn propagates_name_and_message() {
        assert_eq!(failure().name(), "Exception name");
        assert_eq!(failure().message(), "Exception message");
    }

    #[test]
    fn joins_backtrace() {
        assert_eq!(failure().location(), "First line\nSecond line");
    }

    #[test]
    fn empty_backtrace_gives_empty_location() {
        let failure = Failure::from(&StepException::new("E", "m"));

        assert_eq!(failure.location(), "");
    }
}
