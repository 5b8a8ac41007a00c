// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! In-memory report model: [`TestSuite`]s of [`TestCase`]s.

use std::time::{Duration, SystemTime};

use crate::{failure::Failure, status::Status};

/// Single recorded scenario.
#[derive(Clone, Debug, PartialEq)]
pub struct TestCase {
    /// Name of this [`TestCase`], as it appears in a report.
    pub name: String,

    /// [`Failure`]s of this [`TestCase`], in the order they've happened.
    pub failures: Vec<Failure>,

    /// Aggregated [`Status`] of this [`TestCase`].
    pub status: Status,

    started_at: Option<SystemTime>,
    finished_at: Option<SystemTime>,
}

impl TestCase {
    /// Creates a new, not yet started [`TestCase`].
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            failures: vec![],
            status: Status::None,
            started_at: None,
            finished_at: None,
        }
    }

    /// Marks this [`TestCase`] as started right now.
    pub fn start(&mut self) {
        self.start_at(SystemTime::now());
    }

    /// Marks this [`TestCase`] as started at the given time.
    pub fn start_at(&mut self, at: SystemTime) {
        self.started_at = Some(at);
    }

    /// Marks this [`TestCase`] as finished right now.
    pub fn finish(&mut self) {
        self.finish_at(SystemTime::now());
    }

    /// Marks this [`TestCase`] as finished at the given time.
    pub fn finish_at(&mut self, at: SystemTime) {
        self.finished_at = Some(at);
    }

    /// Returns when this [`TestCase`] has started, if it has.
    #[must_use]
    pub const fn started_at(&self) -> Option<SystemTime> {
        self.started_at
    }

    /// Returns when this [`TestCase`] has finished, if it has.
    #[must_use]
    pub const fn finished_at(&self) -> Option<SystemTime> {
        self.finished_at
    }

    /// Returns how long this [`TestCase`] took, if it has both started and
    /// finished in order.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        elapsed(self.started_at, self.finished_at)
    }

    /// Indicates whether this [`TestCase`] has failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        !self.failures.is_empty() || self.status == Status::Failed
    }

    /// Indicates whether this [`TestCase`] was skipped.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        !self.is_failed() && self.status == Status::Skipped
    }
}

/// Group of [`TestCase`]s written as a single report unit.
#[derive(Clone, Debug, PartialEq)]
pub struct TestSuite {
    /// Name of this [`TestSuite`].
    pub name: String,

    /// [`TestCase`]s of this [`TestSuite`], in the order they were added.
    pub testcases: Vec<TestCase>,

    started_at: Option<SystemTime>,
    finished_at: Option<SystemTime>,
}

impl TestSuite {
    /// Creates a new, not yet started [`TestSuite`].
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            testcases: vec![],
            started_at: None,
            finished_at: None,
        }
    }

    /// Marks this [`TestSuite`] as started right now.
    pub fn start(&mut self) {
        self.start_at(SystemTime::now());
    }

    /// Marks this [`TestSuite`] as started at the given time.
    pub fn start_at(&mut self, at: SystemTime) {
        self.started_at = Some(at);
    }

    /// Marks this [`TestSuite`] as finished right now.
    pub fn finish(&mut self) {
        self.finish_at(SystemTime::now());
    }

    /// Marks this [`TestSuite`] as finished at the given time.
    pub fn finish_at(&mut self, at: SystemTime) {
        self.finished_at = Some(at);
    }

    /// Returns when this [`TestSuite`] has started, if it has.
    #[must_use]
    pub const fn started_at(&self) -> Option<SystemTime> {
        self.started_at
    }

    /// Returns when this [`TestSuite`] has finished, if it has.
    #[must_use]
    pub const fn finished_at(&self) -> Option<SystemTime> {
        self.finished_at
    }

    /// Returns how long this [`TestSuite`] took, if it has both started and
    /// finished in order.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        elapsed(self.started_at, self.finished_at)
    }

    /// Number of [`TestCase`]s.
    #[must_use]
    pub fn tests(&self) -> usize {
        self.testcases.len()
    }

    /// Number of failed [`TestCase`]s.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.testcases.iter().filter(|c| c.is_failed()).count()
    }

    /// Number of skipped [`TestCase`]s.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.testcases.iter().filter(|c| c.is_skipped()).count()
    }
}

fn elapsed(
    started_at: Option<SystemTime>,
    finished_at: Option<SystemTime>,
) -> Option<Duration> {
    finished_at?.duration_since(started_at?).ok()
}

#[cfg(test)]
mod tests {
    use crate::event::StepException;

    use super::*;

    fn at(millis: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_millis(millis)
    }

    #[test]
    fn duration_requires_both_ends() {
        let mut case = TestCase::new("Checkout");
        assert_eq!(case.duration(), None);

        case.start_at(at(100));
        assert_eq!(case.duration(), None);

        case.finish_at(at(350));
        assert_eq!(case.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn finish_before_start_has_no_duration() {
        let mut suite = TestSuite::new("Cart");
        suite.start_at(at(500));
        suite.finish_at(at(100));

        assert_eq!(suite.duration(), None);
    }

    #[test]
    fn suite_counts_cases() {
        let mut failed = TestCase::new("a (FAILED)");
        failed.status = Status::Failed;
        failed
            .failures
            .push(Failure::new(&StepException::new("E", "boom")));
        let mut skipped = TestCase::new("b (SKIPPED)");
        skipped.status = Status::Skipped;
        let mut pending = TestCase::new("c (PENDING)");
        pending.status = Status::Pending;

        let mut suite = TestSuite::new("Cart");
        suite.testcases = vec![failed, skipped, pending, TestCase::new("d")];

        assert_eq!(suite.tests(), 4);
        assert_eq!(suite.failures(), 1);
        assert_eq!(suite.skipped(), 1);
    }

    #[test]
    fn start_uses_current_time() {
        let before = SystemTime::now();
        let mut case = TestCase::new("Checkout");
        case.start();
        case.finish();

        assert!(case.started_at().is_some_and(|t| t >= before));
        assert!(case.duration().is_some());
    }
}
