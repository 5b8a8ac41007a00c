// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Conversion of the report model into [JUnit XML][1] elements.
//!
//! [1]: https://llg.cubic.org/docs/junit

use itertools::Itertools as _;
use junit_report::{Duration, Report, TestSuiteBuilder};

use super::model::{TestCase, TestSuite};
use crate::{
    error::{ReportError, Result},
    failure::Failure,
};

/// Forms a [JUnit `testsuite`][1] out of the given [`TestSuite`].
///
/// [1]: https://llg.cubic.org/docs/junit
#[must_use]
pub fn testsuite(suite: &TestSuite) -> junit_report::TestSuite {
    let mut builder = TestSuiteBuilder::new(&suite.name);
    if let Some(at) = suite.started_at() {
        _ = builder.set_timestamp(at.into());
    }
    for case in &suite.testcases {
        _ = builder.add_testcase(testcase(case));
    }
    builder.build()
}

/// Forms a [JUnit `testcase`][1] out of the given [`TestCase`].
///
/// The first [`Failure`] gives the type and message of the `<failure>`
/// element, while all of them are listed in its `<system-out>`.
///
/// [1]: https://llg.cubic.org/docs/junit
#[must_use]
pub fn testcase(case: &TestCase) -> junit_report::TestCase {
    let time = case
        .duration()
        .and_then(|d| Duration::try_from(d).ok())
        .unwrap_or(Duration::ZERO);

    match case.failures.first() {
        Some(first) => {
            let mut out = junit_report::TestCase::failure(
                &case.name,
                time,
                first.name(),
                first.message(),
            );
            out.set_system_out(&render_failures(&case.failures));
            out
        }
        None if case.is_skipped() => {
            junit_report::TestCase::skipped(&case.name)
        }
        None => junit_report::TestCase::success(&case.name, time),
    }
}

/// Serializes the given [`Report`] into the `output`.
pub fn write(report: &Report, output: impl std::io::Write) -> Result<()> {
    report
        .write_xml(output)
        .map_err(|e| ReportError::xml(e.to_string()))
}

fn render_failures(failures: &[Failure]) -> String {
    failures
        .iter()
        .map(|f| {
            if f.location().is_empty() {
                format!("{}: {}", f.name(), f.message())
            } else {
                format!("{}: {}\n{}", f.name(), f.message(), f.location())
            }
        })
        .join("\n\n")
}
