// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`JUnitWriter`] outputting a single [JUnit XML report][1] into an
//! [`io::Write`] implementor.
//!
//! [1]: https://llg.cubic.org/docs/junit

use std::io;

use junit_report::Report;
use tracing::warn;

use super::{ReportSink, TestSuite, xml};
use crate::error::Result;

/// [`ReportSink`] collecting all [`TestSuite`]s into a single
/// `<testsuites>` document, written out on [`ReportSink::finish()`].
///
/// The document is written exactly once: [`TestSuite`]s arriving after it
/// are dropped with a warning, and repeated [`ReportSink::finish()`] calls do
/// nothing.
#[derive(Debug)]
pub struct JUnitWriter<Out: io::Write> {
    /// [`io::Write`] implementor to output XML report into.
    output: Out,

    /// [JUnit XML report][1] being collected.
    ///
    /// [1]: https://llg.cubic.org/docs/junit
    report: Report,

    /// Indicates whether the report has been written already.
    finished: bool,
}

impl<Out: io::Write> JUnitWriter<Out> {
    /// Creates a new [`JUnitWriter`] outputting XML into the given `output`.
    #[must_use]
    pub fn new(output: Out) -> Self {
        Self {
            output,
            report: Report::new(),
            finished: false,
        }
    }

    /// Returns the underlying output.
    #[must_use]
    pub fn into_inner(self) -> Out {
        self.output
    }
}

impl<Out: io::Write> ReportSink for JUnitWriter<Out> {
    fn write_report(&mut self, suite: TestSuite) -> Result<()> {
        if self.finished {
            warn!(
                suite = %suite.name,
                "report is already written, dropping the test suite"
            );
        } else {
            self.report.add_testsuite(xml::testsuite(&suite));
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        xml::write(&self.report, &mut self.output)?;
        self.output.flush()?;
        Ok(())
    }
}
