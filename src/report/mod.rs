// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Report model and the sinks persisting it.
//!
//! A [`Listener`] hands every completed [`TestSuite`] over to a
//! [`ReportSink`]. The provided sinks are:
//! - [`ReportManager`]: a [JUnit XML][1] file per [`TestSuite`];
//! - [`JUnitWriter`]: a single [JUnit XML][1] document for the whole run;
//! - [`Vec`]`<`[`TestSuite`]`>`: keeps everything in memory.
//!
//! [`Listener`]: crate::Listener
//! [1]: https://llg.cubic.org/docs/junit

pub mod junit_writer;
pub mod manager;
pub mod model;
pub mod xml;

use crate::error::Result;

#[doc(inline)]
pub use self::{
    junit_writer::JUnitWriter,
    manager::ReportManager,
    model::{TestCase, TestSuite},
};

/// Destination of completed [`TestSuite`]s.
pub trait ReportSink {
    /// Persists the given completed [`TestSuite`].
    ///
    /// # Errors
    ///
    /// If the [`TestSuite`] cannot be persisted.
    fn write_report(&mut self, suite: TestSuite) -> Result<()>;

    /// Called once the whole run has finished.
    ///
    /// # Errors
    ///
    /// If buffered reports cannot be persisted.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl ReportSink for Vec<TestSuite> {
    fn write_report(&mut self, suite: TestSuite) -> Result<()> {
        self.push(suite);
        Ok(())
    }
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn write_report(&mut self, suite: TestSuite) -> Result<()> {
        (**self).write_report(suite)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn write_report(&mut self, suite: TestSuite) -> Result<()> {
        (**self).write_report(suite)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}
