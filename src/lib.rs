// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Listener of [Cucumber] lifecycle callbacks, recording them as
//! [JUnit XML][1] reports for CI servers.
//!
//! A BDD framework drives a [`Listener`] with feature, scenario and step
//! notifications. The [`Listener`] folds outcomes of all steps of a scenario
//! into a single [`Status`] (`FAILED > SKIPPED > PENDING > NONE`), records
//! failed steps as [`Failure`]s, and hands every completed [`TestSuite`] over
//! to a [`ReportSink`].
//!
//! ```rust
//! use cucumber_ci_reporter::{
//!     Listener, StepException, StepResult, report::TestSuite,
//! };
//!
//! # fn main() -> cucumber_ci_reporter::Result<()> {
//! let mut listener = Listener::new(Vec::<TestSuite>::new());
//!
//! listener.on_feature_start("Cart\nAs a shopper")?;
//! listener.on_scenario_start("add item")?;
//! listener.on_step_result(&StepResult::passed("Given an empty cart"));
//! listener.on_step_result(&StepResult::failed(
//!     "Then it has 1 item",
//!     StepException::new("AssertionError", "expected 1, got 0"),
//! ));
//! listener.on_scenario_end("add item")?;
//! listener.on_feature_end("Cart\nAs a shopper")?;
//!
//! let suites = listener.finish()?;
//! assert_eq!(suites[0].name, "Cart");
//! assert_eq!(suites[0].testcases[0].name, "add item (FAILED)");
//! # Ok(())
//! # }
//! ```
//!
//! [Cucumber]: https://cucumber.io
//! [1]: https://llg.cubic.org/docs/junit

pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod failure;
pub mod listener;
pub mod report;
pub mod status;

pub use gherkin;

#[doc(inline)]
pub use self::{
    cli::Cli,
    config::{Config, Granularity},
    error::{ReportError, Result},
    event::{
        Event, FeatureElement, Lifecycle, StepException, StepOutcome,
        StepResult,
    },
    failure::Failure,
    listener::Listener,
    report::{ReportManager, ReportSink, TestCase, TestSuite},
    status::Status,
};
