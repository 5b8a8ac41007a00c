// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Step outcomes and the things they are reported about.

use std::{
    any::Any,
    backtrace::{Backtrace, BacktraceStatus},
    error::Error as StdError,
    iter,
};

use derive_more::with_trait::Display;

/// Name of a [`StepException`] built out of a panic payload.
pub const PANIC_TYPE_NAME: &str = "panic";

/// Name of a [`StepException`] built out of a type-erased error whose type
/// name cannot be recovered.
pub const DYN_ERROR_TYPE_NAME: &str = "dyn Error";

/// Anything entered as a feature element (a [Scenario] or an example of it),
/// having a display name.
///
/// The name is read once, when the element is entered, so implementors don't
/// need to stay valid afterwards.
///
/// [Scenario]: https://cucumber.io/docs/gherkin/reference#example
pub trait FeatureElement {
    /// Returns the declared name of this element.
    fn name(&self) -> &str;
}

impl FeatureElement for str {
    fn name(&self) -> &str {
        self
    }
}

impl FeatureElement for String {
    fn name(&self) -> &str {
        self
    }
}

impl FeatureElement for gherkin::Scenario {
    fn name(&self) -> &str {
        &self.name
    }
}

impl<T: FeatureElement + ?Sized> FeatureElement for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Error a failed step has been terminated with.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StepException {
    /// Concrete type name of the error.
    pub type_name: String,

    /// Message of the error.
    pub message: String,

    /// Backtrace lines, in the order they were captured (innermost frame
    /// first for a [`Backtrace`], outermost cause first for a chain of error
    /// sources).
    pub backtrace: Vec<String>,
}

impl StepException {
    /// Creates a new [`StepException`] without a backtrace.
    #[must_use]
    pub fn new(
        type_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            backtrace: vec![],
        }
    }

    /// Sets the backtrace lines of this [`StepException`].
    #[must_use]
    pub fn with_backtrace<I>(mut self, lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.backtrace = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Creates a new [`StepException`] out of an [`Error`] of a concrete type,
    /// using its chain of sources as the backtrace.
    ///
    /// Use [`StepException::from_dyn_error()`] for type-erased errors, as
    /// their concrete type cannot be named statically.
    ///
    /// [`Error`]: StdError
    #[must_use]
    pub fn from_error<E: StdError>(err: &E) -> Self {
        Self::new(std::any::type_name::<E>(), err.to_string())
            .with_backtrace(causes(err))
    }

    /// Creates a new [`StepException`] out of a type-erased [`Error`] (like
    /// one coming from a `Box<dyn Error>`), using its chain of sources as the
    /// backtrace.
    ///
    /// The type name is taken from the leading identifier of the error's
    /// [`Debug`] representation, which is its type name for derived
    /// [`Debug`] implementations.
    ///
    /// [`Debug`]: std::fmt::Debug
    /// [`Error`]: StdError
    #[must_use]
    pub fn from_dyn_error(err: &(dyn StdError + 'static)) -> Self {
        Self::new(debug_type_name(err), err.to_string())
            .with_backtrace(causes(err))
    }

    /// Creates a new [`StepException`] out of a payload caught with
    /// [`catch_unwind()`].
    ///
    /// The backtrace is left empty: by the time a payload is caught, the
    /// panicking frames are gone. Capture a [`Backtrace`] in a panic hook and
    /// attach it with [`StepException::with_captured_backtrace()`].
    ///
    /// [`catch_unwind()`]: std::panic::catch_unwind()
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        Self::new(PANIC_TYPE_NAME, coerce_panic(payload))
    }

    /// Sets the backtrace lines of this [`StepException`] from the given
    /// [`Backtrace`], if it was actually captured.
    #[must_use]
    pub fn with_captured_backtrace(self, backtrace: &Backtrace) -> Self {
        if backtrace.status() != BacktraceStatus::Captured {
            return self;
        }
        let rendered = backtrace.to_string();
        self.with_backtrace(rendered.lines())
    }
}

/// Renders the chain of sources of the given [`Error`], outermost first.
///
/// [`Error`]: StdError
fn causes(err: &dyn StdError) -> Vec<String> {
    iter::successors(err.source(), |&e| e.source())
        .map(|e| format!("caused by: {e}"))
        .collect()
}

/// Extracts a type name out of the [`Debug`] representation of an [`Error`].
///
/// [`Debug`]: std::fmt::Debug
/// [`Error`]: StdError
fn debug_type_name(err: &dyn StdError) -> String {
    let debug = format!("{err:?}");
    let name = debug
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == ':'))
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(DYN_ERROR_TYPE_NAME);
    name.to_owned()
}

/// Coerces a panic payload into a readable message.
fn coerce_panic(payload: &(dyn Any + Send)) -> String {
    if let Some(string) = payload.downcast_ref::<String>() {
        string.clone()
    } else if let Some(&string) = payload.downcast_ref::<&str>() {
        string.to_owned()
    } else {
        "(Could not resolve panic payload)".to_owned()
    }
}

/// Outcome of a single executed step.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum StepOutcome {
    /// Step passed.
    #[display("passed")]
    Passed,

    /// Step is marked as not implemented yet.
    #[display("pending")]
    Pending,

    /// No step definition matches the step.
    #[display("undefined")]
    Undefined,

    /// Step wasn't executed, usually because a previous one has failed.
    #[display("skipped")]
    Skipped,

    /// Step failed with the given [`StepException`].
    #[display("failed")]
    Failed(StepException),
}

impl StepOutcome {
    /// Indicates whether this [`StepOutcome`] is a failure.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Result of a single step, as reported by a framework.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StepResult {
    /// Name of the step.
    pub name: String,

    /// [`StepOutcome`] of the step.
    pub outcome: StepOutcome,
}

impl StepResult {
    /// Creates a new [`StepResult`].
    #[must_use]
    pub fn new(name: impl Into<String>, outcome: StepOutcome) -> Self {
        Self {
            name: name.into(),
            outcome,
        }
    }

    /// Creates a [`StepOutcome::Passed`] [`StepResult`].
    #[must_use]
    pub fn passed(name: impl Into<String>) -> Self {
        Self::new(name, StepOutcome::Passed)
    }

    /// Creates a [`StepOutcome::Pending`] [`StepResult`].
    #[must_use]
    pub fn pending(name: impl Into<String>) -> Self {
        Self::new(name, StepOutcome::Pending)
    }

    /// Creates a [`StepOutcome::Undefined`] [`StepResult`].
    #[must_use]
    pub fn undefined(name: impl Into<String>) -> Self {
        Self::new(name, StepOutcome::Undefined)
    }

    /// Creates a [`StepOutcome::Skipped`] [`StepResult`].
    #[must_use]
    pub fn skipped(name: impl Into<String>) -> Self {
        Self::new(name, StepOutcome::Skipped)
    }

    /// Creates a [`StepOutcome::Failed`] [`StepResult`].
    #[must_use]
    pub fn failed(name: impl Into<String>, exception: StepException) -> Self {
        Self::new(name, StepOutcome::Failed(exception))
    }

    /// Creates a [`StepResult`] of a parsed [`gherkin::Step`], naming it as
    /// `<keyword> <text>`.
    #[must_use]
    pub fn for_step(step: &gherkin::Step, outcome: StepOutcome) -> Self {
        Self::new(format!("{} {}", step.keyword.trim(), step.value), outcome)
    }
}
