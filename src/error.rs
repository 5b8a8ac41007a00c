// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of persisting reports.
//!
//! The [`Listener`] itself never fails on a malformed sequence of callbacks,
//! so everything here originates from a [`ReportSink`].
//!
//! [`Listener`]: crate::Listener
//! [`ReportSink`]: crate::ReportSink

use std::io;

use derive_more::with_trait::{Display, Error};

/// Error of writing a report through a [`ReportSink`].
///
/// [`ReportSink`]: crate::ReportSink
#[derive(Debug, Display, Error)]
pub enum ReportError {
    /// I/O error while creating a reports directory or writing a file.
    #[display("I/O error: {_0}")]
    Io(io::Error),

    /// [JUnit XML][1] serialization failed.
    ///
    /// [1]: https://llg.cubic.org/docs/junit
    #[display("XML generation failed: {_0}")]
    Xml(#[error(not(source))] String),

    /// [`ReportManager`] was given an empty category, so no report file name
    /// can be formed.
    ///
    /// [`ReportManager`]: crate::report::ReportManager
    #[display("Report category must not be empty")]
    EmptyCategory,
}

/// Result type alias using [`ReportError`].
pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    /// Creates a new [`ReportError::Xml`].
    #[must_use]
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Returns `true` if this is an I/O error.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

impl From<io::Error> for ReportError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn io_error_keeps_source() {
        let err: ReportError =
            io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();

        assert!(err.is_io_error());
        assert_eq!(err.to_string(), "I/O error: denied");
        assert!(err.source().is_some());
    }

    #[test]
    fn xml_error_has_no_source() {
        let err = ReportError::xml("unclosed tag");

        assert!(!err.is_io_error());
        assert_eq!(err.to_string(), "XML generation failed: unclosed tag");
        assert!(err.source().is_none());
    }

    #[test]
    fn empty_category_display() {
        assert_eq!(
            ReportError::EmptyCategory.to_string(),
            "Report category must not be empty",
        );
    }
}
