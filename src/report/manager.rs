// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`ReportManager`] writing a [JUnit XML][1] file per [`TestSuite`].
//!
//! [1]: https://llg.cubic.org/docs/junit

use std::{
    env,
    fs::{self, File},
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use junit_report::Report;
use lazy_regex::regex;
use tracing::debug;

use super::{ReportSink, TestSuite, xml};
use crate::{
    config::Config,
    error::{ReportError, Result},
};

/// Environment variable overriding the default reports directory.
pub const REPORTS_DIR_ENV: &str = "CI_REPORTS";

/// Maximum length (in bytes) of a report file name without its extension.
pub const MAX_FILENAME_SIZE: usize = 240;

/// [`ReportSink`] persisting each [`TestSuite`] into its own XML file.
///
/// Files are named `<CATEGORY>-<suite name>.xml`, with every run of
/// non-alphanumeric characters in the suite name replaced by a `-`.
#[derive(Clone, Debug)]
pub struct ReportManager {
    /// Directory to put reports into.
    dir: PathBuf,

    /// Upper-cased category prefixing every file name.
    prefix: String,
}

impl ReportManager {
    /// Creates a new [`ReportManager`] for the given `category`, writing into
    /// the directory from the [`REPORTS_DIR_ENV`] environment variable, or
    /// into `<category>/reports` if it's not set.
    ///
    /// # Errors
    ///
    /// If the `category` is empty.
    pub fn new(category: &str) -> Result<Self> {
        let dir = env::var_os(REPORTS_DIR_ENV)
            .map_or_else(|| default_dir(category), PathBuf::from);
        Self::with_dir(category, dir)
    }

    /// Creates a new [`ReportManager`] for the given `category`, writing into
    /// the given `dir`.
    ///
    /// # Errors
    ///
    /// If the `category` is empty.
    pub fn with_dir(category: &str, dir: impl Into<PathBuf>) -> Result<Self> {
        if category.trim().is_empty() {
            return Err(ReportError::EmptyCategory);
        }
        Ok(Self {
            dir: dir.into(),
            prefix: category.to_uppercase(),
        })
    }

    /// Creates a new [`ReportManager`] out of the given [`Config`].
    ///
    /// # Errors
    ///
    /// If the [`Config::category`] is empty.
    pub fn from_config(config: &Config) -> Result<Self> {
        match &config.reports_dir {
            Some(dir) => Self::with_dir(&config.category, dir),
            None => Self::new(&config.category),
        }
    }

    /// Returns the directory reports are written into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path of the file the given [`TestSuite`] is written into.
    #[must_use]
    pub fn path_for(&self, suite: &TestSuite) -> PathBuf {
        let name = regex!("[^a-zA-Z0-9]+").replace_all(&suite.name, "-");
        let mut basename = format!("{}-{name}", self.prefix);
        truncate(&mut basename, MAX_FILENAME_SIZE);
        self.dir.join(format!("{basename}.xml"))
    }
}

impl ReportSink for ReportManager {
    fn write_report(&mut self, suite: TestSuite) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(&suite);

        let mut report = Report::new();
        report.add_testsuite(xml::testsuite(&suite));

        let mut out = BufWriter::new(File::create(&path)?);
        xml::write(&report, &mut out)?;
        out.flush()?;

        debug!(suite = %suite.name, path = %path.display(), "report written");
        Ok(())
    }
}

fn default_dir(category: &str) -> PathBuf {
    Path::new(&category.to_lowercase()).join("reports")
}

fn truncate(s: &mut String, max: usize) {
    if s.len() > max {
        let mut at = max;
        while !s.is_char_boundary(at) {
            at -= 1;
        }
        s.truncate(at);
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::report::TestCase;

    use super::*;

    #[test]
    fn rejects_empty_category() {
        assert!(matches!(
            ReportManager::with_dir(" ", "reports"),
            Err(ReportError::EmptyCategory),
        ));
    }

    #[test]
    fn default_dir_is_lowercased_category() {
        assert_eq!(
            default_dir("Features"),
            Path::new("features").join("reports"),
        );
    }

    #[test]
    fn sanitizes_file_names() {
        let manager = ReportManager::with_dir("features", "out").unwrap();

        let path = manager.path_for(&TestSuite::new("Cart: add & remove!"));

        assert_eq!(
            path,
            Path::new("out").join("FEATURES-Cart-add-remove-.xml"),
        );
    }

    #[test]
    fn truncates_long_file_names() {
        let manager = ReportManager::with_dir("features", "out").unwrap();

        let path = manager.path_for(&TestSuite::new("x".repeat(500)));
        let stem = path.file_stem().unwrap().to_str().unwrap();

        assert_eq!(stem.len(), MAX_FILENAME_SIZE);
        assert!(stem.starts_with("FEATURES-xxx"));
    }

    #[test]
    fn truncates_on_char_boundary() {
        let mut s = "aé".to_owned();
        truncate(&mut s, 2);

        assert_eq!(s, "a");
    }

    #[test]
    fn writes_report_into_created_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("reports");
        let mut manager = ReportManager::with_dir("features", &dir).unwrap();
        let mut suite = TestSuite::new("Cart");
        suite.testcases.push(TestCase::new("add item"));

        manager.write_report(suite).unwrap();

        let xml = fs::read_to_string(dir.join("FEATURES-Cart.xml")).unwrap();
        assert!(xml.contains("add item"));
    }

    #[test]
    fn from_config_prefers_explicit_dir() {
        let config = Config {
            reports_dir: Some("explicit".into()),
            ..Config::default()
        };

        let manager = ReportManager::from_config(&config).unwrap();

        assert_eq!(manager.dir(), Path::new("explicit"));
    }
}
