// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration of a [`Listener`].
//!
//! [`Listener`]: crate::Listener

use std::{path::PathBuf, str::FromStr};

use derive_more::with_trait::Display;
use smart_default::SmartDefault;

use crate::cli::Cli;

/// Category of reports produced by a [`Listener`] by default.
///
/// [`Listener`]: crate::Listener
pub const DEFAULT_CATEGORY: &str = "features";

/// Scope of a single report unit ([`TestSuite`]).
///
/// [`TestSuite`]: crate::report::TestSuite
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
pub enum Granularity {
    /// One [`TestSuite`] per feature, holding a [`TestCase`] per scenario.
    ///
    /// [`TestCase`]: crate::report::TestCase
    /// [`TestSuite`]: crate::report::TestSuite
    #[default]
    #[display("feature")]
    Feature,

    /// One [`TestSuite`] per scenario, named `<feature> <scenario>`.
    ///
    /// [`TestSuite`]: crate::report::TestSuite
    #[display("scenario")]
    Scenario,
}

impl FromStr for Granularity {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "feature" => Ok(Self::Feature),
            "scenario" => Ok(Self::Scenario),
            _ => Err("possible options: feature, scenario"),
        }
    }
}

/// Configuration of a [`Listener`] and its [`ReportManager`].
///
/// [`Listener`]: crate::Listener
/// [`ReportManager`]: crate::report::ReportManager
#[derive(Clone, Debug, Eq, PartialEq, SmartDefault)]
pub struct Config {
    /// Category of the reports, prefixing their file names.
    #[default(DEFAULT_CATEGORY.to_owned())]
    pub category: String,

    /// Directory to write reports into.
    ///
    /// If [`None`], the `CI_REPORTS` environment variable is used, falling
    /// back to `<category>/reports`.
    pub reports_dir: Option<PathBuf>,

    /// Scope of a single report unit.
    pub granularity: Granularity,
}

impl Config {
    /// Overrides this [`Config`] with the options explicitly set in the given
    /// [`Cli`].
    #[must_use]
    pub fn apply_cli(mut self, cli: Cli) -> Self {
        if let Some(dir) = cli.reports_dir {
            self.reports_dir = Some(dir);
        }
        if let Some(granularity) = cli.granularity {
            self.granularity = granularity;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();

        assert_eq!(config.category, "features");
        assert_eq!(config.reports_dir, None);
        assert_eq!(config.granularity, Granularity::Feature);
    }

    #[test]
    fn parses_granularity() {
        assert_eq!("feature".parse::<Granularity>(), Ok(Granularity::Feature));
        assert_eq!(
            "Scenario".parse::<Granularity>(),
            Ok(Granularity::Scenario),
        );
        assert_eq!(
            "step".parse::<Granularity>(),
            Err("possible options: feature, scenario"),
        );
    }

    #[test]
    fn cli_overrides_only_set_options() {
        let base = Config {
            reports_dir: Some("base".into()),
            ..Config::default()
        };

        let unchanged = base.clone().apply_cli(Cli::default());
        let changed = base.apply_cli(Cli {
            reports_dir: None,
            granularity: Some(Granularity::Scenario),
        });

        assert_eq!(unchanged.reports_dir, Some("base".into()));
        assert_eq!(unchanged.granularity, Granularity::Feature);
        assert_eq!(changed.reports_dir, Some("base".into()));
        assert_eq!(changed.granularity, Granularity::Scenario);
    }
}
