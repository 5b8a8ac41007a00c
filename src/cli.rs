// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI options of a [`Listener`].
//!
//! [`Listener`]: crate::Listener

use std::path::PathBuf;

use crate::config::Granularity;

/// CLI options of a [`Listener`], meant to be flattened into the CLI of a
/// test runner.
///
/// [`Listener`]: crate::Listener
#[derive(Clone, Debug, Default, clap::Args)]
#[group(skip)]
pub struct Cli {
    /// Directory to write XML reports into.
    #[arg(long, value_name = "dir", global = true)]
    pub reports_dir: Option<PathBuf>,

    /// Scope of a single report unit: a whole feature, or a single scenario.
    #[arg(long, value_name = "feature|scenario", global = true)]
    pub granularity: Option<Granularity>,
}
