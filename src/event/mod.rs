// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Notifications a [`Listener`] receives from a BDD framework.
//!
//! A framework either calls the `on_*` methods of a [`Listener`] directly, or
//! feeds it [`Event`]s of a [`Lifecycle`] via [`Listener::handle_event()`],
//! the latter also carrying the time each notification has happened at.
//!
//! [`Listener`]: crate::Listener
//! [`Listener::handle_event()`]: crate::Listener::handle_event

pub mod event_struct;
pub mod lifecycle;
pub mod step;

pub use self::{
    event_struct::{Event, Metadata},
    lifecycle::Lifecycle,
    step::{FeatureElement, StepException, StepOutcome, StepResult},
};
