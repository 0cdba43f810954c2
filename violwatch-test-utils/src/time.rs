// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: MIT OR Apache-2.0

use futures::future::{ready, Ready};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use violwatch_core::{Clock, Timer};

/// [`Timer`] whose sleeps complete immediately and are recorded.
#[derive(Clone, Default)]
pub struct InstantTimer {
    sleeps: Rc<RefCell<Vec<Duration>>>,
}

impl InstantTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every requested delay, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Timer for InstantTimer {
    type Sleep = Ready<()>;

    fn sleep(&self, duration: Duration) -> Self::Sleep {
        self.sleeps.borrow_mut().push(duration);
        ready(())
    }
}

/// [`Clock`] that advances one millisecond per reading.
#[derive(Clone)]
pub struct FakeClock {
    now: Rc<Cell<u64>>,
}

impl FakeClock {
    pub fn starting_at(millis: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(millis)),
        }
    }
}

impl Clock for FakeClock {
    fn now_millis(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + 1);
        now
    }
}
