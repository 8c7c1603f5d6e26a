use std::{cell::RefCell, rc::Weak};

use gloo_timers::callback::{Interval, Timeout};
use log::debug;
use wechill_domain::{App, Dialog, RestTimer, StoreRepository};

const TICK_MILLIS: u32 = 1000;

/// Drives the rest countdown with at most one interval at a time.
#[derive(Default)]
pub struct Ticker {
    interval: Option<(u64, Interval)>,
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Keep,
    Arm(u64),
    Release,
}

impl Ticker {
    /// Bring the interval in line with the rest timer. Called after every state change.
    pub fn sync<R, D>(&mut self, rest: &RestTimer, app: &Weak<RefCell<App<R, D>>>)
    where
        R: StoreRepository + 'static,
        D: Dialog + 'static,
    {
        match action(self.interval.as_ref().map(|(run, _)| *run), rest) {
            Action::Keep => {}
            Action::Arm(run) => {
                self.release();
                let app = app.clone();
                let interval = Interval::new(TICK_MILLIS, move || {
                    let Some(app) = app.upgrade() else {
                        return;
                    };
                    if let Ok(mut app) = app.try_borrow_mut() {
                        app.tick();
                    }
                });
                debug!("started rest countdown");
                self.interval = Some((run, interval));
            }
            Action::Release => {
                self.release();
                debug!("stopped rest countdown");
            }
        }
    }

    /// The interval may be the one currently firing, so it is dropped on a later turn.
    fn release(&mut self) {
        if let Some((_, interval)) = self.interval.take() {
            Timeout::new(0, move || drop(interval)).forget();
        }
    }
}

fn action(current: Option<u64>, rest: &RestTimer) -> Action {
    match (current, rest.is_running()) {
        (Some(run), true) if run == rest.run() => Action::Keep,
        (_, true) => Action::Arm(rest.run()),
        (Some(_), false) => Action::Release,
        (None, false) => Action::Keep,
    }
}
