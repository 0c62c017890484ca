//! Repeating timers for the dealer loop.
//!
//! A [`Scheduler`] hands back a handle that owns the timer. Calling
//! [`Cancel::cancel`] stops further ticks right away, and dropping the handle
//! cancels it too, so a handle can never outlive the round that started it.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::Window;

use crate::error::TableError;

pub trait Cancel {
    /// Idempotent. Safe to call from inside the tick being cancelled.
    fn cancel(&self);
    fn is_cancelled(&self) -> bool;
}

pub trait Scheduler {
    type Handle: Cancel;

    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> Result<Self::Handle, TableError>;
}

fn clamp_period(period: Duration) -> Duration {
    period.max(Duration::from_millis(1))
}

/// `window.setInterval` backed scheduler.
pub struct IntervalScheduler {
    window: Window,
}

impl IntervalScheduler {
    pub fn new() -> Result<Self, TableError> {
        let window = web_sys::window().ok_or(TableError::NoWindow)?;
        Ok(IntervalScheduler { window })
    }
}

pub struct IntervalHandle {
    window: Window,
    id: Cell<Option<i32>>,
    _tick: Closure<dyn FnMut()>,
}

impl Cancel for IntervalHandle {
    fn cancel(&self) {
        if let Some(id) = self.id.take() {
            self.window.clear_interval_with_handle(id);
        }
    }

    fn is_cancelled(&self) -> bool {
        self.id.get().is_none()
    }
}

impl Drop for IntervalHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl Scheduler for IntervalScheduler {
    type Handle = IntervalHandle;

    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> Result<IntervalHandle, TableError> {
        let millis = i32::try_from(clamp_period(period).as_millis()).unwrap_or(i32::MAX);
        let closure = Closure::wrap(tick);
        let id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis,
            )
            .map_err(|err| TableError::Schedule(format!("{err:?}")))?;

        Ok(IntervalHandle {
            window: self.window.clone(),
            id: Cell::new(Some(id)),
            _tick: closure,
        })
    }
}

struct ManualTask {
    period: Duration,
    until_next: Duration,
    cancelled: Rc<Cell<bool>>,
    tick: Option<Box<dyn FnMut()>>,
}

/// Scheduler driven by explicit [`ManualScheduler::advance`] calls instead of
/// a clock. Lets hosts without a browser step the dealer loop.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    tasks: Rc<RefCell<Vec<ManualTask>>>,
}

pub struct ManualHandle {
    cancelled: Rc<Cell<bool>>,
}

impl Cancel for ManualHandle {
    fn cancel(&self) {
        self.cancelled.set(true);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        ManualScheduler::default()
    }

    /// Number of timers that have not been cancelled.
    pub fn active(&self) -> usize {
        self.tasks
            .borrow()
            .iter()
            .filter(|task| !task.cancelled.get())
            .count()
    }

    /// Moves time forward, firing every tick that comes due. Returns how
    /// many ticks fired.
    pub fn advance(&self, by: Duration) -> usize {
        let mut fired = 0;
        let count = self.tasks.borrow().len();

        for index in 0..count {
            // The tick runs with the task list unborrowed so it may schedule
            // or cancel freely.
            let (period, mut until_next, cancelled, mut tick) = {
                let mut tasks = self.tasks.borrow_mut();
                let task = &mut tasks[index];
                match task.tick.take() {
                    Some(tick) if !task.cancelled.get() => {
                        (task.period, task.until_next, task.cancelled.clone(), tick)
                    }
                    Some(tick) => {
                        task.tick = Some(tick);
                        continue;
                    }
                    None => continue,
                }
            };

            let mut remaining = by;
            while !cancelled.get() && remaining >= until_next {
                remaining -= until_next;
                until_next = period;
                tick();
                fired += 1;
            }
            if !cancelled.get() {
                until_next -= remaining;
            }

            let mut tasks = self.tasks.borrow_mut();
            let task = &mut tasks[index];
            task.until_next = until_next;
            task.tick = Some(tick);
        }

        self.tasks.borrow_mut().retain(|task| !task.cancelled.get());
        fired
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> Result<ManualHandle, TableError> {
        let period = clamp_period(period);
        let cancelled = Rc::new(Cell::new(false));
        self.tasks.borrow_mut().push(ManualTask {
            period,
            until_next: period,
            cancelled: cancelled.clone(),
            tick: Some(tick),
        });
        Ok(ManualHandle { cancelled })
    }
}
