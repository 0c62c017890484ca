use std::{
    cell::RefCell,
    rc::{Rc, Weak},
    time::Duration,
};

use log::{debug, warn};

use crate::{
    draw::CardSource,
    game::{GameState, Phase, Table},
    schedule::{Cancel, Scheduler},
    view::TableView,
};

struct Shared<C, H> {
    table: Table<C>,
    dealer_loop: Option<H>,
}

type Listener = Rc<dyn Fn()>;

/// A table wired to a timer: standing starts the dealer loop, and the loop is
/// torn down as soon as the round leaves the dealer's turn.
pub struct Session<S: Scheduler, C> {
    shared: Rc<RefCell<Shared<C, S::Handle>>>,
    scheduler: S,
    period: Duration,
    listener: Option<Listener>,
}

impl<S, C> Session<S, C>
where
    S: Scheduler,
    S::Handle: 'static,
    C: CardSource + 'static,
{
    pub fn new(table: Table<C>, scheduler: S, period: Duration) -> Self {
        Session {
            shared: Rc::new(RefCell::new(Shared {
                table,
                dealer_loop: None,
            })),
            scheduler,
            period,
            listener: None,
        }
    }

    /// Called after every change, including dealer ticks. No session borrow
    /// is held while it runs, so it may call back into the session.
    pub fn with_listener(mut self, listener: impl Fn() + 'static) -> Self {
        self.listener = Some(Rc::new(listener));
        self
    }

    pub fn state(&self) -> GameState {
        self.shared.borrow().table.state().clone()
    }

    pub fn view(&self) -> TableView {
        TableView::from_state(self.shared.borrow().table.state())
    }

    pub fn rounds(&self) -> u32 {
        self.shared.borrow().table.rounds()
    }

    pub fn dealer_loop_running(&self) -> bool {
        self.shared
            .borrow()
            .dealer_loop
            .as_ref()
            .is_some_and(|handle| !handle.is_cancelled())
    }

    pub fn hit(&self) -> bool {
        let applied = self.shared.borrow_mut().table.hit();
        self.settle(applied)
    }

    pub fn stand(&self) -> bool {
        let applied = self.shared.borrow_mut().table.stand();
        self.settle(applied)
    }

    pub fn reset(&self) -> bool {
        let applied = self.shared.borrow_mut().table.reset();
        self.settle(applied)
    }

    fn settle(&self, applied: bool) -> bool {
        if applied {
            self.sync_dealer_loop();
            notify(self.listener.as_ref());
        }
        applied
    }

    fn sync_dealer_loop(&self) {
        let mut shared = self.shared.borrow_mut();
        let dealer_turn = shared.table.state().phase() == Phase::DealerTurn;

        if !dealer_turn {
            if shared.dealer_loop.take().is_some() {
                debug!("dealer loop stopped");
            }
            return;
        }
        if shared.dealer_loop.is_some() {
            return;
        }

        let tick = dealer_tick(Rc::downgrade(&self.shared), self.listener.clone());
        match self.scheduler.every(self.period, tick) {
            Ok(handle) => {
                debug!("dealer loop started every {:?}", self.period);
                shared.dealer_loop = Some(handle);
            }
            Err(err) => {
                warn!("{err}; playing the dealer hand out immediately");
                shared.table.play_out_dealer();
            }
        }
    }
}

fn notify(listener: Option<&Listener>) {
    if let Some(listener) = listener {
        listener();
    }
}

fn dealer_tick<C, H>(shared: Weak<RefCell<Shared<C, H>>>, listener: Option<Listener>) -> Box<dyn FnMut()>
where
    C: CardSource + 'static,
    H: Cancel + 'static,
{
    Box::new(move || {
        let Some(shared) = shared.upgrade() else {
            return;
        };
        {
            let mut shared = shared.borrow_mut();
            if !shared.table.dealer_tick() {
                return;
            }
            if shared.table.state().phase() != Phase::DealerTurn {
                // Cancel only; the handle is released by the next transition.
                // A listener that resets from inside this tick still drops
                // it mid-call, which wasm-bindgen defers until the call returns.
                if let Some(handle) = shared.dealer_loop.as_ref() {
                    handle.cancel();
                }
            }
        }
        notify(listener.as_ref());
    })
}
