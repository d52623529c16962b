//! The event channel
//!
//! [`EventQueue`] is the only piece of GUI state shared between threads. The
//! GUI thread drains it once per frame; any thread holding an
//! [`EventSender`] may push input or control events concurrently.
//!
//! [`TerminationSignal`] lets a non-GUI thread block until the GUI thread has
//! seen a quit request.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use super::events::{ControlEvent, InputEvent};

/// FIFO of pending events, drained by the GUI thread
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Arc<Mutex<VecDeque<InputEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle other threads can push through
    pub fn sender(&self) -> EventSender {
        EventSender {
            events: Arc::clone(&self.events),
        }
    }

    /// Take every pending event, preserving arrival order
    pub fn drain(&self) -> VecDeque<InputEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

/// Cloneable, thread-safe producer side of an [`EventQueue`]
#[derive(Debug, Clone)]
pub struct EventSender {
    events: Arc<Mutex<VecDeque<InputEvent>>>,
}

impl EventSender {
    pub fn push(&self, event: InputEvent) {
        self.events.lock().push_back(event);
    }

    /// Post an application-level control request
    pub fn push_control(&self, event: ControlEvent) {
        log::debug!("control event queued: {:?}", event);
        self.push(InputEvent::Control(event));
    }
}

/// One-shot acknowledgement of a termination request
#[derive(Debug, Clone, Default)]
pub struct TerminationSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl TerminationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called by the GUI thread once it has processed the quit request
    pub fn acknowledge(&self) {
        let (flag, cvar) = &*self.inner;
        *flag.lock() = true;
        cvar.notify_all();
    }

    pub fn is_acknowledged(&self) -> bool {
        *self.inner.0.lock()
    }

    /// Block until [`acknowledge`](Self::acknowledge) has been called
    pub fn wait_acknowledged(&self) {
        let (flag, cvar) = &*self.inner;
        let mut done = flag.lock();
        while !*done {
            cvar.wait(&mut done);
        }
    }

    /// Like [`wait_acknowledged`](Self::wait_acknowledged) but gives up after
    /// `timeout`. Returns whether the acknowledgement arrived.
    pub fn wait_acknowledged_timeout(&self, timeout: Duration) -> bool {
        let (flag, cvar) = &*self.inner;
        let mut done = flag.lock();
        if !*done {
            cvar.wait_while_for(&mut done, |done| !*done, timeout);
        }
        *done
    }
}
