// SPDX-License-Identifier: GPL-3.0-only

//! Deferred host events.
//!
//! Host listeners run while the keyboard is in the middle of dispatching a
//! key. They cannot call back into the keyboard at that point, so anything
//! they want it to do (focus another field, press a key) goes through this
//! queue and is handled by `KeyboardController::process_pending`.

use crate::input::element::InputElement;
use crate::layout::KeyKind;
use futures::channel::mpsc;
use std::fmt;
use std::rc::{Rc, Weak};

/// Events the host can queue for the keyboard.
#[derive(Clone)]
pub enum HostEvent {
    /// An element received focus.
    Focus(Weak<dyn InputElement>),
    /// A key on the panel was pressed.
    Press(KeyKind),
}

impl fmt::Debug for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostEvent::Focus(target) => match target.upgrade() {
                Some(element) => write!(f, "Focus({})", element.name()),
                None => write!(f, "Focus(<dropped>)"),
            },
            HostEvent::Press(kind) => write!(f, "Press({:?})", kind),
        }
    }
}

/// Cloneable handle for queueing [`HostEvent`]s.
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<HostEvent>,
}

impl EventSender {
    pub(crate) fn new(tx: mpsc::UnboundedSender<HostEvent>) -> Self {
        Self { tx }
    }

    /// Queues a focus event for the element.
    pub fn focus(&self, target: &Rc<dyn InputElement>) {
        self.send(HostEvent::Focus(Rc::downgrade(target)));
    }

    /// Queues a key press.
    pub fn press(&self, kind: KeyKind) {
        self.send(HostEvent::Press(kind));
    }

    /// Queues any event. Events sent after the keyboard is gone are dropped.
    pub fn send(&self, event: HostEvent) {
        if let Err(e) = self.tx.unbounded_send(event) {
            tracing::debug!("Keyboard gone, dropping {:?}", e.into_inner());
        }
    }
}

impl fmt::Debug for EventSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSender")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

/// Creates a connected sender and receiver.
pub fn event_channel() -> (EventSender, mpsc::UnboundedReceiver<HostEvent>) {
    let (tx, rx) = mpsc::unbounded();
    (EventSender::new(tx), rx)
}
