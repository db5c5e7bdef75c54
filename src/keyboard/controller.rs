// SPDX-License-Identifier: GPL-3.0-only

//! The keyboard state machine.

use crate::app_settings::MAX_EVENTS_PER_TURN;
use crate::config::Config;
use crate::input::{
    event_channel, EventSender, FocusClassifier, FocusObserver, HostEvent, InputElement,
};
use crate::keyboard::session::EditSession;
use crate::layout::{load_layout, KeyKind, Layout, LayoutError, LayoutMode};
use crate::renderer::KeyPanel;
use futures::channel::mpsc;
use futures::{FutureExt, StreamExt};
use std::fmt;
use std::rc::Rc;

/// Callback receiving the composed value.
pub type ValueCallback = Box<dyn FnMut(&str)>;

/// The on-screen keyboard.
///
/// One instance per page. It is `Closed` until a recognized element gets
/// focus, then `Open` with an [`EditSession`] until the done key is pressed.
///
/// Every operation runs to completion synchronously. Host listeners that
/// react to a notification must go through [`KeyboardController::events`]
/// rather than calling back in.
pub struct KeyboardController {
    numeric: Layout,
    alphanumeric: Layout,
    classifier: FocusClassifier,
    panel: KeyPanel,
    session: Option<EditSession>,
    on_input: Option<ValueCallback>,
    on_close: Option<ValueCallback>,
    events_tx: EventSender,
    events_rx: mpsc::UnboundedReceiver<HostEvent>,
}

impl KeyboardController {
    /// Creates the keyboard, loading layouts as configured.
    ///
    /// With multi-mode off the alphanumeric panel is built right away.
    pub fn new(config: &Config) -> Result<Self, LayoutError> {
        let numeric = load_layout(LayoutMode::Numeric, config.numeric_layout.as_deref())?;
        let alphanumeric =
            load_layout(LayoutMode::Alphanumeric, config.alphanumeric_layout.as_deref())?;

        let mut keyboard = Self::with_layouts(
            numeric,
            alphanumeric,
            FocusClassifier::from_config(config),
        );
        if !config.multi_mode {
            keyboard.panel.build(&keyboard.alphanumeric);
        }

        tracing::info!(
            "Keyboard initialized (multi_mode: {}, bonus class: '{}')",
            config.multi_mode,
            config.bonus_class
        );
        Ok(keyboard)
    }

    /// Creates the keyboard from already loaded layouts.
    pub fn with_layouts(
        numeric: Layout,
        alphanumeric: Layout,
        classifier: FocusClassifier,
    ) -> Self {
        let (events_tx, events_rx) = event_channel();
        Self {
            numeric,
            alphanumeric,
            classifier,
            panel: KeyPanel::new(),
            session: None,
            on_input: None,
            on_close: None,
            events_tx,
            events_rx,
        }
    }

    /// Registers the callback invoked after every text-editing key.
    pub fn on_input(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_input = Some(Box::new(callback));
    }

    /// Registers the callback invoked with the final value on done.
    pub fn on_close(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_close = Some(Box::new(callback));
    }

    /// Handle for queueing host events.
    pub fn events(&self) -> EventSender {
        self.events_tx.clone()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns `true` while a session is open.
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// The composed text, or `None` when closed.
    pub fn buffer(&self) -> Option<&str> {
        self.session.as_ref().map(EditSession::buffer)
    }

    /// Caps lock state; always `false` when closed.
    pub fn caps_lock(&self) -> bool {
        self.session.as_ref().is_some_and(EditSession::caps_lock)
    }

    /// The element being edited.
    pub fn active_target(&self) -> Option<Rc<dyn InputElement>> {
        self.session.as_ref().and_then(EditSession::target)
    }

    /// The panel with its key buttons.
    pub fn panel(&self) -> &KeyPanel {
        &self.panel
    }

    // ========================================================================
    // Focus Interception
    // ========================================================================

    /// Handles focus on `target`. Returns `true` if the keyboard opened for it.
    ///
    /// Unrecognized elements are ignored; an open session stays open.
    pub fn focus(&mut self, target: &Rc<dyn InputElement>) -> bool {
        match self.classifier.classify(&**target) {
            Some(mode) => {
                self.open(target, mode);
                true
            }
            None => {
                tracing::debug!(
                    "Ignoring focus on '{}' (type '{}')",
                    target.name(),
                    target.input_type()
                );
                false
            }
        }
    }

    /// Opens the panel for `target` with the given layout.
    ///
    /// The layout is rebuilt, caps lock resets, and the buffer starts from
    /// the target's current value. An open session for another element is
    /// replaced without notifying anyone.
    pub fn open(&mut self, target: &Rc<dyn InputElement>, mode: LayoutMode) {
        let layout = match mode {
            LayoutMode::Numeric => &self.numeric,
            LayoutMode::Alphanumeric => &self.alphanumeric,
        };
        self.panel.build(layout);

        if let Some(previous) = self.session.as_ref().filter(|s| !s.targets(target)) {
            tracing::debug!("Retargeting keyboard from {:?}", previous);
        }

        let initial = target.value();
        tracing::info!(
            "Opening {} keyboard for '{}' ({} chars)",
            mode,
            target.name(),
            initial.chars().count()
        );
        self.session = Some(EditSession::new(Rc::downgrade(target), mode, initial));
        self.panel.show();
    }

    // ========================================================================
    // Key Action Dispatch
    // ========================================================================

    /// Presses a key on the panel.
    ///
    /// Ignored while closed and for keys the current panel does not show.
    /// Letters match their panel key in either case.
    pub fn press(&mut self, kind: KeyKind) {
        let kind = kind.normalized();
        let Some(session) = self.session.as_mut() else {
            tracing::debug!("Ignoring {:?} while closed", kind);
            return;
        };
        if !self.panel.contains(kind) {
            tracing::debug!("Ignoring {:?}, not on the {} panel", kind, session.mode());
            return;
        }

        tracing::debug!("Key pressed: {:?}", kind);
        match kind {
            KeyKind::Digit(c) | KeyKind::Letter(c) | KeyKind::Symbol(c) => session.type_char(c),
            KeyKind::Backspace => session.backspace(),
            KeyKind::Enter => session.push_raw('\n'),
            KeyKind::Space => session.push_raw(' '),
            KeyKind::CapsToggle => {
                let caps_lock = session.toggle_caps();
                self.panel.recase(caps_lock);
            }
            KeyKind::Done => self.finish(),
            KeyKind::LineBreak => {}
        }

        if kind.edits_text() {
            self.sync_target();
        }
    }

    /// Presses the button at `index` on the panel.
    pub fn press_at(&mut self, index: usize) {
        match self.panel.key_at(index).map(|key| key.kind()) {
            Some(kind) => self.press(kind),
            None => tracing::debug!("No key at index {}", index),
        }
    }

    /// Writes the buffer to the target and tells the host about it.
    fn sync_target(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let value = session.buffer().to_string();
        let target = session.target();

        match &target {
            Some(element) => element.set_value(&value),
            None => tracing::debug!("Active target was dropped by the host"),
        }
        if let Some(callback) = self.on_input.as_mut() {
            callback(&value);
        }
        if let Some(element) = target {
            element.notify_input();
        }
    }

    /// Commits the buffer and closes the panel.
    fn finish(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        let target = session.target();
        let value = session.into_buffer();

        if let Some(element) = &target {
            element.set_value(&value);
        }
        self.panel.hide();

        tracing::info!(
            "Keyboard closed for '{}'",
            target.as_ref().map_or("<dropped>", |t| t.name())
        );
        if let Some(callback) = self.on_close.as_mut() {
            callback(&value);
        }
    }

    // ========================================================================
    // Deferred Events
    // ========================================================================

    /// Handles queued host events.
    ///
    /// Events queued while handling are processed in the same call, up to
    /// [`MAX_EVENTS_PER_TURN`]. Past that budget the rest of the queue is
    /// discarded, which breaks feedback loops between host listeners and
    /// the keyboard. Returns the number of events handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;

        while let Some(Some(event)) = self.events_rx.next().now_or_never() {
            if handled == MAX_EVENTS_PER_TURN {
                let mut dropped = 1;
                while let Some(Some(_)) = self.events_rx.next().now_or_never() {
                    dropped += 1;
                }
                tracing::warn!(
                    "Event budget of {} exhausted, dropped {} queued event(s)",
                    MAX_EVENTS_PER_TURN,
                    dropped
                );
                break;
            }

            handled += 1;
            match event {
                HostEvent::Focus(target) => match target.upgrade() {
                    Some(element) => {
                        self.focus(&element);
                    }
                    None => tracing::debug!("Skipping focus on a dropped element"),
                },
                HostEvent::Press(kind) => self.press(kind),
            }
        }

        handled
    }
}

impl FocusObserver for KeyboardController {
    fn focus_captured(&mut self, target: &Rc<dyn InputElement>) {
        self.focus(target);
    }
}

impl fmt::Debug for KeyboardController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardController")
            .field("classifier", &self.classifier)
            .field("panel_visible", &self.panel.is_visible())
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
