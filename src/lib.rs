// SPDX-License-Identifier: GPL-3.0-only

//! On-screen keyboard for touch-screen kiosks.
//!
//! The host page owns its text fields. The keyboard watches focus, shows a
//! numeric or alphanumeric key panel for recognized fields, and edits the
//! focused field's value as keys are pressed.
//!
//! # Modules
//!
//! - `app_settings`: Centralized constants
//! - `config`: JSON user configuration
//! - `input`: Host-side element contract, classification and deferred events
//! - `keyboard`: The `KeyboardController` state machine
//! - `layout`: Key descriptors and layout loading
//! - `page`: A minimal host page used by the demo
//! - `renderer`: The key panel

pub mod app_settings;
pub mod config;
pub mod input;
pub mod keyboard;
pub mod layout;
pub mod page;
pub mod renderer;

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod integration_tests {
    use crate::config::Config;
    use crate::input::InputElement;
    use crate::keyboard::KeyboardController;
    use crate::layout::{KeyKind, LayoutMode};
    use crate::page::settings_page;
    use std::cell::RefCell;
    use std::io::Write;
    use std::rc::Rc;
    use tempfile::NamedTempFile;

    /// Integration Test 1: Page click opens the right layout per field
    #[test]
    fn test_page_click_selects_layout() {
        let page = settings_page();
        let mut keyboard = KeyboardController::new(&Config::default()).unwrap();

        page.click("interval", &mut keyboard);
        assert_eq!(keyboard.panel().mode(), Some(LayoutMode::Numeric));
        assert_eq!(keyboard.buffer(), Some("30"));

        page.click("altitude", &mut keyboard);
        assert_eq!(
            keyboard.panel().mode(),
            Some(LayoutMode::Alphanumeric),
            "Marker class wins over type=number"
        );

        page.click("night_mode", &mut keyboard);
        assert_eq!(
            keyboard.active_target().map(|t| t.name().to_string()),
            Some("altitude".to_string()),
            "Checkbox clicks leave the session alone"
        );
    }

    /// Integration Test 2: Editing a field end to end
    #[test]
    fn test_edit_field_end_to_end() {
        let page = settings_page();
        let mut keyboard = KeyboardController::new(&Config::default()).unwrap();
        let committed = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&committed);
        keyboard.on_close(move |value| *slot.borrow_mut() = Some(value.to_string()));

        page.click("location", &mut keyboard);
        keyboard.press(KeyKind::CapsToggle);
        keyboard.press(KeyKind::Letter('p'));
        keyboard.press(KeyKind::CapsToggle);
        for c in "écs".chars() {
            keyboard.press(KeyKind::from_token(&c.to_string()).unwrap());
        }
        keyboard.press(KeyKind::Done);

        // 'é' is not on the panel
        assert_eq!(committed.borrow().as_deref(), Some("Pcs"));
        assert_eq!(page.get("location").unwrap().value(), "Pcs");
        assert!(!keyboard.panel().is_visible());
    }

    /// Integration Test 3: Custom layout file from configuration
    #[test]
    fn test_custom_layout_from_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"{
                "name": "numeric",
                "mode": "numeric",
                "keys": ["1", "2", "3", "br", ".", "0", "backspace", "done"]
            }"#,
        )
        .unwrap();

        let config = Config {
            numeric_layout: Some(file.path().to_path_buf()),
            ..Config::default()
        };
        let page = settings_page();
        let mut keyboard = KeyboardController::new(&config).unwrap();

        page.click("interval", &mut keyboard);
        keyboard.press(KeyKind::Symbol('.'));
        keyboard.press(KeyKind::Digit('5'));
        assert_eq!(keyboard.buffer(), Some("30.5"));
        assert_eq!(keyboard.panel().to_string().lines().count(), 2);
    }

    /// Integration Test 4: Host listeners observe typing through the page field
    #[test]
    fn test_host_listener_sees_typing() {
        let page = settings_page();
        let mut keyboard = KeyboardController::new(&Config::default()).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        page.get("email")
            .unwrap()
            .add_input_listener(move |value| sink.borrow_mut().push(value.to_string()));

        page.click("email", &mut keyboard);
        keyboard.press(KeyKind::Letter('a'));
        keyboard.press(KeyKind::Symbol('.'));
        keyboard.press(KeyKind::Backspace);

        assert_eq!(*seen.borrow(), vec!["a", "a.", "a"]);
    }

    /// Integration Test 5: Host refocus from a listener goes through the queue
    #[test]
    fn test_listener_refocus_via_queue() {
        let page = settings_page();
        let mut keyboard = KeyboardController::new(&Config::default()).unwrap();
        let events = keyboard.events();

        // Typing into location moves focus to the interval field.
        let interval: Rc<dyn InputElement> = page.get("interval").unwrap();
        page.get("location")
            .unwrap()
            .add_input_listener(move |_| events.focus(&interval));

        page.click("location", &mut keyboard);
        keyboard.press(KeyKind::Letter('x'));
        assert_eq!(keyboard.panel().mode(), Some(LayoutMode::Alphanumeric));

        assert_eq!(keyboard.process_pending(), 1);
        assert_eq!(keyboard.panel().mode(), Some(LayoutMode::Numeric));
        assert_eq!(keyboard.buffer(), Some("30"));
        assert_eq!(page.get("location").unwrap().value(), "x");
    }
}
