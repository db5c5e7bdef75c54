// SPDX-License-Identifier: GPL-3.0-only

//! A minimal host page: a registry of text fields and click dispatch.
//!
//! Clicks reach the page-wide [`FocusObserver`] first, mirroring a
//! capture-phase listener, so the keyboard opens before any field-level
//! handler sees the click.

use crate::input::{FocusObserver, InputElement, TextField};
use std::rc::Rc;

/// The fields of a host page, in document order.
#[derive(Debug, Default)]
pub struct Page {
    fields: Vec<Rc<TextField>>,
}

impl Page {
    /// Creates an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field and returns the page's handle to it.
    pub fn add(&mut self, field: TextField) -> Rc<TextField> {
        let field = Rc::new(field);
        self.fields.push(Rc::clone(&field));
        field
    }

    /// Looks a field up by name.
    pub fn get(&self, name: &str) -> Option<Rc<TextField>> {
        self.fields.iter().find(|f| f.name() == name).cloned()
    }

    /// All fields in document order.
    pub fn fields(&self) -> impl Iterator<Item = &Rc<TextField>> {
        self.fields.iter()
    }

    /// Removes a field. Anything still pointing at it weakly sees it vanish.
    pub fn remove(&mut self, name: &str) -> Option<Rc<TextField>> {
        let index = self.fields.iter().position(|f| f.name() == name)?;
        Some(self.fields.remove(index))
    }

    /// Dispatches a click on the named field to `observer`.
    ///
    /// Returns `false` if no such field exists.
    pub fn click(&self, name: &str, observer: &mut dyn FocusObserver) -> bool {
        let Some(field) = self.get(name) else {
            tracing::debug!("Click on unknown field '{}'", name);
            return false;
        };
        let target: Rc<dyn InputElement> = field;
        observer.focus_captured(&target);
        true
    }
}

/// The sample fields of a station settings page.
pub fn settings_page() -> Page {
    let mut page = Page::new();
    page.add(TextField::new("location", "text"));
    page.add(TextField::new("api_key", "password"));
    page.add(TextField::new("email", "email"));
    page.add(TextField::new("interval", "number").with_value("30"));
    page.add(TextField::new("altitude", "number").with_class("p-input--bonus"));
    page.add(TextField::new("night_mode", "checkbox"));
    page
}
