// SPDX-License-Identifier: GPL-3.0-only

//! The keyboard panel: a hidden or shown set of key buttons.

use crate::layout::{KeyKind, Layout, LayoutMode};
use crate::renderer::key::RenderedKey;
use std::fmt;

/// The on-screen surface holding the key buttons.
///
/// Created once and rebuilt in place whenever a layout is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPanel {
    visible: bool,
    mode: Option<LayoutMode>,
    keys: Vec<RenderedKey>,
}

impl KeyPanel {
    /// Creates a hidden, empty panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every key with the buttons for `layout`.
    ///
    /// Labels start lowercase. Building the same layout twice yields an
    /// equal panel.
    pub fn build(&mut self, layout: &Layout) {
        self.keys.clear();
        self.keys
            .extend(layout.keys.iter().copied().map(RenderedKey::new));
        self.mode = Some(layout.mode);
        tracing::debug!(
            "Built {} layout with {} keys",
            layout.mode,
            self.keys.len()
        );
    }

    /// Re-cases single-character labels and highlights the caps key.
    pub fn recase(&mut self, caps_lock: bool) {
        for key in &mut self.keys {
            key.recase(caps_lock);
        }
    }

    /// Reveals the panel.
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hides the panel. The keys stay built.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Returns `true` while the panel is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Mode of the currently built layout.
    pub fn mode(&self) -> Option<LayoutMode> {
        self.mode
    }

    /// All buttons in display order, hidden row terminators included.
    pub fn keys(&self) -> &[RenderedKey] {
        &self.keys
    }

    /// The button at `index`.
    pub fn key_at(&self, index: usize) -> Option<&RenderedKey> {
        self.keys.get(index)
    }

    /// Returns `true` if the panel has a button for `kind`.
    pub fn contains(&self, kind: KeyKind) -> bool {
        self.keys.iter().any(|key| key.kind() == kind)
    }

    /// Groups the buttons into rows.
    pub fn rows(&self) -> Vec<&[RenderedKey]> {
        let mut rows = Vec::new();
        let mut start = 0;
        for (i, key) in self.keys.iter().enumerate() {
            if key.descriptor.breaks_line {
                rows.push(&self.keys[start..=i]);
                start = i + 1;
            }
        }
        if start < self.keys.len() {
            rows.push(&self.keys[start..]);
        }
        rows
    }
}

impl fmt::Display for KeyPanel {
    /// Draws one line per row, skipping hidden buttons.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line = row
                .iter()
                .filter(|key| !key.is_hidden())
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            f.write_str(&line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::builtin_layout;

    /// Test 1: A new panel is hidden and empty
    #[test]
    fn test_new_panel() {
        let panel = KeyPanel::new();
        assert!(!panel.is_visible());
        assert!(panel.keys().is_empty());
        assert_eq!(panel.mode(), None);
    }

    /// Test 2: Building replaces the previous key set
    #[test]
    fn test_build_replaces_keys() {
        let numeric = builtin_layout(LayoutMode::Numeric).unwrap();
        let alpha = builtin_layout(LayoutMode::Alphanumeric).unwrap();

        let mut panel = KeyPanel::new();
        panel.build(&alpha);
        panel.build(&numeric);

        assert_eq!(panel.mode(), Some(LayoutMode::Numeric));
        assert_eq!(panel.keys().len(), numeric.keys.len());
        assert!(!panel.contains(KeyKind::Letter('q')));
    }

    /// Test 3: Building twice with the same layout is idempotent
    #[test]
    fn test_build_idempotent() {
        let alpha = builtin_layout(LayoutMode::Alphanumeric).unwrap();

        let mut once = KeyPanel::new();
        once.build(&alpha);

        let mut twice = KeyPanel::new();
        twice.build(&alpha);
        twice.recase(true);
        twice.build(&alpha);

        assert_eq!(once, twice);
    }

    /// Test 4: Numeric panel draws as a keypad
    #[test]
    fn test_numeric_display() {
        let mut panel = KeyPanel::new();
        panel.build(&builtin_layout(LayoutMode::Numeric).unwrap());

        let drawn = panel.to_string();
        let lines: Vec<&str> = drawn.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[7] [8] [9]",
                "[4] [5] [6]",
                "[1] [2] [3]",
                "[0] [backspace]",
                "[check_circle]",
            ]
        );
    }

    /// Test 5: Recasing changes letter labels only
    #[test]
    fn test_recase_panel() {
        let mut panel = KeyPanel::new();
        panel.build(&builtin_layout(LayoutMode::Alphanumeric).unwrap());
        panel.recase(true);

        let rows = panel.to_string();
        assert!(rows.contains("[Q] [W] [E]"));
        assert!(rows.contains("[1] [2] [3]"));
        assert!(rows.contains("[keyboard_capslock*]"));
        assert!(rows.contains("[,] [.] [?]"));
    }

    /// Test 6: Visibility toggles without touching keys
    #[test]
    fn test_show_hide() {
        let mut panel = KeyPanel::new();
        panel.build(&builtin_layout(LayoutMode::Numeric).unwrap());
        panel.show();
        assert!(panel.is_visible());
        panel.hide();
        assert!(!panel.is_visible());
        assert_eq!(panel.keys().len(), 15);
    }
}
