// SPDX-License-Identifier: GPL-3.0-only

//! Individual key buttons on the panel.

use crate::layout::{KeyDescriptor, KeyKind};
use std::fmt;

/// Relative width of a key button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyWidth {
    /// One unit
    Normal,
    /// Caps, enter and done
    Wide,
    /// The space bar
    ExtraWide,
}

/// What a rendered button shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyFace {
    /// A text label for glyph keys
    Text(String),
    /// An icon name for control keys
    Icon(&'static str),
    /// Nothing; the key is a hidden row terminator
    Hidden,
}

/// A key button materialized on the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedKey {
    /// The key this button stands for
    pub descriptor: KeyDescriptor,
    /// What the button shows
    pub face: KeyFace,
    /// Relative width
    pub width: KeyWidth,
    /// Highlighted (caps lock engaged)
    pub active: bool,
    /// Drawn with the dark accent (done)
    pub dark: bool,
}

impl RenderedKey {
    /// Materializes a descriptor with lowercase labels.
    pub fn new(descriptor: KeyDescriptor) -> Self {
        let kind = descriptor.kind;
        let face = match kind {
            KeyKind::LineBreak => KeyFace::Hidden,
            _ => match kind.icon() {
                Some(icon) => KeyFace::Icon(icon),
                None => KeyFace::Text(descriptor.label(false)),
            },
        };
        let width = match kind {
            KeyKind::CapsToggle | KeyKind::Enter | KeyKind::Done => KeyWidth::Wide,
            KeyKind::Space => KeyWidth::ExtraWide,
            _ => KeyWidth::Normal,
        };

        Self {
            descriptor,
            face,
            width,
            active: false,
            dark: kind == KeyKind::Done,
        }
    }

    /// The key kind.
    pub fn kind(&self) -> KeyKind {
        self.descriptor.kind
    }

    /// Returns `true` for the hidden row terminator.
    pub fn is_hidden(&self) -> bool {
        self.face == KeyFace::Hidden
    }

    /// Re-cases a single-character text label. Icons are left alone.
    pub fn recase(&mut self, caps_lock: bool) {
        if let KeyFace::Text(label) = &mut self.face {
            if label.chars().count() == 1 {
                *label = if caps_lock {
                    label.to_uppercase()
                } else {
                    label.to_lowercase()
                };
            }
        }
        if self.kind() == KeyKind::CapsToggle {
            self.active = caps_lock;
        }
    }
}

impl fmt::Display for RenderedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.face {
            KeyFace::Text(label) => write!(f, "[{}]", label),
            KeyFace::Icon(icon) if self.active => write!(f, "[{}*]", icon),
            KeyFace::Icon(icon) => write!(f, "[{}]", icon),
            KeyFace::Hidden => Ok(()),
        }
    }
}
