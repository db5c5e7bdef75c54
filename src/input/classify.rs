// SPDX-License-Identifier: GPL-3.0-only

//! Maps focused elements onto layout modes.

use crate::app_settings::{ALPHANUMERIC_INPUT_TYPES, NUMERIC_INPUT_TYPES};
use crate::config::Config;
use crate::input::element::InputElement;
use crate::layout::LayoutMode;

/// Decides which layout, if any, a focused element gets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusClassifier {
    bonus_class: String,
    multi_mode: bool,
}

impl FocusClassifier {
    /// Creates a classifier for the given marker class.
    pub fn new(bonus_class: impl Into<String>, multi_mode: bool) -> Self {
        Self {
            bonus_class: bonus_class.into(),
            multi_mode,
        }
    }

    /// Builds the classifier described by the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.bonus_class.clone(), config.multi_mode)
    }

    /// Returns the layout the element should get, or `None` if the keyboard
    /// should ignore it.
    ///
    /// The marker class wins over the `type` attribute. With multi-mode off,
    /// every recognized element gets the alphanumeric layout.
    pub fn classify(&self, element: &dyn InputElement) -> Option<LayoutMode> {
        let mode = if element.has_class(&self.bonus_class) {
            LayoutMode::Alphanumeric
        } else {
            classify_type(element.input_type())?
        };

        if self.multi_mode {
            Some(mode)
        } else {
            Some(LayoutMode::Alphanumeric)
        }
    }
}

impl Default for FocusClassifier {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Maps an input `type` attribute onto a layout mode.
pub fn classify_type(input_type: &str) -> Option<LayoutMode> {
    let input_type = input_type.trim().to_ascii_lowercase();
    if NUMERIC_INPUT_TYPES.contains(&input_type.as_str()) {
        Some(LayoutMode::Numeric)
    } else if ALPHANUMERIC_INPUT_TYPES.contains(&input_type.as_str()) {
        Some(LayoutMode::Alphanumeric)
    } else {
        None
    }
}
