// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard panel rendering.
//!
//! Turns a [`Layout`](crate::layout::Layout) into key buttons the host can
//! draw and click.
//!
//! - **key**: [`RenderedKey`] with its face (text, icon or hidden), width and
//!   highlight state.
//! - **panel**: [`KeyPanel`], the shown or hidden surface holding the buttons.
//!
//! The panel also draws itself as plain text, one line per row:
//!
//! ```text
//! [7] [8] [9]
//! [4] [5] [6]
//! [1] [2] [3]
//! [0] [backspace]
//! [check_circle]
//! ```

pub mod key;
pub mod panel;

pub use key::{KeyFace, KeyWidth, RenderedKey};
pub use panel::KeyPanel;
