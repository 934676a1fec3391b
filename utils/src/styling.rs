// SPDX-License-Identifier: GPL-3.0-only

pub const GLOBAL_SPACING: f32 = 6.;
pub const GLOBAL_BUTTON_HEIGHT: f32 = 35.;

pub const TEXT_SIZE: f32 = 18.;
pub const TITLE_TEXT_SIZE: f32 = 25.;

/// Width of the list and of the page controls under it
pub const LIST_WIDTH: f32 = 800.;
