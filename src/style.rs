//! Style rules contributed by the date field's calendar overlay.

use crate::host::OverlayHost;

pub const STYLE_PREFIX: &str = ".blocklyWidgetDiv .goog-date-picker";

pub const STYLE_RULES: &[&str] = &[
    ".blocklyWidgetDiv .goog-date-picker, \
     .blocklyWidgetDiv .goog-date-picker th, \
     .blocklyWidgetDiv .goog-date-picker td { font: 13px Arial, sans-serif; }",
    ".blocklyWidgetDiv .goog-date-picker { \
     user-select: none; background: #fff; border: 1px solid #888; \
     border-radius: 4px; cursor: pointer; padding: 4px; }",
    ".blocklyWidgetDiv .goog-date-picker th, \
     .blocklyWidgetDiv .goog-date-picker td { \
     text-align: center; vertical-align: middle; padding: 2px 3px; }",
    ".blocklyWidgetDiv .goog-date-picker-menu { \
     position: absolute; background: threedface; border: 1px solid gray; \
     padding: 1px; cursor: pointer; }",
    ".blocklyWidgetDiv .goog-date-picker-menu-selected { background: #ccf; }",
    ".blocklyWidgetDiv .goog-date-picker-btn { \
     font-family: Arial, sans-serif; color: #000; text-decoration: none; \
     cursor: pointer; margin: 1px 0; border: 0; background-color: transparent; }",
    ".blocklyWidgetDiv .goog-date-picker-month, \
     .blocklyWidgetDiv .goog-date-picker-year { font-weight: bold; }",
    ".blocklyWidgetDiv .goog-date-picker-wday, \
     .blocklyWidgetDiv .goog-date-picker-wnum { color: #666; font-weight: normal; }",
    ".blocklyWidgetDiv .goog-date-picker-other-month { color: #888; }",
    ".blocklyWidgetDiv .goog-date-picker-today { font-weight: bold; }",
    ".blocklyWidgetDiv .goog-date-picker-selected { \
     background-color: #57e; color: #fff; border-radius: 2px; }",
];

/// Hands the fixed rule set to the host's style-sheet mechanism.
pub fn register(host: &mut dyn OverlayHost) {
    host.register_styles(STYLE_PREFIX, STYLE_RULES);
}
