//! Parser limits.
//!
//! These bound the marker runs the block parser is willing to recognize.

/// Deepest ATX heading (`######`). Longer `#` runs are plain text.
pub const MAX_HEADING_LEVEL: usize = 6;

/// Maximum digits in ordered list marker (prevents big-integer parsing)
pub const MAX_LIST_MARKER_DIGITS: usize = 9;
