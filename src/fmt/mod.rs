//! Rendering helpers shared by the built-in outputs: scope prefixes and terminal colours.

mod color;
mod prefix;

pub use color::{Color, colorize};
pub use prefix::{group_title, line, prefix};
