//! CSS output model.
//!
//! - [`CssObject`]: insertion-ordered property map with last-write-wins updates
//! - [`Resolution`]: declarations plus deduplicated prelude text for one token
//! - [`escape_class_selector`]: turns a utility token into a class selector

mod object;
mod render;

pub use object::{CssDeclaration, CssObject, Resolution};
pub use render::escape_class_selector;
