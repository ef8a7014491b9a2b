//! Layout templates resolved to concrete panel, text and logo geometry.

/// Pure geometry for every layout id.
pub mod resolver;
