//! Diagram export back ends.

pub mod svg;
