//! Collaborator traits
//!
//! These traits define the interface between the display driver and the
//! components it consumes but does not own.

pub mod text;

pub use text::{TextSource, TextValue, MAX_TEXT_LEN};
