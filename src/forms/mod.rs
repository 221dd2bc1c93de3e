//! Static checklist form layouts and their read-only replay.
//!
//! The capture client renders one hardcoded form per checklist type,
//! binding every input to a stable numeric question id. This module
//! carries the same layouts server-side so a stored session can be
//! replayed as a hydrated document without the client re-deriving the
//! binding from the DOM.

pub mod catalog;
pub mod replay;

pub use catalog::{Control, Field, FormLayout, Section, layout_for};
pub use replay::{ReplayBody, ReplayDocument, hydrate};
