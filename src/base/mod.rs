//! Foundation types shared by every phase.
//!
//! - [`Position`], [`Span`] — source locations (line/column/byte offset).
//! - [`Name`], [`Interner`] — cheap, deduplicated identifier storage.
//!
//! This module has no dependency on any other module in the crate.

mod intern;
mod position;

pub use intern::{Interner, Name};
pub use position::{Position, Span};
