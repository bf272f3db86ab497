//! The shared diagnostic renderer (spec §6.4), used by the driver to print
//! whatever a phase's [`crate::errors::Diagnostic`]s say went wrong.

mod render;

pub use render::{render, render_all, write_all_colored, write_colored};
