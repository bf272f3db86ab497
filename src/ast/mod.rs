//! Phase 3: builds an AST from a token stream the syntax analyzer has
//! already accepted (spec §4.3).

mod generator;
mod node;

pub use generator::generate;
pub use node::{Node, NodeKind};
