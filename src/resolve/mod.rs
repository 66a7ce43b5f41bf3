//! Resolution of declared inputs and expectations into concrete values.
//!
//! Both resolvers understand the `.txt` file-reference convention: inputs are
//! read from the lab's `input/` directory and expectation files from its
//! `expected/` directory.

pub mod expectations;
pub mod input;

pub use expectations::{resolve_expected, ResolvedExpectations};
pub use input::resolve_input;
