//! Browser utility modules.

pub mod dom;
