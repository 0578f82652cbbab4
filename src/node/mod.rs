pub mod core;
pub mod element;


// Re-export the primary types so `crate::node::*` paths stay short.
pub use self::core::{ErrorKind, ErrorNode};
pub use self::element::ZeroLengthElement;
