pub mod names;
pub mod pointer;

pub use names::*;
pub use pointer::JsonPointer;
