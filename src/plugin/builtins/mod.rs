pub mod case;
pub mod dot_case;
pub mod sequence;

pub use case::{ToLowerCase, ToUpperCase};
pub use dot_case::DotCase;
pub use sequence::ToSequence;
