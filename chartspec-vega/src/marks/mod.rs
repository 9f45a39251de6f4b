pub mod mark;
pub mod values;

pub use mark::{Facet, Mark, MarkFrom, MarkType};
pub use values::{Encode, EncodeEntry, ProductionRule, ValueRef};
