mod collector;
mod expr;
mod structure;

pub use collector::{collect_structs, extract_fields};
pub use expr::TypeExpr;
pub use structure::{FieldLine, FieldToken, StructToken};
