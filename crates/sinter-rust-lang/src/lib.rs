pub mod expr;
pub mod parser;
pub mod walk;

pub use expr::SpannedExpr;
pub use parser::RustGrammar;
pub use walk::{interpolate_file, Directive, ATTRIBUTE_NAME};
