pub mod classifier;
pub mod exists;
pub mod literal;
pub mod pipeline;
pub mod rewriter;
pub mod scanner;

pub use classifier::{classify, Classification, ClassifiedMarker, Clause, Role};
pub use exists::{emulate_exists, emulate_exists_statement};
pub use literal::quote_value;
pub use pipeline::{rewrite_sql, rewrite_statement};
pub use rewriter::{rewrite, Rewritten};
pub use scanner::{scan, Keyword, Span, SpanKind};
