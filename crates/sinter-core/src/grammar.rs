use crate::diagnostics::Diagnostic;
use crate::error::Result;
use crate::span::Span;

/// Outcome of parsing one embedded expression through the host grammar.
/// `Failure` carries the front end's own diagnostics; it is a recoverable
/// condition, distinct from an internal front-end failure (`Error`).
#[derive(Debug, Clone)]
pub enum ParseOutcome<E> {
    Success(E),
    Failure(Vec<Diagnostic>),
}

impl<E> ParseOutcome<E> {
    pub fn is_success(&self) -> bool {
        matches!(self, ParseOutcome::Success(_))
    }

    pub fn success(self) -> Option<E> {
        match self {
            ParseOutcome::Success(expr) => Some(expr),
            ParseOutcome::Failure(_) => None,
        }
    }
}

/// Injected capability over the host language's grammar. The interpolation
/// pass never defines expression syntax of its own: it parses embedded text
/// and builds replacement nodes exclusively through this trait, so any
/// standalone expression parser can back it (including a fake one in tests).
pub trait ExpressionGrammar {
    /// Host expression node. Opaque to the interpolation pass apart from
    /// the position attribute the grammar maintains on it.
    type Expr;

    /// Whether `word` is a reserved word of the host language. Reserved
    /// words are never promoted to identifier interpolation sites.
    fn is_keyword(&self, word: &str) -> bool;

    /// Parse `text` as one expression in isolation, using a fresh front-end
    /// instance, syntax-only. Every position the resulting node exposes must
    /// be overwritten with `span` so later diagnostics point at the original
    /// source. Reported parse errors return `Ok(Failure)`; only an
    /// unexpected front-end failure returns `Err`.
    fn parse_expression(&self, text: &str, span: Span) -> Result<ParseOutcome<Self::Expr>>;

    /// Build a string-literal node positioned at `span`.
    fn string_literal(&self, value: &str, span: Span) -> Self::Expr;

    /// Build a binary string-concatenation node positioned at `span`.
    fn concat(&self, lhs: Self::Expr, rhs: Self::Expr, span: Span) -> Self::Expr;
}
