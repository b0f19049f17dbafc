use itertools::Itertools;
use sinter_core::diagnostics::{Diagnostic, DiagnosticManager};
use sinter_core::error::Result;
use sinter_core::fragment::Fragment;
use sinter_core::grammar::{ExpressionGrammar, ParseOutcome};

/// Parses expression fragments through the injected host grammar. A parse
/// failure is recovered locally (the fragment later reverts to its verbatim
/// text); only an unexpected front-end failure escapes as `Err`, which is
/// fatal for the enclosing literal.
pub struct ExpressionResolver<'a, G: ExpressionGrammar> {
    grammar: &'a G,
    diagnostics: &'a DiagnosticManager,
    context: &'a str,
}

impl<'a, G: ExpressionGrammar> ExpressionResolver<'a, G> {
    /// `context` is the simple name of the enclosing declaration, carried
    /// into every warning this resolver emits.
    pub fn new(grammar: &'a G, diagnostics: &'a DiagnosticManager, context: &'a str) -> Self {
        Self {
            grammar,
            diagnostics,
            context,
        }
    }

    pub fn resolve(&self, fragment: &Fragment) -> Result<ParseOutcome<G::Expr>> {
        tracing::debug!(
            expr = %fragment.value,
            context = %self.context,
            "resolving embedded expression"
        );

        let outcome = self.grammar.parse_expression(&fragment.value, fragment.span)?;
        if let ParseOutcome::Failure(nested) = &outcome {
            self.diagnostics
                .add_diagnostic(self.failure_warning(fragment, nested));
        }
        Ok(outcome)
    }

    fn failure_warning(&self, fragment: &Fragment, nested: &[Diagnostic]) -> Diagnostic {
        let detail = nested.iter().map(|d| d.to_string()).join("; ");
        Diagnostic::warning(format!(
            "cannot parse `{}` as an expression: {}",
            fragment.value, detail
        ))
        .with_span(fragment.span)
        .with_code("malformed-expression")
        .with_source_context(self.context)
        .with_suggestion(format!(
            "the placeholder `{}` is kept as literal text",
            fragment.raw
        ))
    }
}
