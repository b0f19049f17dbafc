use itertools::Itertools;
use sinter_core::diagnostics::DiagnosticManager;
use sinter_core::error::Result;
use sinter_core::fragment::{FragmentKind, InterpolationMode};
use sinter_core::grammar::ExpressionGrammar;
use sinter_core::span::Span;

use crate::resolve::ExpressionResolver;
use crate::splice::{splice, ResolvedFragment, Spliced};
use crate::tokenize::tokenize;

/// Drives one literal through tokenize, resolve and splice. The progression
/// is strictly linear; the only backtracking is the resolver's literal
/// fallback inside `splice`.
pub struct Interpolator<'a, G: ExpressionGrammar> {
    grammar: &'a G,
    diagnostics: &'a DiagnosticManager,
}

impl<'a, G: ExpressionGrammar> Interpolator<'a, G> {
    pub fn new(grammar: &'a G, diagnostics: &'a DiagnosticManager) -> Self {
        Self {
            grammar,
            diagnostics,
        }
    }

    /// Transform one decoded literal. `span` covers the literal's content in
    /// the original source; `context` names the enclosing declaration for
    /// diagnostics. Returns `Err` only on an internal front-end failure,
    /// which is fatal for this literal alone.
    pub fn transform_literal(
        &self,
        text: &str,
        span: Span,
        mode: InterpolationMode,
        context: &str,
    ) -> Result<Spliced<G::Expr>> {
        if text.is_empty() {
            return Ok(Spliced::NoChange);
        }

        let fragments = tokenize(text, span, mode, self.grammar);
        let resolver = ExpressionResolver::new(self.grammar, self.diagnostics, context);
        let resolved: Vec<ResolvedFragment<G::Expr>> = fragments
            .into_iter()
            .map(|fragment| -> Result<ResolvedFragment<G::Expr>> {
                Ok(match fragment.kind {
                    FragmentKind::Expression => {
                        let outcome = resolver.resolve(&fragment)?;
                        ResolvedFragment::resolved(fragment, outcome)
                    }
                    FragmentKind::Literal => ResolvedFragment::literal(fragment),
                })
            })
            .try_collect()?;

        Ok(splice(self.grammar, resolved))
    }
}
