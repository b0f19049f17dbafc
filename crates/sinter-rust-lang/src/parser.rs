use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use sinter_core::diagnostics::Diagnostic;
use sinter_core::error::{Error, Result};
use sinter_core::grammar::{ExpressionGrammar, ParseOutcome};
use sinter_core::span::Span;

use crate::expr::SpannedExpr;

/// Reserved words of the host grammar, strict and reserved alike. A
/// placeholder body equal to one of these is never identifier-promoted.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield", "_",
];

/// `ExpressionGrammar` backed by the `syn` front end. Each call to
/// `parse_expression` runs an independent, syntax-only parse of a synthetic
/// value binding; no state is shared between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RustGrammar;

impl RustGrammar {
    pub fn new() -> Self {
        RustGrammar
    }
}

/// Embed the expression text in a minimal, syntactically complete item. The
/// stringify call rides along into the extracted subtree, so every
/// interpolated value is converted to a string at runtime.
fn wrapper_source(text: &str) -> String {
    format!("const __VALUE: () = ToString::to_string(&({}));", text)
}

impl ExpressionGrammar for RustGrammar {
    type Expr = SpannedExpr;

    fn is_keyword(&self, word: &str) -> bool {
        KEYWORDS.contains(&word)
    }

    fn parse_expression(&self, text: &str, span: Span) -> Result<ParseOutcome<SpannedExpr>> {
        let source = wrapper_source(text);
        // The front end reports malformed input as structured errors; a
        // panic here is an internal failure, fatal for this literal.
        let parsed = catch_unwind(AssertUnwindSafe(|| {
            syn::parse_str::<syn::ItemConst>(&source)
        }));

        match parsed {
            Ok(Ok(item)) => Ok(ParseOutcome::Success(SpannedExpr::new(*item.expr, span))),
            Ok(Err(err)) => Ok(ParseOutcome::Failure(parse_diagnostics(err, span))),
            Err(panic) => Err(Error::internal(span, panic_text(panic))),
        }
    }

    fn string_literal(&self, value: &str, span: Span) -> SpannedExpr {
        let lit = syn::LitStr::new(value, proc_macro2::Span::call_site());
        SpannedExpr::new(
            syn::Expr::Lit(syn::ExprLit {
                attrs: Vec::new(),
                lit: syn::Lit::Str(lit),
            }),
            span,
        )
    }

    fn concat(&self, lhs: SpannedExpr, rhs: SpannedExpr, span: Span) -> SpannedExpr {
        let expr = syn::Expr::Binary(syn::ExprBinary {
            attrs: Vec::new(),
            left: Box::new(lhs.into_expr()),
            op: syn::BinOp::Add(Default::default()),
            right: Box::new(rhs.into_expr()),
        });
        SpannedExpr::new(expr, span)
    }
}

fn parse_diagnostics(err: syn::Error, span: Span) -> Vec<Diagnostic> {
    err.into_iter()
        .map(|e| {
            Diagnostic::warning(e.to_string())
                .with_span(span)
                .with_code("syntax")
        })
        .collect()
}

fn panic_text(payload: Box<dyn Any + Send>) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "expression front end panicked".to_string()
    }
}
