use proc_macro2::TokenStream;
use quote::ToTokens;
use sinter_core::span::Span;

/// A host expression paired with the source position it reports. The
/// position lives on the wrapper: `proc_macro2` spans cannot encode file
/// offsets outside a proc-macro invocation, so the parsed subtree keeps its
/// synthetic spans and this attribute is what diagnostics consume.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedExpr {
    pub expr: syn::Expr,
    pub span: Span,
}

impl SpannedExpr {
    pub fn new(expr: syn::Expr, span: Span) -> Self {
        Self { expr, span }
    }

    pub fn set_span(&mut self, span: Span) {
        self.span = span;
    }

    pub fn into_expr(self) -> syn::Expr {
        self.expr
    }
}

impl ToTokens for SpannedExpr {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.expr.to_tokens(tokens);
    }
}

impl std::fmt::Display for SpannedExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expr.to_token_stream())
    }
}
