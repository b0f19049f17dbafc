use syn::visit_mut::{self, VisitMut};

use sinter_core::diagnostics::{Diagnostic, DiagnosticManager};
use sinter_core::fragment::InterpolationMode;
use sinter_core::span::{FileId, Span};
use sinter_transform::pipeline::Interpolator;
use sinter_transform::splice::Spliced;

use crate::parser::RustGrammar;

/// Attribute that opts a declaration into interpolation.
pub const ATTRIBUTE_NAME: &str = "interpolate";

/// Per-declaration directive. Inherited by everything the declaration
/// encloses until overridden by a nested attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Off,
    On(InterpolationMode),
}

/// Rewrite `${...}` placeholders in every string literal of `file` covered
/// by an `#[interpolate]` directive. `file_id` tags the spans handed to
/// diagnostics. Literals inside attribute arguments are never touched, and
/// declarations without a directive anywhere up the chain are left alone.
///
/// A fatal per-literal error is recorded as an error diagnostic and the
/// walk continues with unrelated literals.
pub fn interpolate_file(
    file: &mut syn::File,
    file_id: FileId,
    grammar: &RustGrammar,
    diagnostics: &DiagnosticManager,
) {
    let walk = Walk {
        file_id,
        grammar,
        diagnostics,
    };
    for item in &mut file.items {
        walk_item(item, None, &walk);
    }
}

struct Walk<'a> {
    file_id: FileId,
    grammar: &'a RustGrammar,
    diagnostics: &'a DiagnosticManager,
}

fn walk_item(item: &mut syn::Item, inherited: Option<Directive>, walk: &Walk<'_>) {
    match item {
        syn::Item::Fn(item) => {
            if let Some(mode) = active(directive(&item.attrs, walk).or(inherited)) {
                let context = item.sig.ident.to_string();
                rewrite_block(&mut item.block, mode, context, walk);
            }
        }
        syn::Item::Const(item) => {
            if let Some(mode) = active(directive(&item.attrs, walk).or(inherited)) {
                let context = item.ident.to_string();
                rewrite_expr(&mut item.expr, mode, context, walk);
            }
        }
        syn::Item::Static(item) => {
            if let Some(mode) = active(directive(&item.attrs, walk).or(inherited)) {
                let context = item.ident.to_string();
                rewrite_expr(&mut item.expr, mode, context, walk);
            }
        }
        syn::Item::Enum(item) => {
            if let Some(mode) = active(directive(&item.attrs, walk).or(inherited)) {
                let context = item.ident.to_string();
                for variant in &mut item.variants {
                    if let Some((_, discriminant)) = &mut variant.discriminant {
                        rewrite_expr(discriminant, mode, context.clone(), walk);
                    }
                }
            }
        }
        syn::Item::Mod(item) => {
            let directive = directive(&item.attrs, walk).or(inherited);
            if let Some((_, items)) = &mut item.content {
                for item in items {
                    walk_item(item, directive, walk);
                }
            }
        }
        syn::Item::Impl(item) => {
            let directive = directive(&item.attrs, walk).or(inherited);
            for impl_item in &mut item.items {
                walk_impl_item(impl_item, directive, walk);
            }
        }
        syn::Item::Trait(item) => {
            let directive = directive(&item.attrs, walk).or(inherited);
            for trait_item in &mut item.items {
                walk_trait_item(trait_item, directive, walk);
            }
        }
        _ => {}
    }
}

fn walk_impl_item(item: &mut syn::ImplItem, inherited: Option<Directive>, walk: &Walk<'_>) {
    match item {
        syn::ImplItem::Fn(item) => {
            if let Some(mode) = active(directive(&item.attrs, walk).or(inherited)) {
                let context = item.sig.ident.to_string();
                rewrite_block(&mut item.block, mode, context, walk);
            }
        }
        syn::ImplItem::Const(item) => {
            if let Some(mode) = active(directive(&item.attrs, walk).or(inherited)) {
                let context = item.ident.to_string();
                rewrite_expr(&mut item.expr, mode, context, walk);
            }
        }
        _ => {}
    }
}

fn walk_trait_item(item: &mut syn::TraitItem, inherited: Option<Directive>, walk: &Walk<'_>) {
    match item {
        syn::TraitItem::Fn(item) => {
            if let Some(mode) = active(directive(&item.attrs, walk).or(inherited)) {
                if let Some(block) = &mut item.default {
                    let context = item.sig.ident.to_string();
                    rewrite_block(block, mode, context, walk);
                }
            }
        }
        syn::TraitItem::Const(item) => {
            if let Some(mode) = active(directive(&item.attrs, walk).or(inherited)) {
                if let Some((_, default)) = &mut item.default {
                    let context = item.ident.to_string();
                    rewrite_expr(default, mode, context, walk);
                }
            }
        }
        _ => {}
    }
}

fn active(directive: Option<Directive>) -> Option<InterpolationMode> {
    match directive {
        Some(Directive::On(mode)) => Some(mode),
        _ => None,
    }
}

/// Read the declaration's own `#[interpolate]` attribute, if any. An
/// unrecognized argument is reported as a warning and the attribute is
/// ignored.
fn directive(attrs: &[syn::Attribute], walk: &Walk<'_>) -> Option<Directive> {
    let attr = attrs.iter().find(|a| a.path().is_ident(ATTRIBUTE_NAME))?;
    match &attr.meta {
        syn::Meta::Path(_) => Some(Directive::On(InterpolationMode::FullExpression)),
        syn::Meta::List(_) => match attr.parse_args::<syn::Ident>() {
            Ok(arg) if arg == "expression" => Some(Directive::On(InterpolationMode::FullExpression)),
            Ok(arg) if arg == "identifier" => Some(Directive::On(InterpolationMode::IdentifierOnly)),
            Ok(arg) if arg == "off" => Some(Directive::Off),
            _ => {
                walk.diagnostics.add_diagnostic(
                    Diagnostic::warning(format!(
                        "unrecognized `#[{}]` argument; expected `expression`, `identifier` or `off`",
                        ATTRIBUTE_NAME
                    ))
                    .with_code("interpolate-attribute"),
                );
                None
            }
        },
        syn::Meta::NameValue(_) => {
            walk.diagnostics.add_diagnostic(
                Diagnostic::warning(format!(
                    "`#[{} = ...]` is not supported; use `#[{}(...)]`",
                    ATTRIBUTE_NAME, ATTRIBUTE_NAME
                ))
                .with_code("interpolate-attribute"),
            );
            None
        }
    }
}

fn rewrite_block(
    block: &mut syn::Block,
    mode: InterpolationMode,
    context: String,
    walk: &Walk<'_>,
) {
    let mut rewriter = LiteralRewriter::new(mode, context, walk);
    rewriter.visit_block_mut(block);
}

fn rewrite_expr(expr: &mut syn::Expr, mode: InterpolationMode, context: String, walk: &Walk<'_>) {
    let mut rewriter = LiteralRewriter::new(mode, context, walk);
    rewriter.visit_expr_mut(expr);
}

struct LiteralRewriter<'a> {
    interpolator: Interpolator<'a, RustGrammar>,
    diagnostics: &'a DiagnosticManager,
    file_id: FileId,
    mode: InterpolationMode,
    context: String,
}

impl<'a> LiteralRewriter<'a> {
    fn new(mode: InterpolationMode, context: String, walk: &Walk<'a>) -> Self {
        Self {
            interpolator: Interpolator::new(walk.grammar, walk.diagnostics),
            diagnostics: walk.diagnostics,
            file_id: walk.file_id,
            mode,
            context,
        }
    }
}

impl VisitMut for LiteralRewriter<'_> {
    fn visit_expr_mut(&mut self, expr: &mut syn::Expr) {
        // Children first; replacement subtrees are not revisited.
        visit_mut::visit_expr_mut(self, expr);

        let syn::Expr::Lit(lit) = expr else { return };
        let syn::Lit::Str(text) = &lit.lit else { return };

        let span = literal_span(text, self.file_id);
        let value = text.value();
        match self
            .interpolator
            .transform_literal(&value, span, self.mode, &self.context)
        {
            Ok(Spliced::NoChange) => {}
            Ok(Spliced::Replaced(replacement)) => {
                tracing::debug!(literal = %value, context = %self.context, "rewrote literal");
                *expr = parenthesized(replacement.into_expr());
            }
            Err(err) => {
                // Fatal for this literal only; the walk continues elsewhere.
                self.diagnostics.add_diagnostic(
                    Diagnostic::error(err.to_string())
                        .with_span(span)
                        .with_code("internal-failure")
                        .with_source_context(self.context.clone()),
                );
            }
        }
    }

    // Literals inside attribute arguments are never interpolation sites;
    // the walk does not descend into attribute token streams at all.
    fn visit_attribute_mut(&mut self, _attr: &mut syn::Attribute) {}
}

/// Span of the literal's content within the walked file. The token range
/// covers the quotes (and any raw-string hashes); the content starts after
/// the opening quote.
fn literal_span(lit: &syn::LitStr, file: FileId) -> Span {
    let range = lit.span().byte_range();
    let token = lit.token().to_string();
    let open = token.find('"').map(|i| i + 1).unwrap_or(0);
    Span::new(file, (range.start + open) as u32, range.end as u32)
}

/// The fold must survive any parent precedence once spliced back in.
fn parenthesized(expr: syn::Expr) -> syn::Expr {
    if matches!(expr, syn::Expr::Binary(_)) {
        syn::Expr::Paren(syn::ExprParen {
            attrs: Vec::new(),
            paren_token: Default::default(),
            expr: Box::new(expr),
        })
    } else {
        expr
    }
}
