mod support;

use pretty_assertions::assert_eq;
use sinter_core::diagnostics::DiagnosticManager;
use sinter_core::fragment::InterpolationMode;
use sinter_core::Error;
use sinter_transform::pipeline::Interpolator;
use support::{span, FakeGrammar};

fn interpolator<'a>(diagnostics: &'a DiagnosticManager) -> Interpolator<'a, FakeGrammar> {
    Interpolator::new(&FakeGrammar, diagnostics)
}

#[test]
fn literal_without_placeholders_is_untouched() {
    let diagnostics = DiagnosticManager::new();
    let result = interpolator(&diagnostics)
        .transform_literal("hello", span(0, 5), InterpolationMode::FullExpression, "main")
        .expect("transform");
    assert!(result.is_no_change());
    assert!(diagnostics.is_empty());
}

#[test]
fn empty_literal_is_untouched() {
    let diagnostics = DiagnosticManager::new();
    let result = interpolator(&diagnostics)
        .transform_literal("", span(0, 0), InterpolationMode::FullExpression, "main")
        .expect("transform");
    assert!(result.is_no_change());
}

#[test]
fn escape_only_literal_is_rebuilt_with_a_dollar() {
    let diagnostics = DiagnosticManager::new();
    let result = interpolator(&diagnostics)
        .transform_literal("cost ${}", span(0, 8), InterpolationMode::FullExpression, "main")
        .expect("transform");
    let rebuilt = result.replaced().expect("replaced");
    assert_eq!(rebuilt.render(), r#""cost $""#);
    assert!(diagnostics.is_empty());

    // Text after the escape becomes a second literal run; the two fold.
    let result = interpolator(&diagnostics)
        .transform_literal("cost ${}5", span(0, 9), InterpolationMode::FullExpression, "main")
        .expect("transform");
    let folded = result.replaced().expect("replaced");
    assert_eq!(folded.render(), r#"("cost $" + "5")"#);
}

#[test]
fn mixed_literal_folds_into_concatenation() {
    let diagnostics = DiagnosticManager::new();
    let result = interpolator(&diagnostics)
        .transform_literal("a${1+1}b", span(0, 8), InterpolationMode::FullExpression, "main")
        .expect("transform");
    let folded = result.replaced().expect("replaced");
    assert_eq!(folded.render(), r#"(("a" + <1+1>) + "b")"#);
    assert!(diagnostics.is_empty());
}

#[test]
fn malformed_expression_falls_back_to_verbatim_text_with_warning() {
    let diagnostics = DiagnosticManager::new();
    let result = interpolator(&diagnostics)
        .transform_literal(
            "a${(}b",
            span(0, 6),
            InterpolationMode::FullExpression,
            "main",
        )
        .expect("recovered, not fatal");
    let folded = result.replaced().expect("replaced");
    assert_eq!(folded.render(), r#"(("a" + "${(}") + "b")"#);
    assert!(diagnostics.has_warnings());
    assert!(!diagnostics.has_errors());
}

#[test]
fn lone_malformed_placeholder_leaves_the_literal_alone() {
    let diagnostics = DiagnosticManager::new();
    let result = interpolator(&diagnostics)
        .transform_literal("${(}", span(0, 4), InterpolationMode::FullExpression, "main")
        .expect("recovered, not fatal");
    assert!(result.is_no_change());
    assert_eq!(diagnostics.get_diagnostics().len(), 1);
}

#[test]
fn internal_failure_aborts_only_this_literal() {
    let diagnostics = DiagnosticManager::new();
    let worker = interpolator(&diagnostics);

    let err = worker
        .transform_literal(
            "x${boom}y",
            span(0, 9),
            InterpolationMode::FullExpression,
            "main",
        )
        .expect_err("fatal for this literal");
    assert!(matches!(err, Error::Internal { .. }));

    // Unrelated literals keep working through the same interpolator.
    let result = worker
        .transform_literal("a${1+1}b", span(0, 8), InterpolationMode::FullExpression, "main")
        .expect("transform");
    assert!(result.replaced().is_some());
}

#[test]
fn identifier_mode_flows_through_the_pipeline() {
    let diagnostics = DiagnosticManager::new();
    let worker = interpolator(&diagnostics);

    let result = worker
        .transform_literal("${foo}", span(0, 6), InterpolationMode::IdentifierOnly, "main")
        .expect("transform");
    assert_eq!(
        result.replaced().expect("replaced").render(),
        "<foo>"
    );

    let result = worker
        .transform_literal("${class}", span(0, 8), InterpolationMode::IdentifierOnly, "main")
        .expect("transform");
    assert!(result.is_no_change());
}
