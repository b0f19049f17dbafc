mod support;

use pretty_assertions::assert_eq;
use sinter_core::diagnostics::Diagnostic;
use sinter_core::fragment::Fragment;
use sinter_core::grammar::ParseOutcome;
use sinter_transform::splice::{splice, ResolvedFragment, Spliced};
use support::{span, FakeExpr, FakeGrammar};

fn failure() -> ParseOutcome<FakeExpr> {
    ParseOutcome::Failure(vec![Diagnostic::warning("does not parse")])
}

#[test]
fn no_fragments_is_no_change() {
    let result = splice(&FakeGrammar, Vec::new());
    assert!(result.is_no_change());
}

#[test]
fn lone_literal_is_no_change() {
    let parts = vec![ResolvedFragment::literal(Fragment::literal(
        "plain",
        span(0, 5),
    ))];
    assert!(splice(&FakeGrammar, parts).is_no_change());
}

#[test]
fn lone_escaped_literal_is_rebuilt_with_its_cooked_value() {
    // `100${}` cooks to `100$`: the node must be replaced even though no
    // expression survived.
    let parts = vec![ResolvedFragment::literal(Fragment::literal_raw(
        "100$",
        "100${}",
        span(0, 6),
    ))];
    let rebuilt = splice(&FakeGrammar, parts).replaced().expect("replaced");
    assert_eq!(rebuilt, FakeExpr::Lit("100$".into(), span(0, 6)));
}

#[test]
fn lone_resolved_expression_replaces_the_literal_directly() {
    let expr = FakeExpr::Parsed("name".into(), span(0, 7));
    let parts = vec![ResolvedFragment::resolved(
        Fragment::expression("name", "${name}", span(0, 7)),
        ParseOutcome::Success(expr.clone()),
    )];
    assert_eq!(splice(&FakeGrammar, parts), Spliced::Replaced(expr));
}

#[test]
fn lone_failed_expression_leaves_the_literal_untouched() {
    let parts = vec![ResolvedFragment::resolved(
        Fragment::expression("(", "${(}", span(0, 4)),
        failure(),
    )];
    assert!(splice(&FakeGrammar, parts).is_no_change());
}

#[test]
fn fragments_fold_left_associative() {
    let parts = vec![
        ResolvedFragment::literal(Fragment::literal("a", span(0, 1))),
        ResolvedFragment::resolved(
            Fragment::expression("1+1", "${1+1}", span(1, 7)),
            ParseOutcome::Success(FakeExpr::Parsed("1+1".into(), span(1, 7))),
        ),
        ResolvedFragment::literal(Fragment::literal("b", span(7, 8))),
    ];

    let folded = splice(&FakeGrammar, parts).replaced().expect("replaced");
    assert_eq!(folded.render(), r#"(("a" + <1+1>) + "b")"#);
}

#[test]
fn intermediate_nodes_sit_at_the_leftmost_fragment() {
    let parts = vec![
        ResolvedFragment::literal(Fragment::literal("x", span(4, 5))),
        ResolvedFragment::resolved(
            Fragment::expression("n", "${n}", span(5, 9)),
            ParseOutcome::Success(FakeExpr::Parsed("n".into(), span(5, 9))),
        ),
        ResolvedFragment::literal(Fragment::literal("y", span(9, 10))),
    ];

    let folded = splice(&FakeGrammar, parts).replaced().expect("replaced");
    // Outermost concat, and the one nested inside it, both report the
    // leftmost fragment's position.
    assert_eq!(folded.span(), span(4, 5));
    match folded {
        FakeExpr::Concat(lhs, _, _) => assert_eq!(lhs.span(), span(4, 5)),
        other => panic!("expected concat, got {:?}", other),
    }
}

#[test]
fn failed_fragment_is_demoted_to_its_verbatim_text() {
    let parts = vec![
        ResolvedFragment::literal(Fragment::literal("a", span(0, 1))),
        ResolvedFragment::resolved(
            Fragment::expression("(", "${(}", span(1, 5)),
            failure(),
        ),
    ];

    let folded = splice(&FakeGrammar, parts).replaced().expect("replaced");
    assert_eq!(folded.render(), r#"("a" + "${(}")"#);
}

#[test]
fn demoted_fragment_keeps_its_span() {
    let parts = vec![
        ResolvedFragment::resolved(
            Fragment::expression("(", "${(}", span(2, 6)),
            failure(),
        ),
        ResolvedFragment::literal(Fragment::literal("z", span(6, 7))),
    ];

    let folded = splice(&FakeGrammar, parts).replaced().expect("replaced");
    match folded {
        FakeExpr::Concat(lhs, _, at) => {
            assert_eq!(lhs.span(), span(2, 6));
            assert_eq!(at, span(2, 6));
        }
        other => panic!("expected concat, got {:?}", other),
    }
}
