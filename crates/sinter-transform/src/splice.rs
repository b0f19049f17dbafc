use sinter_core::fragment::Fragment;
use sinter_core::grammar::{ExpressionGrammar, ParseOutcome};

/// Result of folding one literal's fragments: either the original literal
/// node is left untouched, or it is replaced wholesale.
#[derive(Debug, Clone, PartialEq)]
pub enum Spliced<E> {
    NoChange,
    Replaced(E),
}

impl<E> Spliced<E> {
    pub fn is_no_change(&self) -> bool {
        matches!(self, Spliced::NoChange)
    }

    pub fn replaced(self) -> Option<E> {
        match self {
            Spliced::Replaced(expr) => Some(expr),
            Spliced::NoChange => None,
        }
    }
}

/// A fragment paired with its resolution outcome. Literal fragments carry
/// no outcome.
#[derive(Debug, Clone)]
pub struct ResolvedFragment<E> {
    pub fragment: Fragment,
    pub outcome: Option<ParseOutcome<E>>,
}

impl<E> ResolvedFragment<E> {
    pub fn literal(fragment: Fragment) -> Self {
        Self {
            fragment,
            outcome: None,
        }
    }

    pub fn resolved(fragment: Fragment, outcome: ParseOutcome<E>) -> Self {
        Self {
            fragment,
            outcome: Some(outcome),
        }
    }

    /// A failed expression fragment reverts to a literal carrying its
    /// verbatim placeholder text; it is never dropped.
    fn demote_failure(self) -> Self {
        match self.outcome {
            Some(ParseOutcome::Failure(_)) => Self::literal(self.fragment.demote()),
            _ => self,
        }
    }
}

/// Fold resolved fragments into one replacement expression, left to right.
///
/// A lone literal fragment whose cooked value still equals the source text
/// (including a demoted failure) signals `NoChange`; a lone literal whose
/// value differs (it contained the `${}` escape) is rebuilt as a literal
/// node; a lone resolved expression replaces the literal directly; anything
/// longer left-folds into binary string concatenation, each intermediate
/// node positioned at the leftmost fragment of its subtree.
pub fn splice<G: ExpressionGrammar>(
    grammar: &G,
    resolved: Vec<ResolvedFragment<G::Expr>>,
) -> Spliced<G::Expr> {
    let mut parts: Vec<ResolvedFragment<G::Expr>> = resolved
        .into_iter()
        .map(ResolvedFragment::demote_failure)
        .collect();

    if parts.is_empty() {
        return Spliced::NoChange;
    }

    if parts.len() == 1 {
        let only = parts.remove(0);
        return match only.outcome {
            Some(ParseOutcome::Success(expr)) => Spliced::Replaced(expr),
            _ if only.fragment.value == only.fragment.raw => Spliced::NoChange,
            // The run contained the `${}` escape; the literal's runtime
            // value changed even though no expression survived.
            _ => Spliced::Replaced(
                grammar.string_literal(&only.fragment.value, only.fragment.span),
            ),
        };
    }

    // Left fold: every intermediate node's leftmost fragment is the first.
    let lead = parts[0].fragment.span;
    let mut exprs = parts.into_iter().map(|part| to_expr(grammar, part));
    let first = match exprs.next() {
        Some(expr) => expr,
        None => return Spliced::NoChange,
    };
    let folded = exprs.fold(first, |lhs, rhs| grammar.concat(lhs, rhs, lead));
    Spliced::Replaced(folded)
}

fn to_expr<G: ExpressionGrammar>(grammar: &G, part: ResolvedFragment<G::Expr>) -> G::Expr {
    match part.outcome {
        Some(ParseOutcome::Success(expr)) => expr,
        // Failures were demoted to literal fragments above.
        _ => grammar.string_literal(&part.fragment.value, part.fragment.span),
    }
}
