// Shared fake host grammar: enough structure to observe what the pass
// builds, without pulling in a real front end.

use sinter_core::diagnostics::Diagnostic;
use sinter_core::error::{Error, Result};
use sinter_core::grammar::{ExpressionGrammar, ParseOutcome};
use sinter_core::span::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeExpr {
    Lit(String, Span),
    Parsed(String, Span),
    Concat(Box<FakeExpr>, Box<FakeExpr>, Span),
}

impl FakeExpr {
    pub fn span(&self) -> Span {
        match self {
            FakeExpr::Lit(_, span) => *span,
            FakeExpr::Parsed(_, span) => *span,
            FakeExpr::Concat(_, _, span) => *span,
        }
    }

    /// Render the tree with explicit nesting, e.g. `(("a" + <1+1>) + "b")`.
    pub fn render(&self) -> String {
        match self {
            FakeExpr::Lit(text, _) => format!("{:?}", text),
            FakeExpr::Parsed(text, _) => format!("<{}>", text),
            FakeExpr::Concat(lhs, rhs, _) => format!("({} + {})", lhs.render(), rhs.render()),
        }
    }
}

pub struct FakeGrammar;

impl ExpressionGrammar for FakeGrammar {
    type Expr = FakeExpr;

    fn is_keyword(&self, word: &str) -> bool {
        matches!(word, "class" | "match" | "fn" | "let" | "while" | "_")
    }

    fn parse_expression(&self, text: &str, span: Span) -> Result<ParseOutcome<FakeExpr>> {
        if text == "boom" {
            return Err(Error::internal(span, "front end crashed"));
        }
        if balanced(text) {
            Ok(ParseOutcome::Success(FakeExpr::Parsed(text.to_string(), span)))
        } else {
            Ok(ParseOutcome::Failure(vec![Diagnostic::warning(format!(
                "unbalanced delimiters in `{}`",
                text
            ))
            .with_span(span)
            .with_code("fake-syntax")]))
        }
    }

    fn string_literal(&self, value: &str, span: Span) -> FakeExpr {
        FakeExpr::Lit(value.to_string(), span)
    }

    fn concat(&self, lhs: FakeExpr, rhs: FakeExpr, span: Span) -> FakeExpr {
        FakeExpr::Concat(Box::new(lhs), Box::new(rhs), span)
    }
}

fn balanced(text: &str) -> bool {
    let mut depth = 0i32;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

pub fn span(lo: u32, hi: u32) -> Span {
    Span::new(0, lo, hi)
}
