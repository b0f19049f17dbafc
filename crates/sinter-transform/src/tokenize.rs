use once_cell::sync::Lazy;
use regex::Regex;
use sinter_core::fragment::{Fragment, InterpolationMode};
use sinter_core::grammar::ExpressionGrammar;
use sinter_core::span::Span;

/// One placeholder: `${` + a run containing neither `{` nor `}` + `}`.
/// Unbalanced or nested braces simply fail to match and pass through as
/// ordinary literal characters.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{[^{}]*\}").expect("placeholder pattern"));

/// A whole placeholder whose body is nothing but punctuation (other than
/// `$` and `_`) or nothing but digits, whitespace allowed in either. Such
/// placeholders are kept verbatim and never parsed, in either mode. A body
/// mixing digits with operators (`1+1`) is an ordinary expression.
static PUNCTUATION_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$\{(?:[\s!-#%-/:-@\[-^`{-~]+|[\s0-9]+)\}$").expect("punctuation pattern")
});

/// One valid host identifier token.
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[$A-Za-z_][$A-Za-z0-9_]*$").expect("identifier pattern"));

/// `${}` is not an interpolation site: it denotes one literal `$`.
const ESCAPE: &str = "${}";

/// Split decoded literal text into an ordered fragment sequence. `base` is
/// the span of the literal's content in the original source; each fragment's
/// span is `base.lo` plus its start index in `text`. The grammar handle
/// supplies only the host keyword test, used by `IdentifierOnly` mode.
///
/// Concatenating the fragments' `raw` forms reconstructs `text` exactly;
/// zero-length literal runs are never emitted.
pub fn tokenize<G: ExpressionGrammar>(
    text: &str,
    base: Span,
    mode: InterpolationMode,
    grammar: &G,
) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut cursor = 0usize;

    for m in PLACEHOLDER.find_iter(text) {
        let matched = m.as_str();
        let (start, end) = (m.start(), m.end());

        if matched == ESCAPE {
            // Collapse to a literal `$`, merged into the pending run.
            let mut value = String::from(&text[cursor..start]);
            value.push('$');
            fragments.push(Fragment::literal_raw(
                value,
                &text[cursor..end],
                base.subspan(cursor as u32, end as u32),
            ));
        } else if PUNCTUATION_ONLY.is_match(matched) {
            fragments.push(Fragment::literal(
                &text[cursor..end],
                base.subspan(cursor as u32, end as u32),
            ));
        } else {
            let body = matched[2..matched.len() - 1].trim();
            if promote(body, mode, grammar) {
                if start != cursor {
                    fragments.push(Fragment::literal(
                        &text[cursor..start],
                        base.subspan(cursor as u32, start as u32),
                    ));
                }
                fragments.push(Fragment::expression(
                    body,
                    matched,
                    base.subspan(start as u32, end as u32),
                ));
            } else {
                fragments.push(Fragment::literal(
                    &text[cursor..end],
                    base.subspan(cursor as u32, end as u32),
                ));
            }
        }
        cursor = end;
    }

    if cursor < text.len() {
        fragments.push(Fragment::literal(
            &text[cursor..],
            base.subspan(cursor as u32, text.len() as u32),
        ));
    }

    fragments
}

fn promote<G: ExpressionGrammar>(body: &str, mode: InterpolationMode, grammar: &G) -> bool {
    match mode {
        InterpolationMode::FullExpression => true,
        InterpolationMode::IdentifierOnly => {
            !grammar.is_keyword(body) && IDENTIFIER.is_match(body)
        }
    }
}
