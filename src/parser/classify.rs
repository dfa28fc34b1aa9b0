//! Classifies canonical markup into a [`Construct`] and extracts its parts
//!
//! Constructs are tried in a fixed order: summation, integral, derivative. Each attempt
//! either matches fully or gives up, and anything that matches nothing is [`Construct::Plain`].

use std::sync::LazyLock;

use regex::Regex;

use super::nodes::{Construct, Derivative, EvaluationPoint, Integral, IntegralBounds, Plain, Summation};
use super::normalize::{plain_parentheses, strip_spacing};
use super::scanner::{
    control_sequence, map_control_sequences, matching_brace, parse_bounds, parse_group,
    skip_whitespace, strip_outer_parens,
};


static DIFFERENTIAL_SUFFIX : LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(.*?)\s*d\s*(\\[a-zA-Z]+|[a-zA-Z])\s*$").expect("valid regex literal")
});
static DERIVATIVE_TOP : LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*d\s*(?:\^\s*(?:\{\s*(\d+)\s*\}|(\d)))?\s*$").expect("valid regex literal")
});
static DERIVATIVE_BOTTOM : LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*d\s*(\\[a-zA-Z]+|[a-zA-Z])\s*(?:\^\s*(?:\{\s*(\d+)\s*\}|(\d)))?\s*$").expect("valid regex literal")
});
static EVALUATION_BINDING : LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*(\\?[a-zA-Z]+)\s*=\s*(.+?)\s*$").expect("valid regex literal")
});
static TRAILING_SIZING : LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\\(?:right|[bB]igg?r?)\s*$").expect("valid regex literal")
});
static LEADING_NULL_DELIMITER : LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\\left\s*\.").expect("valid regex literal")
});


/// Classifies canonical markup. Total: anything unrecognized is [`Construct::Plain`].
///
/// ```
/// use texgraph::parser::classify::classify;
/// use texgraph::parser::nodes::Construct;
///
/// match classify(r"\int_{0}^{1} x^{2} dx") {
///     Construct::Integral(integral) => {
///         assert_eq!(integral.body, "x^{2}");
///         assert_eq!(integral.differential_variable, "x");
///         assert!(integral.is_definite());
///     },
///     other => panic!("not an integral: {:?}", other),
/// }
/// ```
pub fn classify(latex : &str) -> Construct {
    let text = latex.trim();

    let construct =
        summation(latex, text)
        .or_else(|| integral(text))
        .or_else(|| derivative(text))
        .unwrap_or_else(|| Construct::Plain(Plain { latex: latex.to_string() }));

    debug!("classified {:?} as {}", latex, construct.kind_name());
    construct
}

/// Offset just past `command` if `text` starts with it; `\int` doesn't match `\intop`.
fn leading_command(text : &str, command : &str) -> Option<usize> {
    match control_sequence(text, 0) {
        Some((name, end)) if name == command => Some(end),
        _ => None,
    }
}

fn summation(latex : &str, text : &str) -> Option<Construct> {
    let start = leading_command(text, r"\sum")?;
    let bounds = parse_bounds(text, start);
    let (lower, upper) = match bounds.complete() {
        Some(found) => found,
        None => {
            debug!("summation {:?} lacks a bound", text);
            return None;
        },
    };

    Some(Construct::Summation(Summation {
        latex       : latex.to_string(),
        lower_bound : lower.to_string(),
        upper_bound : upper.to_string(),
    }))
}

fn integral(text : &str) -> Option<Construct> {
    let start = leading_command(text, r"\int")?;
    let bounds = parse_bounds(text, start);
    let remainder = strip_formatting(&text[bounds.end_offset ..]);

    let captures = match DIFFERENTIAL_SUFFIX.captures(&remainder) {
        Some(captures) => captures,
        None => {
            debug!("integral {:?} without differential suffix", text);
            return None;
        },
    };

    let body = clean_integrand(captures.get(1).map_or("", |body| body.as_str()));
    let differential_variable = captures.get(2).map_or("", |variable| variable.as_str()).to_string();
    let bounds = bounds.complete().map(|(lower, upper)| IntegralBounds {
        lower : lower.to_string(),
        upper : upper.to_string(),
    });

    Some(Construct::Integral(Integral { body, differential_variable, bounds }))
}

/// Spacing and style commands carry no meaning inside an integrand.
fn strip_formatting(text : &str) -> String {
    let text = strip_spacing(text);
    map_control_sequences(&text, |command| match command {
        r"\displaystyle" | r"\textstyle" => Some(""),
        _ => None,
    })
}

fn clean_integrand(body : &str) -> String {
    let body = plain_parentheses(body);
    let body = strip_outer_parens(&body);
    if body.is_empty() {
        // \int dx
        String::from("1")
    }
    else {
        body.to_string()
    }
}

fn derivative(text : &str) -> Option<Construct> {
    let start = leading_command(text, r"\frac")?;
    let (top, after_top) = parse_group(text, start);
    let (bottom, after_bottom) = parse_group(text, after_top);

    let top = DERIVATIVE_TOP.captures(top)?;
    let bottom = DERIVATIVE_BOTTOM.captures(bottom)?;

    let top_order = parse_order(top.get(1).or_else(|| top.get(2)))?;
    let bottom_order = parse_order(bottom.get(2).or_else(|| bottom.get(3)))?;
    if top_order != bottom_order || top_order == 0 {
        debug!("derivative {:?} has mismatched orders {} and {}", text, top_order, bottom_order);
        return None;
    }

    let variable = bottom.get(1).map_or("", |variable| variable.as_str()).to_string();
    let body = text.get(after_bottom ..).unwrap_or("").trim();
    if body.is_empty() {
        return None;
    }

    let (body, evaluation_point) = match split_evaluation(body) {
        Some((before, point)) if same_variable(&point.variable, &variable) => (before, Some(point)),
        Some((_, point)) => {
            debug!("derivative in {} evaluated at {}, keeping the suffix in the body", variable, point.variable);
            (body.to_string(), None)
        },
        None => (body.to_string(), None),
    };

    Some(Construct::Derivative(Derivative {
        order : top_order,
        variable,
        body,
        evaluation_point,
    }))
}

/// An absent order is 1. An order too large for `u32` fails.
fn parse_order(order : Option<regex::Match>) -> Option<u32> {
    match order {
        Some(order) => order.as_str().parse().ok(),
        None        => Some(1),
    }
}

fn same_variable(a : &str, b : &str) -> bool {
    a.trim_start_matches('\\') == b.trim_start_matches('\\')
}

/// Splits `body|_{x=3}` into `body` and the point. The suffix starts at the rightmost bar
/// followed by `_` and a brace group reaching the end of `body`, so the value may hold bars of its own.
fn split_evaluation(body : &str) -> Option<(String, EvaluationPoint)> {
    let (bar, open, close) = body.rmatch_indices('|').find_map(|(bar, _)| {
        let underscore = skip_whitespace(body, bar + 1);
        if body.as_bytes().get(underscore) != Some(&b'_') {
            return None;
        }
        let open = skip_whitespace(body, underscore + 1);
        let close = matching_brace(body, open)?;
        (close + 1 == body.len()).then_some((bar, open, close))
    })?;

    let binding = EVALUATION_BINDING.captures(&body[open + 1 .. close])?;
    let point = EvaluationPoint {
        variable : binding.get(1)?.as_str().to_string(),
        value    : binding.get(2)?.as_str().to_string(),
    };

    let before = TRAILING_SIZING.replace(&body[.. bar], "");
    let before = LEADING_NULL_DELIMITER.replace(&before, "");
    let before = before.trim();
    if before.is_empty() {
        return None;
    }
    Some((before.to_string(), point))
}
