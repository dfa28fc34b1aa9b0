//! Translates canonical markup into the flat dialect of the symbolic-algebra backend, and back
//!
//! The dialect has no backslashes, explicit parentheses around every call argument, `*` for every
//! product and `^` for powers, e.g. `x*exp(-2*x)` for `x e^{-2x}`.
//!
//! Translation is an ordered list of rewrite passes, each total. Later passes rely on earlier ones:
//! powers are parenthesized before trigonometric powers are read, and explicit products are
//! inserted while the backslash still marks commands.

pub mod backend;
pub mod calls;
pub mod implicit_mul;

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::abs::{rewrite_abs, CLOSE_BAR, OPEN_BAR};
use crate::parser::functions::FunctionKind;
use crate::parser::normalize::plain_parentheses;
use crate::parser::scanner::{
    control_sequence, ends_with_control_word, map_control_sequences, matching_brace,
    matching_bracket, next_char, parse_group, skip_whitespace,
};

use self::calls::{rewrite_calls, rewrite_exponentials};
use self::implicit_mul::{ends_with_function_name, insert_implicit_multiplication};


static NULL_DELIMITER : LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(?:left|right)\s*\.").expect("valid regex literal")
});


type Pass = fn(&str) -> String;

const PASSES : &[(&str, Pass)] = &[
    ("sizing",             strip_sizing),
    ("multiplication",     multiplication_operators),
    ("fractions",          fractions),
    ("roots",              roots),
    ("powers",             powers),
    ("subscripts",         drop_subscripts),
    ("absolute values",    absolute_values),
    ("pi",                 pi),
    ("explicit products",  explicit_products),
    ("trigonometric",      trigonometric_calls),
    ("logarithms",         logarithms),
    ("exponentials",       rewrite_exponentials),
    ("markup",             strip_markup),
    ("implicit products",  insert_implicit_multiplication),
];

/// Translates canonical markup into the algebra dialect.
///
/// Never fails: markup no pass understands comes out with its backslashes stripped.
///
/// ```
/// use texgraph::algebra::to_algebra_dialect;
///
/// assert_eq!(to_algebra_dialect(r"\sin^2x"), "(sin(x))^2");
/// assert_eq!(to_algebra_dialect(r"x e^{-2x}"), "x*exp(-2*x)");
/// ```
pub fn to_algebra_dialect(markup : &str) -> String {
    let mut text = markup.to_string();
    for (name, pass) in PASSES {
        let rewritten = pass(&text);
        if rewritten != text {
            trace!("algebra, {} : {:?} -> {:?}", name, text, rewritten);
            text = rewritten;
        }
    }
    text
}

/// Cleans up a result of the backend, already typeset as markup: runs of whitespace become one space.
pub fn from_algebra_result(result : &str) -> String {
    result.split_whitespace().collect::<Vec<_>>().join(" ")
}


fn strip_sizing(text : &str) -> String {
    let text = plain_parentheses(text);
    NULL_DELIMITER.replace_all(&text, "").into_owned()
}

fn multiplication_operators(text : &str) -> String {
    map_control_sequences(text, |command| match command {
        r"\cdot" | r"\times" | r"\ast" => Some("*"),
        _ => None,
    })
}

/// `\frac{a}{b}` into `(a)/(b)`, nested fractions included.
fn fractions(text : &str) -> String {
    rewrite_commands(text, |command, text, end, result| {
        if command != r"\frac" {
            return None;
        }
        let (numerator, after_numerator) = parse_group(text, end);
        let (denominator, after_denominator) = parse_group(text, after_numerator);
        if after_numerator == end || after_denominator == after_numerator {
            return None;
        }
        result.push_str(&format!("({})/({})", fractions(numerator), fractions(denominator)));
        Some(after_denominator)
    })
}

/// `\sqrt{a}` into `sqrt(a)`, `\sqrt[n]{a}` into `(a)^(1/(n))`.
fn roots(text : &str) -> String {
    rewrite_commands(text, |command, text, end, result| {
        if command != r"\sqrt" {
            return None;
        }

        let mut cursor = skip_whitespace(text, end);
        let mut degree = None;
        if text.as_bytes().get(cursor) == Some(&b'[') {
            let close = matching_bracket(text, cursor)?;
            degree = Some(&text[cursor + 1 .. close]);
            cursor = close + 1;
        }

        let (radicand, after) = parse_group(text, cursor);
        if after == cursor {
            return None;
        }
        match degree {
            Some(degree) => result.push_str(&format!(" ({})^(1/({}))", roots(radicand), roots(degree))),
            None         => result.push_str(&format!(" sqrt({})", roots(radicand))),
        }
        Some(after)
    })
}

/// `^{..}` into `^(..)`.
fn powers(text : &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut index = 0;
    while let Some((character, after)) = next_char(text, index) {
        if let Some((command, end)) = control_sequence(text, index) {
            result.push_str(command);
            index = end;
            continue;
        }

        result.push(character);
        index = after;
        if character != '^' {
            continue;
        }

        let open = skip_whitespace(text, after);
        if text.as_bytes().get(open) == Some(&b'{') {
            if let Some(close) = matching_brace(text, open) {
                result.push('(');
                result.push_str(&powers(&text[open + 1 .. close]));
                result.push(')');
                index = close + 1;
            }
        }
    }
    result
}

/// Subscripts carry no meaning in the algebra dialect, except the base of `\log_{b}`.
fn drop_subscripts(text : &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut index = 0;
    while let Some((character, after)) = next_char(text, index) {
        if let Some((command, end)) = control_sequence(text, index) {
            result.push_str(command);
            index = end;
            continue;
        }

        if character == '_' && !result.trim_end().ends_with(r"\log") {
            let (_, end) = parse_group(text, after);
            if end > after {
                index = end;
                continue;
            }
        }

        result.push(character);
        index = after;
    }
    result
}

/// `\left| .. \right|` into `abs(..)`, whatever spelling of the absolute value the markup used.
fn absolute_values(text : &str) -> String {
    let text = rewrite_abs(text);
    abs_calls(&text)
}

fn abs_calls(text : &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut index = 0;
    while let Some(open) = text[index ..].find(OPEN_BAR).map(|found| index + found) {
        let content_start = open + OPEN_BAR.len();
        let close = match matching_close_bar(text, content_start) {
            Some(close) => close,
            None        => break,
        };

        result.push_str(&text[index .. open]);
        result.push_str(" abs(");
        result.push_str(abs_calls(&text[content_start .. close]).trim());
        result.push(')');
        index = close + CLOSE_BAR.len();
    }
    result.push_str(&text[index ..]);
    result
}

fn matching_close_bar(text : &str, from : usize) -> Option<usize> {
    let mut depth : u32 = 1;
    let mut index = from;
    while let Some((_, after)) = next_char(text, index) {
        let (command, end) = match control_sequence(text, index) {
            Some(command) => command,
            None => {
                index = after;
                continue;
            },
        };

        let bar = text.as_bytes().get(end) == Some(&b'|');
        match command {
            r"\left" if bar => depth += 1,
            r"\right" if bar => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            },
            _ => (),
        }
        index = end;
    }
    None
}

fn pi(text : &str) -> String {
    map_control_sequences(text, |command| match command {
        r"\pi" => Some(" pi "),
        _ => None,
    })
}

/// `x\sin(x)` into `x*\sin(x)` and `xe^(x)` into `x*e^(x)`.
fn explicit_products(text : &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut after_operand = false;
    let mut index = 0;
    while let Some((character, after)) = next_char(text, index) {
        if let Some((command, end)) = control_sequence(text, index) {
            let word = command[1 ..].starts_with(|c : char| c.is_ascii_alphabetic());
            if word && after_operand && !matches!(command, r"\left" | r"\right") {
                result.push('*');
            }
            result.push_str(command);
            after_operand = false;
            index = end;
            continue;
        }

        if character == 'e' && after_operand && text.as_bytes().get(after) == Some(&b'^') {
            result.push('*');
        }
        result.push(character);
        after_operand = character.is_ascii_alphanumeric();
        index = after;
    }
    result
}

fn trigonometric_calls(text : &str) -> String {
    rewrite_calls(text, &[FunctionKind::Trigonometric, FunctionKind::Plain])
}

fn logarithms(text : &str) -> String {
    rewrite_calls(text, &[FunctionKind::Logarithm])
}

/// Drops the remaining backslashes and `\left`/`\right`, turns braces into parentheses, and
/// removes whitespace. Whitespace between two operands (`x y`, `2 pi`, `) (`) is a product.
fn strip_markup(text : &str) -> String {
    let mut stripped = String::with_capacity(text.len());
    let mut index = 0;
    while let Some((character, after)) = next_char(text, index) {
        if let Some((command, end)) = control_sequence(text, index) {
            match command {
                r"\left" | r"\right" | r"\\" => (),
                _ => stripped.push_str(&command[1 ..]),
            }
            index = end;
            continue;
        }

        match character {
            '{' => stripped.push('('),
            '}' => stripped.push(')'),
            _   => stripped.push(character),
        }
        index = after;
    }

    let mut result = String::with_capacity(stripped.len());
    let mut characters = stripped.chars().peekable();
    while let Some(character) = characters.next() {
        if !character.is_whitespace() {
            result.push(character);
            continue;
        }

        while characters.next_if(|c| c.is_whitespace()).is_some() {}
        let left = result.chars().last();
        let right = characters.peek().copied();
        if let (Some(left), Some(right)) = (left, right) {
            let left_operand = left.is_ascii_alphanumeric() || left == ')';
            let right_operand = right.is_ascii_alphanumeric() || right == '(';
            let call = right == '(' && ends_with_function_name(&result);
            if left_operand && right_operand && !call {
                result.push('*');
            }
        }
    }
    result
}

/// Scans `text`, handing each control sequence to `rewrite` along with the offset past it.
/// `rewrite` either writes a replacement and returns the offset to resume from, or returns `None`
/// to keep the command.
fn rewrite_commands<F>(text : &str, rewrite : F) -> String
where F : Fn(&str, &str, usize, &mut String) -> Option<usize>
{
    let mut result = String::with_capacity(text.len());
    let mut index = 0;
    while let Some((character, after)) = next_char(text, index) {
        let (command, end) = match control_sequence(text, index) {
            Some(command) => command,
            None => {
                result.push(character);
                index = after;
                continue;
            },
        };

        let mut replacement = String::new();
        match rewrite(command, text, end, &mut replacement) {
            Some(resume) => {
                if ends_with_control_word(&result) && replacement.starts_with(|c : char| c.is_ascii_alphabetic()) {
                    result.push(' ');
                }
                result.push_str(&replacement);
                index = resume;
            },
            None => {
                result.push_str(command);
                index = end;
            },
        }
    }
    result
}
