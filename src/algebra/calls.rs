//! Named function calls of the markup into explicit calls of the algebra dialect
//!
//! `\sin x`, `\sin(x)`, `\sin{x}` all become `sin(x)`. A power written between the function
//! and its argument applies to the call: `\sin^{2}x` is `(sin(x))^2`, and `\sin^{-1}x` is `asin(x)`.
//! `\log_{b}(x)` becomes `(log(x)/log(b))`.
//!
//! Every rewritten call is emitted with a leading space so it can't glue to the token before it.

use crate::parser::functions::{Function, FunctionKind};
use crate::parser::scanner::{control_sequence, matching_brace, matching_paren, next_char, parse_group, skip_whitespace};


/// A function applied to its argument, as found in the markup
#[derive(Debug, Clone, PartialEq, Eq)]
struct Call<'a> {
    function : Function,
    base     : Option<&'a str>,
    power    : Option<&'a str>,
    argument : &'a str,
    /// offset just past the argument
    end      : usize,
}

/// Rewrites the calls of every function whose kind is in `kinds`.
/// Calls whose argument can't be found are left untouched.
pub fn rewrite_calls(text : &str, kinds : &[FunctionKind]) -> String {
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

        let call = Function::from_name(&command[1 ..])
            .filter(|function| kinds.contains(&function.kind))
            .and_then(|function| parse_call(text, end, function));

        match call {
            Some(call) => {
                let argument = rewrite_calls(call.argument, kinds);
                emit_call(&mut result, &call, argument.trim());
                index = call.end;
            },
            None => {
                result.push_str(command);
                index = end;
            },
        }
    }
    result
}

/// Rewrites `\exp` calls and `e^..` powers into `exp(..)`.
/// An `e` right after a letter is part of an identifier, not Euler's number.
pub fn rewrite_exponentials(text : &str) -> String {
    let text = rewrite_calls(text, &[FunctionKind::Exponential]);

    let mut result = String::with_capacity(text.len());
    let mut index = 0;
    while let Some((character, after)) = next_char(&text, index) {
        if let Some((command, end)) = control_sequence(&text, index) {
            result.push_str(command);
            index = end;
            continue;
        }

        let after_letter = result.ends_with(|c : char| c.is_ascii_alphabetic());
        let power = match (character, text.as_bytes().get(after)) {
            ('e', Some(b'^')) if !after_letter => scan_power(&text, after + 1),
            _ => None,
        };

        match power {
            Some((power, end)) => {
                result.push_str(" exp(");
                result.push_str(rewrite_exponentials(power).trim());
                result.push(')');
                index = end;
            },
            None => {
                result.push(character);
                index = after;
            },
        }
    }
    result
}

fn parse_call(text : &str, offset : usize, function : Function) -> Option<Call<'_>> {
    let mut cursor = skip_whitespace(text, offset);

    let mut base = None;
    if function.kind == FunctionKind::Logarithm && text.as_bytes().get(cursor) == Some(&b'_') {
        let (value, end) = parse_group(text, cursor + 1);
        if end == cursor + 1 {
            return None;
        }
        base = Some(value.trim());
        cursor = skip_whitespace(text, end);
    }

    let mut power = None;
    if text.as_bytes().get(cursor) == Some(&b'^') {
        let (value, end) = scan_power(text, cursor + 1)?;
        power = Some(value.trim());
        cursor = end;
    }

    let (argument, end) = scan_argument(text, cursor)?;
    Some(Call { function, base, power, argument, end })
}

fn emit_call(result : &mut String, call : &Call, argument : &str) {
    let inverse = match call.power {
        Some("-1") if call.function.kind == FunctionKind::Trigonometric => call.function.inverse(),
        _ => None,
    };
    if let Some(inverse) = inverse {
        result.push_str(&format!(" {}({})", inverse, argument));
        return;
    }

    let core = match call.base {
        Some(base) => format!("(log({})/log({}))", argument, base),
        None       => format!("{}({})", call.function.algebra_name, argument),
    };

    match call.power {
        Some(power) if is_single_token(power) => result.push_str(&format!(" ({})^{}", core, power)),
        Some(power) => result.push_str(&format!(" ({})^({})", core, power)),
        None        => result.push_str(&format!(" {}", core)),
    }
}

fn is_single_token(power : &str) -> bool {
    let mut chars = power.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphanumeric())
}

/// The exponent after a `^`: `(..)`, `{..}`, `pi` or a single character.
fn scan_power(text : &str, offset : usize) -> Option<(&str, usize)> {
    let start = skip_whitespace(text, offset);
    match text.as_bytes().get(start)? {
        b'(' => {
            let close = matching_paren(text, start)?;
            Some((&text[start + 1 .. close], close + 1))
        },
        b'{' => {
            let close = matching_brace(text, start)?;
            Some((&text[start + 1 .. close], close + 1))
        },
        _ => {
            let end = simple_token(text, start, false)?;
            Some((&text[start .. end], end))
        },
    }
}

/// The argument of a call: `(..)`, `{..}`, a nested call, a command like `\theta`,
/// or a number or letter optionally raised to a power.
fn scan_argument(text : &str, offset : usize) -> Option<(&str, usize)> {
    let start = skip_whitespace(text, offset);
    let end = match text.as_bytes().get(start)? {
        b'(' => return matching_paren(text, start).map(|close| (&text[start + 1 .. close], close + 1)),
        b'{' => return matching_brace(text, start).map(|close| (&text[start + 1 .. close], close + 1)),
        b'\\' => {
            let (command, end) = control_sequence(text, start)?;
            let name = &command[1 ..];
            if let Some(function) = Function::from_name(name) {
                // \sin\cos x
                return parse_call(text, end, function).map(|call| (&text[start .. call.end], call.end));
            }
            if !name.starts_with(|c : char| c.is_ascii_alphabetic()) || matches!(name, "left" | "right") {
                return None;
            }
            end
        },
        _ => simple_token(text, start, true)?,
    };

    match text.as_bytes().get(end) {
        Some(b'^') => {
            let (_, power_end) = scan_power(text, end + 1)?;
            Some((&text[start .. power_end], power_end))
        },
        _ => Some((&text[start .. end], end)),
    }
}

/// End offset of `pi`, a single letter, or a number; with `with_variable`, a number may be followed by one letter (`2x`).
fn simple_token(text : &str, start : usize, with_variable : bool) -> Option<usize> {
    let rest = text.get(start ..)?;
    let first = rest.chars().next()?;

    if first.is_ascii_alphabetic() {
        let word_len = rest.find(|c : char| !c.is_ascii_alphabetic()).unwrap_or(rest.len());
        return Some(start + if &rest[.. word_len] == "pi" { 2 } else { 1 });
    }

    if first.is_ascii_digit() || first == '.' {
        if !with_variable {
            return Some(start + 1);
        }
        let number_len = rest.find(|c : char| !(c.is_ascii_digit() || c == '.')).unwrap_or(rest.len());
        let variable = rest[number_len ..].starts_with(|c : char| c.is_ascii_alphabetic());
        return Some(start + number_len + variable as usize);
    }

    None
}


#[cfg(test)]
mod tests {
    use super::*;

    const TRIGONOMETRIC : &[FunctionKind] = &[FunctionKind::Trigonometric, FunctionKind::Plain];

    #[test]
    fn trigonometric_calls() {
        let tests = [
            (r"\sin x",            " sin(x)"),
            (r"\sin(x)",           " sin(x)"),
            (r"\sin{x+1}",         " sin(x+1)"),
            (r"\sin 2x",           " sin(2x)"),
            (r"\sin x^2",          " sin(x^2)"),
            (r"\sin\theta",        r" sin(\theta)"),
            (r"\sin pi ",          " sin(pi) "),
            (r"\sin^2x",           " (sin(x))^2"),
            (r"\sin^(2)x",         " (sin(x))^2"),
            (r"\sin^2(x)",         " (sin(x))^2"),
            (r"\sin^(n+1)x",       " (sin(x))^(n+1)"),
            (r"\sin^(-1)x",        " asin(x)"),
            (r"\arcsin(x)",        " asin(x)"),
            (r"\sinh^(-1)x",       " (sinh(x))^(-1)"),
            (r"\sin\cos x",        " sin(cos(x))"),
            (r"\sin(\cos(x))",     " sin(cos(x))"),
            (r"\sin\ln x",         r" sin(\ln x)"),
            (r"\sin",              r"\sin"),
            (r"\sin+1",            r"\sin+1"),
            (r"\ln x",             r"\ln x"),
        ];

        for (input, expected) in tests {
            eprintln!("Input: {}", input);
            assert_eq!(rewrite_calls(input, TRIGONOMETRIC), expected);
        }
    }

    #[test]
    fn logarithms() {
        let tests = [
            (r"\ln x",             " log(x)"),
            (r"\log(x)",           " log10(x)"),
            (r"\log_{2}(x)",       " (log(x)/log(2))"),
            (r"\log_2 8",          " (log(8)/log(2))"),
            (r"\ln^2x",            " (log(x))^2"),
            (r"\ln(\ln x)",        " log(log(x))"),
        ];

        for (input, expected) in tests {
            eprintln!("Input: {}", input);
            assert_eq!(rewrite_calls(input, &[FunctionKind::Logarithm]), expected);
        }
    }

    #[test]
    fn exponentials() {
        let tests = [
            (r"\exp(x)",           " exp(x)"),
            ("e^(-2x)",            " exp(-2x)"),
            ("e^x",                " exp(x)"),
            ("e^ pi ",             " exp(pi) "),
            ("x e^(x)",            "x  exp(x)"),
            ("e^(e^(x))",          " exp(exp(x))"),
            ("sec(x)",             "sec(x)"),
            ("x^e",                "x^e"),
            ("e",                  "e"),
        ];

        for (input, expected) in tests {
            eprintln!("Input: {}", input);
            assert_eq!(rewrite_exponentials(input), expected);
        }
    }
}
