//! Makes implicit products explicit in the algebra dialect, e.g. `2x` becomes `2*x`

use crate::parser::functions::ALGEBRA_FUNCTION_NAMES;


/// Checks if `text` ends with a function identifier that calls the parenthesis following it,
/// like `sin` in `sin(` or `log10` in `2log10(`.
pub fn ends_with_function_name(text : &str) -> bool {
    let before = text.trim_end_matches(|c : char| c.is_ascii_alphanumeric());
    let identifier = text[before.len() ..].trim_start_matches(|c : char| c.is_ascii_digit());
    ALGEBRA_FUNCTION_NAMES.contains(&identifier)
}

/// Check if a `*` goes between `previous` and `current`, `written` being everything before `current`
fn should_insert_mul(previous : char, current : char, written : &str) -> bool {
    match (previous, current) {
        // x(y), 2(x) but not sin(x)
        (p, '(') if p.is_ascii_alphanumeric() => !ends_with_function_name(written),
        // )x, 2x
        (')', c) if c.is_ascii_alphabetic() => true,
        (p, c) if p.is_ascii_digit() && c.is_ascii_alphabetic() => true,
        // )2, )(
        (')', c) if c.is_ascii_digit() || c == '(' => true,
        _ => false,
    }
}

/// Inserts `*` between tokens that are multiplied by juxtaposition:
///  - before `(` preceded by a letter or digit, unless the identifier before it is a function,
///  - before a letter preceded by `)` or a digit,
///  - after `)` followed by a digit or `(`.
///
/// Doubled `*` are collapsed and a leading `*` is dropped.
pub fn insert_implicit_multiplication(text : &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 2);
    let mut previous = None;

    for current in text.chars() {
        if let Some(previous) = previous {
            if should_insert_mul(previous, current, &result) {
                result.push('*');
            }
        }
        result.push(current);
        previous = Some(current);
    }

    while result.contains("**") {
        result = result.replace("**", "*");
    }
    match result.strip_prefix('*') {
        Some(stripped) => stripped.to_string(),
        None           => result,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_rules() {
        let tests = [
            ("2x",                 "2*x"),
            ("x(x+1)",             "x*(x+1)"),
            ("2(x+1)",             "2*(x+1)"),
            ("(x+1)(x-1)",         "(x+1)*(x-1)"),
            ("(x+1)x",             "(x+1)*x"),
            ("(x+1)2",             "(x+1)*2"),
            ("sin(x)",             "sin(x)"),
            ("2sin(x)",            "2*sin(x)"),
            ("log10(x)",           "log10(x)"),
            ("asin(x)+sqrt(2x)",   "asin(x)+sqrt(2*x)"),
            ("x^(2)",              "x^(2)"),
            ("x*y",                "x*y"),
            ("pi(2)",              "pi*(2)"),
        ];

        for (input, expected) in tests {
            eprintln!("Input: {}", input);
            assert_eq!(insert_implicit_multiplication(input), expected);
        }
    }

    #[test]
    fn doubled_and_leading_signs() {
        assert_eq!(insert_implicit_multiplication("x**y"), "x*y");
        assert_eq!(insert_implicit_multiplication("*x"), "x");
        assert_eq!(insert_implicit_multiplication(""), "");
    }

    #[test]
    fn function_names() {
        assert!(ends_with_function_name("sin"));
        assert!(ends_with_function_name("x+log10"));
        assert!(ends_with_function_name("2sqrt"));
        assert!(!ends_with_function_name("xsin2"));
        assert!(!ends_with_function_name("x"));
        assert!(!ends_with_function_name(""));
        assert!(ends_with_function_name("ésin"));
        assert!(!ends_with_function_name("éx"));
    }

    #[test]
    fn non_ascii_neighbours() {
        let tests = [
            ("éx(1)",     "éx*(1)"),
            ("2·x(3)",    "2·x*(3)"),
            ("π(2)",      "π(2)"),
            ("x·sin(x)",  "x·sin(x)"),
        ];

        for (input, expected) in tests {
            eprintln!("Input: {}", input);
            assert_eq!(insert_implicit_multiplication(input), expected);
        }
    }
}
