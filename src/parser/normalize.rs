//! Lexical normalization: rewrites cosmetic markup variants into one canonical spelling
//!
//! Each pass is a total function from text to text. The passes run in a fixed order,
//! later ones relying on the output of earlier ones (e.g. `\log_5` only gets its base braced
//! once the spacing commands around it are gone).

use std::sync::LazyLock;

use regex::Regex;

use super::functions::BARE_FUNCTION_NAMES;
use super::scanner::{control_sequence, map_control_sequences, next_char};


static TEXT_DIFFERENTIAL : LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(?:mathrm|text|operatorname)\s*\{\s*d\s*\}").expect("valid regex literal")
});
static LOG_BASE : LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*_\s*(\\[a-zA-Z]+|[^{}\s\\^_])").expect("valid regex literal")
});
static SIZED_OPEN_PAREN : LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\\(?:left|[bB]igg?l?)\s*)+\(").expect("valid regex literal")
});
static SIZED_CLOSE_PAREN : LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\\(?:right|[bB]igg?r?)\s*)+\)").expect("valid regex literal")
});


type Pass = fn(&str) -> String;

const PASSES : &[(&str, Pass)] = &[
    ("spacing",        strip_spacing),
    ("differential",   collapse_differentials),
    ("fraction",       inline_fractions),
    ("log base",       brace_log_base),
    ("parentheses",    plain_parentheses),
    ("function names", escape_function_names),
];

/// Rewrites raw markup into canonical markup.
///
/// Total: markup none of the passes recognize comes back unchanged, and an empty input
/// gives an empty output. Normalizing twice gives the same result as normalizing once.
pub fn normalize(raw : &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut text = raw.to_string();
    for (name, pass) in PASSES {
        let rewritten = pass(&text);
        if rewritten != text {
            trace!("normalize, {} : {:?} -> {:?}", name, text, rewritten);
            text = rewritten;
        }
    }
    text
}

pub(super) fn strip_spacing(text : &str) -> String {
    map_control_sequences(text, |command| match command {
        r"\," | r"\:" | r"\;" | r"\ " | r"\quad" | r"\qquad" => Some(" "),
        r"\!" | r"\limits" | r"\nolimits"                     => Some(""),
        _ => None,
    })
}

fn collapse_differentials(text : &str) -> String {
    let text = map_control_sequences(text, |command| match command {
        r"\differentialD" => Some("d"),
        _ => None,
    });
    let text = text.replace('ⅆ', "d");
    TEXT_DIFFERENTIAL.replace_all(&text, "d").into_owned()
}

fn inline_fractions(text : &str) -> String {
    map_control_sequences(text, |command| match command {
        r"\dfrac" => Some(r"\frac"),
        _ => None,
    })
}

/// `\log_5` and a bare `log_5` get their base braced, `\log_{5}`. `catalog_5` is left alone.
fn brace_log_base(text : &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut index = 0;
    while let Some((character, after)) = next_char(text, index) {
        let (token, end) = match control_sequence(text, index) {
            Some(command) => command,
            None if character.is_ascii_alphabetic() => letter_run(text, index),
            None => (&text[index .. after], after),
        };
        result.push_str(token);
        index = end;

        if token != r"\log" && token != "log" {
            continue;
        }
        if let Some(base) = LOG_BASE.captures(&text[index ..]) {
            result.push_str("_{");
            result.push_str(&base[1]);
            result.push('}');
            index += base[0].len();
        }
    }
    result
}

/// The maximal run of ASCII letters starting at `offset`, and the offset past it.
fn letter_run(text : &str, offset : usize) -> (&str, usize) {
    let rest = &text[offset ..];
    let word_len = rest.find(|c : char| !c.is_ascii_alphabetic()).unwrap_or(rest.len());
    (&rest[.. word_len], offset + word_len)
}

/// `\left(`, `\bigl(`, `\Big)`, ... become bare parentheses.
pub(crate) fn plain_parentheses(text : &str) -> String {
    let text = SIZED_OPEN_PAREN.replace_all(text, "(");
    SIZED_CLOSE_PAREN.replace_all(&text, ")").into_owned()
}

/// Escape-marks every maximal run of ASCII letters that spells a bare function name.
/// Command names are skipped whole, so `\sin` and `\arcsin` are left alone.
fn escape_function_names(text : &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut index = 0;
    while let Some((character, after)) = next_char(text, index) {
        if let Some((command, end)) = control_sequence(text, index) {
            result.push_str(command);
            index = end;
            continue;
        }

        if !character.is_ascii_alphabetic() {
            result.push(character);
            index = after;
            continue;
        }

        let (word, end) = letter_run(text, index);
        if BARE_FUNCTION_NAMES.contains(&word) {
            result.push('\\');
        }
        result.push_str(word);
        index = end;
    }
    result
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rules() {
        let tests = [
            (r"x\,dx",                         r"x dx"),
            (r"\sum\limits_{n=1}^{5}n",        r"\sum_{n=1}^{5}n"),
            (r"x\!+\quad 1",                   r"x+  1"),
            (r"\sin\!x",                        r"\sin x"),
            (r"\int\!\!\int x",                 r"\int\int x"),
            (r"\int x\mathrm{d}x",             r"\int xdx"),
            (r"\int x\operatorname{ d }x",     r"\int xdx"),
            (r"\int x \text{d}x",              r"\int x dx"),
            (r"\int xⅆx",                      r"\int xdx"),
            (r"\int x\differentialD x",        r"\int xd x"),
            (r"\dfrac{1}{x}",                  r"\frac{1}{x}"),
            (r"\log_5(x)",                     r"\log_{5}(x)"),
            (r"\log _ \pi x",                  r"\log_{\pi} x"),
            (r"\log_{10}x",                    r"\log_{10}x"),
            (r"log_5 x",                       r"\log_{5} x"),
            (r"2log_2(x)",                     r"2\log_{2}(x)"),
            (r"catalog_5",                     r"catalog_5"),
            (r"\left\left(x\right\right)",     r"(x)"),
            (r"\left(x+1\right)^{2}",          r"(x+1)^{2}"),
            (r"\bigl( x \bigr)",               r"( x )"),
            (r"\left[x\right]",                r"\left[x\right]"),
            (r"\left|x\right|",                r"\left|x\right|"),
            (r"sin(x)+\cos(x)",                r"\sin(x)+\cos(x)"),
            (r"2ln x",                         r"2\ln x"),
            (r"sinh(x)+arcsin(x)+\arcsin(x)",  r"sinh(x)+arcsin(x)+\arcsin(x)"),
            (r"x^{2}",                         r"x^{2}"),
        ];

        for (input, expected) in tests {
            eprintln!("Input: {}", input);
            assert_eq!(normalize(input), expected);
        }
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn unparseable_markup_passes_through() {
        for input in [r"{{{", r"\", r"}\left", "é∫x"] {
            assert_eq!(normalize(input), input);
        }
    }

    #[test]
    fn idempotent() {
        let inputs = [
            r"\dfrac{d}{dx}sin(x)\,",
            r"\int_0^1 \left( x^2 \right) \mathrm{d}x",
            r"\log_5 x + ln(x)",
            r"\sum\limits_{n=1}^{10} \frac{1}{n}",
            r"|x-1| + exp(2)",
            r"log_5 x",
            r"\left\left(x\right)",
            r"\sin\!x + \cos\!\!y",
        ];
        for input in inputs {
            let once = normalize(input);
            eprintln!("{} -> {}", input, once);
            assert_eq!(normalize(&once), once);
        }
    }
}
