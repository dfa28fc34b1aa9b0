//! Rewrites every spelling of the absolute value into `\left| .. \right|`
//!
//! First the named spellings (`\operatorname{abs}(x)`, `\abs{x}`, ...) and the bar commands
//! (`\left\vert`, `\bigl|`, `\rvert`, ...) are rewritten. Then the remaining bare `|` are
//! paired left to right. A bar with no partner is kept as is.

use std::sync::LazyLock;

use regex::Regex;

use super::scanner::{
    control_sequence, map_control_sequences, matching_brace, matching_paren, next_char,
    parse_group, skip_whitespace, strip_outer_parens,
};


/// Opening bar of the canonical form
pub const OPEN_BAR  : &str = r"\left|";
/// Closing bar of the canonical form
pub const CLOSE_BAR : &str = r"\right|";

static OPEN_BAR_COMMAND : LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(?:left|[bB]igg?l)\s*(?:\\l?vert|\|)\s*").expect("valid regex literal")
});
static CLOSE_BAR_COMMAND : LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\\(?:right|[bB]igg?r)\s*(?:\\r?vert|\|)").expect("valid regex literal")
});
static SIZED_BAR : LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\[bB]igg?\s*(?:\\vert|\|)").expect("valid regex literal")
});


/// Rewrites all absolute values of `text` into the canonical `\left| .. \right|` form.
///
/// Total and idempotent: the canonical form is recognized and left untouched.
pub fn rewrite_abs(text : &str) -> String {
    let named = rewrite_named(text);
    let commands = rewrite_bar_commands(&named);
    let paired = pair_bare_bars(&commands);

    if paired != text {
        trace!("absolute values : {:?} -> {:?}", text, paired);
    }
    paired
}

/// `\operatorname{abs}`, `\mathrm{abs}`, `\abs` or a bare `abs`, applied to `(..)`, `{..}` or `{(..)}`.
fn rewrite_named(text : &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut index = 0;

    while let Some((character, after)) = next_char(text, index) {
        let (token, end) = match control_sequence(text, index) {
            Some(command) => command,
            None if character.is_ascii_alphabetic() => {
                let rest = &text[index ..];
                let word_len = rest.find(|c : char| !c.is_ascii_alphabetic()).unwrap_or(rest.len());
                (&rest[.. word_len], index + word_len)
            },
            None => (&text[index .. after], after),
        };

        let head_end = match token {
            r"\abs" | "abs" => Some(end),
            r"\operatorname" | r"\mathrm" => match parse_group(text, end) {
                (name, group_end) if group_end > end && name.trim() == "abs" => Some(group_end),
                _ => None,
            },
            _ => None,
        };

        match head_end.and_then(|head_end| abs_argument(text, head_end)) {
            Some((argument, argument_end)) => {
                result.push_str(OPEN_BAR);
                result.push_str(rewrite_named(argument).trim());
                result.push_str(CLOSE_BAR);
                index = argument_end;
            },
            None => {
                result.push_str(token);
                index = end;
            },
        }
    }
    result
}

/// The argument of a named absolute value: `(..)`, `{..}` or `{(..)}`.
fn abs_argument(text : &str, offset : usize) -> Option<(&str, usize)> {
    let start = skip_whitespace(text, offset);
    match text.as_bytes().get(start) {
        Some(b'(') => {
            let close = matching_paren(text, start)?;
            Some((&text[start + 1 .. close], close + 1))
        },
        Some(b'{') => {
            let close = matching_brace(text, start)?;
            Some((strip_outer_parens(&text[start + 1 .. close]), close + 1))
        },
        _ => None,
    }
}

fn rewrite_bar_commands(text : &str) -> String {
    let text = OPEN_BAR_COMMAND.replace_all(text, OPEN_BAR);
    let text = CLOSE_BAR_COMMAND.replace_all(&text, CLOSE_BAR);
    let text = SIZED_BAR.replace_all(&text, "|");
    let text = map_control_sequences(&text, |command| match command {
        r"\lvert" => Some(OPEN_BAR),
        r"\rvert" => Some(CLOSE_BAR),
        r"\vert"  => Some("|"),
        _ => None,
    });

    // `\lvert x` just became `\left| x`
    let text = OPEN_BAR_COMMAND.replace_all(&text, OPEN_BAR);
    CLOSE_BAR_COMMAND.replace_all(&text, CLOSE_BAR).into_owned()
}

/// Pairs the bars that are not part of `\left|`, `\right|`, `\middle|` or `\|`.
fn pair_bare_bars(text : &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut index = 0;

    while let Some(bar) = next_bare_bar(text, index) {
        result.push_str(&text[index .. bar]);

        // `|_{x=3}` evaluates at a point, it never opens an absolute value
        let opens_evaluation = text[bar + 1 ..].trim_start().starts_with('_');
        let closing = if opens_evaluation { None } else { next_bare_bar(text, bar + 1) };

        match closing {
            Some(close) => {
                result.push_str(OPEN_BAR);
                result.push_str(text[bar + 1 .. close].trim());
                result.push_str(CLOSE_BAR);
                index = close + 1;
            },
            None => {
                result.push('|');
                index = bar + 1;
            },
        }
    }

    result.push_str(&text[index ..]);
    result
}

fn next_bare_bar(text : &str, from : usize) -> Option<usize> {
    let mut index = from;
    while let Some((character, after)) = next_char(text, index) {
        if let Some((command, end)) = control_sequence(text, index) {
            index = end;
            let sized = matches!(command, r"\left" | r"\right" | r"\middle");
            if sized && text.as_bytes().get(end) == Some(&b'|') {
                index += 1;
            }
            continue;
        }

        if character == '|' {
            return Some(index);
        }
        index = after;
    }
    None
}
