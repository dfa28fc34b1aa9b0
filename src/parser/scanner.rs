//! Manual scanning of brace groups, single-token arguments and control sequences
//!
//! Regular expressions can't follow brace nesting, so every pass that needs the
//! argument of `_`, `^` or of a command goes through the functions below.
//! All offsets are byte offsets into the scanned string. Scanning never panics:
//! an offset past the end of the input just means there is nothing left to scan.

use super::nodes::BoundsResult;


/// Returns the offset of the first non-whitespace character at or after `offset`.
pub fn skip_whitespace(text : &str, offset : usize) -> usize {
    match text.get(offset ..) {
        Some(rest) => offset + (rest.len() - rest.trim_start().len()),
        None       => text.len().max(offset),
    }
}

/// Splits off the character at `offset`, returning it along with the offset just past it.
pub fn next_char(text : &str, offset : usize) -> Option<(char, usize)> {
    let character = text.get(offset ..)?.chars().next()?;
    Some((character, offset + character.len_utf8()))
}

/// Attempts scanning a control sequence like `\bla` starting exactly at `offset`, returning `\bla`
/// (backslash included) and the offset past it.
///
/// As in TeX, a backslash followed by a non-letter is a one-character control symbol (`\,`, `\{`, `\|`).
/// A backslash at the very end of the input is returned alone.
pub fn control_sequence(text : &str, offset : usize) -> Option<(&str, usize)> {
    let rest = text.get(offset ..)?;
    let mut chars = rest.chars();
    if chars.next() != Some('\\') {
        return None;
    }

    let start_name = chars.as_str();
    let character = match chars.next() {
        Some(character) => character,
        None            => return Some((rest, text.len())),
    };

    // If the first character is non-alphabetic, that is the command and we return it
    if !character.is_ascii_alphabetic() {
        let end = offset + 1 + character.len_utf8();
        return Some((&text[offset .. end], end));
    }

    let name_len = start_name
        .find(|c : char| !c.is_ascii_alphabetic())
        .unwrap_or(start_name.len());
    let end = offset + 1 + name_len;
    Some((&text[offset .. end], end))
}

/// Given the offset of an opening `{`, returns the offset of its matching `}`.
/// Escaped braces (`\{`, `\}`) don't count. Returns `None` if the input ends first.
pub fn matching_brace(text : &str, open : usize) -> Option<usize> {
    matching_delimiter(text, open, b'{', b'}')
}

/// Given the offset of an opening `(`, returns the offset of its matching `)`.
pub fn matching_paren(text : &str, open : usize) -> Option<usize> {
    matching_delimiter(text, open, b'(', b')')
}

/// Given the offset of an opening `[`, returns the offset of its matching `]`.
pub fn matching_bracket(text : &str, open : usize) -> Option<usize> {
    matching_delimiter(text, open, b'[', b']')
}

/// Trims `text` and removes one pair of parentheses wrapping all of it.
/// `(x+1)(x-1)` is left as is, since its first `(` closes before the end.
pub fn strip_outer_parens(text : &str) -> &str {
    let trimmed = text.trim();
    if trimmed.starts_with('(') && matching_paren(trimmed, 0) == Some(trimmed.len() - 1) {
        trimmed[1 .. trimmed.len() - 1].trim()
    }
    else {
        trimmed
    }
}

fn matching_delimiter(text : &str, open : usize, opening : u8, closing : u8) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&opening) {
        return None;
    }

    // Delimiters are ASCII, so byte-wise scanning never stops inside a multi-byte char
    let mut depth : u32 = 0;
    let mut index = open;
    while index < bytes.len() {
        match bytes[index] {
            b'\\' => {
                index += 2;
                continue;
            }
            b if b == opening => depth += 1,
            b if b == closing => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => (),
        }
        index += 1;
    }
    None
}

/// Scans one argument starting at `offset`, after skipping whitespace:
///  - a brace group `{..}`, whose interior is returned,
///  - a control sequence like `\alpha`, returned whole,
///  - otherwise the single next character.
///
/// Returns the argument and the offset just past it. If the braces are unbalanced
/// or there is nothing left to scan, returns an empty string and `offset` unchanged.
pub fn parse_group(text : &str, offset : usize) -> (&str, usize) {
    let start = skip_whitespace(text, offset);
    let (first_char, after_first) = match next_char(text, start) {
        Some(found) => found,
        None        => return ("", offset),
    };

    if first_char == '{' {
        return match matching_brace(text, start) {
            Some(close) => (&text[after_first .. close], close + 1),
            None        => ("", offset),
        };
    }

    if let Some(command) = control_sequence(text, start) {
        return command;
    }

    (&text[start .. after_first], after_first)
}

/// Scans an optional subscript and an optional superscript, in either order, starting at `offset`.
///
/// `_a^b` and `^b_a` give the same bounds. If a `_` or `^` is found but its argument can't be
/// scanned (unbalanced braces, end of input), the whole scan is abandoned and an empty result
/// at `offset` is returned.
pub fn parse_bounds(text : &str, offset : usize) -> BoundsResult {
    let mut bounds = BoundsResult::empty(offset);
    let mut cursor = offset;

    for _ in 0 .. 2 {
        cursor = skip_whitespace(text, cursor);
        let slot = match text.as_bytes().get(cursor) {
            Some(b'_') if bounds.lower_bound.is_none() => &mut bounds.lower_bound,
            Some(b'^') if bounds.upper_bound.is_none() => &mut bounds.upper_bound,
            _ => break,
        };

        let (value, end) = parse_group(text, cursor + 1);
        if end == cursor + 1 {
            return BoundsResult::empty(offset);
        }
        *slot = Some(value.trim().to_string());
        cursor = end;
        bounds.end_offset = end;
    }

    bounds
}

/// Rewrites every control sequence for which `replacement` returns `Some(..)`; leaves the rest of the text untouched.
///
/// A replacement never lets a control word absorb the letters next to it: `\sin\!x` with `\!` removed is `\sin x`.
pub fn map_control_sequences<F>(text : &str, replacement : F) -> String
where F : Fn(&str) -> Option<&'static str>
{
    let mut result = String::with_capacity(text.len());
    let mut index = 0;
    while let Some((character, after)) = next_char(text, index) {
        if let Some((command, end)) = control_sequence(text, index) {
            match replacement(command) {
                Some(replaced) => push_token(&mut result, replaced, text.get(end ..).unwrap_or("")),
                None           => result.push_str(command),
            }
            index = end;
        }
        else {
            result.push(character);
            index = after;
        }
    }
    result
}

/// Replaces the variable `from` by `to` wherever it appears as a token.
///
/// `from` is either a single letter (`x`) or a control sequence (`\theta`).
/// Letters inside command names are left alone, so substituting `x` keeps `\exp` intact.
pub fn substitute_variable(text : &str, from : &str, to : &str) -> String {
    if from == to || from.is_empty() {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut index = 0;
    while let Some((character, after)) = next_char(text, index) {
        let (token, end) = control_sequence(text, index).unwrap_or((&text[index .. after], after));
        if token == from {
            push_token(&mut result, to, text.get(end ..).unwrap_or(""));
        }
        else if token.len() > 1 {
            result.push_str(token);
        }
        else {
            result.push(character);
        }
        index = end;
    }
    result
}

/// Checks if the variable `name` appears in `text` as a token, not inside a command name.
pub fn contains_variable(text : &str, name : &str) -> bool {
    let mut index = 0;
    while let Some((_, after)) = next_char(text, index) {
        let (token, end) = control_sequence(text, index).unwrap_or((&text[index .. after], after));
        if token == name {
            return true;
        }
        index = end;
    }
    false
}

/// Pushes `token`, separating it with a space wherever gluing would merge it into a neighbouring control word.
fn push_token(result : &mut String, token : &str, following : &str) {
    let starts_with_letter = token.starts_with(|c : char| c.is_ascii_alphabetic());
    if starts_with_letter && ends_with_control_word(result) {
        result.push(' ');
    }
    result.push_str(token);
    if ends_with_control_word(result) && following.starts_with(|c : char| c.is_ascii_alphabetic()) {
        result.push(' ');
    }
}

/// Checks whether `text` ends with a control word like `\sin`, which a following letter would extend.
pub fn ends_with_control_word(text : &str) -> bool {
    let name = text.trim_end_matches(|c : char| c.is_ascii_alphabetic());
    name.len() < text.len() && name.ends_with('\\')
}



#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn scan_control_sequence() {
        let tests = [
            (r"\cal 0",     Some(r"\cal"), " 0"),
            (r"\$ 0",       Some(r"\$"),   " 0"),
            (r"\cal{} 0",   Some(r"\cal"), "{} 0"),
            (r"\c{} 0",     Some(r"\c"),   "{} 0"),
            (r"\",          Some(r"\"),    ""),
            (r"\ +1",       Some(r"\ "),   "+1"),
            (r"\sin2x",     Some(r"\sin"), "2x"),
            (r"_1",         None,          "_1"),
        ];

        for (input, name, remainder) in tests {
            eprintln!("Input: {:?}", input);
            let scanned = control_sequence(input, 0);
            assert_eq!(scanned.map(|(command, _)| command), name);
            let end = scanned.map_or(0, |(_, end)| end);
            assert_eq!(&input[end ..], remainder);
        }
    }

    #[test]
    fn scan_group() {
        let tests = [
            ("{1}",           0, "1",          3),
            ("   {  abc } ",  0, "  abc ",     11),
            ("{}",            0, "",           2),
            ("{fez{fe}}",     0, "fez{fe}",    9),
            (r"{fez\{}",      0, r"fez\{",     7),
            (r"\alpha+1",     0, r"\alpha",    6),
            ("x^2",           2, "2",          3),
            ("x^ {2+y}z",     2, "2+y",        8),
            ("abc",           1, "b",          2),
        ];

        for (input, offset, value, end) in tests {
            eprintln!("Input: {:?} at {}", input, offset);
            assert_eq!(parse_group(input, offset), (value, end));
        }
    }

    #[test]
    fn scan_group_fails_soft() {
        assert_eq!(parse_group("{abc", 0),     ("", 0));
        assert_eq!(parse_group("x^{a{b}", 2),  ("", 2));
        assert_eq!(parse_group("", 0),         ("", 0));
        assert_eq!(parse_group("ab   ", 2),    ("", 2));
        assert_eq!(parse_group("ab", 17),      ("", 17));
    }

    #[test]
    fn strip_redundant_parens() {
        let tests = [
            (" (x+1) ",        "x+1"),
            ("((x))",          "(x)"),
            ("(x+1)(x-1)",     "(x+1)(x-1)"),
            ("(x",             "(x"),
            ("x",              "x"),
            ("",               ""),
        ];

        for (input, expected) in tests {
            eprintln!("Input: {:?}", input);
            assert_eq!(strip_outer_parens(input), expected);
        }
    }

    #[test]
    fn bounds_in_either_order() {
        let lower_first = parse_bounds(r"\int_a^b x dx", 4);
        let upper_first = parse_bounds(r"\int^b_a x dx", 4);

        assert_eq!(lower_first.lower_bound.as_deref(), Some("a"));
        assert_eq!(lower_first.upper_bound.as_deref(), Some("b"));
        assert_eq!(lower_first, upper_first);
        assert_eq!(lower_first.end_offset, 8);
    }

    #[test]
    fn bounds_partial_and_absent() {
        let bounds = parse_bounds(r"\sum_{n=1} n", 4);
        assert_eq!(bounds.lower_bound.as_deref(), Some("n=1"));
        assert_eq!(bounds.upper_bound, None);
        assert_eq!(bounds.end_offset, 10);

        let bounds = parse_bounds(r"\int x dx", 4);
        assert_eq!(bounds, BoundsResult::empty(4));

        // a repeated subscript stops the scan
        let bounds = parse_bounds("_1_2", 0);
        assert_eq!(bounds.lower_bound.as_deref(), Some("1"));
        assert_eq!(bounds.end_offset, 2);
    }

    #[test]
    fn bounds_with_unbalanced_group() {
        assert_eq!(parse_bounds(r"\int_{0^1 x dx", 4), BoundsResult::empty(4));
        assert_eq!(parse_bounds(r"\int_0^", 4),        BoundsResult::empty(4));
        assert_eq!(parse_bounds(r"\int_0^1", 400),     BoundsResult::empty(400));
    }

    #[test]
    fn substitution_skips_command_names() {
        let tests = [
            (r"\exp(x)+x^{2}",     "x",       "t",  r"\exp(t)+t^{2}"),
            (r"\sin\theta\cdot t", r"\theta", "x",  r"\sin x\cdot t"),
            (r"y+1",               "x",       "t",  r"y+1"),
            (r"xx",                "x",       "x",  r"xx"),
        ];

        for (input, from, to, expected) in tests {
            eprintln!("{} [{} := {}]", input, from, to);
            assert_eq!(substitute_variable(input, from, to), expected);
        }
    }

    #[test]
    fn variable_occurrences() {
        assert!(contains_variable(r"x^{2}+1", "x"));
        assert!(contains_variable(r"\sin\theta", r"\theta"));
        assert!(!contains_variable(r"\exp(2)", "x"));
        assert!(!contains_variable(r"\sin\thetax", r"\theta"));
        assert!(!contains_variable("", "x"));
    }

    #[test]
    fn random_input_never_panics() {
        const ALPHABET : &[char] = &['{', '}', '\\', '_', '^', 'a', 'd', 'x', ' ', '|', '(', ')', 'é', '∫'];
        let mut rng = rand::thread_rng();

        for _ in 0 .. 2000 {
            let length = rng.gen_range(0 .. 16);
            let input : String = (0 .. length).map(|_| ALPHABET[rng.gen_range(0 .. ALPHABET.len())]).collect();
            for offset in 0 ..= input.len() + 1 {
                if !input.is_char_boundary(offset.min(input.len())) {
                    continue;
                }
                let (_, end) = parse_group(&input, offset);
                assert!(end >= offset);
                let bounds = parse_bounds(&input, offset);
                assert!(bounds.end_offset >= offset);
            }
        }
    }
}
