//! Completeness test for shell-style command text.

#[derive(Clone, Copy, PartialEq)]
enum Quote {
    Single,
    Double,
}

/// Whether `text` can be run as it is: quotes closed, brackets balanced,
/// no dangling pipe or `&&`/`||`.
///
/// Unmatched closing brackets count as complete so that the shell gets to
/// report the error.
pub fn is_balanced(text: &str) -> bool {
    let mut quote: Option<Quote> = None;
    let mut open: Vec<char> = Vec::new();
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(Quote::Single), '\'') => quote = None,
            (Some(Quote::Single), _) => {}
            (_, '\\') => {
                if chars.next().is_none() {
                    return false;
                }
            }
            (Some(Quote::Double), '"') => quote = None,
            (Some(Quote::Double), _) => {}
            (None, '\'') => quote = Some(Quote::Single),
            (None, '"') => quote = Some(Quote::Double),
            (None, '(' | '{' | '[') => open.push(c),
            (None, ')' | '}' | ']') => {
                if open.last() == Some(&opening(c)) {
                    open.pop();
                }
            }
            (None, '#') if starts_word(text, chars.as_str(), c) => skip_comment(&mut chars),
            _ => {}
        }
    }

    quote.is_none() && open.is_empty() && !ends_with_operator(text)
}

fn opening(close: char) -> char {
    match close {
        ')' => '(',
        '}' => '{',
        _ => '[',
    }
}

// `#` only starts a comment at the beginning of a word
fn starts_word(text: &str, rest: &str, c: char) -> bool {
    let consumed = text.len() - rest.len() - c.len_utf8();
    text[..consumed]
        .chars()
        .next_back()
        .map_or(true, char::is_whitespace)
}

fn skip_comment(chars: &mut std::str::Chars<'_>) {
    for c in chars.by_ref() {
        if c == '\n' {
            break;
        }
    }
}

fn ends_with_operator(text: &str) -> bool {
    let trimmed = text.trim_end();
    trimmed.ends_with('|') || trimmed.ends_with("&&")
}
