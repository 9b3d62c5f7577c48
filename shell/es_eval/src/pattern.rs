//! Wildcard matching for `~`, `~~` and filename expansion.
//!
//! Patterns understand `*`, `?` and `[...]` classes (`~` negates, `a-z`
//! ranges, a leading `]` is literal). A metacharacter is only special where
//! the pattern's [`Quote`] says the byte was unquoted; everything else
//! matches itself. Matching works on bytes.

use es_runtime::{List, ListBuilder, Quote, Term};

/// Outcome of matching a `[...]` class against one byte.
enum Range {
    /// The class matched; the pattern continues this many bytes later
    /// (closing bracket included).
    Matched(usize),
    Failed,
    /// No closing bracket: the `[` is an ordinary character.
    Malformed,
}

/// A pattern suffix together with its position in the quote mask.
#[derive(Copy, Clone)]
struct Pat<'a> {
    text: &'a [u8],
    quote: &'a Quote,
    offset: usize,
}

impl<'a> Pat<'a> {
    fn new(text: &'a str, quote: &'a Quote) -> Self {
        Pat {
            text: text.as_bytes(),
            quote,
            offset: 0,
        }
    }

    fn raw(&self, i: usize) -> bool {
        self.quote.is_raw(self.offset + i)
    }

    fn at(&self, i: usize) -> Option<u8> {
        self.text.get(i).copied()
    }

    fn tail(&self, i: usize) -> Pat<'a> {
        Pat {
            text: self.text.get(i..).unwrap_or_default(),
            quote: self.quote,
            offset: self.offset + i,
        }
    }

    fn has_wild(&self) -> bool {
        self.text
            .iter()
            .enumerate()
            .any(|(i, b)| matches!(b, b'*' | b'?' | b'[') && self.raw(i))
    }
}

/// Match byte `c` against the class starting just after a `[`.
fn range_match(p: Pat<'_>, c: u8) -> Range {
    let mut i = 0;
    let negated = p.at(0) == Some(b'~') && p.raw(0);
    if negated {
        i += 1;
    }
    let mut matched = false;
    if p.at(i) == Some(b']') && p.raw(i) {
        matched = c == b']';
        i += 1;
    }
    loop {
        let Some(ch) = p.at(i) else {
            return Range::Malformed;
        };
        if ch == b']' && p.raw(i) {
            break;
        }
        // `a-z`, but `[..-]` ends with a literal dash.
        let is_range = p.at(i + 1) == Some(b'-')
            && p.raw(i + 1)
            && (!matches!(p.at(i + 2), Some(b']') | None) || !p.raw(i + 2));
        if is_range {
            let hi = p.at(i + 2).unwrap_or(ch);
            if (ch..=hi).contains(&c) {
                matched = true;
            }
            i += 3;
        } else {
            if ch == c {
                matched = true;
            }
            i += 1;
        }
    }
    if matched != negated {
        Range::Matched(i + 1)
    } else {
        Range::Failed
    }
}

fn match_bytes(s: &[u8], p: Pat<'_>) -> bool {
    let mut s = s;
    let mut i = 0;
    loop {
        let Some(c) = p.at(i) else {
            return s.is_empty();
        };
        i += 1;
        if !p.raw(i - 1) {
            match s.split_first() {
                Some((&b, rest)) if b == c => s = rest,
                _ => return false,
            }
            continue;
        }
        match c {
            b'?' => match s.split_first() {
                Some((_, rest)) => s = rest,
                None => return false,
            },
            b'*' => {
                while p.at(i) == Some(b'*') && p.raw(i) {
                    i += 1;
                }
                if p.at(i).is_none() {
                    return true;
                }
                let rest = p.tail(i);
                return (0..s.len()).any(|k| match_bytes(&s[k..], rest));
            }
            b'[' => {
                let Some((&b, rest)) = s.split_first() else {
                    return false;
                };
                match range_match(p.tail(i), b) {
                    Range::Matched(skip) => i += skip,
                    Range::Failed => return false,
                    Range::Malformed if b != b'[' => return false,
                    Range::Malformed => {}
                }
                s = rest;
            }
            _ => match s.split_first() {
                Some((&b, rest)) if b == c => s = rest,
                _ => return false,
            },
        }
    }
}

/// Whether `subject` matches `pattern`, quoted according to `quote`.
pub fn matches(subject: &str, pattern: &str, quote: &Quote) -> bool {
    if *quote == Quote::Quoted {
        return subject == pattern;
    }
    match_bytes(subject.as_bytes(), Pat::new(pattern, quote))
}

/// Whether any subject matches any pattern.
///
/// An empty subject list matches an empty pattern list, or any pattern
/// made up only of unquoted stars.
pub fn list_match(subjects: &List, patterns: &List, quotes: &[Quote]) -> bool {
    if subjects.is_empty() {
        if patterns.is_empty() {
            return true;
        }
        return patterns.iter().zip(quotes).any(|(pattern, quote)| {
            let text = pattern.text();
            let p = Pat::new(&text, quote);
            !text.is_empty() && (0..text.len()).all(|i| p.at(i) == Some(b'*') && p.raw(i))
        });
    }
    subjects.iter().any(|subject| {
        let subject = subject.text();
        patterns
            .iter()
            .zip(quotes)
            .any(|(pattern, quote)| matches(&subject, &pattern.text(), quote))
    })
}

fn capture(bytes: &[u8]) -> Term {
    Term::from(String::from_utf8_lossy(bytes).into_owned())
}

/// The text consumed by each wildcard of `p` when matching `s`, in order.
///
/// `*` takes the shortest run that still lets the rest match.
fn extract_single(s: &[u8], p: Pat<'_>, out: &mut Vec<Term>) -> bool {
    if !p.has_wild() || !match_bytes(s, p) {
        return false;
    }
    let mut s = s;
    let mut i = 0;
    while let Some(c) = p.at(i) {
        let raw = p.raw(i);
        i += 1;
        if !raw {
            s = s.get(1..).unwrap_or_default();
            continue;
        }
        match c {
            b'*' => {
                if p.at(i).is_none() {
                    out.push(capture(s));
                    return true;
                }
                let rest = p.tail(i);
                let Some(k) = (0..=s.len()).find(|&k| match_bytes(&s[k..], rest)) else {
                    return true;
                };
                out.push(capture(&s[..k]));
                if rest.has_wild() {
                    extract_single(&s[k..], rest, out);
                }
                return true;
            }
            b'[' => {
                let Some(&b) = s.first() else {
                    return true;
                };
                if let Range::Matched(skip) = range_match(p.tail(i), b) {
                    i += skip;
                    out.push(capture(&s[..1]));
                }
                s = &s[1..];
            }
            b'?' => {
                out.push(capture(s.get(..1).unwrap_or_default()));
                s = s.get(1..).unwrap_or_default();
            }
            _ => s = s.get(1..).unwrap_or_default(),
        }
    }
    true
}

/// For each subject, the wildcard captures of the first pattern (with
/// wildcards) that matches it, concatenated in subject order.
pub fn extract_matches(subjects: &List, patterns: &List, quotes: &[Quote]) -> List {
    let mut result = ListBuilder::default();
    for subject in subjects {
        let subject = subject.text();
        for (pattern, quote) in patterns.iter().zip(quotes) {
            let pattern = pattern.text();
            let mut captures = Vec::new();
            if extract_single(subject.as_bytes(), Pat::new(&pattern, quote), &mut captures) {
                for term in captures {
                    result.push(term);
                }
                break;
            }
        }
    }
    result.finish()
}
