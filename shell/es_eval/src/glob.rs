//! Filename expansion.

use es_runtime::{List, ListBuilder, Quote, Term};
use glob::{MatchOptions, Pattern};
use tracing::debug;

const OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Expand every word whose unquoted text carries a wildcard.
///
/// The matches of one word are sorted; a word with no matches is kept as
/// written. `quotes` holds one entry per element of `list`.
pub fn glob(list: List, quotes: &[Quote]) -> List {
    debug_assert_eq!(list.len(), quotes.len());
    if !list
        .iter()
        .zip(quotes)
        .any(|(term, quote)| term.as_str().is_some_and(|s| quote.has_wild(s)))
    {
        return list;
    }

    let mut out = ListBuilder::default();
    for (term, quote) in list.iter().zip(quotes) {
        match term.as_str() {
            Some(text) if quote.has_wild(text) => {
                let mut found = expand(text, quote);
                if found.is_empty() {
                    out.push(term.clone());
                } else {
                    found.sort();
                    for path in found {
                        out.push(Term::from(path));
                    }
                }
            }
            _ => out.push(term.clone()),
        }
    }
    out.finish()
}

/// Rewrite an es word as a `glob` pattern.
///
/// Quoted characters are escaped and a raw `[~` opens a negated class.
fn to_pattern(text: &str, quote: &Quote) -> String {
    let mut pattern = String::with_capacity(text.len());
    let mut class_start = false;
    let mut buf = [0; 4];
    for (i, c) in text.char_indices() {
        if !quote.is_raw(i) {
            pattern.push_str(&Pattern::escape(c.encode_utf8(&mut buf)));
            class_start = false;
            continue;
        }
        if c == '~' && class_start {
            pattern.push('!');
        } else {
            pattern.push(c);
        }
        class_start = c == '[';
    }
    pattern
}

fn expand(text: &str, quote: &Quote) -> Vec<String> {
    let pattern = to_pattern(text, quote);
    let paths = match glob::glob_with(&pattern, OPTIONS) {
        Ok(paths) => paths,
        Err(err) => {
            debug!(word = text, %err, "bad glob pattern");
            return Vec::new();
        }
    };
    // Directories matched by a trailing slash keep it.
    let dirs_only = text.ends_with('/');
    paths
        .filter_map(Result::ok)
        .filter_map(|path| path.into_os_string().into_string().ok())
        .map(|mut path| {
            if dirs_only && !path.ends_with('/') {
                path.push('/');
            }
            path
        })
        .collect()
}
