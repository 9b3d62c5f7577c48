//! Rendering trees back to es source.
//!
//! Closures are converted to strings through this when they are used as
//! words, so the output must read back to an equivalent tree.

use std::fmt::{self, Write};

use crate::{Tree, TreeRef};

const SPECIAL: &[char] = &[
    ' ', '\t', '\n', '#', ';', '&', '|', '^', '$', '=', '`', '\'', '{', '}', '(', ')', '<', '>',
    '\\', '~', '@',
];

/// Whether `s` must be quoted to read back as the same single word.
pub fn needs_quotes(s: &str) -> bool {
    s.is_empty() || s.chars().any(|c| SPECIAL.contains(&c) || c.is_control())
}

/// Quote `s` with single quotes when required, doubling embedded quotes.
pub fn quote_word(s: &str) -> String {
    if needs_quotes(s) {
        force_quote(s)
    } else {
        s.to_string()
    }
}

fn force_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

fn write_opt(f: &mut fmt::Formatter<'_>, tree: Option<&TreeRef>) -> fmt::Result {
    match tree {
        Some(t) => write!(f, "{t}"),
        None => Ok(()),
    }
}

/// Write a definitions list, `;` separated.
fn write_defs(f: &mut fmt::Formatter<'_>, defs: Option<&TreeRef>) -> fmt::Result {
    f.write_char('(')?;
    for (i, def) in Tree::elements(defs).enumerate() {
        if i > 0 {
            f.write_char(';')?;
        }
        write!(f, "{def}")?;
    }
    f.write_char(')')
}

/// Write an operand of `^` or `$`, parenthesizing lists.
fn write_operand(f: &mut fmt::Formatter<'_>, tree: &TreeRef) -> fmt::Result {
    if matches!(**tree, Tree::List { .. }) {
        write!(f, "({tree})")
    } else {
        write!(f, "{tree}")
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tree::Word(s) => f.write_str(s),
            Tree::Qword(s) => {
                if needs_quotes(s) || s.contains(['*', '?', '[']) {
                    f.write_str(&force_quote(s))
                } else {
                    f.write_str(s)
                }
            }
            Tree::Prim(name) => write!(f, "$&{name}"),
            Tree::Call(body) => match &**body {
                Tree::Thunk(inner) => {
                    f.write_str("<={")?;
                    write_opt(f, inner.as_ref())?;
                    f.write_char('}')
                }
                _ => write!(f, "<={body}"),
            },
            Tree::Thunk(body) => {
                f.write_char('{')?;
                write_opt(f, body.as_ref())?;
                f.write_char('}')
            }
            Tree::Lambda { params, body } => {
                f.write_char('@')?;
                for param in Tree::elements(params.as_ref()) {
                    write!(f, " {param}")?;
                }
                f.write_str(" {")?;
                write_opt(f, body.as_ref())?;
                f.write_char('}')
            }
            Tree::Var(name) => {
                f.write_char('$')?;
                write_operand(f, name)
            }
            Tree::Varsub { name, subscript } => {
                f.write_char('$')?;
                write_operand(f, name)?;
                write!(f, "({subscript})")
            }
            Tree::Concat(left, right) => {
                write_operand(f, left)?;
                f.write_char('^')?;
                write_operand(f, right)
            }
            Tree::List { car, cdr } => {
                write_operand(f, car)?;
                for item in Tree::elements(cdr.as_ref()) {
                    f.write_char(' ')?;
                    write_operand(f, item)?;
                }
                Ok(())
            }
            Tree::Assign { lhs, rhs } => {
                write_operand(f, lhs)?;
                f.write_char('=')?;
                write_opt(f, rhs.as_ref())
            }
            Tree::Let { defs, body } => {
                f.write_str("let")?;
                write_defs(f, defs.as_ref())?;
                write_opt(f, body.as_ref())
            }
            Tree::Local { defs, body } => {
                f.write_str("local")?;
                write_defs(f, defs.as_ref())?;
                write_opt(f, body.as_ref())
            }
            Tree::For { defs, body } => {
                f.write_str("for")?;
                write_defs(f, defs.as_ref())?;
                write_opt(f, body.as_ref())
            }
            Tree::Closure { defs, body } => {
                f.write_str("%closure")?;
                write_defs(f, defs.as_ref())?;
                write_opt(f, body.as_ref())
            }
            Tree::Match { subject, pattern } => {
                f.write_str("~")?;
                for part in [subject, pattern].into_iter().flatten() {
                    write!(f, " {part}")?;
                }
                Ok(())
            }
            Tree::Extract { subject, pattern } => {
                f.write_str("~~")?;
                for part in [subject, pattern].into_iter().flatten() {
                    write!(f, " {part}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests;
