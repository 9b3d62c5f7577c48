//! Value and lookup primitives.

use es_ir::quote_word;
use es_runtime::errors::{command_not_found, not_executable, usage};
use es_runtime::{ltrue, Binding, EvalError, EvalResult, List, ListBuilder, Term};
use tracing::trace;

use crate::interpreter::{
    check_executable, is_absolute, Interpreter, DEFAULT_MAX_EVAL_DEPTH, MIN_MAX_EVAL_DEPTH,
};
use crate::EvalFlags;

/// `$&result value ...`
pub fn result(_: &mut Interpreter, args: List, _: &Binding, _: EvalFlags) -> EvalResult {
    Ok(args)
}

/// `$&echo [-n] [--] args ...`
pub fn echo(interp: &mut Interpreter, args: List, _: &Binding, _: EvalFlags) -> EvalResult {
    let mut eol = "\n";
    let mut words = args;
    if let Some(first) = words.first() {
        if first.is("-n") {
            eol = "";
            words = words.rest();
        } else if first.is("--") {
            words = words.rest();
        }
    }
    let mut line = words.join(" ");
    line.push_str(eol);
    interp.print_handler().print(&line);
    Ok(ltrue())
}

/// `$&count args ...`: the number of arguments.
pub fn count(_: &mut Interpreter, args: List, _: &Binding, _: EvalFlags) -> EvalResult {
    Ok(List::single(args.len().to_string()))
}

/// `$&flatten separator [args ...]`
pub fn flatten(_: &mut Interpreter, args: List, _: &Binding, _: EvalFlags) -> EvalResult {
    let Some(sep) = args.first() else {
        return Err(usage("flatten", "%flatten separator [args ...]").into());
    };
    Ok(List::single(args.rest().join(&sep.text())))
}

/// Split every word of `words` at any character of `sep`.
///
/// With `coalesce`, runs of separators count as one and empty fields are
/// dropped. An empty separator splits words into characters.
fn split_words(sep: &str, words: &List, coalesce: bool) -> List {
    let mut out = ListBuilder::with_capacity(words.len());
    for word in words {
        let text = word.text();
        if sep.is_empty() {
            for c in text.chars() {
                out.push(Term::from(c.to_string()));
            }
            continue;
        }
        for field in text.split(|c: char| sep.contains(c)) {
            if coalesce && field.is_empty() {
                continue;
            }
            out.push(Term::from(field));
        }
    }
    out.finish()
}

/// `$&split separator [args ...]`
pub fn split(_: &mut Interpreter, args: List, _: &Binding, _: EvalFlags) -> EvalResult {
    let Some(sep) = args.first() else {
        return Err(usage("split", "%split separator [args ...]").into());
    };
    Ok(split_words(&sep.text(), &args.rest(), true))
}

/// `$&fsplit separator [args ...]`: like `split`, keeping empty fields.
pub fn fsplit(_: &mut Interpreter, args: List, _: &Binding, _: EvalFlags) -> EvalResult {
    let Some(sep) = args.first() else {
        return Err(usage("fsplit", "%fsplit separator [args ...]").into());
    };
    Ok(split_words(&sep.text(), &args.rest(), false))
}

/// `$&whatis program`: what running `program` would run.
///
/// Resolution order matches `eval`: closures are themselves, then
/// functions, then absolute paths, then `%pathsearch`.
pub fn whatis(interp: &mut Interpreter, args: List, binding: &Binding, _: EvalFlags) -> EvalResult {
    let (Some(term), true) = (args.first(), args.len() == 1) else {
        return Err(usage("whatis", "$&whatis program").into());
    };
    if term.is_closure() {
        return Ok(args);
    }
    let prog = term.text();
    let defn = interp.varlookup2("fn-", &prog, binding);
    if !defn.is_empty() {
        return Ok(defn);
    }
    if is_absolute(&prog) {
        if let Err(reason) = check_executable(&prog) {
            return Err(not_executable(&prog, &reason).into());
        }
        return Ok(args);
    }
    let term = term.clone();
    interp.pathsearch(&term)
}

/// `$&pathsearch program`: find `program` in the directories of `$path`.
///
/// An empty directory entry stands for the program name itself.
pub fn pathsearch(
    interp: &mut Interpreter,
    args: List,
    binding: &Binding,
    _: EvalFlags,
) -> EvalResult {
    let (Some(term), true) = (args.first(), args.len() == 1) else {
        return Err(usage("pathsearch", "$&pathsearch program").into());
    };
    let name = term.text();
    if is_absolute(&name) {
        if let Err(reason) = check_executable(&name) {
            return Err(not_executable(&name, &reason).into());
        }
        return Ok(args);
    }
    let dirs = interp.varlookup("path", binding)?;
    for dir in &dirs {
        let dir = dir.text();
        let candidate = if dir.is_empty() {
            name.to_string()
        } else if dir.ends_with('/') {
            format!("{dir}{name}")
        } else {
            format!("{dir}/{name}")
        };
        if check_executable(&candidate).is_ok() {
            trace!(program = %name, path = %candidate, "found");
            return Ok(List::single(candidate));
        }
    }
    Err(command_not_found(&name).into())
}

/// `$&setmaxevaldepth [limit]`
///
/// No argument, `0` or the empty string restore the default; smaller
/// positive limits are raised to the minimum.
pub fn setmaxevaldepth(
    interp: &mut Interpreter,
    args: List,
    _: &Binding,
    _: EvalFlags,
) -> EvalResult {
    let Some(limit) = args.first() else {
        interp.set_max_eval_depth(DEFAULT_MAX_EVAL_DEPTH);
        return Ok(List::default());
    };
    if args.len() > 1 {
        return Err(usage("setmaxevaldepth", "$&setmaxevaldepth [limit]").into());
    }
    let text = limit.text();
    let requested = if text.is_empty() {
        0
    } else {
        parse_limit(&text).ok_or_else(|| {
            EvalError::custom(
                "$&setmaxevaldepth",
                "max-eval-depth must be set to a positive integer",
            )
        })?
    };
    let depth = match requested {
        0 => DEFAULT_MAX_EVAL_DEPTH,
        n if n < MIN_MAX_EVAL_DEPTH => MIN_MAX_EVAL_DEPTH,
        n => n,
    };
    interp.set_max_eval_depth(depth);
    Ok(args)
}

/// A non-negative integer with C radix prefixes (`0x` for hex, `0` for octal).
fn parse_limit(text: &str) -> Option<usize> {
    let hex = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"));
    let (digits, radix) = if let Some(hex) = hex {
        (hex, 16)
    } else if text.len() > 1 && text.starts_with('0') {
        (&text[1..], 8)
    } else {
        (text, 10)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    usize::from_str_radix(digits, radix).ok()
}

/// `$&vars`: names of all global variables.
pub fn vars(interp: &mut Interpreter, _: List, _: &Binding, _: EvalFlags) -> EvalResult {
    Ok(interp.global_names().into_iter().map(Term::from).collect())
}

/// `$&var name ...`: one `name = value` line per variable, quoted so it
/// reads back as an assignment.
pub fn var(interp: &mut Interpreter, args: List, _: &Binding, _: EvalFlags) -> EvalResult {
    Ok(args
        .iter()
        .map(|name| {
            let name = name.text();
            let defn = interp.get_global(&name);
            let values: Vec<String> = defn
                .iter()
                .map(|term| match term {
                    Term::Str(s) => quote_word(s),
                    Term::Closure(_) => term.to_string(),
                })
                .collect();
            Term::from(format!("{} = {}", quote_word(&name), values.join(" ")))
        })
        .collect())
}
