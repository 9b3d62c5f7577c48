//! Control-flow primitives.

use es_ir::Tree;
use es_runtime::errors::usage;
use es_runtime::{is_true, lfalse, ltrue, Binding, EvalError, EvalResult, List, Signal};
use tracing::debug;

use crate::interpreter::{bindargs, Interpreter};
use crate::EvalFlags;

/// Flags for an element of a sequence: only the last one may exit on
/// false.
fn step_flags(flags: EvalFlags, last: bool) -> EvalFlags {
    if last {
        flags
    } else {
        flags - EvalFlags::EXIT_ON_FALSE
    }
}

/// `$&seq cmd ...`: run each command, returning the last result.
pub fn seq(interp: &mut Interpreter, args: List, _: &Binding, flags: EvalFlags) -> EvalResult {
    let mut result = ltrue();
    let mut terms = args.iter().peekable();
    while let Some(term) = terms.next() {
        let last = terms.peek().is_none();
        result = interp.eval1(term.clone(), step_flags(flags, last))?;
    }
    Ok(result)
}

/// `$&if cond body [cond body ...] [else]`
pub fn if_(interp: &mut Interpreter, args: List, _: &Binding, flags: EvalFlags) -> EvalResult {
    let mut terms = args.iter();
    while let Some(cond) = terms.next() {
        let Some(body) = terms.next() else {
            // The trailing `else` branch.
            return interp.eval1(cond.clone(), flags);
        };
        let test = interp.eval1(cond.clone(), EvalFlags::empty())?;
        if is_true(&test) {
            return interp.eval1(body.clone(), flags);
        }
    }
    Ok(ltrue())
}

/// `$&not cmd`
pub fn not(interp: &mut Interpreter, args: List, _: &Binding, flags: EvalFlags) -> EvalResult {
    let result = interp.eval(args, &Binding::new(), flags - EvalFlags::EXIT_ON_FALSE)?;
    Ok(if is_true(&result) { lfalse() } else { ltrue() })
}

/// `$&and cmd ...`: stop at the first false result.
pub fn and(interp: &mut Interpreter, args: List, _: &Binding, flags: EvalFlags) -> EvalResult {
    let mut result = ltrue();
    let mut terms = args.iter().peekable();
    while let Some(term) = terms.next() {
        let last = terms.peek().is_none();
        result = interp.eval1(term.clone(), step_flags(flags, last))?;
        if !is_true(&result) {
            break;
        }
    }
    Ok(result)
}

/// `$&or cmd ...`: stop at the first true result.
pub fn or(interp: &mut Interpreter, args: List, _: &Binding, flags: EvalFlags) -> EvalResult {
    let mut result = lfalse();
    let mut terms = args.iter().peekable();
    while let Some(term) = terms.next() {
        let last = terms.peek().is_none();
        result = interp.eval1(term.clone(), step_flags(flags, last))?;
        if is_true(&result) {
            break;
        }
    }
    Ok(result)
}

/// `$&forever cmd`: run until something unwinds.
pub fn forever(interp: &mut Interpreter, args: List, _: &Binding, flags: EvalFlags) -> EvalResult {
    loop {
        interp.eval(args.clone(), &Binding::new(), flags & EvalFlags::EXIT_ON_FALSE)?;
        interp.check_interrupt()?;
    }
}

/// `$&throw exception [args ...]`
pub fn throw(_: &mut Interpreter, args: List, _: &Binding, _: EvalFlags) -> EvalResult {
    if args.is_empty() {
        return Err(usage("throw", "throw exception [args ...]").into());
    }
    Err(Signal::from_list(args))
}

/// `$&catch catcher body`
///
/// Runs `body`; if it raises anything other than an exit request, calls
/// `catcher` with the exception. A catcher that throws `retry` runs the
/// body again.
pub fn catch(interp: &mut Interpreter, args: List, _: &Binding, flags: EvalFlags) -> EvalResult {
    let Some(catcher) = args.first().cloned() else {
        return Err(usage("catch", "catch catcher body").into());
    };
    let body = args.rest();
    loop {
        let signal = match interp.eval(body.clone(), &Binding::new(), flags) {
            Err(Signal::Exit(status)) => return Err(Signal::Exit(status)),
            Err(signal) => signal,
            ok => return ok,
        };
        debug!(exception = %signal.tag(), "caught");
        let handler = List::cons(catcher.clone(), signal.to_list());
        match interp.prim("noreturn", handler, &Binding::new(), flags) {
            Err(retry) if retry.tag() == "retry" => debug!("retry"),
            other => return other,
        }
    }
}

/// `$&return [value ...]`
pub fn return_(_: &mut Interpreter, args: List, _: &Binding, _: EvalFlags) -> EvalResult {
    Err(Signal::Return(args))
}

/// `$&break [value ...]`
pub fn break_(_: &mut Interpreter, args: List, _: &Binding, _: EvalFlags) -> EvalResult {
    Err(Signal::Break(args))
}

/// `$&noreturn lambda args ...`: call a lambda without catching `return`.
pub fn noreturn(interp: &mut Interpreter, args: List, _: &Binding, flags: EvalFlags) -> EvalResult {
    let Some(head) = args.first() else {
        return Err(usage("noreturn", "$&noreturn lambda args ...").into());
    };
    let not_lambda = || EvalError::custom("$&noreturn", format!("$&noreturn: {head} is not a lambda"));
    let Some(lambda) = head.as_closure() else {
        return Err(not_lambda().into());
    };
    let Tree::Lambda { params, body } = &**lambda.tree() else {
        return Err(not_lambda().into());
    };
    let context = bindargs(params.as_ref(), args.rest(), &lambda.binding())?;
    interp.walk(body.as_ref(), &context, flags)
}

/// `$&exec cmd`: run `cmd` in place of the shell.
pub fn exec(interp: &mut Interpreter, args: List, _: &Binding, flags: EvalFlags) -> EvalResult {
    interp.eval(args, &Binding::new(), flags | EvalFlags::IN_CHILD)
}

/// `$&exitonfalse cmd`
pub fn exitonfalse(
    interp: &mut Interpreter,
    args: List,
    _: &Binding,
    flags: EvalFlags,
) -> EvalResult {
    interp.eval(args, &Binding::new(), flags | EvalFlags::EXIT_ON_FALSE)
}
