//! Running a list as a command.
//!
//! The head of the list decides what happens:
//!
//! | head | action |
//! |---|---|
//! | `$&prim` closure | call the primitive with the rest |
//! | `{thunk}` | walk its body in its own binding |
//! | `@ params {body}` | bind the arguments, walk the body, catch `return` |
//! | list closure | expand it in front of the arguments, then dispatch again |
//! | `name` with `fn-name` set | splice the function in, then dispatch again |
//! | `/path`, `./path`, `../path` | run the program |
//! | anything else | ask `%pathsearch`, then run or dispatch its answer |
//!
//! Re-dispatching loops instead of recursing.

use std::rc::Rc;

use es_ir::{Tree, TreeRef};
use es_runtime::errors::{invalid_primitive_name, max_eval_depth, not_executable};
use es_runtime::{
    exit_status, is_true, ltrue, Binding, Closure, EvalError, EvalResult, List, Signal, Term,
};
use es_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use super::control::distribute;
use super::process::{check_executable, is_absolute};
use super::Interpreter;
use crate::EvalFlags;

/// Bind `args` to the parameters of a lambda, in front of `binding`.
///
/// Without parameters the whole argument list becomes `$*`.
pub fn bindargs(
    params: Option<&TreeRef>,
    args: List,
    binding: &Binding,
) -> Result<Binding, EvalError> {
    let Some(params) = params else {
        return Binding::bind("*", args, binding);
    };
    let names = Tree::elements(Some(params)).map(|param| match param.as_word() {
        Some(name) => name,
        None => panic!("lambda parameter is not a word: {param}"),
    });
    let mut result = binding.clone();
    distribute(names, args, |name, value| {
        result = Binding::bind(name, value, &result)?;
        Ok::<_, EvalError>(())
    })?;
    Ok(result)
}

impl Interpreter {
    /// Run `list` as a command.
    ///
    /// With [`EvalFlags::EXIT_ON_FALSE`], a false result becomes
    /// [`Signal::Exit`] with the result's exit status.
    pub fn eval(&mut self, list: List, binding: &Binding, flags: EvalFlags) -> EvalResult {
        self.eval_depth += 1;
        let result = if self.eval_depth >= self.max_eval_depth {
            debug!(depth = self.eval_depth, "max-eval-depth exceeded");
            Err(max_eval_depth(self.eval_depth).into())
        } else {
            ensure_sufficient_stack(|| self.dispatch(list, binding, flags))
        };
        self.eval_depth -= 1;

        let list = result?;
        if flags.contains(EvalFlags::EXIT_ON_FALSE) && !is_true(&list) {
            return Err(Signal::Exit(exit_status(&list)));
        }
        Ok(list)
    }

    fn dispatch(&mut self, mut list: List, binding: &Binding, flags: EvalFlags) -> EvalResult {
        let mut funcname: Option<String> = None;
        loop {
            self.check_interrupt()?;
            let Some(head) = list.first().cloned() else {
                return Ok(ltrue());
            };

            if let Term::Closure(closure) = &head {
                let closure = Rc::clone(closure);
                let args = list.rest();
                match &**closure.tree() {
                    Tree::Prim(name) => {
                        trace!(primitive = %name, "eval");
                        return self.prim(name, args, binding, flags);
                    }
                    Tree::Thunk(body) => {
                        return self.walk(body.as_ref(), &closure.binding(), flags);
                    }
                    Tree::Lambda { params, body } => {
                        return self.call_lambda(
                            &closure,
                            params.as_ref(),
                            body.as_ref(),
                            args,
                            funcname.as_deref(),
                            flags,
                        );
                    }
                    Tree::List { .. } => {
                        let spliced = self.glom(Some(closure.tree()), &closure.binding(), true)?;
                        list = spliced.append(&args);
                        continue;
                    }
                    Tree::Concat(..) => {
                        let mut innermost = closure.tree();
                        while let Tree::Concat(left, _) = &**innermost {
                            innermost = left;
                        }
                        if matches!(**innermost, Tree::Prim(_)) {
                            return Err(invalid_primitive_name(&closure.tree().to_string()).into());
                        }
                        panic!("eval: bad closure node kind {:?}", closure.tree().kind());
                    }
                    other => panic!("eval: bad closure node kind {:?}", other.kind()),
                }
            }

            let name = head.text().into_owned();
            let defn = self.varlookup2("fn-", &name, binding);
            if !defn.is_empty() {
                trace!(function = %name, "eval");
                list = defn.append(&list.rest());
                funcname = Some(name);
                continue;
            }

            if is_absolute(&name) {
                if let Err(reason) = check_executable(&name) {
                    return Err(not_executable(&name, &reason).into());
                }
                if let Some(funcname) = &funcname {
                    list = List::cons(Term::from(funcname.as_str()), list.rest());
                }
                return self.forkexec(&name, &list, flags.contains(EvalFlags::IN_CHILD));
            }

            let found = self.pathsearch(&head)?;
            if found.rest().is_empty() {
                if let Some(Term::Str(path)) = found.first() {
                    return self.forkexec(path, &list, flags.contains(EvalFlags::IN_CHILD));
                }
            }
            if !found.is_empty() {
                funcname = Some(name);
            }
            list = found.append(&list.rest());
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(function = funcname.unwrap_or_default()))]
    fn call_lambda(
        &mut self,
        closure: &Rc<Closure>,
        params: Option<&TreeRef>,
        body: Option<&TreeRef>,
        args: List,
        funcname: Option<&str>,
        flags: EvalFlags,
    ) -> EvalResult {
        let context = bindargs(params, args, &closure.binding())?;
        let result = match funcname {
            Some(name) => {
                let mut scoped = self.scoped_var("0", List::single(name))?;
                scoped.walk(body, &context, flags)
            }
            None => self.walk(body, &context, flags),
        };
        match result {
            Err(Signal::Return(value)) => {
                debug!("return caught");
                Ok(value)
            }
            other => other,
        }
    }
}
