//! Control signals and evaluation errors.
//!
//! Every non-local exit out of the evaluator is a [`Signal`]. `return`,
//! `break` and `eof` are control flow and are consumed by the construct
//! that owns them; everything else travels up to the nearest `catch`.
//!
//! # Structured errors
//!
//! [`EvalErrorKind`] carries the data of each failure condition so callers
//! can match on it (max-eval-depth in particular must be told apart from
//! ordinary script failures). The factory functions at the bottom of this
//! module are the intended way to build errors; they fill in the context
//! tag es scripts see as the second word of an `error` exception.

use std::borrow::Cow;

use thiserror::Error;

use crate::{List, ListBuilder, Term};

/// Result of anything that may unwind.
pub type EvalResult<T = List> = Result<T, Signal>;

/// Typed failure category.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    // Variables
    #[error("null variable name")]
    NullVariableName,
    #[error("zero-length variable name")]
    ZeroLengthVariableName,
    #[error("invalid character in variable name: {name}")]
    InvalidVariableName { name: String },

    // Expansion
    #[error("bad subscript: {subscript}")]
    BadSubscript { subscript: String },
    #[error("null variable name in subscript")]
    NullSubscriptVariable,
    #[error("multi-word variable name in subscript")]
    MultiWordSubscriptVariable,

    // Dispatch
    #[error("{program}: fn %pathsearch undefined")]
    PathsearchUndefined { program: String },
    #[error("{program} not found")]
    CommandNotFound { program: String },
    #[error("{path}: {reason}")]
    NotExecutable { path: String, reason: String },
    #[error("invalid primitive name: {name}")]
    InvalidPrimitiveName { name: String },
    #[error("unknown primitive: {name}")]
    UnknownPrimitive { name: String },
    #[error("max-eval-depth exceeded")]
    MaxEvalDepth { depth: usize },

    // Closure literals
    #[error("improper use of $&nestedbinding")]
    ImproperNestedBinding,
    #[error("bad count in $&nestedbinding: {count}")]
    BadNestedBindingCount { count: i64 },
    #[error("bad unquoted primitive in %closure: $&{name}")]
    BadClosurePrimitive { name: String },
    #[error("null body in %closure")]
    NullClosureBody,

    // Primitives
    #[error("usage: {usage}")]
    Usage { usage: String },

    /// Errors raised by scripts with `throw error ...`.
    #[error("{message}")]
    Custom { message: String },
}

/// An `error` exception: context tag plus message.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{context}: {message}")]
pub struct EvalError {
    /// The failing construct, e.g. `es:assign` or `$&whatis`.
    pub context: String,
    pub kind: EvalErrorKind,
    /// Equals `kind.to_string()` for factory-built errors.
    pub message: String,
    /// The exception list this error was thrown as, kept verbatim so a
    /// rethrow hands the next catcher the same words.
    pub thrown: Option<List>,
}

impl EvalError {
    pub fn new(context: impl Into<String>, kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            context: context.into(),
            kind,
            message,
            thrown: None,
        }
    }

    /// An error with a free-form message.
    pub fn custom(context: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        EvalError {
            context: context.into(),
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            thrown: None,
        }
    }

    pub fn is_max_eval_depth(&self) -> bool {
        matches!(self.kind, EvalErrorKind::MaxEvalDepth { .. })
    }
}

/// A non-local exit.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Signal {
    #[error("return outside of function")]
    Return(List),
    #[error("break outside of loop")]
    Break(List),
    #[error("eof")]
    Eof,
    #[error(transparent)]
    Error(#[from] EvalError),
    #[error("uncaught exception: {0}")]
    Throw(List),
    /// Terminate the shell with a status. Never caught by `catch`.
    #[error("exit {0}")]
    Exit(i32),
}

impl Signal {
    /// The exception's first word.
    pub fn tag(&self) -> Cow<'_, str> {
        match self {
            Signal::Return(_) => Cow::Borrowed("return"),
            Signal::Break(_) => Cow::Borrowed("break"),
            Signal::Eof => Cow::Borrowed("eof"),
            Signal::Error(_) => Cow::Borrowed("error"),
            Signal::Exit(_) => Cow::Borrowed("exit"),
            Signal::Throw(list) => list.first().map_or(Cow::Borrowed(""), Term::text),
        }
    }

    /// The exception as the list a `catch` handler receives.
    pub fn to_list(&self) -> List {
        let tagged = |tag: &str, rest: &List| List::cons(Term::from(tag), rest.clone());
        match self {
            Signal::Return(value) => tagged("return", value),
            Signal::Break(value) => tagged("break", value),
            Signal::Eof => List::single("eof"),
            Signal::Error(EvalError {
                thrown: Some(list),
                ..
            }) => list.clone(),
            Signal::Error(err) => {
                let mut b = ListBuilder::with_capacity(3);
                b.push(Term::from("error"));
                b.push(Term::str(err.context.as_str()));
                b.push(Term::str(err.message.as_str()));
                b.finish()
            }
            Signal::Throw(list) => list.clone(),
            Signal::Exit(status) => List::from_strs(&["exit", &status.to_string()]),
        }
    }

    /// Rebuild a signal from an exception list, as `throw` does.
    pub fn from_list(list: List) -> Signal {
        let rest = list.rest();
        match list.first().and_then(Term::as_str) {
            Some("return") => Signal::Return(rest),
            Some("break") => Signal::Break(rest),
            Some("eof") if rest.is_empty() => Signal::Eof,
            Some("error") => {
                let context = rest.first().map(|t| t.text().into_owned()).unwrap_or_default();
                let mut err = EvalError::custom(context, rest.rest().join(" "));
                err.thrown = Some(list);
                Signal::Error(err)
            }
            _ => Signal::Throw(list),
        }
    }

    pub fn is_max_eval_depth(&self) -> bool {
        matches!(self, Signal::Error(e) if e.is_max_eval_depth())
    }
}

// Factory functions

pub fn null_variable_name(context: &str) -> EvalError {
    EvalError::new(context, EvalErrorKind::NullVariableName)
}

pub fn zero_length_variable_name() -> EvalError {
    EvalError::new("es:var", EvalErrorKind::ZeroLengthVariableName)
}

pub fn invalid_variable_name(name: &str) -> EvalError {
    EvalError::new(
        "es:var",
        EvalErrorKind::InvalidVariableName {
            name: name.to_string(),
        },
    )
}

pub fn bad_subscript(subscript: &str) -> EvalError {
    EvalError::new(
        "es:subscript",
        EvalErrorKind::BadSubscript {
            subscript: subscript.to_string(),
        },
    )
}

pub fn null_subscript_variable() -> EvalError {
    EvalError::new("es:glom", EvalErrorKind::NullSubscriptVariable)
}

pub fn multi_word_subscript_variable() -> EvalError {
    EvalError::new("es:glom", EvalErrorKind::MultiWordSubscriptVariable)
}

pub fn pathsearch_undefined(program: &str) -> EvalError {
    EvalError::new(
        "es:pathsearch",
        EvalErrorKind::PathsearchUndefined {
            program: program.to_string(),
        },
    )
}

pub fn command_not_found(program: &str) -> EvalError {
    EvalError::new(
        "$&pathsearch",
        EvalErrorKind::CommandNotFound {
            program: program.to_string(),
        },
    )
}

pub fn not_executable(path: &str, reason: &str) -> EvalError {
    EvalError::new(
        "$&whatis",
        EvalErrorKind::NotExecutable {
            path: path.to_string(),
            reason: reason.to_string(),
        },
    )
}

pub fn invalid_primitive_name(name: &str) -> EvalError {
    EvalError::new(
        "es:eval",
        EvalErrorKind::InvalidPrimitiveName {
            name: name.to_string(),
        },
    )
}

pub fn unknown_primitive(name: &str) -> EvalError {
    EvalError::new(
        "es:prim",
        EvalErrorKind::UnknownPrimitive {
            name: name.to_string(),
        },
    )
}

pub fn max_eval_depth(depth: usize) -> EvalError {
    EvalError::new("es:eval", EvalErrorKind::MaxEvalDepth { depth })
}

pub fn improper_nested_binding() -> EvalError {
    EvalError::new("$&parse", EvalErrorKind::ImproperNestedBinding)
}

pub fn bad_nested_binding_count(count: i64) -> EvalError {
    EvalError::new("$&parse", EvalErrorKind::BadNestedBindingCount { count })
}

pub fn bad_closure_primitive(name: &str) -> EvalError {
    EvalError::new(
        "$&parse",
        EvalErrorKind::BadClosurePrimitive {
            name: name.to_string(),
        },
    )
}

pub fn null_closure_body() -> EvalError {
    EvalError::new("$&parse", EvalErrorKind::NullClosureBody)
}

/// Wrong arguments to primitive `prim`.
pub fn usage(prim: &str, usage: &str) -> EvalError {
    EvalError::new(
        format!("$&{prim}"),
        EvalErrorKind::Usage {
            usage: usage.to_string(),
        },
    )
}

/// The exception raised when an interrupt is noticed.
pub fn interrupted() -> Signal {
    Signal::Throw(List::from_strs(&["signal", "sigint"]))
}
