//! Compile genome tokens into [`Command`](crate::Command) trees.
//!
//! Genomes are postfix: operands come before the operator that consumes them,
//! and bodies are delimited by `start`/`stop`. For example
//!
//! start
//!   10 .up store
//!   3 *.up mult .down store
//! stop
//!
//! compiles to
//!
//! Sequence
//!   Store .up <- 10
//!   Store .down <- (Mult 3 (Read up))
//!
//! Every compiler takes a token slice, consumes a prefix of it, and hands back
//! what it built along with the tokens it did not consume. Failure is a
//! [`CompileError`] naming the token to blame; nothing is ever half-compiled.

pub mod body;
pub mod expression;
pub mod genome;
pub mod primitive;

pub use body::compile_body;
pub use expression::{compile_complete_expression, compile_expression};
pub use genome::compile_genome;

use crate::lexer::Token;

pub const START: &str = "start";
pub const STOP: &str = "stop";
pub const STORE: &str = "store";

/// Deepest a compiled expression may nest. Deeper chains are rejected with
/// [`CompileErrorKind::NestingTooDeep`].
pub const MAX_NESTING: usize = 256;

/// A successful compile: the result, and the tokens left after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled<'t, T> {
    pub result: T,
    pub remaining: &'t [Token],
}

pub type CompileResult<'t, T> = Result<Compiled<'t, T>, CompileError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at line {line}: `{payload}`")]
pub struct CompileError {
    pub kind: CompileErrorKind,
    pub line: usize,
    /// The token blamed for the failure
    pub payload: Token,
}

impl CompileError {
    pub(crate) fn at(kind: CompileErrorKind, token: &Token) -> Self {
        Self {
            kind,
            line: token.line(),
            payload: token.clone(),
        }
    }

    /// Blames the synthetic empty token on line 1.
    pub(crate) fn synthetic(kind: CompileErrorKind) -> Self {
        Self::at(kind, &Token::default())
    }

    pub(crate) fn at_or_synthetic(kind: CompileErrorKind, token: Option<&Token>) -> Self {
        match token {
            Some(token) => Self::at(kind, token),
            None => Self::synthetic(kind),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompileErrorKind {
    #[error("malformed number")]
    MalformedNumber,
    #[error("number literal too big")]
    NumberTooBig,
    #[error("malformed sysvar read")]
    MalformedSysvar,
    #[error("malformed sysvar address")]
    MalformedAddress,
    #[error("unknown operator")]
    UnknownOperator,
    #[error("not enough operands")]
    StackUnderflow,
    #[error("expression leaves {0} values behind")]
    LeftoverOperands(usize),
    #[error("expression nests too deeply")]
    NestingTooDeep,
    #[error("empty expression")]
    EmptyExpression,
    #[error("unexpected token after expression")]
    UnexpectedToken,
    #[error("body must begin with `start`")]
    MissingStart,
    #[error("body is missing `stop`")]
    MissingStop,
}
