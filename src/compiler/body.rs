//! Bodies: `start` expression* `stop`.
use crate::{lexer::Token, runtime::Command};

use super::{
    expression::compile_expression, CompileError, CompileErrorKind, CompileResult, Compiled,
    START, STOP,
};

/// Compiles one body from the front of `tokens` into a [`Command::Sequence`].
///
/// A body that does not open with `start` is blamed on the synthetic empty
/// token (line 1), whatever the first token actually was. A body that runs
/// out of tokens before `stop` is blamed on the last token it consumed.
pub fn compile_body(tokens: &[Token]) -> CompileResult<'_, Command> {
    let Some((start, mut remaining)) = tokens.split_first().filter(|(first, _)| first.is(START))
    else {
        return Err(CompileError::synthetic(CompileErrorKind::MissingStart));
    };

    let mut last_consumed = start;
    let mut commands = vec![];
    loop {
        match remaining.split_first() {
            None => return Err(CompileError::at(CompileErrorKind::MissingStop, last_consumed)),
            Some((stop, rest)) if stop.is(STOP) => {
                return Ok(Compiled {
                    result: Command::Sequence(commands.into_boxed_slice()),
                    remaining: rest,
                });
            }
            Some(_) => {
                let Compiled { result, remaining: rest } = compile_expression(remaining)?;
                // A successful expression always consumes at least one token
                last_consumed = &remaining[remaining.len() - rest.len() - 1];
                commands.push(result);
                remaining = rest;
            }
        }
    }
}
