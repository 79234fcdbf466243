//! The postfix expression compiler.
//!
//! Operands are pushed onto an operand stack; `store` and the operators pop
//! their inputs off it and push the combined command back. The expression
//! ends at the end of input, at a `start`/`stop` keyword, or at a token that
//! plays no expression role, none of which are consumed. A `store` is consumed
//! and then ends the expression, which is what separates the expressions of a
//! body. Exactly one command must be left on the stack when it ends.
//!
//! Commands nest no deeper than [`MAX_NESTING`], so that evaluating them can
//! never exhaust the native stack.

use crate::{lexer::Token, runtime::Command};

use super::{
    primitive::{compile_address, compile_number, compile_operator, compile_read},
    CompileError, CompileErrorKind, CompileResult, Compiled, MAX_NESTING, START, STOP, STORE,
};

/// What a token does inside an expression, judged from its leading characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    /// `start` or `stop`
    Structural,
    Store,
    Number,
    Read,
    Address,
    Operator,
    /// Anything else: ends the expression
    Other,
}

impl Role {
    fn of(token: &Token) -> Self {
        let text = token.value();
        if text == START || text == STOP {
            return Self::Structural;
        }
        if text == STORE {
            return Self::Store;
        }
        match text.chars().next() {
            Some('0'..='9' | '+' | '-') => Self::Number,
            Some('*') => Self::Read,
            Some('.') => Self::Address,
            Some(c) if c.is_ascii_alphabetic() => Self::Operator,
            _ => Self::Other,
        }
    }
}

/// A stacked command and how deeply it nests; a lone operand has depth 1.
#[derive(Debug)]
struct Entry {
    command: Command,
    depth: usize,
}

/// The compile-time operand stack. Popping an empty stack is an error blamed
/// on the token that asked for the operand.
#[derive(Debug, Default)]
struct OperandStack(Vec<Entry>);

impl OperandStack {
    fn push(&mut self, command: Command, depth: usize) {
        self.0.push(Entry { command, depth });
    }

    fn pop(&mut self, wanted_by: &Token) -> Result<Entry, CompileError> {
        self.0
            .pop()
            .ok_or_else(|| CompileError::at(CompileErrorKind::StackUnderflow, wanted_by))
    }

    fn into_inner(self) -> Vec<Command> {
        self.0.into_iter().map(|entry| entry.command).collect()
    }
}

/// Depth of a command built on top of `inputs`, checked against [`MAX_NESTING`].
fn nest(inputs: [&Entry; 2], combined_by: &Token) -> Result<usize, CompileError> {
    let depth = 1 + inputs[0].depth.max(inputs[1].depth);
    if depth > MAX_NESTING {
        return Err(CompileError::at(CompileErrorKind::NestingTooDeep, combined_by));
    }
    Ok(depth)
}

/// Compiles one postfix expression from the front of `tokens`.
pub fn compile_expression(tokens: &[Token]) -> CompileResult<'_, Command> {
    let mut stack = OperandStack::default();
    let mut last_consumed = None;
    let mut remaining = tokens;

    while let Some((token, rest)) = remaining.split_first() {
        let role = Role::of(token);
        let (command, depth) = match role {
            Role::Structural | Role::Other => break,
            Role::Number => (compile_number(token)?, 1),
            Role::Read => (compile_read(token)?, 1),
            Role::Address => (compile_address(token)?, 1),
            Role::Store => {
                let address = stack.pop(token)?;
                let value = stack.pop(token)?;
                let depth = nest([&address, &value], token)?;
                (Command::store(address.command, value.command), depth)
            }
            Role::Operator => {
                let op = compile_operator(token)?;
                let rhs = stack.pop(token)?;
                let lhs = stack.pop(token)?;
                let depth = nest([&lhs, &rhs], token)?;
                (Command::binary(op, lhs.command, rhs.command), depth)
            }
        };
        stack.push(command, depth);
        last_consumed = Some(token);
        remaining = rest;
        if role == Role::Store {
            break;
        }
    }

    let mut operands = stack.into_inner();
    if operands.len() > 1 {
        return Err(CompileError::at_or_synthetic(
            CompileErrorKind::LeftoverOperands(operands.len()),
            last_consumed,
        ));
    }
    match operands.pop() {
        Some(result) => Ok(Compiled { result, remaining }),
        None => Err(CompileError::at_or_synthetic(
            CompileErrorKind::EmptyExpression,
            remaining.first(),
        )),
    }
}

/// Compiles `tokens` as exactly one expression, with nothing left over.
pub fn compile_complete_expression(tokens: &[Token]) -> Result<Command, CompileError> {
    let Compiled { result, remaining } = compile_expression(tokens)?;
    match remaining.first() {
        Some(token) => Err(CompileError::at(CompileErrorKind::UnexpectedToken, token)),
        None => Ok(result),
    }
}
