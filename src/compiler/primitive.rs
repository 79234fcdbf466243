//! Compilers for single tokens: integer literals, sysvar reads (`*.name`),
//! sysvar addresses (`.name`) and operators.
use std::num::IntErrorKind;

use crate::{
    lexer::Token,
    num::{Integer, Operator},
    runtime::Command,
};

use super::{CompileError, CompileErrorKind};

/// Sysvar names look like `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// An optionally signed decimal integer, e.g. `-12`.
pub fn compile_number(token: &Token) -> Result<Command, CompileError> {
    token
        .value()
        .parse::<Integer>()
        .map(Command::Number)
        .map_err(|err| {
            let kind = match err.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    CompileErrorKind::NumberTooBig
                }
                _ => CompileErrorKind::MalformedNumber,
            };
            CompileError::at(kind, token)
        })
}

/// `*.name`: reads the sysvar `name`, or 0 if it was never written.
pub fn compile_read(token: &Token) -> Result<Command, CompileError> {
    token
        .value()
        .strip_prefix("*.")
        .filter(|name| is_identifier(name))
        .map(|name| Command::Read(Box::from(name)))
        .ok_or_else(|| CompileError::at(CompileErrorKind::MalformedSysvar, token))
}

/// `.name`: the name of a sysvar, to be written by `store`.
pub fn compile_address(token: &Token) -> Result<Command, CompileError> {
    token
        .value()
        .strip_prefix('.')
        .filter(|name| is_identifier(name))
        .map(|name| Command::Address(Box::from(name)))
        .ok_or_else(|| CompileError::at(CompileErrorKind::MalformedAddress, token))
}

/// One of `add`, `sub`, `mult` or `div`.
pub fn compile_operator(token: &Token) -> Result<Operator, CompileError> {
    token
        .value()
        .parse()
        .map_err(|_| CompileError::at(CompileErrorKind::UnknownOperator, token))
}
