pub mod compiler;
pub mod lexer;
pub mod num;
pub mod runtime;
pub mod sysvars;

pub use compiler::{CompileError, CompileErrorKind, CompileResult, Compiled};
pub use lexer::{tokenize, Token};
pub use num::{Integer, Operand, Operator};
pub use runtime::{Command, Genome};
pub use sysvars::Sysvars;

/// Tokenizes and compiles a whole genome.
pub fn compile(source: &str) -> Result<Genome, CompileError> {
    compiler::compile_genome(&tokenize(source))
}
