//! A genome is a run of bodies, one after another.
use crate::{lexer::Token, runtime::Genome};

use super::{body::compile_body, CompileError, Compiled};

/// Compiles bodies until `tokens` is exhausted. No tokens is an empty genome.
pub fn compile_genome(tokens: &[Token]) -> Result<Genome, CompileError> {
    let mut bodies = vec![];
    let mut remaining = tokens;
    while !remaining.is_empty() {
        let Compiled { result, remaining: rest } = compile_body(remaining)?;
        bodies.push(result);
        remaining = rest;
    }
    Ok(Genome::new(bodies))
}

#[cfg(test)]
mod tests {
    use super::compile_genome;
    use crate::{compiler::CompileErrorKind, lexer::tokenize, sysvars::Sysvars};
    use assert2::{check, let_assert};

    #[test]
    fn empty_genome() {
        let_assert!(Ok(genome) = compile_genome(&[]));
        check!(genome.is_empty());
        let_assert!(Ok(genome) = compile_genome(&tokenize("\n  \n")));
        check!(genome.is_empty());
    }

    #[test]
    fn bodies_run_in_order() {
        let source = "start 2 .a store stop\nstart *.a 5 mult .a store stop";
        let_assert!(Ok(genome) = compile_genome(&tokenize(source)));
        check!(genome.bodies().len() == 2);
        let mut sysvars = Sysvars::new();
        genome.run(&mut sysvars);
        check!(sysvars.get("a") == 10);
    }

    #[test]
    fn trailing_garbage_is_a_missing_start() {
        let_assert!(Err(error) = compile_genome(&tokenize("start stop\n1 .a store")));
        check!(error.kind == CompileErrorKind::MissingStart);
        check!(error.line == 1);
    }

    #[test]
    fn second_body_missing_stop() {
        let source = "start 1 .a store stop\nstart\n2 .b store";
        let_assert!(Err(error) = compile_genome(&tokenize(source)));
        check!(error.kind == CompileErrorKind::MissingStop);
        check!(error.payload.value() == "store");
        check!(error.line == 3);
    }

    #[test]
    fn display_recompiles_to_same_genome() {
        let source = "start 10 .up store 3 *.up mult .down store stop start 1 .dx store stop";
        let_assert!(Ok(genome) = compile_genome(&tokenize(source)));
        let_assert!(Ok(again) = compile_genome(&tokenize(&genome.to_string())));
        check!(genome == again);
    }
}
