//! Compiled genome code, and the tree-walking evaluator that runs it against
//! a [`Sysvars`] store.
//!
//! Compilation never produces closures: every compiled expression is a plain
//! [`Command`] tree, so what the compiler produced can be inspected (and
//! printed back as postfix source via `Display`) independently of running it.

use core::fmt;

use crate::{
    num::{Integer, Operand, Operator},
    sysvars::Sysvars,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// An integer literal, e.g. `42`
    Number(Integer),
    /// Reads a sysvar, e.g. `*.nrg`
    Read(Box<str>),
    /// Names a sysvar without touching the store, e.g. `.nrg`
    Address(Box<str>),
    /// Writes the value of `value` into the sysvar named by `address`
    Store {
        address: Box<Command>,
        value: Box<Command>,
    },
    BinaryOp {
        op: Operator,
        lhs: Box<Command>,
        rhs: Box<Command>,
    },
    /// Runs each command in order, yielding the last one's value
    Sequence(Box<[Command]>),
}

impl Command {
    pub fn store(address: Command, value: Command) -> Self {
        Self::Store {
            address: Box::new(address),
            value: Box::new(value),
        }
    }

    pub fn binary(op: Operator, lhs: Command, rhs: Command) -> Self {
        Self::BinaryOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Evaluates this command. Only [`Command::Store`] modifies `sysvars`.
    pub fn eval(&self, sysvars: &mut Sysvars) -> Operand {
        match self {
            Self::Number(n) => Operand::Number(*n),
            Self::Read(name) => Operand::Number(sysvars.get(name)),
            Self::Address(name) => Operand::Text(name.clone()),
            Self::Store { address, value } => {
                let name = address.eval(sysvars).to_string();
                let value = value.eval(sysvars).finish();
                sysvars.set(name, value);
                Operand::Number(value)
            }
            Self::BinaryOp { op, lhs, rhs } => {
                let lhs = lhs.eval(sysvars);
                let rhs = rhs.eval(sysvars);
                Operand::Number(op.apply(&lhs, &rhs))
            }
            Self::Sequence(commands) => {
                let mut last = Operand::Number(0);
                for command in commands.iter() {
                    last = command.eval(sysvars);
                }
                last
            }
        }
    }

    /// Evaluates this command down to an integer.
    pub fn run(&self, sysvars: &mut Sysvars) -> Integer {
        self.eval(sysvars).finish()
    }
}

/// Renders the command as the postfix source it compiles from.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Read(name) => write!(f, "*.{name}"),
            Self::Address(name) => write!(f, ".{name}"),
            Self::Store { address, value } => write!(f, "{value} {address} store"),
            Self::BinaryOp { op, lhs, rhs } => write!(f, "{lhs} {rhs} {op}"),
            Self::Sequence(commands) => {
                write!(f, "start")?;
                for command in commands.iter() {
                    write!(f, " {command}")?;
                }
                write!(f, " stop")
            }
        }
    }
}

/// A whole genome: its bodies, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Genome {
    bodies: Vec<Command>,
}

impl Genome {
    pub fn new(bodies: Vec<Command>) -> Self {
        Self { bodies }
    }

    pub fn bodies(&self) -> &[Command] {
        &self.bodies
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Runs every body once, in order, against the same store.
    pub fn run(&self, sysvars: &mut Sysvars) {
        for body in &self.bodies {
            body.run(sysvars);
        }
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for body in &self.bodies {
            writeln!(f, "{body}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, Genome};
    use crate::{
        num::{Operand, Operator},
        sysvars::Sysvars,
    };
    use assert2::{check, let_assert};

    fn address(name: &str) -> Command {
        Command::Address(Box::from(name))
    }

    fn read(name: &str) -> Command {
        Command::Read(Box::from(name))
    }

    #[test]
    fn reads_default_to_zero() {
        let mut sysvars = Sysvars::new();
        check!(read("nrg").run(&mut sysvars) == 0);
        sysvars.set("nrg", 1000);
        check!(read("nrg").run(&mut sysvars) == 1000);
    }

    #[test]
    fn address_names_itself() {
        let mut sysvars = Sysvars::new();
        let_assert!(Operand::Text(name) = address("nrg").eval(&mut sysvars));
        check!(&*name == "nrg");
        check!(sysvars.is_empty());
    }

    #[test]
    fn store_writes_and_yields_value() {
        let mut sysvars = Sysvars::new();
        let command = Command::store(address("up"), Command::Number(10));
        check!(command.run(&mut sysvars) == 10);
        check!(sysvars.get("up") == 10);
    }

    #[test]
    fn storing_text_stores_zero() {
        let mut sysvars = Sysvars::new();
        let command = Command::store(address("up"), address("down"));
        check!(command.run(&mut sysvars) == 0);
        check!(sysvars.contains("up"));
        check!(sysvars.get("up") == 0);
    }

    #[test]
    fn binary_op_with_address_operand() {
        let mut sysvars = Sysvars::new();
        let command = Command::binary(Operator::Add, Command::Number(5), address("up"));
        check!(command.run(&mut sysvars) == 0);
    }

    #[test]
    fn sequence_shares_store() {
        let mut sysvars = Sysvars::new();
        let body = Command::Sequence(Box::new([
            Command::store(address("up"), Command::Number(10)),
            Command::store(
                address("down"),
                Command::binary(Operator::Mult, Command::Number(3), read("up")),
            ),
        ]));
        check!(body.run(&mut sysvars) == 30);
        check!(sysvars.get("up") == 10);
        check!(sysvars.get("down") == 30);
    }

    #[test]
    fn empty_sequence_is_zero() {
        let mut sysvars = Sysvars::new();
        check!(Command::Sequence(Box::default()).run(&mut sysvars) == 0);
    }

    #[test]
    fn display_as_postfix() {
        let body = Command::Sequence(Box::new([
            Command::store(
                address("down"),
                Command::binary(Operator::Sub, read("up"), Command::Number(-2)),
            ),
            Command::Number(7),
        ]));
        check!(body.to_string() == "start *.up -2 sub .down store 7 stop");
        check!(Command::Sequence(Box::default()).to_string() == "start stop");
    }

    #[test]
    fn genome_runs_bodies_in_order() {
        let genome = Genome::new(vec![
            Command::Sequence(Box::new([Command::store(
                address("a"),
                Command::binary(Operator::Add, read("a"), Command::Number(1)),
            )])),
            Command::Sequence(Box::new([Command::store(
                address("b"),
                Command::binary(Operator::Mult, read("a"), Command::Number(5)),
            )])),
        ]);
        let mut sysvars = Sysvars::new();
        genome.run(&mut sysvars);
        check!(sysvars.get("a") == 1);
        check!(sysvars.get("b") == 5);
        genome.run(&mut sysvars);
        check!(sysvars.get("a") == 2);
        check!(sysvars.get("b") == 10);
    }
}
