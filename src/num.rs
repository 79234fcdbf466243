//! Operands and the arithmetic policy shared by every operator.
//!
//! Operands may be absent (an empty slot, which reads as 0), integers, or raw
//! text. Text that does not read as an integer becomes the not-a-number
//! sentinel, which is allowed to flow through an operation and is only zeroed
//! once the operation finishes.

use core::{fmt, str::FromStr};

use arbitrary::Arbitrary;

pub type Integer = i64;

#[derive(Debug, Clone, PartialEq, Eq, Default, Arbitrary)]
pub enum Operand {
    #[default]
    Absent,
    Number(Integer),
    Text(Box<str>),
}

impl Operand {
    /// Numeric conversion of this operand. `None` is the not-a-number sentinel.
    pub fn coerce(&self) -> Option<Integer> {
        match self {
            Self::Absent => Some(0),
            Self::Number(n) => Some(*n),
            Self::Text(text) => match text.trim() {
                "" => Some(0),
                trimmed => trimmed.parse().ok(),
            },
        }
    }

    /// Coerces, then zeroes the not-a-number sentinel.
    pub fn finish(&self) -> Integer {
        self.coerce().unwrap_or(0)
    }
}

impl From<Integer> for Operand {
    fn from(value: Integer) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Self::Text(Box::from(value))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => Ok(()),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Arbitrary)]
pub enum Operator {
    Add,
    Sub,
    Mult,
    Div,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
#[error("unknown operator: {0}")]
pub struct UnknownOperator(pub Box<str>);

impl Operator {
    pub const ALL: [Operator; 4] = [Self::Add, Self::Sub, Self::Mult, Self::Div];

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mult => "mult",
            Self::Div => "div",
        }
    }

    /// Applies this operator to two operands. Never fails: absent operands
    /// read as 0, division by zero yields 0, and a not-a-number (or
    /// overflowing) result yields 0.
    pub fn apply(self, a: &Operand, b: &Operand) -> Integer {
        let (a, b) = (a.coerce(), b.coerce());
        if self == Self::Div && b == Some(0) {
            return 0;
        }

        a.zip(b)
            .and_then(|(a, b)| match self {
                Self::Add => a.checked_add(b),
                Self::Sub => a.checked_sub(b),
                Self::Mult => a.checked_mul(b),
                Self::Div => ceil_div(a, b),
            })
            .unwrap_or(0)
    }
}

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.keyword() == s)
            .ok_or_else(|| UnknownOperator(Box::from(s)))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// Division rounding toward positive infinity. `divisor` must be nonzero.
fn ceil_div(dividend: Integer, divisor: Integer) -> Option<Integer> {
    let quotient = dividend.checked_div(divisor)?;
    let remainder = dividend.checked_rem(divisor)?;
    if remainder != 0 && (remainder > 0) == (divisor > 0) {
        quotient.checked_add(1)
    } else {
        Some(quotient)
    }
}

#[cfg(test)]
mod tests {
    use super::{Operand, Operator};
    use arbtest::arbtest;
    use assert2::{check, let_assert};

    fn table(op: Operator, rows: &[(Operand, Operand, i64)]) {
        for (a, b, expected) in rows {
            let got = op.apply(a, b);
            check!(got == *expected, "{op}({a:?}, {b:?})");
        }
    }

    #[test]
    fn add() {
        use Operand::Absent;
        table(
            Operator::Add,
            &[
                (100.into(), 1.into(), 101),
                (Absent, 10.into(), 10),
                (10.into(), Absent, 10),
                ("10".into(), "aoeu".into(), 0),
            ],
        );
    }

    #[test]
    fn sub() {
        use Operand::Absent;
        table(
            Operator::Sub,
            &[
                (100.into(), 1.into(), 99),
                (Absent, 10.into(), -10),
                (10.into(), Absent, 10),
                ("10".into(), "aoeu".into(), 0),
            ],
        );
    }

    #[test]
    fn mult() {
        use Operand::Absent;
        table(
            Operator::Mult,
            &[
                (100.into(), 1.into(), 100),
                (Absent, 10.into(), 0),
                (10.into(), Absent, 0),
                ("10".into(), "aoeu".into(), 0),
            ],
        );
    }

    #[test]
    fn div() {
        use Operand::Absent;
        table(
            Operator::Div,
            &[
                (100.into(), 1.into(), 100),
                (100.into(), 2.into(), 50),
                (3.into(), 5.into(), 1),
                (Absent, 10.into(), 0),
                (10.into(), Absent, 0),
                ("10".into(), "aoeu".into(), 0),
            ],
        );
    }

    #[test]
    fn div_rounds_up() {
        check!(Operator::Div.apply(&7.into(), &2.into()) == 4);
        check!(Operator::Div.apply(&(-7).into(), &2.into()) == -3);
        check!(Operator::Div.apply(&7.into(), &(-2).into()) == -3);
        check!(Operator::Div.apply(&(-7).into(), &(-2).into()) == 4);
        check!(Operator::Div.apply(&"9".into(), &"3".into()) == 3);
    }

    #[test]
    fn numeric_text_takes_part() {
        check!(Operator::Add.apply(&" 12 ".into(), &3.into()) == 15);
        check!(Operator::Mult.apply(&"".into(), &3.into()) == 0);
        check!(Operator::Sub.apply(&"nrg".into(), &3.into()) == 0);
    }

    #[test]
    fn overflow_is_zeroed() {
        check!(Operator::Add.apply(&i64::MAX.into(), &1.into()) == 0);
        check!(Operator::Mult.apply(&i64::MIN.into(), &(-1).into()) == 0);
        check!(Operator::Div.apply(&i64::MIN.into(), &(-1).into()) == 0);
    }

    #[test]
    fn keywords() {
        for op in Operator::ALL {
            let_assert!(Ok(parsed) = op.keyword().parse::<Operator>());
            check!(parsed == op);
        }
        check!("ADD".parse::<Operator>().is_err());
        check!("store".parse::<Operator>().is_err());
    }

    #[test]
    fn absent_is_additive_identity() {
        arbtest(|u| {
            let x: i64 = u.arbitrary()?;
            check!(Operator::Add.apply(&Operand::Absent, &x.into()) == x);
            check!(Operator::Add.apply(&x.into(), &Operand::Absent) == x);
            check!(Operator::Sub.apply(&x.into(), &Operand::Absent) == x);
            check!(Operator::Div.apply(&x.into(), &Operand::Absent) == 0);
            Ok(())
        });
    }

    #[test]
    fn ceil_div_matches_float_ceiling() {
        arbtest(|u| {
            let a = i64::from(u.arbitrary::<i32>()?);
            let b = i64::from(u.arbitrary::<i32>()?);
            let got = Operator::Div.apply(&a.into(), &b.into());
            if b == 0 {
                check!(got == 0);
            } else {
                let expected = (a as f64 / b as f64).ceil() as i64;
                check!(got == expected, "{a} div {b}");
            }
            Ok(())
        });
    }

    #[test]
    fn never_panics() {
        arbtest(|u| {
            let op: Operator = u.arbitrary()?;
            let a: Operand = u.arbitrary()?;
            let b: Operand = u.arbitrary()?;
            _ = op.apply(&a, &b);
            Ok(())
        });
    }
}
