//! The flat store of system variables a genome reads and writes.
use core::fmt;
use std::collections::HashMap;

use crate::num::Integer;

/// Maps sysvar names to integers. Reading a name that was never written
/// yields 0, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sysvars {
    values: HashMap<Box<str>, Integer>,
}

impl Sysvars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: impl AsRef<str>) -> Integer {
        self.values.get(name.as_ref()).copied().unwrap_or(0)
    }

    /// Whether `name` has ever been written, as opposed to reading as 0.
    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.values.contains_key(name.as_ref())
    }

    /// Creates or overwrites `name`, returning the previous value if any.
    pub fn set(&mut self, name: impl AsRef<str>, value: Integer) -> Option<Integer> {
        self.values.insert(Box::from(name.as_ref()), value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Written sysvars, sorted by name.
    pub fn sorted(&self) -> Vec<(&str, Integer)> {
        let mut entries = self
            .values
            .iter()
            .map(|(name, value)| (name.as_ref(), *value))
            .collect::<Vec<_>>();
        entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }
}

impl<S: AsRef<str>> FromIterator<(S, Integer)> for Sysvars {
    fn from_iter<T: IntoIterator<Item = (S, Integer)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (Box::from(name.as_ref()), value))
                .collect(),
        }
    }
}

/// One `name = value` line per written sysvar, sorted by name.
impl fmt::Display for Sysvars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.sorted() {
            writeln!(f, "{name} = {value}")?;
        }
        Ok(())
    }
}
