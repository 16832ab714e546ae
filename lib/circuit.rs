//! Ordered, append-only gate programs and their wire format.
//!
//! A [`CircuitProgram`] is the artifact handed to the downstream simulation
//! backend: a flat sequence of [`Gate`] entries in application order.
//! Programs can be relocated onto a different qubit window, concatenated
//! while preserving relative order, and serialized one gate per line as
//! `NAME IDX1 IDX2 ...` with a trailing newline on every line.

use std::{
    fmt,
    ops::{ Add, AddAssign },
    str::FromStr,
};
use thiserror::Error;
use crate::gate::Gate;

/// Error produced when ingesting the textual program format.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProgramError {
    /// A gate entry that is not a known name followed by the right number of
    /// qubit indices.
    #[error("malformed gate entry {entry:?}")]
    OperationFormat {
        /// The offending entry, normalized to single spaces.
        entry: String,
    },
    /// A qubit index token that is not a base-10 integer.
    #[error("invalid qubit index {token:?}")]
    IndexType {
        /// The offending token.
        token: String,
    },
}

/// An ordered, append-only sequence of gates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CircuitProgram {
    gates: Vec<Gate>,
}

impl CircuitProgram {
    /// Create a new, empty program.
    pub fn new() -> Self { Self { gates: Vec::new() } }

    /// Append a single gate.
    pub fn push(&mut self, gate: Gate) { self.gates.push(gate); }

    /// Return the number of gate entries.
    pub fn len(&self) -> usize { self.gates.len() }

    /// Return `true` if the program contains no gates.
    pub fn is_empty(&self) -> bool { self.gates.is_empty() }

    /// Return the gate entries in application order.
    pub fn gates(&self) -> &[Gate] { &self.gates }

    /// Return an iterator over the gate entries in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Gate> { self.gates.iter() }

    /// Shift every qubit index of every entry up by `offset`, relocating the
    /// program onto a different qubit window.
    pub fn shift_qubits(&mut self, offset: usize) -> &mut Self {
        self.gates.iter_mut()
            .for_each(|gate| { *gate = gate.shifted(offset); });
        self
    }
}

impl Add for CircuitProgram {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for CircuitProgram {
    fn add_assign(&mut self, rhs: Self) {
        self.gates.extend(rhs.gates);
    }
}

impl Extend<Gate> for CircuitProgram {
    fn extend<I>(&mut self, iter: I)
    where I: IntoIterator<Item = Gate>
    {
        self.gates.extend(iter);
    }
}

impl FromIterator<Gate> for CircuitProgram {
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = Gate>
    {
        Self { gates: iter.into_iter().collect() }
    }
}

impl IntoIterator for CircuitProgram {
    type Item = Gate;
    type IntoIter = <Vec<Gate> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.gates.into_iter() }
}

impl<'a> IntoIterator for &'a CircuitProgram {
    type Item = &'a Gate;
    type IntoIter = <&'a Vec<Gate> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.gates.iter() }
}

impl fmt::Display for CircuitProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.gates.iter()
            .try_for_each(|gate| writeln!(f, "{}", gate))
    }
}

impl FromStr for CircuitProgram {
    type Err = ProgramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.lines()
            .filter(|line| !line.trim().is_empty())
            .map(Gate::from_str)
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn serialization_format() {
        let mut prog = CircuitProgram::new();
        prog.push(Gate::H(1));
        prog.push(Gate::Cnot(1, 3));
        assert_eq!(prog.to_string(), "H 1\nCNOT 1 3\n");
    }

    #[test]
    fn concatenation_preserves_order() {
        let mut first = CircuitProgram::new();
        first.push(Gate::H(1));
        first.push(Gate::Cnot(1, 3));
        let mut second = CircuitProgram::new();
        second.push(Gate::H(1));
        first += second;
        assert_eq!(first.to_string(), "H 1\nCNOT 1 3\nH 1\n");
    }

    #[test]
    fn shift_qubits_moves_every_entry() {
        let mut prog = CircuitProgram::new();
        prog.push(Gate::H(1));
        prog.push(Gate::H(1));
        prog.push(Gate::Cnot(1, 3));
        prog.shift_qubits(1);
        assert_eq!(prog.to_string(), "H 2\nH 2\nCNOT 2 4\n");
    }

    #[test]
    fn shift_qubits_chains() {
        let mut prog = CircuitProgram::new();
        prog.push(Gate::Swap(0, 2));
        prog.shift_qubits(1).shift_qubits(2);
        assert_eq!(prog.gates(), &[Gate::Swap(3, 5)]);
    }

    #[test]
    fn parse_roundtrip() {
        let text = "H 0\nS 1\nSWAP 0 1\nCNOT 1 2\nX 0\nY 1\nZ 2\n";
        let prog: CircuitProgram = text.parse().unwrap();
        assert_eq!(prog.len(), 7);
        assert_eq!(prog.to_string(), text);
    }

    #[test]
    fn parse_rejects_malformed_entries() {
        assert!(matches!(
            "H 0\nT 1\n".parse::<CircuitProgram>(),
            Err(ProgramError::OperationFormat { .. }),
        ));
        assert!(matches!(
            "H zero\n".parse::<CircuitProgram>(),
            Err(ProgramError::IndexType { .. }),
        ));
    }

    #[test]
    fn empty_program_renders_empty() {
        assert_eq!(CircuitProgram::new().to_string(), "");
        assert!(CircuitProgram::new().is_empty());
    }
}
