//! Gate-level building blocks for recorded Clifford circuits.
//!
//! [`Gate`] is the alphabet of operations a [`Tableau`][crate::tableau::Tableau]
//! records while it mutates: the Clifford-group generators H, S, and CNOT,
//! plus SWAP and the Pauli gates emitted by the synthesizer. Each gate
//! renders to and parses from the one-line wire format `NAME IDX1 [IDX2]`
//! consumed by the simulation backend.

use std::{ fmt, str::FromStr };
use itertools::Itertools;
use crate::circuit::ProgramError;

/// A single recordable gate, tagged with the qubit indices it acts on.
///
/// The identity is deliberately absent: it is never recorded into a program,
/// so a program can only ever contain the gates listed here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Hadamard
    H(usize),
    /// π/2 rotation about Z
    S(usize),
    /// π rotation about X
    X(usize),
    /// π rotation about Y
    Y(usize),
    /// π rotation about Z
    Z(usize),
    /// Swap of two qubits
    Swap(usize, usize),
    /// Controlled π rotation about X.
    ///
    /// The first qubit index is the control.
    Cnot(usize, usize),
}

impl Gate {
    /// Return the symbolic name used in the wire format.
    pub fn name(&self) -> &'static str {
        match self {
            Self::H(..) => "H",
            Self::S(..) => "S",
            Self::X(..) => "X",
            Self::Y(..) => "Y",
            Self::Z(..) => "Z",
            Self::Swap(..) => "SWAP",
            Self::Cnot(..) => "CNOT",
        }
    }

    /// Return the qubit indices the gate acts on, in order.
    ///
    /// The list is never empty.
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            Self::H(q)
            | Self::S(q)
            | Self::X(q)
            | Self::Y(q)
            | Self::Z(q)
            => vec![q],
            Self::Swap(a, b) | Self::Cnot(a, b) => vec![a, b],
        }
    }

    /// Return `true` if `self` acts on two qubits.
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, Self::Swap(..) | Self::Cnot(..))
    }

    /// Relocate the gate onto the qubit window starting `offset` indices up.
    pub fn shifted(self, offset: usize) -> Self {
        match self {
            Self::H(q) => Self::H(q + offset),
            Self::S(q) => Self::S(q + offset),
            Self::X(q) => Self::X(q + offset),
            Self::Y(q) => Self::Y(q + offset),
            Self::Z(q) => Self::Z(q + offset),
            Self::Swap(a, b) => Self::Swap(a + offset, b + offset),
            Self::Cnot(a, b) => Self::Cnot(a + offset, b + offset),
        }
    }

    /// Build a gate from a symbolic name and an index list, as read from the
    /// wire format.
    ///
    /// Fails with [`ProgramError::OperationFormat`] if the name is unknown or
    /// the number of indices does not match the gate.
    pub fn from_parts(name: &str, qubits: &[usize])
        -> Result<Self, ProgramError>
    {
        match (name, qubits) {
            ("H", &[q]) => Ok(Self::H(q)),
            ("S", &[q]) => Ok(Self::S(q)),
            ("X", &[q]) => Ok(Self::X(q)),
            ("Y", &[q]) => Ok(Self::Y(q)),
            ("Z", &[q]) => Ok(Self::Z(q)),
            ("SWAP", &[a, b]) => Ok(Self::Swap(a, b)),
            ("CNOT", &[a, b]) => Ok(Self::Cnot(a, b)),
            _ => Err(ProgramError::OperationFormat {
                entry: format!("{} {}", name, qubits.iter().join(" ")),
            }),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        self.qubits().iter()
            .try_for_each(|q| write!(f, " {}", q))
    }
}

impl FromStr for Gate {
    type Err = ProgramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let name
            = tokens.next()
            .ok_or_else(|| ProgramError::OperationFormat {
                entry: s.to_string(),
            })?;
        let qubits: Vec<usize>
            = tokens
            .map(|tok| {
                tok.parse::<usize>()
                    .map_err(|_| ProgramError::IndexType {
                        token: tok.to_string(),
                    })
            })
            .collect::<Result<_, _>>()?;
        Self::from_parts(name, &qubits)
    }
}

/// A single-qubit Pauli operator, tracked up to global sign.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pauli {
    /// Identity
    I,
    /// σ<sub>*x*</sub>
    X,
    /// σ<sub>*y*</sub>
    Y,
    /// σ<sub>*z*</sub>
    Z,
}

impl Pauli {
    /// Decode from the X/Z bit pair of a tableau entry.
    pub fn from_xz(x: bool, z: bool) -> Self {
        match (x, z) {
            (false, false) => Self::I,
            (true,  false) => Self::X,
            (true,  true ) => Self::Y,
            (false, true ) => Self::Z,
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
