//! Unsigned Pauli-operator tableaus in the binary symplectic representation.
//!
//! A set of *n*-qubit Pauli operators (tensor products of the single-qubit
//! Paulis, including the identity) is stored as a pair of binary matrices of
//! identical shape: one row per tracked operator, one column per qubit. The
//! X-part and Z-part bits of the (*i*, *j*)-th entries together encode the
//! Pauli acting on qubit *j* of operator *i*:
//!
//! | X bit | Z bit | Pauli |
//! | :---: | :---: | :---: |
//! | 0     | 0     | *I*   |
//! | 1     | 0     | *X*   |
//! | 1     | 1     | *Y*   |
//! | 0     | 1     | *Z*   |
//!
//! No phase information is tracked — the tableau is "unsigned", identifying
//! each operator only up to a global sign. Conjugation by the Clifford-group
//! generators then reduces to column-wise GF(2) operations on the two
//! matrices, and whether two operators commute is the parity of the
//! symplectic product of their rows.
//!
//! Every gate applied to a [`Tableau`] is simultaneously recorded into an
//! attached [`CircuitProgram`], which is how the synthesizer in
//! [`synth`][crate::synth] accumulates the circuit that realizes a sampled
//! Clifford operator.

use std::{
    fmt,
    ops::{ Add, Mul, Range },
};
use itertools::Itertools;
use nalgebra as na;
use rand::Rng;
use thiserror::Error;
use crate::{
    circuit::CircuitProgram,
    gate::{ Gate, Pauli },
};

/// Error produced when constructing or combining tableaus.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum TableauError {
    /// The X and Z inputs do not form two rectangular matrices of equal
    /// shape.
    #[error("incompatible X/Z shapes")]
    ShapeMismatch,
    /// A matrix entry outside {0, 1}.
    #[error("matrix entries must be 0 or 1, found {found}")]
    ValueDomain {
        /// The offending entry.
        found: u8,
    },
}

/// A set of unsigned Pauli operators over a fixed number of qubits, with an
/// attached record of every gate applied to it.
///
/// Equality compares only the X/Z matrices; the recorded program is ignored.
#[derive(Clone, Debug)]
pub struct Tableau {
    xs: na::DMatrix<bool>,
    zs: na::DMatrix<bool>,
    program: CircuitProgram,
}

impl PartialEq for Tableau {
    fn eq(&self, other: &Self) -> bool {
        self.xs == other.xs && self.zs == other.zs
    }
}

impl Eq for Tableau { }

impl Tableau {
    /// Create a new tableau from its X-part and Z-part matrices, with an
    /// empty program.
    ///
    /// Fails if the matrices disagree in shape. Nothing is constructed until
    /// the inputs are known to be valid.
    pub fn new(xs: na::DMatrix<bool>, zs: na::DMatrix<bool>)
        -> Result<Self, TableauError>
    {
        if xs.shape() != zs.shape() {
            return Err(TableauError::ShapeMismatch);
        }
        Ok(Self { xs, zs, program: CircuitProgram::new() })
    }

    /// Create a new tableau from rows of 0/1 integers.
    ///
    /// Fails if the rows do not form two rectangular matrices of equal,
    /// non-empty shape, or if any entry is outside {0, 1}. Nothing is
    /// constructed until the inputs are known to be valid.
    pub fn from_bits(xs: &[&[u8]], zs: &[&[u8]]) -> Result<Self, TableauError>
    {
        let n_rows = xs.len();
        if n_rows == 0 || zs.len() != n_rows {
            return Err(TableauError::ShapeMismatch);
        }
        let n_cols = xs[0].len();
        if xs.iter().chain(zs).any(|row| row.len() != n_cols) {
            return Err(TableauError::ShapeMismatch);
        }
        if let Some(&found)
            = xs.iter().chain(zs)
            .flat_map(|row| row.iter())
            .find(|&&bit| bit > 1)
        {
            return Err(TableauError::ValueDomain { found });
        }
        let xs = na::DMatrix::from_fn(n_rows, n_cols, |i, j| xs[i][j] == 1);
        let zs = na::DMatrix::from_fn(n_rows, n_cols, |i, j| zs[i][j] == 1);
        Ok(Self { xs, zs, program: CircuitProgram::new() })
    }

    /// Sample a uniformly random single-operator tableau over `n_qubits`
    /// qubits.
    ///
    /// Each of the 2·`n_qubits` bits is an independent fair coin, so every
    /// qubit's Pauli label is independently uniform over {I, X, Y, Z}.
    pub fn random_pauli<R>(n_qubits: usize, rng: &mut R) -> Self
    where R: Rng + ?Sized
    {
        let xs = na::DMatrix::from_fn(1, n_qubits, |_, _| rng.gen::<bool>());
        let zs = na::DMatrix::from_fn(1, n_qubits, |_, _| rng.gen::<bool>());
        Self { xs, zs, program: CircuitProgram::new() }
    }

    /// Return the number of qubits (columns).
    pub fn n_qubits(&self) -> usize { self.xs.ncols() }

    /// Return the number of tracked operators (rows).
    pub fn n_rows(&self) -> usize { self.xs.nrows() }

    /// Return the `(rows, columns)` shape shared by the X and Z parts.
    pub fn shape(&self) -> (usize, usize) { self.xs.shape() }

    /// Return the X bit of operator `row` at qubit `qubit`.
    ///
    /// *Panics if `row` or `qubit` is out of bounds.*
    pub fn x_bit(&self, row: usize, qubit: usize) -> bool {
        self.xs[(row, qubit)]
    }

    /// Return the Z bit of operator `row` at qubit `qubit`.
    ///
    /// *Panics if `row` or `qubit` is out of bounds.*
    pub fn z_bit(&self, row: usize, qubit: usize) -> bool {
        self.zs[(row, qubit)]
    }

    /// Return the program of every gate applied to `self` so far, in
    /// application order.
    pub fn program(&self) -> &CircuitProgram { &self.program }

    /// Consume `self`, returning the recorded program.
    pub fn into_program(self) -> CircuitProgram { self.program }

    /// Extract a single operator as a new, independent tableau with an empty
    /// program.
    ///
    /// *Panics if `index` is out of bounds.*
    pub fn row(&self, index: usize) -> Self {
        self.rows(index..index + 1)
    }

    /// Extract a range of operators as a new, independent tableau with an
    /// empty program.
    ///
    /// *Panics if `range` exceeds the number of rows.*
    pub fn rows(&self, range: Range<usize>) -> Self {
        let xs = self.xs.rows(range.start, range.len()).into_owned();
        let zs = self.zs.rows(range.start, range.len()).into_owned();
        Self { xs, zs, program: CircuitProgram::new() }
    }

    /// Vertically stack the operators of `self` and `other` into a new
    /// tableau with an empty program, `self`'s rows first.
    ///
    /// Fails if the qubit counts disagree.
    pub fn stacked(&self, other: &Self) -> Result<Self, TableauError> {
        if self.n_qubits() != other.n_qubits() {
            return Err(TableauError::ShapeMismatch);
        }
        Ok(self.stack_unchecked(other))
    }

    /// Append the operators of `other` below those of `self` in place,
    /// keeping `self`'s recorded program.
    ///
    /// Fails if the qubit counts disagree.
    pub fn stack(&mut self, other: &Self) -> Result<(), TableauError> {
        let stacked = self.stacked(other)?;
        self.xs = stacked.xs;
        self.zs = stacked.zs;
        Ok(())
    }

    fn stack_unchecked(&self, other: &Self) -> Self {
        let top = self.n_rows();
        let n_rows = top + other.n_rows();
        let xs = na::DMatrix::from_fn(n_rows, self.n_qubits(), |i, j| {
            if i < top { self.xs[(i, j)] } else { other.xs[(i - top, j)] }
        });
        let zs = na::DMatrix::from_fn(n_rows, self.n_qubits(), |i, j| {
            if i < top { self.zs[(i, j)] } else { other.zs[(i - top, j)] }
        });
        Self { xs, zs, program: CircuitProgram::new() }
    }

    /// Multiply the operators of `self` and `other` row by row, ignoring
    /// phase, producing a new tableau with an empty program.
    ///
    /// Unsigned Pauli-string multiplication is the entry-wise XOR of both
    /// bit matrices. Fails if the shapes disagree.
    pub fn pauli_product(&self, other: &Self) -> Result<Self, TableauError> {
        if self.shape() != other.shape() {
            return Err(TableauError::ShapeMismatch);
        }
        Ok(Self {
            xs: self.xs.zip_map(&other.xs, |a, b| a ^ b),
            zs: self.zs.zip_map(&other.zs, |a, b| a ^ b),
            program: CircuitProgram::new(),
        })
    }

    /// Return `true` if the operators of `self` and `other` commute.
    ///
    /// This is the symplectic product over GF(2): per entry, the parity of
    /// `x_self·z_other XOR x_other·z_self`, summed over the whole tableau.
    /// The relation is symmetric, and every tableau commutes with itself.
    ///
    /// *Panics if the shapes disagree.*
    pub fn commutes(&self, other: &Self) -> bool {
        assert_eq!(
            self.shape(), other.shape(),
            "commutation requires equal tableau shapes",
        );
        let anti
            = self.xs.iter().zip(other.zs.iter())
            .zip(other.xs.iter().zip(self.zs.iter()))
            .fold(false, |acc, ((xa, zb), (xb, za))| {
                acc ^ ((*xa && *zb) ^ (*xb && *za))
            });
        !anti
    }

    /// Perform the action of a gate on the tracked operators and record it
    /// into the attached program.
    ///
    /// *Panics if the gate addresses a qubit outside `0..self.n_qubits()`.*
    pub fn apply_gate(&mut self, gate: Gate) -> &mut Self {
        let n = self.n_qubits();
        assert!(
            gate.qubits().into_iter().all(|q| q < n),
            "gate {} addresses a qubit outside 0..{}", gate, n,
        );
        conjugate_columns(&mut self.xs, &mut self.zs, gate);
        self.program.push(gate);
        self
    }

    /// Apply a Hadamard gate: swap the X and Z columns of `qubit`.
    ///
    /// *Panics if `qubit` is out of bounds.*
    pub fn apply_h(&mut self, qubit: usize) -> &mut Self {
        self.apply_gate(Gate::H(qubit))
    }

    /// Apply an S gate: XOR the X column of `qubit` into its Z column.
    ///
    /// *Panics if `qubit` is out of bounds.*
    pub fn apply_s(&mut self, qubit: usize) -> &mut Self {
        self.apply_gate(Gate::S(qubit))
    }

    /// Apply a SWAP gate: exchange the columns of `qubit1` and `qubit2` in
    /// both matrices.
    ///
    /// *Panics if either qubit is out of bounds.*
    pub fn apply_swap(&mut self, qubit1: usize, qubit2: usize) -> &mut Self {
        self.apply_gate(Gate::Swap(qubit1, qubit2))
    }

    /// Apply a CNOT gate: XOR the control's X column into the target's and
    /// the target's Z column into the control's.
    ///
    /// *Panics if either qubit is out of bounds.*
    pub fn apply_cnot(&mut self, control: usize, target: usize) -> &mut Self {
        self.apply_gate(Gate::Cnot(control, target))
    }

    /// Apply an X gate.
    ///
    /// Conjugating a Pauli by a Pauli changes only the untracked global
    /// sign, so the matrices are unchanged but the gate is still recorded.
    ///
    /// *Panics if `qubit` is out of bounds.*
    pub fn apply_x(&mut self, qubit: usize) -> &mut Self {
        self.apply_gate(Gate::X(qubit))
    }

    /// Apply a Y gate; matrices unchanged, gate recorded.
    ///
    /// *Panics if `qubit` is out of bounds.*
    pub fn apply_y(&mut self, qubit: usize) -> &mut Self {
        self.apply_gate(Gate::Y(qubit))
    }

    /// Apply a Z gate; matrices unchanged, gate recorded.
    ///
    /// *Panics if `qubit` is out of bounds.*
    pub fn apply_z(&mut self, qubit: usize) -> &mut Self {
        self.apply_gate(Gate::Z(qubit))
    }

    /// Apply the identity: a true no-op, recorded nowhere.
    pub fn apply_i(&mut self, _qubit: usize) -> &mut Self { self }

    /// Render each operator as a string over {I, X, Y, Z}, one per row.
    pub fn pauli_strings(&self) -> Vec<String> {
        self.xs.row_iter().zip(self.zs.row_iter())
            .map(|(x_row, z_row)| {
                x_row.iter().zip(z_row.iter())
                    .map(|(&x, &z)| Pauli::from_xz(x, z).to_string())
                    .collect()
            })
            .collect()
    }
}

impl Add<&Tableau> for &Tableau {
    type Output = Tableau;

    /// Vertical stacking; see [`Tableau::stacked`].
    ///
    /// *Panics if the qubit counts disagree.*
    fn add(self, rhs: &Tableau) -> Self::Output {
        assert_eq!(
            self.n_qubits(), rhs.n_qubits(),
            "tableau stacking requires equal qubit counts",
        );
        self.stack_unchecked(rhs)
    }
}

impl Add for Tableau {
    type Output = Tableau;

    fn add(self, rhs: Tableau) -> Self::Output { &self + &rhs }
}

impl Mul<&Tableau> for &Tableau {
    type Output = Tableau;

    /// Row-wise Pauli-string multiplication; see [`Tableau::pauli_product`].
    ///
    /// *Panics if the shapes disagree.*
    fn mul(self, rhs: &Tableau) -> Self::Output {
        match self.pauli_product(rhs) {
            Ok(product) => product,
            Err(_) => panic!("tableau multiplication requires equal shapes"),
        }
    }
}

impl Mul for Tableau {
    type Output = Tableau;

    fn mul(self, rhs: Tableau) -> Self::Output { &self * &rhs }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pauli_strings().iter().join("\n"))
    }
}

// Pure GF(2) column update for a single gate; `Tableau::apply_gate` layers
// the program recording on top.
fn conjugate_columns(
    xs: &mut na::DMatrix<bool>,
    zs: &mut na::DMatrix<bool>,
    gate: Gate,
) {
    match gate {
        Gate::H(q) => {
            for i in 0..xs.nrows() {
                std::mem::swap(&mut xs[(i, q)], &mut zs[(i, q)]);
            }
        },
        Gate::S(q) => {
            for i in 0..xs.nrows() {
                zs[(i, q)] ^= xs[(i, q)];
            }
        },
        Gate::Swap(a, b) => {
            if a != b {
                xs.swap_columns(a, b);
                zs.swap_columns(a, b);
            }
        },
        Gate::Cnot(c, t) => {
            for i in 0..xs.nrows() {
                let x_ctrl = xs[(i, c)];
                xs[(i, t)] ^= x_ctrl;
                let z_tgt = zs[(i, t)];
                zs[(i, c)] ^= z_tgt;
            }
        },
        Gate::X(_) | Gate::Y(_) | Gate::Z(_) => { },
    }
}
