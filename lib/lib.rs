//! Unsigned Pauli-operator tableaus and uniformly-random Clifford circuit
//! synthesis.
//!
//! Pauli operators are tracked in the binary symplectic representation (a
//! pair of GF(2) matrices, one column per qubit), Clifford gates act on
//! them as column operations, and every applied gate is recorded into a
//! [`CircuitProgram`][circuit::CircuitProgram] for consumption by a
//! downstream state-evolution backend. On top of this sits the recursive
//! peeling synthesizer of [`synth`], which samples uniformly from the
//! *n*-qubit Clifford group in *O*(*n*²) gates.
//!
//! # Example
//! ```
//! use clifford_synth::{ synth::random_clifford, tableau::Tableau };
//! use rand::{ rngs::StdRng, SeedableRng };
//!
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! // a uniformly random 4-qubit Clifford operator, as a gate program
//! let program = random_clifford(4, &mut rng).unwrap();
//! assert!(program.iter().flat_map(|g| g.qubits()).all(|q| q < 4));
//!
//! // single Pauli operators are one-row tableaus
//! let p = Tableau::random_pauli(4, &mut rng);
//! assert!(p.commutes(&p));
//! ```

pub mod gate;
pub mod circuit;
pub mod tableau;
pub mod synth;
