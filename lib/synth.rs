//! Uniformly-random Clifford circuit synthesis by recursive peeling.
//!
//! Implements the constructive sampling algorithm of [arXiv:2008.06011]: a
//! uniformly random element of the *n*-qubit Clifford group is realized as
//! an *O*(*n*²)-gate circuit. For each window size from *n* down to 1, an
//! anti-commuting pair of random Pauli operators is drawn, stacked into a
//! two-row [`Tableau`], and driven to the canonical pair (*X*₀, *Z*₀) by
//! gate actions; the gates recorded along the way, relocated onto the
//! not-yet-peeled qubit range, accumulate into the output program.
//!
//! [arXiv:2008.06011]: https://arxiv.org/abs/2008.06011

use rand::Rng;
use thiserror::Error;
use crate::{
    circuit::CircuitProgram,
    tableau::Tableau,
};

// Cap on the anti-commuting pair rejection loop. A fresh pair anti-commutes
// with probability ~1/2, so exhausting this many draws means the random bit
// source is broken.
const MAX_PAIR_DRAWS: usize = 1024;

/// Error produced when synthesis cannot make progress.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// The anti-commuting pair draw exhausted its retry cap.
    #[error("no anti-commuting Pauli pair found after {attempts} draws")]
    NonTermination {
        /// Number of pair draws attempted.
        attempts: usize,
    },
}

/// Synthesize a uniformly random `n_qubits`-qubit Clifford operator as a
/// gate program.
///
/// The program contains *O*(`n_qubits`²) gates drawn from {H, S, SWAP,
/// CNOT, X, Y, Z}, all indices within `0..n_qubits`. All randomness comes
/// from `rng`, so a seeded generator reproduces the same circuit.
///
/// Fails with [`SynthesisError::NonTermination`] only if the rejection
/// sampling of an anti-commuting Pauli pair exhausts its retry cap, which a
/// sound `rng` cannot trigger.
pub fn random_clifford<R>(n_qubits: usize, rng: &mut R)
    -> Result<CircuitProgram, SynthesisError>
where R: Rng + ?Sized
{
    let mut compiled = CircuitProgram::new();
    for n in (1..=n_qubits).rev() {
        let (s1, s2) = sample_anticommuting_pair(n, rng)?;
        let mut t = &s1 + &s2;
        reduce_row_to_x(&mut t, 0);
        collapse_x_support(&mut t, 0);
        fix_second_row(&mut t);
        apply_residual_pauli(&mut t, rng);
        let mut window = t.into_program();
        window.shift_qubits(n_qubits - n);
        compiled += window;
    }
    Ok(compiled)
}

// Draw independent single-row tableaus until the pair anti-commutes.
fn sample_anticommuting_pair<R>(n_qubits: usize, rng: &mut R)
    -> Result<(Tableau, Tableau), SynthesisError>
where R: Rng + ?Sized
{
    for _ in 0..MAX_PAIR_DRAWS {
        let s1 = Tableau::random_pauli(n_qubits, rng);
        let s2 = Tableau::random_pauli(n_qubits, rng);
        if !s1.commutes(&s2) { return Ok((s1, s2)); }
    }
    Err(SynthesisError::NonTermination { attempts: MAX_PAIR_DRAWS })
}

// Clear the Z-part of one row: wherever its Z bit is set, S clears it if
// the X bit is also set, otherwise H swaps the component over to X.
fn reduce_row_to_x(t: &mut Tableau, row: usize) {
    for q in 0..t.n_qubits() {
        if t.z_bit(row, q) {
            if t.x_bit(row, q) { t.apply_s(q); } else { t.apply_h(q); }
        }
    }
}

// XOR away all but the first qubit of the row's X support with CNOTs from
// the surviving qubit, then swap that qubit to position 0. The swap is
// emitted even when the support already sits at qubit 0.
fn collapse_x_support(t: &mut Tableau, row: usize) {
    let support: Vec<usize>
        = (0..t.n_qubits())
        .filter(|&q| t.x_bit(row, q))
        .collect();
    let Some((&lead, rest)) = support.split_first() else { return; };
    for &q in rest { t.apply_cnot(lead, q); }
    t.apply_swap(0, lead);
}

// Bring the second row to Z₀ without disturbing the first: inside an H(0)
// frame, the second row reduces to X₀ by the same sweep used on the first.
fn fix_second_row(t: &mut Tableau) {
    if second_row_is_canonical(t) { return; }
    t.apply_h(0);
    reduce_row_to_x(t, 1);
    collapse_x_support(t, 1);
    t.apply_h(0);
}

fn second_row_is_canonical(t: &Tableau) -> bool {
    (0..t.n_qubits()).all(|q| !t.x_bit(1, q))
        && t.z_bit(1, 0)
        && (1..t.n_qubits()).all(|q| !t.z_bit(1, q))
}

// Two fair bits pick one of {I, X, Z, Y} for qubit 0, selecting which
// member of the residual sign class the circuit realizes. Only the
// identity goes unrecorded; none of the four changes the matrices.
fn apply_residual_pauli<R>(t: &mut Tableau, rng: &mut R)
where R: Rng + ?Sized
{
    let first: bool = rng.gen();
    let second: bool = rng.gen();
    match (first, second) {
        (false, false) => { t.apply_i(0); },
        (false, true ) => { t.apply_x(0); },
        (true,  false) => { t.apply_z(0); },
        (true,  true ) => { t.apply_y(0); },
    }
}

#[cfg(test)]
mod test {
    use rand::{ rngs::StdRng, Error, RngCore, SeedableRng };
    use crate::gate::Gate;
    use super::*;

    #[test]
    fn terminates_for_small_registers() {
        let mut rng = StdRng::seed_from_u64(20080601);
        for n in 1..9 {
            let prog = random_clifford(n, &mut rng).unwrap();
            assert!(!prog.is_empty());
            assert!(prog.len() <= 2 * n * n + 5 * n);
            assert!(
                prog.iter()
                    .flat_map(|gate| gate.qubits())
                    .all(|q| q < n)
            );
        }
    }

    #[test]
    fn zero_qubits_is_an_empty_program() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(random_clifford(0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let mut rng_a = StdRng::seed_from_u64(777);
        let mut rng_b = StdRng::seed_from_u64(777);
        let prog_a = random_clifford(6, &mut rng_a).unwrap();
        let prog_b = random_clifford(6, &mut rng_b).unwrap();
        assert_eq!(prog_a, prog_b);
    }

    #[test]
    fn single_qubit_gates_are_single_qubit() {
        let mut rng = StdRng::seed_from_u64(99);
        let prog = random_clifford(5, &mut rng).unwrap();
        for gate in &prog {
            match gate {
                Gate::Swap(a, b) | Gate::Cnot(a, b) => {
                    assert!(*a < 5 && *b < 5);
                },
                single => assert_eq!(single.qubits().len(), 1),
            }
        }
    }

    #[test]
    fn peeling_round_canonicalizes_the_pair() {
        let mut rng = StdRng::seed_from_u64(31415);
        for n in 1..9 {
            for _ in 0..25 {
                let (s1, s2) = sample_anticommuting_pair(n, &mut rng).unwrap();
                assert!(!s1.commutes(&s2));
                let mut t = &s1 + &s2;
                reduce_row_to_x(&mut t, 0);
                collapse_x_support(&mut t, 0);
                fix_second_row(&mut t);
                assert!(t.x_bit(0, 0) && !t.z_bit(0, 0));
                assert!(!t.x_bit(1, 0) && t.z_bit(1, 0));
                for q in 1..n {
                    assert!(!t.x_bit(0, q) && !t.z_bit(0, q));
                    assert!(!t.x_bit(1, q) && !t.z_bit(1, q));
                }
            }
        }
    }

    // Never produces a set bit, so every sampled Pauli is the identity and
    // no pair can anti-commute.
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 { 0 }

        fn next_u64(&mut self) -> u64 { 0 }

        fn fill_bytes(&mut self, dest: &mut [u8]) { dest.fill(0); }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
            dest.fill(0);
            Ok(())
        }
    }

    #[test]
    fn broken_rng_fails_instead_of_hanging() {
        let mut rng = ZeroRng;
        assert_eq!(
            random_clifford(3, &mut rng),
            Err(SynthesisError::NonTermination { attempts: MAX_PAIR_DRAWS }),
        );
    }
}
