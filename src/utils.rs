//! This is the general Utils module, which contains the random number helpers shared by the graph
//! generator and anything else that needs reproducible randomness.

use smolprng::{Algorithm, JsfLarge, PRNG};

/// Makes a PRNG from a seed, so that every random draw in the crate can be reproduced.
pub fn seeded_prng(seed: u64) -> PRNG<JsfLarge> {
    PRNG {
        generator: JsfLarge::from(seed),
    }
}

/// Draws an integer uniformly from the inclusive range [low, high].
pub fn uniform_int<T: Algorithm>(low: u32, high: u32, prng: &mut PRNG<T>) -> u32 {
    let span = u64::from(high - low) + 1;
    low + (prng.gen_u64() % span) as u32
}

/// Draws a uniformly random permutation of 0..n, where `perm[i]` is the new label of `i`.
pub fn random_permutation<T: Algorithm>(n: usize, prng: &mut PRNG<T>) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();

    // Fisher-Yates, back to front
    for i in (1..n).rev() {
        let j = (prng.gen_u64() % (i as u64 + 1)) as usize;
        perm.swap(i, j);
    }

    perm
}
