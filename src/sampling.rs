//! Joint-angle generation for exercising forward kinematics.
//!
//! All randomization goes through a seeded `ChaCha8Rng` so that any failing case
//! can be replayed from its seed.

use std::f64::consts::PI;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Create a deterministic `ChaCha8Rng` from a seed.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Draw `dof` joint angles uniformly from `[-π, π]`.
pub fn random_joint_angles<R: Rng + ?Sized>(rng: &mut R, dof: usize) -> Vec<f64> {
    (0..dof).map(|_| rng.gen_range(-PI..=PI)).collect()
}

/// Generate `count` joint-angle vectors of length `dof` from a single seed.
///
/// ```
/// use screw_kinematics::sampling::joint_angle_batch;
/// let batch = joint_angle_batch(42, 6, 4);
/// assert_eq!(batch.len(), 4);
/// assert!(batch.iter().all(|t| t.len() == 6));
/// assert_eq!(batch, joint_angle_batch(42, 6, 4));
/// ```
pub fn joint_angle_batch(seed: u64, dof: usize, count: usize) -> Vec<Vec<f64>> {
    let mut rng = seeded_rng(seed);
    (0..count)
        .map(|_| random_joint_angles(&mut rng, dof))
        .collect()
}
