//! Genetic operators over parameter vectors.
//!
//! Both operators read their parents by reference and return a freshly
//! allocated child, so elites carried into the next generation are never
//! modified by breeding.
//!
//! - [`mutate`]: perturb one random coordinate, then quantize and clamp
//! - [`single_point_crossover`]: prefix of one parent, suffix of the other

use crate::space::{NumType, ParameterSpace, ParameterVector};
use rand::Rng;

/// Returns a copy of `parent` with one uniformly chosen coordinate moved.
///
/// Float spaces add a draw from `[-scale, scale]`. Integer spaces add a
/// non-zero whole offset of magnitude up to `max(1, round(scale))`, so a
/// mutation always proposes a different lattice point before clamping.
///
/// # Panics
/// Panics if `parent` is empty or `scale` is not positive.
pub fn mutate<R: Rng + ?Sized>(
    space: &ParameterSpace,
    parent: &ParameterVector,
    scale: f64,
    rng: &mut R,
) -> ParameterVector {
    assert!(!parent.is_empty(), "cannot mutate an empty vector");
    assert!(scale > 0.0, "mutation scale must be positive");

    let index = rng.random_range(0..parent.len());
    let offset = match space.num_type() {
        NumType::Float => rng.random_range(-scale..=scale),
        NumType::Integer => {
            let reach = (scale.round() as i64).max(1);
            let magnitude = rng.random_range(1..=reach) as f64;
            if rng.random_bool(0.5) {
                magnitude
            } else {
                -magnitude
            }
        }
    };
    parent.with_value(index, space.quantize(index, parent[index] + offset))
}

/// Single-point crossover with a uniformly random cut `k` in `0..len`.
///
/// The child takes `parent1[..k]` followed by `parent2[k..]`.
///
/// # Panics
/// Panics if the parents differ in length or are empty.
pub fn single_point_crossover<R: Rng + ?Sized>(
    parent1: &ParameterVector,
    parent2: &ParameterVector,
    rng: &mut R,
) -> ParameterVector {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    assert!(!parent1.is_empty(), "parents must not be empty");

    let cut = rng.random_range(0..parent1.len());
    crossover_at(parent1, parent2, cut)
}

/// Deterministic crossover at `cut`: `parent1[..cut] ++ parent2[cut..]`.
///
/// # Panics
/// Panics if `cut > parent1.len()` or the parents differ in length.
pub fn crossover_at(
    parent1: &ParameterVector,
    parent2: &ParameterVector,
    cut: usize,
) -> ParameterVector {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    parent1[..cut]
        .iter()
        .chain(&parent2[cut..])
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn float_space() -> ParameterSpace {
        ParameterSpace::new(NumType::Float, [("a", 0.0, 1.0), ("b", 0.0, 1.0), ("c", 0.0, 1.0)])
            .unwrap()
    }

    #[test]
    fn test_mutate_changes_one_coordinate() {
        let space = float_space();
        let mut rng = StdRng::seed_from_u64(42);
        let parent: ParameterVector = vec![0.5, 0.5, 0.5].into();

        for _ in 0..100 {
            let child = mutate(&space, &parent, 0.5, &mut rng);
            let changed = child.iter().zip(parent.iter()).filter(|(a, b)| a != b).count();
            assert!(changed <= 1);
            assert!(space.contains(&child));
            for (c, p) in child.iter().zip(parent.iter()) {
                assert!((c - p).abs() <= 0.5 + 1e-12);
            }
        }
        assert_eq!(parent.as_slice(), &[0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_mutate_clamps_at_bounds() {
        let space = float_space();
        let mut rng = StdRng::seed_from_u64(1);
        let edge: ParameterVector = vec![1.0, 0.0, 1.0].into();
        for _ in 0..200 {
            let child = mutate(&space, &edge, 5.0, &mut rng);
            assert!(space.contains(&child), "{child} escaped");
        }
    }

    #[test]
    fn test_integer_mutation_moves_on_lattice() {
        let space =
            ParameterSpace::new(NumType::Integer, [("x", 0.0, 10.0), ("y", 0.0, 10.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let parent: ParameterVector = vec![5.0, 5.0].into();
        for _ in 0..100 {
            let child = mutate(&space, &parent, 0.5, &mut rng);
            assert!(child.iter().all(|v| v.fract() == 0.0));
            let moved: f64 = child.iter().zip(parent.iter()).map(|(a, b)| (a - b).abs()).sum();
            assert_eq!(moved, 1.0);
        }
    }

    #[test]
    fn test_crossover_at() {
        let p1: ParameterVector = vec![1.0, 2.0, 3.0, 4.0].into();
        let p2: ParameterVector = vec![10.0, 20.0, 30.0, 40.0].into();
        assert_eq!(crossover_at(&p1, &p2, 0).as_slice(), &[10.0, 20.0, 30.0, 40.0]);
        assert_eq!(crossover_at(&p1, &p2, 2).as_slice(), &[1.0, 2.0, 30.0, 40.0]);
        assert_eq!(crossover_at(&p1, &p2, 4).as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_crossover_leaves_parents() {
        let mut rng = StdRng::seed_from_u64(9);
        let p1: ParameterVector = vec![0.1, 0.2, 0.3].into();
        let p2: ParameterVector = vec![0.9, 0.8, 0.7].into();
        for _ in 0..50 {
            let mut child = single_point_crossover(&p1, &p2, &mut rng);
            // Child position i comes from p1 or p2 at the same index.
            for i in 0..3 {
                assert!(child[i] == p1[i] || child[i] == p2[i]);
            }
            child[0] = -1.0;
        }
        assert_eq!(p1.as_slice(), &[0.1, 0.2, 0.3]);
        assert_eq!(p2.as_slice(), &[0.9, 0.8, 0.7]);
    }

    proptest! {
        #[test]
        fn prop_mutation_stays_in_bounds(
            seed in 0u64..1000,
            scale in 0.01f64..20.0,
            a in 0.0f64..=1.0,
            b in 0.0f64..=1.0,
        ) {
            let space = float_space();
            let mut rng = StdRng::seed_from_u64(seed);
            let parent: ParameterVector = vec![a, b, 0.5].into();
            let child = mutate(&space, &parent, scale, &mut rng);
            prop_assert!(space.contains(&child));
            prop_assert_eq!(child.len(), 3);
        }
    }

    #[test]
    fn test_crossover_cut_never_takes_all_of_first() {
        let mut rng = StdRng::seed_from_u64(13);
        let p1: ParameterVector = vec![1.0, 1.0].into();
        let p2: ParameterVector = vec![2.0, 2.0].into();
        for _ in 0..100 {
            let child = single_point_crossover(&p1, &p2, &mut rng);
            assert_eq!(child[1], 2.0);
        }
    }
}
