use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use crate::constraint_manager::ConstraintManager;

/// Decides which body, or which constraint, the next iteration perturbs.
///
/// Returns `(body_index, constraint_index)`; a `None` constraint means the body moves freely.
pub trait BodySelectStrategy: Send {
    fn next(&mut self, n_bodies: usize, constraints: &ConstraintManager) -> (usize, Option<usize>);
}

/// Picks a uniformly random body, always moved freely.
pub struct RandomBodySelect {
    rng: SmallRng,
}

impl RandomBodySelect {
    pub fn new() -> RandomBodySelect {
        RandomBodySelect { rng: SmallRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> RandomBodySelect {
        RandomBodySelect { rng: SmallRng::seed_from_u64(seed) }
    }
}

impl BodySelectStrategy for RandomBodySelect {
    fn next(&mut self, n_bodies: usize, _constraints: &ConstraintManager) -> (usize, Option<usize>) {
        return (self.rng.gen_range(0..n_bodies), None);
    }
}

/// Picks a uniformly random constraint; the transform pivots the constrained body about it.
///
/// Falls back to free-body selection while no constraints exist.
pub struct RandomConstraintSelect {
    rng: SmallRng,
}

impl RandomConstraintSelect {
    pub fn new() -> RandomConstraintSelect {
        RandomConstraintSelect { rng: SmallRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> RandomConstraintSelect {
        RandomConstraintSelect { rng: SmallRng::seed_from_u64(seed) }
    }
}

impl BodySelectStrategy for RandomConstraintSelect {
    fn next(&mut self, n_bodies: usize, constraints: &ConstraintManager) -> (usize, Option<usize>) {
        if constraints.is_empty() {
            return (self.rng.gen_range(0..n_bodies), None);
        }
        let iconstraint = self.rng.gen_range(0..constraints.count());
        return (constraints.constraint(iconstraint).ibody2, Some(iconstraint));
    }
}

/// Cycles through the bodies in order.
pub struct SequentialBodySelect {
    current: usize,
}

impl SequentialBodySelect {
    pub fn new() -> SequentialBodySelect {
        SequentialBodySelect { current: 0 }
    }
}

impl BodySelectStrategy for SequentialBodySelect {
    fn next(&mut self, n_bodies: usize, _constraints: &ConstraintManager) -> (usize, Option<usize>) {
        let pick = self.current % n_bodies;
        self.current += 1;
        return (pick, None);
    }
}
