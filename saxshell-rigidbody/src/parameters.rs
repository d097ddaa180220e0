use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use saxshell_pdb::calc::Vec3;
use crate::options::ParameterStrategyChoice;

/// One proposed perturbation: Euler rotation angles plus a translation vector.
#[derive(Clone, Debug)]
pub struct TransformParameter {
    pub rotation: Vec3,
    pub translation: Vec3,
}

/// Proposes perturbation parameters for the next iteration.
pub trait ParameterGenerationStrategy: Send {
    fn next(&mut self) -> TransformParameter;
}

/// Uniform rotations and translations whose amplitudes decay linearly over the run,
/// so early iterations explore and late iterations refine.
pub struct SimpleParameterGeneration {
    iterations: usize,
    current: usize,
    max_translation: f64,
    max_rotation: f64,
    rng: SmallRng,
}

impl SimpleParameterGeneration {
    pub fn new(iterations: usize, max_translation: f64, max_rotation: f64) -> SimpleParameterGeneration {
        SimpleParameterGeneration {
            iterations: iterations.max(1),
            current: 0,
            max_translation,
            max_rotation,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn seeded(iterations: usize, max_translation: f64, max_rotation: f64, seed: u64) -> SimpleParameterGeneration {
        SimpleParameterGeneration {
            iterations: iterations.max(1),
            current: 0,
            max_translation,
            max_rotation,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Builds the strategy selected by the configuration.
    pub fn from_choice(choice: ParameterStrategyChoice, iterations: usize,
                       max_translation: f64, max_rotation: f64) -> SimpleParameterGeneration {
        match choice {
            ParameterStrategyChoice::Simple => Self::new(iterations, max_translation, max_rotation),
            ParameterStrategyChoice::RotationsOnly => Self::new(iterations, 0.0, max_rotation),
            ParameterStrategyChoice::TranslationsOnly => Self::new(iterations, max_translation, 0.0),
        }
    }

    fn amplitude(&self) -> f64 {
        // decay to a tenth of the initial amplitude by the final iteration
        let progress = self.current as f64 / self.iterations as f64;
        return (1.0 - progress).max(0.1);
    }
}

impl ParameterGenerationStrategy for SimpleParameterGeneration {
    fn next(&mut self) -> TransformParameter {
        let scale = self.amplitude();
        let t = self.max_translation * scale;
        let r = self.max_rotation * scale;
        self.current += 1;

        // rotations are drawn from a clamped normal so small refinements dominate
        let angles = Normal::new(0.0, (r / 3.0).max(1e-12)).unwrap();
        let angle = |rng: &mut SmallRng| {
            if r == 0.0 { return 0.0; }
            return angles.sample(rng).clamp(-r, r);
        };
        TransformParameter {
            rotation: Vec3::new(
                angle(&mut self.rng), angle(&mut self.rng), angle(&mut self.rng)),
            translation: Vec3::new(
                self.rng.gen_range(-1.0..=1.0) * t,
                self.rng.gen_range(-1.0..=1.0) * t,
                self.rng.gen_range(-1.0..=1.0) * t,
            ),
        }
    }
}
