use crate::body::Body;
use crate::site::Water;

/// Produces the hydration layer of a configuration.
///
/// Generators are external collaborators: the histogram core only consumes the site list
/// they return and does not care how it was produced. A molecule regenerates its layer
/// through its generator whenever the assembly moves.
pub trait HydrationGenerator: Send {
    fn generate(&self, bodies: &[Body]) -> Vec<Water>;
}

/// The in-vacuo default: no hydration layer at all.
pub struct NoHydration;

impl HydrationGenerator for NoHydration {
    fn generate(&self, _bodies: &[Body]) -> Vec<Water> {
        return Vec::new();
    }
}
