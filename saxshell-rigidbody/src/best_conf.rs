use saxshell_scatter::Water;

/// Snapshot of the best configuration seen so far: the hydration layer that produced it
/// and its goodness of fit. Body coordinates are not snapshotted; the transform strategy
/// undoes rejected moves exactly instead.
#[derive(Clone, Debug)]
pub struct BestConf {
    pub waters: Vec<Water>,
    pub chi2: f64,
}

impl BestConf {
    pub fn new(waters: Vec<Water>, chi2: f64) -> BestConf {
        BestConf { waters, chi2 }
    }
}
