use crate::axis::{DistanceAxis, QAxis};

/// Model axes: the momentum transfer range of the output curve and the distance binning.
#[derive(Clone, Debug)]
pub struct AxesOptions {
    /// lower bound of the momentum transfer axis, in 1/A
    pub q_min: f64,
    /// upper bound of the momentum transfer axis, in 1/A
    pub q_max: f64,
    /// number of points on the momentum transfer axis
    pub q_bins: usize,
    /// width of a single distance bin, in A
    pub distance_bin_width: f64,
    /// distances beyond this limit are discarded, in A
    pub max_distance: f64,
}

impl Default for AxesOptions {
    fn default() -> AxesOptions {
        AxesOptions {
            q_min: 1e-4,
            q_max: 0.5,
            q_bins: 100,
            distance_bin_width: 0.5,
            max_distance: 500.0,
        }
    }
}

impl AxesOptions {
    /// The momentum transfer axis described by these options
    pub fn q_axis(&self) -> QAxis {
        QAxis { min: self.q_min, max: self.q_max, bins: self.q_bins }
    }

    /// The distance axis described by these options
    pub fn distance_axis(&self) -> DistanceAxis {
        DistanceAxis::new(self.distance_bin_width, self.max_distance)
    }
}

/// Reference sets of displaced solvent volumes used to weight the excluded-volume channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplacedVolumeSet {
    Traube,
    VoronoiExplicitH,
    VoronoiImplicitH,
    MinimumFluctuationExplicitH,
    MinimumFluctuationImplicitH,
    VdW,
    Standard,
}

/// How atoms become scattering sites.
#[derive(Clone, Debug)]
pub struct MoleculeOptions {
    /// fold implicit hydrogens into the effective charge of their parent atom
    pub implicit_hydrogens: bool,
    /// which displaced-volume reference set weights the excluded-volume channel
    pub displaced_volume_set: DisplacedVolumeSet,
}

impl Default for MoleculeOptions {
    fn default() -> MoleculeOptions {
        MoleculeOptions { implicit_hydrogens: true, displaced_volume_set: DisplacedVolumeSet::Traube }
    }
}

/// Histogram manager implementations a [`Molecule`](crate::Molecule) can be configured with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistogramManagerChoice {
    /// single recomputation of everything on every call
    Simple,
    /// state-change-driven partial recomputation
    Partial,
    /// partial recomputation with form-factor-resolved channels
    PartialFF,
    /// expands symmetry operations attached to the bodies
    PartialSymmetry,
    /// form-factor-resolved channels with the FoXS excluded-volume convention
    FoXS,
    /// form-factor-resolved channels with the CRYSOL excluded-volume convention
    Crysol,
}

/// Histogram configuration.
#[derive(Clone, Debug)]
pub struct HistOptions {
    pub manager_choice: HistogramManagerChoice,
    /// track the distance-weighted sum per bin so an effective bin centre can be used
    /// by the Debye transform
    pub weighted_bins: bool,
}

impl Default for HistOptions {
    fn default() -> HistOptions {
        HistOptions { manager_choice: HistogramManagerChoice::Partial, weighted_bins: true }
    }
}

/// Controls of the grid-based excluded-volume description.
///
/// The grid itself is produced by an external collaborator; the histogram core only consumes
/// the dummy-atom coordinates it generates, together with the axis width configured here.
#[derive(Clone, Debug)]
pub struct GridOptions {
    /// width of a cubic grid cell, in A
    pub cell_width: f64,
    /// smallest radius assigned to an excluded-volume dummy atom, in A
    pub min_exv_radius: f64,
    /// bin width of the excluded-volume distance axis, in A
    pub exv_width: f64,
    /// thickness of the surface layer kept when carving the excluded volume, in A
    pub exv_surface_thickness: f64,
}

impl Default for GridOptions {
    fn default() -> GridOptions {
        GridOptions { cell_width: 1.0, min_exv_radius: 1.0, exv_width: 1.0, exv_surface_thickness: 1.0 }
    }
}

impl GridOptions {
    /// The distance axis of the excluded-volume channels, spaced by the configured width
    pub fn exv_axis(&self, max_distance: f64) -> crate::axis::VariableDistanceAxis {
        return crate::axis::VariableDistanceAxis::uniform(self.exv_width, max_distance);
    }
}

/// Options that do not belong to any particular computation stage.
#[derive(Clone, Debug)]
pub struct GeneralOptions {
    /// number of worker threads; zero means hardware concurrency
    pub threads: usize,
    /// folder for all produced files
    pub output: String,
    /// print a line per iteration instead of acceptance-only reporting
    pub verbose: bool,
    /// emit auxiliary curves next to the main results
    pub supplementary_plots: bool,
}

impl Default for GeneralOptions {
    fn default() -> GeneralOptions {
        GeneralOptions { threads: 0, output: String::from("output/"), verbose: true, supplementary_plots: false }
    }
}

/// All options consumed by the scattering core, with defaults matching a typical
/// protein-in-solution measurement.
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    pub axes: AxesOptions,
    pub molecule: MoleculeOptions,
    pub hist: HistOptions,
    pub grid: GridOptions,
    pub general: GeneralOptions,
}
