//! Computes pair-distance histograms and SAXS intensity curves for macromolecular assemblies.
//!
//! The crate turns a multi-body [`Molecule`](Molecule) into a scattering intensity curve `I(q)`
//! in three steps:
//!  1. atomic coordinates are packed into cache-friendly [`CompactCoordinates`](CompactCoordinates) buffers,
//!  2. a [histogram manager](managers) accumulates weighted pair distances into binned
//!     distributions, decomposed into atom-atom, atom-water and water-water components,
//!  3. the [Debye transform](debye) converts a histogram into `I(q) = Σ P(d) sinc(q d)`.
//!
//! Histogram managers differ in whether they recompute everything from scratch on every call
//! (the simple variant) or track which [`Body`](Body) has been modified since the previous call
//! and rebuild only the affected blocks (the partial variants). Change tracking runs through
//! [`Signaller`](state::Signaller) handles handed to each body, so the bodies themselves
//! stay oblivious of the histogram machinery observing them.
//!
//! # Example
//! ```
//! use saxshell_scatter::{Atom, Body, Molecule, RuntimeOptions};
//! use saxshell_pdb::calc::Vec3;
//! use saxshell_pdb::Element;
//!
//! let atoms = vec![
//!     Atom::from_coordinates(Vec3::new(0.0, 0.0, 0.0), 6.0, Element::C),
//!     Atom::from_coordinates(Vec3::new(3.0, 0.0, 0.0), 6.0, Element::C),
//! ];
//! let mut options = RuntimeOptions::default();
//! options.axes.distance_bin_width = 1.0;
//! let mut molecule = Molecule::from_bodies(vec![Body::from_atoms(atoms)], options);
//! let hist = molecule.histogram();
//! assert_eq!(hist.p()[0], 72.0);      // the two self terms, 2 * 6^2
//! assert_eq!(hist.p()[3], 72.0);      // the pair at 3 A, counted both ways
//! ```

#![allow(clippy::needless_return)]

mod options;
mod axis;
mod form_factor;
mod distribution;
mod compact;
mod site;
mod body;
mod molecule;
mod symmetry;
mod hydration;
mod composite;
mod composite_ff;

pub mod state;
pub mod debye;
pub mod distance_calculator;
pub mod managers;

pub use options::{AxesOptions, DisplacedVolumeSet, GeneralOptions, GridOptions, HistOptions,
                  HistogramManagerChoice, MoleculeOptions, RuntimeOptions};
pub use axis::{BinAxis, DistanceAxis, QAxis, VariableDistanceAxis};
pub use form_factor::{ExvFormFactorTable, FormFactor, FormFactorSet, FormFactorType};
pub use distribution::{Distribution1D, Distribution2D, Distribution3D, PairDistribution, WeightedDistribution1D};
pub use compact::{CompactCoordinates, CompactCoordinatesData, CompactCoordinatesFF};
pub use site::{Atom, Water};
pub use body::Body;
pub use molecule::Molecule;
pub use symmetry::Symmetry;
pub use hydration::{HydrationGenerator, NoHydration};
pub use composite::{CompositeDistanceHistogram, CompositeHistogram, DistanceHistogram};
pub use composite_ff::{CompositeDistanceHistogramFFAvg, CompositeDistanceHistogramFFGrid, ExvDummy};
