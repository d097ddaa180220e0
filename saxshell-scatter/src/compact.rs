use crate::axis::BinAxis;
use crate::body::Body;
use crate::form_factor::{ExvFormFactorTable, FormFactorType};
use crate::site::{Atom, Water};

/// One scattering site packed for the distance kernels: position and weight in a single
/// 32-byte tuple, so a pair's data stays within one cache line and the compiler can keep
/// the inner loop free of aliasing hazards.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompactCoordinatesData {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl CompactCoordinatesData {
    /// Distance to another site and the product of the two weights
    #[inline(always)]
    pub fn evaluate(&self, other: &CompactCoordinatesData) -> (f64, f64) {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        return ((dx * dx + dy * dy + dz * dz).sqrt(), self.w * other.w);
    }
}

/// Cache-friendly flat array of scattering sites, immutable for the duration of one
/// histogram job.
///
/// The batch evaluators return, for one reference site and four or eight target sites,
/// the vector of distances and the vector of weight products; the `_rounded` variants
/// return nearest-bin indices instead of raw distances.
#[derive(Clone, Debug, Default)]
pub struct CompactCoordinates {
    data: Vec<CompactCoordinatesData>,
}

impl CompactCoordinates {
    /// Packs a list of atoms
    pub fn from_atoms(atoms: &[Atom]) -> CompactCoordinates {
        CompactCoordinates {
            data: atoms.iter()
                .map(|a| CompactCoordinatesData { x: a.pos.x, y: a.pos.y, z: a.pos.z, w: a.weight })
                .collect(),
        }
    }

    /// Packs the atoms of several bodies into one contiguous buffer
    pub fn from_bodies(bodies: &[Body]) -> CompactCoordinates {
        CompactCoordinates {
            data: bodies.iter().flat_map(|b| b.atoms().iter())
                .map(|a| CompactCoordinatesData { x: a.pos.x, y: a.pos.y, z: a.pos.z, w: a.weight })
                .collect(),
        }
    }

    /// Packs a hydration-site list
    pub fn from_waters(waters: &[Water]) -> CompactCoordinates {
        CompactCoordinates {
            data: waters.iter()
                .map(|w| CompactCoordinatesData { x: w.pos.x, y: w.pos.y, z: w.pos.z, w: w.weight })
                .collect(),
        }
    }

    pub(crate) fn from_raw(data: Vec<CompactCoordinatesData>) -> CompactCoordinates {
        CompactCoordinates { data }
    }

    /// Number of sites
    pub fn size(&self) -> usize { self.data.len() }

    /// Read-only view of the packed sites
    pub fn data(&self) -> &[CompactCoordinatesData] { &self.data }

    /// Distances and weight products between site `i` and sites `j..j+4`
    #[inline(always)]
    pub fn evaluate4(&self, i: usize, other: &CompactCoordinates, j: usize) -> ([f64; 4], [f64; 4]) {
        let mut distances = [0.0; 4];
        let mut weights = [0.0; 4];
        let reference = &self.data[i];
        for k in 0..4 {
            let (d, w) = reference.evaluate(&other.data[j + k]);
            distances[k] = d;
            weights[k] = w;
        }
        return (distances, weights);
    }

    /// Distances and weight products between site `i` and sites `j..j+8`
    #[inline(always)]
    pub fn evaluate8(&self, i: usize, other: &CompactCoordinates, j: usize) -> ([f64; 8], [f64; 8]) {
        let mut distances = [0.0; 8];
        let mut weights = [0.0; 8];
        let reference = &self.data[i];
        for k in 0..8 {
            let (d, w) = reference.evaluate(&other.data[j + k]);
            distances[k] = d;
            weights[k] = w;
        }
        return (distances, weights);
    }

    /// Nearest-bin indices and weight products between site `i` and sites `j..j+4`
    #[inline(always)]
    pub fn evaluate4_rounded<A: BinAxis>(&self, i: usize, other: &CompactCoordinates, j: usize, axis: &A)
        -> ([usize; 4], [f64; 4])
    {
        let (distances, weights) = self.evaluate4(i, other, j);
        let mut bins = [0usize; 4];
        for k in 0..4 { bins[k] = axis.bin(distances[k]); }
        return (bins, weights);
    }

    /// Nearest-bin indices and weight products between site `i` and sites `j..j+8`
    #[inline(always)]
    pub fn evaluate8_rounded<A: BinAxis>(&self, i: usize, other: &CompactCoordinates, j: usize, axis: &A)
        -> ([usize; 8], [f64; 8])
    {
        let (distances, weights) = self.evaluate8(i, other, j);
        let mut bins = [0usize; 8];
        for k in 0..8 { bins[k] = axis.bin(distances[k]); }
        return (bins, weights);
    }

    /// Sum of the squared site weights, the diagonal of the self-correlation
    pub fn sum_of_squared_weights(&self) -> f64 {
        return self.data.iter().map(|d| d.w * d.w).sum();
    }
}

/// A [`CompactCoordinates`](CompactCoordinates) buffer paired with the species tag and the
/// displaced-solvent charge of every site, as needed by the form-factor-resolved kernels.
#[derive(Clone, Debug)]
pub struct CompactCoordinatesFF {
    coordinates: CompactCoordinates,
    ff_types: Vec<FormFactorType>,
    exv_weights: Vec<f64>,
}

impl CompactCoordinatesFF {
    /// Packs the atoms of several bodies, resolving the displaced charge of every site
    /// through the excluded-volume table
    pub fn from_bodies(bodies: &[Body], exv: &ExvFormFactorTable) -> CompactCoordinatesFF {
        let atoms: Vec<&Atom> = bodies.iter().flat_map(|b| b.atoms().iter()).collect();
        Self::from_atom_refs(&atoms, exv)
    }

    /// Packs a list of atoms, resolving the displaced charge of every site
    pub fn from_atoms(atoms: &[Atom], exv: &ExvFormFactorTable) -> CompactCoordinatesFF {
        let refs: Vec<&Atom> = atoms.iter().collect();
        Self::from_atom_refs(&refs, exv)
    }

    /// Packs the atoms of several bodies with zeroed displaced charges; used when the
    /// excluded volume is described by external grid dummies instead of the atoms themselves
    pub fn from_bodies_without_exv(bodies: &[Body]) -> CompactCoordinatesFF {
        let atoms: Vec<&Atom> = bodies.iter().flat_map(|b| b.atoms().iter()).collect();
        CompactCoordinatesFF {
            coordinates: CompactCoordinates::from_raw(
                atoms.iter()
                    .map(|a| CompactCoordinatesData { x: a.pos.x, y: a.pos.y, z: a.pos.z, w: a.weight })
                    .collect()),
            ff_types: atoms.iter().map(|a| a.ff_type).collect(),
            exv_weights: vec![0.0; atoms.len()],
        }
    }

    fn from_atom_refs(atoms: &[&Atom], exv: &ExvFormFactorTable) -> CompactCoordinatesFF {
        CompactCoordinatesFF {
            coordinates: CompactCoordinates::from_raw(
                atoms.iter()
                    .map(|a| CompactCoordinatesData { x: a.pos.x, y: a.pos.y, z: a.pos.z, w: a.weight })
                    .collect()),
            ff_types: atoms.iter().map(|a| a.ff_type).collect(),
            exv_weights: atoms.iter().map(|a| exv.charge(a.ff_type)).collect(),
        }
    }

    pub fn size(&self) -> usize { self.coordinates.size() }

    /// The packed coordinates without the species annotation
    pub fn coordinates(&self) -> &CompactCoordinates { &self.coordinates }

    /// Species tag of site `i`
    #[inline(always)]
    pub fn ff_type(&self, i: usize) -> FormFactorType { self.ff_types[i] }

    /// Displaced-solvent charge of site `i`
    #[inline(always)]
    pub fn exv_weight(&self, i: usize) -> f64 { self.exv_weights[i] }
}
