use std::f64::consts::PI;
use once_cell::sync::Lazy;
use saxshell_pdb::Element;
use crate::options::DisplacedVolumeSet;

/// The closed set of scattering species.
///
/// The variants select a form-factor curve; hydrogen-bearing groups (`CH`, `NH2`, ...)
/// stand for a heavy atom with its implicit hydrogens folded in.
/// [`ExcludedVolume`](FormFactorType::ExcludedVolume) is a reserved tag meaning
/// "dummy atom representing displaced solvent"; the histogram kernels branch on it explicitly.
///
/// The discriminants are stable so the type can index precomputed tables:
/// ```
/// use saxshell_scatter::FormFactorType;
/// assert_eq!(FormFactorType::H.index(), 0);
/// assert_eq!(FormFactorType::ExcludedVolume.index(), FormFactorType::COUNT - 1);
/// ```
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormFactorType {
    H, C, N, O, S,
    CH, CH2, CH3,
    NH, NH2, NH3,
    OH, SH,
    Other,
    ExcludedVolume,
}

impl FormFactorType {
    /// Number of species, including the reserved excluded-volume tag
    pub const COUNT: usize = 15;

    /// This species as an index into precomputed tables
    #[inline(always)]
    pub fn index(self) -> usize { self as usize }

    /// The inverse of [`index()`](FormFactorType::index); panics on an invalid index
    pub fn from_index(index: usize) -> FormFactorType {
        const ALL: [FormFactorType; FormFactorType::COUNT] = [
            FormFactorType::H, FormFactorType::C, FormFactorType::N, FormFactorType::O,
            FormFactorType::S, FormFactorType::CH, FormFactorType::CH2, FormFactorType::CH3,
            FormFactorType::NH, FormFactorType::NH2, FormFactorType::NH3, FormFactorType::OH,
            FormFactorType::SH, FormFactorType::Other, FormFactorType::ExcludedVolume,
        ];
        return ALL[index];
    }

    /// Assigns the species of an atom from its element and the number of implicit hydrogens
    pub fn from_element(element: Element, hydrogens: u32) -> FormFactorType {
        match (element, hydrogens) {
            (Element::H, _) => FormFactorType::H,
            (Element::C, 0) => FormFactorType::C,
            (Element::C, 1) => FormFactorType::CH,
            (Element::C, 2) => FormFactorType::CH2,
            (Element::C, _) => FormFactorType::CH3,
            (Element::N, 0) => FormFactorType::N,
            (Element::N, 1) => FormFactorType::NH,
            (Element::N, 2) => FormFactorType::NH2,
            (Element::N, _) => FormFactorType::NH3,
            (Element::O, 0) => FormFactorType::O,
            (Element::O, _) => FormFactorType::OH,
            (Element::S, 0) => FormFactorType::S,
            (Element::S, _) => FormFactorType::SH,
            _ => FormFactorType::Other,
        }
    }
}

/// A four-Gaussian atomic form factor, `f(q) = sum_i a_i exp(-b_i (q/4pi)^2) + c`,
/// possibly with implicit hydrogens added on top.
///
/// The raw curve is normalised so that `f(0)` equals the electron count of the group;
/// [`evaluate_normalized`](FormFactor::evaluate_normalized) rescales it to `f(0) = 1`,
/// which is the convention used throughout the histogram core (site weights carry the charge).
#[derive(Clone, Copy, Debug)]
pub struct FormFactor {
    a: [f64; 4],
    b: [f64; 4],
    c: f64,
    hydrogens: u32,
}

/// Cromer-Mann coefficients, International Tables for Crystallography vol. C
const CM_H: FormFactor = FormFactor {
    a: [0.489918, 0.262003, 0.196767, 0.049879],
    b: [20.6593, 7.74039, 49.5519, 2.20159],
    c: 0.001305, hydrogens: 0,
};
const CM_C: FormFactor = FormFactor {
    a: [2.31000, 1.02000, 1.58860, 0.865000],
    b: [20.8439, 10.2075, 0.568700, 51.6512],
    c: 0.215600, hydrogens: 0,
};
const CM_N: FormFactor = FormFactor {
    a: [12.2126, 3.13220, 2.01250, 1.16630],
    b: [0.005700, 9.89330, 28.9975, 0.582600],
    c: -11.529, hydrogens: 0,
};
const CM_O: FormFactor = FormFactor {
    a: [3.04850, 2.28680, 1.54630, 0.867000],
    b: [13.2771, 5.70110, 0.323900, 32.9089],
    c: 0.250800, hydrogens: 0,
};
const CM_S: FormFactor = FormFactor {
    a: [6.90530, 5.20340, 1.43790, 1.58630],
    b: [1.46790, 22.2151, 0.253600, 56.1720],
    c: 0.866900, hydrogens: 0,
};

impl FormFactor {
    const fn with_hydrogens(base: FormFactor, hydrogens: u32) -> FormFactor {
        FormFactor { a: base.a, b: base.b, c: base.c, hydrogens }
    }

    /// Evaluates the raw form factor; `f(0)` equals the group's electron count
    pub fn evaluate(&self, q: f64) -> f64 {
        let s2 = (q / (4.0 * PI)) * (q / (4.0 * PI));
        let mut f = self.c;
        for i in 0..4 {
            f += self.a[i] * (-self.b[i] * s2).exp();
        }
        if self.hydrogens > 0 {
            let mut fh = CM_H.c;
            for i in 0..4 {
                fh += CM_H.a[i] * (-CM_H.b[i] * s2).exp();
            }
            f += self.hydrogens as f64 * fh;
        }
        return f;
    }

    /// Evaluates the form factor rescaled to `f(0) = 1`
    pub fn evaluate_normalized(&self, q: f64) -> f64 {
        return self.evaluate(q) / self.evaluate(0.0);
    }
}

/// the raw form factors of all species; the excluded-volume slot holds the oxygen curve
/// as a placeholder and is never consulted by the kernels, which branch to
/// [`ExvFormFactorTable`](ExvFormFactorTable) instead
static ATOMIC: Lazy<[FormFactor; FormFactorType::COUNT]> = Lazy::new(|| {
    [
        CM_H,
        CM_C,
        CM_N,
        CM_O,
        CM_S,
        FormFactor::with_hydrogens(CM_C, 1),
        FormFactor::with_hydrogens(CM_C, 2),
        FormFactor::with_hydrogens(CM_C, 3),
        FormFactor::with_hydrogens(CM_N, 1),
        FormFactor::with_hydrogens(CM_N, 2),
        FormFactor::with_hydrogens(CM_N, 3),
        FormFactor::with_hydrogens(CM_O, 1),
        FormFactor::with_hydrogens(CM_S, 1),
        CM_C,       // unknown species scatter like carbon
        CM_O,
    ]
});

/// Returns the form factor of a given species
pub fn atomic_form_factor(t: FormFactorType) -> &'static FormFactor {
    return &ATOMIC[t.index()];
}

/// average electron density of bulk water, e/A^3
pub const RHO_WATER: f64 = 0.334;

/// Conventions for building the excluded-volume form factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormFactorSet {
    /// per-species displaced volumes from the configured [`DisplacedVolumeSet`](DisplacedVolumeSet)
    Standard,
    /// the FoXS convention: per-species displaced volumes with a shared Gaussian shape
    FoXS,
    /// the CRYSOL convention: a single average displaced volume for every species
    Crysol,
}

/// displaced volumes per heavy-atom species, in A^3; hydrogens add on top
fn heavy_atom_volume(set: DisplacedVolumeSet, t: FormFactorType) -> f64 {
    // volumes of the bare heavy atoms, per reference set
    let (v_h, v_c, v_n, v_o, v_s) = match set {
        DisplacedVolumeSet::Traube => (5.15, 16.44, 2.49, 9.13, 19.86),
        DisplacedVolumeSet::VoronoiExplicitH => (5.95, 14.71, 7.01, 12.57, 24.84),
        DisplacedVolumeSet::VoronoiImplicitH => (0.0, 20.58, 13.62, 15.45, 26.53),
        DisplacedVolumeSet::MinimumFluctuationExplicitH => (6.25, 15.40, 8.21, 11.39, 22.73),
        DisplacedVolumeSet::MinimumFluctuationImplicitH => (0.0, 21.20, 14.40, 14.62, 25.11),
        DisplacedVolumeSet::VdW => (7.24, 20.58, 15.60, 14.71, 24.43),
        DisplacedVolumeSet::Standard => (5.15, 16.44, 2.49, 9.13, 19.86),
    };
    match t {
        FormFactorType::H => v_h,
        FormFactorType::C | FormFactorType::Other => v_c,
        FormFactorType::N => v_n,
        FormFactorType::O => v_o,
        FormFactorType::S => v_s,
        FormFactorType::CH => v_c + v_h,
        FormFactorType::CH2 => v_c + 2.0 * v_h,
        FormFactorType::CH3 => v_c + 3.0 * v_h,
        FormFactorType::NH => v_n + v_h,
        FormFactorType::NH2 => v_n + 2.0 * v_h,
        FormFactorType::NH3 => v_n + 3.0 * v_h,
        FormFactorType::OH => v_o + v_h,
        FormFactorType::SH => v_s + v_h,
        FormFactorType::ExcludedVolume => 0.0,
    }
}

/// Excluded-volume weights and the shared Gaussian-sphere shape function.
///
/// A dummy atom displacing a solvent volume `V` scatters with the charge `rho_water * V`
/// and the shape `exp(-q^2 V^(2/3) / 4pi)`; the table resolves both per species, following
/// the convention of the selected [`FormFactorSet`](FormFactorSet).
#[derive(Clone, Debug)]
pub struct ExvFormFactorTable {
    charges: [f64; FormFactorType::COUNT],
    mean_volume: f64,
}

impl ExvFormFactorTable {
    pub fn new(set: FormFactorSet, volumes: DisplacedVolumeSet) -> ExvFormFactorTable {
        let mut charges = [0.0; FormFactorType::COUNT];
        let mut mean_volume = 0.0;
        let heavy_species = FormFactorType::COUNT - 2;    // skip Other and ExcludedVolume for the mean
        for i in 0..FormFactorType::COUNT {
            let t = FormFactorType::from_index(i);
            let v = heavy_atom_volume(volumes, t);
            if i < heavy_species { mean_volume += v / heavy_species as f64; }
            charges[i] = RHO_WATER * v;
        }
        if set == FormFactorSet::Crysol {
            // one average displaced volume for all species
            for charge in charges.iter_mut() { *charge = RHO_WATER * mean_volume; }
        }
        ExvFormFactorTable { charges, mean_volume }
    }

    /// Displaced charge of a dummy atom standing in for a site of a given species
    #[inline(always)]
    pub fn charge(&self, t: FormFactorType) -> f64 { self.charges[t.index()] }

    /// Displaced charge for an explicitly supplied volume, e.g. of a grid cell
    pub fn charge_of_volume(volume: f64) -> f64 { RHO_WATER * volume }

    /// The Gaussian-sphere shape function, normalised to 1 at `q = 0`
    pub fn evaluate_normalized(&self, q: f64) -> f64 {
        let width = self.mean_volume.powf(2.0 / 3.0) / (4.0 * PI);
        return (-q * q * width).exp();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_factors_are_normalised_to_the_electron_count() {
        assert!((atomic_form_factor(FormFactorType::C).evaluate(0.0) - 6.0).abs() < 0.05);
        assert!((atomic_form_factor(FormFactorType::O).evaluate(0.0) - 8.0).abs() < 0.05);
        assert!((atomic_form_factor(FormFactorType::CH3).evaluate(0.0) - 9.0).abs() < 0.05);
        assert!((atomic_form_factor(FormFactorType::NH2).evaluate(0.0) - 9.0).abs() < 0.05);
    }

    #[test]
    fn form_factors_decrease_with_q() {
        for i in 0..FormFactorType::COUNT {
            let ff = atomic_form_factor(FormFactorType::from_index(i));
            let mut prev = ff.evaluate_normalized(0.0);
            assert!((prev - 1.0).abs() < 1e-12);
            for step in 1..=10 {
                let q = step as f64 * 0.1;
                let val = ff.evaluate_normalized(q);
                assert!(val < prev + 1e-12, "form factor {} not decreasing at q = {}", i, q);
                prev = val;
            }
        }
    }

    #[test]
    fn crysol_convention_averages_the_charges() {
        let table = ExvFormFactorTable::new(FormFactorSet::Crysol, DisplacedVolumeSet::Traube);
        assert!((table.charge(FormFactorType::C) - table.charge(FormFactorType::S)).abs() < 1e-12);

        let per_species = ExvFormFactorTable::new(FormFactorSet::FoXS, DisplacedVolumeSet::Traube);
        assert!(per_species.charge(FormFactorType::C) < per_species.charge(FormFactorType::S));
    }
}
