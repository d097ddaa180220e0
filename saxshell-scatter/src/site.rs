use saxshell_pdb::calc::Vec3;
use saxshell_pdb::{Element, PdbAtom, ResidueStorage};
use crate::form_factor::FormFactorType;

/// effective charge of a hydration-site water, oxygen plus its two hydrogens
pub(crate) const WATER_CHARGE: f64 = 10.0;

/// A scattering site of the macromolecule.
///
/// The `weight` is the effective atomic charge (electron count, with implicit hydrogens
/// folded in when so configured) multiplied by the crystallographic occupancy.
/// Element, name and serial survive from the source record so that constraints can be
/// validated and structures written back.
#[derive(Clone, Debug)]
pub struct Atom {
    pub pos: Vec3,
    pub weight: f64,
    pub ff_type: FormFactorType,
    pub element: Element,
    pub name: String,
    pub serial: i32,
}

impl Atom {
    /// Creates a site directly from coordinates, charge and element; the species tag
    /// is derived from the bare element.
    pub fn from_coordinates(pos: Vec3, weight: f64, element: Element) -> Atom {
        Atom {
            pos,
            weight,
            ff_type: FormFactorType::from_element(element, 0),
            element,
            name: String::new(),
            serial: 0,
        }
    }

    /// Creates a site from a PDB record, resolving implicit hydrogens through a residue storage.
    pub fn from_pdb_atom(atom: &PdbAtom, residues: &mut ResidueStorage, implicit_hydrogens: bool) -> Atom {
        let hydrogens = if implicit_hydrogens {
            residues.hydrogens(&atom.res_name, atom.name.trim())
        } else { 0 };
        let charge = (atom.element.atomic_number() + hydrogens) as f64;
        Atom {
            pos: atom.pos.clone(),
            weight: charge * atom.occupancy,
            ff_type: FormFactorType::from_element(atom.element, hydrogens),
            element: atom.element,
            name: atom.name.trim().to_string(),
            serial: atom.serial,
        }
    }
}

/// A hydration-layer site, scattering as a full water molecule located on its oxygen.
#[derive(Clone, Debug)]
pub struct Water {
    pub pos: Vec3,
    pub weight: f64,
}

impl Water {
    /// Creates a hydration site of full occupancy at a given position
    pub fn new(pos: Vec3) -> Water {
        Water { pos, weight: WATER_CHARGE }
    }

    /// Creates a hydration site from a `HETATM` water record
    pub fn from_pdb_atom(atom: &PdbAtom) -> Water {
        Water { pos: atom.pos.clone(), weight: WATER_CHARGE * atom.occupancy }
    }
}
