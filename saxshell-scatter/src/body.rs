use std::sync::atomic::{AtomicU32, Ordering};
use saxshell_pdb::calc::{Rototranslation, Vec3};
use saxshell_pdb::{ResidueStorage, Structure};
use crate::site::Atom;
use crate::state::Signaller;
use crate::symmetry::Symmetry;

static BODY_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A rigid group of atoms in a multi-body assembly.
///
/// Every body carries a process-unique identifier that never changes once the body has been
/// inserted into a [`Molecule`](crate::Molecule), and a [`Signaller`](Signaller) handle through
/// which all mutating operations announce themselves to whatever histogram manager observes
/// the molecule.
///
/// # Examples
/// ```
/// use saxshell_scatter::{Atom, Body};
/// use saxshell_pdb::calc::Vec3;
/// use saxshell_pdb::Element;
/// let atoms = vec![Atom::from_coordinates(Vec3::new(0.0, 0.0, 0.0), 6.0, Element::C)];
/// let mut body = Body::from_atoms(atoms);
/// body.translate(&Vec3::new(1.0, 0.0, 0.0));
/// assert!((body.atoms()[0].pos.x - 1.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct Body {
    id: u32,
    atoms: Vec<Atom>,
    signaller: Signaller,
    symmetries: Vec<Symmetry>,
}

impl Body {
    /// Creates a body from its atoms; a fresh identifier is assigned
    pub fn from_atoms(atoms: Vec<Atom>) -> Body {
        Body {
            id: BODY_COUNTER.fetch_add(1, Ordering::Relaxed),
            atoms,
            signaller: Signaller::unbound(),
            symmetries: Vec::new(),
        }
    }

    /// Creates a body from the non-water atoms of a structure
    pub fn from_structure(strctr: &Structure, residues: &mut ResidueStorage, implicit_hydrogens: bool) -> Body {
        let atoms = strctr.atoms.iter()
            .filter(|a| !a.is_water())
            .map(|a| Atom::from_pdb_atom(a, residues, implicit_hydrogens))
            .collect();
        return Body::from_atoms(atoms);
    }

    /// The stable identifier of this body
    pub fn id(&self) -> u32 { self.id }

    /// All atoms of this body
    pub fn atoms(&self) -> &[Atom] { &self.atoms }

    /// A single atom of this body
    pub fn atom(&self, i: usize) -> &Atom { &self.atoms[i] }

    /// Number of atoms of this body
    pub fn len(&self) -> usize { self.atoms.len() }

    pub fn is_empty(&self) -> bool { self.atoms.is_empty() }

    /// Geometric centre weighted by the site charges
    pub fn center_of_mass(&self) -> Vec3 {
        let mut cm = Vec3::from_float(0.0);
        let mut total = 0.0;
        for a in &self.atoms {
            let mut p = a.pos.clone();
            p *= a.weight;
            cm += &p;
            total += a.weight;
        }
        if total > 0.0 { cm /= total; }
        return cm;
    }

    /// Shifts every atom of this body; the change is signalled
    pub fn translate(&mut self, shift: &Vec3) {
        for a in self.atoms.iter_mut() { a.pos += shift; }
        self.signaller.external_change();
    }

    /// Applies a rototranslation to every atom of this body; the change is signalled
    pub fn transform(&mut self, transform: &Rototranslation) {
        for a in self.atoms.iter_mut() { transform.apply_mut(&mut a.pos); }
        self.signaller.external_change();
    }

    /// Applies the inverse of a rototranslation to every atom; the change is signalled.
    ///
    /// Undoes a previous [`transform`](Body::transform) with the same operation.
    pub fn transform_inverse(&mut self, transform: &Rototranslation) {
        for a in self.atoms.iter_mut() { transform.apply_inverse_mut(&mut a.pos); }
        self.signaller.external_change();
    }

    /// Rotates this body about its centre of mass; the change is signalled
    pub fn rotate(&mut self, angles: &Vec3) {
        let cm = self.center_of_mass();
        let transform = Rototranslation::from_euler_angles(&cm, angles, &Vec3::from_float(0.0));
        self.transform(&transform);
    }

    /// Symmetry operations attached to this body
    pub fn symmetries(&self) -> &[Symmetry] { &self.symmetries }

    /// Attaches a symmetry operation; the change is signalled as internal
    pub fn add_symmetry(&mut self, symmetry: Symmetry) {
        self.symmetries.push(symmetry);
        self.signaller.internal_change();
    }

    /// Installs the change-notification handle this body reports through.
    ///
    /// Swapping the handle is how a molecule connects the body to its histogram manager,
    /// and how a body transferred out of any molecule becomes quiescent.
    pub fn set_signaller(&mut self, signaller: Signaller) {
        self.signaller = signaller;
    }

    /// The handle this body currently reports through
    pub fn signaller(&self) -> &Signaller { &self.signaller }
}

impl PartialEq for Body {
    /// Bodies are compared by identity, not by content
    fn eq(&self, other: &Body) -> bool { self.id == other.id }
}
