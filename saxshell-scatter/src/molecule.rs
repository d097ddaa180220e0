use log::debug;
use saxshell_pdb::{ResidueStorage, Structure};
use crate::body::Body;
use crate::composite::{CompositeHistogram, DistanceHistogram};
use crate::hydration::{HydrationGenerator, NoHydration};
use crate::managers::{create_manager, HistogramManager};
use crate::options::RuntimeOptions;
use crate::site::Water;
use crate::state::Signaller;

/// A multi-body assembly together with its hydration layer and histogram machinery.
///
/// The molecule owns its bodies for their whole lifetime. Its histogram manager is created
/// lazily on the first histogram request; at that moment every body receives a
/// [`Signaller`](Signaller) bound to the manager's state, so later mutations
/// are recomputed incrementally rather than from scratch.
pub struct Molecule {
    bodies: Vec<Body>,
    waters: Vec<Water>,
    manager: Option<Box<dyn HistogramManager>>,
    hydration_signal: Signaller,
    hydration: Box<dyn HydrationGenerator>,
    options: RuntimeOptions,
}

impl Molecule {
    /// Creates a molecule owning the given bodies
    pub fn from_bodies(bodies: Vec<Body>, options: RuntimeOptions) -> Molecule {
        Molecule {
            bodies,
            waters: Vec::new(),
            manager: None,
            hydration_signal: Signaller::unbound(),
            hydration: Box::new(NoHydration),
            options,
        }
    }

    /// Creates a single-body molecule from a loaded structure; crystallographic waters
    /// become hydration sites
    pub fn from_structure(strctr: &Structure, residues: &mut ResidueStorage, options: RuntimeOptions) -> Molecule {
        let implicit = options.molecule.implicit_hydrogens;
        let body = Body::from_structure(strctr, residues, implicit);
        let waters: Vec<Water> = strctr.waters().iter().map(|a| Water::from_pdb_atom(a)).collect();
        debug!("molecule built from structure: {} atoms, {} waters", body.len(), waters.len());
        let mut molecule = Molecule::from_bodies(vec![body], options);
        molecule.waters = waters;
        return molecule;
    }

    /// The bodies of this molecule
    pub fn bodies(&self) -> &[Body] { &self.bodies }

    /// One body of this molecule
    pub fn body(&self, i: usize) -> &Body { &self.bodies[i] }

    /// Mutable access to one body; the body itself signals whatever is done to it
    pub fn body_mut(&mut self, i: usize) -> &mut Body { &mut self.bodies[i] }

    /// Mutable access to all bodies; each body signals whatever is done to it
    pub fn bodies_mut(&mut self) -> &mut [Body] { &mut self.bodies }

    /// Number of bodies
    pub fn body_count(&self) -> usize { self.bodies.len() }

    /// Total number of atoms over all bodies
    pub fn atom_count(&self) -> usize {
        return self.bodies.iter().map(|b| b.len()).sum();
    }

    /// The current hydration layer
    pub fn waters(&self) -> &[Water] { &self.waters }

    /// Replaces the hydration layer; the change is signalled
    pub fn set_waters(&mut self, waters: Vec<Water>) {
        self.waters = waters;
        self.hydration_signal.external_change();
    }

    /// Installs a hydration generator used by [`generate_hydration`](Molecule::generate_hydration)
    pub fn set_hydration_generator(&mut self, generator: Box<dyn HydrationGenerator>) {
        self.hydration = generator;
    }

    /// Rebuilds the hydration layer for the current configuration
    pub fn generate_hydration(&mut self) {
        self.waters = self.hydration.generate(&self.bodies);
        self.hydration_signal.external_change();
    }

    /// Marks the hydration layer as modified without replacing it
    pub fn signal_modified_hydration(&self) {
        self.hydration_signal.external_change();
    }

    fn ensure_manager(&mut self) {
        if self.manager.is_some() { return; }
        let mut manager = create_manager(&self.options, self.bodies.len());
        {
            let state = manager.state_manager();
            for (i, body) in self.bodies.iter_mut().enumerate() {
                body.set_signaller(state.probe(i));
            }
            self.hydration_signal = state.hydration_probe();
        }
        self.manager = Some(manager);
    }

    /// The total distance histogram of the current configuration
    pub fn histogram(&mut self) -> DistanceHistogram {
        self.ensure_manager();
        let manager = self.manager.as_mut().unwrap();
        return manager.calculate(&self.bodies, &self.waters);
    }

    /// The {atom-atom, atom-water, water-water} decomposition of the current configuration
    pub fn histogram_all(&mut self) -> Box<dyn CompositeHistogram> {
        self.ensure_manager();
        let manager = self.manager.as_mut().unwrap();
        return manager.calculate_all(&self.bodies, &self.waters);
    }

    /// Removes a body from this molecule; the body becomes quiescent and the histogram
    /// machinery is rebuilt on the next request
    pub fn take_body(&mut self, i: usize) -> Body {
        let mut body = self.bodies.remove(i);
        body.set_signaller(Signaller::unbound());
        self.manager = None;
        for b in self.bodies.iter_mut() { b.set_signaller(Signaller::unbound()); }
        self.hydration_signal = Signaller::unbound();
        return body;
    }

    /// The options this molecule was configured with
    pub fn options(&self) -> &RuntimeOptions { &self.options }
}
