//! Change-propagation substrate between bodies and histogram managers.
//!
//! A [`StateManager`](StateManager) keeps one externally-modified and one internally-modified
//! bit per body, plus a single hydration bit. Bodies never see the manager itself; they hold a
//! [`Signaller`](Signaller) handle whose invocation flips the right bit. Handles share the flag
//! storage, so they stay valid observers without extending anyone's lifetime, and a body
//! removed from its molecule is made quiescent simply by swapping in an unbound handle.

use std::sync::{Arc, Mutex};

#[derive(Debug)]
struct StateFlags {
    externally_modified: Vec<bool>,
    internally_modified: Vec<bool>,
    modified_hydration: bool,
}

/// Tracks which bodies of a molecule changed since the histogram manager last ran.
///
/// A freshly created manager reports everything as modified, so the first `calculate()`
/// call computes every block.
///
/// # Examples
/// ```
/// use saxshell_scatter::state::StateManager;
/// let mut manager = StateManager::new(3);
/// assert_eq!(manager.externally_modified_bodies(), vec![true, true, true]);
/// manager.reset_to_false();
/// manager.probe(1).external_change();
/// assert_eq!(manager.externally_modified_bodies(), vec![false, true, false]);
/// assert!(!manager.is_modified_hydration());
/// ```
pub struct StateManager {
    flags: Arc<Mutex<StateFlags>>,
    size: usize,
}

impl StateManager {
    /// Creates a manager for a given number of bodies, with every bit raised
    pub fn new(size: usize) -> StateManager {
        StateManager {
            flags: Arc::new(Mutex::new(StateFlags {
                externally_modified: vec![true; size],
                internally_modified: vec![true; size],
                modified_hydration: true,
            })),
            size,
        }
    }

    /// Number of bodies this manager observes
    pub fn size(&self) -> usize { self.size }

    /// A handle that marks the body of a given index as modified when invoked
    pub fn probe(&self, index: usize) -> Signaller {
        assert!(index < self.size, "probe index {} out of range for {} bodies", index, self.size);
        Signaller(SignallerKind::Bound { flags: Arc::clone(&self.flags), index })
    }

    /// A handle that marks the hydration layer as modified when invoked
    pub fn hydration_probe(&self) -> Signaller {
        Signaller(SignallerKind::BoundHydration { flags: Arc::clone(&self.flags) })
    }

    /// Marks a single body as externally modified
    pub fn externally_modified(&mut self, index: usize) {
        self.flags.lock().unwrap().externally_modified[index] = true;
    }

    /// Marks every body as externally modified
    pub fn externally_modified_all(&mut self) {
        self.flags.lock().unwrap().externally_modified.iter_mut().for_each(|b| *b = true);
    }

    /// Marks every body as internally modified
    pub fn internally_modified_all(&mut self) {
        self.flags.lock().unwrap().internally_modified.iter_mut().for_each(|b| *b = true);
    }

    /// Marks the hydration layer as modified
    pub fn modified_hydration_layer(&mut self) {
        self.flags.lock().unwrap().modified_hydration = true;
    }

    pub fn is_externally_modified(&self, index: usize) -> bool {
        return self.flags.lock().unwrap().externally_modified[index];
    }

    pub fn is_internally_modified(&self, index: usize) -> bool {
        return self.flags.lock().unwrap().internally_modified[index];
    }

    pub fn is_modified_hydration(&self) -> bool {
        return self.flags.lock().unwrap().modified_hydration;
    }

    /// The externally-modified bits of all bodies
    pub fn externally_modified_bodies(&self) -> Vec<bool> {
        return self.flags.lock().unwrap().externally_modified.clone();
    }

    /// The internally-modified bits of all bodies
    pub fn internally_modified_bodies(&self) -> Vec<bool> {
        return self.flags.lock().unwrap().internally_modified.clone();
    }

    /// Lowers every bit; called by a manager once the new master histogram is complete
    pub fn reset_to_false(&mut self) {
        let mut flags = self.flags.lock().unwrap();
        flags.externally_modified.iter_mut().for_each(|b| *b = false);
        flags.internally_modified.iter_mut().for_each(|b| *b = false);
        flags.modified_hydration = false;
    }
}

#[derive(Clone, Debug)]
enum SignallerKind {
    Bound { flags: Arc<Mutex<StateFlags>>, index: usize },
    BoundHydration { flags: Arc<Mutex<StateFlags>> },
    Unbound,
}

/// The change-notification handle a [`Body`](crate::Body) invokes on mutation.
///
/// From the body's perspective the handle is opaque: a bound handle flips a bit in the
/// state manager that issued it, an unbound one does nothing. Handles may be swapped
/// freely without the body noticing, which is how a body changes hands between molecules.
#[derive(Clone, Debug)]
pub struct Signaller(SignallerKind);

impl Signaller {
    /// A no-op handle for bodies not attached to any manager
    pub fn unbound() -> Signaller { Signaller(SignallerKind::Unbound) }

    /// Reports that the observed object moved in space
    pub fn external_change(&self) {
        match &self.0 {
            SignallerKind::Bound { flags, index } => {
                flags.lock().unwrap().externally_modified[*index] = true;
            }
            SignallerKind::BoundHydration { flags } => {
                flags.lock().unwrap().modified_hydration = true;
            }
            SignallerKind::Unbound => {}
        }
    }

    /// Reports that the observed object changed its internal composition
    pub fn internal_change(&self) {
        match &self.0 {
            SignallerKind::Bound { flags, index } => {
                let mut flags = flags.lock().unwrap();
                flags.internally_modified[*index] = true;
                flags.externally_modified[*index] = true;
            }
            SignallerKind::BoundHydration { flags } => {
                flags.lock().unwrap().modified_hydration = true;
            }
            SignallerKind::Unbound => {}
        }
    }
}
