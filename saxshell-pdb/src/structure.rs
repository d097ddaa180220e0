use std::collections::HashSet;
use itertools::Itertools;
use crate::PdbAtom;

/// Ordered collection of atoms parsed from a PDB-formatted deposit.
///
/// # Examples
/// ```
/// use saxshell_pdb::{PdbAtom, Structure};
/// let lines = [
///     "ATOM    514  CA  MET A  60      26.532  28.200  28.365  1.00 17.85           C",
///     "ATOM    515  CA  CYS A  61      25.790  28.757  29.513  1.00 16.12           C",
/// ];
/// let atoms: Vec<PdbAtom> = lines.iter().map(|l| PdbAtom::from_atom_line(l).unwrap()).collect();
/// let strctr = Structure::from_iterator(atoms.iter());
/// assert_eq!(strctr.count_atoms(), 2);
/// assert_eq!(strctr.count_chains(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Structure {
    /// all atoms of this structure, in the order of their appearance in the source file
    pub atoms: Vec<PdbAtom>,
}

impl Structure {
    /// Creates an empty structure
    pub fn new() -> Structure {
        Structure { atoms: Vec::new() }
    }

    /// Creates a structure by cloning atoms provided by an iterator
    pub fn from_iterator<'a, I: Iterator<Item = &'a PdbAtom>>(atoms: I) -> Structure {
        Structure { atoms: atoms.cloned().collect() }
    }

    /// Counts all atoms of this structure
    pub fn count_atoms(&self) -> usize { self.atoms.len() }

    /// Counts distinct residues of this structure
    pub fn count_residues(&self) -> usize {
        let mut seen: HashSet<(String, i32, char)> = HashSet::new();
        for a in &self.atoms {
            seen.insert((a.chain_id.clone(), a.res_seq, a.i_code));
        }
        return seen.len();
    }

    /// Counts distinct chains of this structure
    pub fn count_chains(&self) -> usize {
        let mut seen: HashSet<&str> = HashSet::new();
        for a in &self.atoms {
            seen.insert(a.chain_id.as_str());
        }
        return seen.len();
    }

    /// Returns identifiers of all chains, in the order of their appearance
    pub fn chain_ids(&self) -> Vec<String> {
        return self.atoms.iter().map(|a| a.chain_id.clone()).unique().collect();
    }

    /// Returns the non-water atoms of this structure
    pub fn macromolecule_atoms(&self) -> Vec<&PdbAtom> {
        return self.atoms.iter().filter(|a| !a.is_water()).collect();
    }

    /// Returns the water (`HOH`) atoms of this structure
    pub fn waters(&self) -> Vec<&PdbAtom> {
        return self.atoms.iter().filter(|a| a.is_water()).collect();
    }

    /// Returns atoms of a given chain
    pub fn chain_atoms(&self, chain_id: &str) -> Vec<&PdbAtom> {
        return self.atoms.iter().filter(|a| a.chain_id == chain_id).collect();
    }
}
