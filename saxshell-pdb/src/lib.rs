//! Minimal library for loading, writing and transforming biomacromolecular structures.
//!
//! # Loading a PDB deposit
//! A structure stored in the PDB file format can be directly loaded into a [`Structure`](Structure) struct:
//!
//!```no_run
//! use saxshell_pdb::load_pdb;
//! # fn main() -> Result<(), saxshell_pdb::PDBError> {
//! let strctr = load_pdb("lysozyme.pdb")?;
//! # Ok(())
//! # }
//!```
//! Once successfully loaded, it provides access to the atoms parsed from `ATOM` and `HETATM`
//! records. The vector of atoms may be processed with any Rust [`Iterator`](std::iter::Iterator)
//! method; water molecules can be separated from the macromolecule with
//! [`Structure::waters()`](Structure::waters).
//!
//! # Structural calculations
//! The [`calc`](crate::calc) module provides the [`Vec3`](calc::Vec3) type used throughout the
//! saxshell packages together with rotation utilities.

#![allow(clippy::needless_return)]
mod pdb_atom;
mod structure;
mod load_pdb;
mod pdb_parsing_error;
mod element;
mod residues;
mod assertions;

pub mod calc;

pub use pdb_atom::PdbAtom;
pub use structure::Structure;
pub use load_pdb::{load_pdb, load_pdb_reader, write_pdb, write_pdb_to, is_pdb_file};
pub use pdb_parsing_error::PDBError;
pub use element::Element;
pub use residues::{ResidueStorage, ResidueMap};
