use std::fmt::{Display, Formatter};
use crate::calc::Vec3;
use crate::{Element, PDBError};
use crate::PDBError::{FieldParsingError, InvalidRecordFormat};

/// Atom record as found in a single line of a PDB file.
///
/// The struct holds all data parsed from an
/// [`ATOM`](https://www.wwpdb.org/documentation/file-format-content/format33/sect9.html#ATOM)
/// or [`HETATM`](https://www.wwpdb.org/documentation/file-format-content/format33/sect9.html#HETATM) line.
///
/// # Examples
///```rust
/// use saxshell_pdb::PdbAtom;
/// let pdb_line = "ATOM    320  CA  PHE A  43      16.101   9.057  19.587  1.00 18.18           C";
/// let a = PdbAtom::from_atom_line(pdb_line).unwrap();
/// assert_eq!(a.name.as_str(), " CA ");
/// assert_eq!(a.res_name.as_str(), "PHE");
/// assert_eq!(a.is_hetero_atom, false);
/// assert_eq!(a.element, saxshell_pdb::Element::C);
///```
#[derive(Clone, Debug)]
pub struct PdbAtom {
    pub serial: i32,
    pub name: String,
    pub alt_loc: char,
    pub res_name: String,
    pub chain_id: String,
    pub res_seq: i32,
    pub i_code: char,
    pub pos: Vec3,
    pub occupancy: f64,
    pub temp_factor: f64,
    pub element: Element,
    pub is_hetero_atom: bool,
}

impl PdbAtom {
    /// Returns a default atom.
    ///
    /// By default, an atom is set to alpha-carbon of `ALA1` residue in chain "A", located at `[0,0,0]`
    pub fn new() -> PdbAtom {
        PdbAtom {
            serial: 1,
            name: String::from(" CA "),
            alt_loc: ' ',
            res_name: String::from("ALA"),
            chain_id: String::from("A"),
            res_seq: 1,
            i_code: ' ',
            pos: Vec3::from_float(0.0),
            occupancy: 1.0,
            temp_factor: 0.0,
            element: Element::C,
            is_hetero_atom: false,
        }
    }

    /// Creates a [`PdbAtom`] by parsing an `ATOM` or `HETATM` record of a PDB file.
    ///
    /// The method automatically sets the [`PdbAtom::is_hetero_atom`](PdbAtom::is_hetero_atom) flag
    /// based on the record type. When the element columns are missing, the element is guessed
    /// from the atom name.
    pub fn from_atom_line(pdb_line: &str) -> Result<PdbAtom, PDBError> {
        if pdb_line.len() < 54 {
            return Err(InvalidRecordFormat { line: pdb_line.to_string() });
        }
        let serial = pdb_line[6..11].trim().parse::<i32>()
            .map_err(|_| FieldParsingError { field: "serial", value: pdb_line[6..11].to_string() })?;
        let name = pdb_line[12..16].to_string();
        let alt_loc = pdb_line[16..17].chars().next().unwrap();
        let res_name = pdb_line[17..20].to_string();
        let chain_id = pdb_line[21..22].to_string();
        let res_seq = pdb_line[22..26].trim().parse::<i32>()
            .map_err(|_| FieldParsingError { field: "residue id", value: pdb_line[22..26].to_string() })?;
        let i_code = pdb_line[26..27].chars().next().unwrap();
        let pos = Vec3::from_pdb_columns(pdb_line)
            .ok_or(InvalidRecordFormat { line: pdb_line.to_string() })?;
        let occupancy = pdb_line.get(54..60)
            .and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(1.0);
        let temp_factor = pdb_line.get(60..66)
            .and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(0.0);
        let element = match pdb_line.get(76..78) {
            Some(symbol) if !symbol.trim().is_empty() => Element::from_symbol(symbol),
            _ => Element::from_atom_name(&name),
        };
        return Ok(PdbAtom {
            serial,
            name,
            alt_loc,
            res_name,
            chain_id,
            res_seq,
            i_code,
            pos,
            occupancy,
            temp_factor,
            element,
            is_hetero_atom: pdb_line.starts_with("HETATM"),
        });
    }

    /// Says whether this atom belongs to a water molecule
    pub fn is_water(&self) -> bool {
        return self.res_name == "HOH" || self.res_name == "WAT";
    }
}

impl Display for PdbAtom {
    /// Formats this atom back into a PDB `ATOM` or `HETATM` record line
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let record = if self.is_hetero_atom { "HETATM" } else { "ATOM  " };
        write!(
            f,
            "{}{:>5} {:<4}{}{:<3} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
            record, self.serial, self.name, self.alt_loc, self.res_name, self.chain_id,
            self.res_seq, self.i_code, self.pos.x, self.pos.y, self.pos.z,
            self.occupancy, self.temp_factor, self.element
        )
    }
}
