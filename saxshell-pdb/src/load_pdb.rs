use std::io::{BufRead, Write};
use std::time::Instant;
use log::debug;
use saxshell_io::{open_file, out_writer};
use crate::{PdbAtom, PDBError, Structure};

/// Says whether a given file looks like a PDB-formatted deposit.
///
/// The check is based on the first record type found in the file.
pub fn is_pdb_file(file_name: &str) -> Result<bool, PDBError> {
    let reader = open_file(file_name)?;
    for line in reader.lines() {
        let line = line?;
        if line.len() < 6 { continue; }
        let record = line[0..6].trim();
        match record {
            "HEADER" | "TITLE" | "REMARK" | "ATOM" | "HETATM" | "MODEL" | "EXPDTA" | "SEQRES" | "CRYST1" => return Ok(true),
            _ => return Ok(false),
        }
    }
    return Ok(false);
}

/// Reads a [`Structure`](Structure) from a PDB-formatted file.
///
/// Only `ATOM` and `HETATM` records are parsed; in a multi-model deposit only the first
/// model is loaded. The file may be gzipped.
pub fn load_pdb(file_name: &str) -> Result<Structure, PDBError> {
    let reader = open_file(file_name)?;
    let start = Instant::now();
    let strctr = load_pdb_reader(reader)?;
    debug!("Structure loaded from {} in {:?}; {} atoms", file_name, start.elapsed(), strctr.count_atoms());
    return Ok(strctr);
}

/// Reads PDB-formatted content from a buffer.
///
/// # Example
/// ```
/// use saxshell_pdb::load_pdb_reader;
/// use std::io::BufReader;
/// let pdb_txt: &str =
/// "ATOM      2  CA  MET A   1     -13.296   0.028   3.924  1.00  0.43           C
/// ATOM     21  CA  THR A   2      -9.669  -0.447   4.998  1.00  0.19           C";
/// let strctr = load_pdb_reader(BufReader::new(pdb_txt.as_bytes())).unwrap();
/// assert_eq!(strctr.count_atoms(), 2);
/// ```
pub fn load_pdb_reader<R: BufRead>(reader: R) -> Result<Structure, PDBError> {
    let mut strctr = Structure::new();
    let mut model_id = 0;
    for line in reader.lines() {
        let line = line?;
        if line.len() < 6 { continue; }
        let record = line[0..6].trim();
        match record {
            "MODEL" => {
                model_id += 1;
                if model_id > 1 { break; }      // only the first model is used
            }
            "ENDMDL" => { break; }
            "ATOM" | "HETATM" => {
                strctr.atoms.push(PdbAtom::from_atom_line(&line)?);
            }
            _ => {}
        }
    }
    return Ok(strctr);
}

/// Writes a [`Structure`](Structure) in the PDB format.
///
/// Atoms are renumbered consecutively starting from 1.
pub fn write_pdb(strctr: &Structure, out_fname: &str) -> Result<(), PDBError> {
    let mut writer = out_writer(out_fname, false);
    write_pdb_to(strctr, &mut writer)
}

/// Writes a [`Structure`](Structure) in the PDB format to an opened writer.
pub fn write_pdb_to(strctr: &Structure, writer: &mut Box<dyn Write>) -> Result<(), PDBError> {
    for (i, atom) in strctr.atoms.iter().enumerate() {
        let mut a = atom.clone();
        a.serial = (i + 1) as i32;
        writeln!(writer, "{}", a)?;
    }
    writeln!(writer, "END")?;
    return Ok(());
}
