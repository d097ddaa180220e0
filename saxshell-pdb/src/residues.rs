use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use saxshell_io::split_into_tokens;
use crate::Element;

/// Maps an atom name to the number of its implicit hydrogens.
pub type ResidueMap = HashMap<String, u32>;

/// A persistent lookup of implicit hydrogen counts, keyed by residue name.
///
/// The storage starts from a built-in basis covering the standard amino acids and water.
/// When an unknown residue is requested, its chemical component definition is downloaded
/// from the wwPDB ligand server and parsed; the result is merged into an on-disk JSON cache
/// so subsequent runs do not repeat the download. When the definition cannot be obtained,
/// a zero-hydrogen fallback is used and a warning is logged; the pipeline never aborts
/// on an unknown residue.
///
/// # Examples
/// ```
/// use saxshell_pdb::ResidueStorage;
/// let mut storage = ResidueStorage::offline();
/// assert_eq!(storage.hydrogens("ALA", "CB"), 3);
/// assert_eq!(storage.hydrogens("ALA", "O"), 0);
/// ```
pub struct ResidueStorage {
    data: HashMap<String, ResidueMap>,
    cache_file: Option<PathBuf>,
    offline: bool,
    initialized: bool,
}

/// hydrogen counts for the standard amino acids and water; only atoms with at least one
/// hydrogen are listed
const BUILTIN_BASIS: &[(&str, &[(&str, u32)])] = &[
    ("ALA", &[("N", 1), ("CA", 1), ("CB", 3)]),
    ("ARG", &[("N", 1), ("CA", 1), ("CB", 2), ("CG", 2), ("CD", 2), ("NE", 1), ("NH1", 2), ("NH2", 2)]),
    ("ASN", &[("N", 1), ("CA", 1), ("CB", 2), ("ND2", 2)]),
    ("ASP", &[("N", 1), ("CA", 1), ("CB", 2)]),
    ("CYS", &[("N", 1), ("CA", 1), ("CB", 2), ("SG", 1)]),
    ("GLN", &[("N", 1), ("CA", 1), ("CB", 2), ("CG", 2), ("NE2", 2)]),
    ("GLU", &[("N", 1), ("CA", 1), ("CB", 2), ("CG", 2)]),
    ("GLY", &[("N", 1), ("CA", 2)]),
    ("HIS", &[("N", 1), ("CA", 1), ("CB", 2), ("ND1", 1), ("CD2", 1), ("CE1", 1)]),
    ("ILE", &[("N", 1), ("CA", 1), ("CB", 1), ("CG1", 2), ("CG2", 3), ("CD1", 3)]),
    ("LEU", &[("N", 1), ("CA", 1), ("CB", 2), ("CG", 1), ("CD1", 3), ("CD2", 3)]),
    ("LYS", &[("N", 1), ("CA", 1), ("CB", 2), ("CG", 2), ("CD", 2), ("CE", 2), ("NZ", 3)]),
    ("MET", &[("N", 1), ("CA", 1), ("CB", 2), ("CG", 2), ("CE", 3)]),
    ("PHE", &[("N", 1), ("CA", 1), ("CB", 2), ("CD1", 1), ("CD2", 1), ("CE1", 1), ("CE2", 1), ("CZ", 1)]),
    ("PRO", &[("CA", 1), ("CB", 2), ("CG", 2), ("CD", 2)]),
    ("SER", &[("N", 1), ("CA", 1), ("CB", 2), ("OG", 1)]),
    ("THR", &[("N", 1), ("CA", 1), ("CB", 1), ("OG1", 1), ("CG2", 3)]),
    ("TRP", &[("N", 1), ("CA", 1), ("CB", 2), ("CD1", 1), ("NE1", 1), ("CE3", 1), ("CZ2", 1), ("CZ3", 1), ("CH2", 1)]),
    ("TYR", &[("N", 1), ("CA", 1), ("CB", 2), ("CD1", 1), ("CD2", 1), ("CE1", 1), ("CE2", 1), ("OH", 1)]),
    ("VAL", &[("N", 1), ("CA", 1), ("CB", 1), ("CG1", 3), ("CG2", 3)]),
    ("HOH", &[("O", 2)]),
];

const LIGAND_URL: &str = "https://files.rcsb.org/ligands/view";

/// the built-in basis, expanded into maps once per process
static BUILTIN: Lazy<HashMap<String, ResidueMap>> = Lazy::new(|| {
    BUILTIN_BASIS.iter()
        .map(|(name, atoms)| {
            let map: ResidueMap = atoms.iter().map(|(a, n)| (a.to_string(), *n)).collect();
            (name.to_string(), map)
        })
        .collect()
});

impl ResidueStorage {
    /// Creates a storage backed by a JSON cache file kept in a given folder.
    pub fn new(cache_folder: &str) -> ResidueStorage {
        ResidueStorage {
            data: HashMap::new(),
            cache_file: Some(Path::new(cache_folder).join("residues.json")),
            offline: false,
            initialized: false,
        }
    }

    /// Creates a storage that never attempts to download residue definitions.
    pub fn offline() -> ResidueStorage {
        ResidueStorage { data: HashMap::new(), cache_file: None, offline: true, initialized: false }
    }

    /// Inserts (or replaces) the hydrogen-count map for a given residue.
    pub fn insert(&mut self, name: &str, map: ResidueMap) {
        self.data.insert(name.to_string(), map);
    }

    /// Says whether this storage already holds a definition for a given residue.
    pub fn contains(&mut self, name: &str) -> bool {
        if !self.initialized { self.initialize(); }
        return self.data.contains_key(name);
    }

    /// Returns the number of implicit hydrogens bonded to a given atom of a given residue.
    ///
    /// An unknown residue triggers a single download attempt; on failure zero is returned.
    pub fn hydrogens(&mut self, res_name: &str, atom_name: &str) -> u32 {
        if !self.initialized { self.initialize(); }
        let res_name = res_name.trim();
        if !self.data.contains_key(res_name) {
            if !self.fetch(res_name) {
                warn!("unknown residue '{}'; assuming no implicit hydrogens", res_name);
                self.data.insert(res_name.to_string(), ResidueMap::new());
            }
        }
        return *self.data[res_name].get(atom_name.trim()).unwrap_or(&0);
    }

    fn initialize(&mut self) {
        self.initialized = true;
        self.data.extend(BUILTIN.iter().map(|(k, v)| (k.clone(), v.clone())));
        if let Some(cache) = &self.cache_file {
            if let Ok(text) = fs::read_to_string(cache) {
                match serde_json::from_str::<HashMap<String, ResidueMap>>(&text) {
                    Ok(cached) => {
                        debug!("{} residue definitions loaded from {:?}", cached.len(), cache);
                        self.data.extend(cached);
                    }
                    Err(e) => warn!("can't parse the residue cache {:?}: {}; it will be rebuilt", cache, e),
                }
            }
        }
    }

    /// Attempts to download and parse a chemical component definition; returns true on success.
    fn fetch(&mut self, name: &str) -> bool {
        if self.offline { return false; }
        if name.is_empty() || name.len() > 3 || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            warn!("'{}' is not a valid residue code", name);
            return false;
        }

        info!("unknown residue '{}'; downloading its definition", name);
        let url = format!("{}/{}.cif", LIGAND_URL, name.to_uppercase());
        let text = match reqwest::blocking::get(&url).and_then(|r| r.error_for_status()).and_then(|r| r.text()) {
            Ok(text) => text,
            Err(e) => {
                warn!("download of {} failed: {}", url, e);
                return false;
            }
        };

        match parse_component_cif(&text) {
            Some(map) => {
                self.data.insert(name.to_string(), map);
                self.save_cache(name);
                true
            }
            None => {
                warn!("can't parse the component definition for '{}'", name);
                false
            }
        }
    }

    /// Appends a freshly downloaded residue to the JSON cache.
    fn save_cache(&self, name: &str) {
        let Some(cache) = &self.cache_file else { return; };
        if let Some(parent) = cache.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("can't create the residue cache folder {:?}: {}", parent, e);
                return;
            }
        }
        let mut cached: HashMap<String, ResidueMap> = fs::read_to_string(cache).ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();
        cached.insert(name.to_string(), self.data[name].clone());
        match serde_json::to_string_pretty(&cached) {
            Ok(text) => {
                if let Err(e) = fs::write(cache, text) { warn!("can't write the residue cache: {}", e); }
            }
            Err(e) => warn!("can't serialize the residue cache: {}", e),
        }
    }
}

/// Parses the `_chem_comp_atom` and `_chem_comp_bond` loops of a chemical component
/// definition and counts the hydrogens bonded to every heavy atom.
pub(crate) fn parse_component_cif(text: &str) -> Option<ResidueMap> {
    let mut elements: HashMap<String, Element> = HashMap::new();
    let mut bonds: Vec<(String, String)> = Vec::new();

    let mut lines = text.lines().peekable();
    while let Some(line) = lines.next() {
        if line.trim() != "loop_" { continue; }

        // collect the column names of this loop
        let mut columns: Vec<String> = Vec::new();
        while let Some(peeked) = lines.peek() {
            let trimmed = peeked.trim();
            if trimmed.starts_with('_') {
                columns.push(trimmed.to_string());
                lines.next();
            } else { break; }
        }

        let is_atoms = columns.iter().any(|c| c.starts_with("_chem_comp_atom."));
        let is_bonds = columns.iter().any(|c| c.starts_with("_chem_comp_bond."));
        if !is_atoms && !is_bonds { continue; }

        let col_index = |key: &str| columns.iter().position(|c| c == key);
        let id_col = col_index("_chem_comp_atom.atom_id");
        let symbol_col = col_index("_chem_comp_atom.type_symbol");
        let bond1_col = col_index("_chem_comp_bond.atom_id_1");
        let bond2_col = col_index("_chem_comp_bond.atom_id_2");

        // consume loop rows until the next category starts
        while let Some(peeked) = lines.peek() {
            let trimmed = peeked.trim();
            if trimmed.is_empty() || trimmed.starts_with('_') || trimmed.starts_with("loop_") || trimmed.starts_with('#') { break; }
            let tokens = split_into_tokens(trimmed, true);
            lines.next();
            if tokens.len() < columns.len() { continue; }
            if is_atoms {
                if let (Some(i), Some(s)) = (id_col, symbol_col) {
                    elements.insert(tokens[i].clone(), Element::from_symbol(&tokens[s]));
                }
            } else if is_bonds {
                if let (Some(i), Some(j)) = (bond1_col, bond2_col) {
                    bonds.push((tokens[i].clone(), tokens[j].clone()));
                }
            }
        }
    }

    if elements.is_empty() { return None; }

    let mut map: ResidueMap = elements.iter()
        .filter(|(_, e)| **e != Element::H)
        .map(|(name, _)| (name.clone(), 0))
        .collect();
    for (a, b) in &bonds {
        let (heavy, other) = if elements.get(a) == Some(&Element::H) { (b, a) } else { (a, b) };
        if elements.get(other) == Some(&Element::H) {
            if let Some(count) = map.get_mut(heavy) { *count += 1; }
        }
    }
    return Some(map);
}
