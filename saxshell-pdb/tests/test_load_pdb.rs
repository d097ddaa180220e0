use std::io::BufReader;
use saxshell_pdb::{load_pdb, load_pdb_reader, write_pdb, Structure};

const PDB_TXT: &str = "HEADER    TWO RESIDUES
ATOM      2  CA  MET A   1     -13.296   0.028   3.924  1.00  0.43           C
ATOM     21  CA  THR A   2      -9.669  -0.447   4.998  1.00  0.19           C
HETATM   40  O   HOH A 101       1.000   2.000   3.000  1.00  0.00           O
END
";

#[test]
fn test_load_from_reader() {
    let strctr = load_pdb_reader(BufReader::new(PDB_TXT.as_bytes())).unwrap();
    assert_eq!(strctr.count_atoms(), 3);
    assert_eq!(strctr.macromolecule_atoms().len(), 2);
    assert_eq!(strctr.waters().len(), 1);
    assert_eq!(strctr.count_chains(), 1);
    assert_eq!(strctr.count_residues(), 3);
}

#[test]
fn test_only_first_model_is_loaded() {
    let two_models = "MODEL        1
ATOM      1  CA  ALA A   1       0.000   0.000   0.000  1.00  0.00           C
ENDMDL
MODEL        2
ATOM      1  CA  ALA A   1       5.000   0.000   0.000  1.00  0.00           C
ENDMDL
";
    let strctr = load_pdb_reader(BufReader::new(two_models.as_bytes())).unwrap();
    assert_eq!(strctr.count_atoms(), 1);
    assert!((strctr.atoms[0].pos.x).abs() < 1e-9);
}

#[test]
fn test_write_and_reload_round_trip() {
    let strctr = load_pdb_reader(BufReader::new(PDB_TXT.as_bytes())).unwrap();
    let out_path = std::env::temp_dir().join("saxshell_round_trip.pdb");
    let out_name = out_path.to_str().unwrap();
    write_pdb(&strctr, out_name).unwrap();

    let reloaded: Structure = load_pdb(out_name).unwrap();
    assert_eq!(reloaded.count_atoms(), strctr.count_atoms());
    for (a, b) in strctr.atoms.iter().zip(reloaded.atoms.iter()) {
        // atoms are renumbered on output; everything else must survive the round trip
        assert!(a.pos.distance_to(&b.pos) < 1e-3);
        assert_eq!(a.name, b.name);
        assert_eq!(a.res_name, b.res_name);
        assert_eq!(a.element, b.element);
        assert!((a.occupancy - b.occupancy).abs() < 1e-9);
    }
    std::fs::remove_file(out_path).unwrap();
}
