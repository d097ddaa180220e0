use saxshell_pdb::{Element, PdbAtom};

#[test]
fn test_atom_line_parsing() {
    let pdb_line = "ATOM    320  CA  PHE A  43      16.101   9.057  19.587  1.00 18.18           C";
    let a = PdbAtom::from_atom_line(pdb_line).unwrap();
    assert_eq!(a.serial, 320);
    assert_eq!(a.name, " CA ");
    assert_eq!(a.res_name, "PHE");
    assert_eq!(a.chain_id, "A");
    assert_eq!(a.res_seq, 43);
    assert_eq!(a.element, Element::C);
    assert!((a.pos.x - 16.101).abs() < 1e-9);
    assert!((a.occupancy - 1.0).abs() < 1e-9);
    assert!((a.temp_factor - 18.18).abs() < 1e-9);
    assert!(!a.is_hetero_atom);
}

#[test]
fn test_hetatm_water() {
    let pdb_line = "HETATM  401  O   HOH A 101      10.000  11.000  12.000  1.00 20.00           O";
    let a = PdbAtom::from_atom_line(pdb_line).unwrap();
    assert!(a.is_hetero_atom);
    assert!(a.is_water());
    assert_eq!(a.element, Element::O);
}

#[test]
fn test_element_guessed_from_name() {
    // element columns absent
    let pdb_line = "ATOM     33  CA AARG A  -3      12.353  85.696  94.456  0.50 36.67";
    let a = PdbAtom::from_atom_line(pdb_line).unwrap();
    assert_eq!(a.res_seq, -3);
    assert_eq!(a.alt_loc, 'A');
    assert_eq!(a.element, Element::C);
}

#[test]
fn test_atom_line_round_trip() {
    let pdb_line = "ATOM    320  CA  PHE A  43      16.101   9.057  19.587  1.00 18.18           C";
    let a = PdbAtom::from_atom_line(pdb_line).unwrap();
    assert_eq!(format!("{}", a), pdb_line);
}

#[test]
fn test_malformed_line_is_an_error() {
    assert!(PdbAtom::from_atom_line("ATOM    320  CA").is_err());
    assert!(PdbAtom::from_atom_line("ATOM    abc  CA  PHE A  43      16.101   9.057  19.587  1.00 18.18").is_err());
}
