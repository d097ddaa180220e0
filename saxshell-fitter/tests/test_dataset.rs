use std::io::BufReader;
use saxshell_fitter::SaxsData;

const DAT_ANGSTROM: &str = "# sample measurement
# q [1/A]   I   sigma
0.02  110.0  1.1
0.01  120.0  1.2
0.30  10.0   0.4
0.90  1.0    0.1
bad line that should be skipped
0.05  90.0   0.9
";

#[test]
fn test_loading_sorts_and_filters() {
    let data = SaxsData::from_reader(BufReader::new(DAT_ANGSTROM.as_bytes()), 0.0, 0.5, "test").unwrap();
    // the 0.9 row is outside the q window, the malformed line is treated as a header
    assert_eq!(data.len(), 4);
    assert!(data.x().windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(data.x()[0], 0.01);
    assert_eq!(data.y()[0], 120.0);
}

#[test]
fn test_nm_unit_is_rescaled() {
    let dat = "# q [nm]  I  sigma
0.5  100.0  1.0
1.0  90.0   0.9
";
    let data = SaxsData::from_reader(BufReader::new(dat.as_bytes()), 0.0, 0.5, "test").unwrap();
    assert_eq!(data.len(), 2);
    assert!((data.x()[0] - 0.05).abs() < 1e-12);
    assert!((data.x()[1] - 0.10).abs() < 1e-12);
}

#[test]
fn test_two_column_data_gets_unit_errors() {
    let dat = "0.01 100.0
0.02 90.0
";
    let data = SaxsData::from_reader(BufReader::new(dat.as_bytes()), 0.0, 0.5, "test").unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data.yerr()[0], 1.0);
}

#[test]
fn test_rows_with_bad_sigma_are_dropped() {
    let dat = "0.01 100.0 1.0
0.02 90.0 0.0
0.03 80.0 -1.0
0.04 70.0 0.7
";
    let data = SaxsData::from_reader(BufReader::new(dat.as_bytes()), 0.0, 0.5, "test").unwrap();
    assert_eq!(data.len(), 2);
}

#[test]
fn test_empty_input_is_an_error() {
    let dat = "# only headers here
";
    assert!(SaxsData::from_reader(BufReader::new(dat.as_bytes()), 0.0, 0.5, "test").is_err());
}

#[test]
fn test_splice_interpolates_linearly() {
    let data = SaxsData::new(vec![0.15, 0.25], vec![1.0, 1.0], vec![0.1, 0.1]);
    let q_model = [0.1, 0.2, 0.3];
    let i_model = [10.0, 20.0, 40.0];
    let spliced = data.splice(&q_model, &i_model);
    assert!((spliced[0] - 15.0).abs() < 1e-12);
    assert!((spliced[1] - 30.0).abs() < 1e-12);
}
