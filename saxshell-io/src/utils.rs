use std::ffi::OsStr;
use std::fs::File;
use std::io::{stderr, stdout, BufRead, BufReader, Error, ErrorKind, Write};
use std::path::Path;
use flate2::read;

/// Creates a `Writer` object.
///
/// Attempts to open a file under a given name. However, if the name is `"stdout"` or `"stderr"`,
/// the returned `Writer` will be connected to either `stdout` or `stderr` stream, respectively.
/// Empty file name also results in writing to `stdout`.
///
/// # Arguments
/// * `out_fname` - file name, `"stdout"` or `"stderr"`
/// * `if_append` - existing file will be removed if false, otherwise the new content will be appended
///
/// # Examples
///
/// ```
/// use std::fs;
/// use saxshell_io::out_writer;
/// let mut to_stream = out_writer("", true);
/// to_stream = out_writer("stdout", true);
/// assert!(fs::metadata("stdout").is_err());
/// let mut to_file = out_writer("file.out", false);
/// assert!(fs::metadata("file.out").is_ok());
/// # fs::remove_file("file.out").expect("Can't remove a test file: file.out");
/// ```
pub fn out_writer(out_fname: &str, if_append: bool) -> Box<dyn Write> {
    match out_fname {
        "" => Box::new(stdout()) as Box<dyn Write>,
        "stdout" => Box::new(stdout()) as Box<dyn Write>,
        "stderr" => Box::new(stderr()) as Box<dyn Write>,
        _ => {
            let path = Path::new(out_fname);

            if if_append {
                let file = match File::options().append(true).write(true).create(true).open(&path) {
                    Ok(file) => file,
                    Err(e) => panic!("can't open >{:?}<, error is: {:?}", &path, e),
                };
                return Box::new(file) as Box<dyn Write>;
            } else {
                let file = match File::create(&path) {
                    Ok(file) => file,
                    Err(e) => panic!("can't open >{:?}<, error is: {:?}", &path, e),
                };
                return Box::new(file) as Box<dyn Write>;
            }
        }
    }
}

/// Says whether a file under a given name can be created.
///
/// The check is performed by actually creating the file and removing it afterwards.
pub fn can_create_file(fname: &str) -> bool {
    let path = Path::new(fname);
    if path.exists() { return true; }
    match File::create(&path) {
        Ok(_) => {
            let _ = std::fs::remove_file(&path);
            true
        }
        Err(_) => false,
    }
}

/// Opens a file for reading.
///
/// This function can open a regular file or a gzipped one, as determined by the extension
/// of the input file name. A boxed reader to the content is returned.
///
/// # Examples
/// ```no_run
/// use saxshell_io::open_file;
/// # use std::io;
/// # fn main() -> Result<(), io::Error> {
/// let reader = open_file("measurement.dat")?;
/// let reader_gzipped = open_file("measurement.dat.gz")?;
/// # Ok(())
/// # }
/// ```
pub fn open_file(filename: &str) -> Result<Box<dyn BufRead>, Error> {
    if filename.len() == 0 {
        return Err(Error::new(ErrorKind::InvalidInput, "file name is an empty string"));
    }
    let path = Path::new(filename);
    let file = match File::open(&path) {
        Err(why) => return Err(why),
        Ok(file) => file,
    };

    if path.extension() == Some(OsStr::new("gz")) {
        Ok(Box::new(BufReader::with_capacity(
            128 * 1024,
            read::GzDecoder::new(file),
        )))
    } else {
        Ok(Box::new(BufReader::with_capacity(128 * 1024, file)))
    }
}

/// Reads whitespace- or comma-separated numeric columns from a buffer.
///
/// Lines whose tokens do not all parse as numbers are returned separately as header lines,
/// which lets a caller inspect them e.g. for unit annotations.
///
/// # Examples
/// ```
/// use std::io::BufReader;
/// use saxshell_io::read_columns;
/// let txt = "# q [1/angstrom]  I  sigma
/// 0.01 112.1 0.5
/// 0.02,109.8,0.5
/// ";
/// let (rows, headers) = read_columns(BufReader::new(txt.as_bytes())).unwrap();
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1].len(), 3);
/// assert_eq!(headers.len(), 1);
/// ```
pub fn read_columns<R: BufRead>(reader: R) -> Result<(Vec<Vec<f64>>, Vec<String>), Error> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut headers: Vec<String> = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }

        let tokens: Vec<&str> = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();

        let row: Result<Vec<f64>, _> = tokens.iter().map(|t| t.parse::<f64>()).collect();
        match row {
            Ok(vals) => rows.push(vals),
            Err(_) => headers.push(line),
        }
    }

    return Ok((rows, headers));
}
