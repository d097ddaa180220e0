use std::io::Write;
use saxshell_io::out_writer;
use saxshell_scatter::Body;

/// Appends accepted configurations to an XYZ trajectory file.
///
/// Every frame lists all atoms of all bodies; viewers treat consecutive frames
/// as a movie of the optimisation.
pub struct XYZWriter {
    writer: Box<dyn Write>,
    frame: usize,
}

impl XYZWriter {
    /// Opens (and truncates) the trajectory file
    pub fn new(out_fname: &str) -> XYZWriter {
        XYZWriter { writer: out_writer(out_fname, false), frame: 0 }
    }

    /// Writes the current configuration as one frame
    pub fn write_frame(&mut self, bodies: &[Body]) -> std::io::Result<()> {
        let n: usize = bodies.iter().map(|b| b.len()).sum();
        writeln!(self.writer, "{}", n)?;
        writeln!(self.writer, "frame {}", self.frame)?;
        for body in bodies {
            for atom in body.atoms() {
                writeln!(self.writer, "{} {:12.5} {:12.5} {:12.5}",
                         atom.element, atom.pos.x, atom.pos.y, atom.pos.z)?;
            }
        }
        self.frame += 1;
        return Ok(());
    }
}
