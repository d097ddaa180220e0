use std::fmt::{Display, Formatter};
use log::warn;

/// Chemical elements relevant for X-ray scattering from biomacromolecules.
///
/// The enumeration is closed; rarely seen species fall into the [`Element::Other`](Element::Other)
/// variant, which is treated as carbon-like by downstream consumers.
///
/// # Examples
/// ```
/// use saxshell_pdb::Element;
/// assert_eq!(Element::from_symbol("C"), Element::C);
/// assert_eq!(Element::from_symbol("FE"), Element::Other);
/// assert_eq!(Element::C.atomic_number(), 6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    H,
    C,
    N,
    O,
    S,
    P,
    Other,
}

impl Element {
    /// Parses an element symbol, e.g. from columns 77-78 of a PDB `ATOM` record.
    pub fn from_symbol(symbol: &str) -> Element {
        match symbol.trim().to_uppercase().as_str() {
            "H" | "D" => Element::H,
            "C" => Element::C,
            "N" => Element::N,
            "O" => Element::O,
            "S" => Element::S,
            "P" => Element::P,
            _ => Element::Other,
        }
    }

    /// Guesses the element from a four-character PDB atom name.
    ///
    /// Used when the element columns of an `ATOM` record are absent. The first non-digit
    /// character of the name decides, which covers protein and nucleic acid atom naming.
    pub fn from_atom_name(name: &str) -> Element {
        for c in name.trim().chars() {
            if c.is_ascii_digit() { continue; }
            return match c.to_ascii_uppercase() {
                'H' => Element::H,
                'C' => Element::C,
                'N' => Element::N,
                'O' => Element::O,
                'S' => Element::S,
                'P' => Element::P,
                other => {
                    warn!("unrecognised atom name character '{}'; assuming a carbon-like element", other);
                    Element::Other
                }
            };
        }
        return Element::Other;
    }

    /// Number of electrons of a neutral atom of this element.
    ///
    /// [`Element::Other`](Element::Other) is counted as carbon.
    pub fn atomic_number(&self) -> u32 {
        match self {
            Element::H => 1,
            Element::C => 6,
            Element::N => 7,
            Element::O => 8,
            Element::S => 16,
            Element::P => 15,
            Element::Other => 6,
        }
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Element::H => "H",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::S => "S",
            Element::P => "P",
            Element::Other => "X",
        };
        write!(f, "{}", symbol)
    }
}
