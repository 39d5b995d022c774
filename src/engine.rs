//! The structures exchanged with an InChI engine, and the trait an engine implements.
//!
//! An [`InchiInput`] is position indexed: atom `i` of the input is atom `i` of the
//! molecule it was translated from, and bonds and stereo elements refer to atoms
//! only by that index.

use anyhow::Result;

use crate::EngineOptions;

/// Implicit hydrogen count meaning "let the engine work it out".
pub const INFER_IMPLICIT_H: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Radical {
    None,
    Singlet,
    Doublet,
    Triplet,
}

impl Radical {
    /// Map a spin multiplicity onto a radical class, if it has one.
    pub fn from_spin_multiplicity(spin: i32) -> Option<Self> {
        match spin {
            0 => Some(Radical::None),
            1 => Some(Radical::Singlet),
            2 => Some(Radical::Doublet),
            3 => Some(Radical::Triplet),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InchiAtom {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub element: String,
    pub charge: i32,
    pub radical: Option<Radical>,
    pub isotopic_mass: Option<u32>,
    /// Number of implicit hydrogens, or [`INFER_IMPLICIT_H`].
    pub implicit_h: i32,
}

impl InchiAtom {
    pub fn new(x: f64, y: f64, z: f64, element: impl Into<String>) -> Self {
        Self {
            x,
            y,
            z,
            element: element.into(),
            charge: 0,
            radical: None,
            isotopic_mass: None,
            implicit_h: INFER_IMPLICIT_H,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondType {
    Single,
    Double,
    Triple,
    /// Alternating, i.e. aromatic or otherwise delocalized.
    Altern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InchiBond {
    pub origin: usize,
    pub target: usize,
    pub kind: BondType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    Odd,
    Even,
    Unknown,
}

/// A stereo element given purely by atom references and a parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stereo0D {
    Tetrahedral {
        central: usize,
        neighbors: [usize; 4],
        parity: Parity,
    },
    DoubleBond {
        neighbors: [usize; 4],
        parity: Parity,
    },
}

impl Stereo0D {
    pub fn parity(&self) -> Parity {
        match self {
            Stereo0D::Tetrahedral { parity, .. } | Stereo0D::DoubleBond { parity, .. } => *parity,
        }
    }
}

/// Everything the engine needs to compute an InChI.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InchiInput {
    pub atoms: Vec<InchiAtom>,
    pub bonds: Vec<InchiBond>,
    pub stereos: Vec<Stereo0D>,
    pub options: EngineOptions,
}

impl InchiInput {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Append an atom and return its index.
    pub fn add_atom(&mut self, atom: InchiAtom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    pub fn add_bond(&mut self, bond: InchiBond) {
        self.bonds.push(bond);
    }

    pub fn add_stereo(&mut self, stereo: Stereo0D) {
        self.stereos.push(stereo);
    }
}

/// Return status of an engine run. Only `Okay` and `Warning` mean an InChI was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InchiStatus {
    Skip,
    Eof,
    Okay,
    Warning,
    Error,
    Fatal,
    Unknown,
    Busy,
}

impl InchiStatus {
    pub fn is_acceptable(&self) -> bool {
        matches!(self, InchiStatus::Okay | InchiStatus::Warning)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InchiOutput {
    pub status: InchiStatus,
    pub inchi: Option<String>,
    pub aux_info: String,
    pub message: String,
    pub log: String,
}

/// An InChI implementation, typically a binding to the native library.
pub trait InchiEngine {
    /// Make sure the engine can actually be used. Called once by the factory.
    fn load(&self) -> Result<()> {
        Ok(())
    }

    fn get_inchi(&self, input: &InchiInput) -> Result<InchiOutput>;
}
