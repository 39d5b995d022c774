use std::fmt::{Display, Formatter, Result as FmtResult};

use petgraph::graph::NodeIndex;
use tracing::*;

use crate::*;

/// Which coordinates every atom of the molecule gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateRegime {
    ThreeD,
    TwoD,
    Absent,
}

impl CoordinateRegime {
    /// Pick one regime for the whole molecule. A single atom missing 3-D
    /// coordinates demotes everyone to 2-D, and likewise down to none.
    pub fn select(molecule: &Molecule) -> Self {
        if molecule.atoms().all(|(_, atom)| atom.xyz3.is_some()) {
            CoordinateRegime::ThreeD
        } else if molecule.atoms().all(|(_, atom)| atom.xy2.is_some()) {
            CoordinateRegime::TwoD
        } else {
            CoordinateRegime::Absent
        }
    }

    fn coordinates(&self, atom: &Atom) -> (f64, f64, f64) {
        match (self, atom.xyz3, atom.xy2) {
            (CoordinateRegime::ThreeD, Some([x, y, z]), _) => (x, y, z),
            (CoordinateRegime::TwoD, _, Some([x, y])) => (x, y, 0.0),
            _ => (0.0, 0.0, 0.0),
        }
    }
}

/// A translation-time condition that keeps the structure away from the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// A bond had an order the engine has no bond type for.
    UnsupportedBondOrder { bond: usize, order: String },
}

impl Display for Problem {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Problem::UnsupportedBondOrder { bond, order } => {
                write!(f, "unsupported bond order '{}' on bond {}", order, bond)
            }
        }
    }
}

/// The outcome of a translation that did not fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    Ready(InchiInput),
    Halted(Problem),
}

/// Converts a [`Molecule`] into the position indexed [`InchiInput`] the engine expects.
///
/// Engine atom `i` is always molecule atom `i`. Stereo elements come out in a
/// fixed order: tetrahedral centers in atom order, then double bonds in bond
/// order. The engine breaks ties on input order, so this order matters.
pub struct StructureTranslator<'a> {
    molecule: &'a Molecule,
    processing: &'a ProcessingOptions,
}

impl<'a> StructureTranslator<'a> {
    pub fn new(molecule: &'a Molecule, processing: &'a ProcessingOptions) -> Self {
        Self {
            molecule,
            processing,
        }
    }

    /// Translate the molecule.
    ///
    /// # Returns
    ///
    /// * `Ok(Translation::Ready(_))` with the finished input,
    /// * `Ok(Translation::Halted(_))` when a bond order can't be expressed,
    /// * `Err(_)` for an unsupported spin multiplicity or a negative implicit
    ///   hydrogen count.
    pub fn translate(&self, options: &EngineOptions) -> Result<Translation, InchiError> {
        let neighbours = self.neighbour_index();
        let regime = CoordinateRegime::select(self.molecule);
        debug!(
            "Translating {} atoms and {} bonds using {:?} coordinates",
            self.molecule.atom_count(),
            self.molecule.bond_count(),
            regime
        );

        let mut input = InchiInput::new(options.clone());
        for (node, atom) in self.molecule.atoms() {
            let converted = self.convert_atom(atom, regime, &neighbours[node.index()])?;
            let index = input.add_atom(converted);
            debug_assert_eq!(index, node.index());
        }

        for (node, atom) in self.molecule.atoms() {
            if let Some(stereo) = self.tetrahedral_stereo(node, atom) {
                input.add_stereo(stereo);
            }
        }

        if self.processing.contains(ProcessingOption::UseBonds) {
            for (index, (a, b, bond)) in self.molecule.bonds().enumerate() {
                let kind = match &bond.order {
                    None | Some(BondOrder::Single) => BondType::Single,
                    Some(BondOrder::Double) => BondType::Double,
                    Some(BondOrder::Triple) => BondType::Triple,
                    Some(BondOrder::Aromatic) => BondType::Altern,
                    Some(BondOrder::Other(order)) => {
                        warn!("Unsupported bond order: {}", order);
                        return Ok(Translation::Halted(Problem::UnsupportedBondOrder {
                            bond: index,
                            order: order.clone(),
                        }));
                    }
                };
                input.add_bond(InchiBond {
                    origin: a.index(),
                    target: b.index(),
                    kind,
                });
            }
        } else {
            debug!("Bond information excluded, no bonds passed to the engine");
        }

        for (_, _, bond) in self.molecule.bonds() {
            if let Some(stereo) = self.double_bond_stereo(bond) {
                input.add_stereo(stereo);
            }
        }

        Ok(Translation::Ready(input))
    }

    /// For each atom ordinal, the ordinals of the atoms bonded to it.
    fn neighbour_index(&self) -> Vec<Vec<usize>> {
        let mut neighbours = vec![Vec::new(); self.molecule.atom_count()];
        for (a, b, _) in self.molecule.bonds() {
            neighbours[a.index()].push(b.index());
            neighbours[b.index()].push(a.index());
        }
        neighbours
    }

    fn convert_atom(
        &self,
        atom: &Atom,
        regime: CoordinateRegime,
        neighbours: &[usize],
    ) -> Result<InchiAtom, InchiError> {
        let (x, y, z) = regime.coordinates(atom);
        let mut converted = InchiAtom::new(x, y, z, atom.element.as_str());

        let charge = atom.charge();
        if charge != 0 {
            converted.charge = charge;
        }

        if let Some(spin) = atom.spin_multiplicity {
            let radical = Radical::from_spin_multiplicity(spin).ok_or_else(|| {
                InchiError::UnsupportedSpinMultiplicity {
                    atom: atom.id.clone(),
                    multiplicity: spin,
                }
            })?;
            converted.radical = Some(radical);
        }

        converted.isotopic_mass = atom.isotope_number;
        converted.implicit_h = self.implicit_hydrogens(atom, neighbours)?;
        Ok(converted)
    }

    /// The total hydrogen count less the hydrogens already present as atoms.
    fn implicit_hydrogens(&self, atom: &Atom, neighbours: &[usize]) -> Result<i32, InchiError> {
        let Some(total) = atom.hydrogen_count else {
            return Ok(INFER_IMPLICIT_H);
        };

        let explicit = neighbours
            .iter()
            .filter(|&&n| self.molecule.atom(NodeIndex::new(n)).is_hydrogen())
            .count() as i64;
        let implicit = total as i64 - explicit;
        if implicit < 0 {
            return Err(InchiError::NegativeImplicitHydrogens {
                atom: atom.id.clone(),
                count: implicit as i32,
            });
        }
        i32::try_from(implicit).map_err(|_| InchiError::ImplicitHydrogensOutOfRange {
            atom: atom.id.clone(),
            count: implicit,
        })
    }

    /// Resolve a list of atom ids to engine atom indices, if there are exactly
    /// four of them and every one resolves.
    fn resolve_refs4(&self, refs: &[String]) -> Option<[usize; 4]> {
        if refs.len() != 4 {
            return None;
        }
        let resolved: Vec<usize> = refs
            .iter()
            .filter_map(|id| self.molecule.atom_by_id(id))
            .map(|node| node.index())
            .collect();
        resolved.try_into().ok()
    }

    fn tetrahedral_stereo(&self, node: NodeIndex, atom: &Atom) -> Option<Stereo0D> {
        let parity = atom.parity.as_ref()?;
        let Some(neighbors) = self.resolve_refs4(&parity.atom_refs4) else {
            trace!(
                "Skipping atom parity on '{}': references {:?} don't resolve",
                atom.id,
                parity.atom_refs4
            );
            return None;
        };

        let parity = match parity.value {
            Some(value) if value > 0 => Parity::Even,
            Some(value) if value < 0 => Parity::Odd,
            _ => Parity::Unknown,
        };
        Some(Stereo0D::Tetrahedral {
            central: node.index(),
            neighbors,
            parity,
        })
    }

    fn double_bond_stereo(&self, bond: &Bond) -> Option<Stereo0D> {
        let stereo = bond.stereo.as_ref()?;
        let Some(neighbors) = self.resolve_refs4(&stereo.atom_refs4) else {
            trace!(
                "Skipping bond stereo: references {:?} don't resolve",
                stereo.atom_refs4
            );
            return None;
        };

        let parity = match stereo.content.as_str() {
            BondStereo::CIS => Parity::Odd,
            BondStereo::TRANS => Parity::Even,
            other => {
                trace!("Skipping bond stereo with content {:?}", other);
                return None;
            }
        };
        Some(Stereo0D::DoubleBond { neighbors, parity })
    }
}

/// Translate a molecule in one call.
pub fn translate(
    molecule: &Molecule,
    processing: &ProcessingOptions,
    options: &EngineOptions,
) -> Result<Translation, InchiError> {
    StructureTranslator::new(molecule, processing).translate(options)
}
