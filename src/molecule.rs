use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// Cartesian coordinates of an atom.
pub type Point3 = [f64; 3];
/// Two dimensional (depiction) coordinates of an atom.
pub type Point2 = [f64; 2];

/// The underlying graph of a molecule: atoms on the nodes, bonds on the edges.
pub type MoleculeGraph = UnGraph<Atom, Bond>;

/// Element symbol used for hydrogen atoms.
pub const HYDROGEN: &str = "H";

/// A tetrahedral parity descriptor attached to a stereo center.
///
/// The four references name the neighbours of the center, in the order the
/// parity value is relative to. A positive value is one parity class, a
/// negative value the other, zero (or no value) is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AtomParity {
    pub atom_refs4: Vec<String>,
    pub value: Option<i32>,
}

impl AtomParity {
    /// Build a parity from a whitespace separated list of atom ids, e.g. `"a5 a2 a3 a4"`.
    pub fn new(atom_refs4: &str, value: i32) -> Self {
        Self {
            atom_refs4: split_refs(atom_refs4),
            value: Some(value),
        }
    }
}

/// A cis/trans descriptor attached to a double bond.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BondStereo {
    pub atom_refs4: Vec<String>,
    pub content: String,
}

impl BondStereo {
    pub const CIS: &'static str = "C";
    pub const TRANS: &'static str = "T";

    pub fn new(atom_refs4: &str, content: &str) -> Self {
        Self {
            atom_refs4: split_refs(atom_refs4),
            content: content.to_string(),
        }
    }

    pub fn cis(atom_refs4: &str) -> Self {
        Self::new(atom_refs4, Self::CIS)
    }

    pub fn trans(atom_refs4: &str) -> Self {
        Self::new(atom_refs4, Self::TRANS)
    }
}

fn split_refs(refs: &str) -> Vec<String> {
    refs.split_whitespace().map(str::to_owned).collect()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Atom {
    pub id: String,
    pub element: String,
    pub xyz3: Option<Point3>,
    pub xy2: Option<Point2>,
    pub formal_charge: Option<i32>,
    pub spin_multiplicity: Option<i32>,
    pub isotope_number: Option<u32>,
    /// Total hydrogen count. `None` is not the same as `Some(0)`.
    pub hydrogen_count: Option<u32>,
    pub parity: Option<AtomParity>,
}

impl Atom {
    pub fn new(id: impl Into<String>, element: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            element: element.into(),
            ..Self::default()
        }
    }

    pub fn with_xyz3(mut self, x: f64, y: f64, z: f64) -> Self {
        self.xyz3 = Some([x, y, z]);
        self
    }

    pub fn with_xy2(mut self, x: f64, y: f64) -> Self {
        self.xy2 = Some([x, y]);
        self
    }

    pub fn with_formal_charge(mut self, charge: i32) -> Self {
        self.formal_charge = Some(charge);
        self
    }

    pub fn with_spin_multiplicity(mut self, spin: i32) -> Self {
        self.spin_multiplicity = Some(spin);
        self
    }

    pub fn with_isotope(mut self, mass: u32) -> Self {
        self.isotope_number = Some(mass);
        self
    }

    pub fn with_hydrogen_count(mut self, count: u32) -> Self {
        self.hydrogen_count = Some(count);
        self
    }

    pub fn with_parity(mut self, parity: AtomParity) -> Self {
        self.parity = Some(parity);
        self
    }

    /// Formal charge, defaulting to zero.
    pub fn charge(&self) -> i32 {
        self.formal_charge.unwrap_or(0)
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element == HYDROGEN
    }
}

/// The order of a bond as written on the source molecule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
    /// Anything we don't know how to hand to the engine.
    Other(String),
}

impl FromStr for BondOrder {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "1" | "S" => BondOrder::Single,
            "2" | "D" => BondOrder::Double,
            "3" | "T" => BondOrder::Triple,
            "A" => BondOrder::Aromatic,
            other => BondOrder::Other(other.to_string()),
        })
    }
}

impl Display for BondOrder {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            BondOrder::Single => write!(f, "S"),
            BondOrder::Double => write!(f, "D"),
            BondOrder::Triple => write!(f, "T"),
            BondOrder::Aromatic => write!(f, "A"),
            BondOrder::Other(order) => write!(f, "{}", order),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bond {
    /// `None` is read as a single bond.
    pub order: Option<BondOrder>,
    pub stereo: Option<BondStereo>,
}

impl Bond {
    pub fn new(order: BondOrder) -> Self {
        Self {
            order: Some(order),
            stereo: None,
        }
    }

    pub fn single() -> Self {
        Self::new(BondOrder::Single)
    }

    pub fn double() -> Self {
        Self::new(BondOrder::Double)
    }

    pub fn triple() -> Self {
        Self::new(BondOrder::Triple)
    }

    pub fn aromatic() -> Self {
        Self::new(BondOrder::Aromatic)
    }

    pub fn with_stereo(mut self, stereo: BondStereo) -> Self {
        self.stereo = Some(stereo);
        self
    }
}

/// Convention used when an InChI is attached to a molecule as an identifier.
pub const INCHI_CONVENTION: &str = "iupac:inchi";

/// An identifier annotation, such as a generated InChI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub convention: String,
    pub value: String,
}

impl Identifier {
    pub fn inchi(value: impl Into<String>) -> Self {
        Self {
            convention: INCHI_CONVENTION.to_string(),
            value: value.into(),
        }
    }
}

/// Anything an identifier can be appended to.
pub trait IdentifierHost {
    fn append_identifier(&mut self, identifier: Identifier);
}

/// A molecule: an ordered list of atoms, an ordered list of bonds, and the
/// identifiers that have been attached to it.
///
/// Atoms and bonds are never removed, so node and edge indices double as
/// traversal positions.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    graph: MoleculeGraph,
    ids: HashMap<String, NodeIndex>,
    identifiers: Vec<Identifier>,
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an atom to the end of the atom list.
    ///
    /// If another atom already uses the same id, lookups by id keep resolving
    /// to the first one.
    pub fn add_atom(&mut self, atom: Atom) -> NodeIndex {
        let id = atom.id.clone();
        let node = self.graph.add_node(atom);
        self.ids.entry(id).or_insert(node);
        node
    }

    /// Add a bond between two atoms already in the molecule. Endpoint order is kept.
    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: Bond) -> EdgeIndex {
        self.graph.add_edge(a, b, bond)
    }

    pub fn atom(&self, node: NodeIndex) -> &Atom {
        &self.graph[node]
    }

    pub fn atom_mut(&mut self, node: NodeIndex) -> &mut Atom {
        &mut self.graph[node]
    }

    pub fn bond_mut(&mut self, edge: EdgeIndex) -> &mut Bond {
        &mut self.graph[edge]
    }

    pub fn atom_by_id(&self, id: &str) -> Option<NodeIndex> {
        self.ids.get(id).copied()
    }

    /// Atoms in traversal order.
    pub fn atoms(&self) -> impl Iterator<Item = (NodeIndex, &Atom)> + '_ {
        self.graph
            .node_indices()
            .map(move |node| (node, &self.graph[node]))
    }

    /// Bonds in traversal order, as `(first endpoint, second endpoint, bond)`.
    pub fn bonds(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &Bond)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target(), edge.weight()))
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn graph(&self) -> &MoleculeGraph {
        &self.graph
    }

    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }
}

impl IdentifierHost for Molecule {
    fn append_identifier(&mut self, identifier: Identifier) {
        self.identifiers.push(identifier);
    }
}
