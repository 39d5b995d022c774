//! Molecules shared by the unit tests.

use crate::*;

/// L-alanine with 3-D coordinates and explicit hydrogen counts on every atom.
pub fn alanine() -> Molecule {
    let mut mol = Molecule::new();
    let atoms = [
        ("a1", "C", [-0.358, 0.819, 20.655], 1),
        ("a2", "C", [-1.598, -0.032, 20.905], 0),
        ("a3", "N", [-0.275, 2.014, 21.574], 2),
        ("a4", "C", [0.952, 0.043, 20.838], 3),
        ("a5", "O", [-2.678, 0.479, 21.093], 0),
        ("a6", "O", [-1.596, -1.239, 20.958], 1),
    ];
    let [a1, a2, a3, a4, a5, a6] = atoms.map(|(id, element, [x, y, z], hydrogens)| {
        mol.add_atom(
            Atom::new(id, element)
                .with_xyz3(x, y, z)
                .with_hydrogen_count(hydrogens),
        )
    });
    mol.add_bond(a1, a2, Bond::single());
    mol.add_bond(a1, a3, Bond::single());
    mol.add_bond(a1, a4, Bond::single());
    mol.add_bond(a2, a5, Bond::double());
    mol.add_bond(a2, a6, Bond::single());
    mol
}

/// F[C@H](Br)Cl with the hydrogen as an explicit atom.
pub fn bromochlorofluoromethane(parity: i32) -> Molecule {
    let mut mol = Molecule::new();
    let c = mol.add_atom(
        Atom::new("a1", "C")
            .with_hydrogen_count(1)
            .with_parity(AtomParity::new("a5 a2 a3 a4", parity)),
    );
    let br = mol.add_atom(Atom::new("a2", "Br").with_hydrogen_count(0));
    let cl = mol.add_atom(Atom::new("a3", "Cl").with_hydrogen_count(0));
    let f = mol.add_atom(Atom::new("a4", "F").with_hydrogen_count(0));
    let h = mol.add_atom(Atom::new("a5", "H").with_hydrogen_count(0));
    for other in [br, cl, f, h] {
        mol.add_bond(c, other, Bond::single());
    }
    mol
}

/// C/C=C\C with the given stereo on the double bond.
pub fn but_2_ene(stereo: BondStereo) -> Molecule {
    let mut mol = Molecule::new();
    let a1 = mol.add_atom(Atom::new("a1", "C").with_hydrogen_count(3));
    let a2 = mol.add_atom(Atom::new("a2", "C").with_hydrogen_count(1));
    let a3 = mol.add_atom(Atom::new("a3", "C").with_hydrogen_count(1));
    let a4 = mol.add_atom(Atom::new("a4", "C").with_hydrogen_count(3));
    mol.add_bond(a1, a2, Bond::single());
    mol.add_bond(a2, a3, Bond::double().with_stereo(stereo));
    mol.add_bond(a3, a4, Bond::single());
    mol
}

/// A single carbon with nothing else known about it.
pub fn lone_carbon() -> Molecule {
    let mut mol = Molecule::new();
    mol.add_atom(Atom::new("a1", "C"));
    mol
}

/// Alanine plus one extra bond whose order the engine can't take.
pub fn alanine_with_bad_bond() -> Molecule {
    let mut mol = alanine();
    let extra = mol.add_atom(Atom::new("a7", "C").with_xyz3(0.0, 0.0, 0.0));
    let methyl = mol.atom_by_id("a4").expect("alanine has a4");
    mol.add_bond(methyl, extra, Bond::new(BondOrder::Other("4".to_string())));
    mol
}
