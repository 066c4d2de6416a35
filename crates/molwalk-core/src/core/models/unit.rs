use super::atom::Atom;
use super::ids::Identifier;
use super::positions::PositionMap;
use super::topology::BondOrder;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// The closed set of structural unit kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitKind {
    Atom,
    Bond,
    AliphaticChain,
    IsolatedRing,
    FusedRing,
    SubRing,
    FunctionalGroup,
    Molecule,
}

impl UnitKind {
    /// Kinds that group other components (everything but atoms and bonds).
    pub fn is_set(self) -> bool {
        !matches!(self, Self::Atom | Self::Bond)
    }

    pub fn is_ring(self) -> bool {
        matches!(self, Self::IsolatedRing | Self::FusedRing | Self::SubRing)
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Atom => "Atom",
                Self::Bond => "Bond",
                Self::AliphaticChain => "Aliphatic Chain",
                Self::IsolatedRing => "Isolated Ring",
                Self::FusedRing => "Fused Ring",
                Self::SubRing => "Sub Ring",
                Self::FunctionalGroup => "Functional Group",
                Self::Molecule => "Molecule",
            }
        )
    }
}

/// Bond payload; endpoints are stored lowest identifier first.
#[derive(Debug, Clone, PartialEq)]
pub struct BondData {
    pub first: Identifier,
    pub second: Identifier,
    pub order: BondOrder,
    pub aromatic: bool,
    pub in_ring: bool,
}

impl BondData {
    pub fn new(a: Identifier, b: Identifier, order: BondOrder) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            first,
            second,
            order,
            aromatic: order == BondOrder::Aromatic,
            in_ring: false,
        }
    }

    pub fn contains(&self, atom: &Identifier) -> bool {
        &self.first == atom || &self.second == atom
    }

    pub fn other(&self, atom: &Identifier) -> Option<&Identifier> {
        if &self.first == atom {
            Some(&self.second)
        } else if &self.second == atom {
            Some(&self.first)
        } else {
            None
        }
    }
}

/// Kind-specific payload of a structural unit.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitData {
    Atom(Atom),
    Bond(BondData),
    AliphaticChain,
    IsolatedRing,
    /// `path` orders the subrings of the system.
    FusedRing { path: PositionMap },
    SubRing,
    /// `name` is the pattern family, e.g. "Hydroxyl".
    FunctionalGroup { name: String },
    /// `path` orders the top-level units and singleton atoms.
    Molecule { path: PositionMap },
}

impl UnitData {
    pub fn kind(&self) -> UnitKind {
        match self {
            Self::Atom(_) => UnitKind::Atom,
            Self::Bond(_) => UnitKind::Bond,
            Self::AliphaticChain => UnitKind::AliphaticChain,
            Self::IsolatedRing => UnitKind::IsolatedRing,
            Self::FusedRing { .. } => UnitKind::FusedRing,
            Self::SubRing => UnitKind::SubRing,
            Self::FunctionalGroup { .. } => UnitKind::FunctionalGroup,
            Self::Molecule { .. } => UnitKind::Molecule,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConnectionKind {
    ConnectingBond,
    SharedBond,
    SharedAtom,
    SpiroAtom,
    BridgeAtom,
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::ConnectingBond => "connecting bond",
                Self::SharedBond => "shared bond",
                Self::SharedAtom => "shared atom",
                Self::SpiroAtom => "spiro atom",
                Self::BridgeAtom => "bridge atom",
            }
        )
    }
}

/// A link from the unit holding this record to a partner.
///
/// `connector` is the linking component (a bond or an atom) and `connected`
/// the partner unit or atom on the other side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connection {
    pub kind: ConnectionKind,
    pub connector: Identifier,
    pub connected: Identifier,
}

impl Connection {
    pub fn new(kind: ConnectionKind, connector: Identifier, connected: Identifier) -> Self {
        Self {
            kind,
            connector,
            connected,
        }
    }
}

impl Ord for Connection {
    fn cmp(&self, other: &Self) -> Ordering {
        self.connected
            .cmp(&other.connected)
            .then_with(|| self.connector.cmp(&other.connector))
            .then_with(|| self.kind.cmp(&other.kind))
    }
}

impl PartialOrd for Connection {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A named structural unit: an atom, a bond, or a set of components.
///
/// All cross references are identifiers resolved through the
/// [`StructureRegistry`](crate::core::registry::StructureRegistry).
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralUnit {
    pub id: Identifier,
    pub data: UnitData,
    pub(crate) components: BTreeSet<Identifier>,
    pub(crate) contexts: BTreeSet<Identifier>,
    pub(crate) external_bonds: BTreeSet<Identifier>,
    pub(crate) connecting_atoms: BTreeSet<Identifier>,
    pub(crate) super_systems: BTreeSet<Identifier>,
    pub(crate) sub_systems: BTreeSet<Identifier>,
    pub(crate) connections: BTreeSet<Connection>,
    pub(crate) positions: PositionMap,
}

impl StructuralUnit {
    pub fn new(id: Identifier, data: UnitData) -> Self {
        Self {
            id,
            data,
            components: BTreeSet::new(),
            contexts: BTreeSet::new(),
            external_bonds: BTreeSet::new(),
            connecting_atoms: BTreeSet::new(),
            super_systems: BTreeSet::new(),
            sub_systems: BTreeSet::new(),
            connections: BTreeSet::new(),
            positions: PositionMap::new(),
        }
    }

    pub fn with_components(mut self, components: impl IntoIterator<Item = Identifier>) -> Self {
        self.components.extend(components);
        self
    }

    pub fn kind(&self) -> UnitKind {
        self.data.kind()
    }

    pub fn components(&self) -> &BTreeSet<Identifier> {
        &self.components
    }

    pub fn contexts(&self) -> &BTreeSet<Identifier> {
        &self.contexts
    }

    pub fn external_bonds(&self) -> &BTreeSet<Identifier> {
        &self.external_bonds
    }

    pub fn connecting_atoms(&self) -> &BTreeSet<Identifier> {
        &self.connecting_atoms
    }

    pub fn super_systems(&self) -> &BTreeSet<Identifier> {
        &self.super_systems
    }

    pub fn sub_systems(&self) -> &BTreeSet<Identifier> {
        &self.sub_systems
    }

    pub fn connections(&self) -> &BTreeSet<Connection> {
        &self.connections
    }

    pub fn positions(&self) -> &PositionMap {
        &self.positions
    }

    pub fn atom(&self) -> Option<&Atom> {
        match &self.data {
            UnitData::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    pub fn bond(&self) -> Option<&BondData> {
        match &self.data {
            UnitData::Bond(bond) => Some(bond),
            _ => None,
        }
    }

    /// The subring order of a fused ring or the top-level order of a molecule.
    pub fn path(&self) -> Option<&PositionMap> {
        match &self.data {
            UnitData::FusedRing { path } | UnitData::Molecule { path } => Some(path),
            _ => None,
        }
    }

    pub fn group_name(&self) -> Option<&str> {
        match &self.data {
            UnitData::FunctionalGroup { name } => Some(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    #[test]
    fn kind_follows_payload() {
        let atom = StructuralUnit::new(
            Identifier::atom(1),
            UnitData::Atom(Atom::new("C", Point2::origin())),
        );
        assert_eq!(atom.kind(), UnitKind::Atom);
        assert!(atom.atom().is_some());
        assert!(atom.path().is_none());

        let fused = StructuralUnit::new(
            Identifier::set(1),
            UnitData::FusedRing {
                path: PositionMap::new(),
            },
        );
        assert_eq!(fused.kind(), UnitKind::FusedRing);
        assert!(fused.path().is_some());
    }

    #[test]
    fn ring_and_set_predicates() {
        assert!(UnitKind::SubRing.is_ring());
        assert!(UnitKind::FusedRing.is_ring());
        assert!(!UnitKind::AliphaticChain.is_ring());
        assert!(UnitKind::Molecule.is_set());
        assert!(!UnitKind::Bond.is_set());
    }

    #[test]
    fn bond_data_orders_endpoints() {
        let bond = BondData::new(Identifier::atom(10), Identifier::atom(2), BondOrder::Double);
        assert_eq!(bond.first.as_str(), "a2");
        assert_eq!(bond.second.as_str(), "a10");
        assert_eq!(bond.other(&Identifier::atom(2)).unwrap().as_str(), "a10");
        assert!(bond.other(&Identifier::atom(3)).is_none());
    }

    #[test]
    fn connections_sort_by_partner_then_connector() {
        let mut set = BTreeSet::new();
        set.insert(Connection::new(
            ConnectionKind::ConnectingBond,
            Identifier::bond(3),
            Identifier::set(2),
        ));
        set.insert(Connection::new(
            ConnectionKind::ConnectingBond,
            Identifier::bond(1),
            Identifier::atom(9),
        ));
        set.insert(Connection::new(
            ConnectionKind::ConnectingBond,
            Identifier::bond(1),
            Identifier::atom(9),
        ));
        let partners: Vec<&str> = set.iter().map(|c| c.connected.as_str()).collect();
        assert_eq!(partners, vec!["a9", "as2"]);
    }
}
