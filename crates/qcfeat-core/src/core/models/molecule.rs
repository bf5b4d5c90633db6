use super::atom::{AtomCharge, AtomLabel, NeighborEntry};
use super::bond::BondDescriptor;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Role a molecule plays within its reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoleculeType {
    Reactant,
    Intermediate,
    Product,
}

impl MoleculeType {
    /// Categories in the column order used for one-hot encoding.
    pub const ONE_HOT_ORDER: [MoleculeType; 3] = [
        MoleculeType::Reactant,
        MoleculeType::Product,
        MoleculeType::Intermediate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reactant => "reactant",
            Self::Intermediate => "intermediate",
            Self::Product => "product",
        }
    }

    /// Name of the one-hot column for this category (`MOLECULE_TYPE_reactant`).
    pub fn one_hot_column(&self) -> String {
        format!("MOLECULE_TYPE_{}", self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unrecognized molecule type '{0}'")]
pub struct ParseMoleculeTypeError(pub String);

impl FromStr for MoleculeType {
    type Err = ParseMoleculeTypeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reactant" => Ok(Self::Reactant),
            "intermediate" => Ok(Self::Intermediate),
            "product" => Ok(Self::Product),
            _ => Err(ParseMoleculeTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for MoleculeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity columns carried through unchanged from input to output.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeIdentity {
    pub reaction_id: String,
    pub molecule_index: String,
    pub smiles: String,
    /// `None` when the input category was not one of the three known roles.
    pub molecule_type: Option<MoleculeType>,
}

impl MoleculeIdentity {
    /// One-hot encoding in [`MoleculeType::ONE_HOT_ORDER`]; unknown roles encode as all zeros.
    pub fn one_hot(&self) -> [f64; 3] {
        MoleculeType::ONE_HOT_ORDER.map(|category| {
            if self.molecule_type == Some(category) {
                1.0
            } else {
                0.0
            }
        })
    }
}

/// Structured, reconciled view of one input row.
///
/// Atom indices are 1-based throughout. Bonds are unique by key and sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeRecord {
    pub identity: MoleculeIdentity,
    pub charges: Vec<AtomCharge>,
    pub bonds: Vec<BondDescriptor>,
    /// Empty for single-atom species (the `"- 0"` sentinel) and for blank fields.
    pub neighbors: Vec<NeighborEntry>,
}

impl MoleculeRecord {
    pub fn charge_of(&self, label: &AtomLabel) -> Option<f64> {
        self.charges
            .iter()
            .find(|atom| &atom.label == label)
            .map(|atom| atom.charge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn molecule_type_parses_case_insensitively_and_trims() {
        assert_eq!(
            " Reactant ".parse::<MoleculeType>().unwrap(),
            MoleculeType::Reactant
        );
        assert_eq!(
            "PRODUCT".parse::<MoleculeType>().unwrap(),
            MoleculeType::Product
        );
        assert_eq!(
            "intermediate".parse::<MoleculeType>().unwrap(),
            MoleculeType::Intermediate
        );
    }

    #[test]
    fn molecule_type_rejects_unknown_categories() {
        assert!("catalyst".parse::<MoleculeType>().is_err());
        assert!("".parse::<MoleculeType>().is_err());
    }

    #[test]
    fn one_hot_follows_reactant_product_intermediate_order() {
        let mut identity = MoleculeIdentity {
            reaction_id: "1".into(),
            molecule_index: "1".into(),
            smiles: "C".into(),
            molecule_type: Some(MoleculeType::Product),
        };
        assert_eq!(identity.one_hot(), [0.0, 1.0, 0.0]);

        identity.molecule_type = Some(MoleculeType::Intermediate);
        assert_eq!(identity.one_hot(), [0.0, 0.0, 1.0]);

        identity.molecule_type = None;
        assert_eq!(identity.one_hot(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn one_hot_column_names() {
        let names: Vec<String> = MoleculeType::ONE_HOT_ORDER
            .iter()
            .map(MoleculeType::one_hot_column)
            .collect();
        assert_eq!(
            names,
            vec![
                "MOLECULE_TYPE_reactant",
                "MOLECULE_TYPE_product",
                "MOLECULE_TYPE_intermediate"
            ]
        );
    }
}
