use super::atom::AtomLabel;
use std::fmt;

/// Which bond measurement a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measurement {
    Order,
    OverlapCharge,
    Length,
}

impl Measurement {
    /// Suffix of the wide-table column carrying this measurement.
    pub fn column_suffix(&self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::OverlapCharge => "charge",
            Self::Length => "length",
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Order => "bond order",
                Self::OverlapCharge => "overlap charge",
                Self::Length => "bond length",
            }
        )
    }
}

/// Canonical, order-independent identifier of a bond between two labelled atoms.
///
/// `BondKey::new(a, b)` and `BondKey::new(b, a)` produce equal keys: the lower
/// label (by index, then symbol) is always stored first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BondKey {
    first: AtomLabel,
    second: AtomLabel,
}

impl BondKey {
    pub fn new(a: AtomLabel, b: AtomLabel) -> Self {
        if b < a {
            Self {
                first: b,
                second: a,
            }
        } else {
            Self {
                first: a,
                second: b,
            }
        }
    }

    pub fn first(&self) -> &AtomLabel {
        &self.first
    }

    pub fn second(&self) -> &AtomLabel {
        &self.second
    }

    /// The index pair with symbols stripped, used to spot symbol disagreements.
    pub fn index_pair(&self) -> (u32, u32) {
        (self.first.index, self.second.index)
    }

    /// Stem used for wide-table column names (`C_1_H_2`).
    pub fn column_stem(&self) -> String {
        format!("{}_{}", self.first.column_stem(), self.second.column_stem())
    }

    pub fn column_name(&self, measurement: Measurement) -> String {
        format!("{}_{}", self.column_stem(), measurement.column_suffix())
    }
}

impl fmt::Display for BondKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}-{}{}",
            self.first.symbol, self.first.index, self.second.symbol, self.second.index
        )
    }
}

/// One measured value for one bond, as read from a single descriptor field.
#[derive(Debug, Clone, PartialEq)]
pub struct BondValue {
    pub key: BondKey,
    pub value: f64,
}

impl BondValue {
    pub fn new(key: BondKey, value: f64) -> Self {
        Self { key, value }
    }
}

/// Everything known about one physical bond after the three bond fields are joined.
///
/// `None` means the field carried no record for this bond; it is never
/// replaced by a fabricated zero.
#[derive(Debug, Clone, PartialEq)]
pub struct BondDescriptor {
    pub key: BondKey,
    pub order: Option<f64>,
    pub overlap_charge: Option<f64>,
    pub length: Option<f64>,
}

impl BondDescriptor {
    pub fn empty(key: BondKey) -> Self {
        Self {
            key,
            order: None,
            overlap_charge: None,
            length: None,
        }
    }

    pub fn get(&self, measurement: Measurement) -> Option<f64> {
        match measurement {
            Measurement::Order => self.order,
            Measurement::OverlapCharge => self.overlap_charge,
            Measurement::Length => self.length,
        }
    }

    pub fn slot_mut(&mut self, measurement: Measurement) -> &mut Option<f64> {
        match measurement {
            Measurement::Order => &mut self.order,
            Measurement::OverlapCharge => &mut self.overlap_charge,
            Measurement::Length => &mut self.length,
        }
    }
}
