/// Fixed-width statistics derived from one molecule.
///
/// Every field is `None` when its qualifying value set was empty; a missing
/// statistic is never reported as a computed zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    pub sum_atomic_charges: Option<f64>,
    pub sum_bond_order_overlap: Option<f64>,
    pub mean_atomic_charges: Option<f64>,
    pub median_atomic_charges: Option<f64>,
    pub std_atomic_charges: Option<f64>,
    pub min_atomic_charges: Option<f64>,
    pub max_atomic_charges: Option<f64>,
    pub range_atomic_charges: Option<f64>,
    pub mean_bond_order_overlap: Option<f64>,
    pub median_bond_order_overlap: Option<f64>,
    pub std_bond_order_overlap: Option<f64>,
    pub min_bond_order_overlap: Option<f64>,
    pub max_bond_order_overlap: Option<f64>,
    pub range_bond_order_overlap: Option<f64>,
    pub atomic_basin_charge: Option<f64>,
    pub weighted_average_bond_length: Option<f64>,
    pub min_bond_length: Option<f64>,
    pub max_bond_length: Option<f64>,
    pub std_bond_length: Option<f64>,
    pub var_bond_length: Option<f64>,
    pub range_bond_length: Option<f64>,
    pub iqr_bond_length: Option<f64>,
}

impl FeatureVector {
    /// Output column names, in the order [`FeatureVector::values`] yields them.
    pub const COLUMNS: [&'static str; 22] = [
        "sum_atomic_charges",
        "sum_bond_order_overlap",
        "mean_atomic_charges",
        "median_atomic_charges",
        "std_atomic_charges",
        "min_atomic_charges",
        "max_atomic_charges",
        "range_atomic_charges",
        "mean_bond_order_overlap",
        "median_bond_order_overlap",
        "std_bond_order_overlap",
        "min_bond_order_overlap",
        "max_bond_order_overlap",
        "range_bond_order_overlap",
        "atomic_basin_charge",
        "weighted_average_bond_length",
        "min_bond_length",
        "max_bond_length",
        "std_bond_length",
        "var_bond_length",
        "range_bond_length",
        "iqr_bond_length",
    ];

    pub fn values(&self) -> [Option<f64>; 22] {
        [
            self.sum_atomic_charges,
            self.sum_bond_order_overlap,
            self.mean_atomic_charges,
            self.median_atomic_charges,
            self.std_atomic_charges,
            self.min_atomic_charges,
            self.max_atomic_charges,
            self.range_atomic_charges,
            self.mean_bond_order_overlap,
            self.median_bond_order_overlap,
            self.std_bond_order_overlap,
            self.min_bond_order_overlap,
            self.max_bond_order_overlap,
            self.range_bond_order_overlap,
            self.atomic_basin_charge,
            self.weighted_average_bond_length,
            self.min_bond_length,
            self.max_bond_length,
            self.std_bond_length,
            self.var_bond_length,
            self.range_bond_length,
            self.iqr_bond_length,
        ]
    }

    pub fn missing_count(&self) -> usize {
        self.values().iter().filter(|v| v.is_none()).count()
    }
}
