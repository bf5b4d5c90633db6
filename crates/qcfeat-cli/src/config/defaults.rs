use qcfeat::engine::config::{
    BondScope, DEFAULT_MISSING_MARKER, DEFAULT_SUM_DECIMALS, DEFAULT_WIDE_FILL_VALUE,
};

pub struct DefaultsConfig {
    pub missing_marker: String,
    pub include_wide_columns: bool,
    pub wide_fill_value: f64,
    pub drop_duplicates: bool,
    pub bond_scope: BondScope,
    pub sum_decimals: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            missing_marker: DEFAULT_MISSING_MARKER.to_string(),
            include_wide_columns: true,
            wide_fill_value: DEFAULT_WIDE_FILL_VALUE,
            drop_duplicates: true,
            bond_scope: BondScope::All,
            sum_decimals: DEFAULT_SUM_DECIMALS,
        }
    }
}
