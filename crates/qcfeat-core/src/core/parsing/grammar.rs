use regex::Regex;
use std::sync::LazyLock;

// Handles 1.23, -0.032, 1.2e-4, .123 and bare integers.
const FLOAT: &str = r"[-+]?(?:\d+\.\d*|\.\d+|\d+)(?:[eE][-+]?\d+)?";
const SYMBOL: &str = r"[A-Z][a-z]*";

/// `<index> <Symbol> : <float>`
pub(super) static ATOMIC_CHARGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(\d+)\s+({SYMBOL})\s*:\s*({FLOAT})"))
        .expect("atomic charge grammar is a valid regex")
});

/// `B(<i1>-<Sym1>,<i2>-<Sym2>) : <float>`
pub(super) static BOND_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"B\(\s*(\d+)\s*-\s*({SYMBOL})\s*,\s*(\d+)\s*-\s*({SYMBOL})\s*\)\s*:\s*({FLOAT})"
    ))
    .expect("bond value grammar is a valid regex")
});

/// `<Sym1><i1>-<Sym2><i2> <float>`
pub(super) static BOND_LENGTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"({SYMBOL})(\d+)-({SYMBOL})(\d+)\s+({FLOAT})"))
        .expect("bond length grammar is a valid regex")
});

/// `<Symbol>(<index>) <count>`
pub(super) static NEAREST_NEIGHBOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"({SYMBOL})\((\d+)\)\s+(\d+)"))
        .expect("nearest neighbor grammar is a valid regex")
});
