//! Catalog of the aggregate functions understood by the evaluator contract.

/// Built-in aggregates that take a pair of references.
pub const PAIR_FUNCTIONS: [&str; 3] = ["correlation", "covariance", "covariance-population"];

pub const BUILTIN_FUNCTIONS: [&str; 13] = [
    "avg",
    "count",
    "max",
    "min",
    "median",
    "stddev",
    "stddev-population",
    "sum",
    "variance",
    "variance-population",
    "correlation",
    "covariance",
    "covariance-population",
];

/// Splits `native/<plugin>/<function>` into its plugin and function segments.
pub fn parse_native(function: &str) -> Option<(&str, &str)> {
    let rest = function.strip_prefix("native/")?;
    let (plugin, name) = rest.split_once('/')?;
    if plugin.is_empty() || name.is_empty() || name.contains('/') {
        return None;
    }
    Some((plugin, name))
}

pub fn is_builtin(function: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&function)
}

/// A recognized built-in or a well-formed native plugin call.
pub fn is_supported(function: &str) -> bool {
    is_builtin(function) || parse_native(function).is_some()
}

/// Number of references the function takes.
pub fn arity(function: &str) -> usize {
    if PAIR_FUNCTIONS.contains(&function) {
        2
    } else {
        1
    }
}

/// `count` works over any lexicon; every other built-in needs numeric values.
pub fn requires_numeric(function: &str) -> bool {
    is_builtin(function) && function != "count"
}
