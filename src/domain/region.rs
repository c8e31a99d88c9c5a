//! Static region tables: the fitted reference countries and the target
//! countries that receive an adjustment factor.

/// Countries present in the model's fitting vocabulary.
pub const REFERENCE_COUNTRIES: [&str; 31] = [
    "AT", "BE", "BG", "CH", "CY", "CZ", "DE", "DK", "EE", "EL", "ES", "FI", "FR", "HR", "HU",
    "IE", "IS", "IT", "LT", "LU", "LV", "MT", "NL", "PL", "PT", "RO", "SE", "SI", "SK", "TR",
    "UK",
];

pub const TARGET_COUNTRIES: [&str; 20] = [
    "NG", "KE", "ZA", "GH", "ET", "EG", "MA", "TN", "UG", "TZ", "RW", "BW", "NA", "ZM", "MW",
    "MZ", "AO", "CM", "CI", "SN",
];

/// Per-country multipliers, roughly tracking development indicators.
pub const ADJUSTMENT_FACTORS: [(&str, f64); 20] = [
    ("NG", 0.3),
    ("KE", 0.4),
    ("ZA", 0.6),
    ("GH", 0.5),
    ("ET", 0.2),
    ("EG", 0.4),
    ("MA", 0.5),
    ("TN", 0.6),
    ("UG", 0.3),
    ("TZ", 0.3),
    ("RW", 0.4),
    ("BW", 0.5),
    ("NA", 0.4),
    ("ZM", 0.3),
    ("MW", 0.3),
    ("MZ", 0.2),
    ("AO", 0.3),
    ("CM", 0.3),
    ("CI", 0.4),
    ("SN", 0.4),
];

/// Used for a target country that has no entry in [`ADJUSTMENT_FACTORS`].
pub const DEFAULT_ADJUSTMENT_FACTOR: f64 = 0.4;

/// Target-region requests are encoded as if they came from this country.
pub const ENCODING_REFERENCE_COUNTRY: &str = "BE";

pub fn is_target_country(code: &str) -> bool {
    TARGET_COUNTRIES.contains(&code)
}

/// Factor for a country, falling back to [`DEFAULT_ADJUSTMENT_FACTOR`].
/// Callers decide whether the country is in the target region at all.
pub fn adjustment_factor(code: &str) -> f64 {
    ADJUSTMENT_FACTORS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, f)| *f)
        .unwrap_or(DEFAULT_ADJUSTMENT_FACTOR)
}
