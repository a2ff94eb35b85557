//! Delegation codes used in contestant IDs and their display names.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Known three-letter delegation codes.
pub static COUNTRY_CODES: &[(&str, &str)] = &[
    ("CHN", "China"),
    ("KOR", "South Korea"),
    ("CAN", "Canada"),
    ("ROU", "Romania"),
    ("AUS", "Australia"),
    ("POL", "Poland"),
    ("HUN", "Hungary"),
    ("USA", "United States"),
    ("VNM", "Vietnam"),
    ("IRN", "Iran"),
    ("SGP", "Singapore"),
    ("MYS", "Malaysia"),
    ("CHE", "Switzerland"),
    ("KAZ", "Kazakhstan"),
    ("HRV", "Croatia"),
    ("BGR", "Bulgaria"),
    ("TUR", "Turkey"),
    ("TWN", "Taiwan"),
    ("IDN", "Indonesia"),
    ("NLD", "Netherlands"),
    ("JPN", "Japan"),
    ("ITA", "Italy"),
    ("FRA", "France"),
    ("GBR", "United Kingdom"),
    ("MKD", "North Macedonia"),
    ("THA", "Thailand"),
    ("EGY", "Egypt"),
    ("FIN", "Finland"),
    ("SRB", "Serbia"),
    ("SVK", "Slovakia"),
    ("MDA", "Moldova"),
    ("ESP", "Spain"),
    ("UZB", "Uzbekistan"),
    ("BRA", "Brazil"),
    ("HKG", "Hong Kong"),
    ("PAK", "Pakistan"),
    ("CYP", "Cyprus"),
    ("UKR", "Ukraine"),
    ("SWE", "Sweden"),
    ("BEL", "Belgium"),
    ("CZE", "Czech Republic"),
    ("AZE", "Azerbaijan"),
    ("PHL", "Philippines"),
    ("BGD", "Bangladesh"),
    ("ARM", "Armenia"),
    ("MAC", "Macau"),
    ("SAU", "Saudi Arabia"),
    ("IND", "India"),
    ("CUB", "Cuba"),
    ("DEU", "Germany"),
    ("MEX", "Mexico"),
    ("NZL", "New Zealand"),
    ("AUT", "Austria"),
    ("EST", "Estonia"),
    ("LTU", "Lithuania"),
    ("KGZ", "Kyrgyzstan"),
    ("MNG", "Mongolia"),
    ("LVA", "Latvia"),
    ("GEO", "Georgia"),
    ("SVN", "Slovenia"),
    ("ARG", "Argentina"),
    ("ZAF", "South Africa"),
    ("COL", "Colombia"),
    ("BIH", "Bosnia and Herzegovina"),
    ("GRC", "Greece"),
    ("IRL", "Ireland"),
    ("NGA", "Nigeria"),
    ("BOL", "Bolivia"),
    ("NOR", "Norway"),
    ("MAR", "Morocco"),
    ("PER", "Peru"),
    ("TUN", "Tunisia"),
    ("DNK", "Denmark"),
    ("LBY", "Libya"),
    ("CHL", "Chile"),
    ("ISL", "Iceland"),
    ("PRT", "Portugal"),
    ("DOM", "Dominican Republic"),
    ("SLV", "El Salvador"),
    ("LUX", "Luxembourg"),
    ("DZA", "Algeria"),
    ("ECU", "Ecuador"),
    ("RWA", "Rwanda"),
    ("GHA", "Ghana"),
];

static BY_CODE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| COUNTRY_CODES.iter().copied().collect());

/// Returns the display name for a code, if known.
pub fn country_name(code: &str) -> Option<&'static str> {
    BY_CODE.get(code).copied()
}

/// Returns the display name for a code, or the code itself when unmapped.
pub fn resolve(code: &str) -> String {
    country_name(code).map(String::from).unwrap_or_else(|| code.to_string())
}

/// Takes the delegation code from a contestant ID (its first three characters).
pub fn code_of(id: &str) -> &str {
    match id.char_indices().nth(3) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}
