// Shared sample indexes for integration tests.
#![allow(dead_code)]

/// Additive hundreds at double stake; a group of three and a group of four.
pub const FLEKY: &str = "\
2024-03-14 U Fleků {hundred=add multiplier=2}
Pepa +k130 e
Franta -s-h +c
Jarda -v

Pepa +1s-h*
Franta
Jarda
Mirek -k120
";

/// Default scoring, one group.
pub const RUZEK: &str = "\
4.4.2024 Na Růžku
Pepa +c
Karel -s-h
Franta e
";

/// Balances of FLEKY, per group, in group order.
pub const FLEKY_GROUPS: [&[(&str, i64)]; 2] = [
    &[("Pepa", 960), ("Franta", 1080), ("Jarda", -2040)],
    &[("Pepa", 600), ("Franta", 120), ("Jarda", 120), ("Mirek", -840)],
];

pub fn owned(rows: &[(&str, i64)]) -> Vec<(String, i64)> {
    rows.iter()
        .map(|(name, balance)| (name.to_string(), *balance))
        .collect()
}
