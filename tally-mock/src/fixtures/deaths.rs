// Cumulative excess deaths (central estimate). Gaps are reporting holes.

pub fn by_country(country: &str) -> Option<&'static [(&'static str, Option<f64>)]> {
    match country {
        "Mexico" => Some(&[
            ("2020-03-15", Some(0.0)),
            ("2020-03-22", Some(120.0)),
            ("2020-03-29", None),
            ("2020-04-05", Some(860.0)),
            ("2020-04-19", Some(2_410.0)),
            ("2020-04-30", None),
            ("2020-05-03", Some(4_950.0)),
            ("2020-05-17", Some(8_300.0)),
            ("2020-05-31", None),
            ("2020-06-14", None),
        ]),
        "Philippines" => Some(&[
            ("2020-03-15", Some(0.0)),
            ("2020-03-29", Some(40.0)),
            ("2020-04-12", None),
            ("2020-04-26", Some(310.0)),
            ("2020-05-10", Some(620.0)),
            ("2020-05-31", Some(880.0)),
        ]),
        _ => None,
    }
}
