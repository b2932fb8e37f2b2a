// Weekly confirmed cases, dated on the Sunday that closes each reporting week.

pub fn by_country(country: &str) -> Option<&'static [(&'static str, Option<f64>)]> {
    match country {
        "Mexico" => Some(&[
            ("2020-03-01", Some(5.0)),
            ("2020-03-08", Some(12.0)),
            ("2020-03-15", Some(41.0)),
            ("2020-03-22", Some(203.0)),
            ("2020-03-29", Some(676.0)),
            ("2020-04-05", Some(1_236.0)),
            ("2020-04-12", Some(2_234.0)),
            ("2020-04-19", Some(3_317.0)),
            ("2020-04-26", Some(4_820.0)),
            ("2020-05-03", Some(7_147.0)),
        ]),
        "Philippines" => Some(&[
            ("2020-03-08", Some(3.0)),
            ("2020-03-15", Some(130.0)),
            ("2020-03-22", Some(247.0)),
            ("2020-03-29", Some(1_038.0)),
            ("2020-04-05", Some(2_066.0)),
            ("2020-04-12", Some(1_410.0)),
            ("2020-04-19", Some(1_713.0)),
            ("2020-04-26", Some(1_400.0)),
            ("2020-05-03", Some(1_637.0)),
            ("2020-05-10", None),
        ]),
        _ => None,
    }
}
