use std::collections::BTreeMap;

/// Drop absent and non-finite values before an insert, keeping only plain
/// finite numbers. The external source reports missing line items as nulls
/// and occasionally produces NaN or infinite figures; none of those are
/// storable.
pub fn sanitize_numeric_fields(
    fields: impl IntoIterator<Item = (String, Option<f64>)>,
) -> BTreeMap<String, f64> {
    fields
        .into_iter()
        .filter_map(|(key, value)| match value {
            Some(v) if v.is_finite() => Some((key, v)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_null_nan_and_infinite_values() {
        let input = vec![
            ("a".to_string(), None),
            ("b".to_string(), Some(f64::NAN)),
            ("c".to_string(), Some(f64::INFINITY)),
            ("neg".to_string(), Some(f64::NEG_INFINITY)),
            ("d".to_string(), Some(5.0)),
            ("e".to_string(), Some(7.0)),
        ];

        let clean = sanitize_numeric_fields(input);

        assert_eq!(clean.len(), 2);
        assert_eq!(clean["d"], 5.0);
        assert_eq!(clean["e"], 7.0);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(sanitize_numeric_fields(Vec::new()).is_empty());
    }
}
