/// Next identifier for a table currently holding `employee_count` rows.
///
/// `0 -> EMP001`, `9 -> EMP010`, `999 -> EMP1000`. Count-based, so callers
/// must be ready for the result to already exist.
pub fn generate_employee_id(employee_count: u64) -> String {
    format!("EMP{:03}", employee_count + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validators::validate_employee_id_format;
    use proptest::prelude::*;

    #[test]
    fn known_values() {
        assert_eq!(generate_employee_id(0), "EMP001");
        assert_eq!(generate_employee_id(9), "EMP010");
        assert_eq!(generate_employee_id(98), "EMP099");
        assert_eq!(generate_employee_id(999), "EMP1000");
    }

    proptest! {
        #[test]
        fn generated_ids_are_well_formed(count in 0u64..10_000_000) {
            let id = generate_employee_id(count);
            prop_assert!(validate_employee_id_format(&id));
            let seq: u64 = id.trim_start_matches("EMP").parse().unwrap();
            prop_assert_eq!(seq, count + 1);
        }
    }
}
