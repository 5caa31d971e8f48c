use proptest::prelude::*;
use proptest::test_runner::Config;
use rollbook::validate::{is_valid_age, is_valid_id, normalize_id, MAX_AGE, MIN_AGE};
use rollbook::StudentId;

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn normalize_id_is_canonical_and_idempotent(raw in "[cC][uU]-[0-9]{4}-[0-9]{4}") {
        prop_assert!(is_valid_id(&raw));
        let once = normalize_id(&raw).expect("accepted id normalizes");

        prop_assert!(once.starts_with("CU-"));
        prop_assert_eq!(&once[2..], &raw[2..]);
        prop_assert_eq!(normalize_id(&once), Some(once.clone()));
        let parsed = StudentId::parse(&raw).expect("id parse");
        prop_assert_eq!(parsed.as_str(), once.as_str());
    }

    #[test]
    fn normalize_id_rejects_other_prefixes(
        prefix in "[A-Za-z]{2}",
        digits in "[0-9]{4}-[0-9]{4}"
    ) {
        let raw = format!("{prefix}-{digits}");
        let accepted = prefix.eq_ignore_ascii_case("cu");
        prop_assert_eq!(is_valid_id(&raw), accepted);
        prop_assert_eq!(normalize_id(&raw).is_some(), accepted);
    }

    #[test]
    fn age_accepts_exactly_the_allowed_range(digits in "[0-9]{1,30}") {
        let value: u128 = digits.parse().expect("digit string");
        let in_range = (u128::from(MIN_AGE)..=u128::from(MAX_AGE)).contains(&value);
        prop_assert_eq!(is_valid_age(&digits), in_range);
    }

    #[test]
    fn age_rejects_anything_with_a_non_digit(
        head in "[0-9]{0,3}",
        bad in "[^0-9]",
        tail in "[0-9]{0,3}"
    ) {
        let raw = format!("{head}{bad}{tail}");
        prop_assert!(!is_valid_age(&raw));
    }
}
