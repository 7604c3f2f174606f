use std::collections::HashSet;

use ether_chemicals::{Chemicals, ChemicalsError};
use proptest::prelude::*;

fn unique_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[A-Za-z][A-Za-z0-9]{0,11}", 0..24)
        .prop_map(|ids| ids.into_iter().collect())
}

proptest! {
    #[test]
    fn every_identifier_resolves_to_its_position(ids in unique_ids()) {
        let chemicals = Chemicals::new(ids.clone()).unwrap();

        prop_assert_eq!(chemicals.size(), ids.len());
        for (position, id) in ids.iter().enumerate() {
            prop_assert_eq!(chemicals.index(id).unwrap(), position);
        }
    }

    #[test]
    fn indices_follow_request_order(ids in unique_ids(), seed in any::<u64>()) {
        let chemicals = Chemicals::new(ids.clone()).unwrap();

        let mut requested = ids.clone();
        if !requested.is_empty() {
            let len = requested.len();
            requested.rotate_left((seed as usize) % len);
        }

        let positions = chemicals.indices(&requested).unwrap();
        let resolved: Vec<&str> = positions
            .iter()
            .map(|&i| chemicals.id(i).unwrap())
            .collect();
        prop_assert_eq!(resolved, requested.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn unknown_identifier_is_reported(ids in unique_ids()) {
        let known: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let chemicals = Chemicals::new(ids.clone()).unwrap();

        let missing = "0-not-a-chemical";
        prop_assume!(!known.contains(missing));
        prop_assert_eq!(
            chemicals.index(missing),
            Err(ChemicalsError::UnknownId(missing.to_owned()))
        );
    }
}

#[cfg(feature = "serde")]
#[test]
fn serializes_as_identifier_list() {
    let chemicals = Chemicals::new(["Water", "Ethanol"]).unwrap();

    let json = serde_json::to_string(&chemicals).unwrap();
    assert_eq!(json, r#"["Water","Ethanol"]"#);

    let restored: Chemicals = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, chemicals);
}

#[cfg(feature = "serde")]
#[test]
fn deserializing_duplicates_fails() {
    let result: Result<Chemicals, _> = serde_json::from_str(r#"["Water","Water"]"#);

    assert!(result.is_err());
}
