//! Feature derivation integration tests
//!
//! Runs the full derivation over a CSV fixture and checks the naming and
//! value contracts with property-based tests.

mod common;

use common::fixtures::{fixture_path, influencers};
use pairfeat_core::{
    comparison_column, data_prep, ratio_column, tag_originals, DataColumn, DerivationConfig,
    FeatureDeriver, FeatureError, Generation, Table,
};
use proptest::prelude::*;

fn floats(table: &Table, name: &str) -> Vec<f64> {
    table
        .column(name)
        .and_then(DataColumn::to_f64)
        .unwrap_or_else(|| panic!("missing numeric column {}", name))
}

// === Default configuration over the fixture ===

#[test]
fn test_fixture_column_counts() {
    let input = influencers();
    assert_eq!(input.num_columns(), 23);

    let derived = data_prep(&input).unwrap();
    let names = derived.column_names();

    // 11 base attributes + 4 rates shared across sides
    let ratios = names.iter().filter(|n| n.starts_with("fe1__")).count();
    let comparisons = names.iter().filter(|n| n.starts_with("fe2__")).count();
    let originals = names.iter().filter(|n| n.starts_with("fe0__")).count();
    assert_eq!(ratios, 15);
    assert_eq!(comparisons, 15);
    assert_eq!(originals, 30);
    assert_eq!(derived.num_columns(), 23 + 8 + 30);
    assert_eq!(derived.num_rows(), 6);
}

#[test]
fn test_fixture_passthrough_columns_untouched() {
    let input = influencers();
    let derived = data_prep(&input).unwrap();

    assert_eq!(derived.column_names()[0], "choice");
    assert_eq!(derived.column("choice"), input.column("Choice"));
    assert_eq!(
        derived.column("fe0__a_follower_count"),
        input.column("A_follower_count")
    );
}

#[test]
fn test_fixture_rate_values() {
    let derived = data_prep(&influencers()).unwrap();

    let follow = floats(&derived, "fe0__a_follow_rate");
    assert!((follow[0] - 302.0 / 229.0).abs() < 1e-12);

    let popularity = floats(&derived, "fe0__b_popularity_rate");
    assert!((popularity[1] - 1495.0 / 1.100503).abs() < 1e-9);
}

#[test]
fn test_identical_sides_never_compare_greater() {
    // Row 5 holds the same account on both sides
    let derived = data_prep(&influencers()).unwrap();

    let comparisons = derived
        .columns()
        .filter(|c| Generation::of(&c.name) == Some(Generation::Comparison))
        .collect::<Vec<_>>();
    assert_eq!(comparisons.len(), 15);

    for column in comparisons {
        match &column.data {
            DataColumn::Int64(v) => assert_eq!(v[5], 0, "{} on the identical row", column.name),
            other => panic!("{} has type {:?}", column.name, other.dtype()),
        }
    }
}

#[test]
fn test_config_file_over_fixture() {
    let config = DerivationConfig::load(fixture_path("follow_only.toml")).unwrap();
    let derived = FeatureDeriver::new(config)
        .unwrap()
        .derive(&influencers())
        .unwrap();

    assert!(derived.contains("fe1__a_ratio_b_follow_rate"));
    assert!(!derived.contains("fe0__a_mention_rate"));
    // 11 base attributes + 1 rate
    assert_eq!(derived.num_columns(), 23 + 2 + 24);
}

#[test]
fn test_derivation_does_not_mutate_input() {
    let input = influencers();
    let before = input.clone();
    data_prep(&input).unwrap();
    assert_eq!(input, before);
}

#[test]
fn test_retagging_derived_table_fails() {
    let derived = data_prep(&influencers()).unwrap();
    assert!(matches!(
        tag_originals(&derived),
        Err(FeatureError::NameCollision(_))
    ));
    assert!(matches!(
        data_prep(&derived),
        Err(FeatureError::MissingAttribute(_))
    ));
}

// === Property-based tests ===

fn paired_table(pairs: &[Vec<(i64, i64)>]) -> Table {
    let a_side = pairs.iter().enumerate().map(|(i, rows)| {
        (
            format!("a_attr{}", i),
            DataColumn::Int64(rows.iter().map(|(a, _)| *a).collect()),
        )
    });
    let b_side = pairs.iter().enumerate().map(|(i, rows)| {
        (
            format!("b_attr{}", i),
            DataColumn::Int64(rows.iter().map(|(_, b)| *b).collect()),
        )
    });
    Table::from_columns(a_side.chain(b_side)).unwrap()
}

fn paired_values() -> impl Strategy<Value = Vec<Vec<(i64, i64)>>> {
    (1usize..5, 1usize..8).prop_flat_map(|(attributes, rows)| {
        prop::collection::vec(
            prop::collection::vec((0i64..1000, 0i64..1000), rows),
            attributes,
        )
    })
}

proptest! {
    #[test]
    fn test_two_features_per_shared_attribute(pairs in paired_values()) {
        let table = paired_table(&pairs);
        let deriver = FeatureDeriver::new(DerivationConfig::without_rates()).unwrap();
        let derived = deriver.derive(&table).unwrap();

        prop_assert_eq!(derived.num_columns(), table.num_columns() + 2 * pairs.len());
        for i in 0..pairs.len() {
            let attribute = format!("attr{}", i);
            prop_assert!(derived.contains(&ratio_column(&attribute)));
            prop_assert!(derived.contains(&comparison_column(&attribute)));
        }
    }

    #[test]
    fn test_feature_values_follow_definitions(pairs in paired_values()) {
        let derived = FeatureDeriver::new(DerivationConfig::without_rates())
            .unwrap()
            .derive(&paired_table(&pairs))
            .unwrap();

        for (i, rows) in pairs.iter().enumerate() {
            let attribute = format!("attr{}", i);
            let ratio = floats(&derived, &ratio_column(&attribute));
            let comparison = match derived.column(&comparison_column(&attribute)) {
                Some(DataColumn::Int64(v)) => v.clone(),
                other => panic!("unexpected comparison column: {:?}", other),
            };

            for (row, (a, b)) in rows.iter().enumerate() {
                let expected = *a as f64 / (*b as f64 + 1.0);
                prop_assert!((ratio[row] - expected).abs() < 1e-12);
                prop_assert_eq!(comparison[row], i64::from(a > b));
            }
        }
    }

    #[test]
    fn test_every_side_column_is_tagged(pairs in paired_values()) {
        let derived = FeatureDeriver::new(DerivationConfig::without_rates())
            .unwrap()
            .derive(&paired_table(&pairs))
            .unwrap();

        for name in derived.column_names() {
            prop_assert!(!name.starts_with("a_") && !name.starts_with("b_"), "untagged: {}", name);
            prop_assert!(Generation::of(name).is_some(), "no generation tag: {}", name);
        }
    }
}
