//! Needs, stock and identifier tests
//!
//! Property-based and unit tests for:
//! - Seed quantity derivation from species coefficients
//! - Lot id sequencing and provenance code regeneration
//! - Needs coverage, deficit and surplus classification

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::balance::{self, analyze, deficits, overall_coverage, species_balances, surpluses, GroupBy};
use shared::codes::{next_lot_sequence, provenance_code, species_abbreviation};
use shared::models::*;

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Coefficients in kg per 1000 plants, up to three decimals
fn coefficient_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..50_000).prop_map(|thousandths| Decimal::new(thousandths, 3))
}

/// Whole kilograms of need or stock
fn kg_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..5_000).prop_map(Decimal::from)
}

fn scientific_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,10} [a-z]{3,12}"
}

fn region_code_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("I3".to_string()),
        Just("IV1".to_string()),
        Just("VIII".to_string()),
        "[A-Z]{1,3}[0-9]?",
    ]
}

/// Provenance names with spaces and punctuation
fn provenance_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z' ]{1,20}[A-Za-z]"
}

/// (need kg, stock kg) for up to eight species
fn species_totals_strategy() -> impl Strategy<Value = Vec<(Decimal, Decimal)>> {
    prop::collection::vec((kg_strategy(), kg_strategy()), 1..8)
}

// ============================================================================
// Fixtures
// ============================================================================

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn species(idx: usize, coefficient: Option<Decimal>) -> Species {
    Species {
        id: format!("esp-{:03}", idx),
        scientific_name: format!("Genus species{}", idx),
        common_name: format!("Espèce {}", idx),
        genus: "Genus".to_string(),
        group: "Groupe par défaut".to_string(),
        seeding_coefficient_kg_per_1000_plants: coefficient,
    }
}

fn need(idx: usize, kg: Decimal) -> SeedNeed {
    SeedNeed {
        id: format!("BS-{:03}", idx),
        dranef: "FES MEKNES".to_string(),
        province: "Ifrane".to_string(),
        project: "Projet".to_string(),
        perimeter_name: "Périmètre".to_string(),
        species_id: format!("esp-{:03}", idx),
        number_of_plants: 0,
        calculated_seed_quantity_kg: kg,
        request_date: date(),
        status: SeedNeedStatus::New,
    }
}

fn stock(idx: usize, kg: Decimal) -> StockItem {
    StockItem {
        id: format!("STK-{:03}", idx),
        lot_id: format!("24-GS-IV1-{:03}", idx),
        species_id: format!("esp-{:03}", idx),
        quantity_kg: kg,
        entry_date: date(),
        srs_id: "srs-01".to_string(),
    }
}

fn dataset_from_totals(totals: &[(Decimal, Decimal)]) -> Dataset {
    let mut data = Dataset {
        srs: vec![Srs {
            id: "srs-01".to_string(),
            name: "Azrou".to_string(),
            dranef: "FES MEKNES".to_string(),
            province: "Ifrane".to_string(),
        }],
        ..Default::default()
    };
    for (idx, (needed, stocked)) in totals.iter().enumerate() {
        data.species.push(species(idx, None));
        if !needed.is_zero() {
            data.seed_needs.push(need(idx, *needed));
        }
        if !stocked.is_zero() {
            data.stock_items.push(stock(idx, *stocked));
        }
    }
    data
}

// ============================================================================
// Seed Quantity Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_seed_quantity_follows_coefficient(
        plants in 0u64..2_000_000,
        coefficient in coefficient_strategy(),
    ) {
        let qty = calculate_seed_quantity(plants, Some(coefficient));
        let expected = Decimal::from(plants) / Decimal::from(1000) * coefficient;
        prop_assert_eq!(qty, expected);
        prop_assert!(qty >= Decimal::ZERO);
    }

    #[test]
    fn prop_seed_quantity_zero_without_coefficient(plants in 0u64..2_000_000) {
        prop_assert_eq!(calculate_seed_quantity(plants, None), Decimal::ZERO);
    }

    #[test]
    fn prop_refresh_overrides_stored_quantities(
        plants in 0u64..500_000,
        coefficient in coefficient_strategy(),
        stored in kg_strategy(),
    ) {
        let mut n = need(0, stored);
        n.number_of_plants = plants;
        let mut data = Dataset {
            species: vec![species(0, Some(coefficient))],
            seed_needs: vec![n],
            ..Default::default()
        };

        data.refresh_seed_quantities();
        prop_assert_eq!(
            data.seed_needs[0].calculated_seed_quantity_kg,
            calculate_seed_quantity(plants, Some(coefficient))
        );
    }
}

// ============================================================================
// Identifier Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_lot_sequence_is_one_past_max(
        suffixes in prop::collection::vec(1u32..999, 0..20),
        other in prop::collection::vec(1u32..999, 0..5),
    ) {
        let prefix = "24-PH-I3";
        let mut ids: Vec<String> = suffixes.iter().map(|n| format!("{}-{:03}", prefix, n)).collect();
        // Same digits under another prefix never count
        ids.extend(other.iter().map(|n| format!("24-PH-I31-{:03}", n)));

        let expected = suffixes.iter().max().copied().unwrap_or(0) + 1;
        prop_assert_eq!(next_lot_sequence(prefix, ids.iter().map(String::as_str)), Some(expected));
    }

    #[test]
    fn prop_provenance_code_is_deterministic(
        region in region_code_strategy(),
        scientific_name in scientific_name_strategy(),
        name in provenance_name_strategy(),
    ) {
        let code = provenance_code(&region, &scientific_name, &name);
        prop_assert_eq!(&code, &provenance_code(&region, &scientific_name, &name));

        let prefix = format!("{}-{}-", region, species_abbreviation(&scientific_name));
        prop_assert!(code.starts_with(&prefix));
        prop_assert!(code[prefix.len()..].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn prop_renaming_only_changes_trailing_segment(
        region in region_code_strategy(),
        scientific_name in scientific_name_strategy(),
        old_name in provenance_name_strategy(),
        new_name in provenance_name_strategy(),
    ) {
        let before = provenance_code(&region, &scientific_name, &old_name);
        let after = provenance_code(&region, &scientific_name, &new_name);

        let prefix = format!("{}-{}-", region, species_abbreviation(&scientific_name));
        prop_assert!(before.starts_with(&prefix));
        prop_assert!(after.starts_with(&prefix));
    }

    #[test]
    fn prop_refresh_provenance_codes_is_idempotent(
        region in region_code_strategy(),
        scientific_name in scientific_name_strategy(),
        name in provenance_name_strategy(),
    ) {
        let mut data = Dataset {
            species: vec![Species {
                scientific_name: scientific_name.clone(),
                ..species(1, None)
            }],
            regions: vec![Region {
                id: "reg-X".to_string(),
                code: region.clone(),
                name: "Région".to_string(),
            }],
            provenances: vec![Provenance {
                id: "prov-X".to_string(),
                code: "stale".to_string(),
                name: name.clone(),
                localisation: String::new(),
                region_id: "reg-X".to_string(),
                species_id: "esp-001".to_string(),
            }],
            ..Default::default()
        };

        prop_assert_eq!(data.refresh_provenance_codes(), 1);
        prop_assert_eq!(data.refresh_provenance_codes(), 0);
        prop_assert_eq!(
            &data.provenances[0].code,
            &provenance_code(&region, &scientific_name, &name)
        );
    }
}

// ============================================================================
// Coverage Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_full_stock_means_full_coverage(totals in species_totals_strategy()) {
        // Raise every stock to at least its need
        let covered: Vec<(Decimal, Decimal)> = totals
            .iter()
            .map(|(needed, stocked)| (*needed, *needed + *stocked))
            .collect();
        let data = dataset_from_totals(&covered);

        prop_assert_eq!(overall_coverage(&species_balances(&data)), Decimal::ONE_HUNDRED);
        prop_assert!(deficits(&species_balances(&data)).is_empty());
    }

    #[test]
    fn prop_coverage_is_bounded(totals in species_totals_strategy()) {
        let data = dataset_from_totals(&totals);
        let coverage = overall_coverage(&species_balances(&data));
        prop_assert!(coverage >= Decimal::ZERO);
        prop_assert!(coverage <= Decimal::ONE_HUNDRED);
    }

    #[test]
    fn prop_deficit_and_surplus_are_disjoint_and_exhaustive(totals in species_totals_strategy()) {
        let data = dataset_from_totals(&totals);
        let balances = species_balances(&data);
        let deficit_names: Vec<String> = deficits(&balances).into_iter().map(|d| d.species_name).collect();
        let surplus_names: Vec<String> = surpluses(&balances).into_iter().map(|s| s.species_name).collect();

        for b in &balances {
            let in_deficit = deficit_names.contains(&b.species_name);
            let in_surplus = surplus_names.contains(&b.species_name);
            prop_assert!(!(in_deficit && in_surplus));

            if b.stocked_kg < b.needed_kg {
                prop_assert!(in_deficit);
            } else if b.stocked_kg > b.needed_kg && b.needed_kg > Decimal::ZERO {
                prop_assert!(in_surplus);
            } else {
                prop_assert!(!in_deficit && !in_surplus);
            }
        }
    }

    #[test]
    fn prop_analysis_rows_never_empty(totals in species_totals_strategy()) {
        let data = dataset_from_totals(&totals);
        for mode in [GroupBy::Species, GroupBy::Division, GroupBy::Detailed] {
            for row in analyze(&data, mode) {
                prop_assert!(!(row.needed_kg.is_zero() && row.stocked_kg.is_zero()));
                prop_assert_eq!(row.balance_kg, row.stocked_kg - row.needed_kg);
            }
        }
    }
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[test]
fn test_deficit_scenario_a_b_c() {
    // A: need 100 / stock 40, B: need 0 / stock 30, C: 50 / 50
    let data = dataset_from_totals(&[
        (Decimal::from(100), Decimal::from(40)),
        (Decimal::ZERO, Decimal::from(30)),
        (Decimal::from(50), Decimal::from(50)),
    ]);
    let balances = species_balances(&data);

    let d = deficits(&balances);
    assert_eq!(d.len(), 1);
    assert_eq!(d[0].species_name, "Espèce 0");
    assert_eq!(d[0].deficit_kg, Decimal::from(60));
    assert!(surpluses(&balances).is_empty());
}

#[test]
fn test_no_need_is_full_coverage() {
    let data = dataset_from_totals(&[(Decimal::ZERO, Decimal::from(30))]);
    assert_eq!(overall_coverage(&species_balances(&data)), Decimal::ONE_HUNDRED);
}

#[test]
fn test_chart_keeps_top_needs() {
    let totals: Vec<(Decimal, Decimal)> = (1..=12)
        .map(|kg| (Decimal::from(kg * 10), Decimal::ZERO))
        .collect();
    let data = dataset_from_totals(&totals);

    let status = balance::needs_status(&data, 10);
    assert_eq!(status.chart.len(), 10);
    assert_eq!(status.chart[0].needed_kg, Decimal::from(120));
    assert!(status
        .chart
        .windows(2)
        .all(|w| w[0].needed_kg >= w[1].needed_kg));
}
