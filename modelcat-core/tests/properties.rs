//! Property-based tests for filtering and sorting using proptest.

use proptest::prelude::*;

use modelcat_core::format::{format_parameter_count, parse_parameter_count};
use modelcat_core::{
    FilterDomains, FilterState, LicenseChoice, ModelRecord, RangeFilter, SortColumn,
    filter_models, sort_models,
};

const PROVIDERS: [&str; 4] = ["OpenAI", "Meta", "Mistral", "Google"];
const LICENSES: [&str; 3] = ["MIT", "Apache-2.0", "Proprietary"];

fn record(
    id: u64,
    provider: usize,
    params: Option<u64>,
    context: Option<u64>,
    license: Option<usize>,
) -> ModelRecord {
    ModelRecord {
        id,
        name: format!("model-{}", id % 7),
        developer: None,
        release_date: None,
        parameter_count: params,
        architecture_type: None,
        training_data_size: None,
        description: None,
        use_cases: None,
        provider_id: None,
        provider_name: PROVIDERS[provider].to_string(),
        provider_website: None,
        provider_logo: None,
        context_size: context,
        license: license.map(|i| LICENSES[i].to_string()),
    }
}

fn catalog() -> impl Strategy<Value = Vec<ModelRecord>> {
    prop::collection::vec(
        (
            0..PROVIDERS.len(),
            prop::option::weighted(0.8, 1u64..500_000),
            prop::option::weighted(0.8, 512u64..1_000_000),
            prop::option::weighted(0.8, 0..LICENSES.len()),
        ),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (p, params, ctx, lic))| record(i as u64, p, params, ctx, lic))
            .collect()
    })
}

fn state_for(
    models: &[ModelRecord],
    providers: Vec<usize>,
    license: Option<usize>,
    cut: (u64, u64),
) -> FilterState {
    let domains = FilterDomains::from_models(models);
    let mut state = FilterState::unrestricted(&domains);
    for p in providers {
        state.providers.insert(PROVIDERS[p].to_string());
    }
    if let Some(l) = license {
        state.license = LicenseChoice::Named(LICENSES[l].to_string());
    }
    if let Some(domain) = domains.parameter_range {
        let span = domain.max - domain.min;
        state.parameter_count = Some(RangeFilter::new(
            domain,
            domain.min + span * cut.0 / 100,
            domain.max - span * cut.1 / 100,
        ));
    }
    state
}

fn ids(models: &[&ModelRecord]) -> Vec<u64> {
    models.iter().map(|m| m.id).collect()
}

proptest! {
    #[test]
    fn filter_is_an_ordered_subsequence(
        models in catalog(),
        providers in prop::collection::vec(0..PROVIDERS.len(), 0..3),
        license in prop::option::of(0..LICENSES.len()),
        cut in (0u64..50, 0u64..50),
    ) {
        let state = state_for(&models, providers, license, cut);
        let kept = filter_models(&models, &state);
        let kept_ids = ids(&kept);
        prop_assert!(kept_ids.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(kept.iter().all(|m| state.admits(m)));
        prop_assert_eq!(
            kept_ids.len(),
            models.iter().filter(|m| state.admits(m)).count()
        );
    }

    #[test]
    fn filter_is_idempotent(
        models in catalog(),
        providers in prop::collection::vec(0..PROVIDERS.len(), 0..3),
        license in prop::option::of(0..LICENSES.len()),
        cut in (0u64..50, 0u64..50),
    ) {
        let state = state_for(&models, providers, license, cut);
        let once: Vec<ModelRecord> = filter_models(&models, &state).into_iter().cloned().collect();
        let twice: Vec<ModelRecord> = filter_models(&once, &state).into_iter().cloned().collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn unrestricted_filter_returns_everything(models in catalog()) {
        let state = FilterState::unrestricted(&FilterDomains::from_models(&models));
        let kept = filter_models(&models, &state);
        prop_assert_eq!(kept.len(), models.len());
        prop_assert!(kept.iter().zip(&models).all(|(a, b)| *a == b));
    }

    #[test]
    fn sort_is_stable_and_not_applicable_last(models in catalog(), column in 0usize..6) {
        let column = SortColumn::ALL[column];
        let mut rows: Vec<&ModelRecord> = models.iter().collect();
        sort_models(&mut rows, column);

        let first_na = rows
            .iter()
            .position(|m| column.key(m) == modelcat_core::SortKey::NotApplicable)
            .unwrap_or(rows.len());
        prop_assert!(rows[first_na..]
            .iter()
            .all(|m| column.key(m) == modelcat_core::SortKey::NotApplicable));

        // Equal keys keep catalog order (ids were assigned in catalog order).
        for pair in rows.windows(2) {
            if column.key(pair[0]) == column.key(pair[1]) {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }

    #[test]
    fn parameter_suffix_round_trip_is_monotonic(a in 0u64..1_000_000, b in 0u64..1_000_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo_m = parse_parameter_count(&format_parameter_count(lo)).unwrap();
        let hi_m = parse_parameter_count(&format_parameter_count(hi)).unwrap();
        prop_assert!(lo_m <= hi_m);
        prop_assert!(lo_m <= lo);
    }
}

#[test]
fn sorting_by_parameter_count_puts_missing_last() {
    let models = vec![
        record(0, 0, Some(7000), None, None),
        record(1, 0, Some(13), None, None),
        record(2, 0, None, None, None),
    ];
    let mut rows: Vec<&ModelRecord> = models.iter().collect();
    sort_models(&mut rows, SortColumn::ParameterCount);
    let params: Vec<Option<u64>> = rows.iter().map(|m| m.parameter_count).collect();
    assert_eq!(params, vec![Some(13), Some(7000), None]);
}

#[test]
fn selecting_a_license_keeps_matching_rows_in_order() {
    let models = vec![
        record(0, 0, Some(1), Some(1), Some(0)),
        record(1, 1, Some(1), Some(1), Some(1)),
        record(2, 2, Some(1), Some(1), Some(0)),
    ];
    let mut state = FilterState::unrestricted(&FilterDomains::from_models(&models));
    state.license = LicenseChoice::Named("MIT".to_string());
    assert_eq!(ids(&filter_models(&models, &state)), vec![0, 2]);
}
