use idrscan_core::config::DomainParameters;
use idrscan_core::domains::{domains_from_profile, get_domains};
use idrscan_core::signal::binarize;
use idrscan_core::types::{Domain, DomainKind};
use proptest::prelude::*;

const RESIDUES: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

fn sequence_for(length: usize) -> String {
    (0..length)
        .map(|i| RESIDUES[(i * 11 + i / 3) % RESIDUES.len()] as char)
        .collect()
}

fn profile_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..=1.0, 1..400)
}

fn parameters_strategy() -> impl Strategy<Value = DomainParameters> {
    (0.05f64..0.95, 0usize..30, 1usize..80, 0usize..15, any::<bool>()).prop_map(
        |(threshold, min_idr, min_folded, gap_closure, override_minsize)| DomainParameters {
            disorder_threshold: threshold,
            minimum_idr_size: min_idr,
            minimum_folded_domain: min_folded,
            gap_closure,
            override_folded_domain_minsize: override_minsize,
            ..Default::default()
        },
    )
}

fn sorted_domains(disordered: &[Domain], folded: &[Domain]) -> Vec<Domain> {
    let mut all: Vec<Domain> = disordered.iter().chain(folded).cloned().collect();
    all.sort_by_key(|d| d.start);
    all
}

proptest! {
    #[test]
    fn domains_partition_the_sequence(
        profile in profile_strategy(),
        params in parameters_strategy(),
    ) {
        let sequence = sequence_for(profile.len());
        let result = get_domains(&sequence, &profile, &params).unwrap();

        prop_assert_eq!(result.smoothed.len(), profile.len());

        let mut cursor = 0;
        for domain in sorted_domains(&result.disordered, &result.folded) {
            prop_assert_eq!(domain.start, cursor, "gap or overlap at {}", cursor);
            prop_assert!(domain.end > domain.start);
            cursor = domain.end;
        }
        prop_assert_eq!(cursor, profile.len());
    }

    #[test]
    fn domains_slice_their_own_residues(
        profile in profile_strategy(),
        params in parameters_strategy(),
    ) {
        let sequence = sequence_for(profile.len());
        let result = get_domains(&sequence, &profile, &params).unwrap();

        for domain in &result.disordered {
            prop_assert_eq!(domain.kind, DomainKind::Disordered);
            prop_assert_eq!(&domain.sequence, &sequence[domain.start..domain.end]);
        }
        for domain in &result.folded {
            prop_assert_eq!(domain.kind, DomainKind::Folded);
            prop_assert_eq!(&domain.sequence, &sequence[domain.start..domain.end]);
        }
    }

    #[test]
    fn idrs_respect_minimum_size(
        profile in profile_strategy(),
        params in parameters_strategy(),
    ) {
        let boundaries = domains_from_profile(&profile, &params).unwrap();

        if profile.len() >= params.whole_sequence_cutoff() {
            for idr in &boundaries.disordered {
                prop_assert!(
                    idr.len() >= params.minimum_idr_size,
                    "IDR {:?} shorter than {}",
                    idr,
                    params.minimum_idr_size
                );
            }
        } else {
            prop_assert_eq!(boundaries.disordered.len() + boundaries.folded.len(), 1);
        }
    }

    #[test]
    fn decomposition_is_pure(
        profile in profile_strategy(),
        params in parameters_strategy(),
    ) {
        let sequence = sequence_for(profile.len());
        let snapshot = profile.clone();

        let first = get_domains(&sequence, &profile, &params).unwrap();
        let second = get_domains(&sequence, &profile, &params).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(profile, snapshot);
    }

    #[test]
    fn binarized_mask_shrinks_as_threshold_rises(
        profile in profile_strategy(),
        low in 0.0f64..1.0,
        delta in 0.0f64..1.0,
    ) {
        let high = (low + delta).min(1.0);
        let low_mask = binarize(&profile, low);
        let high_mask = binarize(&profile, high);

        for (l, h) in low_mask.iter().zip(&high_mask) {
            prop_assert!(h <= l);
        }
    }
}

fn disordered_residues(profile: &[f64], threshold: f64) -> usize {
    let params = DomainParameters {
        disorder_threshold: threshold,
        ..Default::default()
    };
    domains_from_profile(profile, &params)
        .unwrap()
        .disordered
        .iter()
        .map(|interval| interval.len())
        .sum()
}

// Not a property over random profiles: lowering the threshold also lowers the
// reclassification tier cut-offs, so a short random profile can gain a whole
// disordered gap at a higher threshold.
#[test]
fn disordered_fraction_shrinks_with_threshold_on_fixed_profiles() {
    let steps: Vec<f64> = [(0.9, 60), (0.1, 80), (0.8, 40), (0.3, 30)]
        .into_iter()
        .flat_map(|(value, count)| std::iter::repeat_n(value, count))
        .collect();
    let wave: Vec<f64> = (0..240)
        .map(|i| 0.5 + 0.45 * (f64::from(i) / 15.0).sin())
        .collect();

    for profile in [steps, wave] {
        let counts: Vec<usize> = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8]
            .into_iter()
            .map(|threshold| disordered_residues(&profile, threshold))
            .collect();
        assert!(
            counts.windows(2).all(|pair| pair[1] <= pair[0]),
            "not monotone: {counts:?}"
        );
    }
}

#[test]
fn step_profile_decomposition() {
    let steps: Vec<f64> = [(0.9, 60), (0.1, 80), (0.8, 40), (0.3, 30)]
        .into_iter()
        .flat_map(|(value, count)| std::iter::repeat_n(value, count))
        .collect();
    let params = DomainParameters {
        disorder_threshold: 0.5,
        ..Default::default()
    };

    let boundaries = domains_from_profile(&steps, &params).unwrap();
    let idrs: Vec<(usize, usize)> = boundaries
        .disordered
        .iter()
        .map(|interval| (interval.start, interval.end))
        .collect();
    assert_eq!(idrs, vec![(0, 60), (141, 210)]);
}
