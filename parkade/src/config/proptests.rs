//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat, ServerConfig, SpotLayout, SpotSeries};
use super::validator::ConfigValidator;
use crate::spot::SpotType;
use proptest::prelude::*;

fn server_strategy() -> impl Strategy<Value = ServerConfig> {
    (
        prop::option::of((1u16..=65535).prop_map(|port| format!("127.0.0.1:{port}"))),
        prop::option::of(1usize..=64),
    )
        .prop_map(|(bind, workers)| ServerConfig { bind, workers })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(server_strategy()),
        prop::option::of(1u64..=600),
        prop::option::of(any::<bool>()),
        prop::option::of(prop_oneof![Just(OutputFormat::Human), Just(OutputFormat::Json)]),
    )
        .prop_map(|(server, lock_wait, autoinit, output_format)| Config {
            server,
            maximum_lock_wait_seconds: lock_wait,
            disable_autoinit: autoinit,
            output_format,
            layout: None,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // A field set in the higher-precedence config always wins; an unset one
    // falls through to the lower config.
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(
            merged.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(merged.disable_autoinit, high.disable_autoinit.or(low.disable_autoinit));
        prop_assert_eq!(merged.output_format, high.output_format.or(low.output_format));

        let high_workers = high.server.as_ref().and_then(|s| s.workers);
        let low_workers = low.server.as_ref().and_then(|s| s.workers);
        prop_assert_eq!(
            merged.server.as_ref().and_then(|s| s.workers),
            high_workers.or(low_workers)
        );
    }

    // Merging with an empty config changes nothing.
    #[test]
    fn config_merge_empty_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // Generated configs are always valid.
    #[test]
    fn generated_configs_validate(config in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&config).is_ok());
    }

    // A series expands to exactly `count` distinct numbers.
    #[test]
    fn series_expands_to_distinct_numbers(
        prefix in "[A-Z]{0,3}-?",
        count in 1u32..200,
        start in prop::option::of(0u32..1000),
    ) {
        let layout = SpotLayout::Series(SpotSeries {
            prefix: prefix.clone(),
            count,
            start,
            spot_type: SpotType::Compact,
        });
        let numbers: Vec<String> = layout.expand().into_iter().map(|(n, _)| n).collect();
        prop_assert_eq!(numbers.len(), count as usize);
        let unique: std::collections::HashSet<_> = numbers.iter().collect();
        prop_assert_eq!(unique.len(), numbers.len());
        prop_assert!(numbers.iter().all(|n| n.starts_with(&prefix)));
    }
}
