//! Property-Based Tests for verbline
//!
//! Invariants of naming, quoting, building and pre-fill across generated
//! identifiers, values and instances.
//!
//! ## Configuration
//!
//! - `PROPTEST_CASES`: Number of test cases per property (default: 64)
//! - `PROPTEST_MAX_SHRINK_ITERS`: Max shrinking iterations on failure (default: 1000)
//!
//! ```bash
//! PROPTEST_CASES=256 cargo test --test property_based_tests
//! ```

use proptest::prelude::*;
use std::env;
use std::sync::Arc;

use verbline::{
    OptionField, OptionKind, OptionValue, VerbCatalog, VerbDescriptor, VerbInstance, build, kebab,
    prefill_command_line, prefill_invocation, quote_if_needed, split_command_line,
};

/// Default number of test cases per property.
const DEFAULT_PROPTEST_CASES: u32 = 64;

/// Default max shrink iterations.
const DEFAULT_MAX_SHRINK_ITERS: u32 = 1000;

/// Creates a ProptestConfig that respects `PROPTEST_CASES` and
/// `PROPTEST_MAX_SHRINK_ITERS`.
fn proptest_config(max_cases: Option<u32>) -> ProptestConfig {
    let env_cases = env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_PROPTEST_CASES);

    let env_shrink_iters = env::var("PROPTEST_MAX_SHRINK_ITERS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_MAX_SHRINK_ITERS);

    let cases = match max_cases {
        Some(max) => env_cases.min(max),
        None => env_cases,
    };

    ProptestConfig {
        cases,
        max_shrink_iters: env_shrink_iters,
        max_shrink_time: 30000,
        ..ProptestConfig::default()
    }
}

/// camelCase / PascalCase / already-kebab identifiers
fn arb_identifier() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-zA-Z0-9]{0,15}",
        "[A-Z][a-zA-Z0-9]{0,15}",
        "[a-z]{1,6}(-[a-z0-9]{1,6}){0,3}",
    ]
}

/// Scalar text that the builder never skips as blank
fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9\\\\][a-zA-Z0-9 ._:/'\"=\\\\-]{0,15}"
}

fn arb_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-zA-Z0-9:._/=-]{1,8}", 1..4)
}

/// A verb with one field of each round-trippable kind.
fn sample_verb() -> VerbDescriptor {
    VerbDescriptor::builder("deploy")
        .field(OptionField::flag("image", OptionKind::String).default_value("nginx"))
        .field(OptionField::flag("title", OptionKind::String).short('t'))
        .field(
            OptionField::flag("strategy", OptionKind::Enum)
                .choices(["rolling", "recreate"])
                .default_value("rolling"),
        )
        .field(OptionField::flag("labels", OptionKind::ListOfString).long("label"))
        .field(OptionField::flag("hosts", OptionKind::ListOfString).separator(';'))
        .field(OptionField::flag("wait", OptionKind::Boolean))
        .build()
}

#[derive(Debug, Clone)]
struct SampleValues {
    image: Option<String>,
    title: Option<String>,
    strategy: Option<String>,
    labels: Option<Vec<String>>,
    hosts: Option<Vec<String>>,
    wait: bool,
}

fn arb_sample_values() -> impl Strategy<Value = SampleValues> {
    (
        prop::option::of(prop_oneof![Just("nginx".to_string()), arb_text()]),
        prop::option::of(arb_text()),
        prop::option::of(prop_oneof![Just("rolling".to_string()), Just("recreate".to_string())]),
        prop::option::of(arb_list()),
        prop::option::of(arb_list()),
        any::<bool>(),
    )
        .prop_map(|(image, title, strategy, labels, hosts, wait)| SampleValues {
            image,
            title,
            strategy,
            labels,
            hosts,
            wait,
        })
}

fn instance_from(descriptor: &Arc<VerbDescriptor>, values: &SampleValues) -> VerbInstance {
    let mut instance = VerbInstance::new(Arc::clone(descriptor));
    if let Some(image) = &values.image {
        instance.set("image", image.as_str()).unwrap();
    }
    if let Some(title) = &values.title {
        instance.set("title", title.as_str()).unwrap();
    }
    if let Some(strategy) = &values.strategy {
        instance.set("strategy", strategy.as_str()).unwrap();
    }
    if let Some(labels) = &values.labels {
        instance.set("labels", labels.clone()).unwrap();
    }
    if let Some(hosts) = &values.hosts {
        instance.set("hosts", hosts.clone()).unwrap();
    }
    instance.set("wait", values.wait).unwrap();
    instance
}

/// Is `small` a subsequence of `large`?
fn is_subsequence(small: &[String], large: &[String]) -> bool {
    let mut large = large.iter();
    small.iter().all(|token| large.any(|candidate| candidate == token))
}

proptest! {
    #![proptest_config(proptest_config(None))]

    #[test]
    fn prop_kebab_is_idempotent(identifier in arb_identifier()) {
        let once = kebab(&identifier);
        prop_assert_eq!(kebab(&once), once);
    }

    #[test]
    fn prop_kebab_has_no_edge_hyphens(identifier in arb_identifier()) {
        let name = kebab(&identifier);
        prop_assert!(!name.starts_with('-'), "{name}");
        prop_assert!(!name.ends_with('-'), "{name}");
        prop_assert_eq!(name.to_lowercase(), name.clone());
    }

    #[test]
    fn prop_quoting_survives_split(
        value in "[a-zA-Z0-9\\\\]{1,6}( [a-zA-Z0-9'\".:\\\\]{1,6}){0,3}",
    ) {
        let token = quote_if_needed(&value);
        let split = split_command_line(&token).unwrap();
        prop_assert_eq!(split, vec![value]);
    }

    #[test]
    fn prop_empty_instance_builds_to_verb_name(include_defaults in any::<bool>()) {
        let instance = VerbInstance::new(Arc::new(sample_verb()));
        let tokens = build(&instance, include_defaults);
        prop_assert_eq!(tokens, vec!["deploy".to_string()]);
    }

    #[test]
    fn prop_include_defaults_only_adds_tokens(values in arb_sample_values()) {
        let descriptor = Arc::new(sample_verb());
        let instance = instance_from(&descriptor, &values);

        let without = build(&instance, false);
        let with = build(&instance, true);
        prop_assert!(with.len() >= without.len());
        prop_assert!(is_subsequence(&without, &with), "{without:?} vs {with:?}");
        prop_assert_eq!(&with[0], "deploy");
    }

    #[test]
    fn prop_prefill_reproduces_built_values(values in arb_sample_values()) {
        let catalog = VerbCatalog::new().with_verb(sample_verb()).unwrap();
        let descriptor = Arc::clone(catalog.require("deploy").unwrap());
        let instance = instance_from(&descriptor, &values);

        let tokens = build(&instance, true);
        let parsed = prefill_invocation(&catalog, &tokens).unwrap();
        let from_line = prefill_command_line(&catalog, &tokens.join(" ")).unwrap();

        for field in descriptor.fields() {
            prop_assert_eq!(
                parsed.get(&field.identifier),
                instance.get(&field.identifier),
                "field {}", field.identifier
            );
            prop_assert_eq!(
                from_line.get(&field.identifier),
                instance.get(&field.identifier),
                "field {} from line", field.identifier
            );
        }
    }
}

#[test]
fn list_values_are_not_quoted_per_item() {
    let descriptor = Arc::new(sample_verb());
    let mut instance = VerbInstance::new(descriptor);
    instance.set("labels", vec!["a", "b"]).unwrap();
    assert_eq!(build(&instance, false), ["deploy", "--label", "a,b"]);
    assert_eq!(instance.get("labels"), Some(&OptionValue::list(["a", "b"])));
}
