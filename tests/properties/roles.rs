//! Property tests for role labels and role filters.

use proptest::prelude::*;

use deckhand::{Host, Role, RoleFilter};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: parsing arbitrary input never panics.
    #[test]
    fn property_role_parsing_never_panics(input in ".{0,32}") {
        let _ = Role::new(&input);
        let _ = RoleFilter::parse(&input);
    }

    /// PROPERTY: `:Label`, `label` and ` LABEL ` name the same role.
    #[test]
    fn property_role_normalization_is_stable(label in "[a-z][a-z0-9_-]{0,10}") {
        prop_assume!(label != "all");
        let plain = Role::new(&label).unwrap();
        prop_assert_eq!(&Role::new(&format!(":{label}")).unwrap(), &plain);
        prop_assert_eq!(&Role::new(&format!(" {} ", label.to_uppercase())).unwrap(), &plain);
        prop_assert_eq!(Role::new(plain.as_str()).unwrap(), plain);
    }

    /// PROPERTY: a filter selects a subsequence of hosts, each having a wanted role.
    #[test]
    fn property_filter_selects_ordered_subsequence(
        host_roles in proptest::collection::vec(
            proptest::sample::subsequence(vec!["app", "web", "db", "worker"], 1..=4),
            0..10,
        ),
        wanted in proptest::sample::subsequence(vec!["app", "web", "db", "worker"], 1..=4),
    ) {
        let hosts: Vec<Host> = host_roles
            .iter()
            .enumerate()
            .map(|(i, roles)| {
                Host::new(format!("h{i}"), roles.iter().map(|r| Role::new(r).unwrap())).unwrap()
            })
            .collect();
        let filter = RoleFilter::parse(&wanted.join(",")).unwrap();

        let selected = filter.select(&hosts);

        let mut last_index = None;
        for host in &selected {
            let index = hosts.iter().position(|h| h.address() == host.address()).unwrap();
            prop_assert!(last_index.map_or(true, |last| index > last));
            last_index = Some(index);
            prop_assert!(wanted.iter().any(|w| host.has_role(&Role::new(w).unwrap())));
        }
        let expected = hosts
            .iter()
            .filter(|h| wanted.iter().any(|w| h.has_role(&Role::new(w).unwrap())))
            .count();
        prop_assert_eq!(selected.len(), expected);
    }
}
