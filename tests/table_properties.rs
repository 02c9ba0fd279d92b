use egs_admin::config::LayoutConfig;
use egs_admin::model::schema::EnquirySchema;
use egs_admin::service::cascade::{FilterError, Selection};
use egs_admin::service::filter::{matches_search, FilterState};
use egs_admin::service::pagination::{page_size_for, Paginator};
use egs_admin::{EnquiryKind, EnquiryRecord};
use proptest::prelude::*;

const COUNTRIES: &[&str] = &["UAE", "India", "Saudi Arabia", "Qatar"];
const SERVICES: &[&str] = &["Appointment Booking", "Form Filling", "Consultation"];

fn assistant_record() -> impl Strategy<Value = EnquiryRecord> {
    (
        "[a-z0-9]{4,10}",
        "[a-z]{3,8}@[a-z]{3,6}\\.com",
        "\\+9715[0-9]{8}",
        prop::sample::select(COUNTRIES),
        prop::sample::select(SERVICES),
    )
        .prop_map(|(id, email, contact, country, service)| {
            EnquiryRecord::new(id, email, contact)
                .with_field("country", country)
                .with_field("service", service)
        })
}

fn chain_root(schema: &EnquirySchema, key: &'static str) -> &'static str {
    let mut root = key;
    while let Some(link) = schema.parent_link(root) {
        root = link.parent;
    }
    root
}

fn descendants(schema: &EnquirySchema, key: &'static str) -> Vec<&'static str> {
    let mut keys = Vec::new();
    let mut current = key;
    while let Some(link) = schema.child_link(current) {
        keys.push(link.child);
        current = link.child;
    }
    keys
}

fn selection(filters: &FilterState, exact: bool) -> &Selection {
    if exact {
        &filters.exact
    } else {
        &filters.primary
    }
}

fn set(
    filters: &mut FilterState,
    schema: &EnquirySchema,
    exact: bool,
    key: &str,
    value: &str,
) -> Result<(), FilterError> {
    if exact {
        filters.set_exact(schema, key, value)
    } else {
        filters.set_primary(schema, key, value)
    }
}

proptest! {
    #[test]
    fn pages_cover_the_set_exactly(len in 0usize..200, page_size in 1usize..30) {
        let items: Vec<usize> = (0..len).collect();
        let mut pager = Paginator::new(page_size);
        let total = pager.total_pages(items.len());

        let mut seen = Vec::with_capacity(len);
        for page in 1..=total {
            pager.go_to(page, items.len());
            let window = pager.window(&items);
            prop_assert!(window.len() <= page_size);
            seen.extend_from_slice(window);
        }
        prop_assert_eq!(seen, items);
    }

    #[test]
    fn total_pages_and_page_stay_in_bounds(len in 0usize..500, page_size in 1usize..30, target in 0usize..100) {
        let mut pager = Paginator::new(page_size);
        let expected = std::cmp::max(1, len.div_ceil(page_size));
        prop_assert_eq!(pager.total_pages(len), expected);

        pager.go_to(target, len);
        prop_assert!(pager.page() >= 1 && pager.page() <= expected);

        pager.clamp(len / 2);
        prop_assert!(pager.page() >= 1 && pager.page() <= pager.total_pages(len / 2));
    }

    #[test]
    fn page_size_is_always_clamped(height in any::<i64>()) {
        let size = page_size_for(height, &LayoutConfig::default());
        prop_assert!((10..=15).contains(&size));
    }

    #[test]
    fn unarmed_exact_find_has_no_effect(
        records in prop::collection::vec(assistant_record(), 0..40),
        country in prop::sample::select(COUNTRIES),
        service in prop::sample::select(SERVICES),
    ) {
        let schema = EnquiryKind::Assistant.schema();
        let baseline = FilterState::new(&schema);

        let mut primed = FilterState::new(&schema);
        primed.set_exact(&schema, "country", country).unwrap();
        primed.set_exact(&schema, "service", service).unwrap();

        prop_assert_eq!(primed.apply(&schema, &records), baseline.apply(&schema, &records));
    }

    #[test]
    fn email_substring_always_matches(record in assistant_record(), start in 0usize..8, len in 1usize..8) {
        let email = record.email.clone();
        let start = start.min(email.len() - 1);
        let end = (start + len).min(email.len());
        let query = email[start..end].to_uppercase();

        let schema = EnquiryKind::Assistant.schema();
        prop_assert!(matches_search(&record, &schema.search_keys(), &query));

        let mut filters = FilterState::new(&schema);
        filters.search_text = query;
        prop_assert!(filters.matches(&schema, &record));
    }

    #[test]
    fn filtering_is_a_deterministic_subset(
        records in prop::collection::vec(assistant_record(), 0..40),
        country in prop::sample::select(COUNTRIES),
    ) {
        let schema = EnquiryKind::Assistant.schema();
        let mut filters = FilterState::new(&schema);
        filters.set_primary(&schema, "country", country).unwrap();

        let first = filters.apply(&schema, &records);
        let second = filters.apply(&schema, &records);
        prop_assert!(first.len() <= records.len());
        prop_assert!(first.iter().all(|record| record.field("country") == Some(country)));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn changing_a_parent_resets_every_descendant(
        kind in prop::sample::select(EnquiryKind::ALL.to_vec()),
        exact in any::<bool>(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 4),
        replacement in any::<prop::sample::Index>(),
    ) {
        let schema = kind.schema();
        for link in schema.hierarchies {
            let mut filters = FilterState::new(&schema);
            let fields = selection(&filters, exact);
            if fields.field(link.parent).is_none() || fields.field(link.child).is_none() {
                continue;
            }

            // Fill the whole chain, root first.
            let mut key = chain_root(&schema, link.parent);
            let mut pick = picks.iter().cycle();
            while selection(&filters, exact).field(key).is_some() {
                let options = selection(&filters, exact).options(&schema, key);
                prop_assert!(!options.is_empty());
                let value = options[pick.next().unwrap().index(options.len())];
                set(&mut filters, &schema, exact, key, value).unwrap();
                match schema.child_link(key) {
                    Some(next) => key = next.child,
                    None => break,
                }
            }
            prop_assert!(selection(&filters, exact).constraint(link.child).is_some());

            // Any value the parent currently offers, sentinel included.
            let parent = selection(&filters, exact).field(link.parent).unwrap().clone();
            let mut offered = selection(&filters, exact).options(&schema, link.parent);
            offered.push(parent.sentinel);
            let value = offered[replacement.index(offered.len())];
            set(&mut filters, &schema, exact, link.parent, value).unwrap();

            let after = selection(&filters, exact);
            prop_assert_eq!(after.get(link.parent), Some(value));
            for child in descendants(&schema, link.parent) {
                if let Some(field) = after.field(child) {
                    prop_assert_eq!(after.get(child), Some(field.sentinel));
                }
            }
        }
    }
}
