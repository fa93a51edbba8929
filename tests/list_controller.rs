use fm_backoffice::domain::record::{FieldValue, ListRecord};
use fm_backoffice::domain::testimonial::Testimonial;
use fm_backoffice::domain::types::EntityId;
use fm_backoffice::list::{ListDataController, SortDirection, filter, paginate, sort};
use fm_backoffice::pagination::total_pages;
use proptest::prelude::*;
use proptest::test_runner::Config;

fn testimonial(id: i64, user_name: &str, content: &str) -> Testimonial {
    Testimonial {
        id: EntityId::new(id).expect("valid id"),
        user_name: user_name.into(),
        user_type: Some(if id % 2 == 0 { "owner" } else { "tenant" }.into()),
        content: content.into(),
        active: id % 3 != 0,
        show_on_home: false,
        created_at: None,
    }
}

fn numbered(count: i64) -> Vec<Testimonial> {
    (1..=count)
        .map(|id| testimonial(id, &format!("Resident {id:02}"), "Great service"))
        .collect()
}

fn ids<'a>(items: impl IntoIterator<Item = &'a Testimonial>) -> Vec<i64> {
    items.into_iter().map(|t| t.id.get()).collect()
}

const SEARCH_FIELDS: [&str; 2] = ["user_name", "content"];

fn rows() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[A-Za-z ]{0,12}", "[A-Za-z ]{0,24}"), 0..40)
}

fn from_rows(rows: Vec<(String, String)>) -> Vec<Testimonial> {
    rows.into_iter()
        .zip(1..)
        .map(|((name, content), id)| testimonial(id, &name, &content))
        .collect()
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn blank_search_is_identity(rows in rows(), term in "[ \t]{0,4}") {
        let items = from_rows(rows);
        let kept = filter(&items, &term, &SEARCH_FIELDS);
        prop_assert_eq!(ids(kept), ids(&items));
    }

    #[test]
    fn filtering_twice_changes_nothing(rows in rows(), term in "[A-Za-z]{0,3}") {
        let items = from_rows(rows);
        let once: Vec<Testimonial> = filter(&items, &term, &SEARCH_FIELDS)
            .into_iter()
            .cloned()
            .collect();
        let twice = filter(&once, &term, &SEARCH_FIELDS);
        prop_assert_eq!(ids(twice), ids(&once));
    }

    #[test]
    fn pages_concatenate_to_the_sequence(count in 0_i64..60, page_size in 1_usize..25) {
        let items = numbered(count);
        let pages = total_pages(items.len(), page_size);
        let joined: Vec<i64> = (1..=pages)
            .flat_map(|page| ids(paginate(&items, page, page_size)))
            .collect();
        prop_assert_eq!(joined, ids(&items));
        prop_assert!(paginate(&items, pages + 1, page_size).is_empty());
    }

    #[test]
    fn flipping_direction_reverses_distinct_keys(
        names in prop::collection::hash_set("[A-Za-z]{1,8}", 0..20)
    ) {
        let mut ascending: Vec<Testimonial> = names
            .iter()
            .zip(1..)
            .map(|(name, id)| testimonial(id, name, ""))
            .collect();
        let mut descending = ascending.clone();

        sort(&mut ascending, "user_name", SortDirection::Asc);
        sort(&mut descending, "user_name", SortDirection::Desc);

        let mut reversed = ids(&descending);
        reversed.reverse();
        prop_assert_eq!(ids(&ascending), reversed);
    }
}

#[test]
fn test_filter_is_case_insensitive() {
    let items = vec![
        testimonial(1, "Anna", "Pool was spotless"),
        testimonial(2, "Boris", "Lift broke twice"),
        testimonial(3, "Chen", "POOL hours are short"),
    ];

    assert_eq!(ids(filter(&items, "pool", &SEARCH_FIELDS)), vec![1, 3]);
    assert_eq!(ids(filter(&items, "  PoOl ", &SEARCH_FIELDS)), vec![1, 3]);
}

#[test]
fn test_sort_keeps_ties_in_snapshot_order() {
    let mut items = vec![
        testimonial(1, "Same", ""),
        testimonial(2, "Other", ""),
        testimonial(3, "Same", ""),
    ];

    sort(&mut items, "user_name", SortDirection::Asc);

    assert_eq!(ids(&items), vec![2, 1, 3]);
}

#[test]
fn test_twenty_three_records_make_three_pages() {
    let mut controller = ListDataController::new(["user_name"], 10).with_records(numbered(23));
    controller.set_page(3);

    let view = controller.view();

    assert_eq!(view.total_pages, 3);
    assert_eq!(view.total_count, 23);
    assert_eq!(ids(view.items.iter().copied()), vec![21, 22, 23]);
    assert!(view.has_previous());
    assert!(!view.has_next());
}

#[test]
fn test_search_resets_page_and_zero_matches_is_empty() {
    let mut controller = ListDataController::new(["user_name", "content"], 10)
        .with_records(numbered(23));
    controller.set_page(2);

    controller.set_search_term("nobody");
    let view = controller.view();

    assert_eq!(controller.query().page(), 1);
    assert!(view.items.is_empty());
    assert_eq!(view.total_pages, 0);
    assert!(view.pages.is_empty());
}

#[test]
fn test_search_then_sort_then_page() {
    let mut records = numbered(12);
    records.push(testimonial(13, "Zed", "Gym is noisy"));
    records.push(testimonial(14, "Amy", "Gym is great"));
    let mut controller = ListDataController::new(["content"], 1).with_records(records);

    controller.set_search_term("GYM");
    controller.set_sort("user_name", SortDirection::Desc);
    let first = controller.view();
    assert_eq!(ids(first.items.iter().copied()), vec![13]);
    assert_eq!(first.total_pages, 2);

    controller.set_page(2);
    assert_eq!(ids(controller.view().items.iter().copied()), vec![14]);
}

#[test]
fn test_toggle_sort_flips_then_restarts_on_new_key() {
    let mut controller = ListDataController::new(["user_name"], 5).with_records(numbered(9));

    controller.toggle_sort("user_name");
    controller.set_page(2);
    controller.toggle_sort("user_name");
    let order = controller.query().sort().cloned().expect("sorted");
    assert_eq!(order.direction, SortDirection::Desc);
    assert_eq!(controller.query().page(), 2);

    controller.toggle_sort("content");
    let order = controller.query().sort().cloned().expect("sorted");
    assert_eq!(order.key, "content");
    assert_eq!(order.direction, SortDirection::Asc);
    assert_eq!(controller.query().page(), 1);
}

#[test]
fn test_view_never_mutates_snapshot() {
    let mut controller = ListDataController::new(["user_name"], 3).with_records(numbered(5));
    let before = ids(controller.records());

    controller.set_sort("user_name", SortDirection::Desc);
    let _ = controller.view();

    assert_eq!(ids(controller.records()), before);
    assert_eq!(
        controller.records()[0].field("user_name"),
        FieldValue::from("Resident 01")
    );
}

#[test]
fn test_stale_fetch_is_discarded() {
    let mut controller: ListDataController<Testimonial> =
        ListDataController::new(["user_name"], 10);

    let first = controller.begin_fetch();
    let second = controller.begin_fetch();

    assert!(controller.apply_fetch(second, numbered(2)));
    assert!(!controller.apply_fetch(first, numbered(9)));
    assert_eq!(controller.records().len(), 2);
}
