//! Behavior every `CandidateStore` backend must share.

use crate::bandit::Scale;
use crate::error::ScoopError;

use super::{CandidateStore, RatingEntry, Scope};

fn personal(user: &str) -> Scope {
    Scope::Personal(user.to_string())
}

fn rate<S: CandidateStore>(store: &S, user: &str, flavor: &str, outcome: f64) {
    let entry = RatingEntry::now(store.scale(), flavor, format!("{flavor} yogurt"), outcome);
    store.record_rating(user, &entry).unwrap();
}

pub fn run_all<S, F>(make: F)
where
    S: CandidateStore,
    F: Fn() -> S,
{
    starts_empty(&make());
    add_flavor_uses_uniform_prior(&make());
    add_flavor_rejects_duplicates_across_users(&make());
    create_then_first_rate_counts_once(&make());
    rating_unknown_flavor_creates_record(&make());
    rerating_never_decrements(&make());
    community_scope_pools_users(&make());
    snapshot_order_is_insertion_order(&make());
    history_is_per_user_newest_first(&make());
    clear_only_touches_one_user(&make());
    find_flavor_pools_records(&make());
    out_of_scale_ratings_are_clamped(&make());
    history_only_ratings_skip_records(&make());
}

fn starts_empty<S: CandidateStore>(store: &S) {
    assert!(store.snapshot(&Scope::Community).unwrap().is_empty());
    assert!(store.snapshot(&personal("ana")).unwrap().is_empty());
    assert!(store.history("ana").unwrap().is_empty());
    assert!(store.find_flavor("Mango").unwrap().is_none());
}

fn add_flavor_uses_uniform_prior<S: CandidateStore>(store: &S) {
    store.add_flavor("ana", "Mango", "Sweet tropical mango").unwrap();
    let snap = store.snapshot(&personal("ana")).unwrap();
    assert_eq!(snap.len(), 1);
    assert_eq!(snap[0].name, "Mango");
    assert_eq!(snap[0].description, "Sweet tropical mango");
    assert_eq!(snap[0].counts.as_slice(), &[1; 11]);
    assert!(store.history("ana").unwrap().is_empty());
}

fn add_flavor_rejects_duplicates_across_users<S: CandidateStore>(store: &S) {
    store.add_flavor("ana", "Mango", "").unwrap();
    let err = store.add_flavor("bo", "Mango", "").unwrap_err();
    assert!(matches!(err, ScoopError::FlavorExists(name) if name == "Mango"));
}

fn create_then_first_rate_counts_once<S: CandidateStore>(store: &S) {
    store.add_flavor("ana", "Mango", "").unwrap();
    rate(store, "ana", "Mango", 8.0);
    let snap = store.snapshot(&personal("ana")).unwrap();
    let mut expected = [1_u64; 11];
    expected[8] = 2;
    assert_eq!(snap[0].counts.as_slice(), &expected);
}

fn rating_unknown_flavor_creates_record<S: CandidateStore>(store: &S) {
    rate(store, "ana", "Peach", 6.0);
    let snap = store.snapshot(&personal("ana")).unwrap();
    assert_eq!(snap.len(), 1);
    assert_eq!(snap[0].description, "Peach yogurt");
    assert_eq!(snap[0].counts.get(6), Some(2));
    assert_eq!(snap[0].counts.total(), 12);
}

fn rerating_never_decrements<S: CandidateStore>(store: &S) {
    rate(store, "ana", "Peach", 8.0);
    rate(store, "ana", "Peach", 3.0);
    let snap = store.snapshot(&personal("ana")).unwrap();
    assert_eq!(snap[0].counts.get(8), Some(2));
    assert_eq!(snap[0].counts.get(3), Some(2));
    assert_eq!(snap[0].counts.total(), 13);
}

fn community_scope_pools_users<S: CandidateStore>(store: &S) {
    rate(store, "ana", "Mango", 10.0);
    rate(store, "bo", "Mango", 10.0);
    rate(store, "bo", "Lemon", 2.0);

    let community = store.snapshot(&Scope::Community).unwrap();
    assert_eq!(community.len(), 2);
    assert_eq!(community[0].name, "Mango");
    let mut expected = [2_u64; 11];
    expected[10] = 4;
    assert_eq!(community[0].counts.as_slice(), &expected);

    let ana = store.snapshot(&personal("ana")).unwrap();
    assert_eq!(ana.len(), 1);
    assert_eq!(ana[0].counts.get(10), Some(2));
}

fn snapshot_order_is_insertion_order<S: CandidateStore>(store: &S) {
    for name in ["Vanilla", "Coffee", "Cherry"] {
        store.add_flavor("ana", name, "").unwrap();
    }
    rate(store, "ana", "Coffee", 9.0);
    let names: Vec<String> = store
        .snapshot(&personal("ana"))
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Vanilla", "Coffee", "Cherry"]);
}

fn history_is_per_user_newest_first<S: CandidateStore>(store: &S) {
    rate(store, "ana", "Mango", 4.0);
    rate(store, "bo", "Lemon", 5.0);
    rate(store, "ana", "Peach", 9.0);
    let history = store.history("ana").unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].flavor, "Peach");
    assert_eq!(history[0].outcome, 9);
    assert_eq!(history[1].flavor, "Mango");
    assert_eq!(store.history("bo").unwrap().len(), 1);
}

fn clear_only_touches_one_user<S: CandidateStore>(store: &S) {
    rate(store, "ana", "Mango", 4.0);
    rate(store, "bo", "Mango", 5.0);
    store.clear("ana").unwrap();
    assert!(store.snapshot(&personal("ana")).unwrap().is_empty());
    assert!(store.history("ana").unwrap().is_empty());
    assert_eq!(store.snapshot(&personal("bo")).unwrap().len(), 1);
    assert_eq!(store.history("bo").unwrap().len(), 1);
}

fn find_flavor_pools_records<S: CandidateStore>(store: &S) {
    rate(store, "ana", "Mango", 7.0);
    rate(store, "bo", "Mango", 7.0);
    let found = store.find_flavor("Mango").unwrap().unwrap();
    assert_eq!(found.counts.get(7), Some(4));
    assert!(store.find_flavor("Durian").unwrap().is_none());
}

fn out_of_scale_ratings_are_clamped<S: CandidateStore>(store: &S) {
    let scale = Scale::default();
    assert_eq!(store.scale(), scale);
    rate(store, "ana", "Plain", -3.0);
    rate(store, "ana", "Plain", 16.0);
    let snap = store.snapshot(&personal("ana")).unwrap();
    assert_eq!(snap[0].counts.get(0), Some(2));
    assert_eq!(snap[0].counts.get(10), Some(2));
}

fn history_only_ratings_skip_records<S: CandidateStore>(store: &S) {
    let entry = RatingEntry::now(store.scale(), "Durian", "spiky", 10.0);
    store.append_history("guest", &entry).unwrap();

    let history = store.history("guest").unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].outcome, 10);
    assert!(store.snapshot(&Scope::Community).unwrap().is_empty());
    assert!(store.find_flavor("Durian").unwrap().is_none());
    store.add_flavor("ana", "Durian", "spiky").unwrap();
}
