//! E2E Scenario: the bandit learns which arm earns high ratings.

use rand::SeedableRng;
use rand::rngs::StdRng;

use scoop::bandit::{BanditModel, Scale, SharedBandit};

#[test]
fn test_strongly_rated_arm_dominates_selection() {
    let mut model = BanditModel::new(Scale::default(), 2);
    for _ in 0..50 {
        model.record_outcome(0, 10.0).unwrap();
    }

    let mut rng = StdRng::seed_from_u64(2024);
    let wins = (0..1000)
        .filter(|_| model.select_arm(&mut rng).unwrap() == 0)
        .count();
    assert!(wins >= 900, "arm 0 chosen {wins} of 1000 trials");
}

#[test]
fn test_closed_loop_converges_on_best_arm() {
    // Arm i always earns a rating of 2 * i.
    let mut model = BanditModel::new(Scale::default(), 5);
    let mut rng = StdRng::seed_from_u64(99);
    let mut pulls = [0usize; 5];
    for _ in 0..600 {
        let arm = model.select_arm(&mut rng).unwrap();
        pulls[arm] += 1;
        #[allow(clippy::cast_precision_loss)]
        model.record_outcome(arm, (2 * arm) as f64).unwrap();
    }
    let best = pulls.iter().enumerate().max_by_key(|(_, n)| **n).unwrap().0;
    assert_eq!(best, 4, "pull counts {pulls:?}");
    assert!(pulls[4] > 300, "pull counts {pulls:?}");
}

#[test]
fn test_new_arm_competes_after_learning() {
    let mut model = BanditModel::new(Scale::default(), 1);
    for _ in 0..30 {
        model.record_outcome(0, 1.0).unwrap();
    }
    let fresh = model.add_arm();
    assert_eq!(fresh, 1);

    // A uniform newcomer (mean 5) should beat an arm stuck near 1.
    let mut rng = StdRng::seed_from_u64(5);
    let wins = (0..500)
        .filter(|_| model.select_arm(&mut rng).unwrap() == fresh)
        .count();
    assert!(wins > 450, "new arm chosen {wins} of 500 trials");
}

#[test]
fn test_shared_bandit_learns_across_threads() {
    let shared = SharedBandit::new(BanditModel::new(Scale::default(), 3));

    std::thread::scope(|scope| {
        for worker in 0..4u64 {
            let shared = &shared;
            scope.spawn(move || {
                let mut rng = StdRng::seed_from_u64(worker);
                for _ in 0..100 {
                    let arm = shared.select_arm(&mut rng).unwrap();
                    let rating = if arm == 2 { 10.0 } else { 0.0 };
                    shared.record_outcome(arm, rating).unwrap();
                }
            });
        }
    });

    let model = shared.into_inner();
    let observed: u64 = model.arms().iter().map(|a| a.observations()).sum();
    assert_eq!(observed, 400);
    assert!(model.expected_value(2).unwrap() > model.expected_value(0).unwrap());
}
