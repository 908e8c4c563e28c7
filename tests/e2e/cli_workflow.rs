//! E2E Scenario: rating, adding and recommending through the CLI.

use super::fixture::E2EFixture;

#[test]
fn test_empty_store_recommends_from_catalog() {
    let mut fixture = E2EFixture::new("empty_store_catalog");

    fixture.log_step("Recommend with nothing rated");
    let output = fixture.run_scoop(&["--robot", "recommend"]);
    fixture.assert_success(&output, "recommend");

    let data = output.data();
    assert_eq!(data["source"], "catalog");
    assert!(data["score"].is_null());
    assert_eq!(data["candidates"], 12);
    assert_eq!(data["flavor"]["counts"].as_array().unwrap().len(), 11);
}

#[test]
fn test_empty_store_without_fallback_fails() {
    let mut fixture = E2EFixture::new("empty_store_no_fallback");
    fixture.write_config("[recommend]\nfallback_to_catalog = false\n");

    fixture.log_step("Recommend with fallback disabled");
    let output = fixture.run_scoop(&["--robot", "recommend"]);
    fixture.assert_error_code(&output, "empty_model");
}

#[test]
fn test_rate_then_recommend_uses_bandit() {
    let mut fixture = E2EFixture::new("rate_then_recommend");

    fixture.log_step("Rate two flavors");
    let output = fixture.run_scoop(&["--robot", "rate", "Mango", "7.6", "--user", "ana"]);
    fixture.assert_success(&output, "rate Mango");
    let data = output.data();
    assert_eq!(data["outcome"], 8);
    assert_eq!(data["counts"][8], 2);

    let output = fixture.run_scoop(&["--robot", "rate", "Lemon", "--user", "ana", "--", "-2"]);
    fixture.assert_success(&output, "rate Lemon");
    assert_eq!(output.data()["outcome"], 0);

    fixture.log_step("Recommend from the stored flavors");
    let output = fixture.run_scoop(&["--robot", "recommend"]);
    fixture.assert_success(&output, "recommend");
    let data = output.data();
    assert_eq!(data["source"], "bandit");
    assert_eq!(data["candidates"], 2);
    let name = data["flavor"]["name"].as_str().unwrap();
    assert!(name == "Mango" || name == "Lemon", "unexpected pick {name}");
    let score = data["score"].as_f64().unwrap();
    assert!((0.0..=10.0).contains(&score));
}

#[test]
fn test_add_requires_signed_in_user() {
    let mut fixture = E2EFixture::new("add_requires_user");

    fixture.log_step("Anonymous add is refused");
    let output = fixture.run_scoop(&["--robot", "add", "Durian"]);
    fixture.assert_error_code(&output, "auth_required");

    fixture.log_step("Signed-in add succeeds once");
    let output = fixture.run_scoop(&["--robot", "add", "Durian", "--user", "ana"]);
    fixture.assert_success(&output, "add");
    assert_eq!(output.data()["added"], true);

    let output = fixture.run_scoop(&["--robot", "add", "Durian", "--user", "bo"]);
    fixture.assert_error_code(&output, "flavor_exists");

    fixture.log_step("New flavor starts from the uniform prior");
    let output = fixture.run_scoop(&["--robot", "show", "Durian"]);
    fixture.assert_success(&output, "show");
    let data = output.data();
    assert_eq!(data["observations"], 0);
    assert!(
        data["flavor"]["counts"]
            .as_array()
            .unwrap()
            .iter()
            .all(|c| c == 1)
    );
}

#[test]
fn test_history_and_clear() {
    let mut fixture = E2EFixture::new("history_and_clear");

    fixture.log_step("Rate as two users");
    for (flavor, score) in [("Mango", "9"), ("Coffee", "3")] {
        let output = fixture.run_scoop(&["--robot", "rate", flavor, score, "--user", "ana"]);
        fixture.assert_success(&output, "rate");
    }
    let output = fixture.run_scoop(&["--robot", "rate", "Mango", "5", "--user", "bo"]);
    fixture.assert_success(&output, "rate");

    fixture.log_step("History is per user, newest first");
    let output = fixture.run_scoop(&["--robot", "history", "--user", "ana"]);
    fixture.assert_success(&output, "history");
    let data = output.data();
    assert_eq!(data["count"], 2);
    assert_eq!(data["entries"][0]["flavor"], "Coffee");
    assert_eq!(data["entries"][1]["flavor"], "Mango");

    fixture.log_step("Clear removes only ana's data");
    let output = fixture.run_scoop(&["--robot", "clear", "--user", "ana"]);
    fixture.assert_success(&output, "clear");

    let output = fixture.run_scoop(&["--robot", "history", "--user", "ana"]);
    assert_eq!(output.data()["count"], 0);

    let output = fixture.run_scoop(&["--robot", "stats"]);
    fixture.assert_success(&output, "stats");
    let flavors = output.data()["flavors"].as_array().unwrap().clone();
    assert_eq!(flavors.len(), 1);
    assert_eq!(flavors[0]["name"], "Mango");
    assert_eq!(flavors[0]["observations"], 1);
}

#[test]
fn test_personal_scope_only_sees_own_flavors() {
    let mut fixture = E2EFixture::new("personal_scope");

    fixture.log_step("Two users rate different flavors");
    let output = fixture.run_scoop(&["--robot", "rate", "Cherry", "9", "--user", "bo"]);
    fixture.assert_success(&output, "rate");
    let output = fixture.run_scoop(&["--robot", "rate", "Coffee", "2", "--user", "ana"]);
    fixture.assert_success(&output, "rate");

    fixture.log_step("Personal recommendations stay within ana's flavors");
    for seed in 0..5 {
        let output = fixture.run_scoop_with_seed(
            &["--robot", "recommend", "--user", "ana", "--scope", "personal"],
            seed,
        );
        fixture.assert_success(&output, "recommend");
        assert_eq!(output.data()["flavor"]["name"], "Coffee");
    }
}

#[test]
fn test_anonymous_rating_stays_in_history() {
    let mut fixture = E2EFixture::new("anonymous_rating");

    fixture.log_step("Rate without a user");
    let output = fixture.run_scoop(&["--robot", "rate", "Durian Surprise", "10"]);
    fixture.assert_success(&output, "anonymous rate");
    let data = output.data();
    assert_eq!(data["user"], "anonymous");
    assert!(data["counts"].is_null());

    fixture.log_step("The flavor is not a candidate");
    let output = fixture.run_scoop(&["--robot", "show", "Durian Surprise"]);
    fixture.assert_error_code(&output, "flavor_not_found");
    let output = fixture.run_scoop(&["--robot", "recommend"]);
    assert_eq!(output.data()["source"], "catalog");

    fixture.log_step("A signed-in user can still add it");
    let output = fixture.run_scoop(&["--robot", "add", "Durian Surprise", "--user", "ana"]);
    fixture.assert_success(&output, "add");

    let output = fixture.run_scoop(&["--robot", "history"]);
    assert_eq!(output.data()["count"], 1);
}

#[test]
fn test_human_output_renders() {
    let mut fixture = E2EFixture::new("human_output");

    fixture.log_step("Rate and show without --robot");
    let output = fixture.run_scoop(&["rate", "Vanilla", "6", "--user", "ana"]);
    fixture.assert_success(&output, "rate");
    assert!(output.stdout.contains("Rating saved"));

    let output = fixture.run_scoop(&["show", "Vanilla"]);
    fixture.assert_success(&output, "show");
    assert!(output.stdout.contains("Vanilla"));
    assert!(output.stdout.contains("[1 1 1 1 1 1 2 1 1 1 1]"));

    assert!(fixture.database_path().exists());
    assert!(fixture.root().is_dir());
}
