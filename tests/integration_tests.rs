use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn offer_search() -> Command {
    let mut cmd = Command::cargo_bin("offer-search").expect("binary exists");
    cmd.env_remove("OFFER_SEARCH_OUTPUT__FORMAT")
        .env_remove("OFFER_SEARCH_DATA__BRANDS")
        .env_remove("OFFER_SEARCH_DATA__CATEGORIES")
        .env_remove("OFFER_SEARCH_DATA__OFFERS");
    cmd
}

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

/// Command wired to the fixture tables.
fn with_fixtures() -> Command {
    let mut cmd = offer_search();
    cmd.args([
        "--brands",
        &fixture("brand_category.csv"),
        "--categories",
        &fixture("categories.csv"),
        "--offers",
        &fixture("offer_retailer.csv"),
    ]);
    cmd
}

// ---------------------------------------------------------------------------
// CLI smoke tests
// ---------------------------------------------------------------------------

#[test]
fn test_help_output() {
    offer_search()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("product category"))
        .stdout(predicate::str::contains("--offers"));
}

#[test]
fn test_version_output() {
    offer_search()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("offer-search"));
}

// ---------------------------------------------------------------------------
// Search by term argument
// ---------------------------------------------------------------------------

#[test]
fn test_retailer_search() {
    with_fixtures()
        .arg("walmart")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Top 8 offers for WALMART:\nSearch Type: Retail \n\n\
             Barefoot wine 750ml || cosine similarity of 0.710.\n\
             Spend $12 on Samuel Adams beer || cosine similarity of 0.464.\n\
             Dasani 24 pack || cosine similarity of 0.456.\n",
        ));
}

#[test]
fn test_category_search() {
    with_fixtures()
        .arg("BEER")
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 8 offers for Beer:"))
        .stdout(predicate::str::contains("Search Type: Category"))
        .stdout(predicate::str::contains(
            "Spend $12 on Samuel Adams beer || cosine similarity of 0.473.\n\
             Lagunitas IPA 6 pack || cosine similarity of 0.406.\n",
        ));
}

#[test]
fn test_brand_search() {
    with_fixtures()
        .arg("Barefoot")
        .assert()
        .success()
        .stdout(predicate::str::contains("Search Type: Brand"))
        .stdout(predicate::str::contains(
            "\nBarefoot wine 750ml || cosine similarity of 0.929.\n",
        ));
}

// The brand tags match every brand starting with the term, so COCA-COLA
// also pulls in COCA-COLA ZERO and ranks its offer first.
#[test]
fn test_brand_search_prefix_quirk() {
    with_fixtures()
        .arg("coca-cola")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\nCoca-Cola Zero Sugar 2L || cosine similarity of 0.824.\n\
             Coca-Cola 12 pack, any flavor || cosine similarity of 0.786.\n",
        ));
}

#[test]
fn test_json_output() {
    let output = with_fixtures()
        .args(["-f", "json", "kroger"])
        .output()
        .expect("runs");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["term"], "KROGER");
    assert_eq!(value["search_type"], "Retail");
    let results = value["results"].as_array().unwrap();
    assert_eq!(results.len(), 8);
    assert_eq!(results[0]["offer"], "DiGiorno pizza");
    assert_eq!(results[0]["index"], 6);
    assert_eq!(results[0]["rank"], 1);
}

#[test]
fn test_markdown_output() {
    with_fixtures()
        .args(["--format", "markdown", "alcohol"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "# Top 8 offers for Alcohol (Category)",
        ))
        .stdout(predicate::str::contains("| 1 | Barefoot wine 750ml | 0.335 |"));
}

// ---------------------------------------------------------------------------
// Interactive prompt
// ---------------------------------------------------------------------------

#[test]
fn test_prompt_when_no_term() {
    with_fixtures()
        .write_stdin("dasani\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Search term: Top 8 offers for DASANI:"));
}

#[test]
fn test_prompt_retries_on_unknown_term() {
    with_fixtures()
        .write_stdin("spaceships\n\nfrozen pizza & pizza snacks\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Search term is not in the database. Please try again.")
                .count(2),
        )
        .stdout(predicate::str::contains(
            "Top 8 offers for Frozen Pizza & Pizza Snacks:",
        ));
}

#[test]
fn test_unknown_term_argument_falls_back_to_prompt() {
    with_fixtures()
        .arg("spaceships")
        .write_stdin("target\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Search term is not in the database. Please try again.\nSearch term: ",
        ))
        .stdout(predicate::str::contains("Search Type: Retail"));
}

#[test]
fn test_input_closed() {
    with_fixtures()
        .write_stdin("spaceships\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input closed"));
}

// ---------------------------------------------------------------------------
// Configuration and table errors
// ---------------------------------------------------------------------------

#[test]
fn test_config_file_supplies_tables() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("search.toml");
    fs::write(
        &config,
        format!(
            "[data]\nbrands = {:?}\ncategories = {:?}\noffers = {:?}\n\n[output]\nformat = \"json\"\n",
            fixture("brand_category.csv"),
            fixture("categories.csv"),
            fixture("offer_retailer.csv"),
        ),
    )
    .unwrap();

    offer_search()
        .arg("-c")
        .arg(&config)
        .arg("target")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"search_type\": \"Retail\""));
}

#[test]
fn test_print_config_shows_overrides() {
    let dir = TempDir::new().unwrap();
    offer_search()
        .current_dir(dir.path())
        .args(["--print-config", "--offers", "custom/offers.csv", "-f", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[data]"))
        .stdout(predicate::str::contains("offers = \"custom/offers.csv\""))
        .stdout(predicate::str::contains("brands = \"data/brand_category.csv\""))
        .stdout(predicate::str::contains("format = \"markdown\""));
}

#[test]
fn test_missing_config_file() {
    offer_search()
        .args(["-c", "/nonexistent/search.toml", "walmart"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_missing_table_file() {
    with_fixtures()
        .args(["--offers", "/nonexistent/offers.csv", "walmart"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open table"));
}

#[test]
fn test_missing_column() {
    let dir = TempDir::new().unwrap();
    let offers = dir.path().join("offers.csv");
    fs::write(&offers, "OFFER,BRAND\nDasani 24 pack,DASANI\n").unwrap();

    with_fixtures()
        .arg("--offers")
        .arg(&offers)
        .arg("beer")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing column RETAILER"));
}

#[test]
fn test_empty_offer_table() {
    let dir = TempDir::new().unwrap();
    let offers = dir.path().join("offers.csv");
    fs::write(&offers, "OFFER,RETAILER,BRAND\n").unwrap();

    with_fixtures()
        .arg("--offers")
        .arg(&offers)
        .arg("beer")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Top").not())
        .stderr(predicate::str::contains("Offer table is empty"));
}

#[test]
fn test_fewer_than_ten_offers_not_padded() {
    let dir = TempDir::new().unwrap();
    let offers = dir.path().join("offers.csv");
    fs::write(
        &offers,
        "OFFER,RETAILER,BRAND\nBeer run,WALMART,LAGUNITAS\nWater run,WALMART,DASANI\nPizza run,,DIGIORNO\n",
    )
    .unwrap();

    let output = with_fixtures()
        .arg("--offers")
        .arg(&offers)
        .args(["-f", "json", "walmart"])
        .output()
        .expect("runs");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["results"].as_array().unwrap().len(), 3);
}
