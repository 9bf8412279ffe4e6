//! Integration tests for positions, idle-assets, deposit-options and per-vault
//! user history commands.

use predicates::prelude::*;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use super::helpers::{
    addr, load_fixture, mock_get_error, mock_get_fixture, mock_portfolio, start_mock_server,
    vaults_cmd_with_mock, OTHER_USER, TEST_USER, TEST_VAULT,
};

#[tokio::test]
async fn test_positions_table() {
    let server = start_mock_server().await;
    let route = format!("/v2/portfolio/positions/{}", addr(TEST_USER));
    mock_get_fixture(&server, &route, "positions").await;

    vaults_cmd_with_mock(&server)
        .args(["positions", TEST_USER])
        .assert()
        .success()
        .stdout(predicate::str::contains("Steakhouse USDC"))
        .stdout(predicate::str::contains("$1499.85"))
        .stdout(predicate::str::contains("5.39%"));
}

#[tokio::test]
async fn test_positions_empty() {
    let server = start_mock_server().await;
    Mock::given(method("GET"))
        .and(path(format!("/v2/portfolio/positions/{}", addr(TEST_USER)).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":[]}"#))
        .mount(&server)
        .await;

    vaults_cmd_with_mock(&server)
        .args(["positions", TEST_USER])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active positions found."));
}

#[tokio::test]
async fn test_idle_assets_table() {
    let server = start_mock_server().await;
    let route = format!("/v2/portfolio/idle-assets/{}", addr(TEST_USER));
    mock_get_fixture(&server, &route, "idle_assets").await;

    vaults_cmd_with_mock(&server)
        .args(["idle-assets", TEST_USER])
        .assert()
        .success()
        .stdout(predicate::str::contains("2500000000 USDC"))
        .stdout(predicate::str::contains("$2499.75"))
        .stdout(predicate::str::contains("USDT"));
}

#[tokio::test]
async fn test_idle_assets_json() {
    let server = start_mock_server().await;
    let route = format!("/v2/portfolio/idle-assets/{}", addr(TEST_USER));
    mock_get_fixture(&server, &route, "idle_assets").await;

    vaults_cmd_with_mock(&server)
        .args(["idle-assets", TEST_USER, "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"balanceNative\": \"5000000\""));
}

#[tokio::test]
async fn test_deposit_options_ranked_table() {
    let server = start_mock_server().await;
    mock_portfolio(&server, TEST_USER).await;

    let assert = vaults_cmd_with_mock(&server)
        .args(["deposit-options", TEST_USER])
        .assert()
        .success()
        .stdout(predicate::str::contains("$2499.75"))
        .stdout(predicate::str::contains("Aave v3 USDT"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let best = stdout.find("5.39%").unwrap();
    let second = stdout.find("4.12%").unwrap();
    assert!(best < second);
}

#[tokio::test]
async fn test_deposit_options_value_floor() {
    let server = start_mock_server().await;
    mock_portfolio(&server, TEST_USER).await;

    vaults_cmd_with_mock(&server)
        .args(["deposit-options", TEST_USER, "--min-usd-value", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Steakhouse USDC"))
        .stdout(predicate::str::contains("Aave v3 USDT").not());
}

#[tokio::test]
async fn test_deposit_options_always_return_survives_floor_and_cap() {
    let server = start_mock_server().await;
    mock_portfolio(&server, TEST_USER).await;

    vaults_cmd_with_mock(&server)
        .args([
            "deposit-options",
            TEST_USER,
            "--min-usd-value",
            "100",
            "--max-per-asset",
            "1",
            "--always-return",
            "USDT",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Steakhouse USDC"))
        .stdout(predicate::str::contains("Aave v3 USDC").not())
        .stdout(predicate::str::contains("Aave v3 USDT"));
}

#[tokio::test]
async fn test_deposit_options_sends_ranking_query() {
    let server = start_mock_server().await;
    let user = addr(TEST_USER);
    mock_get_fixture(
        &server,
        &format!("/v2/portfolio/idle-assets/{}", user),
        "idle_assets",
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!("/v2/portfolio/best-deposit-options/{}", user).as_str()))
        .and(query_param("apyInterval", "30day"))
        .and(query_param("minApy", "0.04"))
        .and(query_param("allowedAssets", "USDC"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("deposit_options")),
        )
        .expect(1)
        .mount(&server)
        .await;

    vaults_cmd_with_mock(&server)
        .args([
            "deposit-options",
            TEST_USER,
            "--asset",
            "USDC",
            "--min-apy",
            "0.04",
            "--interval",
            "30d",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Steakhouse USDC"))
        .stdout(predicate::str::contains("Aave v3 USDC"))
        .stdout(predicate::str::contains("USDT").not());
}

#[tokio::test]
async fn test_deposit_options_json() {
    let server = start_mock_server().await;
    mock_portfolio(&server, TEST_USER).await;

    vaults_cmd_with_mock(&server)
        .args(["deposit-options", TEST_USER, "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"ranked\""))
        .stdout(predicate::str::contains("\"userBalances\""))
        .stdout(predicate::str::contains("\"depositOptions\""));
}

#[tokio::test]
async fn test_deposit_options_no_data() {
    let server = start_mock_server().await;
    let user = addr(TEST_USER);
    Mock::given(method("GET"))
        .and(path(format!("/v2/portfolio/idle-assets/{}", user).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":[]}"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v2/portfolio/best-deposit-options/{}", user).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"userBalances":[]}"#))
        .mount(&server)
        .await;

    vaults_cmd_with_mock(&server)
        .args(["deposit-options", TEST_USER])
        .assert()
        .success()
        .stdout(predicate::str::contains("No deposit options available."));
}

#[tokio::test]
async fn test_deposit_options_batch_isolates_failures() {
    let server = start_mock_server().await;
    mock_portfolio(&server, TEST_USER).await;
    let other = addr(OTHER_USER);
    mock_get_error(
        &server,
        &format!("/v2/portfolio/idle-assets/{}", other),
        503,
        "try again later",
    )
    .await;
    mock_get_error(
        &server,
        &format!("/v2/portfolio/best-deposit-options/{}", other),
        503,
        "try again later",
    )
    .await;

    vaults_cmd_with_mock(&server)
        .args(["deposit-options", TEST_USER, OTHER_USER])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Steakhouse USDC"))
        .stdout(predicate::str::contains("Query failed"))
        .stdout(predicate::str::contains("503"))
        .stderr(predicate::str::contains("1 of 2 users"));
}

#[tokio::test]
async fn test_vault_total_returns() {
    let server = start_mock_server().await;
    let route = format!(
        "/v2/portfolio/returns/{}/mainnet/{}",
        addr(TEST_USER),
        addr(TEST_VAULT)
    );
    Mock::given(method("GET"))
        .and(path(route.as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"returnsUsd": "12.34", "returnsNative": "12340000"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    vaults_cmd_with_mock(&server)
        .args(["returns", TEST_USER, "eip155:1", TEST_VAULT])
        .assert()
        .success()
        .stdout(predicate::str::contains("returnsUsd"))
        .stdout(predicate::str::contains("12.34"));
}

#[tokio::test]
async fn test_vault_holder_events_paging() {
    let server = start_mock_server().await;
    let route = format!(
        "/v2/portfolio/events/{}/base/{}",
        addr(TEST_USER),
        addr(TEST_VAULT)
    );
    Mock::given(method("GET"))
        .and(path(route.as_str()))
        .and(query_param("page", "2"))
        .and(query_param("perPage", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"data":[{"eventType":"deposit","assetAmount":"1000000"}],"nextPage":3}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    vaults_cmd_with_mock(&server)
        .args(["events", TEST_USER, "base", TEST_VAULT, "--page", "2", "--per-page", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 items"))
        .stdout(predicate::str::contains("deposit"))
        .stdout(predicate::str::contains("nextPage"));
}

#[tokio::test]
async fn test_transactions_context_json() {
    let server = start_mock_server().await;
    let route = format!(
        "/v2/transactions/context/{}/mainnet/{}",
        addr(TEST_USER),
        addr(TEST_VAULT)
    );
    Mock::given(method("GET"))
        .and(path(route.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"availableActions":["deposit","redeem"],"currentDepositedBalance":"0"}"#,
        ))
        .mount(&server)
        .await;

    vaults_cmd_with_mock(&server)
        .args(["tx-context", TEST_USER, "mainnet", TEST_VAULT, "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"availableActions\""));
}
