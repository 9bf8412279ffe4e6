//! Integration tests for list, vault, historical and benchmarks commands.

use predicates::prelude::*;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use super::helpers::{
    addr, expect_no_requests, load_fixture, mock_get_error, mock_get_fixture, start_mock_server,
    vaults_cmd_with_mock, TEST_VAULT,
};

#[tokio::test]
async fn test_list_table_output() {
    let server = start_mock_server().await;
    mock_get_fixture(&server, "/v2/detailed-vaults", "detailed_vaults").await;

    vaults_cmd_with_mock(&server)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Steakhouse USDC"))
        .stdout(predicate::str::contains("Aave v3 WETH"))
        .stdout(predicate::str::contains("5.39%"))
        .stdout(predicate::str::contains("$45210345.12"));
}

#[tokio::test]
async fn test_list_json_output() {
    let server = start_mock_server().await;
    mock_get_fixture(&server, "/v2/detailed-vaults", "detailed_vaults").await;

    vaults_cmd_with_mock(&server)
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"isTransactional\": true"))
        .stdout(predicate::str::contains("Aave v3 WETH"));
}

#[tokio::test]
async fn test_list_sends_filters_as_query() {
    let server = start_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/v2/detailed-vaults"))
        .and(query_param("page", "3"))
        .and(query_param("perPage", "10"))
        .and(query_param("allowedNetworks", "mainnet"))
        .and(query_param("allowedAssets", "USDC"))
        .and(query_param("onlyTransactional", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("detailed_vaults")))
        .expect(1)
        .mount(&server)
        .await;

    vaults_cmd_with_mock(&server)
        .args([
            "list",
            "--network",
            "eip155:1",
            "--asset",
            "usdc",
            "--transactional",
            "--page",
            "3",
            "--per-page",
            "10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Steakhouse USDC"));
}

#[tokio::test]
async fn test_list_all_pages_follows_next_page() {
    let server = start_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/v2/detailed-vaults"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("detailed_vaults")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/detailed-vaults"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("detailed_vaults_last")),
        )
        .expect(1)
        .mount(&server)
        .await;

    vaults_cmd_with_mock(&server)
        .args(["list", "--all-pages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Steakhouse USDC"))
        .stdout(predicate::str::contains("Aave v3 USDT"));
}

#[tokio::test]
async fn test_list_excluded_tag_applied_locally() {
    let server = start_mock_server().await;
    mock_get_fixture(&server, "/v2/detailed-vaults", "detailed_vaults").await;

    vaults_cmd_with_mock(&server)
        .args(["list", "--exclude-tag", "stablecoin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Aave v3 WETH"))
        .stdout(predicate::str::contains("Steakhouse USDC").not());
}

#[tokio::test]
async fn test_list_remote_error() {
    let server = start_mock_server().await;
    mock_get_error(&server, "/v2/detailed-vaults", 500, "upstream unavailable").await;

    vaults_cmd_with_mock(&server)
        .args(["list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("500"))
        .stderr(predicate::str::contains("upstream unavailable"));
}

#[tokio::test]
async fn test_vault_detail_from_caip2_input() {
    let server = start_mock_server().await;
    let route = format!("/v2/detailed-vaults/mainnet/{}", addr(TEST_VAULT));
    mock_get_fixture(&server, &route, "detailed_vault").await;

    vaults_cmd_with_mock(&server)
        .args(["vault", "eip155:1", TEST_VAULT])
        .assert()
        .success()
        .stdout(predicate::str::contains("Steakhouse USDC"))
        .stdout(predicate::str::contains("MetaMorpho"))
        .stdout(predicate::str::contains("Yield & Liquidity"));
}

#[tokio::test]
async fn test_vault_detail_caip2_form_on_the_wire() {
    let server = start_mock_server().await;
    let route = format!("/v2/detailed-vaults/eip155:1/{}", addr(TEST_VAULT));
    mock_get_fixture(&server, &route, "detailed_vault").await;

    vaults_cmd_with_mock(&server)
        .args(["--caip2", "vault", "ethereum", TEST_VAULT])
        .assert()
        .success()
        .stdout(predicate::str::contains("Steakhouse USDC"));
}

#[tokio::test]
async fn test_historical_table() {
    let server = start_mock_server().await;
    let route = format!("/v2/historical/base/{}", addr(TEST_VAULT));
    Mock::given(method("GET"))
        .and(path(route.as_str()))
        .and(query_param("apyInterval", "30day"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("historical")))
        .expect(1)
        .mount(&server)
        .await;

    vaults_cmd_with_mock(&server)
        .args(["historical", "eip155:8453", TEST_VAULT, "--interval", "30day", "--days", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1717200000"))
        .stdout(predicate::str::contains("5.41%"))
        .stdout(predicate::str::contains("$44500000.00"));
}

#[tokio::test]
async fn test_benchmarks_for_network() {
    let server = start_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/v1/benchmarks"))
        .and(query_param("network", "base"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("benchmarks")))
        .expect(1)
        .mount(&server)
        .await;

    vaults_cmd_with_mock(&server)
        .args(["benchmarks", "--network", "eip155:8453", "--log-level", "debug"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 items"))
        .stderr(predicate::str::contains("Payload with 2 items"));
}

#[tokio::test]
async fn test_benchmarks_unknown_network_sends_nothing() {
    let server = start_mock_server().await;
    expect_no_requests(&server).await;

    vaults_cmd_with_mock(&server)
        .args(["benchmarks", "--network", "8453"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown network: 8453"));
}
