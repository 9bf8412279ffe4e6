//! Integration tests for the tx and best-deposit commands.

use predicates::prelude::*;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::{
    addr, expect_no_requests, load_fixture, mock_portfolio, start_mock_server,
    vaults_cmd_with_mock, TEST_ASSET, TEST_USER, TEST_VAULT,
};

const AAVE_USDC_VAULT: &str = "0x98C23E9d8f34FEFb1B7BD6a91B7FF122F4e16F5c";

fn tx_route(action: &str, network: &str, vault: &str) -> String {
    format!(
        "/v2/transactions/{}/{}/{}/{}",
        action,
        addr(TEST_USER),
        network,
        addr(vault)
    )
}

async fn mock_tx(server: &MockServer, route: &str, status_code: u16, fixture_name: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status_code).set_body_string(load_fixture(fixture_name)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_tx_deposit() {
    let server = start_mock_server().await;
    Mock::given(method("GET"))
        .and(path(tx_route("deposit", "mainnet", TEST_VAULT).as_str()))
        .and(query_param("assetAddress", addr(TEST_ASSET).to_string().as_str()))
        .and(query_param("amount", "1000000"))
        .and(query_param("simulate", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("transaction")))
        .expect(1)
        .mount(&server)
        .await;

    vaults_cmd_with_mock(&server)
        .args([
            "tx",
            "deposit",
            TEST_USER,
            "eip155:1",
            TEST_VAULT,
            "--asset",
            TEST_ASSET,
            "--amount",
            "1000000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated transaction"))
        .stdout(predicate::str::contains("currentActionIndex"))
        .stdout(predicate::str::contains("Deposit USDC"));
}

#[tokio::test]
async fn test_tx_json_passes_descriptor_through() {
    let server = start_mock_server().await;
    mock_tx(&server, &tx_route("deposit", "base", TEST_VAULT), 200, "transaction").await;

    vaults_cmd_with_mock(&server)
        .args([
            "tx",
            "deposit",
            TEST_USER,
            "base",
            TEST_VAULT,
            "--asset",
            TEST_ASSET,
            "--amount",
            "1000000",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"currentActionIndex\": 0"))
        .stdout(predicate::str::contains("\"simulation\""));
}

#[tokio::test]
async fn test_tx_redeem_all_without_amount() {
    let server = start_mock_server().await;
    Mock::given(method("GET"))
        .and(path(tx_route("redeem", "mainnet", TEST_VAULT).as_str()))
        .and(query_param("all", "true"))
        .and(query_param_is_missing("amount"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("transaction")))
        .expect(1)
        .mount(&server)
        .await;

    vaults_cmd_with_mock(&server)
        .args([
            "tx", "redeem", TEST_USER, "mainnet", TEST_VAULT, "--asset", TEST_ASSET, "--all",
        ])
        .assert()
        .success();
}

#[tokio::test]
async fn test_tx_simulate_is_passed_through() {
    let server = start_mock_server().await;
    Mock::given(method("GET"))
        .and(path(tx_route("redeem", "mainnet", TEST_VAULT).as_str()))
        .and(query_param("simulate", "true"))
        .and(query_param("amount", "250"))
        .and(query_param("all", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("transaction")))
        .expect(1)
        .mount(&server)
        .await;

    vaults_cmd_with_mock(&server)
        .args([
            "tx",
            "redeem",
            TEST_USER,
            "mainnet",
            TEST_VAULT,
            "--asset",
            TEST_ASSET,
            "--amount",
            "250",
            "--simulate",
        ])
        .assert()
        .success();
}

#[tokio::test]
async fn test_tx_claim_rewards_drops_amount() {
    let server = start_mock_server().await;
    Mock::given(method("GET"))
        .and(path(tx_route("claim-rewards", "mainnet", TEST_VAULT).as_str()))
        .and(query_param_is_missing("amount"))
        .and(query_param_is_missing("all"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("transaction")))
        .expect(1)
        .mount(&server)
        .await;

    vaults_cmd_with_mock(&server)
        .args([
            "tx",
            "claim-rewards",
            TEST_USER,
            "mainnet",
            TEST_VAULT,
            "--asset",
            TEST_ASSET,
            "--amount",
            "5",
        ])
        .assert()
        .success();
}

#[tokio::test]
async fn test_tx_rejected_prints_failure() {
    let server = start_mock_server().await;
    mock_tx(
        &server,
        &tx_route("deposit", "mainnet", TEST_VAULT),
        400,
        "transaction_rejected",
    )
    .await;

    vaults_cmd_with_mock(&server)
        .args([
            "tx",
            "deposit",
            TEST_USER,
            "mainnet",
            TEST_VAULT,
            "--asset",
            TEST_ASSET,
            "--amount",
            "1000000",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Transaction generation failed"))
        .stdout(predicate::str::contains("Insufficient balance for deposit"))
        .stdout(predicate::str::contains("Status:  400"))
        .stderr(predicate::str::contains("Transaction generation failed"));
}

#[tokio::test]
async fn test_tx_rejected_json() {
    let server = start_mock_server().await;
    mock_tx(
        &server,
        &tx_route("deposit", "mainnet", TEST_VAULT),
        400,
        "transaction_rejected",
    )
    .await;

    vaults_cmd_with_mock(&server)
        .args([
            "tx",
            "deposit",
            TEST_USER,
            "mainnet",
            TEST_VAULT,
            "--asset",
            TEST_ASSET,
            "--amount",
            "1000000",
            "--format",
            "json",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"success\": false"))
        .stdout(predicate::str::contains("\"statusCode\": 400"))
        .stdout(predicate::str::contains("\"action\": \"deposit\""));
}

#[tokio::test]
async fn test_tx_invalid_amount_sends_nothing() {
    let server = start_mock_server().await;
    expect_no_requests(&server).await;

    vaults_cmd_with_mock(&server)
        .args([
            "tx", "deposit", TEST_USER, "mainnet", TEST_VAULT, "--asset", TEST_ASSET, "--amount",
            "1.5",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be an integer in base units"));
}

#[tokio::test]
async fn test_tx_deposit_requires_amount() {
    let server = start_mock_server().await;
    expect_no_requests(&server).await;

    vaults_cmd_with_mock(&server)
        .args(["tx", "deposit", TEST_USER, "mainnet", TEST_VAULT, "--asset", TEST_ASSET])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing amount for deposit"));
}

#[tokio::test]
async fn test_tx_all_only_for_redeem() {
    let server = start_mock_server().await;
    expect_no_requests(&server).await;

    vaults_cmd_with_mock(&server)
        .args([
            "tx", "deposit", TEST_USER, "mainnet", TEST_VAULT, "--asset", TEST_ASSET, "--amount",
            "1", "--all",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only valid for redeem"));
}

#[tokio::test]
async fn test_tx_unknown_network_sends_nothing() {
    let server = start_mock_server().await;
    expect_no_requests(&server).await;

    vaults_cmd_with_mock(&server)
        .args([
            "tx",
            "redeem",
            TEST_USER,
            "eip155:999999",
            TEST_VAULT,
            "--asset",
            TEST_ASSET,
            "--all",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown network eip155:999999"));
}

#[tokio::test]
async fn test_best_deposit_builds_top_option() {
    let server = start_mock_server().await;
    mock_portfolio(&server, TEST_USER).await;
    Mock::given(method("GET"))
        .and(path(tx_route("deposit", "mainnet", TEST_VAULT).as_str()))
        .and(query_param("assetAddress", addr(TEST_ASSET).to_string().as_str()))
        .and(query_param("amount", "1000000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("transaction")))
        .expect(1)
        .mount(&server)
        .await;

    vaults_cmd_with_mock(&server)
        .args(["best-deposit", TEST_USER, "--amount", "1000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deposit USDC"));
}

#[tokio::test]
async fn test_best_deposit_by_rank() {
    let server = start_mock_server().await;
    mock_portfolio(&server, TEST_USER).await;
    Mock::given(method("GET"))
        .and(path(tx_route("deposit", "mainnet", AAVE_USDC_VAULT).as_str()))
        .and(query_param("simulate", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("transaction")))
        .expect(1)
        .mount(&server)
        .await;

    vaults_cmd_with_mock(&server)
        .args([
            "best-deposit",
            TEST_USER,
            "--amount",
            "1000000",
            "--rank",
            "2",
            "--simulate",
        ])
        .assert()
        .success();
}

#[tokio::test]
async fn test_best_deposit_rank_out_of_range() {
    let server = start_mock_server().await;
    mock_portfolio(&server, TEST_USER).await;

    vaults_cmd_with_mock(&server)
        .args(["best-deposit", TEST_USER, "--amount", "1", "--rank", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Only 3 deposit options available"));
}

#[tokio::test]
async fn test_best_deposit_with_nothing_to_rank() {
    let server = start_mock_server().await;
    mock_portfolio(&server, TEST_USER).await;

    vaults_cmd_with_mock(&server)
        .args(["best-deposit", TEST_USER, "--amount", "1", "--asset", "DAI"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No deposit options available"));
}
