//! Transaction descriptors, transaction failures and untyped payloads.

use colored::Colorize;
use serde_json::Value;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use vaults_rs_api::{ApiPayload, TransactionDescriptor};
use vaults_rs_strategy::TransactionFailure;

use super::format::{truncate, MISSING};

/// Longest string value shown before truncation.
const MAX_VALUE_LEN: usize = 75;

#[derive(Tabled)]
struct PropertyRow {
    #[tabled(rename = "Property")]
    property: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Strings are cut at 75 characters; objects and arrays are pretty printed in full.
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => MISSING.to_string(),
        Value::String(s) => truncate(s, MAX_VALUE_LEN),
        Value::Object(_) | Value::Array(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

fn property_table<'a>(entries: impl Iterator<Item = (&'a String, &'a Value)>) -> String {
    let rows: Vec<PropertyRow> = entries
        .map(|(key, value)| PropertyRow {
            property: key.clone(),
            value: format_value(value),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()));
    table.to_string()
}

/// One row per top-level property of the descriptor.
pub fn format_transaction(descriptor: &TransactionDescriptor) -> String {
    match descriptor.as_value() {
        Value::Object(map) if !map.is_empty() => format!(
            "{}\n{}",
            "Generated transaction".green().bold(),
            property_table(map.iter())
        ),
        Value::Object(_) | Value::Null => "No transaction data available.".to_string(),
        other => format_value(other),
    }
}

pub fn format_transaction_failure(failure: &TransactionFailure) -> String {
    let context = &failure.context;
    let mut output = String::new();

    output.push_str(&format!("{}\n", failure.message.red().bold()));
    output.push_str(&format!("  Error:   {}\n", failure.error));
    if let Some(status) = failure.status_code {
        output.push_str(&format!("  Status:  {}\n", status));
    }
    output.push_str(&format!("  Action:  {}\n", context.action));
    output.push_str(&format!("  Network: {}\n", context.network));
    output.push_str(&format!("  Vault:   {}\n", context.vault));
    output.push_str(&format!("  Asset:   {}\n", context.asset_address));
    if let Some(amount) = &context.amount {
        output.push_str(&format!("  Amount:  {}\n", amount));
    }
    output.push_str(&format!("  User:    {}\n", context.user));

    output
}

fn item_lines(items: &[Value]) -> String {
    let mut output = format!("{} items\n", items.len());
    for (i, item) in items.iter().enumerate() {
        output.push_str(&format!("[{}] {}\n", i, truncate(&item.to_string(), MAX_VALUE_LEN)));
    }
    output
}

/// Summary of a payload whose shape is not modelled.
pub fn format_payload(payload: &ApiPayload) -> String {
    match payload {
        ApiPayload::Object(map) if !map.is_empty() => property_table(map.iter()),
        ApiPayload::Envelope { data, extra } => {
            let mut output = item_lines(data);
            if !extra.is_empty() {
                output.push_str(&property_table(extra.iter()));
            }
            output
        }
        ApiPayload::List(items) => item_lines(items),
        ApiPayload::Object(_) => "No data available.".to_string(),
        ApiPayload::Scalar(value) => format_value(value),
    }
}
