//! Row types of the list views

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Row of the EFT short-name summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortNameSummary {
    pub id: i64,
    pub short_name: String,
    #[serde(default)]
    pub short_name_type: Option<String>,
    #[serde(default)]
    pub credits_remaining: Option<Decimal>,
    #[serde(default)]
    pub linked_accounts_count: u32,
    #[serde(default)]
    pub last_payment_received_date: Option<String>,
    #[serde(default)]
    pub refund_status: Option<String>,
}

/// Row of the linked / unlinked short-name tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortName {
    pub id: i64,
    pub short_name: String,
    #[serde(default)]
    pub short_name_type: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub account_branch: Option<String>,
    #[serde(default)]
    pub amount_owing: Option<Decimal>,
    #[serde(default)]
    pub status_code: Option<String>,
}

/// Account linked to one short name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedAccount {
    pub id: i64,
    pub account_id: String,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub account_branch: Option<String>,
    #[serde(default)]
    pub amount_owing: Option<Decimal>,
    #[serde(default)]
    pub statement_id: Option<i64>,
    #[serde(default)]
    pub status_code: Option<String>,
}

/// EFT short-name refund request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    pub id: i64,
    pub short_name_id: i64,
    #[serde(default)]
    pub short_name: Option<String>,
    pub refund_amount: Decimal,
    #[serde(default)]
    pub cas_supplier_number: Option<String>,
    #[serde(default)]
    pub refund_email: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    pub status: String,
    #[serde(default)]
    pub decline_reason: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_on: Option<String>,
}

/// Routing-slip search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingSlip {
    pub number: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub routing_slip_date: Option<String>,
    #[serde(default)]
    pub remaining_amount: Option<Decimal>,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub created_name: Option<String>,
    #[serde(default)]
    pub payment_account: Option<PaymentAccount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAccount {
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// Entry of a short name's payment history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortNameHistory {
    #[serde(default)]
    pub historical_id: Option<i64>,
    pub transaction_type: String,
    #[serde(default)]
    pub transaction_date: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub short_name_balance: Option<Decimal>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub statement_number: Option<i64>,
    #[serde(default)]
    pub is_reversible: bool,
}
