//! Static code → sentence tables, one per subsystem

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// EFT short-name, payment-action and refund errors
const EFT_ERRORS: &[(&str, &str)] = &[
    (
        "EFT_SHORT_NAME_ALREADY_MAPPED",
        "This short name is already linked to an account.",
    ),
    (
        "EFT_SHORT_NAME_NOT_FOUND",
        "The short name could not be found.",
    ),
    (
        "EFT_SHORT_NAME_NOT_LINKED",
        "This short name is not linked to an account.",
    ),
    (
        "EFT_SHORT_NAME_LINK_INVALID_STATUS",
        "The short name link is not in a valid state for this action.",
    ),
    (
        "EFT_SHORT_NAME_ACCOUNT_ID_REQUIRED",
        "An account number is required to link a short name.",
    ),
    (
        "EFT_PAYMENT_ACTION_ACCOUNT_NUMBER_REQUIRED",
        "An account number is required for this payment action.",
    ),
    (
        "EFT_PAYMENT_ACTION_STATEMENT_ID_REQUIRED",
        "A statement number is required for this payment action.",
    ),
    (
        "EFT_PAYMENT_ACTION_UNSUPPORTED",
        "This payment action is not supported.",
    ),
    (
        "EFT_PAYMENT_ACTION_CREDIT_BALANCE_INSUFFICIENT",
        "Insufficient credit balance to apply this payment.",
    ),
    (
        "EFT_PAYMENT_ACTION_REVERSAL_EXCEEDS_SIXTY_DAYS",
        "Cannot reverse payment - exceeds 60 day limit.",
    ),
    (
        "EFT_PAYMENT_INVOICE_REVERSE_UNEXPECTED_STATUS",
        "Cannot reverse payment - an invoice on the statement is in an unexpected status.",
    ),
    (
        "EFT_CREDIT_AMOUNT_UNEXPECTED",
        "The credit amount does not match the expected amount.",
    ),
    (
        "EFT_INSUFFICIENT_CREDITS",
        "There are not enough credits to complete this action.",
    ),
    (
        "EFT_REFUND_AMOUNT_EXCEEDS_BALANCE",
        "The refund amount exceeds the unsettled amount on this short name.",
    ),
    (
        "EFT_REFUND_ALREADY_PROCESSED",
        "This refund has already been approved or declined.",
    ),
];

/// Routing-slip ("FAS") errors
const FAS_ERRORS: &[(&str, &str)] = &[
    (
        "RS_ALREADY_A_PARENT",
        "This routing slip is already a parent and cannot be linked to another routing slip.",
    ),
    (
        "RS_ALREADY_LINKED",
        "This routing slip is already linked to another routing slip.",
    ),
    (
        "RS_CHILD_HAS_TRANSACTIONS",
        "This routing slip has transactions and cannot be linked as a child.",
    ),
    (
        "RS_PARENT_ALREADY_LINKED",
        "The parent routing slip is already linked to another routing slip.",
    ),
    (
        "RS_CANT_LINK_TO_SAME",
        "A routing slip cannot be linked to itself.",
    ),
    (
        "RS_CANT_LINK_NSF",
        "A routing slip with non-sufficient funds cannot be linked.",
    ),
    (
        "RS_PARENT_NOT_ACTIVE",
        "The parent routing slip is not active.",
    ),
    (
        "RS_CHILD_NOT_ACTIVE",
        "This routing slip is not active and cannot be linked.",
    ),
    ("RS_NOT_ACTIVE", "This routing slip is not active."),
    ("RS_DOESNT_EXIST", "The routing slip does not exist."),
    (
        "RS_INSUFFICIENT_FUNDS",
        "The routing slip does not have sufficient funds for this transaction.",
    ),
    (
        "RS_IN_INVALID_STATUS",
        "The routing slip is in a status that does not allow this action.",
    ),
    (
        "FAS_INVALID_ROUTING_SLIP_NUMBER",
        "Routing slip number must be 9 digits with a valid check digit.",
    ),
    (
        "FAS_INVALID_PAYMENT_METHOD",
        "The payment method is not valid for routing slips.",
    ),
];

static EFT_TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| EFT_ERRORS.iter().copied().collect());

static FAS_TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| FAS_ERRORS.iter().copied().collect());

/// Which domain table(s) a lookup consults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Taxonomy {
    Eft,
    Fas,
    /// EFT first, then FAS
    Combined,
}

impl Taxonomy {
    pub fn message_for(self, code: &str) -> Option<&'static str> {
        match self {
            Taxonomy::Eft => EFT_TABLE.get(code).copied(),
            Taxonomy::Fas => FAS_TABLE.get(code).copied(),
            Taxonomy::Combined => Taxonomy::Eft
                .message_for(code)
                .or_else(|| Taxonomy::Fas.message_for(code)),
        }
    }

    pub fn contains(self, code: &str) -> bool {
        self.message_for(code).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_disjoint() {
        for (code, _) in EFT_ERRORS {
            assert!(!Taxonomy::Fas.contains(code), "{} in both tables", code);
        }
    }

    #[test]
    fn test_codes_are_unique_per_table() {
        assert_eq!(EFT_TABLE.len(), EFT_ERRORS.len());
        assert_eq!(FAS_TABLE.len(), FAS_ERRORS.len());
    }

    #[test]
    fn test_codes_are_namespaced() {
        for (code, _) in EFT_ERRORS {
            assert!(code.starts_with("EFT_"), "{}", code);
        }
        for (code, _) in FAS_ERRORS {
            assert!(code.starts_with("RS_") || code.starts_with("FAS_"), "{}", code);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(
            Taxonomy::Eft.message_for("EFT_PAYMENT_ACTION_REVERSAL_EXCEEDS_SIXTY_DAYS"),
            Some("Cannot reverse payment - exceeds 60 day limit.")
        );
        assert!(Taxonomy::Eft.message_for("RS_ALREADY_LINKED").is_none());
        assert!(Taxonomy::Fas.contains("RS_ALREADY_LINKED"));
        assert!(Taxonomy::Combined.contains("RS_ALREADY_LINKED"));
        assert!(Taxonomy::Combined.contains("EFT_INSUFFICIENT_CREDITS"));
        assert!(!Taxonomy::Combined.contains("NOT_A_CODE"));
    }
}
