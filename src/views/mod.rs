//! Concrete list views
//!
//! Each view is a [`RestListSource`] plus the filter payload the page
//! starts with and the activity rule its filter bar follows. Everything
//! else comes from the shared [`TableSyncOrchestrator`].

pub mod models;
pub mod source;

pub use models::{
    LinkedAccount, PaymentAccount, RefundRequest, RoutingSlip, ShortName, ShortNameHistory,
    ShortNameSummary,
};
pub use source::{ListMethod, ListResponse, RestListSource};

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

use crate::config::ListConfig;
use crate::filter::{ActivityRule, FilterPayload, Filters};
use crate::nav::NavigationStore;
use crate::pagination::LoadOutcome;
use crate::table::{TableOptions, TableSource, TableState, TableSyncOrchestrator};
use crate::transport::Transport;

pub const EFT_SHORT_NAME_SUMMARIES: &str = "eft-short-name-summaries";
pub const EFT_SHORT_NAMES: &str = "eft-short-names";
pub const LINKED_ACCOUNTS: &str = "eft-linked-accounts";
pub const REFUND_REQUESTS: &str = "eft-refund-requests";
pub const ROUTING_SLIP_SEARCH: &str = "routing-slip-search";
pub const PAYMENT_HISTORY: &str = "eft-payment-history";

/// Structural partition of the short-name table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortNamePartition {
    Linked,
    Unlinked,
}

impl ShortNamePartition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShortNamePartition::Linked => "LINKED",
            ShortNamePartition::Unlinked => "UNLINKED",
        }
    }
}

impl From<ShortNamePartition> for Value {
    fn from(partition: ShortNamePartition) -> Self {
        Value::from(partition.as_str())
    }
}

pub type ListTable<T> = TableSyncOrchestrator<RestListSource<T>>;

pub struct ListView<T> {
    pub source: RestListSource<T>,
    pub default_filters: FilterPayload,
    pub rule: ActivityRule,
}

impl<T> ListView<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    pub fn new(source: RestListSource<T>, default_filters: FilterPayload) -> Self {
        Self {
            source,
            default_filters,
            rule: ActivityRule::default(),
        }
    }

    pub fn with_rule(mut self, rule: ActivityRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn name(&self) -> &'static str {
        self.source.name()
    }

    pub fn options(&self, config: &ListConfig) -> TableOptions {
        TableOptions::from_config(config)
            .with_rule(self.rule)
            .with_defaults(self.default_filters.clone())
    }

    /// Orchestrator over an empty table with the view's default filters
    pub fn orchestrator(self, config: &ListConfig) -> ListTable<T> {
        let options = self.options(config);
        let filters = Filters::new(config.default_page_limit, self.default_filters);
        TableSyncOrchestrator::with_options(
            TableState::new(filters).shared(),
            Arc::new(self.source),
            options,
        )
    }

    /// Enter the view: restore the saved snapshot and re-fetch its page, or
    /// start fresh from page 1.
    pub async fn open(
        self,
        config: &ListConfig,
        nav: &NavigationStore,
    ) -> (ListTable<T>, LoadOutcome) {
        match nav.get(self.name()) {
            Some(snapshot) => {
                debug!(
                    view = self.name(),
                    page = snapshot.filters.page_number,
                    "Restoring view"
                );
                let options = self.options(config);
                let table = snapshot.restore(Arc::new(self.source), options);
                let outcome = table.resume().await;
                (table, outcome)
            }
            None => {
                let table = self.orchestrator(config);
                let outcome = table.get_next(true).await;
                (table, outcome)
            }
        }
    }
}

pub fn eft_short_name_summaries(transport: Arc<dyn Transport>) -> ListView<ShortNameSummary> {
    ListView::new(
        RestListSource::new(
            EFT_SHORT_NAME_SUMMARIES,
            transport,
            "/eft-shortnames/summaries",
            ListMethod::Get,
        ),
        FilterPayload::new()
            .with("shortName", "")
            .with("shortNameType", "")
            .with("creditsRemaining", "")
            .with("linkedAccountsCount", "")
            .with("paymentReceivedDate", json!({ "startDate": null, "endDate": null })),
    )
}

/// Linked or unlinked short names.
///
/// Uses the default value-scanning rule: the `state` partition is always in
/// the payload, so counting keys would report every table as filtered, and
/// the remaining columns start out as empty strings.
pub fn eft_short_names(
    transport: Arc<dyn Transport>,
    partition: ShortNamePartition,
) -> ListView<ShortName> {
    ListView::new(
        RestListSource::new(EFT_SHORT_NAMES, transport, "/eft-shortnames", ListMethod::Get),
        FilterPayload::new()
            .with("state", partition)
            .with("shortName", "")
            .with("accountName", "")
            .with("accountNumber", "")
            .with("accountBranch", ""),
    )
}

pub fn linked_accounts(
    transport: Arc<dyn Transport>,
    short_name_id: i64,
) -> ListView<LinkedAccount> {
    ListView::new(
        RestListSource::new(
            LINKED_ACCOUNTS,
            transport,
            format!("/eft-shortnames/{}/links", short_name_id),
            ListMethod::Get,
        ),
        FilterPayload::new(),
    )
}

/// Refund queue. Its filter bar drops cleared fields, so activity counts keys.
pub fn refund_requests(transport: Arc<dyn Transport>) -> ListView<RefundRequest> {
    ListView::new(
        RestListSource::new(
            REFUND_REQUESTS,
            transport,
            "/eft-shortnames/shortname-refund",
            ListMethod::Get,
        ),
        FilterPayload::new().with("state", "PENDING_APPROVAL"),
    )
    .with_rule(ActivityRule::CountKeys)
}

pub fn routing_slip_search(transport: Arc<dyn Transport>) -> ListView<RoutingSlip> {
    ListView::new(
        RestListSource::new(
            ROUTING_SLIP_SEARCH,
            transport,
            "/fas/routing-slips/queries",
            ListMethod::Post,
        ),
        FilterPayload::new()
            .with("routingSlipNumber", "")
            .with("receiptNumber", "")
            .with("accountName", "")
            .with("initiator", "")
            .with("status", "")
            .with("remainingAmount", "")
            .with("chequeReceiptNumber", "")
            .with("dateFilter", json!({ "startDate": null, "endDate": null })),
    )
}

pub fn payment_history(
    transport: Arc<dyn Transport>,
    short_name_id: i64,
) -> ListView<ShortNameHistory> {
    ListView::new(
        RestListSource::new(
            PAYMENT_HISTORY,
            transport,
            format!("/eft-shortnames/{}/history", short_name_id),
            ListMethod::Get,
        ),
        FilterPayload::new(),
    )
}
