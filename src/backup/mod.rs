//! Full JSON backups of the store.
//!
//! A backup is a point-in-time snapshot of every invoice, every client and
//! the company profile:
//!
//! ```json
//! { "invoices": [...], "clients": [...], "companyInfo": {...}, "exportDate": "2024-06-15T09:30:00Z" }
//! ```
//!
//! Importing a backup replaces the store's contents; there is no merge.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use crate::core::{Client, CompanyProfile, Invoice, InvoiceError, validate_amounts};
use crate::store::{InvoiceStore, Storage};

/// A complete export of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub invoices: Vec<Invoice>,
    pub clients: Vec<Client>,
    pub company_info: CompanyProfile,
    pub export_date: DateTime<Utc>,
}

/// A parsed backup file. Missing collections are empty; a missing company
/// profile is `None` so the current one can be kept.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportedSnapshot {
    #[serde(deserialize_with = "null_as_default")]
    pub invoices: Vec<Invoice>,
    #[serde(deserialize_with = "null_as_default")]
    pub clients: Vec<Client>,
    pub company_info: Option<CompanyProfile>,
    pub export_date: Option<String>,
}

/// What an import replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub invoices: usize,
    pub clients: usize,
    pub company_replaced: bool,
}

/// File name for a backup taken on `date`: `invoicepro-backup-2024-06-15.json`.
pub fn backup_filename(date: NaiveDate) -> String {
    format!("invoicepro-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Capture the store's current contents.
pub fn snapshot<S: Storage>(store: &InvoiceStore<S>, now: DateTime<Utc>) -> Snapshot {
    Snapshot {
        invoices: store.invoices().to_vec(),
        clients: store.clients().to_vec(),
        company_info: store.company().clone(),
        export_date: now,
    }
}

/// Serialize the store's current contents as pretty-printed JSON.
pub fn export_snapshot<S: Storage>(
    store: &InvoiceStore<S>,
    now: DateTime<Utc>,
) -> Result<String, InvoiceError> {
    serde_json::to_string_pretty(&snapshot(store, now))
        .map_err(|e| InvoiceError::Backup(format!("cannot serialize backup: {e}")))
}

/// Parse a backup document.
///
/// The document must be a JSON object. Unknown keys are ignored. Invoices
/// whose amounts are out of range (see [`validate_amounts`]) reject the
/// whole document.
pub fn parse_snapshot(json: &str) -> Result<ImportedSnapshot, InvoiceError> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| InvoiceError::Backup(format!("invalid backup file: {e}")))?;
    if !value.is_object() {
        return Err(InvoiceError::Backup(
            "invalid backup file: top level must be an object".into(),
        ));
    }
    let imported: ImportedSnapshot = serde_json::from_value(value)
        .map_err(|e| InvoiceError::Backup(format!("invalid backup file: {e}")))?;

    for invoice in &imported.invoices {
        let errors = validate_amounts(invoice);
        if !errors.is_empty() {
            return Err(InvoiceError::Backup(format!(
                "invalid backup file: invoice {}: {}",
                invoice.invoice_number,
                InvoiceError::Validation(errors)
            )));
        }
    }
    Ok(imported)
}

impl<S: Storage> InvoiceStore<S> {
    /// Serialize the whole store as a backup document.
    pub fn export_backup(&self, now: DateTime<Utc>) -> Result<String, InvoiceError> {
        export_snapshot(self, now)
    }

    /// Replace the store's contents with a backup document.
    ///
    /// If the document cannot be parsed, or the new contents cannot be
    /// written, the store is left exactly as it was.
    pub fn import_snapshot(&mut self, json: &str) -> Result<ImportSummary, InvoiceError> {
        let imported = parse_snapshot(json).inspect_err(|e| {
            warn!(error = %e, "rejected backup import");
        })?;

        let summary = ImportSummary {
            invoices: imported.invoices.len(),
            clients: imported.clients.len(),
            company_replaced: imported.company_info.is_some(),
        };

        self.replace_all(imported.invoices, imported.clients, imported.company_info)?;
        info!(
            invoices = summary.invoices,
            clients = summary.clients,
            company_replaced = summary.company_replaced,
            exported = imported.export_date.as_deref().unwrap_or("unknown"),
            "imported backup"
        );
        Ok(summary)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
