//! The invoice store: clients, invoices and the company profile held in
//! insertion order and mirrored to a [`Storage`] backend on every change.
//!
//! The store is an explicit object owned by the application; there is no
//! global state. Entities are addressed by id only, never by position.

mod stats;
mod storage;

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::core::*;

pub use stats::{DashboardStats, StatusFilter};
pub use storage::{CLIENTS_KEY, COMPANY_KEY, FileStorage, INVOICES_KEY, MemoryStorage, Storage};

/// Name shown for invoices whose client has been deleted.
pub const UNKNOWN_CLIENT: &str = "Unknown Client";

/// Invoices, clients and company profile backed by a storage backend.
#[derive(Debug)]
pub struct InvoiceStore<S: Storage> {
    storage: S,
    invoices: Vec<Invoice>,
    clients: Vec<Client>,
    company: CompanyProfile,
    last_id: i64,
}

impl<S: Storage> InvoiceStore<S> {
    /// Load all three collections from `storage`.
    ///
    /// Keys that were never written start empty (the company profile starts
    /// with its defaults). A blob that does not parse, or an invoice whose
    /// amounts are out of range, is an error.
    pub fn open(storage: S) -> Result<Self, InvoiceError> {
        let invoices: Vec<Invoice> = load_key(&storage, INVOICES_KEY)?.unwrap_or_default();
        for invoice in &invoices {
            let errors = validate_amounts(invoice);
            if !errors.is_empty() {
                return Err(InvoiceError::Storage(format!(
                    "stored invoice {} is not valid: {}",
                    invoice.invoice_number,
                    InvoiceError::Validation(errors)
                )));
            }
        }
        let clients: Vec<Client> = load_key(&storage, CLIENTS_KEY)?.unwrap_or_default();
        let company: CompanyProfile = load_key(&storage, COMPANY_KEY)?.unwrap_or_default();

        debug!(
            invoices = invoices.len(),
            clients = clients.len(),
            "opened invoice store"
        );

        Ok(Self {
            storage,
            invoices,
            clients,
            company,
            last_id: 0,
        })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // ── Invoices ────────────────────────────────────────────────────────

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn invoice(&self, id: &InvoiceId) -> Option<&Invoice> {
        self.invoices.iter().find(|inv| &inv.id == id)
    }

    /// Suggest the number for a new invoice issued in `year`.
    ///
    /// Based on the current invoice count (see [`next_invoice_number`]). A
    /// suggestion that is already in use is returned unchanged but logged.
    pub fn next_invoice_number(&self, year: i32) -> String {
        let number = next_invoice_number(self.invoices.len(), year);
        if self.invoices.iter().any(|inv| inv.invoice_number == number) {
            warn!(%number, "suggested invoice number is already in use");
        }
        number
    }

    /// A fresh invoice form: suggested number, dated `today`, one blank item.
    pub fn new_invoice(&self, today: NaiveDate) -> InvoiceBuilder {
        InvoiceBuilder::new(self.next_invoice_number(today.year()), today)
            .add_item(LineItem::blank())
    }

    /// Validate and append a new invoice. Nothing is stored on failure.
    pub fn create_invoice(&mut self, draft: InvoiceBuilder) -> Result<InvoiceId, InvoiceError> {
        let id = InvoiceId::new(self.generate_id());
        let invoice = draft.build(id.clone(), &self.clients)?;
        debug!(id = %id, number = %invoice.invoice_number, "creating invoice");

        self.mutate_invoices(|invoices| {
            invoices.push(invoice);
            Ok(())
        })?;
        Ok(id)
    }

    /// Validate and replace an existing invoice, keeping its id and position.
    pub fn update_invoice(
        &mut self,
        id: &InvoiceId,
        draft: InvoiceBuilder,
    ) -> Result<(), InvoiceError> {
        let index = self.invoice_index(id)?;
        let invoice = draft.build(id.clone(), &self.clients)?;
        debug!(id = %id, "updating invoice");

        self.mutate_invoices(|invoices| {
            invoices[index] = invoice;
            Ok(())
        })
    }

    /// Remove an invoice and return it.
    pub fn delete_invoice(&mut self, id: &InvoiceId) -> Result<Invoice, InvoiceError> {
        let index = self.invoice_index(id)?;
        debug!(id = %id, "deleting invoice");
        self.mutate_invoices(|invoices| Ok(invoices.remove(index)))
    }

    /// Flip an invoice between paid and unpaid. Returns the new status.
    pub fn toggle_status(&mut self, id: &InvoiceId) -> Result<InvoiceStatus, InvoiceError> {
        let index = self.invoice_index(id)?;
        self.mutate_invoices(|invoices| {
            let invoice = &mut invoices[index];
            invoice.status = invoice.status.toggled();
            debug!(id = %invoice.id, status = invoice.status.as_str(), "toggled invoice status");
            Ok(invoice.status)
        })
    }

    /// A new invoice form copied from an existing invoice, with a fresh
    /// number, dated `today`, and unpaid. Nothing is stored until the form
    /// is passed to [`create_invoice`](Self::create_invoice).
    pub fn duplicate_invoice(
        &self,
        id: &InvoiceId,
        today: NaiveDate,
    ) -> Result<InvoiceBuilder, InvoiceError> {
        let source = self
            .invoice(id)
            .ok_or_else(|| InvoiceError::NotFound(format!("invoice '{id}'")))?;
        Ok(InvoiceBuilder::from_invoice(source)
            .invoice_number(self.next_invoice_number(today.year()))
            .date(today)
            .status(InvoiceStatus::Unpaid))
    }

    fn invoice_index(&self, id: &InvoiceId) -> Result<usize, InvoiceError> {
        self.invoices
            .iter()
            .position(|inv| &inv.id == id)
            .ok_or_else(|| InvoiceError::NotFound(format!("invoice '{id}'")))
    }

    // ── Clients ─────────────────────────────────────────────────────────

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn client(&self, id: &ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| &c.id == id)
    }

    /// The client an invoice is billed to, if it still exists.
    pub fn client_for(&self, invoice: &Invoice) -> Option<&Client> {
        self.client(&invoice.client_id)
    }

    /// Display name of an invoice's client, or [`UNKNOWN_CLIENT`].
    pub fn client_name_for(&self, invoice: &Invoice) -> &str {
        self.client_for(invoice)
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_CLIENT)
    }

    /// Validate and append a new client.
    pub fn create_client(&mut self, draft: ClientBuilder) -> Result<ClientId, InvoiceError> {
        let id = ClientId::new(self.generate_id());
        let client = draft.build(id.clone())?;
        debug!(id = %id, "creating client");

        self.mutate_clients(|clients| {
            clients.push(client);
            Ok(())
        })?;
        Ok(id)
    }

    /// Validate and replace an existing client, keeping its id and position.
    pub fn update_client(&mut self, id: &ClientId, draft: ClientBuilder) -> Result<(), InvoiceError> {
        let index = self.client_index(id)?;
        let client = draft.build(id.clone())?;
        debug!(id = %id, "updating client");

        self.mutate_clients(|clients| {
            clients[index] = client;
            Ok(())
        })
    }

    /// Remove a client and return it. Invoices referencing it are kept and
    /// show [`UNKNOWN_CLIENT`] from then on.
    pub fn delete_client(&mut self, id: &ClientId) -> Result<Client, InvoiceError> {
        let index = self.client_index(id)?;
        let orphaned = self.invoices.iter().filter(|inv| &inv.client_id == id).count();
        debug!(id = %id, orphaned, "deleting client");
        self.mutate_clients(|clients| Ok(clients.remove(index)))
    }

    fn client_index(&self, id: &ClientId) -> Result<usize, InvoiceError> {
        self.clients
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| InvoiceError::NotFound(format!("client '{id}'")))
    }

    // ── Company ─────────────────────────────────────────────────────────

    pub fn company(&self) -> &CompanyProfile {
        &self.company
    }

    /// Replace the company profile.
    pub fn set_company(&mut self, company: CompanyProfile) -> Result<(), InvoiceError> {
        let json = to_json(&company, COMPANY_KEY)?;
        self.storage.save(COMPANY_KEY, &json)?;
        self.company = company;
        Ok(())
    }

    // ── Rendering ───────────────────────────────────────────────────────

    /// Lay out an invoice for preview or printing.
    #[cfg(feature = "render")]
    pub fn render_invoice(
        &self,
        id: &InvoiceId,
        config: &crate::render::RenderConfig,
    ) -> Result<crate::render::RenderedDocument, InvoiceError> {
        let invoice = self
            .invoice(id)
            .ok_or_else(|| InvoiceError::NotFound(format!("invoice '{id}'")))?;
        let client = self.client_for(invoice).ok_or_else(|| {
            InvoiceError::UnknownClient(format!(
                "invoice {} references client '{}', which does not exist",
                invoice.invoice_number, invoice.client_id
            ))
        })?;
        Ok(crate::render::render_invoice(
            invoice,
            client,
            &self.company,
            config,
        ))
    }

    /// Render an invoice to a PDF file named `{invoice_number}.pdf`.
    #[cfg(feature = "pdf")]
    pub fn export_pdf(
        &self,
        id: &InvoiceId,
        config: &crate::render::RenderConfig,
    ) -> Result<crate::pdf::PdfExport, InvoiceError> {
        let invoice = self
            .invoice(id)
            .ok_or_else(|| InvoiceError::NotFound(format!("invoice '{id}'")))?;
        crate::pdf::export_invoice_pdf(invoice, self.client_for(invoice), &self.company, config)
    }

    // ── Bulk replacement ────────────────────────────────────────────────

    /// Replace every collection at once, as a backup import does. A `None`
    /// company keeps the current profile.
    ///
    /// All three blobs are written. If any write fails, the blobs already
    /// written are put back and the in-memory state is left unchanged.
    pub fn replace_all(
        &mut self,
        invoices: Vec<Invoice>,
        clients: Vec<Client>,
        company: Option<CompanyProfile>,
    ) -> Result<(), InvoiceError> {
        let company = company.unwrap_or_else(|| self.company.clone());
        let keys = [INVOICES_KEY, CLIENTS_KEY, COMPANY_KEY];
        let next = [
            to_json(&invoices, INVOICES_KEY)?,
            to_json(&clients, CLIENTS_KEY)?,
            to_json(&company, COMPANY_KEY)?,
        ];
        // Keys never written fall back to what the store holds, which is
        // what `open` would have produced for them.
        let current = [
            to_json(&self.invoices, INVOICES_KEY)?,
            to_json(&self.clients, CLIENTS_KEY)?,
            to_json(&self.company, COMPANY_KEY)?,
        ];
        let mut previous = Vec::with_capacity(keys.len());
        for (key, fallback) in keys.into_iter().zip(current) {
            previous.push(self.storage.load(key)?.unwrap_or(fallback));
        }

        for (written, (key, json)) in keys.iter().zip(&next).enumerate() {
            if let Err(e) = self.storage.save(key, json) {
                warn!(key = *key, error = %e, "replacing stored data failed, restoring");
                for (key, blob) in keys.iter().zip(&previous).take(written) {
                    if let Err(restore) = self.storage.save(key, blob) {
                        warn!(key = *key, error = %restore, "could not restore stored data");
                    }
                }
                return Err(e);
            }
        }

        self.invoices = invoices;
        self.clients = clients;
        self.company = company;
        Ok(())
    }

    // ── Internals ───────────────────────────────────────────────────────

    /// Apply `f` to the invoice list and persist it. If `f` or the write
    /// fails, the list is restored.
    fn mutate_invoices<T>(
        &mut self,
        f: impl FnOnce(&mut Vec<Invoice>) -> Result<T, InvoiceError>,
    ) -> Result<T, InvoiceError> {
        let previous = self.invoices.clone();
        let result = f(&mut self.invoices).and_then(|value| {
            let json = to_json(&self.invoices, INVOICES_KEY)?;
            self.storage.save(INVOICES_KEY, &json)?;
            Ok(value)
        });
        if result.is_err() {
            self.invoices = previous;
        }
        result
    }

    /// Apply `f` to the client list and persist it. If `f` or the write
    /// fails, the list is restored.
    fn mutate_clients<T>(
        &mut self,
        f: impl FnOnce(&mut Vec<Client>) -> Result<T, InvoiceError>,
    ) -> Result<T, InvoiceError> {
        let previous = self.clients.clone();
        let result = f(&mut self.clients).and_then(|value| {
            let json = to_json(&self.clients, CLIENTS_KEY)?;
            self.storage.save(CLIENTS_KEY, &json)?;
            Ok(value)
        });
        if result.is_err() {
            self.clients = previous;
        }
        result
    }

    /// A fresh id from the current millisecond timestamp, bumped until it
    /// collides with nothing issued or stored.
    fn generate_id(&mut self) -> String {
        let mut candidate = Utc::now().timestamp_millis().max(self.last_id + 1);
        while self.id_in_use(&candidate.to_string()) {
            candidate += 1;
        }
        self.last_id = candidate;
        candidate.to_string()
    }

    fn id_in_use(&self, id: &str) -> bool {
        self.invoices.iter().any(|inv| inv.id.as_str() == id)
            || self.clients.iter().any(|c| c.id.as_str() == id)
    }
}

fn load_key<S: Storage, T: DeserializeOwned>(
    storage: &S,
    key: &str,
) -> Result<Option<T>, InvoiceError> {
    let Some(raw) = storage.load(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| InvoiceError::Storage(format!("stored '{key}' is not valid: {e}")))
}

fn to_json<T: Serialize + ?Sized>(value: &T, key: &str) -> Result<String, InvoiceError> {
    serde_json::to_string(value)
        .map_err(|e| InvoiceError::Storage(format!("cannot serialize '{key}': {e}")))
}
