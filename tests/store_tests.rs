#![cfg(feature = "store")]

use chrono::NaiveDate;
use invoicepro::core::*;
use invoicepro::store::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft(store: &InvoiceStore<impl Storage>, client: &ClientId, rate: rust_decimal::Decimal) -> InvoiceBuilder {
    store
        .new_invoice(date(2024, 5, 1))
        .due_date(date(2024, 5, 31))
        .client(client.clone())
        .items(vec![LineItem::new("Consulting", dec!(1), rate)])
}

/// A store with two clients and three invoices (the second one paid).
fn seeded() -> (InvoiceStore<MemoryStorage>, Vec<ClientId>, Vec<InvoiceId>) {
    let mut store = InvoiceStore::open(MemoryStorage::new()).unwrap();
    let acme = store
        .create_client(ClientBuilder::new("Acme Corp").email("billing@acme.test"))
        .unwrap();
    let globex = store.create_client(ClientBuilder::new("Globex")).unwrap();

    let mut invoices = Vec::new();
    for (client, rate) in [(&acme, dec!(100)), (&globex, dec!(250)), (&acme, dec!(40))] {
        let d = draft(&store, client, rate);
        invoices.push(store.create_invoice(d).unwrap());
    }
    store.toggle_status(&invoices[1]).unwrap();

    (store, vec![acme, globex], invoices)
}

// --- Invoices ---

#[test]
fn numbers_follow_invoice_count() {
    let (store, _, ids) = seeded();
    let numbers: Vec<_> = ids
        .iter()
        .map(|id| store.invoice(id).unwrap().invoice_number.as_str())
        .collect();
    assert_eq!(numbers, ["INV-2024-0001", "INV-2024-0002", "INV-2024-0003"]);
    assert_eq!(store.next_invoice_number(2024), "INV-2024-0004");
}

#[test]
fn reused_number_after_delete_is_still_suggested() {
    let (mut store, _, ids) = seeded();
    store.delete_invoice(&ids[0]).unwrap();
    // Count-based: two invoices left, so 0003 is suggested again.
    assert_eq!(store.next_invoice_number(2024), "INV-2024-0003");
}

#[test]
fn operations_address_invoices_by_id() {
    let (mut store, clients, ids) = seeded();

    let removed = store.delete_invoice(&ids[0]).unwrap();
    assert_eq!(removed.id, ids[0]);
    assert!(store.invoice(&ids[0]).is_none());

    // The other ids still resolve to the same invoices.
    assert_eq!(store.invoice(&ids[1]).unwrap().invoice_number, "INV-2024-0002");
    assert_eq!(store.toggle_status(&ids[2]).unwrap(), InvoiceStatus::Paid);

    let edited = InvoiceBuilder::from_invoice(store.invoice(&ids[1]).unwrap())
        .client(clients[0].clone())
        .notes("edited");
    store.update_invoice(&ids[1], edited).unwrap();
    let inv = store.invoice(&ids[1]).unwrap();
    assert_eq!(inv.notes, "edited");
    assert_eq!(inv.client_id, clients[0]);
    assert_eq!(store.invoices()[0].id, ids[1]);
}

#[test]
fn unknown_ids_are_not_found() {
    let (mut store, clients, _) = seeded();
    let missing = InvoiceId::new("nope");

    assert!(matches!(store.delete_invoice(&missing), Err(InvoiceError::NotFound(_))));
    assert!(matches!(store.toggle_status(&missing), Err(InvoiceError::NotFound(_))));
    assert!(matches!(
        store.duplicate_invoice(&missing, date(2024, 6, 1)),
        Err(InvoiceError::NotFound(_))
    ));
    let d = draft(&store, &clients[0], dec!(1));
    assert!(matches!(store.update_invoice(&missing, d), Err(InvoiceError::NotFound(_))));
    assert_eq!(store.invoices().len(), 3);
}

#[test]
fn invalid_draft_is_not_stored() {
    let (mut store, _, _) = seeded();
    let d = store
        .new_invoice(date(2024, 5, 1))
        .due_date(date(2024, 5, 31))
        .client(ClientId::new("ghost"));
    let err = store.create_invoice(d).unwrap_err();

    let rules: Vec<_> = err
        .validation_errors()
        .iter()
        .filter_map(|e| e.rule.as_deref())
        .collect();
    assert_eq!(rules, ["INV-01", "INV-04"]);
    assert_eq!(store.invoices().len(), 3);
}

#[test]
fn oversized_item_is_rejected_on_save() {
    let (mut store, clients, _) = seeded();
    let d = draft(&store, &clients[0], dec!(1))
        .add_item(LineItem::new("Huge", dec!(1000000000000000), dec!(1000000000000000)));
    let err = store.create_invoice(d).unwrap_err();
    assert_eq!(err.validation_errors()[0].rule.as_deref(), Some("INV-05"));
    assert_eq!(store.invoices().len(), 3);
    assert_eq!(store.stats().total_revenue, dec!(390));
}

#[test]
fn toggle_twice_restores_status() {
    let (mut store, _, ids) = seeded();
    assert_eq!(store.toggle_status(&ids[0]).unwrap(), InvoiceStatus::Paid);
    assert_eq!(store.toggle_status(&ids[0]).unwrap(), InvoiceStatus::Unpaid);
}

#[test]
fn duplicate_gets_new_number_date_and_status() {
    let (mut store, _, ids) = seeded();
    let source = store.invoice(&ids[1]).unwrap().clone();

    let copy = store.duplicate_invoice(&ids[1], date(2024, 9, 2)).unwrap();
    assert_eq!(copy.get_invoice_number(), "INV-2024-0004");
    assert_eq!(copy.get_date(), date(2024, 9, 2));
    assert_eq!(copy.get_status(), InvoiceStatus::Unpaid);
    assert_eq!(copy.get_items(), source.items.as_slice());
    assert_eq!(store.invoices().len(), 3, "duplicate is not saved yet");

    let new_id = store.create_invoice(copy).unwrap();
    assert_ne!(new_id, ids[1]);
    let dup = store.invoice(&new_id).unwrap();
    assert_eq!(dup.client_id, source.client_id);
    assert_eq!(dup.totals(), source.totals());
}

// --- Clients ---

#[test]
fn deleting_a_client_keeps_its_invoices() {
    let (mut store, clients, ids) = seeded();
    store.delete_client(&clients[0]).unwrap();

    assert_eq!(store.invoices().len(), 3);
    let orphan = store.invoice(&ids[0]).unwrap();
    assert!(store.client_for(orphan).is_none());
    assert_eq!(store.client_name_for(orphan), UNKNOWN_CLIENT);
    assert_eq!(store.client_name_for(store.invoice(&ids[1]).unwrap()), "Globex");
}

#[test]
fn orphaned_invoice_cannot_be_saved_until_reassigned() {
    let (mut store, clients, ids) = seeded();
    store.delete_client(&clients[0]).unwrap();

    let edit = InvoiceBuilder::from_invoice(store.invoice(&ids[0]).unwrap());
    let err = store.update_invoice(&ids[0], edit).unwrap_err();
    assert_eq!(err.validation_errors()[0].rule.as_deref(), Some("INV-01"));

    let edit = InvoiceBuilder::from_invoice(store.invoice(&ids[0]).unwrap()).client(clients[1].clone());
    store.update_invoice(&ids[0], edit).unwrap();
    assert_eq!(store.client_name_for(store.invoice(&ids[0]).unwrap()), "Globex");
}

#[test]
fn client_update_keeps_id() {
    let (mut store, clients, _) = seeded();
    let edit = ClientBuilder::from_client(store.client(&clients[1]).unwrap()).phone("555-0100");
    store.update_client(&clients[1], edit).unwrap();

    let client = store.client(&clients[1]).unwrap();
    assert_eq!(client.name, "Globex");
    assert_eq!(client.phone.as_deref(), Some("555-0100"));
}

#[test]
fn nameless_client_is_rejected() {
    let (mut store, _, _) = seeded();
    let err = store.create_client(ClientBuilder::new("   ")).unwrap_err();
    assert_eq!(err.validation_errors()[0].rule.as_deref(), Some("CLI-01"));
    assert_eq!(store.clients().len(), 2);
}

// --- Search and stats ---

#[test]
fn search_matches_number_or_client_name() {
    let (store, _, ids) = seeded();

    let by_name: Vec<_> = store.search("acme", StatusFilter::All).iter().map(|i| i.id.clone()).collect();
    assert_eq!(by_name, [ids[0].clone(), ids[2].clone()]);

    let by_number = store.search("0002", StatusFilter::All);
    assert_eq!(by_number.len(), 1);
    assert_eq!(by_number[0].id, ids[1]);

    assert_eq!(store.search("", StatusFilter::All).len(), 3);
    assert_eq!(store.search("", StatusFilter::Paid).len(), 1);
    assert_eq!(store.search("ACME", StatusFilter::Paid).len(), 0);
    assert_eq!(store.search("inv-2024", StatusFilter::Unpaid).len(), 2);
}

#[test]
fn stats_split_revenue_by_status() {
    let (store, _, _) = seeded();
    let stats = store.stats();

    assert_eq!(stats.total_revenue, dec!(390));
    assert_eq!(stats.paid_revenue, dec!(250));
    assert_eq!(stats.unpaid_revenue, dec!(140));
    assert_eq!(stats.total_invoices, 3);
    assert_eq!(stats.paid_invoices, 1);
    assert_eq!(stats.unpaid_invoices, 2);
    assert_eq!(stats.total_clients, 2);
}

// --- Company ---

#[test]
fn company_defaults_until_set() {
    let (mut store, _, _) = seeded();
    assert_eq!(store.company(), &CompanyProfile::default());

    let company = CompanyProfile {
        name: "Studio Nine".into(),
        ..CompanyProfile::default()
    };
    store.set_company(company.clone()).unwrap();
    assert_eq!(store.company(), &company);
}

// --- Persistence ---

#[test]
fn reopening_restores_everything() {
    let (mut store, _, ids) = seeded();
    store
        .set_company(CompanyProfile {
            name: "Studio Nine".into(),
            ..CompanyProfile::default()
        })
        .unwrap();
    let invoices = store.invoices().to_vec();
    let clients = store.clients().to_vec();

    let reopened = InvoiceStore::open(store.into_storage()).unwrap();
    assert_eq!(reopened.invoices(), invoices.as_slice());
    assert_eq!(reopened.clients(), clients.as_slice());
    assert_eq!(reopened.company().name, "Studio Nine");
    assert!(reopened.invoice(&ids[1]).unwrap().is_paid());
}

#[test]
fn stored_blobs_use_original_keys() {
    let (store, _, _) = seeded();
    let storage = store.storage();

    let invoices: serde_json::Value = serde_json::from_str(storage.get(INVOICES_KEY).unwrap()).unwrap();
    assert_eq!(invoices.as_array().unwrap().len(), 3);
    assert_eq!(invoices[0]["invoiceNumber"], "INV-2024-0001");

    let clients: serde_json::Value = serde_json::from_str(storage.get(CLIENTS_KEY).unwrap()).unwrap();
    assert_eq!(clients[0]["name"], "Acme Corp");
}

#[test]
fn file_storage_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let id = {
        let mut store = InvoiceStore::open(FileStorage::new(dir.path()).unwrap()).unwrap();
        let client = store.create_client(ClientBuilder::new("Acme Corp")).unwrap();
        let d = draft(&store, &client, dec!(75));
        store.create_invoice(d).unwrap()
    };

    let store = InvoiceStore::open(FileStorage::new(dir.path()).unwrap()).unwrap();
    let invoice = store.invoice(&id).unwrap();
    assert_eq!(invoice.totals().total, dec!(75));
    assert_eq!(store.client_name_for(invoice), "Acme Corp");
    assert!(dir.path().join("invoices.json").exists());
    assert!(!dir.path().join("companyInfo.json").exists());
}

#[test]
fn legacy_numeric_ids_load() {
    let mut storage = MemoryStorage::new();
    storage.insert(CLIENTS_KEY, r#"[{"id": 1700000000000, "name": "Old Client", "email": ""}]"#);
    storage.insert(
        INVOICES_KEY,
        r#"[{"id": 1700000000001, "invoiceNumber": "INV-2023-0001", "date": "2023-11-14",
             "dueDate": "2023-12-14", "clientId": 1700000000000,
             "items": [{"description": "Setup", "quantity": 1, "rate": 99.5}],
             "taxRate": 0, "discount": 0, "discountType": "percentage",
             "notes": "", "status": "unpaid"}]"#,
    );

    let store = InvoiceStore::open(storage).unwrap();
    let invoice = store.invoice(&InvoiceId::new("1700000000001")).unwrap();
    assert_eq!(store.client_name_for(invoice), "Old Client");
    assert_eq!(store.clients()[0].email, None);
    assert_eq!(invoice.totals().total, dec!(99.5));
}

#[cfg(feature = "pdf")]
#[test]
fn export_pdf_for_orphaned_invoice_fails() {
    let (mut store, clients, ids) = seeded();
    let config = invoicepro::render::RenderConfig::default();

    let export = store.export_pdf(&ids[1], &config).unwrap();
    assert_eq!(export.filename, "INV-2024-0002.pdf");

    store.delete_client(&clients[0]).unwrap();
    assert!(matches!(
        store.export_pdf(&ids[0], &config),
        Err(InvoiceError::UnknownClient(_))
    ));
    assert!(matches!(
        store.render_invoice(&ids[0], &config),
        Err(InvoiceError::UnknownClient(_))
    ));
}
