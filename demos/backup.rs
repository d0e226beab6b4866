use chrono::{NaiveDate, Utc};
use invoicepro::backup::backup_filename;
use invoicepro::core::*;
use invoicepro::store::{InvoiceStore, MemoryStorage, StatusFilter};
use rust_decimal_macros::dec;

fn main() -> Result<(), InvoiceError> {
    let mut store = InvoiceStore::open(MemoryStorage::new())?;
    let client = store.create_client(ClientBuilder::new("Initech"))?;

    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    for rate in [dec!(500), dec!(1250), dec!(80)] {
        let draft = store
            .new_invoice(date)
            .due_date(date)
            .client(client.clone())
            .items(vec![LineItem::new("Support retainer", dec!(1), rate)]);
        let id = store.create_invoice(draft)?;
        if rate > dec!(100) {
            store.toggle_status(&id)?;
        }
    }

    let now = Utc::now();
    let json = store.export_backup(now)?;
    println!("{}: {} bytes", backup_filename(now.date_naive()), json.len());

    let mut restored = InvoiceStore::open(MemoryStorage::new())?;
    let summary = restored.import_snapshot(&json)?;
    println!(
        "restored {} invoices, {} clients",
        summary.invoices, summary.clients
    );

    let stats = restored.stats();
    println!("revenue: {} (paid {}, unpaid {})", stats.total_revenue, stats.paid_revenue, stats.unpaid_revenue);
    for invoice in restored.search("", StatusFilter::Unpaid) {
        println!("unpaid: {} {}", invoice.invoice_number, restored.client_name_for(invoice));
    }

    match restored.import_snapshot("{ not a backup") {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("rejected: {e}"),
    }
    Ok(())
}
