use chrono::Local;
use invoicepro::core::*;
use invoicepro::render::RenderConfig;
use invoicepro::store::{FileStorage, InvoiceStore};
use rust_decimal_macros::dec;

fn main() -> Result<(), InvoiceError> {
    let dir = std::env::temp_dir().join("invoicepro-demo");
    let mut store = InvoiceStore::open(FileStorage::new(&dir)?)?;

    let client = store.create_client(
        ClientBuilder::new("Globex Corporation")
            .email("accounts@globex.example")
            .address("1 Globex Way, Cypress Creek"),
    )?;

    let today = Local::now().date_naive();
    let draft = store
        .new_invoice(today)
        .due_date(today + chrono::Days::new(30))
        .client(client)
        .items(vec![
            LineItem::new("Consulting", dec!(12), dec!(150)),
            LineItem::new("Travel expenses", dec!(1), dec!(320.50)),
        ])
        .tax_rate(dec!(7))
        .discount(dec!(100), DiscountType::Fixed)
        .notes("Payment by bank transfer within 30 days.");
    let id = store.create_invoice(draft)?;

    let config = RenderConfig::default();
    println!("{}", store.render_invoice(&id, &config)?.listing());

    let export = store.export_pdf(&id, &config)?;
    let path = dir.join(&export.filename);
    std::fs::write(&path, &export.bytes)
        .map_err(|e| InvoiceError::Pdf(format!("cannot write {}: {e}", path.display())))?;
    println!("wrote {} ({} bytes)", path.display(), export.bytes.len());
    Ok(())
}
