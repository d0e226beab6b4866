use chrono::NaiveDate;
use invoicepro::core::*;
use rust_decimal_macros::dec;

fn main() {
    let client = ClientBuilder::new("Acme Corp")
        .email("billing@acme.example")
        .phone("(555) 987-6543")
        .address("42 Market St, Springfield")
        .build(ClientId::new("client-1"))
        .expect("client should be valid");

    let number = next_invoice_number(0, 2024);
    let invoice = InvoiceBuilder::new(number, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .due_date(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
        .client(client.id.clone())
        .add_item(LineItem::new("Website redesign", dec!(1), dec!(2400)))
        .add_item(LineItem::new("Hosting (monthly)", dec!(12), dec!(19.99)))
        .tax_rate(dec!(8.25))
        .discount(dec!(10), DiscountType::Percentage)
        .notes("Thank you for your business!")
        .build(InvoiceId::new("invoice-1"), std::slice::from_ref(&client))
        .expect("invoice should be valid");

    let totals = invoice.totals();
    println!("Invoice: {}", invoice.invoice_number);
    println!("Date:    {}", invoice.date);
    println!("Client:  {}", client.name);
    println!("---");
    for item in &invoice.items {
        println!(
            "  {} x {} @ {} = {}",
            item.quantity,
            item.description,
            item.rate,
            item.amount()
        );
    }
    println!("---");
    println!("Subtotal: {}", totals.subtotal);
    println!("Tax:      {}", totals.tax_amount);
    println!("Discount: {}", totals.discount_amount);
    println!("Total:    {}", totals.total.round_dp(2));

    // An invoice without a due date or described item is rejected.
    let err = InvoiceBuilder::new("INV-2024-0002", NaiveDate::from_ymd_opt(2024, 6, 16).unwrap())
        .client(client.id.clone())
        .add_item(LineItem::blank())
        .build(InvoiceId::new("invoice-2"), &[client])
        .unwrap_err();
    for e in err.validation_errors() {
        println!("rejected: {e}");
    }
}
