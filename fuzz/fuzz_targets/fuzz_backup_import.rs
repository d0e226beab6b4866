#![no_main]

use invoicepro::store::{InvoiceStore, MemoryStorage};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(mut store) = InvoiceStore::open(MemoryStorage::new()) else {
        return;
    };
    if store.import_snapshot(s).is_ok() {
        // Whatever was imported must survive a reopen and render totals.
        for invoice in store.invoices() {
            let _ = invoice.totals();
            let _ = store.client_name_for(invoice);
        }
        let _ = store.stats();
        let reopened = InvoiceStore::open(store.into_storage());
        assert!(reopened.is_ok());
    }
});
