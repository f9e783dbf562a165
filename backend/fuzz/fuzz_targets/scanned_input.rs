#![no_main]
use arbitrary::Arbitrary;
use credit_backend::payment_request;
use credit_backend::units::{from_units, to_units, units};
use credit_backend::validation::{is_valid_address, is_valid_amount};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Scan {
    record: String,
    amount: f64,
}

fuzz_target!(|scan: Scan| {
    // Whatever a tag or QR code holds, a parsed request carries a well-formed recipient.
    if let Ok(request) = payment_request::parse(&scan.record) {
        assert!(is_valid_address(&request.recipient_address));
    }

    // Accepted amounts convert to non-negative units and come back within one unit.
    if is_valid_amount(scan.amount) {
        assert!(units(scan.amount) >= 0);
        let back = from_units(&to_units(scan.amount)).unwrap();
        assert!(scan.amount - back >= -1e-6 && scan.amount - back < 2e-6);
    }
});

// Run with: cargo fuzz run scanned_input -- -runs=1000000
