#![no_main]

use libfuzzer_sys::fuzz_target;

use std::io::Cursor;

use axaudit_domain::LayoutScanner;

fuzz_target!(|data: &[u8]| {
    let scanner = LayoutScanner::new(Cursor::new(data.to_vec()));
    for event in scanner {
        if event.is_err() {
            break;
        }
    }
});
