//! `stacview origin` – print the resolved proxy origin.

use stacview_core::origin::ProxyOrigin;

pub fn run_origin(origin: &ProxyOrigin) {
    println!("{}", origin.as_str());
}
