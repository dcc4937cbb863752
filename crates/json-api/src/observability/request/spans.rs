//! Route normalisation for span names and metric labels.

use pricebook_app::domain::orders::payment_code::PaymentCode;
use uuid::Uuid;

/// Replace identifiers in `path` with placeholders so metric labels stay bounded.
pub(super) fn normalise_route(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else if PaymentCode::parse(segment).is_ok() {
                "{payment_code}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
