//! CSV export of the subscriber list.

use alwc_entity::newsletter::Subscriber;

const HEADER: &str = "Email,Name,Status,Subscribed At,Unsubscribed At";

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// One header line, then one quoted row per subscriber. Timestamps are
/// RFC 3339; missing values are empty strings.
pub fn subscribers_csv(subscribers: &[Subscriber]) -> String {
    let mut lines = Vec::with_capacity(subscribers.len() + 1);
    lines.push(HEADER.to_string());
    for s in subscribers {
        let fields = [
            s.email.clone(),
            s.name.clone().unwrap_or_default(),
            s.status.to_string(),
            s.subscribed_at.to_rfc3339(),
            s.unsubscribed_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
        ];
        lines.push(
            fields
                .iter()
                .map(|f| quote(f))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}
