use boardpack_core::PacketHeader;
use chrono::NaiveDateTime;

/// Reduces a form value to a conservative filename token.
///
/// Anything outside `[A-Za-z0-9_-]` becomes `_`, runs of `_` collapse to one and leading or
/// trailing `_` are dropped. The result may be empty.
pub fn sanitize_filename_part(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.trim().chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
        let ch = if ok { ch } else { '_' };
        if ch == '_' && out.ends_with('_') {
            continue;
        }
        out.push(ch);
    }
    out.trim_matches('_').to_string()
}

/// `packet_<YYYYmmdd_HHMMSS>_<sales order>_<customer>_<switchboard>.pdf`; blank fields are left
/// out.
pub fn packet_filename(now: NaiveDateTime, header: &PacketHeader) -> String {
    let mut name = format!("packet_{}", now.format("%Y%m%d_%H%M%S"));
    for field in [
        &header.sales_order,
        &header.customer_name,
        &header.switchboard_name,
    ] {
        let part = sanitize_filename_part(field);
        if !part.is_empty() {
            name.push('_');
            name.push_str(&part);
        }
    }
    name.push_str(".pdf");
    name
}
