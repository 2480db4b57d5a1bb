//! Order notification rendering
//!
//! Builds the Arabic (right-to-left) email sent to the shop owner. The plain
//! text part is the fallback; the HTML part carries the layout. Output is a
//! pure function of the order and the shop branding.

use std::fmt::Write;

use crate::config::ShopConfig;
use crate::gateway::types::ValidatedOrder;

const LABEL_NAME: &str = "الاسم";
const LABEL_PHONE: &str = "الهاتف";
const LABEL_ADDRESS: &str = "العنوان";
const LABEL_ITEMS: &str = "المنتجات";
const LABEL_TOTAL: &str = "المجموع";

/// Rendered email, owned by one request and dropped after the send attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderNotification {
    pub subject: String,
    pub text: String,
    pub html: String,
}

pub fn render(order: &ValidatedOrder, shop: &ShopConfig) -> OrderNotification {
    let title = format!("📦 طلب جديد من {}", shop.name);

    OrderNotification {
        text: render_text(&title, order, shop),
        html: render_html(&title, order, shop),
        subject: title,
    }
}

fn render_text(title: &str, order: &ValidatedOrder, shop: &ShopConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}: {}", LABEL_NAME, order.name);
    let _ = writeln!(out, "{}: {}", LABEL_PHONE, order.phone);
    let _ = writeln!(out, "{}: {}", LABEL_ADDRESS, order.address);
    let _ = writeln!(out, "{}:", LABEL_ITEMS);
    for (i, item) in order.items.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, item);
    }
    let _ = writeln!(out, "{}: {} {}", LABEL_TOTAL, order.total, shop.currency);
    out
}

fn render_html(title: &str, order: &ValidatedOrder, shop: &ShopConfig) -> String {
    let items: String = order
        .items
        .iter()
        .map(|item| format!("<li>{}</li>", escape_html(item)))
        .collect();

    format!(
        r#"<div dir="rtl" style="font-family: Arial, sans-serif;">
  <h2>{title}</h2>
  <p><strong>{LABEL_NAME}:</strong> {name}</p>
  <p><strong>{LABEL_PHONE}:</strong> {phone}</p>
  <p><strong>{LABEL_ADDRESS}:</strong> {address}</p>
  <p><strong>{LABEL_ITEMS}:</strong></p>
  <ol>{items}</ol>
  <p><strong>{LABEL_TOTAL}:</strong> {total} {currency}</p>
</div>
"#,
        title = escape_html(title),
        name = escape_html(&order.name),
        phone = escape_html(&order.phone),
        address = escape_html(&order.address),
        total = escape_html(&order.total.to_string()),
        currency = escape_html(&shop.currency),
    )
}

/// Escape text for HTML element content and quoted attribute values.
fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
