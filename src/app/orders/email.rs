//! 订单确认邮件内容

use super::model::Order;

/// 渲染后的邮件主题与 HTML 正文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

pub fn subject_for(order: &Order) -> String {
    format!("Your Order Confirmation - {}", order.id)
}

/// 每个订单行渲染为 `<quantity> x <product> @ <currency><price>`
pub fn render_line_items(order: &Order, currency: &str) -> String {
    order
        .products
        .iter()
        .map(|line| {
            format!(
                "<li>{} x {} @ {}{}</li>",
                line.quantity,
                escape_html(&line.product),
                escape_html(currency),
                line.price
            )
        })
        .collect()
}

pub fn render_confirmation(order: &Order, currency: &str) -> RenderedEmail {
    let order_id = escape_html(&order.id);
    let currency_html = escape_html(currency);

    let html = format!(
        "<h2>Thank you for your order!</h2>\n\
         <p>Order ID: <strong>{order_id}</strong></p>\n\
         <p>Total: {currency_html}{total}</p>\n\
         <h3>Items:</h3>\n\
         <ul>\n{items}\n</ul>\n\
         <p>You’ll receive another email when your order ships.</p>\n",
        total = order.total_amount,
        items = render_line_items(order, currency),
    );

    RenderedEmail {
        subject: subject_for(order),
        html,
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
