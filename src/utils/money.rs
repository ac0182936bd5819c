pub const CURRENCY_SYMBOL: &str = "₹";

/// Format an integer amount with thousands separators, e.g. `₹12,500`
pub fn format_price(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{}{}", sign, CURRENCY_SYMBOL, grouped)
}
