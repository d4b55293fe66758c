//! Display formatting shared by the workbook and dashboard renderers.

/// `$1,234.56`, with a leading minus for negative amounts.
pub fn currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{sign}${}.{:02}",
        group_thousands(cents / 100),
        cents % 100
    )
}

/// `$1,235`, rounded to whole dollars.
pub fn currency_whole(value: f64) -> String {
    let dollars = value.abs().round() as u64;
    let sign = if value < 0.0 && dollars > 0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(dollars))
}

pub fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

pub fn decimal(value: f64) -> String {
    format!("{value:.2}")
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
