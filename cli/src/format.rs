use cpiledger_core::PriceComparison;

/// `$1,234.56`, with the sign in front of the dollar sign.
pub fn currency(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", rounded.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}${}.{}", sign, grouped, cents)
}

pub fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

pub fn comparison_label(comparison: PriceComparison) -> &'static str {
    match comparison {
        PriceComparison::Under => "under",
        PriceComparison::Over => "over",
        PriceComparison::Even => "even",
        PriceComparison::Undefined => "n/a",
    }
}
