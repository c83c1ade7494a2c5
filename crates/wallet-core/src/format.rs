use chrono::NaiveDate;

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64) -> String;
}

/// Formats dates for presentation.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: NaiveDate) -> String;
}

/// Currency code and number of fraction digits used when rendering amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencySettings {
    pub code: String,
    pub precision: u8,
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            code: "RWF".into(),
            precision: 0,
        }
    }
}

impl CurrencySettings {
    pub fn new(code: impl Into<String>, precision: u8) -> Self {
        Self {
            code: code.into().trim().to_uppercase(),
            precision,
        }
    }
}

impl CurrencyFormatter for CurrencySettings {
    fn format_amount(&self, amount: f64) -> String {
        let precision = usize::from(self.precision);
        let body = format!("{:.*}", precision, amount.abs());
        let (int_part, fraction) = match body.split_once('.') {
            Some((int_part, fraction)) => (int_part, Some(fraction)),
            None => (body.as_str(), None),
        };
        let mut rendered = group_digits(int_part, ',');
        if let Some(fraction) = fraction {
            rendered.push('.');
            rendered.push_str(fraction);
        }
        let is_zero = rendered.chars().all(|ch| !ch.is_ascii_digit() || ch == '0');
        let sign = if amount < 0.0 && !is_zero { "-" } else { "" };
        format!("{sign}{} {rendered}", self.code)
    }
}

/// Renders dates as `March 5, 2024`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongDateFormatter;

impl DateFormatter for LongDateFormatter {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format("%B %-d, %Y").to_string()
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_currency_has_no_fraction_digits() {
        let rwf = CurrencySettings::default();
        assert_eq!(rwf.format_amount(1250.0), "RWF 1,250");
        assert_eq!(rwf.format_amount(1234567.4), "RWF 1,234,567");
        assert_eq!(rwf.format_amount(-980.0), "-RWF 980");
        assert_eq!(rwf.format_amount(0.0), "RWF 0");
        assert_eq!(rwf.format_amount(-0.2), "RWF 0");
    }

    #[test]
    fn precision_controls_fraction_digits() {
        let usd = CurrencySettings::new("usd", 2);
        assert_eq!(usd.format_amount(1234.5), "USD 1,234.50");
        assert_eq!(usd.format_amount(-0.25), "-USD 0.25");
    }

    #[test]
    fn long_dates_spell_out_month() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(LongDateFormatter.format_date(date), "March 5, 2024");
    }
}
