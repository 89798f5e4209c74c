//! Number formatting for cards and tables

use serde_json::Value;

use super::widgets::{Cell, CellFormat, ColumnDef};

/// Lift above this is a strong association
pub const LIFT_HIGH: f64 = 10.0;
/// Lift at or above this is a moderate association
pub const LIFT_MID: f64 = 5.0;

/// Group the integer part with commas: `1234567.891, 2` -> `1,234,567.89`
pub fn thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

pub fn money(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", thousands(-value, 0))
    } else {
        format!("${}", thousands(value, 0))
    }
}

/// `12.345` -> `12.35%` (value already in percent)
pub fn percent(value: f64) -> String {
    format!("{}%", thousands(value, 2))
}

/// Signed relative change, `0.025` -> `+2.5%`
pub fn signed_ratio(value: f64) -> String {
    let pct = value * 100.0;
    if pct >= 0.0 {
        format!("+{:.1}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}

/// Signed percentage-point change, `16.666` -> `+16.7pp`
pub fn signed_points(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.1}pp", value)
    } else {
        format!("{:.1}pp", value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiftBadge {
    High,
    Mid,
    Low,
}

impl LiftBadge {
    pub fn for_lift(lift: f64) -> Self {
        if lift > LIFT_HIGH {
            LiftBadge::High
        } else if lift >= LIFT_MID {
            LiftBadge::Mid
        } else {
            LiftBadge::Low
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            LiftBadge::High => "lift-high",
            LiftBadge::Mid => "lift-mid",
            LiftBadge::Low => "lift-low",
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            LiftBadge::High => "\u{1F535}",
            LiftBadge::Mid => "\u{26AA}",
            LiftBadge::Low => "\u{1F534}",
        }
    }
}

/// Raw string form of a JSON cell, used for class rules
pub fn raw_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Format one JSON value for a column
pub fn format_cell(column: &ColumnDef, value: &Value) -> Cell {
    let raw = raw_text(value);
    let class = column.class_for(&raw);

    let Some(number) = value.as_f64() else {
        return Cell { text: raw, class };
    };

    match column.format {
        CellFormat::Text => Cell { text: raw, class },
        CellFormat::Money => Cell {
            text: money(number),
            class,
        },
        CellFormat::Number { decimals } => Cell {
            text: thousands(number, decimals),
            class,
        },
        CellFormat::Percent => Cell {
            text: percent(number),
            class,
        },
        CellFormat::LiftBadge => {
            let badge = LiftBadge::for_lift(number);
            Cell {
                text: format!("{} {:.2}", badge.marker(), number),
                class: Some(badge.class().to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn thousands_grouping() {
        assert_eq!(thousands(0.0, 0), "0");
        assert_eq!(thousands(999.0, 0), "999");
        assert_eq!(thousands(1000.0, 0), "1,000");
        assert_eq!(thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(thousands(-15500.0, 0), "-15,500");
        assert_eq!(thousands(-0.001, 0), "0");
    }

    #[test]
    fn money_and_percent() {
        assert_eq!(money(30800.0), "$30,800");
        assert_eq!(money(-200.0), "-$200");
        assert_eq!(percent(80.4878), "80.49%");
    }

    #[test]
    fn signed_changes() {
        assert_eq!(signed_ratio(-0.0129), "-1.3%");
        assert_eq!(signed_ratio(0.2286), "+22.9%");
        assert_eq!(signed_points(16.666), "+16.7pp");
        assert_eq!(signed_points(-2.0), "-2.0pp");
    }

    #[test]
    fn lift_badges() {
        assert_eq!(LiftBadge::for_lift(10.5), LiftBadge::High);
        assert_eq!(LiftBadge::for_lift(10.0), LiftBadge::Mid);
        assert_eq!(LiftBadge::for_lift(5.0), LiftBadge::Mid);
        assert_eq!(LiftBadge::for_lift(1.6), LiftBadge::Low);
    }

    #[test]
    fn cells_follow_column_format() {
        let money_col = ColumnDef::money("total_sales", "Total Sales");
        assert_eq!(format_cell(&money_col, &json!(10500.0)).text, "$10,500");

        let abc = ColumnDef::text("abc_class", "ABC").with_class_rule("cell-abc-a", "A");
        let cell = format_cell(&abc, &json!("A"));
        assert_eq!(cell.text, "A");
        assert_eq!(cell.class.as_deref(), Some("cell-abc-a"));

        let lift = ColumnDef::decimal("lift", "Lift", 2).with_format(CellFormat::LiftBadge);
        let cell = format_cell(&lift, &json!(1.0667));
        assert!(cell.text.ends_with("1.07"));
        assert_eq!(cell.class.as_deref(), Some("lift-low"));

        assert_eq!(format_cell(&money_col, &Value::Null).text, "");
    }
}
