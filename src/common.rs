use handlebars::{handlebars_helper, Handlebars};

use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn write_string_to_file(filename: &str, content: &str) -> std::io::Result<()> {
    let path = Path::new(filename);
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Inserts thousands separators into the integer part of a formatted number.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

pub fn format_money(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(&(cents / 100).to_string());
    let formatted = format!("R$ {}.{:02}", whole, cents % 100);
    if negative {
        format!("-{formatted}")
    } else {
        formatted
    }
}

pub fn get_handlebars() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();

    handlebars_helper!(money: |v: f64| format_money(v));
    handlebars.register_helper("money", Box::new(money));

    handlebars_helper!(count: |v: u64| format_count(v));
    handlebars.register_helper("count", Box::new(count));

    handlebars_helper!(pct: |v: f64| format!("{:.2}%", v));
    handlebars.register_helper("pct", Box::new(pct));

    handlebars_helper!(fixed1: |v: f64| format!("{:.1}", v));
    handlebars.register_helper("fixed1", Box::new(fixed1));

    handlebars
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formats_money_with_thousands_separators() {
        assert_eq!(format_money(0.0), "R$ 0.00");
        assert_eq!(format_money(75.5), "R$ 75.50");
        assert_eq!(format_money(1234.5), "R$ 1,234.50");
        assert_eq!(format_money(1_234_567.89), "R$ 1,234,567.89");
    }

    #[test]
    fn formats_counts() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(96478), "96,478");
    }

    #[test]
    fn handlebars_can_render() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template("Revenue: {{money total}}", &json!({"total": 1234.5}))
            .expect("This to render");
        assert_eq!(res, "Revenue: R$ 1,234.50");
    }

    #[test]
    fn handlebars_can_iterate() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template(
                r#"{{#each rows as |row|}}
{{row.month}}: {{count row.orders}}
{{/each}}"#,
                &json!({"rows": [
                    {"month": "2017-10", "orders": 4631},
                    {"month": "2017-11", "orders": 7544}
                ]}),
            )
            .expect("This to render");
        assert_eq!(res, "2017-10: 4,631\n2017-11: 7,544\n");
    }

    #[test]
    fn handlebars_helper_pct_can_render() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template("{{pct rate}}", &json!({"rate": 3.0019}))
            .expect("This to render");
        assert_eq!(res, "3.00%");
    }
}
