use serde_json::Value;
use watchcharts_core::watches::Table;

/// Renders a table as whitespace-aligned text with a header row.
pub fn render_text(table: &Table) -> String {
    if table.is_empty() {
        return "(no data)\n".to_string();
    }

    let columns = table.columns();
    let cells: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| columns.iter().map(|c| cell(row.get(c))).collect())
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (w, v) in widths.iter_mut().zip(row) {
            *w = (*w).max(v.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, columns.iter().map(String::as_str), &widths);
    for row in &cells {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, values: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = values
        .zip(widths)
        .map(|(v, &w)| format!("{v:<w$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_header_and_aligned_rows() {
        let table = Table::from_json_value(json!([
            {"date": "2023-01-01", "price": 100},
            {"date": "2023-01-02", "price": 95.5, "note": null},
        ]))
        .unwrap();

        let text = render_text(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "date        price  note");
        assert_eq!(lines[1], "2023-01-01  100");
        assert_eq!(lines[2], "2023-01-02  95.5");
    }

    #[test]
    fn empty_table_says_so() {
        assert_eq!(render_text(&Table::empty()), "(no data)\n");
    }
}
