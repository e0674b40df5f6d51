use serde_json::Value;

// Cap per-column width to keep output readable.
const MAX_COL_WIDTH: usize = 48;

/// Render rows as an ASCII table with a trailing row count.
pub fn render_table(cols: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = cols.iter().map(|s| display_len(s).min(MAX_COL_WIDTH)).collect();
    for r in rows {
        for (i, cell) in r.iter().enumerate().take(cols.len()) {
            let w = display_len(cell);
            if w > widths[i] { widths[i] = w.min(MAX_COL_WIDTH); }
        }
    }

    let sep = build_separator(&widths);
    let mut out = Vec::with_capacity(rows.len() + 5);
    out.push(sep.clone());
    out.push(build_row(cols, &widths));
    out.push(sep.clone());
    for r in rows {
        out.push(build_row(r, &widths));
    }
    out.push(sep);
    out.push(format!("rows: {}", rows.len()));
    out.join("\n")
}

/// Synthesize a table from a JSON array: objects become rows keyed by the sorted union of
/// their keys, anything else becomes a single "value" column.
pub fn table_from_json(val: &Value) -> Option<(Vec<String>, Vec<Vec<String>>)> {
    let arr = val.as_array()?;
    if arr.is_empty() { return None; }
    if arr.iter().all(|el| el.is_object()) {
        let mut keys: Vec<String> = Vec::new();
        for el in arr {
            if let Value::Object(map) = el {
                for k in map.keys() { if !keys.contains(k) { keys.push(k.clone()); } }
            }
        }
        keys.sort();
        let rows = arr
            .iter()
            .map(|el| keys.iter().map(|k| to_cell_string(el.get(k).unwrap_or(&Value::Null))).collect())
            .collect();
        Some((keys, rows))
    } else {
        let rows = arr.iter().map(|el| vec![to_cell_string(el)]).collect();
        Some((vec!["value".to_string()], rows))
    }
}

/// Print a JSON value as a table when it is a non-empty array, pretty JSON otherwise.
pub fn print_json(val: &Value) {
    match table_from_json(val) {
        Some((cols, rows)) => println!("{}", render_table(&cols, &rows)),
        None => println!("{}", serde_json::to_string_pretty(val).unwrap_or_else(|_| val.to_string())),
    }
}

fn to_cell_string(v: &Value) -> String {
    match v {
        Value::Null => String::from("-"),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        // keep nested objects/arrays compact
        other => other.to_string(),
    }
}

fn display_len(s: &str) -> usize { s.chars().count() }

fn build_separator(widths: &[usize]) -> String {
    let mut s = String::from("+");
    for w in widths {
        s.push_str(&"-".repeat(*w + 2));
        s.push('+');
    }
    s
}

fn build_row(cells: &[String], widths: &[usize]) -> String {
    let mut s = String::from("|");
    for (i, w) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        let text = truncate(cell, *w);
        let pad = " ".repeat(w.saturating_sub(display_len(&text)));
        s.push(' ');
        if is_numeric_like(cell) {
            s.push_str(&pad);
            s.push_str(&text);
        } else {
            s.push_str(&text);
            s.push_str(&pad);
        }
        s.push_str(" |");
    }
    s
}

fn truncate(s: &str, max: usize) -> String {
    if display_len(s) <= max { return s.to_string(); }
    if max <= 1 { return "…".to_string(); }
    s.chars().take(max - 1).collect::<String>() + "…"
}

// crude detection for right-aligning amounts and counts
fn is_numeric_like(s: &str) -> bool {
    let st = s.trim().trim_start_matches('₹');
    if st.is_empty() { return false; }
    let mut has_digit = false;
    for ch in st.chars() {
        if ch.is_ascii_digit() { has_digit = true; continue; }
        if ".-+,".contains(ch) { continue; }
        return false;
    }
    has_digit
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_aligned_table() {
        let cols = vec!["name".to_string(), "price".to_string()];
        let rows = vec![vec!["North".to_string(), "₹20.00".to_string()], vec!["S".to_string(), "5".to_string()]];
        let out = render_table(&cols, &rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "+-------+--------+");
        assert_eq!(lines[1], "| name  | price  |");
        assert_eq!(lines[3], "| North | ₹20.00 |");
        assert_eq!(lines[4], "| S     |      5 |");
        assert_eq!(lines.last().copied(), Some("rows: 2"));
    }

    #[test]
    fn json_objects_become_columns() {
        let (cols, rows) = table_from_json(&json!([{"id": 1, "name": "A"}, {"id": 2, "extra": null}])).unwrap();
        assert_eq!(cols, vec!["extra", "id", "name"]);
        assert_eq!(rows[0], vec!["-", "1", "A"]);
        assert_eq!(rows[1], vec!["-", "2", "-"]);
        assert!(table_from_json(&json!([])).is_none());
        assert!(table_from_json(&json!({"msg": "ok"})).is_none());
    }

    #[test]
    fn long_cells_are_truncated() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
