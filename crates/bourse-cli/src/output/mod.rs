use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::{TableOptions, render_table};

/// Render a serializable response in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => {
            let prefs = ui::prefs();
            let options = TableOptions {
                max_width: prefs.term_width,
                color: prefs.table_color,
            };
            Ok(render_value_table(&serde_json::to_value(value)?, options))
        }
    }
}

/// Print a serializable response to stdout.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

fn render_value_table(value: &Value, options: TableOptions) -> String {
    match value {
        Value::Array(items) => render_rows(items, options),
        Value::Object(map) => {
            // A single array field (e.g. `{ "routes": [...] }`) reads better as rows.
            if let [(_, Value::Array(items))] = map.iter().collect::<Vec<_>>().as_slice() {
                return render_rows(items, options);
            }
            if let Some(rendered) = render_principal_rows(map, options) {
                return rendered;
            }
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect::<Vec<_>>();
            render_table(&["key", "value"], &rows, options)
        }
        scalar => render_table(&["value"], &[vec![cell(scalar)]], options),
    }
}

/// Reports like `doctor` carry one list of records plus summary fields. The
/// records become rows and the rest a `key: value` footer.
fn render_principal_rows(map: &Map<String, Value>, options: TableOptions) -> Option<String> {
    let is_records = |value: &Value| {
        value
            .as_array()
            .is_some_and(|items| !items.is_empty() && items.iter().all(Value::is_object))
    };
    let mut records = map.iter().filter(|(_, value)| is_records(value));
    let (principal, Value::Array(items)) = records.next()? else {
        return None;
    };
    if records.next().is_some() {
        return None;
    }

    let mut out = render_rows(items, options);
    for (key, value) in map.iter().filter(|(key, _)| *key != principal) {
        out.push('\n');
        out.push_str(&format!("{key}: {}", cell(value)));
    }
    Some(out)
}

fn render_rows(items: &[Value], options: TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
        return render_table(&["value"], &rows, options);
    }

    let mut headers: Vec<&str> = Vec::new();
    for key in items.iter().filter_map(Value::as_object).flat_map(|map| map.keys()) {
        if !headers.contains(&key.as_str()) {
            headers.push(key);
        }
    }
    headers.sort_unstable();

    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(*header).map_or_else(|| String::from("-"), cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    render_table(&headers, &rows, options)
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
