use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
///
/// Assessment envelopes get a 5×5 matrix grid plus the envelope's
/// warnings and methodology; everything else falls back to generic
/// field/value or array tables.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_envelope(result, map);
            } else {
                print_flat_object(value);
            }
        }
        Value::Array(arr) => {
            // An array of envelopes (one per method) prints each in turn
            if arr.iter().all(|v| v.get("result").is_some()) && !arr.is_empty() {
                for item in arr {
                    if let Value::Object(map) = item {
                        if let Some(result) = map.get("result") {
                            print_envelope(result, map);
                            println!();
                        }
                    }
                }
            } else {
                print_array_table(arr);
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_envelope(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if let Some(matrix) = result.get("matrix") {
        print_assessment_header(result);
        print_matrix_grid(matrix);
    } else if let Value::Object(res_map) = result {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in res_map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_assessment_header(result: &Value) {
    let risk = result
        .get("risk_label")
        .and_then(Value::as_str)
        .unwrap_or("?");
    let method = result.get("method").and_then(Value::as_str).unwrap_or("?");
    println!("{} — grouped by {}", risk, method);
}

/// Render the 5×5 grid as "count | exposure" cells with likelihood rows
/// and impact columns.
fn print_matrix_grid(matrix: &Value) {
    let Some(Value::Array(rows)) = matrix.get("cells") else {
        return;
    };

    let mut builder = Builder::default();
    builder.push_record(["L \\ I", "I1", "I2", "I3", "I4", "I5"]);
    for (li, row) in rows.iter().enumerate() {
        let Value::Array(cells) = row else { continue };
        let mut record = vec![format!("L{}", li + 1)];
        for cell in cells {
            let count = cell.get("count").and_then(Value::as_u64).unwrap_or(0);
            let exposure = cell
                .get("exposure")
                .map(format_value)
                .unwrap_or_default();
            record.push(if count == 0 {
                "-".to_string()
            } else {
                format!("{} | {}", count, exposure)
            });
        }
        builder.push_record(record);
    }
    println!("{}", Table::from(builder));
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(a) => format!("[{} items]", a.len()),
        Value::Object(_) => "{…}".to_string(),
    }
}
