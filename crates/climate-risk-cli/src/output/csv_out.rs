use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// Assessment envelopes flatten to one row per scored asset; arrays of
/// uniform objects become one row per element; anything else degrades
/// to field/value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            if let Some(scored) = map
                .get("result")
                .and_then(|r| r.get("scored_assets"))
                .and_then(Value::as_array)
            {
                write_scored_assets(&mut wtr, scored);
            } else if let Some(Value::Object(result)) = map.get("result") {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in result {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
        }
        Value::Array(arr) => {
            // One envelope per method: concatenate their scored assets
            let scored: Vec<&Value> = arr
                .iter()
                .filter_map(|v| v.get("result").and_then(|r| r.get("scored_assets")))
                .filter_map(Value::as_array)
                .flatten()
                .collect();
            if !scored.is_empty() {
                let owned: Vec<Value> = scored.into_iter().cloned().collect();
                write_scored_assets(&mut wtr, &owned);
            } else {
                write_array_csv(&mut wtr, arr);
            }
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_scored_assets(wtr: &mut csv::Writer<io::StdoutLock<'_>>, scored: &[Value]) {
    let _ = wtr.write_record([
        "id",
        "group_key",
        "exposure",
        "impact_score",
        "likelihood_score",
        "risk_score",
    ]);
    for item in scored {
        let asset = item.get("asset");
        let field = |v: Option<&Value>, key: &str| {
            v.and_then(|a| a.get(key)).map(|x| format_csv_value(x)).unwrap_or_default()
        };
        let _ = wtr.write_record([
            field(asset, "id"),
            field(Some(item), "group_key"),
            field(asset, "exposure"),
            field(Some(item), "impact_score"),
            field(Some(item), "likelihood_score"),
            field(Some(item), "risk_score"),
        ]);
    }
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        map.get(*h)
                            .map(|v| format_csv_value(v))
                            .unwrap_or_default()
                    })
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
