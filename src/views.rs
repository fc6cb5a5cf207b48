//! HTML rendering for every page the console serves.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::db::DynamicRow;

pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <link rel=\"stylesheet\" href=\"/public/style.css\">\n</head>\n<body>\n\
         <header><a href=\"/\">Clinical Records Console</a></header>\n<main>\n<h1>{title}</h1>\n\
         {body}\n</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}

pub fn index_page() -> String {
    let nav = "<ul>\n\
        <li><a href=\"/tables\">List tables</a></li>\n\
        <li><a href=\"/query-form\">Run a SQL query</a></li>\n\
        <li><a href=\"/query-demo\">Query demo</a></li>\n\
        <li><a href=\"/insert\">Legacy patient intake</a></li>\n\
        </ul>";
    let forms = [
        form_section(
            "New doctor",
            "/insert-doctor",
            &[
                ("firstName", "First name", "text"),
                ("lastName", "Last name", "text"),
                ("specialization", "Specialization", "text"),
            ],
            "Insert doctor",
        ),
        form_section(
            "New patient",
            "/insert-patient",
            &[
                ("firstName", "First name", "text"),
                ("lastName", "Last name", "text"),
                ("dateOfBirth", "Date of birth", "date"),
                ("gender", "Gender", "text"),
            ],
            "Insert patient",
        ),
        form_section(
            "New appointment",
            "/insert-appointment",
            &[
                ("patientId", "Patient ID", "number"),
                ("doctorId", "Doctor ID", "number"),
                ("appointmentDate", "Date", "date"),
                ("status", "Status", "text"),
            ],
            "Insert appointment",
        ),
        form_section(
            "New prescription",
            "/insert-prescription",
            &[
                ("appointmentId", "Appointment ID", "number"),
                ("medication", "Medication", "text"),
                ("dosage", "Dosage", "text"),
            ],
            "Insert prescription",
        ),
        form_section(
            "New bill",
            "/insert-bill",
            &[
                ("patientId", "Patient ID", "number"),
                ("amount", "Amount", "number"),
                ("paymentStatus", "Payment status", "text"),
            ],
            "Insert bill",
        ),
    ]
    .join("\n");
    page("Clinical Records Console", &format!("{nav}\n{forms}"))
}

pub fn query_form_page() -> String {
    page(
        "Run SQL",
        "<form method=\"post\" action=\"/run-query\">\n\
         <textarea name=\"sqlQuery\" rows=\"8\" cols=\"80\" placeholder=\"SELECT * FROM patients\"></textarea>\n\
         <button type=\"submit\">Run</button>\n</form>",
    )
}

pub fn query_demo_page() -> String {
    page(
        "Query Demo",
        "<p>Submit the prefilled statement or tweak it first.</p>\n\
         <form method=\"post\" action=\"/run-query\">\n\
         <input name=\"query\" size=\"80\" value=\"SELECT * FROM doctors\">\n\
         <button type=\"submit\">Run</button>\n</form>",
    )
}

pub fn insert_form_page() -> String {
    page(
        "Legacy Patient Intake",
        &form_section(
            "Patient record",
            "/insert",
            &[
                ("name", "Name", "text"),
                ("age", "Age", "number"),
                ("disease", "Disease", "text"),
            ],
            "Insert",
        ),
    )
}

pub fn tables_page(tables: &[String]) -> String {
    let items: String = tables
        .iter()
        .map(|name| {
            format!(
                "<li><form method=\"post\" action=\"/show-table\">\
                 <input type=\"hidden\" name=\"tableName\" value=\"{0}\">\
                 <button type=\"submit\">{0}</button></form></li>\n",
                escape(name)
            )
        })
        .collect();
    let body = format!(
        "<ul class=\"tables\">\n{items}</ul>\n\
         <form method=\"post\" action=\"/show-table\">\n\
         <label>Table name <input name=\"tableName\"></label>\n\
         <button type=\"submit\">Show</button>\n</form>"
    );
    page("Tables", &body)
}

pub fn result_page(rows: &[DynamicRow]) -> String {
    page("Query Result", &result_table(rows))
}

pub fn executed_page(affected: usize) -> String {
    page(
        "Query Result",
        &format!("<p>{affected} row(s) affected.</p>"),
    )
}

/// Serialize typed entities into the ordered JSON-object rows the dynamic
/// gateway produces, so both paths share `result_page`.
pub fn entity_rows<T: Serialize>(items: &[T]) -> anyhow::Result<Vec<DynamicRow>> {
    items
        .iter()
        .map(|item| match serde_json::to_value(item)? {
            Value::Object(map) => Ok(map),
            other => Ok(Map::from_iter([("value".to_string(), other)])),
        })
        .collect()
}

fn result_table(rows: &[DynamicRow]) -> String {
    let Some(first) = rows.first() else {
        return "<p>No rows returned.</p>".to_string();
    };
    let headers: String = first
        .keys()
        .map(|key| format!("<th>{}</th>", escape(key)))
        .collect();
    let body_rows: String = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .values()
                .map(|value| format!("<td>{}</td>", escape(&cell_text(value))))
                .collect();
            format!("<tr>{cells}</tr>\n")
        })
        .collect();
    format!("<table>\n<tr>{headers}</tr>\n{body_rows}</table>")
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn form_section(title: &str, action: &str, fields: &[(&str, &str, &str)], submit: &str) -> String {
    let inputs: String = fields
        .iter()
        .map(|(name, label, kind)| {
            format!("<label>{label} <input type=\"{kind}\" name=\"{name}\"></label>\n")
        })
        .collect();
    format!(
        "<section>\n<h2>{title}</h2>\n<form method=\"post\" action=\"{action}\">\n\
         {inputs}<button type=\"submit\">{submit}</button>\n</form>\n</section>"
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> DynamicRow {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn escapes_html_metacharacters() {
        assert_eq!(
            escape("<b>\"Jane\" & 'Doe'</b>"),
            "&lt;b&gt;&quot;Jane&quot; &amp; &#39;Doe&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn result_table_uses_first_row_for_headers() {
        let rows = vec![
            row(json!({"DoctorID": 2, "FirstName": "Jane"})),
            row(json!({"DoctorID": 1, "FirstName": "John"})),
        ];
        let html = result_table(&rows);
        assert!(html.contains("<th>DoctorID</th><th>FirstName</th>"));
        assert!(html.contains("<td>2</td><td>Jane</td>"));
        assert!(html.contains("<td>1</td><td>John</td>"));
    }

    #[test]
    fn result_table_escapes_cells_and_renders_null_empty() {
        let rows = vec![row(json!({"note": "<script>x</script>", "gone": null}))];
        let html = result_table(&rows);
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(html.contains("<td></td>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn empty_result_renders_placeholder() {
        assert_eq!(result_table(&[]), "<p>No rows returned.</p>");
    }

    #[test]
    fn entity_rows_keep_declared_field_order() {
        #[derive(Serialize)]
        struct Probe {
            #[serde(rename = "DoctorID")]
            id: i32,
            #[serde(rename = "FirstName")]
            first: &'static str,
        }
        let rows = entity_rows(&[Probe {
            id: 7,
            first: "Jane",
        }])
        .unwrap();
        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys, ["DoctorID", "FirstName"]);
    }

    #[test]
    fn tables_page_escapes_table_names() {
        let html = tables_page(&["doctors".to_string(), "odd<name".to_string()]);
        assert!(html.contains(">doctors</button>"));
        assert!(html.contains("odd&lt;name"));
    }

    #[test]
    fn index_page_targets_every_insert_endpoint() {
        let html = index_page();
        for action in [
            "/insert-doctor",
            "/insert-patient",
            "/insert-appointment",
            "/insert-prescription",
            "/insert-bill",
        ] {
            assert!(html.contains(action), "missing form for {action}");
        }
    }
}
