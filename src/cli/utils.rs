use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format.
///
/// In JSON mode an object `data` is merged into the envelope; any other value is
/// placed under `data`.
pub fn output_success(output_format: OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&success_envelope(message, data))?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: OutputFormat, message: &str, error_code: Option<&str>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

fn success_envelope(message: &str, data: Option<Value>) -> Value {
    let mut response = json!({
        "success": true,
        "message": message
    });

    match data {
        Some(Value::Object(fields)) => {
            if let Some(object) = response.as_object_mut() {
                object.extend(fields);
            }
        }
        Some(other) => response["data"] = other,
        None => {}
    }
    response
}

/// Server base URL without a trailing slash
pub fn base_url(server: &str) -> String {
    server.trim_end_matches('/').to_string()
}
