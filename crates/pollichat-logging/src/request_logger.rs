use colored::Colorize;

use pollichat_models::ChatRequest;
use crate::safe_truncate;

const MAX_BODY_CHARS: usize = 5000;
const MAX_CHUNK_CHARS: usize = 200;

/// Print host/port/scheme lines for a URL, or the raw string if it does not parse
fn print_url(url: &str) {
    if let Ok(parsed_url) = reqwest::Url::parse(url) {
        eprintln!("{}: {}", "URL".bright_yellow(), url);
        eprintln!("{}: {}", "Host".bright_yellow(), parsed_url.host_str().unwrap_or("unknown"));
        eprintln!("{}: {}", "Port".bright_yellow(), parsed_url.port().map(|p| p.to_string()).unwrap_or_else(||
            if parsed_url.scheme() == "https" { "443 (default)".to_string() } else { "80 (default)".to_string() }
        ));
        eprintln!("{}: {}", "Scheme".bright_yellow(), parsed_url.scheme());
    } else {
        eprintln!("{}: {}", "URL".bright_yellow(), url);
    }
}

fn print_truncated(text: &str) {
    if text.chars().count() > MAX_BODY_CHARS {
        eprintln!("{}", safe_truncate(text, MAX_BODY_CHARS));
        eprintln!("\n{}", format!("... (truncated, total {} bytes)", text.len()).bright_black());
    } else {
        eprintln!("{}", text);
    }
}

/// Log HTTP request details for debugging (console output)
pub fn log_request(url: &str, request: &ChatRequest, verbose: bool) {
    if !verbose {
        return;
    }

    eprintln!("\n{}", "═".repeat(80).bright_cyan());
    eprintln!("{}", "🔍 HTTP REQUEST DEBUG".bright_cyan().bold());
    eprintln!("{}", "═".repeat(80).bright_cyan());

    print_url(url);

    eprintln!("\n{}", "Headers:".bright_yellow());
    eprintln!("  Content-Type: application/json");
    eprintln!("  Accept: text/event-stream");

    eprintln!("\n{}", "Request Body:".bright_yellow());
    match serde_json::to_string_pretty(&request) {
        Ok(json) => print_truncated(&json),
        Err(e) => eprintln!("{}", format!("Error serializing request: {}", e).red()),
    }

    eprintln!("{}", "═".repeat(80).bright_cyan());
    eprintln!();
}

/// Log HTTP response details for debugging (console output)
pub fn log_response(status: &reqwest::StatusCode, headers: &reqwest::header::HeaderMap, body: &str, verbose: bool) {
    if !verbose {
        return;
    }

    eprintln!("\n{}", "═".repeat(80).bright_green());
    eprintln!("{}", "📥 HTTP RESPONSE DEBUG".bright_green().bold());
    eprintln!("{}", "═".repeat(80).bright_green());

    eprintln!("{}: {} {}",
        "Status".bright_yellow(),
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );

    eprintln!("\n{}", "Headers:".bright_yellow());
    for (name, value) in headers.iter() {
        if let Ok(val_str) = value.to_str() {
            eprintln!("  {}: {}", name.as_str().bright_white(), val_str);
        }
    }

    eprintln!("\n{}", "Response Body:".bright_yellow());
    // Try to pretty-print JSON, fall back to raw text
    match serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json_val| serde_json::to_string_pretty(&json_val).ok())
    {
        Some(pretty) => print_truncated(&pretty),
        None => print_truncated(body),
    }

    eprintln!("{}", "═".repeat(80).bright_green());
    eprintln!();
}

/// Log streaming chunk for debugging (console output)
pub fn log_stream_chunk(chunk_num: usize, data: &str, verbose: bool) {
    if !verbose {
        return;
    }

    eprintln!("{}", format!("📦 Stream Chunk #{}: {}", chunk_num,
        if data.chars().count() > MAX_CHUNK_CHARS {
            format!("{}... ({} bytes)", safe_truncate(data, MAX_CHUNK_CHARS), data.len())
        } else {
            data.to_string()
        }
    ).bright_black());
}
