use base64::{Engine as _, engine::general_purpose::STANDARD};
use gatewire::{AdapterError, IncomingEvent, RequestContext, ResponseCapture, dispatch};
use serde_json::json;
use std::io::Read;

fn get(path: &str) -> IncomingEvent {
    IncomingEvent {
        http_method: Some("GET".to_string()),
        path: Some(path.to_string()),
        ..IncomingEvent::default()
    }
}

#[test]
fn test_not_found_scenario() {
    let response = dispatch(&get("/nope"), |_ctx: RequestContext, res: &mut ResponseCapture| {
        res.begin("404 Not Found", [("Content-Type", "text/plain")]);
        Ok::<_, lambda_runtime::Error>(vec![b"not found".to_vec()])
    })
    .unwrap();

    assert_eq!(response.status_code, "404");
    assert_eq!(response.headers.len(), 1);
    assert_eq!(response.headers["Content-Type"], "text/plain");
    assert_eq!(response.body, "not found");
    assert!(!response.is_base64_encoded);

    let serialized = serde_json::to_value(&response).unwrap();
    assert_eq!(
        serialized,
        json!({
            "statusCode": "404",
            "headers": {"Content-Type": "text/plain"},
            "body": "not found"
        })
    );
}

#[test]
fn test_json_response_stays_text() {
    let response = dispatch(&get("/api"), |_ctx: RequestContext, res: &mut ResponseCapture| {
        res.begin("200 OK", [("Content-Type", "application/json")]);
        Ok::<_, lambda_runtime::Error>(vec![r#"{"ok":true}"#])
    })
    .unwrap();

    assert_eq!(response.body, r#"{"ok":true}"#);
    assert!(!response.is_base64_encoded);
}

#[test]
fn test_image_response_is_base64() {
    let png = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a];
    let expected = png.clone();
    let response = dispatch(&get("/logo.png"), move |_ctx: RequestContext, res: &mut ResponseCapture| {
        res.begin("200 OK", [("Content-Type", "image/png")]);
        Ok::<_, lambda_runtime::Error>(vec![png])
    })
    .unwrap();

    assert!(response.is_base64_encoded);
    assert_eq!(STANDARD.decode(&response.body).unwrap(), expected);

    let serialized = serde_json::to_value(&response).unwrap();
    assert_eq!(serialized["isBase64Encoded"], json!(true));
}

#[test]
fn test_gzip_text_is_base64() {
    let response = dispatch(&get("/"), |_ctx: RequestContext, res: &mut ResponseCapture| {
        res.begin(
            "200 OK",
            [("Content-Type", "text/plain"), ("Content-Encoding", "gzip")],
        );
        Ok::<_, lambda_runtime::Error>(vec![vec![0x1f_u8, 0x8b, 0x08]])
    })
    .unwrap();

    assert!(response.is_base64_encoded);
    assert_eq!(response.body, STANDARD.encode([0x1f_u8, 0x8b, 0x08]));
}

#[test]
fn test_eager_writes_precede_returned_body() {
    let response = dispatch(&get("/"), |_ctx: RequestContext, res: &mut ResponseCapture| {
        let mut out = res.begin("200 OK", [("Content-Type", "text/html")]);
        out.write("<html>");
        out.write("<body>");
        Ok::<_, lambda_runtime::Error>(vec!["</body>", "</html>"])
    })
    .unwrap();

    assert_eq!(response.body, "<html><body></body></html>");
}

#[test]
fn test_restarted_response_uses_last_begin() {
    let response = dispatch(&get("/"), |_ctx: RequestContext, res: &mut ResponseCapture| {
        res.begin("200 OK", [("Content-Type", "text/html"), ("X-Partial", "yes")]);
        res.begin("503 Service Unavailable", [("Content-Type", "text/plain")]);
        Ok::<_, lambda_runtime::Error>(vec!["try later"])
    })
    .unwrap();

    assert_eq!(response.status_code, "503");
    assert!(!response.headers.contains_key("X-Partial"));
    assert_eq!(response.body, "try later");
}

#[test]
fn test_duplicate_headers_keep_last_value() {
    let response = dispatch(&get("/"), |_ctx: RequestContext, res: &mut ResponseCapture| {
        res.begin(
            "200 OK",
            [
                ("Content-Type", "text/plain"),
                ("Set-Cookie", "a=1"),
                ("Set-Cookie", "b=2"),
            ],
        );
        Ok::<_, lambda_runtime::Error>(Vec::<&str>::new())
    })
    .unwrap();

    assert_eq!(response.headers["Set-Cookie"], "b=2");
}

#[test]
fn test_never_started_response_is_sentinel() {
    let response = dispatch(&get("/"), |_ctx: RequestContext, _res: &mut ResponseCapture| {
        Ok::<_, lambda_runtime::Error>(Vec::<Vec<u8>>::new())
    })
    .unwrap();

    assert_eq!(response.status_code, "500");
}

#[test]
fn test_application_reads_request_body() {
    let event = IncomingEvent {
        http_method: Some("POST".to_string()),
        path: Some("/echo".to_string()),
        body: Some("ping".to_string()),
        ..IncomingEvent::default()
    };

    let response = dispatch(&event, |mut ctx: RequestContext, res: &mut ResponseCapture| {
        let mut body = String::new();
        ctx.body.read_to_string(&mut body)?;
        res.begin("200 OK", [("Content-Type", "text/plain")]);
        Ok::<_, std::io::Error>(vec![body.replace("ping", "pong")])
    })
    .unwrap();

    assert_eq!(response.body, "pong");
}

#[test]
fn test_invalid_utf8_in_text_branch_fails() {
    let err = dispatch(&get("/"), |_ctx: RequestContext, res: &mut ResponseCapture| {
        res.begin("200 OK", [("Content-Type", "text/plain")]);
        Ok::<_, lambda_runtime::Error>(vec![vec![0xc3_u8, 0x28]])
    })
    .unwrap_err();

    assert!(matches!(err, AdapterError::DecodingError(_)));
}

#[test]
fn test_application_error_passes_through() {
    let err = dispatch(&get("/"), |_ctx: RequestContext, _res: &mut ResponseCapture| {
        Err::<Vec<String>, _>(anyhow::anyhow!("database unavailable"))
    })
    .unwrap_err();

    assert!(matches!(err, AdapterError::Handler(_)));
    assert_eq!(err.to_string(), "database unavailable");
}

#[test]
fn test_malformed_event_never_calls_application() {
    let event = IncomingEvent {
        path: Some("/".to_string()),
        ..IncomingEvent::default()
    };
    let mut called = false;
    let err = dispatch(&event, |_ctx: RequestContext, _res: &mut ResponseCapture| {
        called = true;
        Ok::<_, lambda_runtime::Error>(Vec::<String>::new())
    })
    .unwrap_err();

    assert!(matches!(err, AdapterError::MalformedEvent(_)));
    assert!(!called);
}

#[test]
fn test_lowercase_content_type_is_not_consulted() {
    let response = dispatch(&get("/"), |_ctx: RequestContext, res: &mut ResponseCapture| {
        res.begin("200 OK", [("content-type", "text/html")]);
        Ok::<_, lambda_runtime::Error>(vec!["<p>"])
    })
    .unwrap();

    assert!(response.is_base64_encoded);
    assert_eq!(response.body, "PHA+");
}

#[test]
fn test_written_text_survives_restart() {
    let response = dispatch(&get("/"), |_ctx: RequestContext, res: &mut ResponseCapture| {
        res.begin("200 OK", [("Content-Type", "text/plain")]);
        res.write("x");
        res.begin("500 Internal Server Error", [("Content-Type", "text/plain")]);
        Ok::<_, lambda_runtime::Error>(vec!["y"])
    })
    .unwrap();

    assert_eq!(response.status_code, "500");
    assert!(response.body.starts_with('x'));
    assert_eq!(response.body, "xy");
}
