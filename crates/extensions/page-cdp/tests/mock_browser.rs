//! Drives the CDP client and page against a scripted browser.
//!
//! Endpoint discovery is served by wiremock; the DevTools WebSocket is a
//! small tungstenite server answering each command from a fixed script.

use std::sync::Arc;
use std::time::Duration;

use autoapply_page_cdp::{CdpClient, CdpError, CdpPage};
use autoapply_protocols::{Page, PageError, SyntheticEvent};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type CommandLog = Arc<Mutex<Vec<Value>>>;

fn value(id: &Value, session: &Value, result: Value) -> Value {
    json!({ "id": id, "sessionId": session, "result": { "result": result } })
}

fn script(request: &Value) -> Vec<Value> {
    let id = &request["id"];
    let session = &request["sessionId"];
    let params = &request["params"];

    match request["method"].as_str().unwrap_or_default() {
        "Target.attachToTarget" => vec![json!({ "id": id, "result": { "sessionId": "S1" } })],
        "Runtime.evaluate" => {
            let expression = params["expression"].as_str().unwrap_or_default();
            if expression == "window.location.hostname" {
                vec![value(id, session, json!({ "type": "string", "value": "boards.greenhouse.io" }))]
            } else if expression.contains("MutationObserver") {
                vec![
                    value(id, session, json!({ "type": "boolean", "value": true })),
                    json!({
                        "method": "Runtime.bindingCalled",
                        "sessionId": "S1",
                        "params": { "name": "__autoapplyMutation", "payload": "", "executionContextId": 1 }
                    }),
                ]
            } else if expression.contains("##") {
                vec![json!({
                    "id": id,
                    "sessionId": session,
                    "result": {
                        "result": { "type": "object", "subtype": "error" },
                        "exceptionDetails": {
                            "text": "Uncaught",
                            "exception": { "type": "object", "description": "SyntaxError: '##' is not a valid selector" }
                        }
                    }
                })]
            } else if expression.contains("#first_name") {
                vec![value(
                    id,
                    session,
                    json!({ "type": "object", "subtype": "node", "className": "HTMLInputElement", "objectId": "first-name" }),
                )]
            } else if expression.contains("querySelector") {
                vec![value(id, session, json!({ "type": "object", "subtype": "null", "value": null }))]
            } else {
                vec![value(id, session, json!({ "type": "string", "value": "complete" }))]
            }
        }
        "Runtime.callFunctionOn" if params["objectId"] == "gone" => vec![json!({
            "id": id,
            "sessionId": session,
            "error": { "code": -32000, "message": "Could not find object with given id" }
        })],
        "Runtime.callFunctionOn" => vec![value(id, session, json!({ "type": "undefined" }))],
        _ => vec![json!({ "id": id, "sessionId": session, "result": {} })],
    }
}

async fn spawn_websocket(log: CommandLog) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        while let Some(Ok(Message::Text(text))) = ws.next().await {
            let request: Value = serde_json::from_str(&text).unwrap();
            log.lock().push(request.clone());
            for reply in script(&request) {
                if ws.send(Message::Text(reply.to_string().into())).await.is_err() {
                    return;
                }
            }
        }
    });

    format!("ws://{}/devtools/browser/mock", addr)
}

async fn spawn_browser() -> (MockServer, CommandLog) {
    let log = CommandLog::default();
    let ws_url = spawn_websocket(Arc::clone(&log)).await;
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Browser": "Chrome/131.0.0.0",
            "Protocol-Version": "1.3",
            "User-Agent": "Mozilla/5.0 HeadlessChrome/131.0.0.0",
            "webSocketDebuggerUrl": ws_url,
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/json/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "worker-1", "type": "service_worker", "title": "", "url": "https://boards.greenhouse.io/sw.js" },
            { "id": "tab-1", "type": "page", "title": "Compiler Engineer", "url": "https://boards.greenhouse.io/acme/jobs/1" }
        ])))
        .mount(&server)
        .await;

    (server, log)
}

fn methods(log: &CommandLog) -> Vec<String> {
    log.lock()
        .iter()
        .filter_map(|r| r["method"].as_str().map(str::to_string))
        .collect()
}

#[tokio::test]
async fn attaches_to_first_tab() {
    let (server, log) = spawn_browser().await;
    let client = CdpClient::connect(&server.uri()).await.unwrap();

    let session = client.open_page(None, None).await.unwrap();

    assert_eq!(session.target_id(), "tab-1");
    assert_eq!(session.session_id(), "S1");
    let sent = methods(&log);
    assert_eq!(sent[0], "Target.attachToTarget");
    assert!(sent.contains(&"Runtime.enable".to_string()));
    assert_eq!(log.lock()[0]["params"]["targetId"], "tab-1");
}

#[tokio::test]
async fn page_reads_hostname_and_queries() {
    let (server, _log) = spawn_browser().await;
    let client = CdpClient::connect(&server.uri()).await.unwrap();
    let page = CdpPage::attach(client.attach_page("tab-1").await.unwrap())
        .await
        .unwrap();

    assert_eq!(page.hostname().await.unwrap(), "boards.greenhouse.io");

    let input = page.query("#first_name").await.unwrap().unwrap();
    assert_eq!(input.id(), "first-name");
    assert_eq!(input.selector(), "#first_name");

    assert!(page.query(".application-header .btn-primary").await.unwrap().is_none());

    let err = page.query("##").await.unwrap_err();
    assert!(matches!(err, PageError::InvalidSelector(_)));
}

#[tokio::test]
async fn observer_binding_signals_mutations() {
    let (server, log) = spawn_browser().await;
    let client = CdpClient::connect(&server.uri()).await.unwrap();
    let page = CdpPage::attach(client.attach_page("tab-1").await.unwrap())
        .await
        .unwrap();

    let mut signal = page.mutations();
    tokio::time::timeout(Duration::from_secs(2), signal.changed())
        .await
        .expect("mutation signal")
        .unwrap();

    assert!(methods(&log).contains(&"Runtime.addBinding".to_string()));
}

#[tokio::test]
async fn writes_run_on_the_remote_element() {
    let (server, log) = spawn_browser().await;
    let client = CdpClient::connect(&server.uri()).await.unwrap();
    let page = CdpPage::attach(client.attach_page("tab-1").await.unwrap())
        .await
        .unwrap();
    let input = page.query("#first_name").await.unwrap().unwrap();

    page.set_value(&input, "Grace").await.unwrap();
    page.dispatch_event(&input, SyntheticEvent::Input).await.unwrap();

    let calls: Vec<Value> = log
        .lock()
        .iter()
        .filter(|r| r["method"] == "Runtime.callFunctionOn")
        .cloned()
        .collect();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0]["params"]["objectId"], "first-name");
    assert_eq!(calls[0]["params"]["arguments"][0]["value"], "Grace");
    assert_eq!(calls[1]["params"]["arguments"][0]["value"], "input");
    assert_eq!(calls[1]["params"]["arguments"][1]["value"], false);
}

#[tokio::test]
async fn stale_element_is_detached() {
    let (server, _log) = spawn_browser().await;
    let client = CdpClient::connect(&server.uri()).await.unwrap();
    let page = CdpPage::attach(client.attach_page("tab-1").await.unwrap())
        .await
        .unwrap();

    let gone = autoapply_protocols::ElementHandle::new("gone", "#first_name");
    let err = page.click(&gone).await.unwrap_err();
    assert!(matches!(err, PageError::Detached(_)));
}

#[tokio::test]
async fn missing_browser_is_reported() {
    let server = MockServer::start().await;
    let err = CdpClient::connect(&server.uri()).await.err().unwrap();
    assert!(matches!(err, CdpError::ChromeNotAvailable(_)));
}
