//! CDP WebSocket client.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::sync::{RwLock, mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};

use crate::error::CdpError;
use crate::protocol::{BrowserVersion, CdpRequest, CdpResponse, PageInfo};
use crate::session::PageSession;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// The browser connection shared by the client and every page session.
///
/// Commands are matched to responses by id; events are routed to the session
/// they belong to.
pub(crate) struct Connection {
    sink: tokio::sync::Mutex<WsSink>,
    next_id: AtomicU64,
    pending: Mutex<HashMap<u64, oneshot::Sender<Result<Value, CdpError>>>>,
    routes: RwLock<HashMap<String, mpsc::UnboundedSender<CdpResponse>>>,
}

impl Connection {
    fn new(sink: WsSink) -> Self {
        Self {
            sink: tokio::sync::Mutex::new(sink),
            next_id: AtomicU64::new(1),
            pending: Mutex::new(HashMap::new()),
            routes: RwLock::new(HashMap::new()),
        }
    }

    /// Send a command and wait for its response.
    pub(crate) async fn send(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(str::to_string),
        };
        let text = serde_json::to_string(&request)?;
        trace!("CDP send: {}", text);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);

        if let Err(e) = self.sink.lock().await.send(Message::Text(text.into())).await {
            self.pending.lock().remove(&id);
            return Err(e.into());
        }

        match tokio::time::timeout(COMMAND_TIMEOUT, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!("{} got no response", method)))
            }
        }
    }

    async fn register(&self, session_id: &str) -> mpsc::UnboundedReceiver<CdpResponse> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.routes.write().await.insert(session_id.to_string(), tx);
        rx
    }

    async fn unregister(&self, session_id: &str) {
        self.routes.write().await.remove(session_id);
    }

    async fn dispatch(&self, message: CdpResponse) {
        if let Some(id) = message.id {
            let Some(tx) = self.pending.lock().remove(&id) else {
                trace!("Dropping response to unknown request {}", id);
                return;
            };
            let result = match message.error {
                Some(error) => Err(CdpError::Protocol {
                    code: error.code,
                    message: error.message,
                }),
                None => Ok(message.result.unwrap_or(Value::Null)),
            };
            let _ = tx.send(result);
        } else if message.is_event() {
            let session_id = message.session_id.clone().unwrap_or_default();
            if let Some(tx) = self.routes.read().await.get(&session_id) {
                let _ = tx.send(message);
            }
        }
    }

    async fn receive_loop(self: Arc<Self>, mut source: WsSource) {
        while let Some(frame) = source.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    match serde_json::from_str::<CdpResponse>(&text) {
                        Ok(message) => self.dispatch(message).await,
                        Err(e) => warn!("Failed to parse CDP message: {}", e),
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("CDP WebSocket closed");
                    break;
                }
                Err(e) => {
                    error!("CDP WebSocket error: {}", e);
                    break;
                }
                Ok(_) => {}
            }
        }

        // Dropping the senders fails every in-flight command with SessionClosed.
        self.pending.lock().clear();
        self.routes.write().await.clear();
    }
}

/// Client for a Chrome instance running with remote debugging.
pub struct CdpClient {
    http_endpoint: String,
    http: reqwest::Client,
    conn: Arc<Connection>,
    recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to Chrome's debugging endpoint, e.g. `http://localhost:9222`.
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let http_endpoint = endpoint.trim_end_matches('/').to_string();
        let http = reqwest::Client::new();

        let version_url = format!("{}/json/version", http_endpoint);
        debug!("Fetching browser version from {}", version_url);
        let version: BrowserVersion = http
            .get(&version_url)
            .send()
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?
            .json()
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?;
        debug!("Browser: {} (protocol {})", version.browser, version.protocol_version);

        let ws_url = version.web_socket_debugger_url;
        let (stream, _) = tokio_tungstenite::connect_async(ws_url.as_str())
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;
        let (sink, source) = stream.split();

        let conn = Arc::new(Connection::new(sink));
        let recv_task = tokio::spawn(Arc::clone(&conn).receive_loop(source));

        debug!("CDP client connected to {}", ws_url);
        Ok(Self {
            http_endpoint,
            http,
            conn,
            recv_task,
        })
    }

    /// Send a browser-level command.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.conn.send(method, params, None).await
    }

    /// Open tabs and other targets.
    pub async fn list_pages(&self) -> Result<Vec<PageInfo>, CdpError> {
        let url = format!("{}/json/list", self.http_endpoint);
        Ok(self.http.get(&url).send().await?.json().await?)
    }

    /// Open a new tab, optionally at `url`, and attach to it.
    pub async fn new_page(&self, url: Option<&str>) -> Result<PageSession, CdpError> {
        let create_url = match url {
            Some(u) => format!("{}/json/new?{}", self.http_endpoint, u),
            None => format!("{}/json/new", self.http_endpoint),
        };
        // Chrome only accepts PUT here.
        let info: PageInfo = self.http.put(&create_url).send().await?.json().await?;
        debug!("Created tab {} at {}", info.id, info.url);

        self.attach_page(&info.id).await
    }

    /// Attach to an existing tab by target id.
    pub async fn attach_page(&self, target_id: &str) -> Result<PageSession, CdpError> {
        let result = self
            .call(
                "Target.attachToTarget",
                Some(json!({ "targetId": target_id, "flatten": true })),
            )
            .await
            .map_err(|e| match e {
                CdpError::Protocol { message, .. } => {
                    CdpError::PageNotFound(format!("{}: {}", target_id, message))
                }
                e => e,
            })?;

        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))?
            .to_string();

        let events = self.conn.register(&session_id).await;
        let session = PageSession::new(
            target_id.to_string(),
            session_id,
            Arc::clone(&self.conn),
            events,
        );

        if let Err(e) = session.enable_domains().await {
            self.conn.unregister(session.session_id()).await;
            return Err(e);
        }
        Ok(session)
    }

    /// Pick the tab to work on.
    ///
    /// An explicit target id wins; otherwise a URL opens a new tab and waits
    /// for it to load; otherwise the first open tab is used.
    pub async fn open_page(
        &self,
        target_id: Option<&str>,
        url: Option<&str>,
    ) -> Result<PageSession, CdpError> {
        if let Some(target_id) = target_id {
            return self.attach_page(target_id).await;
        }

        if let Some(url) = url {
            let session = self.new_page(Some(url)).await?;
            session.wait_for_load().await?;
            return Ok(session);
        }

        let tab = self
            .list_pages()
            .await?
            .into_iter()
            .find(PageInfo::is_tab)
            .ok_or_else(|| CdpError::PageNotFound("no open tab".to_string()))?;
        debug!("Using open tab {} ({})", tab.id, tab.url);
        self.attach_page(&tab.id).await
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self.recv_task.abort();
    }
}
