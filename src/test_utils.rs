//! テスト用ユーティリティ関数
//!
//! ロケールファイルの作成と、Twosky API の代わりに応答する
//! `tiny_http` サーバーを提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::io::Cursor;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{
    Arc,
    Mutex,
};
use std::thread::{
    self,
    JoinHandle,
};

use tiny_http::{
    Header,
    Response,
    Server,
    StatusCode,
};
use url::Url;

/// テスト用のロケールファイルを書き込む
///
/// # Arguments
/// * `dir` - ロケールディレクトリ
/// * `code` - 言語コード（例: "en", "ja"）
/// * `content` - ファイルの内容
pub(crate) fn write_locale(dir: &Path, code: &str, content: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(format!("{code}.json")), content).unwrap();
}

/// サーバーが受け取ったリクエスト
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: String,
    /// パスとクエリ（例: "/download?language=en"）
    pub target: String,
    /// ヘッダー名と値
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn query(&self, key: &str) -> Option<String> {
        let url = Url::parse(&format!("http://localhost{}", self.target)).ok()?;
        url.query_pairs().find(|(k, _)| k == key).map(|(_, v)| v.into_owned())
    }
}

/// サーバーが返すレスポンス
#[derive(Debug, Clone)]
pub(crate) struct MockResponse {
    pub status: u16,
    pub body: Vec<u8>,
    /// false の場合 `Content-Length` を付けずにチャンク転送で返す
    pub content_length: bool,
}

impl MockResponse {
    pub(crate) const fn ok(body: Vec<u8>) -> Self {
        Self { status: 200, body, content_length: true }
    }

    pub(crate) const fn status(status: u16) -> Self {
        Self { status, body: Vec::new(), content_length: true }
    }

    fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let content_type = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
        let length = self.content_length.then_some(self.body.len());

        Response::new(StatusCode(self.status), vec![content_type], Cursor::new(self.body), length, None)
    }
}

/// Twosky API の代わりに応答するサーバー
///
/// drop 時に待ち受けを止めてスレッドを回収する
pub(crate) struct MockServer {
    addr: SocketAddr,
    server: Arc<Server>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for MockServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockServer").field("addr", &self.addr).finish_non_exhaustive()
    }
}

impl MockServer {
    /// ランダムなポートで待ち受けを開始する
    pub(crate) fn start<F>(responder: F) -> Self
    where
        F: Fn(&RecordedRequest) -> MockResponse + Send + 'static,
    {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let addr = server.server_addr().to_ip().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let handle = thread::spawn({
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            move || {
                for mut request in server.incoming_requests() {
                    let mut body = Vec::new();
                    let _ = request.as_reader().read_to_end(&mut body);
                    let recorded = RecordedRequest {
                        method: request.method().as_str().to_string(),
                        target: request.url().to_string(),
                        headers: request
                            .headers()
                            .iter()
                            .map(|h| (h.field.as_str().as_str().to_string(), h.value.as_str().to_string()))
                            .collect(),
                        body,
                    };

                    let response = responder(&recorded);
                    requests.lock().unwrap().push(recorded);
                    let _ = request.respond(response.into_response());
                }
            }
        });

        Self { addr, server, requests, handle: Some(handle) }
    }

    /// サーバー上のパスの URL
    pub(crate) fn url(&self, path: &str) -> Url {
        Url::parse(&format!("http://{}{path}", self.addr)).unwrap()
    }

    /// これまでに受け取ったリクエスト
    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// 接続を拒否するアドレスの URL
pub(crate) fn closed_port_url() -> Url {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    drop(server);
    Url::parse(&format!("http://{addr}/download")).unwrap()
}
