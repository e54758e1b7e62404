use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::client::conn::http1;
use hyper::{Method, Request, header};
use hyper_util::rt::TokioIo;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpStream, UnixStream};

use crate::container::{Container, ContainerID};

use super::models::{ContainerInspect, ContainerSummary};
use super::{DockerEndpoint, Error, Result};

/// Minimal Docker Engine API client.
///
/// Every request uses its own HTTP/1.1 connection.
#[derive(Debug, Clone)]
pub struct DockerClient {
    endpoint: DockerEndpoint,
}

impl DockerClient {
    pub fn new(endpoint: DockerEndpoint) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> &DockerEndpoint {
        &self.endpoint
    }

    /// Lists the running containers.
    pub async fn list_containers(&self) -> Result<Vec<ContainerSummary>> {
        self.get_json("/containers/json").await
    }

    pub async fn inspect(&self, container_id: &ContainerID) -> Result<ContainerInspect> {
        self.get_json(&format!("/containers/{container_id}/json"))
            .await
    }

    /// Lists the running containers together with their names and environment.
    ///
    /// A container that cannot be inspected keeps its summary data and an
    /// empty environment. Summaries with an unusable id are skipped.
    pub async fn containers(&self) -> Result<Vec<Container>> {
        let summaries = self.list_containers().await?;
        let mut containers = Vec::with_capacity(summaries.len());

        for summary in summaries {
            let container_id = match ContainerID::new(&summary.id) {
                Ok(id) => id,
                Err(err) => {
                    log::warn!(target: "docker", "skipping container: {}", err);
                    continue;
                }
            };

            let inspect = match self.inspect(&container_id).await {
                Ok(inspect) => Some(inspect),
                Err(err) => {
                    log::warn!(target: "docker", "failed to inspect {}: {}", container_id, err);
                    None
                }
            };
            containers.push(merge(container_id, summary, inspect.as_ref()));
        }

        Ok(containers)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = match &self.endpoint {
            DockerEndpoint::Unix(socket) => {
                let stream = UnixStream::connect(socket)
                    .await
                    .map_err(|source| self.connect_error(source))?;
                get(stream, path).await?
            }
            DockerEndpoint::Tcp(address) => {
                let stream = TcpStream::connect(address)
                    .await
                    .map_err(|source| self.connect_error(source))?;
                get(stream, path).await?
            }
        };

        serde_json::from_slice(&body).map_err(|source| Error::Decode {
            path: path.to_owned(),
            source,
        })
    }

    fn connect_error(&self, source: std::io::Error) -> Error {
        Error::Connect {
            endpoint: self.endpoint.to_string(),
            source,
        }
    }
}

async fn get<S>(stream: S, path: &str) -> Result<Bytes>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (mut sender, connection) = http1::handshake(TokioIo::new(stream)).await?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            log::debug!(target: "docker", "connection closed with error: {}", err);
        }
    });

    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .header(header::HOST, "docker")
        .body(Empty::<Bytes>::new())
        .map_err(|source| Error::Request {
            path: path.to_owned(),
            source,
        })?;

    let response = sender.send_request(request).await?;
    let status = response.status();
    let body = response.into_body().collect().await?.to_bytes();
    if !status.is_success() {
        return Err(Error::Status {
            path: path.to_owned(),
            status,
            body: String::from_utf8_lossy(&body).trim().to_owned(),
        });
    }

    Ok(body)
}

/// Combines list and inspect data. The inspected name comes first.
fn merge(
    container_id: ContainerID,
    summary: ContainerSummary,
    inspect: Option<&ContainerInspect>,
) -> Container {
    let mut names = Vec::new();
    let mut env = Vec::new();
    if let Some(inspect) = inspect {
        if !inspect.name.is_empty() {
            names.push(inspect.name.clone());
        }
        env = inspect.env().to_vec();
    }
    for name in summary.names.unwrap_or_default() {
        if !names.contains(&name) {
            names.push(name);
        }
    }

    Container::new(container_id, names, env, summary.created, summary.status)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::UnixListener;

    use super::*;

    struct Route {
        path: &'static str,
        status: u16,
        body: &'static str,
    }

    const LIST: &str = r#"[
        {"Id":"aaa111","Names":["/web"],"Created":1700000000,"Status":"Up 1 minute"},
        {"Id":"bbb222","Names":["/worker"],"Created":1700000100,"Status":"Up 2 minutes"}
    ]"#;

    fn spawn_server(socket: &Path, routes: Vec<Route>) {
        let listener = UnixListener::bind(socket).unwrap();
        let routes = std::sync::Arc::new(routes);
        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let routes = std::sync::Arc::clone(&routes);
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        let n = stream.read(&mut chunk).await.unwrap();
                        if n == 0 {
                            return;
                        }
                        request.extend_from_slice(&chunk[..n]);
                    }
                    let head = String::from_utf8_lossy(&request);
                    let path = head.split_whitespace().nth(1).unwrap_or_default();
                    let (status, body) = routes
                        .iter()
                        .find(|route| route.path == path)
                        .map(|route| (route.status, route.body))
                        .unwrap_or((404, r#"{"message":"page not found"}"#));
                    let response = format!(
                        "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    stream.write_all(response.as_bytes()).await.unwrap();
                    let _ = stream.shutdown().await;
                });
            }
        });
    }

    fn client(socket: &Path) -> DockerClient {
        DockerClient::new(DockerEndpoint::Unix(socket.to_path_buf()))
    }

    #[tokio::test]
    async fn test_list_containers() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("docker.sock");
        spawn_server(
            &socket,
            vec![Route {
                path: "/containers/json",
                status: 200,
                body: LIST,
            }],
        );

        let summaries = client(&socket).list_containers().await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, "aaa111");
        assert_eq!(summaries[1].created, 1_700_000_100);
    }

    #[tokio::test]
    async fn test_containers_merge_inspect() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("docker.sock");
        spawn_server(
            &socket,
            vec![
                Route {
                    path: "/containers/json",
                    status: 200,
                    body: LIST,
                },
                Route {
                    path: "/containers/aaa111/json",
                    status: 200,
                    body: r#"{"Name":"/web","Config":{"Env":["SERVICE_NAME=web","PATH=/bin"]}}"#,
                },
            ],
        );

        let containers = client(&socket).containers().await.unwrap();
        assert_eq!(containers.len(), 2);

        let web = &containers[0];
        assert_eq!(web.id().as_ref(), "aaa111");
        assert_eq!(web.names(), ["/web"]);
        assert_eq!(web.env_value("SERVICE_NAME"), "web");
        assert_eq!(web.created(), 1_700_000_000);
        assert_eq!(web.status(), "Up 1 minute");

        // inspect of the second container answers 404
        let worker = &containers[1];
        assert_eq!(worker.primary_name(), "/worker");
        assert!(worker.env().is_empty());
    }

    #[tokio::test]
    async fn test_error_status() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("docker.sock");
        spawn_server(
            &socket,
            vec![Route {
                path: "/containers/json",
                status: 500,
                body: r#"{"message":"daemon unavailable"}"#,
            }],
        );

        let err = client(&socket).list_containers().await.unwrap_err();
        match err {
            Error::Status { status, body, .. } => {
                assert_eq!(status.as_u16(), 500);
                assert!(body.contains("daemon unavailable"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("docker.sock");
        spawn_server(
            &socket,
            vec![Route {
                path: "/containers/json",
                status: 200,
                body: "not json",
            }],
        );

        let err = client(&socket).list_containers().await.unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[tokio::test]
    async fn test_invalid_ids_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("docker.sock");
        spawn_server(
            &socket,
            vec![Route {
                path: "/containers/json",
                status: 200,
                body: r#"[{"Id":"../etc","Names":["/evil"]},{"Id":"ccc333","Names":null}]"#,
            }],
        );

        let containers = client(&socket).containers().await.unwrap();
        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].id().as_ref(), "ccc333");
        assert!(containers[0].names().is_empty());
    }

    #[tokio::test]
    async fn test_connect_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = client(&dir.path().join("missing.sock"))
            .list_containers()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Connect { .. }));
    }

    #[test]
    fn test_merge_without_inspect() {
        let summary = ContainerSummary {
            id: "ddd444".to_owned(),
            names: Some(vec!["/a".to_owned(), "/b".to_owned()]),
            created: 5,
            status: "Up".to_owned(),
        };
        let container = merge(ContainerID::new("ddd444").unwrap(), summary, None);
        assert_eq!(container.names(), ["/a", "/b"]);
        assert!(container.env().is_empty());
    }
}
