#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::extract::{Multipart, Path, Query};
    use axum::http::StatusCode;
    use axum::routing::{delete, get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use crate::api::{ApiClient, ApiRequest, HttpTransport, Method, RequestBody, Transport};
    use crate::connectivity::Connectivity;
    use crate::error::ClientError;
    use crate::surface::MemorySurface;
    use crate::types::UploadFile;

    async fn upload(mut multipart: Multipart) -> Json<Value> {
        let mut path = String::new();
        let mut file_name = String::new();
        let mut size = 0usize;
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "path" => path = field.text().await.unwrap(),
                "file" => {
                    file_name = field.file_name().unwrap_or_default().to_string();
                    size = field.bytes().await.unwrap().len();
                }
                _ => {}
            }
        }
        Json(json!({ "path": path, "name": file_name, "size": size }))
    }

    fn backend() -> Router {
        Router::new()
            .route("/api/server", get(|| async { Json(json!({ "name": "Paper", "port": 25565 })) }))
            .route(
                "/api/players",
                get(|| async { Json(json!({ "players": [{ "uuid": "u1", "name": "Steve", "online": true }] })) }),
            )
            .route("/api/player/{uuid}", get(|Path(uuid): Path<String>| async move { Json(json!({ "uuid": uuid })) }))
            .route(
                "/api/filemanager/browse",
                get(|Query(q): Query<std::collections::HashMap<String, String>>| async move {
                    Json(json!({ "currentPath": q.get("path").cloned().unwrap_or_default(), "items": [] }))
                }),
            )
            .route("/api/command", post(|Json(body): Json<Value>| async move { Json(json!({ "echo": body })) }))
            .route(
                "/api/recipe/missing",
                get(|| async { (StatusCode::NOT_FOUND, Json(json!({ "error": "Recipe not found" }))) }),
            )
            .route("/api/broken", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route("/api/text", get(|| async { "this is not json" }))
            .route("/api/filemanager/delete", delete(|| async { StatusCode::NO_CONTENT }))
            .route("/api/filemanager/upload", post(upload))
    }

    async fn spawn_backend() -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, backend()).await.unwrap();
        });
        addr
    }

    fn transport(addr: SocketAddr, prefix: &str) -> HttpTransport {
        HttpTransport::new(&format!("http://{}", addr), prefix, Duration::from_secs(2), Duration::from_secs(5)).unwrap()
    }

    fn get_request(path: &str) -> ApiRequest {
        ApiRequest { method: Method::Get, path: path.to_string(), body: RequestBody::Empty }
    }

    #[tokio::test]
    async fn test_json_response() {
        let addr = spawn_backend().await;
        let value = transport(addr, "/api").send(get_request("/api/player/abc-123")).await.unwrap();
        assert_eq!(value, json!({ "uuid": "abc-123" }));
    }

    #[tokio::test]
    async fn test_json_body_is_posted() {
        let addr = spawn_backend().await;
        let request = ApiRequest {
            method: Method::Post,
            path: "/api/command".into(),
            body: RequestBody::Json(json!({ "command": "say hi" })),
        };
        let value = transport(addr, "/api").send(request).await.unwrap();
        assert_eq!(value["echo"]["command"], "say hi");
    }

    #[tokio::test]
    async fn test_error_status_carries_backend_message() {
        let addr = spawn_backend().await;
        let t = transport(addr, "/api");

        let err = t.send(get_request("/api/recipe/missing")).await.unwrap_err();
        assert_eq!(err, ClientError::Http { status: 404, message: "Recipe not found".into() });

        let err = t.send(get_request("/api/broken")).await.unwrap_err();
        assert_eq!(err, ClientError::Http { status: 500, message: "Internal Server Error".into() });
    }

    #[tokio::test]
    async fn test_empty_and_invalid_bodies() {
        let addr = spawn_backend().await;
        let t = transport(addr, "/api");

        let request =
            ApiRequest { method: Method::Delete, path: "/api/filemanager/delete?path=a".into(), body: RequestBody::Empty };
        assert_eq!(t.send(request).await.unwrap(), Value::Null);

        let err = t.send(get_request("/api/text")).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_multipart_upload_fields() {
        let addr = spawn_backend().await;
        let request = ApiRequest {
            method: Method::Post,
            path: "/api/filemanager/upload".into(),
            body: RequestBody::Upload {
                directory: "plugins".into(),
                file: UploadFile::new("EssentialsX.jar", vec![0u8; 1024]),
            },
        };
        let value = transport(addr, "/api").send(request).await.unwrap();
        assert_eq!(value, json!({ "path": "plugins", "name": "EssentialsX.jar", "size": 1024 }));
    }

    #[tokio::test]
    async fn test_probe_uses_server_endpoint() {
        let addr = spawn_backend().await;
        assert!(transport(addr, "/api").probe().await.is_ok());

        let err = transport(addr, "/v2").probe().await.unwrap_err();
        assert!(matches!(err, ClientError::Http { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let addr = {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let t = transport(addr, "/api");
        assert!(matches!(t.send(get_request("/api/server")).await, Err(ClientError::Network(_))));
        assert!(matches!(t.probe().await, Err(ClientError::Network(_))));
    }

    #[tokio::test]
    async fn test_api_client_over_http() {
        let addr = spawn_backend().await;
        let surface = Arc::new(MemorySurface::new());
        let base = format!("http://{}", addr);
        let api = ApiClient::new(
            Arc::new(transport(addr, "/api")),
            Connectivity::new(surface.clone()),
            &base,
            "/api",
            Duration::from_secs(5),
        );

        let players = api.players().await.unwrap();
        assert_eq!(players.players[0].name, "Steve");
        assert!(players.players[0].online);

        let listing = api.browse("plugins/My Plugin").await.unwrap();
        assert_eq!(listing.current_path, "plugins/My Plugin");

        let server = api.server_info().await.unwrap();
        assert_eq!(server.port, 25565);
        assert_eq!(surface.overlay_writes(), 0);
    }
}
