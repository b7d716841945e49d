use log::debug;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::config::GalleryConfig;
use crate::gallery_error::GalleryError;
use crate::model::{ImageDescriptor, UploadFile, UploadReceipt};
use crate::repository::ImageRepository;

static UNKNOWN_REASON: &str = "unknown";

/// HTTP client for the media host's listing and unsigned upload endpoints.
#[derive(Clone)]
pub struct StoreClient {
    inner: Client,
    config: GalleryConfig,
}

impl StoreClient {
    pub fn new(config: GalleryConfig) -> Result<StoreClient, reqwest::Error> {
        let inner = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(StoreClient { inner, config })
    }
}

impl ImageRepository for StoreClient {
    async fn list_by_tag(&self, tag: &str) -> Result<Vec<ImageDescriptor>, GalleryError> {
        let url = self.config.listing_url(tag);
        debug!("listing {}", url);

        let communication = |err: reqwest::Error| GalleryError::RemoteCommunication {
            tag: tag.to_string(),
            reason: err.to_string(),
        };

        let res = self.inner
            .get(&url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(communication)?;

        let status = res.status();
        if !status.is_success() {
            return Err(GalleryError::RemoteList { tag: tag.to_string(), status: status.as_u16() });
        }

        let body = res.bytes().await.map_err(communication)?;
        parse_listing(&self.config, tag, &body)
    }

    async fn upload_one(&self, file: &UploadFile, tag: &str) -> Result<UploadReceipt, GalleryError> {
        let rejected = |err: reqwest::Error| GalleryError::UploadRejected {
            file: file.name.clone(),
            message: err.to_string(),
        };

        let part = Part::bytes(file.content.to_vec()).file_name(file.name.clone());
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone())
            .text("tags", tag.to_string());

        // the host reports rejections in the body, so the status is not checked
        let res = self.inner
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(rejected)?;
        let body = res.bytes().await.map_err(rejected)?;

        parse_upload(&file.name, &body)
    }
}

#[derive(Debug, Deserialize)]
struct ListingBody {
    #[serde(default)]
    resources: Vec<ListedResource>,
}

#[derive(Debug, Deserialize)]
struct ListedResource {
    public_id: String,
    #[serde(default)]
    format: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadBody {
    secure_url: Option<String>,
    original_filename: Option<String>,
    error: Option<UploadFailure>,
}

#[derive(Debug, Deserialize)]
struct UploadFailure {
    message: Option<String>,
}

pub(crate) fn parse_listing(config: &GalleryConfig, tag: &str, body: &[u8]) -> Result<Vec<ImageDescriptor>, GalleryError> {
    let listing: ListingBody = json::from_slice(body).map_err(|err| GalleryError::RemoteCommunication {
        tag: tag.to_string(),
        reason: err.to_string(),
    })?;

    let images = listing.resources
        .iter()
        .map(|r| ImageDescriptor::from_resource(config, &r.public_id, r.format.as_deref()))
        .collect();

    Ok(images)
}

pub(crate) fn parse_upload(file_name: &str, body: &[u8]) -> Result<UploadReceipt, GalleryError> {
    let rejected = |message: String| GalleryError::UploadRejected { file: file_name.to_string(), message };

    let upload: UploadBody = json::from_slice(body).map_err(|err| rejected(err.to_string()))?;

    match upload.secure_url {
        Some(secure_url) => Ok(UploadReceipt {
            secure_url,
            original_filename: upload.original_filename.unwrap_or_else(|| file_name.to_string()),
        }),
        None => Err(rejected(
            upload.error
                .and_then(|e| e.message)
                .unwrap_or_else(|| UNKNOWN_REASON.to_string()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TagConfig;

    fn config() -> GalleryConfig {
        GalleryConfig::new("demo", "preset", vec![TagConfig::new("familie")])
    }

    #[test]
    fn listing_keeps_remote_order_and_derives_names() {
        let body = br#"{"resources":[
            {"public_id":"familie/a","format":"jpg","version":1},
            {"public_id":"familie/b","format":"png"}
        ]}"#;

        let images = parse_listing(&config(), "familie", body).unwrap();
        let names: Vec<_> = images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "b.png"]);
        assert!(images[1].display_url.contains("w_400,h_400,c_fill,g_auto,q_auto,f_auto"));
        assert!(!images[1].download_url.contains("w_400"));
    }

    #[test]
    fn listing_keeps_duplicates() {
        let body = br#"{"resources":[{"public_id":"t/a","format":"jpg"},{"public_id":"t/a","format":"jpg"}]}"#;
        assert_eq!(parse_listing(&config(), "t", body).unwrap().len(), 2);
    }

    #[test]
    fn listing_without_resources_is_empty() {
        assert!(parse_listing(&config(), "familie", b"{}").unwrap().is_empty());
    }

    #[test]
    fn unparsable_listing_is_communication_error() {
        let err = parse_listing(&config(), "familie", b"<html>").unwrap_err();
        assert!(matches!(err, GalleryError::RemoteCommunication { ref tag, .. } if tag == "familie"));
    }

    #[test]
    fn upload_succeeds_on_secure_url() {
        let body = br#"{"secure_url":"https://host/x.jpg","original_filename":"x"}"#;
        let receipt = parse_upload("x.jpg", body).unwrap();
        assert_eq!(receipt.secure_url, "https://host/x.jpg");
        assert_eq!(receipt.original_filename, "x");
    }

    #[test]
    fn upload_without_secure_url_uses_remote_message() {
        let body = br#"{"error":{"message":"Upload preset not found"}}"#;
        let err = parse_upload("x.jpg", body).unwrap_err();
        assert_eq!(
            err,
            GalleryError::UploadRejected { file: "x.jpg".to_string(), message: "Upload preset not found".to_string() }
        );
    }

    #[test]
    fn upload_without_message_is_unknown() {
        let err = parse_upload("x.jpg", b"{}").unwrap_err();
        assert_eq!(err.reason(), "unknown");
    }

    mod against_local_server {
        use super::*;
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;
        use tokio::task::JoinHandle;

        fn config_for(base: &str) -> GalleryConfig {
            let mut config = GalleryConfig::new(
                "demo",
                "preset",
                vec![TagConfig::new("alexa"), TagConfig::new("familie")],
            );
            config.delivery_base = base.to_string();
            config.api_base = base.to_string();
            config
        }

        fn has_full_body(request: &[u8]) -> bool {
            let text = String::from_utf8_lossy(request).to_lowercase();
            let head_end = match text.find("\r\n\r\n") {
                Some(at) => at + 4,
                None => return false,
            };
            let length = text[..head_end]
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok());
            match length {
                Some(length) => request.len() >= head_end + length,
                None if text[..head_end].contains("transfer-encoding: chunked") => text.ends_with("0\r\n\r\n"),
                None => true,
            }
        }

        /// Answers one request with `status` and `body`, handing back the raw request.
        async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let base = format!("http://{}", listener.local_addr().unwrap());

            let handle = tokio::spawn(async move {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut request = Vec::new();
                let mut buf = [0u8; 4096];
                while !has_full_body(&request) {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
                String::from_utf8_lossy(&request).into_owned()
            });

            (base, handle)
        }

        async fn closed_base() -> String {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let base = format!("http://{}", listener.local_addr().unwrap());
            drop(listener);
            base
        }

        #[tokio::test]
        async fn forbidden_listing_is_remote_list_error() {
            let (base, server) = serve_once("403 Forbidden", r#"{"error":"forbidden"}"#).await;
            let client = StoreClient::new(config_for(&base)).unwrap();

            let err = client.list_by_tag("alexa").await.unwrap_err();

            assert_eq!(err, GalleryError::RemoteList { tag: "alexa".to_string(), status: 403 });
            let request = server.await.unwrap().to_lowercase();
            assert!(request.starts_with("get /demo/image/list/alexa.json "));
            assert!(request.contains("cache-control: no-cache\r\n"));
            assert!(request.contains("pragma: no-cache\r\n"));
        }

        #[tokio::test]
        async fn successful_listing_is_parsed_in_order() {
            let body = r#"{"resources":[{"public_id":"familie/a","format":"jpg"},{"public_id":"familie/b","format":"png"}]}"#;
            let (base, server) = serve_once("200 OK", body).await;
            let client = StoreClient::new(config_for(&base)).unwrap();

            let images = client.list_by_tag("familie").await.unwrap();
            server.await.unwrap();

            let names: Vec<_> = images.iter().map(|i| i.name.as_str()).collect();
            assert_eq!(names, vec!["a.jpg", "b.png"]);
            assert!(images[0].full_url.starts_with(&base));
        }

        #[tokio::test]
        async fn rejected_upload_carries_remote_message_and_form_fields() {
            let (base, server) =
                serve_once("400 Bad Request", r#"{"error":{"message":"Upload preset not found"}}"#).await;
            let client = StoreClient::new(config_for(&base)).unwrap();
            let file = UploadFile::new("one.jpg", b"jpeg bytes".to_vec());

            let err = client.upload_one(&file, "familie").await.unwrap_err();

            assert_eq!(
                err,
                GalleryError::UploadRejected {
                    file: "one.jpg".to_string(),
                    message: "Upload preset not found".to_string(),
                }
            );
            let request = server.await.unwrap();
            assert!(request.starts_with("POST /demo/upload "));
            assert!(request.contains(r#"name="file"; filename="one.jpg""#));
            assert!(request.contains("jpeg bytes"));
            assert!(request.contains("name=\"upload_preset\"\r\n\r\npreset\r\n"));
            assert!(request.contains("name=\"tags\"\r\n\r\nfamilie\r\n"));
        }

        #[tokio::test]
        async fn accepted_upload_returns_receipt() {
            let (base, server) =
                serve_once("200 OK", r#"{"secure_url":"https://host/one.jpg","original_filename":"one"}"#).await;
            let client = StoreClient::new(config_for(&base)).unwrap();

            let receipt = client.upload_one(&UploadFile::new("one.jpg", vec![1u8]), "familie").await.unwrap();
            server.await.unwrap();

            assert_eq!(receipt.secure_url, "https://host/one.jpg");
            assert_eq!(receipt.original_filename, "one");
        }

        #[tokio::test]
        async fn unreachable_host_maps_to_communication_and_rejection() {
            let client = StoreClient::new(config_for(&closed_base().await)).unwrap();

            let err = client.list_by_tag("alexa").await.unwrap_err();
            assert!(matches!(err, GalleryError::RemoteCommunication { ref tag, .. } if tag == "alexa"));

            let err = client.upload_one(&UploadFile::new("one.jpg", vec![1u8]), "alexa").await.unwrap_err();
            assert!(matches!(err, GalleryError::UploadRejected { ref file, .. } if file == "one.jpg"));
        }
    }
}
