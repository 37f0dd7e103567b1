//! reqwest 实现的控制 API 客户端

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use crate::error::{ClientError, Result};
use crate::http_client::HttpUtils;
use crate::traits::ControlClient;
use crate::types::{
    API_KEY_HEADER, ApiRequest, ClientConfig, HttpMethod, NodeEndpoint, Payload, RemoteResponse,
};
use crate::utils::log_sanitizer::redact_json_body;

/// 基于 reqwest 的 [`ControlClient`]
///
/// 内部的 `reqwest::Client` 持有连接池，可在多次调用间共享。
#[derive(Clone)]
pub struct HttpControlClient {
    client: Client,
}

impl HttpControlClient {
    /// 创建带超时配置的客户端
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::ClientInit {
                detail: e.to_string(),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ControlClient for HttpControlClient {
    async fn call(&self, node: &NodeEndpoint, request: ApiRequest) -> Result<RemoteResponse> {
        let label = node.label();
        let url = format!("{}{}", node.base_url(), request.path);

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        }
        .header(API_KEY_HEADER, &node.api_key);

        match &request.payload {
            Payload::Empty => {}
            Payload::Query(pairs) => {
                builder = builder.query(pairs);
            }
            Payload::Form(fields) => {
                builder = builder.form(fields);
            }
            Payload::Json(body) => {
                let bytes =
                    serde_json::to_vec(body).map_err(|e| ClientError::SerializationError {
                        node: label.clone(),
                        detail: e.to_string(),
                    })?;
                log::debug!("[{label}] Request Body: {}", redact_json_body(body));
                builder = builder
                    .header(CONTENT_TYPE, "application/json")
                    .body(bytes);
            }
        }

        let (_status, response_text) = HttpUtils::execute_request(
            builder,
            &label,
            request.method.as_str(),
            &request.path,
        )
        .await?;

        HttpUtils::parse_response(&response_text, &label)
    }
}
