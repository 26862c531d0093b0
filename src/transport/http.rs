use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;
use url::Url;

use super::{ApiRequest, HttpMethod, RemoteCaller, RemoteResponse, TransportResult};
use crate::config::ApiConfig;

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// `reqwest`-backed [`RemoteCaller`] sharing one connection pool.
pub struct HttpCaller {
    client: Client,
    base_url: Url,
}

impl HttpCaller {
    pub fn new(config: &ApiConfig) -> TransportResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let base_url = Url::parse(&config.base_url)?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> TransportResult<Url> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait]
impl RemoteCaller for HttpCaller {
    async fn execute(&self, request: ApiRequest) -> TransportResult<RemoteResponse> {
        let url = self.endpoint(&request.path)?;
        let mut builder = self.client.request(request.method.into(), url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(RemoteResponse::new(status, body))
    }

    async fn upload(
        &self,
        method: HttpMethod,
        path: &str,
        file_name: &str,
        data: Vec<u8>,
    ) -> TransportResult<RemoteResponse> {
        let url = self.endpoint(path)?;
        let part = reqwest::multipart::Part::bytes(data).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .request(method.into(), url)
            .multipart(form)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(RemoteResponse::new(status, body))
    }
}
