use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug)]
pub enum APIErrorVariant {
    Network,
    MalformedResponse,
    UnexpectedStatusCode,
}

#[derive(Debug)]
pub struct APIError {
    pub variant: APIErrorVariant,
    pub status_code: Option<StatusCode>,
    pub message: Option<String>,
}

pub type APIResponse<T> = Result<T, APIError>;

pub(crate) struct BaseClient {
    client: Client,
    address: String,
    api_token: Option<String>,
}

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            client: Client::new(),
            address,
            api_token: None,
        }
    }

    pub fn set_api_token(&mut self, token: String) {
        if !token.is_empty() {
            self.api_token = Some(token);
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }

    fn with_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        res: Response,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let status = res.status();
        if status != expected_status_code {
            return Err(APIError {
                variant: APIErrorVariant::UnexpectedStatusCode,
                status_code: Some(status),
                message: res.text().await.ok(),
            });
        }

        res.json::<T>().await.map_err(|e| APIError {
            variant: APIErrorVariant::MalformedResponse,
            status_code: Some(status),
            message: Some(e.to_string()),
        })
    }

    fn network_error(e: reqwest::Error) -> APIError {
        APIError {
            variant: APIErrorVariant::Network,
            status_code: e.status(),
            message: Some(e.to_string()),
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .with_auth(self.client.get(self.url(&path)))
            .send()
            .await
            .map_err(Self::network_error)?;
        Self::handle_response(res, expected_status_code).await
    }

    pub async fn post<S: Serialize, T: DeserializeOwned>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .with_auth(self.client.post(self.url(&path)))
            .json(&body)
            .send()
            .await
            .map_err(Self::network_error)?;
        Self::handle_response(res, expected_status_code).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .with_auth(self.client.delete(self.url(&path)))
            .send()
            .await
            .map_err(Self::network_error)?;
        Self::handle_response(res, expected_status_code).await
    }
}
