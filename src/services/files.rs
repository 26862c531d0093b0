//! Unauthenticated file transfer: backstories and audio chunks go through
//! the files routes, avatars and campaign art through the dedicated image
//! upload route.

use bytes::Bytes;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{ApiMessage, FileUploadResponse, ImgResponse};
use crate::transport::{ApiRequest, HttpMethod, RemoteCaller};

pub struct FileService {
    caller: Arc<dyn RemoteCaller>,
}

impl FileService {
    pub fn new(caller: Arc<dyn RemoteCaller>) -> Self {
        Self { caller }
    }

    /// Upload a new file; the server picks the stored name.
    pub async fn upload(
        &self,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<FileUploadResponse, ApiError> {
        let response = self
            .caller
            .upload(HttpMethod::Post, "files/upload", file_name, data)
            .await
            .map_err(ApiError::from)?;

        if !response.is_success() {
            return Err(ApiError::Rejected(response.error_detail()));
        }

        Ok(response.json().map_err(ApiError::from)?)
    }

    /// Upload an avatar or campaign image; the server answers with the
    /// stored name to reference from user and campaign records.
    pub async fn upload_image(
        &self,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<ImgResponse, ApiError> {
        let response = self
            .caller
            .upload(HttpMethod::Post, "images/upload", file_name, data)
            .await
            .map_err(ApiError::from)?;

        if !response.is_success() {
            return Err(ApiError::Rejected(response.error_detail()));
        }

        Ok(response.json().map_err(ApiError::from)?)
    }

    /// Fetch a stored file's raw contents.
    pub async fn download(&self, name: &str) -> Result<Bytes, ApiError> {
        let response = self
            .caller
            .execute(ApiRequest::get(format!("files/{name}")))
            .await
            .map_err(ApiError::from)?;

        if !response.is_success() {
            return Err(ApiError::Rejected(response.error_detail()));
        }

        Ok(response.bytes().clone())
    }

    /// Replace an existing file in place.
    pub async fn update(&self, name: &str, data: Vec<u8>) -> Result<ApiMessage, ApiError> {
        let response = self
            .caller
            .upload(
                HttpMethod::Put,
                &format!("files/{name}/update"),
                name,
                data,
            )
            .await
            .map_err(ApiError::from)?;

        if !response.is_success() {
            return Err(ApiError::Rejected(response.error_detail()));
        }

        Ok(response.json().map_err(ApiError::from)?)
    }
}
