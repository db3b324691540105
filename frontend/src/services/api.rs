//! Multipart HTTP transport for the paper server.

use gloo_net::http::Request;
use qgen_core::{FormField, HttpReply, PreparedRequest, Transport, TransportError};
use web_sys::FormData;

use super::browser::BrowserFile;

/// Sends prepared requests with `fetch` via gloo-net.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl GlooTransport {
    /// Convert the core form into a browser `FormData`.
    pub fn form_data(fields: Vec<FormField<BrowserFile>>) -> Result<FormData, TransportError> {
        let form_data = FormData::new()
            .map_err(|e| TransportError::new(format!("Failed to create FormData: {:?}", e)))?;

        for field in fields {
            let appended = match &field {
                FormField::Text { name, value } => form_data.append_with_str(name, value),
                FormField::File { name, file } => {
                    form_data.append_with_blob_and_filename(name, file.inner(), &file.inner().name())
                }
            };
            appended.map_err(|e| {
                TransportError::new(format!("Failed to append {}: {:?}", field.name(), e))
            })?;
        }

        Ok(form_data)
    }
}

impl Transport for GlooTransport {
    type File = BrowserFile;

    async fn post_form(&self, request: PreparedRequest<BrowserFile>) -> Result<HttpReply, TransportError> {
        let form_data = Self::form_data(request.form.into_fields())?;

        let response = Request::post(&request.url)
            .body(form_data)
            .map_err(|e| TransportError::new(format!("Failed to build request: {}", e)))?
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status();
        // The body only refines the message; a status alone is still a reply.
        let body = response.text().await.unwrap_or_default();
        log::debug!("📥 {} -> {}", request.url, status);

        Ok(HttpReply::new(status, body))
    }
}
