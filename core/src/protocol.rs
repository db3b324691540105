//! Request/response contract with the paper backend.
//!
//! Both endpoints take a multipart form and answer with the same JSON shape:
//!
//! ```json
//! { "status": "success", "redirect": "/configure/abc", "message": "…" }
//! ```
//!
//! Anything else (non-2xx status, unparseable body, `status != "success"`)
//! is a failure.

use serde::{Deserialize, Serialize};

use crate::error::{SubmitError, SubmitResult};

/// Status value the backend uses for a successful request.
pub const STATUS_SUCCESS: &str = "success";

// =============================================================================
// Multipart form
// =============================================================================

/// One part of a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub enum FormField<F> {
    Text { name: String, value: String },
    File { name: String, file: F },
}

impl<F> FormField<F> {
    pub fn name(&self) -> &str {
        match self {
            FormField::Text { name, .. } | FormField::File { name, .. } => name,
        }
    }
}

/// Ordered multipart body, generic over the platform file handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Form<F> {
    fields: Vec<FormField<F>>,
}

impl<F> Default for Form<F> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<F> Form<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(FormField::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(mut self, name: impl Into<String>, file: F) -> Self {
        self.fields.push(FormField::File {
            name: name.into(),
            file,
        });
        self
    }

    pub fn fields(&self) -> &[FormField<F>] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<FormField<F>> {
        self.fields
    }

    /// First text value stored under `name`.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|field| match field {
            FormField::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// All files stored under `name`, in insertion order.
    pub fn files(&self, name: &str) -> Vec<&F> {
        self.fields
            .iter()
            .filter_map(|field| match field {
                FormField::File { name: n, file } if n == name => Some(file),
                _ => None,
            })
            .collect()
    }
}

/// A POST ready to hand to a [`crate::host::Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest<F> {
    pub url: String,
    pub form: Form<F>,
}

// =============================================================================
// Replies
// =============================================================================

/// Raw HTTP reply as seen by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// JSON body shared by the upload and generation endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerReply {
    /// `"success"` or anything else.
    #[serde(default)]
    pub status: String,

    /// Where to navigate after a success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,

    /// Human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Error text attached to non-2xx replies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Session minted by the upload endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Paper created by the generation endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_id: Option<i64>,
}

impl ServerReply {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// The most specific message carried by the reply.
    pub fn best_message(&self) -> Option<String> {
        self.message
            .clone()
            .or_else(|| self.detail.clone())
            .filter(|m| !m.trim().is_empty())
    }

    /// Session identifier, falling back to the last segment of the redirect.
    pub fn session(&self) -> Option<String> {
        self.session_id
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| {
                let redirect = self.redirect.as_deref()?;
                let tail = redirect.trim_end_matches('/').rsplit('/').next()?;
                (!tail.is_empty()).then(|| tail.to_string())
            })
    }
}

/// Classify an HTTP reply into success or one of the failure kinds.
pub fn interpret(reply: &HttpReply) -> SubmitResult<ServerReply> {
    if !reply.is_ok() {
        let message = serde_json::from_str::<ServerReply>(&reply.body)
            .ok()
            .and_then(|body| body.best_message())
            .or_else(|| {
                let text = reply.body.trim();
                (!text.is_empty() && !text.starts_with('{')).then(|| text.to_string())
            });
        return Err(SubmitError::Status {
            status: reply.status,
            message,
        });
    }

    let parsed: ServerReply = serde_json::from_str(&reply.body)
        .map_err(|e| SubmitError::InvalidResponse(e.to_string()))?;

    if parsed.is_success() {
        Ok(parsed)
    } else {
        Err(SubmitError::Declared {
            message: parsed.best_message(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_reply() {
        let reply = HttpReply::new(
            200,
            r#"{"status":"success","session_id":"abc","redirect":"/configure/abc"}"#,
        );
        let parsed = interpret(&reply).unwrap();
        assert_eq!(parsed.redirect.as_deref(), Some("/configure/abc"));
        assert_eq!(parsed.session().as_deref(), Some("abc"));
    }

    #[test]
    fn test_declared_failure_keeps_server_message() {
        let reply = HttpReply::new(200, r#"{"status":"error","message":"No text found"}"#);
        assert_eq!(
            interpret(&reply),
            Err(SubmitError::Declared { message: Some("No text found".into()) })
        );
    }

    #[test]
    fn test_non_ok_status_reads_detail() {
        let reply = HttpReply::new(404, r#"{"detail":"Session not found"}"#);
        assert_eq!(
            interpret(&reply),
            Err(SubmitError::Status { status: 404, message: Some("Session not found".into()) })
        );
    }

    #[test]
    fn test_non_ok_status_with_plain_text() {
        let reply = HttpReply::new(502, "Bad Gateway");
        assert_eq!(
            interpret(&reply),
            Err(SubmitError::Status { status: 502, message: Some("Bad Gateway".into()) })
        );
    }

    #[test]
    fn test_unparseable_body_is_failure() {
        let reply = HttpReply::new(200, "<html>oops</html>");
        assert!(matches!(interpret(&reply), Err(SubmitError::InvalidResponse(_))));
    }

    #[test]
    fn test_session_from_redirect_only() {
        let reply = ServerReply {
            status: "success".into(),
            redirect: Some("/configure/xyz/".into()),
            ..Default::default()
        };
        assert_eq!(reply.session().as_deref(), Some("xyz"));
    }

    #[test]
    fn test_form_accessors() {
        let form: Form<&str> = Form::new()
            .file("files", "a.pdf")
            .text("title", "Midterm")
            .file("files", "b.txt");
        assert_eq!(form.text_value("title"), Some("Midterm"));
        assert_eq!(form.files("files"), vec![&"a.pdf", &"b.txt"]);
        assert_eq!(form.fields()[1].name(), "title");
    }
}
