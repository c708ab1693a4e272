use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::error::Result;

/// Multipart field name the service expects for uploads.
pub const DEFAULT_FILE_FIELD: &str = "file";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single named file field of a multipart body.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: DEFAULT_FILE_FIELD.to_string(),
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    None,
    Json(Value),
    Multipart(FilePart),
}

/// Everything the dispatcher needs to issue one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Resource-relative path, appended to the configured base URL.
    pub path: String,
    /// Attach the stored credential; fail fast if there is none.
    pub authenticated: bool,
    pub body: RequestBody,
    /// A successful response carries a fresh `access_token` to store.
    pub issues_credential: bool,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            authenticated: false,
            body: RequestBody::None,
            issues_credential: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn authenticated(mut self) -> Self {
        self.authenticated = true;
        self
    }

    pub fn issuing_credential(mut self) -> Self {
        self.issues_credential = true;
        self
    }

    pub fn with_json_value(mut self, value: Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    /// Attach a JSON body serialized from a typed value.
    pub fn with_json<T: Serialize>(self, body: &T) -> Result<Self> {
        Ok(self.with_json_value(serde_json::to_value(body)?))
    }

    pub fn with_file(mut self, part: FilePart) -> Self {
        self.body = RequestBody::Multipart(part);
        self
    }
}
