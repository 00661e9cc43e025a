//! `multipart/form-data` body encoding.
//!
//! Bodies are produced in a single pass over an ordered list of [`Entry`]
//! values. Entry order is preserved exactly and nothing is escaped, sniffed
//! or size-checked: the boundary must not occur inside any entry, which a
//! [`random_boundary`] makes practically certain.

use bytes::{BufMut, Bytes, BytesMut};
use uuid::Uuid;

const CRLF: &[u8] = b"\r\n";

/// One part of a multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Plain UTF-8 text field
    Field { name: String, value: String },
    /// Binary payload with a declared file name and MIME type
    File {
        name: String,
        file_name: String,
        data: Bytes,
        content_type: String,
    },
}

impl Entry {
    /// Create a text field entry
    pub fn field(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Field {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a file entry
    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        data: impl Into<Bytes>,
        content_type: impl Into<String>,
    ) -> Self {
        Self::File {
            name: name.into(),
            file_name: file_name.into(),
            data: data.into(),
            content_type: content_type.into(),
        }
    }

    /// Form field name of this entry
    pub fn name(&self) -> &str {
        match self {
            Self::Field { name, .. } | Self::File { name, .. } => name,
        }
    }

    fn write_to(&self, boundary: &str, buf: &mut BytesMut) {
        buf.put_slice(b"--");
        buf.put_slice(boundary.as_bytes());
        buf.put_slice(CRLF);

        match self {
            Self::Field { name, value } => {
                buf.put_slice(b"Content-Disposition: form-data; name=\"");
                buf.put_slice(name.as_bytes());
                buf.put_slice(b"\"\r\n\r\n");
                buf.put_slice(value.as_bytes());
            }
            Self::File {
                name,
                file_name,
                data,
                content_type,
            } => {
                buf.put_slice(b"Content-Disposition: form-data; name=\"");
                buf.put_slice(name.as_bytes());
                buf.put_slice(b"\"; filename=\"");
                buf.put_slice(file_name.as_bytes());
                buf.put_slice(b"\"\r\n");
                buf.put_slice(b"Content-Type: ");
                buf.put_slice(content_type.as_bytes());
                buf.put_slice(b"\r\n\r\n");
                buf.put_slice(data);
            }
        }

        buf.put_slice(CRLF);
    }

    fn encoded_len(&self, boundary: &str) -> usize {
        // delimiter line + trailing CRLF after the payload
        let framing = 2 + boundary.len() + 2 + 2;
        match self {
            Self::Field { name, value } => framing + 38 + name.len() + 5 + value.len(),
            Self::File {
                name,
                file_name,
                data,
                content_type,
            } => {
                framing
                    + 38
                    + name.len()
                    + 13
                    + file_name.len()
                    + 3
                    + 14
                    + content_type.len()
                    + 4
                    + data.len()
            }
        }
    }
}

/// Serialize `entries`, in order, into a complete multipart body.
///
/// Every entry is encoded; the body always ends with `--{boundary}--\r\n`.
pub fn encode(boundary: &str, entries: &[Entry]) -> Bytes {
    let capacity = entries
        .iter()
        .map(|entry| entry.encoded_len(boundary))
        .sum::<usize>()
        + boundary.len()
        + 6;

    let mut buf = entries.iter().fold(BytesMut::with_capacity(capacity), |mut buf, entry| {
        entry.write_to(boundary, &mut buf);
        buf
    });

    buf.put_slice(b"--");
    buf.put_slice(boundary.as_bytes());
    buf.put_slice(b"--\r\n");
    buf.freeze()
}

/// Generate a fresh boundary token
pub fn random_boundary() -> String {
    format!("Boundary-{}", Uuid::new_v4())
}

/// Ordered multipart form bound to one boundary
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    entries: Vec<Entry>,
}

impl MultipartForm {
    /// Create an empty form with a random boundary
    pub fn new() -> Self {
        Self::with_boundary(random_boundary())
    }

    /// Create an empty form with a caller-chosen boundary
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            entries: Vec::new(),
        }
    }

    /// Add a text field
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push(Entry::field(name, value));
        self
    }

    /// Add a file
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        data: impl Into<Bytes>,
        content_type: impl Into<String>,
    ) -> Self {
        self.entries.push(Entry::file(name, file_name, data, content_type));
        self
    }

    /// Add an already constructed entry
    pub fn entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Value for the `Content-Type` request header
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Encode the form body
    pub fn encode(&self) -> Bytes {
        encode(&self.boundary, &self.entries)
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}
