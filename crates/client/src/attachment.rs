use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::WebhookError;

/// Display name used when neither the caller nor the source provides one.
pub const DEFAULT_FILE_NAME: &str = "filename";

/// A readable, seekable byte stream.
pub trait ReadSeek: Read + Seek + Send {}

impl<T: Read + Seek + Send> ReadSeek for T {}

/// Who is responsible for closing an attachment's stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Opened by the attachment from a path; closed by [`Attachment::close`].
    Owned,
    /// Supplied by the caller; only closed when closure is forced.
    Borrowed,
}

/// A file sent alongside a message.
///
/// The stream is rewound before every request, so one attachment can be
/// delivered to several targets in turn. Sharing one attachment between
/// concurrent sends is not supported.
pub struct Attachment<'a> {
    name: String,
    ownership: Ownership,
    stream: Option<Box<dyn ReadSeek + 'a>>,
}

impl Attachment<'static> {
    /// Open the file at `path`. The attachment owns the handle.
    ///
    /// The display name defaults to the file name.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, WebhookError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_FILE_NAME)
            .to_owned();
        Ok(Self {
            name,
            ownership: Ownership::Owned,
            stream: Some(Box::new(file)),
        })
    }
}

impl<'a> Attachment<'a> {
    /// Wrap a caller-supplied stream. The caller keeps ownership of it.
    pub fn from_reader<R: ReadSeek + 'a>(reader: R, name: impl Into<String>) -> Self {
        Self {
            name: display_name(name.into()),
            ownership: Ownership::Borrowed,
            stream: Some(Box::new(reader)),
        }
    }

    /// Override the display name. An empty name falls back to the default.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = display_name(name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    pub fn is_closed(&self) -> bool {
        self.stream.is_none()
    }

    /// Move the stream cursor to `offset` bytes from the start.
    pub fn seek(&mut self, offset: u64) -> Result<u64, WebhookError> {
        Ok(self.stream_mut()?.seek(SeekFrom::Start(offset))?)
    }

    /// Rewind and read the whole stream for one request.
    pub fn read_for_dispatch(&mut self) -> Result<Vec<u8>, WebhookError> {
        let stream = self.stream_mut()?;
        stream.seek(SeekFrom::Start(0))?;
        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    /// Release the stream if this attachment owns it, or if `force` is set.
    ///
    /// Calling this more than once is a no-op.
    pub fn close(&mut self, force: bool) {
        if self.ownership == Ownership::Owned || force {
            self.stream = None;
        }
    }

    fn stream_mut(&mut self) -> Result<&mut Box<dyn ReadSeek + 'a>, WebhookError> {
        let name = &self.name;
        self.stream
            .as_mut()
            .ok_or_else(|| WebhookError::InvalidArgument(format!("attachment {name} is closed")))
    }
}

fn display_name(name: String) -> String {
    if name.is_empty() {
        DEFAULT_FILE_NAME.to_owned()
    } else {
        name
    }
}

impl std::fmt::Debug for Attachment<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("name", &self.name)
            .field("ownership", &self.ownership)
            .field("closed", &self.is_closed())
            .finish()
    }
}
