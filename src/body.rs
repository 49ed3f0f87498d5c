//! Message bodies that can be captured without being lost to the caller.
//!
//! A [`Body`] starts out either as a readable stream or as bytes already in memory. The first
//! time it is captured the stream is drained into a buffer which the body keeps, so the bytes
//! stay available to the caller and later captures see exactly the same content. A stream that
//! fails while being drained keeps failing with the same error.

use std::fmt;
use std::io::{self, Read};

enum BodyState {
    Stream(Box<dyn Read + Send>),
    Buffered(Vec<u8>),
    Failed(io::ErrorKind, String),
}

/// Body of a captured HTTP request or response
pub struct Body {
    state: BodyState,
}

impl Body {
    /// Create a body backed by a stream that has not been read yet
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            state: BodyState::Stream(Box::new(reader)),
        }
    }

    /// Create a body from bytes already in memory
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            state: BodyState::Buffered(bytes.into()),
        }
    }

    /// Whether the underlying stream has been drained into memory
    pub fn is_buffered(&self) -> bool {
        matches!(self.state, BodyState::Buffered(_))
    }

    /// The buffered bytes, or `None` while the stream is unread or after it failed
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.state {
            BodyState::Buffered(bytes) => Some(bytes.as_slice()),
            BodyState::Stream(_) | BodyState::Failed(..) => None,
        }
    }

    /// Drain the stream (at most once) and return the buffered bytes.
    ///
    /// A partially read stream cannot be rewound, so after a read error the stream is dropped
    /// and every later call returns the same error.
    pub fn buffer(&mut self) -> io::Result<&[u8]> {
        self.drain();
        match &self.state {
            BodyState::Buffered(bytes) => Ok(bytes.as_slice()),
            BodyState::Failed(kind, message) => Err(io::Error::new(*kind, message.clone())),
            BodyState::Stream(_) => Ok(&[]),
        }
    }

    /// Consume the body, draining the stream if it has not been read yet
    pub fn into_bytes(mut self) -> io::Result<Vec<u8>> {
        self.drain();
        match self.state {
            BodyState::Buffered(bytes) => Ok(bytes),
            BodyState::Failed(kind, message) => Err(io::Error::new(kind, message)),
            BodyState::Stream(_) => Ok(Vec::new()),
        }
    }

    fn drain(&mut self) {
        if let BodyState::Stream(reader) = &mut self.state {
            let mut bytes = Vec::new();
            self.state = match reader.read_to_end(&mut bytes) {
                Ok(_) => BodyState::Buffered(bytes),
                Err(err) => BodyState::Failed(err.kind(), err.to_string()),
            };
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            BodyState::Stream(_) => f.write_str("Body(<unread stream>)"),
            BodyState::Buffered(bytes) => write!(f, "Body({} bytes)", bytes.len()),
            BodyState::Failed(_, message) => write!(f, "Body(<failed: {}>)", message),
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::from_bytes(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Self::from_bytes(text)
    }
}
