use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::endpoint::Endpoint;

/// Request operation of the cache protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum Operation {
    Get,
    Gets,
    Set,
    Add,
    Replace,
    Append,
    Prepend,
    Cas,
    Delete,
    Incr,
    Decr,
    Touch,
    LeaseGet,
    LeaseSet,
    MetaGet,
    FlushAll,
    Stats,
    Version,
    Echo,
    Quit,
    #[default]
    Unknown,
}

impl Operation {
    const KNOWN: [Operation; 20] = [
        Operation::Get,
        Operation::Gets,
        Operation::Set,
        Operation::Add,
        Operation::Replace,
        Operation::Append,
        Operation::Prepend,
        Operation::Cas,
        Operation::Delete,
        Operation::Incr,
        Operation::Decr,
        Operation::Touch,
        Operation::LeaseGet,
        Operation::LeaseSet,
        Operation::MetaGet,
        Operation::FlushAll,
        Operation::Stats,
        Operation::Version,
        Operation::Echo,
        Operation::Quit,
    ];

    /// Display name, `None` for an unrecognized operation
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Operation::Get => "get",
            Operation::Gets => "gets",
            Operation::Set => "set",
            Operation::Add => "add",
            Operation::Replace => "replace",
            Operation::Append => "append",
            Operation::Prepend => "prepend",
            Operation::Cas => "cas",
            Operation::Delete => "delete",
            Operation::Incr => "incr",
            Operation::Decr => "decr",
            Operation::Touch => "touch",
            Operation::LeaseGet => "lease-get",
            Operation::LeaseSet => "lease-set",
            Operation::MetaGet => "metaget",
            Operation::FlushAll => "flushall",
            Operation::Stats => "stats",
            Operation::Version => "version",
            Operation::Echo => "echo",
            Operation::Quit => "quit",
            Operation::Unknown => return None,
        };
        Some(name)
    }

    /// Look up an operation by its display name
    pub fn from_name(name: &str) -> Self {
        Self::KNOWN
            .iter()
            .copied()
            .find(|op| op.name() == Some(name))
            .unwrap_or(Operation::Unknown)
    }
}

impl From<String> for Operation {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

/// Reply result code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum ResultCode {
    Ok,
    Found,
    NotFound,
    Stored,
    NotStored,
    Exists,
    Deleted,
    Touched,
    Timeout,
    ConnectError,
    ConnectTimeout,
    Busy,
    Tko,
    RemoteError,
    LocalError,
    ClientError,
    BadKey,
    BadValue,
    Aborted,
    #[default]
    Unknown,
}

impl ResultCode {
    const KNOWN: [ResultCode; 19] = [
        ResultCode::Ok,
        ResultCode::Found,
        ResultCode::NotFound,
        ResultCode::Stored,
        ResultCode::NotStored,
        ResultCode::Exists,
        ResultCode::Deleted,
        ResultCode::Touched,
        ResultCode::Timeout,
        ResultCode::ConnectError,
        ResultCode::ConnectTimeout,
        ResultCode::Busy,
        ResultCode::Tko,
        ResultCode::RemoteError,
        ResultCode::LocalError,
        ResultCode::ClientError,
        ResultCode::BadKey,
        ResultCode::BadValue,
        ResultCode::Aborted,
    ];

    /// Display name, `None` for an unrecognized result
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            ResultCode::Ok => "ok",
            ResultCode::Found => "found",
            ResultCode::NotFound => "notfound",
            ResultCode::Stored => "stored",
            ResultCode::NotStored => "notstored",
            ResultCode::Exists => "exists",
            ResultCode::Deleted => "deleted",
            ResultCode::Touched => "touched",
            ResultCode::Timeout => "timeout",
            ResultCode::ConnectError => "connect_error",
            ResultCode::ConnectTimeout => "connect_timeout",
            ResultCode::Busy => "busy",
            ResultCode::Tko => "tko",
            ResultCode::RemoteError => "remote_error",
            ResultCode::LocalError => "local_error",
            ResultCode::ClientError => "client_error",
            ResultCode::BadKey => "bad_key",
            ResultCode::BadValue => "bad_value",
            ResultCode::Aborted => "aborted",
            ResultCode::Unknown => return None,
        };
        Some(name)
    }

    /// Look up a result by its display name
    pub fn from_name(name: &str) -> Self {
        Self::KNOWN
            .iter()
            .copied()
            .find(|res| res.name() == Some(name))
            .unwrap_or(ResultCode::Unknown)
    }
}

impl From<String> for ResultCode {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

/// Wire protocol the event was decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum Protocol {
    Ascii,
    Umbrella,
    Caret,
    #[default]
    Unknown,
}

impl Protocol {
    /// Display name, `None` for an unrecognized protocol
    pub fn name(self) -> Option<&'static str> {
        match self {
            Protocol::Ascii => Some("ascii"),
            Protocol::Umbrella => Some("umbrella"),
            Protocol::Caret => Some("caret"),
            Protocol::Unknown => None,
        }
    }
}

impl From<String> for Protocol {
    fn from(name: String) -> Self {
        match name.as_str() {
            "ascii" => Protocol::Ascii,
            "umbrella" => Protocol::Umbrella,
            "caret" => Protocol::Caret,
            _ => Protocol::Unknown,
        }
    }
}

/// Byte payload accepted either as text or as an array of byte values
#[derive(Deserialize)]
#[serde(untagged)]
enum BytesRepr {
    Text(String),
    Raw(Vec<u8>),
}

impl From<BytesRepr> for Vec<u8> {
    fn from(repr: BytesRepr) -> Self {
        match repr {
            BytesRepr::Text(text) => text.into_bytes(),
            BytesRepr::Raw(bytes) => bytes,
        }
    }
}

fn bytes<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    BytesRepr::deserialize(deserializer).map(Vec::from)
}

fn segments<'de, D>(deserializer: D) -> Result<Option<Vec<Vec<u8>>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let reprs = Option::<Vec<BytesRepr>>::deserialize(deserializer)?;
    Ok(reprs.map(|reprs| reprs.into_iter().map(Vec::from).collect()))
}

/// A request or reply as handed over by the protocol decoder
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DecodedEvent {
    /// Message id assigned by the decoder
    pub id: u64,

    /// Capture time of the message
    pub timestamp: Option<DateTime<Utc>>,

    pub from: Endpoint,
    pub to: Endpoint,
    pub protocol: Protocol,
    pub operation: Operation,
    pub result: ResultCode,

    #[serde(deserialize_with = "bytes")]
    pub key: Vec<u8>,

    #[serde(deserialize_with = "bytes")]
    pub value: Vec<u8>,

    pub flags: Option<u64>,
    pub exptime: Option<i64>,

    /// Exact wire bytes, split the way the decoder received them
    #[serde(deserialize_with = "segments")]
    pub raw: Option<Vec<Vec<u8>>>,
}

impl DecodedEvent {
    /// Borrowed view of the raw segments, `None` when no raw data was captured
    pub fn raw_segments(&self) -> Option<Vec<&[u8]>> {
        self.raw
            .as_ref()
            .map(|segments| segments.iter().map(Vec::as_slice).collect())
    }
}
