use anyhow::{Context, Result};
use serde::{Serialize, Serializer};
use strum::{AsRefStr, Display, EnumString};

pub const DEFAULT_GAN_TYPE: &str = "pggan";

/// Model types the serving script knows how to host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum GanKind {
    /// Progressive-growing GAN
    Pggan,
}

/// The `--multi` flag as it was given on the command line.
///
/// An unset flag echoes as `false`; a set flag echoes as the raw string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MultiFlag {
    #[default]
    Unset,
    Value(String),
}

impl MultiFlag {
    /// Any non-empty value turns the flag on, including `"false"` and `"0"`.
    pub fn is_set(&self) -> bool {
        matches!(self, MultiFlag::Value(value) if !value.is_empty())
    }
}

impl From<Option<String>> for MultiFlag {
    fn from(value: Option<String>) -> Self {
        value.map_or(MultiFlag::Unset, MultiFlag::Value)
    }
}

impl Serialize for MultiFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MultiFlag::Unset => serializer.serialize_bool(false),
            MultiFlag::Value(value) => serializer.serialize_str(value),
        }
    }
}

/// Parsed arguments of the training runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunParams {
    #[serde(rename = "type")]
    pub gan_type: String,
    pub multi: MultiFlag,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            gan_type: DEFAULT_GAN_TYPE.to_string(),
            multi: MultiFlag::Unset,
        }
    }
}

/// Parsed arguments of the server launcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServeParams {
    #[serde(rename = "type")]
    pub gan_type: String,
}

impl ServeParams {
    pub fn kind(&self) -> Option<GanKind> {
        self.gan_type.parse().ok()
    }
}

impl Default for ServeParams {
    fn default() -> Self {
        Self {
            gan_type: DEFAULT_GAN_TYPE.to_string(),
        }
    }
}

/// Serialize with a four-space indent.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize parameters")?;
    String::from_utf8(buf).context("Serialized parameters are not valid UTF-8")
}
