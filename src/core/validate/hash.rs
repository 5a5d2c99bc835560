//! Content-hash message ids.
//!
//! Patterns look like `[sha512:contenthash:base64:6]`, optionally surrounded
//! by literal text (`app.[sha256:contenthash:hex:8]`).

use std::{fmt, str::FromStr};

use base64::{Engine, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256, Sha512};

pub const DEFAULT_ID_PATTERN: &str = "[sha512:contenthash:base64:6]";

const CONTENT_HASH: &str = "contenthash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha256,
    Sha512,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestEncoding {
    Base64,
    Hex,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdPatternError {
    #[error("id pattern \"{0}\" has no [<algorithm>:contenthash:<digest>:<length>] placeholder")]
    MissingPlaceholder(String),
    #[error("unsupported hash algorithm \"{0}\", expected sha256 or sha512")]
    UnknownAlgorithm(String),
    #[error("unsupported digest \"{0}\", expected base64 or hex")]
    UnknownDigest(String),
    #[error("invalid hash length \"{0}\"")]
    InvalidLength(String),
}

/// A parsed id interpolation pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdPattern {
    prefix: String,
    algorithm: HashAlgorithm,
    encoding: DigestEncoding,
    length: Option<usize>,
    suffix: String,
}

impl Default for IdPattern {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            algorithm: HashAlgorithm::Sha512,
            encoding: DigestEncoding::Base64,
            length: Some(6),
            suffix: String::new(),
        }
    }
}

impl FromStr for IdPattern {
    type Err = IdPatternError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        let missing = || IdPatternError::MissingPlaceholder(pattern.to_string());

        let open = pattern.find('[').ok_or_else(missing)?;
        let close = pattern[open..].find(']').ok_or_else(missing)? + open;
        let parts: Vec<&str> = pattern[open + 1..close].split(':').collect();
        let hash_at = parts
            .iter()
            .position(|p| *p == CONTENT_HASH)
            .ok_or_else(missing)?;

        let algorithm = match &parts[..hash_at] {
            [] | ["sha512"] => HashAlgorithm::Sha512,
            ["sha256"] => HashAlgorithm::Sha256,
            other => return Err(IdPatternError::UnknownAlgorithm(other.join(":"))),
        };

        let rest = &parts[hash_at + 1..];
        let encoding = match rest.first() {
            None | Some(&"hex") => DigestEncoding::Hex,
            Some(&"base64") => DigestEncoding::Base64,
            Some(other) => return Err(IdPatternError::UnknownDigest(other.to_string())),
        };
        let length = match rest {
            [] | [_] => None,
            [_, len] => Some(
                len.parse::<usize>()
                    .map_err(|_| IdPatternError::InvalidLength(len.to_string()))?,
            ),
            _ => return Err(IdPatternError::InvalidLength(rest[1..].join(":"))),
        };

        Ok(Self {
            prefix: pattern[..open].to_string(),
            algorithm,
            encoding,
            length,
            suffix: pattern[close + 1..].to_string(),
        })
    }
}

impl fmt::Display for IdPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let algorithm = match self.algorithm {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        };
        let encoding = match self.encoding {
            DigestEncoding::Base64 => "base64",
            DigestEncoding::Hex => "hex",
        };
        write!(f, "{}[{}:{}:{}", self.prefix, algorithm, CONTENT_HASH, encoding)?;
        if let Some(length) = self.length {
            write!(f, ":{}", length)?;
        }
        write!(f, "]{}", self.suffix)
    }
}

impl IdPattern {
    /// Produce the id for `content`.
    pub fn interpolate(&self, content: &str) -> String {
        let bytes = match self.algorithm {
            HashAlgorithm::Sha256 => Sha256::digest(content.as_bytes()).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(content.as_bytes()).to_vec(),
        };
        let mut digest = match self.encoding {
            DigestEncoding::Base64 => STANDARD.encode(&bytes),
            DigestEncoding::Hex => bytes.iter().map(|b| format!("{:02x}", b)).collect(),
        };
        if let Some(length) = self.length {
            digest.truncate(length.min(digest.len()));
        }
        format!("{}{}{}", self.prefix, digest, self.suffix)
    }
}

/// The text a content-hash id is computed from.
///
/// `defaultMessage#description` when a description is present, where an
/// object description contributes its JSON form.
pub fn hash_input(default_message: &str, description: Option<&serde_json::Value>) -> String {
    match description {
        Some(serde_json::Value::String(text)) => format!("{}#{}", default_message, text),
        Some(other) => format!("{}#{}", default_message, other),
        None => default_message.to_string(),
    }
}
