/*!
 * Synthesized audio payloads.
 */

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Audio container/codec requested from the speech service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    OggOpus,
    OggVorbis,
    Mp3,
    Pcm,
}

impl OutputFormat {
    /// Identifier used on the wire by the speech service
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OggOpus => "ogg_opus",
            Self::OggVorbis => "ogg_vorbis",
            Self::Mp3 => "mp3",
            Self::Pcm => "pcm",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::OggOpus => "audio/ogg; codecs=opus",
            Self::OggVorbis => "audio/ogg",
            Self::Mp3 => "audio/mpeg",
            Self::Pcm => "audio/pcm",
        }
    }

    /// File extension for saved clips
    pub fn extension(&self) -> &'static str {
        match self {
            Self::OggOpus | Self::OggVorbis => "ogg",
            Self::Mp3 => "mp3",
            Self::Pcm => "pcm",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "ogg_opus" => Ok(Self::OggOpus),
            "ogg_vorbis" => Ok(Self::OggVorbis),
            "mp3" => Ok(Self::Mp3),
            "pcm" => Ok(Self::Pcm),
            _ => Err(anyhow::anyhow!("Invalid audio output format: {}", s)),
        }
    }
}

/// One synthesized clip, held in memory until written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// Raw encoded audio
    pub data: Bytes,
    /// Encoding of `data`
    pub format: OutputFormat,
}

impl AudioClip {
    pub fn new(data: impl Into<Bytes>, format: OutputFormat) -> Self {
        Self {
            data: data.into(),
            format,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}
