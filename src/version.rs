//! プロトコルバージョン

use std::borrow::Cow;
use std::fmt;

use crate::error::DecodeError;

/// プロトコルバージョン (`NAME/MAJOR.MINOR`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    protocol: Cow<'static, str>,
    major: u8,
    minor: u8,
}

impl Version {
    /// HTTP/1.0
    pub const HTTP_1_0: Version = Version::new_static("HTTP", 1, 0);
    /// HTTP/1.1
    pub const HTTP_1_1: Version = Version::new_static("HTTP", 1, 1);
    /// RTSP/1.0
    pub const RTSP_1_0: Version = Version::new_static("RTSP", 1, 0);

    const fn new_static(protocol: &'static str, major: u8, minor: u8) -> Self {
        Self {
            protocol: Cow::Borrowed(protocol),
            major,
            minor,
        }
    }

    /// バージョン文字列をパース
    ///
    /// 前後の空白は無視し、プロトコル名は大文字に正規化する。
    pub fn parse(text: &str) -> Result<Self, DecodeError> {
        let text = text.trim();
        let invalid = || DecodeError::InvalidVersion(text.to_string());

        let known = [Self::HTTP_1_1, Self::HTTP_1_0, Self::RTSP_1_0];
        if let Some(v) = known.into_iter().find(|v| v.eq_text(text)) {
            return Ok(v);
        }

        let (protocol, number) = text.split_once('/').ok_or_else(invalid)?;
        if protocol.is_empty() || protocol.bytes().any(|b| b.is_ascii_whitespace()) {
            return Err(invalid());
        }
        let (major, minor) = number.split_once('.').ok_or_else(invalid)?;
        let major = parse_digits(major).ok_or_else(invalid)?;
        let minor = parse_digits(minor).ok_or_else(invalid)?;

        Ok(Self {
            protocol: Cow::Owned(protocol.to_ascii_uppercase()),
            major,
            minor,
        })
    }

    /// プロトコル名 (HTTP, RTSP 等)
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// メジャーバージョン
    pub fn major(&self) -> u8 {
        self.major
    }

    /// マイナーバージョン
    pub fn minor(&self) -> u8 {
        self.minor
    }

    fn eq_text(&self, text: &str) -> bool {
        text.eq_ignore_ascii_case(&self.to_string())
    }
}

fn parse_digits(s: &str) -> Option<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}.{}", self.protocol, self.major, self.minor)
    }
}
