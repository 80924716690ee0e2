//! レスポンスステータス

use std::borrow::Cow;
use std::fmt;

use crate::error::DecodeError;

/// ステータスコードとリーズンフレーズ
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Status {
    code: u32,
    reason: Cow<'static, str>,
}

impl Status {
    /// 不正レスポンス用のステータス (999 Unknown)
    pub const UNKNOWN: Status = Status {
        code: 999,
        reason: Cow::Borrowed("Unknown"),
    };

    /// ステータスを作成
    pub fn new(code: u32, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: Cow::Owned(reason.into()),
        }
    }

    /// ステータスコード文字列とリーズンフレーズからパース
    pub fn parse(code: &str, reason: &str) -> Result<Self, DecodeError> {
        let code = code
            .trim()
            .parse::<u32>()
            .map_err(|_| DecodeError::InvalidStatusCode(code.to_string()))?;
        Ok(Self::new(code, reason))
    }

    /// ステータスコード
    pub fn code(&self) -> u32 {
        self.code
    }

    /// リーズンフレーズ
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// 成功 (2xx) か確認
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.reason)
    }
}
