//! リクエストメソッド

use std::borrow::Cow;
use std::fmt;

use crate::error::DecodeError;
use crate::token::is_token;

/// リクエストメソッド (RFC 9110 Section 9: method = token)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Method(Cow<'static, str>);

impl Method {
    pub const OPTIONS: Method = Method(Cow::Borrowed("OPTIONS"));
    pub const GET: Method = Method(Cow::Borrowed("GET"));
    pub const HEAD: Method = Method(Cow::Borrowed("HEAD"));
    pub const POST: Method = Method(Cow::Borrowed("POST"));
    pub const PUT: Method = Method(Cow::Borrowed("PUT"));
    pub const PATCH: Method = Method(Cow::Borrowed("PATCH"));
    pub const DELETE: Method = Method(Cow::Borrowed("DELETE"));
    pub const TRACE: Method = Method(Cow::Borrowed("TRACE"));
    pub const CONNECT: Method = Method(Cow::Borrowed("CONNECT"));

    const KNOWN: [Method; 9] = [
        Self::OPTIONS,
        Self::GET,
        Self::HEAD,
        Self::POST,
        Self::PUT,
        Self::PATCH,
        Self::DELETE,
        Self::TRACE,
        Self::CONNECT,
    ];

    /// メソッド名をパース
    ///
    /// 標準メソッドは定数を返す。それ以外はトークンであれば受け付ける。
    pub fn parse(name: &str) -> Result<Self, DecodeError> {
        if let Some(m) = Self::KNOWN.into_iter().find(|m| m.as_str() == name) {
            return Ok(m);
        }
        if !is_token(name) {
            return Err(DecodeError::InvalidMethod(name.to_string()));
        }
        Ok(Method(Cow::Owned(name.to_string())))
    }

    /// メソッド名
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
