//! ヘッダーコンテナ
//!
//! 名前 → 値リストの順序付きマルチマップ。名前は ASCII 大文字小文字を区別しない。
//! イテレーションは挿入順。

use crate::error::DecodeError;
use crate::token::{is_field_value, is_token};

/// ヘッダーコンテナ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
    validate: bool,
}

impl Default for HeaderMap {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderMap {
    /// 検証ありの空のコンテナを作成
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            validate: true,
        }
    }

    /// 検証なしの空のコンテナを作成
    pub const fn without_validation() -> Self {
        Self {
            entries: Vec::new(),
            validate: false,
        }
    }

    /// 検証フラグを指定して作成
    pub const fn with_validation(validate: bool) -> Self {
        Self {
            entries: Vec::new(),
            validate,
        }
    }

    /// 名前/値を検証するか
    pub fn is_validating(&self) -> bool {
        self.validate
    }

    /// 最初の値を取得
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// 指定した名前の値をすべて取得
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// ヘッダーが存在するか確認
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n.eq_ignore_ascii_case(name))
    }

    /// 値を追加 (既存の値は残す)
    pub fn add(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), DecodeError> {
        let name = name.into();
        let value = value.into();
        self.check(&name, &value)?;
        self.entries.push((name, value));
        Ok(())
    }

    /// 値を設定 (既存の値はすべて置き換える)
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), DecodeError> {
        let name = name.into();
        let value = value.into();
        self.check(&name, &value)?;
        self.remove(&name);
        self.entries.push((name, value));
        Ok(())
    }

    /// 指定した名前の値をすべて削除
    ///
    /// 削除した場合は true を返す
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.entries.len() != before
    }

    /// エントリー数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 挿入順に (名前, 値) を列挙
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    fn check(&self, name: &str, value: &str) -> Result<(), DecodeError> {
        if !self.validate {
            return Ok(());
        }
        if !is_token(name) {
            return Err(DecodeError::InvalidHeaderName(name.to_string()));
        }
        if !is_field_value(value) {
            return Err(DecodeError::InvalidHeaderValue {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}
