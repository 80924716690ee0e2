use crate::error::ConfigError;

/// デコーダーの設定
///
/// 生成時に与え、デコーダーの生存期間中は変更しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// スタートラインの最大長 (デフォルト: 4096)
    ///
    /// HTTP リクエストでは超過すると不正メッセージになる。
    /// RTSP レスポンスでは超過分がフィールドに蓄積されないだけで、行の走査は止まらない。
    /// チャンクサイズ行の最大長にも使う。
    pub max_initial_line_length: usize,
    /// ヘッダーブロック (トレーラー含む) の最大長 (デフォルト: 8192)
    pub max_header_size: usize,
    /// ボディセグメントの最大長 (デフォルト: 8192)
    ///
    /// HTTP リクエストではこれより大きいボディを分割して出力する。
    /// RTSP レスポンスでは最大 Content-Length として扱い、超過は拒否する。
    #[doc(alias = "max_content_length")]
    pub max_chunk_size: usize,
    /// ヘッダー名/値をトークン文法で検証するか (デフォルト: true)
    pub validate_headers: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_initial_line_length: 4096,
            max_header_size: 8192,
            max_chunk_size: 8192,
            validate_headers: true,
        }
    }
}

impl DecoderConfig {
    /// 制限なしの設定を作成
    pub fn unlimited() -> Self {
        Self {
            max_initial_line_length: usize::MAX,
            max_header_size: usize::MAX,
            max_chunk_size: usize::MAX,
            validate_headers: true,
        }
    }

    /// 設定値を検証
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_initial_line_length == 0 {
            return Err(ConfigError::Zero {
                field: "max_initial_line_length",
            });
        }
        if self.max_header_size == 0 {
            return Err(ConfigError::Zero {
                field: "max_header_size",
            });
        }
        if self.max_chunk_size == 0 {
            return Err(ConfigError::Zero {
                field: "max_chunk_size",
            });
        }
        Ok(())
    }
}
