//! デコード状態の定義

/// デコード状態
///
/// デコーダー呼び出しをまたいで保持される唯一の状態。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodePhase {
    /// スタートライン前の制御文字を読み飛ばし中 (エラーからの再同期先でもある)
    SkipControlCharacters,
    /// スタートライン待ち
    ReadInitialLine,
    /// ヘッダー待ち
    ReadHeaders,
    /// ボディ読み取り中 (Content-Length)
    ReadFixedLengthContent { remaining: u64 },
    /// ボディ読み取り中 (Chunked) - チャンクサイズ行待ち
    ReadChunkSize,
    /// ボディ読み取り中 (Chunked) - チャンクデータ待ち
    ReadChunkedContent { remaining: u64 },
    /// ボディ読み取り中 (Chunked) - チャンクデータ後の改行待ち
    ReadChunkDelimiter,
    /// トレーラーヘッダー待ち
    ReadChunkFooter,
    /// ボディ読み取り中 (接続終了まで)
    ReadVariableLengthContent,
    /// 完了 (次のメッセージへ)
    Done,
    /// 長すぎるスタートラインの残りを次の LF まで破棄中
    DiscardLine,
    /// 不正メッセージ。リセットされるまで入力をすべて破棄する
    BadMessage,
}
