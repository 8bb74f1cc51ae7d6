//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// 日付の出力形式
///
/// スプレッドシートの日付セルをMarkdownに変換する際の出力形式を指定します。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DateFormat {
    /// ISO 8601形式（デフォルト）
    ///
    /// 時刻部分が0時ちょうどの場合は日付のみ、それ以外は日時を出力します。
    ///
    /// 例: `2025-11-20`、`2025-11-20 13:45:00`
    #[default]
    Iso8601,

    /// カスタム形式（chrono互換フォーマット文字列）
    ///
    /// # フォーマット指定子（主要なもの）
    ///
    /// - `%Y`: 4桁の年（例: 2025）
    /// - `%m`: 2桁の月（01-12）
    /// - `%d`: 2桁の日（01-31）
    /// - `%H`: 24時間形式の時（00-23）
    /// - `%M`: 分（00-59）
    /// - `%S`: 秒（00-59）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsx2md::{ConverterBuilder, DateFormat};
    ///
    /// # fn main() -> Result<(), xlsx2md::ConvertError> {
    /// let converter = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Y年%m月%d日".to_string()))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    Custom(String),
}

/// パイプテーブルのレイアウト
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum TableStyle {
    /// 最小限の空白で出力（デフォルト）
    ///
    /// ```markdown
    /// | Name | Score |
    /// | --- | --- |
    /// | A | 1 |
    /// ```
    #[default]
    Compact,

    /// 列幅を揃えて出力
    ///
    /// 各列を最も幅の広いセルに合わせて空白で埋めます。
    /// 全角文字（CJKなど）は表示幅2として計算します。
    ///
    /// ```markdown
    /// | Name | Score |
    /// | ---- | ----- |
    /// | A    | 1     |
    /// ```
    Aligned,
}
