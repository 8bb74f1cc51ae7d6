//! Formatter Module
//!
//! セル値のフォーマット処理を提供するモジュール。
//! 型の推論はcalamineに任せ、ここでは表示文字列への変換のみを行います。

use chrono::{NaiveDateTime, Timelike};

use crate::api::DateFormat;
use crate::types::CellValue;

/// セルフォーマッター
///
/// セル値のフォーマット処理のファサードとして機能します。
#[derive(Debug)]
pub(crate) struct CellFormatter {
    /// 日付フォーマッター
    date_formatter: DateFormatter,

    /// 数値フォーマッター
    number_formatter: NumberFormatter,
}

impl CellFormatter {
    /// 指定された日付形式でCellFormatterを生成
    pub fn new(date_format: DateFormat) -> Self {
        Self {
            date_formatter: DateFormatter { date_format },
            number_formatter: NumberFormatter,
        }
    }

    /// セル値をテーブルセル用の文字列に変換
    ///
    /// 文字列は前後の空白を取り除いた上でMarkdown用にエスケープします。
    ///
    /// # 引数
    ///
    /// * `value` - セル値
    ///
    /// # 戻り値
    ///
    /// フォーマット済み文字列（空セルは空文字列）
    pub fn format_cell(&self, value: &CellValue) -> String {
        match value {
            CellValue::Int(i) => i.to_string(),

            CellValue::Number(n) => self.number_formatter.format(*n),

            CellValue::String(s) => escape_markdown(s.trim()),

            CellValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),

            CellValue::DateTime(dt) => self.date_formatter.format(dt),

            CellValue::Duration(days) => self.date_formatter.format_duration(*days),

            CellValue::Error(e) => e.clone(),

            CellValue::Empty => String::new(),
        }
    }

    /// 1行分のセル値をまとめて変換
    pub fn format_row(&self, row: &[CellValue]) -> Vec<String> {
        row.iter().map(|value| self.format_cell(value)).collect()
    }
}

impl Default for CellFormatter {
    fn default() -> Self {
        Self::new(DateFormat::default())
    }
}

/// Markdown特殊文字をエスケープ
///
/// パイプはセル区切りと衝突するため`\|`に、改行は`<br>`に置き換えます。
pub(crate) fn escape_markdown(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
}

/// 日付フォーマッター
///
/// calamineが解決した日時を文字列に変換します。
#[derive(Debug)]
pub(crate) struct DateFormatter {
    date_format: DateFormat,
}

impl DateFormatter {
    /// 日時をフォーマット
    ///
    /// `DateFormat::Iso8601`の場合、0時ちょうどなら`%Y-%m-%d`、
    /// それ以外は`%Y-%m-%d %H:%M:%S`を使用します。
    pub fn format(&self, datetime: &NaiveDateTime) -> String {
        match &self.date_format {
            DateFormat::Iso8601 => {
                if datetime.num_seconds_from_midnight() == 0 {
                    datetime.format("%Y-%m-%d").to_string()
                } else {
                    datetime.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            }
            DateFormat::Custom(pattern) => datetime.format(pattern).to_string(),
        }
    }

    /// 経過時間（日単位）を`H:MM:SS`形式でフォーマット
    pub fn format_duration(&self, days: f64) -> String {
        let total_seconds = (days * 86_400.0).round() as i64;
        let sign = if total_seconds < 0 { "-" } else { "" };
        let total_seconds = total_seconds.abs();

        format!(
            "{}{}:{:02}:{:02}",
            sign,
            total_seconds / 3600,
            (total_seconds % 3600) / 60,
            total_seconds % 60
        )
    }
}

/// 数値フォーマッター
///
/// 整数値の浮動小数点数は小数部なしで、それ以外は最短の往復可能表現で出力します。
#[derive(Debug)]
pub(crate) struct NumberFormatter;

impl NumberFormatter {
    /// 数値をフォーマット
    pub fn format(&self, value: f64) -> String {
        // f64のDisplayは整数値を"1"のように出力する
        value.to_string()
    }
}
