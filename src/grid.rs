//! Grid Module
//!
//! ワークシートの型付きセルから、ヘッダー行とデータ行からなる
//! 論理テーブルを構築し、Markdownのパイプテーブルとして出力します。

use std::collections::HashMap;
use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::api::TableStyle;
use crate::formatter::CellFormatter;
use crate::types::Worksheet;

/// 区切り行の最小幅（`---`）
const MIN_COLUMN_WIDTH: usize = 3;

/// 論理的なテーブル構造
///
/// 使用範囲の先頭行をヘッダー（列名）、残りをデータ行として保持します。
/// すべての行は`cols`個のセルを持ちます。
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LogicalGrid {
    /// 列名
    header: Vec<String>,

    /// データ行（行 × 列）
    rows: Vec<Vec<String>>,

    /// 列数
    cols: usize,
}

impl LogicalGrid {
    /// ワークシートからテーブルを構築
    ///
    /// # 引数
    ///
    /// * `sheet` - 読み込み済みのワークシート
    /// * `formatter` - セルフォーマッター
    ///
    /// # 戻り値
    ///
    /// * `Some(LogicalGrid)` - 使用範囲にセルが存在する場合
    /// * `None` - シートが空の場合（見出しのみ出力する）
    pub fn build(sheet: &Worksheet, formatter: &CellFormatter) -> Option<Self> {
        if sheet.is_empty() {
            return None;
        }

        let cols = sheet.col_count();
        let mut rows = sheet.rows.iter().map(|row| formatter.format_row(row));

        let header = Self::normalize_header(rows.next()?);
        let rows: Vec<Vec<String>> = rows.collect();

        Some(Self { header, rows, cols })
    }

    /// 列名を正規化（内部ヘルパー）
    ///
    /// 空の列名は`Unnamed: <列番号>`に置き換えます。重複する列名には
    /// 出現順に`.1`、`.2`…を付加し、付加した名前がさらに重複する場合は
    /// その名前に対しても同じ規則を繰り返します（`a`, `a.1`, `a` → `a`, `a.1`, `a.1.1`）。
    fn normalize_header(raw: Vec<String>) -> Vec<String> {
        let mut counts: HashMap<String, usize> = HashMap::with_capacity(raw.len());
        let mut header = Vec::with_capacity(raw.len());

        for (col_idx, name) in raw.into_iter().enumerate() {
            let mut name = if name.is_empty() {
                format!("Unnamed: {}", col_idx)
            } else {
                name
            };

            let mut count = counts.get(&name).copied().unwrap_or(0);
            while count > 0 {
                counts.insert(name.clone(), count + 1);
                name = format!("{}.{}", name, count);
                count = counts.get(&name).copied().unwrap_or(0);
            }

            counts.insert(name.clone(), count + 1);
            header.push(name);
        }

        header
    }

    /// Markdownテーブルとして出力
    ///
    /// ヘッダー行、区切り行、データ行の順に1行ずつ出力します。
    /// 各行は改行で終わります。
    ///
    /// # 引数
    ///
    /// * `writer` - 出力先のライター
    /// * `style` - テーブルのレイアウト
    pub fn render_markdown<W: Write>(&self, writer: &mut W, style: TableStyle) -> io::Result<()> {
        match style {
            TableStyle::Compact => {
                Self::write_row(writer, &self.header, None)?;
                let separator = vec!["-".repeat(MIN_COLUMN_WIDTH); self.cols];
                Self::write_row(writer, &separator, None)?;
                for row in &self.rows {
                    Self::write_row(writer, row, None)?;
                }
            }
            TableStyle::Aligned => {
                let col_widths = self.calculate_column_widths();
                Self::write_row(writer, &self.header, Some(&col_widths))?;
                writeln!(writer, "{}", Self::generate_separator(&col_widths))?;
                for row in &self.rows {
                    Self::write_row(writer, row, Some(&col_widths))?;
                }
            }
        }

        Ok(())
    }

    /// 1行を`| a | b |`形式で出力（内部ヘルパー）
    ///
    /// `widths`が指定された場合は、表示幅に基づいて右側を空白で埋めます。
    fn write_row<W: Write>(
        writer: &mut W,
        cells: &[String],
        widths: Option<&[usize]>,
    ) -> io::Result<()> {
        write!(writer, "|")?;

        for (col_idx, content) in cells.iter().enumerate() {
            write!(writer, " {}", content)?;
            if let Some(widths) = widths {
                let padding = widths[col_idx].saturating_sub(content.width());
                write!(writer, "{}", " ".repeat(padding))?;
            }
            write!(writer, " |")?;
        }

        writeln!(writer)
    }

    /// 列幅を計算（内部ヘルパー）
    ///
    /// 各列の最大表示幅を返します（最小3）。全角文字は表示幅2として計算します。
    fn calculate_column_widths(&self) -> Vec<usize> {
        let mut widths = vec![MIN_COLUMN_WIDTH; self.cols];

        for row in std::iter::once(&self.header).chain(self.rows.iter()) {
            for (col_idx, content) in row.iter().enumerate() {
                widths[col_idx] = widths[col_idx].max(content.width());
            }
        }

        widths
    }

    /// 列幅に合わせた区切り行を生成（内部ヘルパー）
    fn generate_separator(col_widths: &[usize]) -> String {
        let dashes: Vec<String> = col_widths.iter().map(|&width| "-".repeat(width)).collect();
        format!("| {} |", dashes.join(" | "))
    }

    /// 列名を取得
    pub(crate) fn header(&self) -> &[String] {
        &self.header
    }

    /// データ行数を取得
    pub(crate) fn data_row_count(&self) -> usize {
        self.rows.len()
    }

    /// 列数を取得
    pub(crate) fn col_count(&self) -> usize {
        self.cols
    }
}
