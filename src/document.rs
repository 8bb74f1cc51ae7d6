//! Document Module
//!
//! 変換結果のMarkdownドキュメント（タイトルとシートごとのセクション）を表現し、
//! UTF-8テキストとして出力します。

use std::io::{self, Write};

use crate::api::TableStyle;
use crate::grid::LogicalGrid;

/// ワークシート1枚分のセクション
///
/// 見出し（シート名）と、テーブルまたは空の本文からなります。
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    heading: String,
    table: Option<LogicalGrid>,
}

impl Section {
    pub(crate) fn new(heading: impl Into<String>, table: Option<LogicalGrid>) -> Self {
        Self {
            heading: heading.into(),
            table,
        }
    }

    /// 見出しテキスト（シート名そのもの）
    pub fn heading(&self) -> &str {
        &self.heading
    }

    /// テーブルを持つかどうか（空のシートでは`false`）
    pub fn has_table(&self) -> bool {
        self.table.is_some()
    }

    /// 列名（テーブルがない場合は空）
    pub fn column_names(&self) -> &[String] {
        self.table.as_ref().map(LogicalGrid::header).unwrap_or(&[])
    }

    /// 列数
    pub fn column_count(&self) -> usize {
        self.table.as_ref().map(LogicalGrid::col_count).unwrap_or(0)
    }

    /// データ行数（ヘッダー行を除く）
    pub fn data_row_count(&self) -> usize {
        self.table
            .as_ref()
            .map(LogicalGrid::data_row_count)
            .unwrap_or(0)
    }

    fn write_to<W: Write>(&self, writer: &mut W, style: TableStyle) -> io::Result<()> {
        writeln!(writer, "## {}", self.heading)?;
        writeln!(writer)?;

        if let Some(ref table) = self.table {
            table.render_markdown(writer, style)?;
            writeln!(writer)?;
        }

        Ok(())
    }
}

/// 変換結果のMarkdownドキュメント
///
/// 一度だけ書き出される派生データで、生成後に変更されることはありません。
///
/// ```text
/// # <title>
///
/// ## <sheet 1>
///
/// | col1 | col2 |
/// | --- | --- |
/// | v1 | v2 |
///
/// ## <sheet 2>
/// ...
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownDocument {
    title: String,
    sections: Vec<Section>,
    style: TableStyle,
}

impl MarkdownDocument {
    pub(crate) fn new(title: impl Into<String>, sections: Vec<Section>, style: TableStyle) -> Self {
        Self {
            title: title.into(),
            sections,
            style,
        }
    }

    /// トップレベル見出しのテキスト
    pub fn title(&self) -> &str {
        &self.title
    }

    /// ワークシート順のセクション
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// ドキュメントをライターに書き出す
    ///
    /// 書き込みエラーはそのまま返します。フラッシュは呼び出し元の責務です。
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "# {}", self.title)?;
        writeln!(writer)?;

        for section in &self.sections {
            section.write_to(writer, self.style)?;
        }

        Ok(())
    }

    /// ドキュメントを文字列として取得
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        // Vec<u8>への書き込みは失敗しない
        let _ = self.write_to(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::CellFormatter;
    use crate::types::{CellValue, Worksheet};

    fn section_from(name: &str, rows: Vec<Vec<CellValue>>) -> Section {
        let sheet = Worksheet::new(name, rows);
        Section::new(name, LogicalGrid::build(&sheet, &CellFormatter::default()))
    }

    fn text(s: &str) -> CellValue {
        CellValue::String(s.to_string())
    }

    #[test]
    fn test_render_two_sheets() {
        let q1 = section_from(
            "Q1",
            vec![
                vec![text("Name"), text("Score")],
                vec![text("A"), CellValue::Number(1.0)],
                vec![text("B"), CellValue::Number(2.0)],
            ],
        );
        let q2 = section_from("Q2", vec![vec![text("Name")], vec![text("C")]]);

        let document = MarkdownDocument::new("Scores", vec![q1, q2], TableStyle::Compact);

        assert_eq!(
            document.render(),
            "# Scores\n\n\
             ## Q1\n\n\
             | Name | Score |\n\
             | --- | --- |\n\
             | A | 1 |\n\
             | B | 2 |\n\n\
             ## Q2\n\n\
             | Name |\n\
             | --- |\n\
             | C |\n\n"
        );
    }

    #[test]
    fn test_render_empty_sheet_has_heading_only() {
        let empty = section_from("空白", vec![]);
        assert!(!empty.has_table());
        assert_eq!(empty.column_count(), 0);
        assert_eq!(empty.data_row_count(), 0);
        assert!(empty.column_names().is_empty());

        let document = MarkdownDocument::new("市政业绩", vec![empty], TableStyle::Compact);
        assert_eq!(document.render(), "# 市政业绩\n\n## 空白\n\n");
    }

    #[test]
    fn test_section_accessors() {
        let section = section_from(
            "道路",
            vec![vec![text("项目"), text("金额")], vec![text("甲"), CellValue::Int(3)]],
        );
        assert_eq!(section.heading(), "道路");
        assert!(section.has_table());
        assert_eq!(section.column_names(), ["项目", "金额"]);
        assert_eq!(section.column_count(), 2);
        assert_eq!(section.data_row_count(), 1);
    }

    #[test]
    fn test_write_to_matches_render() {
        let document = MarkdownDocument::new(
            "T",
            vec![section_from("S", vec![vec![text("h")]])],
            TableStyle::Aligned,
        );
        let mut buffer = Vec::new();
        document.write_to(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), document.render());
    }
}
