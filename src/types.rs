//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::NaiveDateTime;

/// セルの値を表す列挙型
///
/// calamineが推論した型をそのまま保持します。
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CellValue {
    /// 整数（XLS/XLSBで整数として格納されたもの）
    Int(i64),

    /// 数値（f64）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// 日時（日付書式が適用されたセル）
    DateTime(NaiveDateTime),

    /// 経過時間（日単位のシリアル値）
    Duration(f64),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

/// 1枚のワークシートの内容
///
/// 使用範囲（空でないセルを覆う最小の矩形）を行優先で保持します。
/// すべての行は同じ列数を持ちます。
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Worksheet {
    /// シート名
    pub name: String,

    /// セルデータ（行 × 列）
    pub rows: Vec<Vec<CellValue>>,
}

impl Worksheet {
    /// 新しいワークシートを生成
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// 行数（ヘッダー行を含む）
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 列数
    pub fn col_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// 使用範囲が空かどうか
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.iter().all(CellValue::is_empty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_is_empty() {
        assert!(CellValue::Empty.is_empty());
        assert!(!CellValue::Number(42.0).is_empty());
        assert!(!CellValue::Int(0).is_empty());
        assert!(!CellValue::String(String::new()).is_empty());
        assert!(!CellValue::Bool(false).is_empty());
        assert!(!CellValue::Error("#N/A".to_string()).is_empty());
    }

    #[test]
    fn test_worksheet_dimensions() {
        let sheet = Worksheet::new(
            "Q1",
            vec![
                vec![
                    CellValue::String("Name".to_string()),
                    CellValue::String("Score".to_string()),
                ],
                vec![CellValue::String("A".to_string()), CellValue::Number(1.0)],
                vec![CellValue::String("B".to_string()), CellValue::Number(2.0)],
            ],
        );

        assert_eq!(sheet.name, "Q1");
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.col_count(), 2);
        assert!(!sheet.is_empty());
    }

    #[test]
    fn test_worksheet_empty() {
        let sheet = Worksheet::new("空", vec![]);
        assert_eq!(sheet.row_count(), 0);
        assert_eq!(sheet.col_count(), 0);
        assert!(sheet.is_empty());

        let blank = Worksheet::new("blank", vec![vec![CellValue::Empty, CellValue::Empty]]);
        assert!(blank.is_empty());
    }
}
