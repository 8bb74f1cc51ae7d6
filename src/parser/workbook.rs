//! Workbook Parser
//!
//! calamineのラッパーとして、ワークブックレベルの操作を提供します。

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use std::io::{Cursor, Read, Seek};

use crate::error::ConvertError;
use crate::types::{CellValue, Worksheet};

/// ワークブックパーサー
///
/// 形式はファイル内容から自動判定します（XLSX/XLSM、XLSB、XLS、ODS）。
pub(crate) struct WorkbookParser<RS: Read + Seek> {
    /// calamineのワークブック
    workbook: Sheets<RS>,
}

impl WorkbookParser<Cursor<Vec<u8>>> {
    /// 入力全体をメモリに読み込み、ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - スプレッドシートを読み込むためのリーダー
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(ConvertError::Io)` - 入力の読み込みに失敗した場合
    /// * `Err(ConvertError::Parse)` - スプレッドシートとして解析できない場合
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, ConvertError> {
        let mut buffer = Vec::new();
        let bytes_read = reader.read_to_end(&mut buffer)?;
        tracing::debug!(bytes = bytes_read, "read workbook into memory");

        Self::open(Cursor::new(buffer))
    }
}

impl<RS: Read + Seek + Clone> WorkbookParser<RS> {
    /// ワークブックを開く
    pub fn open(reader: RS) -> Result<Self, ConvertError> {
        let workbook = open_workbook_auto_from_rs(reader)?;
        Ok(Self { workbook })
    }
}

impl<RS: Read + Seek> WorkbookParser<RS> {
    /// すべてのシート名をドキュメント順に取得
    ///
    /// 非表示シートも含みます。
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// シートを読み込み、使用範囲のセルを抽出
    ///
    /// # 引数
    ///
    /// * `sheet_name` - 読み込むシート名
    ///
    /// # 戻り値
    ///
    /// * `Ok(Worksheet)` - 使用範囲を行優先で保持したワークシート
    /// * `Err(ConvertError::Parse)` - シートの解析に失敗した場合
    pub fn parse_sheet(&mut self, sheet_name: &str) -> Result<Worksheet, ConvertError> {
        let range = self.workbook.worksheet_range(sheet_name)?;

        let (height, width) = range.get_size();
        tracing::debug!(
            sheet = sheet_name,
            rows = height,
            cols = width,
            start = ?range.start(),
            "parsed worksheet range"
        );

        let rows = range
            .rows()
            .map(|row| row.iter().map(convert_cell).collect())
            .collect();

        Ok(Worksheet::new(sheet_name, rows))
    }

    /// すべてのシートをドキュメント順に読み込む
    pub fn parse_all(&mut self) -> Result<Vec<Worksheet>, ConvertError> {
        let names = self.sheet_names();
        tracing::debug!(sheets = names.len(), "opened workbook");

        names.iter().map(|name| self.parse_sheet(name)).collect()
    }
}

/// calamineのセル値を`CellValue`に変換
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                CellValue::Duration(dt.as_f64())
            } else {
                // エポック（1900/1904）の扱いはcalamine側で解決済み
                match dt.as_datetime() {
                    Some(datetime) => CellValue::DateTime(datetime),
                    None => CellValue::Number(dt.as_f64()),
                }
            }
        }
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
        // ODSのISO文字列（DateTimeIso / DurationIso）はそのまま文字列として扱う
        other => CellValue::String(other.to_string()),
    }
}


// 実際のワークブックを使うテストは統合テスト（tests/）で実装します。
