//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

use crate::api::{DateFormat, TableStyle};
use crate::document::{MarkdownDocument, Section};
use crate::error::ConvertError;
use crate::formatter::CellFormatter;
use crate::grid::LogicalGrid;
use crate::parser::WorkbookParser;

/// タイトルが指定されず、入力パスもない場合に使用するタイトル
pub const DEFAULT_TITLE: &str = "Workbook";

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone, Default)]
pub(crate) struct ConversionConfig {
    /// トップレベル見出し（Noneの場合は入力ファイル名から決定）
    pub title: Option<String>,

    /// 日付形式
    pub date_format: DateFormat,

    /// テーブルのレイアウト
    pub table_style: TableStyle,
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsx2md::{ConverterBuilder, DateFormat, TableStyle};
///
/// # fn main() -> Result<(), xlsx2md::ConvertError> {
/// let converter = ConverterBuilder::new()
///     .with_title("市政业绩")
///     .with_date_format(DateFormat::Custom("%Y/%m/%d".to_string()))
///     .with_table_style(TableStyle::Aligned)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - タイトル: 入力ファイル名（拡張子なし）、不明な場合は`Workbook`
    /// - 日付形式: ISO 8601
    /// - テーブル: `TableStyle::Compact`
    pub fn new() -> Self {
        Self::default()
    }

    /// トップレベル見出しのテキストを指定する
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    /// 日付の出力形式を指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsx2md::{ConverterBuilder, DateFormat};
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Y年%m月%d日".to_string()));
    /// ```
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.config.date_format = format;
        self
    }

    /// テーブルのレイアウトを指定する
    pub fn with_table_style(mut self, style: TableStyle) -> Self {
        self.config.table_style = style;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `ConvertError::Config(String)`: 設定の検証に失敗した場合
    ///   * タイトルが空白のみ
    ///   * カスタム日付形式が空、または不正な書式指定子を含む
    pub fn build(self) -> Result<Converter, ConvertError> {
        // 1. タイトルの検証
        if let Some(ref title) = self.config.title {
            if title.trim().is_empty() {
                return Err(ConvertError::Config("Title must not be blank".to_string()));
            }
        }

        // 2. カスタム日付形式の検証
        if let DateFormat::Custom(ref format_str) = self.config.date_format {
            validate_date_format(format_str)?;
        }

        Ok(Converter::new(self.config))
    }
}

/// chronoの書式文字列を検証（内部ヘルパー）
///
/// 不正な指定子を含む書式でフォーマットするとパニックするため、事前に拒否します。
fn validate_date_format(format_str: &str) -> Result<(), ConvertError> {
    if format_str.is_empty() {
        return Err(ConvertError::Config(
            "Invalid date format string: ''".to_string(),
        ));
    }

    let invalid = || ConvertError::Config(format!("Invalid date format string: '{}'", format_str));

    if StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    // タイムゾーン指定子（%Z、%zなど）は解析できても、NaiveDateTimeの書式化で失敗する
    let sample = NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(invalid)?;
    let mut rendered = String::new();
    write!(rendered, "{}", sample.format(format_str)).map_err(|_| invalid())?;

    Ok(())
}

/// 変換処理のファサード
///
/// スプレッドシートをMarkdownに変換するためのメインエントリーポイントです。
/// 入力全体をメモリに読み込んでから変換し、その後で出力を書き出します。
///
/// # 使用例
///
/// ```rust,no_run
/// use std::path::Path;
/// use xlsx2md::ConverterBuilder;
///
/// # fn main() -> Result<(), xlsx2md::ConvertError> {
/// let converter = ConverterBuilder::new().build()?;
/// converter.convert_file(Path::new("市政业绩.xlsx"), Path::new("市政业绩.md"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// セルフォーマッター
    formatter: CellFormatter,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self {
            formatter: CellFormatter::new(config.date_format.clone()),
            config,
        }
    }

    /// スプレッドシートを`MarkdownDocument`に変換
    ///
    /// # 処理フロー
    ///
    /// 1. 入力全体をメモリに読み込み、ワークブックを開く
    /// 2. シートをドキュメント順に読み込む
    /// 3. 各シートのテーブルを構築する
    pub fn convert_to_document<R: Read>(&self, input: R) -> Result<MarkdownDocument, ConvertError> {
        let title = self.config.title.as_deref().unwrap_or(DEFAULT_TITLE);
        self.build_document(input, title)
    }

    fn build_document<R: Read>(
        &self,
        input: R,
        title: &str,
    ) -> Result<MarkdownDocument, ConvertError> {
        let mut parser = WorkbookParser::from_reader(input)?;
        let worksheets = parser.parse_all()?;

        let sections = worksheets
            .iter()
            .map(|sheet| {
                let table = LogicalGrid::build(sheet, &self.formatter);
                match table {
                    Some(ref grid) => tracing::debug!(
                        sheet = %sheet.name,
                        sheet_rows = sheet.row_count(),
                        data_rows = grid.data_row_count(),
                        cols = grid.col_count(),
                        "built table"
                    ),
                    None => tracing::warn!(sheet = %sheet.name, "worksheet is empty"),
                }
                Section::new(sheet.name.clone(), table)
            })
            .collect();

        Ok(MarkdownDocument::new(
            title,
            sections,
            self.config.table_style,
        ))
    }

    /// スプレッドシートをMarkdownに変換してライターへ書き出す
    ///
    /// # 引数
    ///
    /// * `input` - スプレッドシートを読み込むためのリーダー
    /// * `output` - Markdown出力先のライター
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use std::io::Cursor;
    /// use xlsx2md::ConverterBuilder;
    ///
    /// # fn main() -> Result<(), xlsx2md::ConvertError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let excel_data: Vec<u8> = vec![]; // スプレッドシートのバイト列
    /// let mut markdown_output = Vec::new();
    /// converter.convert(Cursor::new(excel_data), &mut markdown_output)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert<R: Read, W: Write>(&self, input: R, output: W) -> Result<(), ConvertError> {
        let document = self.convert_to_document(input)?;

        let mut writer = BufWriter::new(output);
        document
            .write_to(&mut writer)
            .and_then(|_| writer.flush())
            .map_err(ConvertError::OutputStream)?;

        Ok(())
    }

    /// スプレッドシートをMarkdown形式の文字列に変換
    pub fn convert_to_string<R: Read>(&self, input: R) -> Result<String, ConvertError> {
        Ok(self.convert_to_document(input)?.render())
    }

    /// 入力ファイルを読み込み、`MarkdownDocument`に変換
    ///
    /// タイトルが設定されていない場合は、入力ファイル名（拡張子なし）を使用します。
    /// ファイルハンドルは変換が終わった時点で閉じられます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(MarkdownDocument)` - 変換結果
    /// * `Err(ConvertError::InputNotFound)` - 入力ファイルが存在しない場合
    /// * `Err(ConvertError::Io)` - 入力ファイルを読み込めない場合
    /// * `Err(ConvertError::Parse)` - 入力がスプレッドシートとして解析できない場合
    pub fn load_document(&self, input_path: &Path) -> Result<MarkdownDocument, ConvertError> {
        let input =
            File::open(input_path).map_err(|e| ConvertError::from_input_io(input_path, e))?;
        let title = self
            .config
            .title
            .clone()
            .unwrap_or_else(|| title_from_path(input_path));

        self.build_document(input, &title)
    }

    /// ファイルからファイルへ変換
    ///
    /// 変換をすべてメモリ上で終えてから出力ファイルを作成（または上書き）します。
    /// 入力が存在しない、または解析できない場合、出力ファイルは作成も変更もされません。
    ///
    /// # 戻り値
    ///
    /// * `Ok(MarkdownDocument)` - 書き出したドキュメント
    /// * `Err(ConvertError::InputNotFound)` - 入力ファイルが存在しない場合
    /// * `Err(ConvertError::Parse)` - 入力がスプレッドシートとして解析できない場合
    /// * `Err(ConvertError::OutputWrite)` - 出力ファイルに書き込めない場合
    pub fn convert_file(
        &self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<MarkdownDocument, ConvertError> {
        let document = self.load_document(input_path)?;

        let file =
            File::create(output_path).map_err(|e| ConvertError::output_write(output_path, e))?;
        let mut writer = BufWriter::new(file);
        document
            .write_to(&mut writer)
            .and_then(|_| writer.flush())
            .map_err(|e| ConvertError::output_write(output_path, e))?;

        tracing::info!(
            output = %output_path.display(),
            sheets = document.sections().len(),
            "wrote markdown document"
        );

        Ok(document)
    }
}

/// 入力パスからタイトルを決定（拡張子を除いたファイル名）
pub(crate) fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converter_builder_new() {
        let builder = ConverterBuilder::new();
        assert!(builder.config.title.is_none());
        assert_eq!(builder.config.date_format, DateFormat::Iso8601);
        assert_eq!(builder.config.table_style, TableStyle::Compact);
    }

    #[test]
    fn test_builder_method_chaining() {
        let builder = ConverterBuilder::new()
            .with_title("市政业绩")
            .with_date_format(DateFormat::Custom("%Y/%m/%d".to_string()))
            .with_table_style(TableStyle::Aligned);

        assert_eq!(builder.config.title.as_deref(), Some("市政业绩"));
        assert!(matches!(
            builder.config.date_format,
            DateFormat::Custom(ref s) if s == "%Y/%m/%d"
        ));
        assert_eq!(builder.config.table_style, TableStyle::Aligned);
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_build_with_blank_title() {
        let result = ConverterBuilder::new().with_title("   ").build();
        match result {
            Err(ConvertError::Config(msg)) => assert!(msg.contains("Title")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_build_with_valid_custom_date_format() {
        let result = ConverterBuilder::new()
            .with_date_format(DateFormat::Custom("%Y年%m月%d日 %H:%M".to_string()))
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_build_with_empty_custom_date_format() {
        let result = ConverterBuilder::new()
            .with_date_format(DateFormat::Custom(String::new()))
            .build();
        match result {
            Err(ConvertError::Config(msg)) => assert!(msg.contains("Invalid date format")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_build_with_unknown_specifier() {
        let result = ConverterBuilder::new()
            .with_date_format(DateFormat::Custom("%Y-%Q".to_string()))
            .build();
        match result {
            Err(ConvertError::Config(msg)) => assert!(msg.contains("%Y-%Q")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_build_with_timezone_specifiers() {
        for pattern in ["%Y %Z", "%Y-%m-%d %z", "%H:%M%:z"] {
            let result = ConverterBuilder::new()
                .with_date_format(DateFormat::Custom(pattern.to_string()))
                .build();
            match result {
                Err(ConvertError::Config(msg)) => assert!(msg.contains(pattern)),
                _ => panic!("Expected Config error for {}", pattern),
            }
        }
    }

    #[test]
    fn test_title_from_path() {
        assert_eq!(title_from_path(Path::new("市政业绩.xlsx")), "市政业绩");
        assert_eq!(title_from_path(Path::new("/data/report.v2.xlsx")), "report.v2");
        assert_eq!(title_from_path(Path::new("/")), DEFAULT_TITLE);
    }

    #[test]
    fn test_convert_to_string_with_invalid_input() {
        let converter = ConverterBuilder::new().build().unwrap();
        let result = converter.convert_to_string(std::io::Cursor::new(Vec::<u8>::new()));
        assert!(matches!(result, Err(ConvertError::Parse(_))));
    }

    #[test]
    fn test_convert_file_missing_input_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.md");
        let converter = ConverterBuilder::new().build().unwrap();

        let result = converter.convert_file(&dir.path().join("missing.xlsx"), &output);

        assert!(matches!(result, Err(ConvertError::InputNotFound { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_load_document_rejects_non_spreadsheet() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.xlsx");
        std::fs::write(&input, "plain text").unwrap();
        let converter = ConverterBuilder::new().build().unwrap();

        let result = converter.load_document(&input);

        assert!(matches!(result, Err(ConvertError::Parse(_))));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }
    }

    fn single_sheet_workbook() -> Vec<u8> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "Name").unwrap();
        worksheet.write_string(1, 0, "A").unwrap();
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_convert_reports_writer_failure_as_output_error() {
        let converter = ConverterBuilder::new().build().unwrap();

        let result = converter.convert(std::io::Cursor::new(single_sheet_workbook()), FailingWriter);

        match result {
            Err(ConvertError::OutputStream(e)) => assert_eq!(e.to_string(), "disk full"),
            other => panic!("Expected OutputStream error, got {:?}", other),
        }
    }
}
