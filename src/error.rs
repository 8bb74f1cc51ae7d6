//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::path::PathBuf;

use thiserror::Error;

/// xlsx2mdクレート全体で使用するエラー型
///
/// 変換は一度きりの処理であり、いずれのエラーも呼び出し元へそのまま伝播し、
/// 処理を中断します。リトライや部分的な出力の復旧は行いません。
///
/// # エラーの種類
///
/// - `InputNotFound`: 入力ファイルが存在しない
/// - `Io`: 入力の読み込み中に発生したI/Oエラー
/// - `Parse`: スプレッドシートとして解析できない（calamine由来）
/// - `OutputWrite`: 出力ファイルを書き込めない
/// - `OutputStream`: 出力ライターに書き込めない
/// - `Config`: 設定の検証に失敗した
///
/// # 使用例
///
/// ```rust,no_run
/// use std::path::Path;
/// use xlsx2md::{ConvertError, ConverterBuilder};
///
/// # fn main() -> Result<(), ConvertError> {
/// let converter = ConverterBuilder::new().build()?;
/// match converter.convert_file(Path::new("missing.xlsx"), Path::new("out.md")) {
///     Err(ConvertError::InputNotFound { path }) => {
///         eprintln!("no such file: {}", path.display());
///     }
///     other => {
///         other?;
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Error, Debug)]
pub enum ConvertError {
    /// 入力ファイルが存在しない
    ///
    /// `Converter::convert_file()`が入力パスを開く際に
    /// `std::io::ErrorKind::NotFound`を受け取った場合に使用されます。
    /// この場合、出力ファイルは作成も変更もされません。
    #[error("Input file not found: {}", .path.display())]
    InputNotFound {
        /// 見つからなかった入力パス
        path: PathBuf,
    },

    /// 入力の読み込み中に発生したI/Oエラー
    ///
    /// 権限不足など、`InputNotFound`以外の読み込み失敗です。
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// スプレッドシートの解析中に発生したエラー
    ///
    /// 入力がXLSX/XLSB/XLS/ODSのいずれとしても読めない場合や、
    /// ファイルが破損している場合に発生します。
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// 出力ファイルの作成・書き込みに失敗したエラー
    ///
    /// 書き込み権限がない、ディスクが一杯、親ディレクトリが存在しないなど。
    #[error("Failed to write output file {}: {source}", .path.display())]
    OutputWrite {
        /// 書き込み先のパス
        path: PathBuf,
        /// 元のI/Oエラー
        #[source]
        source: std::io::Error,
    },

    /// 出力ライターへの書き込みに失敗したエラー
    ///
    /// `Converter::convert()`に渡されたライターが書き込みまたはフラッシュで
    /// 失敗した場合に発生します。ファイルパスを持たない出力先用です。
    #[error("Failed to write output: {0}")]
    OutputStream(#[source] std::io::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。例えば、カスタム日付形式が不正な場合や、
    /// タイトルが空白のみの場合などです。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use xlsx2md::{ConvertError, ConverterBuilder, DateFormat};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Q".to_string()))
    ///     .build();
    ///
    /// if let Err(ConvertError::Config(msg)) = result {
    ///     println!("設定エラー: {}", msg);
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConvertError {
    /// 入力を開く際のI/Oエラーを分類する
    ///
    /// `NotFound`は`InputNotFound`に、それ以外は`Io`に変換します。
    pub(crate) fn from_input_io(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            ConvertError::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConvertError::Io(err)
        }
    }

    /// 出力先へのI/Oエラーを`OutputWrite`に包む
    pub(crate) fn output_write(path: &std::path::Path, source: std::io::Error) -> Self {
        ConvertError::OutputWrite {
            path: path.to_path_buf(),
            source,
        }
    }
}
