//! Parser Module
//!
//! calamineを使用したスプレッドシート解析。
//! ワークブック全体をメモリに読み込み、シート単位で型付きセルを抽出します。

mod workbook;

pub(crate) use workbook::WorkbookParser;
