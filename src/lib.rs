//! xlsx2md - Convert every worksheet of a spreadsheet into a Markdown document
//!
//! Each worksheet becomes a level-2 heading followed by its data as a
//! pipe-delimited Markdown table. Sections follow worksheet order under one
//! top-level title. XLSX/XLSM, XLSB, XLS and ODS inputs are read through
//! `calamine`; the format is detected from the file content.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use xlsx2md::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     // Title defaults to the input file stem: "# 市政业绩"
//!     converter.convert_file(Path::new("市政业绩.xlsx"), Path::new("市政业绩.md"))?;
//!
//!     Ok(())
//! }
//! ```
//!
//! For in-memory conversion, pass any reader:
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use xlsx2md::ConverterBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = ConverterBuilder::new().with_title("Report").build()?;
//! let excel_data: Vec<u8> = vec![]; // Your spreadsheet bytes
//! let markdown = converter.convert_to_string(Cursor::new(excel_data))?;
//! println!("{}", markdown);
//! # Ok(())
//! # }
//! ```
//!
//! # Output Shape
//!
//! ```text
//! # Report
//!
//! ## Q1
//!
//! | Name | Score |
//! | --- | --- |
//! | A | 1 |
//! | B | 2 |
//!
//! ## Q2
//! ...
//! ```

mod api;
mod builder;
mod document;
mod error;
mod formatter;
mod grid;
mod parser;
mod types;

// 公開API
pub use api::{DateFormat, TableStyle};
pub use builder::{Converter, ConverterBuilder, DEFAULT_TITLE};
pub use document::{MarkdownDocument, Section};
pub use error::ConvertError;
