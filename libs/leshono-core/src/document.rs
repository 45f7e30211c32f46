//! Raw course document as produced by the textbook scraper.
//!
//! # Format
//! ```json
//! {
//!   "name": "Leshono",
//!   "lessons": [
//!     { "id": "1.1", "title": "The alphabet | ܐܠܦܒܝܬ", "blocks": [
//!       { "type": "paragraph", "text": "..." },
//!       { "type": "table_row", "cells": ["olaf", "-", "ܐ"] }
//!     ]}
//!   ]
//! }
//! ```
//!
//! Block kinds other than `paragraph` and `table_row` are kept as
//! [`Block::Other`] and ignored downstream. Fields of the wrong type read as
//! empty, and pages without a usable id are dropped.

use crate::error::{CourseError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The whole scraped document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseDocument {
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub language: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient_pages")]
    pub lessons: Vec<RawLessonDocument>,
}

impl CourseDocument {
    /// Parse a document from JSON text.
    ///
    /// Invalid JSON is the only failure the course pipeline propagates. Any
    /// value that parses is accepted and its structural gaps are tolerated.
    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).map_err(CourseError::InvalidDocument)?;
        Ok(Self::from_value(value))
    }

    /// Read a document from an already parsed value.
    pub fn from_value(value: Value) -> Self {
        match Self::deserialize(value) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(error = %e, "course document is not an object, using an empty one");
                Self::default()
            }
        }
    }
}

/// One scraped page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLessonDocument {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_blocks")]
    pub blocks: Vec<Block>,
}

/// A content block of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph {
        #[serde(default, deserialize_with = "lenient_text")]
        text: String,
    },
    TableRow {
        #[serde(default, deserialize_with = "lenient_cells")]
        cells: Vec<String>,
    },
    #[serde(other)]
    Other,
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph { text: text.into() }
    }

    pub fn table_row<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::TableRow {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }
}

/// Text of a scalar; null and containers have none.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Array items, or nothing when the value is not an array.
fn array_items(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(value).unwrap_or_default())
}

fn lenient_opt_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(value))
}

fn lenient_cells<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(array_items(value)
        .into_iter()
        .map(|cell| scalar_text(cell).unwrap_or_default())
        .collect())
}

fn lenient_blocks<'de, D>(deserializer: D) -> std::result::Result<Vec<Block>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(array_items(value)
        .into_iter()
        .map(|block| Block::deserialize(block).unwrap_or(Block::Other))
        .collect())
}

fn lenient_pages<'de, D>(deserializer: D) -> std::result::Result<Vec<RawLessonDocument>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let items = array_items(value);
    let total = items.len();

    let pages: Vec<RawLessonDocument> = items
        .into_iter()
        .filter_map(|item| RawLessonDocument::deserialize(item).ok())
        .filter(|page| !page.id.trim().is_empty())
        .collect();

    if pages.len() < total {
        tracing::warn!(dropped = total - pages.len(), "skipping pages without an id");
    }
    Ok(pages)
}
