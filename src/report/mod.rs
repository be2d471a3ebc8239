pub mod excel;

use chrono::{DateTime, FixedOffset, ParseError};

use crate::threads::{
    insights::{Metric, MetricSet},
    post::Post,
};

const SOURCE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";
const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Report columns in order, with their sheet titles
pub const COLUMNS: [(Column, &str); 10] = [
    (Column::Id, "貼文ID"),
    (Column::CreatedTime, "發布時間"),
    (Column::Text, "內文"),
    (Column::Metric(Metric::Views), "觀看數"),
    (Column::Metric(Metric::Likes), "按讚數"),
    (Column::Metric(Metric::Replies), "回覆數"),
    (Column::Metric(Metric::Reposts), "轉發數"),
    (Column::Metric(Metric::Quotes), "引用數"),
    (Column::Metric(Metric::Shares), "分享數"),
    (Column::Permalink, "貼文連結"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    CreatedTime,
    Text,
    Metric(Metric),
    Permalink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Number(i64),
    Blank,
}

impl Cell {
    /// Number of characters shown in the sheet
    pub fn width(&self) -> usize {
        match self {
            Self::Text(text) => text.chars().count(),
            Self::Number(number) => number.to_string().len(),
            Self::Blank => 0,
        }
    }
}

/// One post joined with its insights
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub id: String,
    pub created_time: String,
    pub text: String,
    pub metrics: MetricSet,
    pub permalink: String,
}

impl ReportRow {
    pub fn new(post: Post, metrics: MetricSet, offset: FixedOffset) -> Self {
        let created_time = post
            .timestamp
            .as_deref()
            .map(|raw| display_time(raw, offset))
            .unwrap_or_default();
        let text = post.text.as_deref().map(normalize_text).unwrap_or_default();

        Self {
            id: post.id,
            created_time,
            text,
            metrics,
            permalink: post.permalink.unwrap_or_default(),
        }
    }

    pub fn cell(&self, column: Column) -> Cell {
        match column {
            Column::Id => Cell::Text(self.id.clone()),
            Column::CreatedTime => Cell::Text(self.created_time.clone()),
            Column::Text => Cell::Text(self.text.clone()),
            Column::Metric(metric) => self.metrics.get(metric).map_or(Cell::Blank, Cell::Number),
            Column::Permalink => Cell::Text(self.permalink.clone()),
        }
    }

    pub fn cells(&self) -> Vec<Cell> {
        COLUMNS.iter().map(|(column, _)| self.cell(*column)).collect()
    }
}

/// Convert an API timestamp to `offset` local time
pub fn parse_display_time(raw: &str, offset: FixedOffset) -> Result<String, ParseError> {
    let time = DateTime::parse_from_str(raw, SOURCE_TIME_FORMAT)?;
    Ok(time
        .with_timezone(&offset)
        .format(DISPLAY_TIME_FORMAT)
        .to_string())
}

/// Like [`parse_display_time`], but falls back to `raw`
pub fn display_time(raw: &str, offset: FixedOffset) -> String {
    parse_display_time(raw, offset).unwrap_or_else(|_| raw.to_string())
}

pub fn normalize_text(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .trim()
        .to_string()
}
