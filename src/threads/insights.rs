use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::Deserialize;
use serde_json::Value;

/// Engagement metrics reported for a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    Views,
    Likes,
    Replies,
    Reposts,
    Quotes,
    Shares,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Self::Views,
        Self::Likes,
        Self::Replies,
        Self::Reposts,
        Self::Quotes,
        Self::Shares,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Views => "views",
            Self::Likes => "likes",
            Self::Replies => "replies",
            Self::Reposts => "reposts",
            Self::Quotes => "quotes",
            Self::Shares => "shares",
        }
    }

    /// `views,likes,...` as expected by the `metric` query parameter
    pub fn join(metrics: &[Metric]) -> String {
        metrics
            .iter()
            .map(Metric::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str() == s)
            .ok_or_else(|| format!("unknown metric `{}`", s))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricSet(BTreeMap<Metric, i64>);

impl MetricSet {
    pub fn get(&self, metric: Metric) -> Option<i64> {
        self.0.get(&metric).copied()
    }
    pub fn insert(&mut self, metric: Metric, value: i64) {
        self.0.insert(metric, value);
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Metric value for display, blank when missing
    pub fn display(&self, metric: Metric) -> String {
        self.get(metric).map(|v| v.to_string()).unwrap_or_default()
    }
}

impl From<InsightsResponse> for MetricSet {
    fn from(response: InsightsResponse) -> Self {
        let mut set = MetricSet::default();
        for entry in response.data {
            let Ok(metric) = entry.name.parse::<Metric>() else {
                continue;
            };
            // only the first snapshot counts
            if let Some(value) = entry.values.first().and_then(InsightsValue::as_i64) {
                set.insert(metric, value);
            }
        }
        set
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightsResponse {
    #[serde(default)]
    pub data: Vec<InsightsEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightsEntry {
    pub name: String,
    #[serde(default)]
    pub values: Vec<InsightsValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightsValue {
    #[serde(default)]
    pub value: Option<Value>,
}

impl InsightsValue {
    /// Counts only, anything else reads as missing
    pub fn as_i64(&self) -> Option<i64> {
        self.value.as_ref().and_then(Value::as_i64)
    }
}
