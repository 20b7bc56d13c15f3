use serde_json::{Map, Value};
use thiserror::Error;

/// Aggregate statistics published by the backend under `/stats/<metric>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatMetric {
    AnswerCountByChoice,
    AnswerCountByUser,
    ResponseRate,
    AnswerCountByQuestion,
    AnswerRateByChoice,
    AnswerCountByAge,
    MostChosenChoice,
    LeastChosenChoice,
}

impl StatMetric {
    /// Render order of the result page.
    pub const ALL: [StatMetric; 8] = [
        StatMetric::AnswerCountByChoice,
        StatMetric::AnswerCountByUser,
        StatMetric::ResponseRate,
        StatMetric::AnswerCountByQuestion,
        StatMetric::AnswerRateByChoice,
        StatMetric::AnswerCountByAge,
        StatMetric::MostChosenChoice,
        StatMetric::LeastChosenChoice,
    ];

    /// Path segment after `/stats/`.
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            StatMetric::AnswerCountByChoice => "answer_count_by_choice",
            StatMetric::AnswerCountByUser => "answer_count_by_user",
            StatMetric::ResponseRate => "response_rate",
            StatMetric::AnswerCountByQuestion => "answer_count_by_question",
            StatMetric::AnswerRateByChoice => "answer_rate_by_choice",
            StatMetric::AnswerCountByAge => "answer_count_by_age",
            StatMetric::MostChosenChoice => "most_chosen_choice",
            StatMetric::LeastChosenChoice => "least_chosen_choice",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            StatMetric::AnswerCountByChoice => "Answers per choice",
            StatMetric::AnswerCountByUser => "Answers per participant",
            StatMetric::ResponseRate => "Response rate",
            StatMetric::AnswerCountByQuestion => "Answers per question",
            StatMetric::AnswerRateByChoice => "Answer rate per choice (%)",
            StatMetric::AnswerCountByAge => "Answers per age group",
            StatMetric::MostChosenChoice => "Most chosen choice",
            StatMetric::LeastChosenChoice => "Least chosen choice",
        }
    }
}

impl std::fmt::Display for StatMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_segment())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatBar {
    pub label: String,
    pub value: f64,
}

/// Chart-ready shape of one metric payload.
#[derive(Debug, Clone, PartialEq)]
pub enum StatChart {
    Bars(Vec<StatBar>),
    /// Pre-rendered PNG, base64 encoded.
    Image(String),
    Empty,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StatDecodeError {
    #[error("unsupported payload shape for {metric}")]
    UnsupportedShape { metric: StatMetric },
}

const LABEL_KEYS: [&str; 9] = [
    "choice_id",
    "question_id",
    "user_id",
    "age",
    "label",
    "name",
    "content",
    "title",
    "id",
];

const VALUE_KEYS: [&str; 7] = [
    "answer_count",
    "count",
    "percentage",
    "rate",
    "response_rate",
    "value",
    "total",
];

/// Decode a metric payload into a chart.
///
/// # Errors
///
/// Returns `StatDecodeError::UnsupportedShape` when no numeric series can be found.
pub fn decode_stat(metric: StatMetric, payload: &Value) -> Result<StatChart, StatDecodeError> {
    let unsupported = StatDecodeError::UnsupportedShape { metric };
    match payload {
        Value::Array(rows) => decode_rows(rows).ok_or(unsupported),
        Value::Object(map) => {
            if let Some(Value::String(image)) = map.get("image") {
                return Ok(StatChart::Image(image.clone()));
            }
            if let Some(rows) = single_nested_array(map) {
                return decode_rows(rows).ok_or(unsupported);
            }
            if let Some(bar) = keyed_bar(map) {
                return Ok(StatChart::Bars(vec![bar]));
            }
            let bars = map
                .iter()
                .filter_map(|(key, value)| {
                    value.as_f64().map(|value| StatBar {
                        label: key.clone(),
                        value,
                    })
                })
                .collect::<Vec<_>>();
            if bars.is_empty() {
                Err(unsupported)
            } else {
                Ok(StatChart::Bars(bars))
            }
        }
        Value::Number(number) => number
            .as_f64()
            .map(|value| {
                StatChart::Bars(vec![StatBar {
                    label: metric.title().to_string(),
                    value,
                }])
            })
            .ok_or(unsupported),
        Value::Null => Ok(StatChart::Empty),
        Value::Bool(_) | Value::String(_) => Err(unsupported),
    }
}

fn decode_rows(rows: &[Value]) -> Option<StatChart> {
    if rows.is_empty() {
        return Some(StatChart::Empty);
    }
    let mut bars = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let bar = match row {
            Value::Object(map) => row_bar(map, index)?,
            other => StatBar {
                label: (index + 1).to_string(),
                value: other.as_f64()?,
            },
        };
        bars.push(bar);
    }
    Some(StatChart::Bars(bars))
}

fn single_nested_array(map: &Map<String, Value>) -> Option<&Vec<Value>> {
    let mut arrays = map.values().filter_map(Value::as_array);
    let first = arrays.next()?;
    arrays.next().is_none().then_some(first)
}

fn label_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn keyed_bar(map: &Map<String, Value>) -> Option<StatBar> {
    let (label_key, label) = LABEL_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(label_text).map(|text| (*key, text)))?;
    let value = VALUE_KEYS
        .iter()
        .filter(|key| **key != label_key)
        .find_map(|key| map.get(*key).and_then(Value::as_f64))?;
    Some(StatBar { label, value })
}

fn row_bar(map: &Map<String, Value>, index: usize) -> Option<StatBar> {
    if let Some(bar) = keyed_bar(map) {
        return Some(bar);
    }
    let label_key = LABEL_KEYS.iter().find(|key| map.contains_key(**key));
    let label = label_key
        .and_then(|key| map.get(*key))
        .and_then(label_text)
        .unwrap_or_else(|| (index + 1).to_string());
    let value = map
        .iter()
        .filter(|(key, _)| label_key.is_none_or(|label_key| key.as_str() != *label_key))
        .find_map(|(_, value)| value.as_f64())?;
    Some(StatBar { label, value })
}
