//! Plot hand-off structure.
//!
//! Rendering lives outside this crate. [`ChartData`] only guarantees that
//! every y-series has exactly one value per x-axis timestamp.

use crate::error::{Result, SurgeError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    pub x: Vec<NaiveDateTime>,
    pub series: Vec<ChartSeries>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub title: Option<String>,
}

impl ChartData {
    pub fn new(x: Vec<NaiveDateTime>) -> Self {
        Self {
            x,
            ..Default::default()
        }
    }

    /// Add a labelled series; its length must match the x-axis
    pub fn with_series(mut self, label: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let label = label.into();
        if values.len() != self.x.len() {
            return Err(SurgeError::SeriesLengthMismatch {
                label,
                expected: self.x.len(),
                found: values.len(),
            });
        }

        self.series.push(ChartSeries { label, values });
        Ok(self)
    }

    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Number of points on the x-axis
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn axis(n: u32) -> Vec<NaiveDateTime> {
        (0..n)
            .map(|m| {
                NaiveDate::from_ymd_opt(2018, 10, 10)
                    .unwrap()
                    .and_hms_opt(0, m, 0)
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_equal_length_series_accepted() {
        let chart = ChartData::new(axis(2))
            .with_series("Predicted", vec![1.0, 2.0])
            .unwrap()
            .with_title("Storm surge");
        assert_eq!(chart.len(), 2);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.title.as_deref(), Some("Storm surge"));
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let result = ChartData::new(axis(3)).with_series("Measured", vec![1.0]);
        match result {
            Err(SurgeError::SeriesLengthMismatch {
                label,
                expected,
                found,
            }) => {
                assert_eq!(label, "Measured");
                assert_eq!(expected, 3);
                assert_eq!(found, 1);
            }
            other => panic!("Expected SeriesLengthMismatch, got {:?}", other),
        }
    }
}
