//! Parsing of the predictor's probability output and the test set's
//! ground-truth labels.
//!
//! Unlike the cross-validation collector, nothing here is allowed to fail
//! silently: a malformed test set or prediction file aborts the run.

use hs_types::MetricsError;

/// Extract per-example class-1 probabilities from a prediction file written
/// in probability mode.
///
/// The first line is a `labels ...` header and is skipped; every following
/// line is `<predicted_label> <prob_for_class_1> <prob_for_class_0>`.
pub fn parse_probability_predictions(content: &str) -> Result<Vec<f64>, MetricsError> {
    let mut probabilities = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.starts_with("labels") {
            continue;
        }
        let prob = line
            .split_whitespace()
            .nth(1)
            .and_then(|field| field.parse::<f64>().ok())
            .ok_or_else(|| MetricsError::MalformedPrediction {
                line_no: idx + 1,
                line: line.to_string(),
            })?;
        probabilities.push(prob);
    }
    Ok(probabilities)
}

/// Parse the leading label column of a libsvm-format dataset.
pub fn parse_labels(content: &str) -> Result<Vec<i64>, MetricsError> {
    let mut labels = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let label = line
            .split_whitespace()
            .next()
            .and_then(|field| field.parse::<i64>().ok())
            .ok_or_else(|| MetricsError::MalformedLabel {
                line_no: idx + 1,
                line: line.to_string(),
            })?;
        labels.push(label);
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predictions_skip_the_header() {
        let content = "labels 1 -1\n1 0.9 0.1\n-1 0.2 0.8\n";
        let probs = parse_probability_predictions(content).unwrap();
        assert_eq!(probs, vec![0.9, 0.2]);
    }

    #[test]
    fn predictions_without_header_still_parse() {
        // The header only appears in probability mode; be tolerant of its
        // absence but never of malformed rows.
        let content = "1 0.75 0.25\n";
        let probs = parse_probability_predictions(content).unwrap();
        assert_eq!(probs, vec![0.75]);
    }

    #[test]
    fn malformed_prediction_row_is_fatal() {
        let content = "labels 1 -1\n1 notaprob 0.1\n";
        let err = parse_probability_predictions(content).unwrap_err();
        match err {
            MetricsError::MalformedPrediction { line_no: 2, line } => {
                assert!(line.contains("notaprob"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_probability_column_is_fatal() {
        let content = "labels 1 -1\n1\n";
        assert!(parse_probability_predictions(content).is_err());
    }

    #[test]
    fn labels_read_the_first_column() {
        let content = "+1 1:0.5 2:0.1\n-1 1:0.2\n1 3:0.9\n";
        let labels = parse_labels(content).unwrap();
        assert_eq!(labels, vec![1, -1, 1]);
    }

    #[test]
    fn malformed_label_is_fatal() {
        let content = "1 1:0.5\nnot-a-label 1:0.2\n";
        let err = parse_labels(content).unwrap_err();
        assert!(matches!(err, MetricsError::MalformedLabel { line_no: 2, .. }));
    }

    #[test]
    fn blank_label_line_is_fatal() {
        let err = parse_labels("1 1:0.5\n\n-1 1:0.2\n").unwrap_err();
        assert!(matches!(err, MetricsError::MalformedLabel { line_no: 2, .. }));
    }

    #[test]
    fn parsing_is_idempotent() {
        let content = "labels 1 -1\n1 0.9 0.1\n";
        let first = parse_probability_predictions(content).unwrap();
        let second = parse_probability_predictions(content).unwrap();
        assert_eq!(first, second);
    }
}
