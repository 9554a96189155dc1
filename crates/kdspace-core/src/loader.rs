//! Point file loading
//!
//! A point file is a sequence of whitespace-separated numbers read pairwise
//! as `x y`. Pairs may span lines; `#` starts a comment running to the end
//! of the line.
//!
//! ```text
//! # circle10.txt
//! 0.206107 0.095492
//! 0.975528 0.654508
//! ```

use std::path::Path;

use crate::error::{SpatialError, SpatialResult};
use crate::geometry::Point;

/// Parse points from text, keeping duplicates and input order
pub fn parse_points(input: &str) -> SpatialResult<Vec<Point>> {
    let mut points = Vec::new();
    let mut pending_x: Option<(f64, usize)> = None;

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let content = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };

        for token in content.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| SpatialError::Parse {
                line: line_no,
                message: format!("expected a number, found '{}'", token),
            })?;

            match pending_x.take() {
                None => pending_x = Some((value, line_no)),
                Some((x, _)) => points.push(Point::new(x, value)?),
            }
        }
    }

    if let Some((x, line)) = pending_x {
        return Err(SpatialError::Parse {
            line,
            message: format!("x coordinate {} has no matching y coordinate", x),
        });
    }

    Ok(points)
}

/// Read and parse a point file
pub fn read_points(path: impl AsRef<Path>) -> SpatialResult<Vec<Point>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let points = parse_points(&content)?;
    tracing::debug!(path = %path.display(), count = points.len(), "loaded point file");
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_one_pair_per_line() {
        let points = parse_points("0.5 0.25\n1.0 0.0\n").unwrap();
        assert_eq!(
            points,
            vec![Point::new(0.5, 0.25).unwrap(), Point::new(1.0, 0.0).unwrap()]
        );
    }

    #[test]
    fn test_parse_pairs_span_lines() {
        let points = parse_points("1 2 3\n4\n").unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1], Point::new(3.0, 4.0).unwrap());
    }

    #[test]
    fn test_parse_comments_and_blank_lines() {
        let input = "# header\n\n  0.1 0.2  # trailing\n\t0.3\t0.4\n";
        let points = parse_points(input).unwrap();
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_points("").unwrap().is_empty());
        assert!(parse_points("# nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_bad_token_reports_line() {
        let err = parse_points("0 0\n1 abc\n").unwrap_err();
        match err {
            SpatialError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("abc"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_odd_token_count() {
        let err = parse_points("0 0\n1\n").unwrap_err();
        assert!(matches!(err, SpatialError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        let err = parse_points("inf 0\n").unwrap_err();
        assert!(matches!(err, SpatialError::InvalidArgument(_)));
    }
}
