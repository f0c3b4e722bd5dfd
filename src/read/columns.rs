use crate::error::ConfigError;

/// Parse a cut-like column list ("1,3-5") into zero-based column indexes.
///
/// Order and repetitions are preserved, so "3,3" selects the third column
/// twice and "5,1" selects the fifth column before the first.  `None` selects
/// nothing.
pub fn parse_columns(list: Option<&str>) -> Result<Vec<usize>, ConfigError> {
    let list = match list {
        Some(s) => s,
        None => return Ok(Vec::new()),
    };
    let mut columns = Vec::new();
    for piece in list.split(',') {
        let piece = piece.trim();
        let bounds: Vec<&str> = piece.split('-').collect();
        match bounds.as_slice() {
            [single] => columns.push(parse_column(single)?),
            [first, last] => {
                let first = parse_column(first)?;
                let last = parse_column(last)?;
                if first > last {
                    return Err(ConfigError::DescendingRange(piece.to_string()));
                }
                columns.extend(first..=last);
            }
            _ => return Err(ConfigError::MalformedRange(piece.to_string())),
        }
    }
    Ok(columns)
}

/// Parse a single 1-based column into a zero-based index.
pub fn parse_column(s: &str) -> Result<usize, ConfigError> {
    match s.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(ConfigError::InvalidColumn(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_and_ranges() {
        assert_eq!(parse_columns(Some("1,3-5")).unwrap(), vec![0, 2, 3, 4]);
        assert_eq!(parse_columns(Some("2,4-6")).unwrap(), vec![1, 3, 4, 5]);
        assert_eq!(parse_columns(Some("7")).unwrap(), vec![6]);
        assert_eq!(parse_columns(Some("2-2")).unwrap(), vec![1]);
    }

    #[test]
    fn absent_spec_is_empty() {
        assert_eq!(parse_columns(None).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn repetitions_and_order_are_kept() {
        assert_eq!(parse_columns(Some("3,3")).unwrap(), vec![2, 2]);
        assert_eq!(parse_columns(Some("5,1")).unwrap(), vec![4, 0]);
        assert_eq!(parse_columns(Some("1-3,2-4")).unwrap(), vec![0, 1, 2, 1, 2, 3]);
    }

    #[test]
    fn malformed_range() {
        assert_eq!(
            parse_columns(Some("1-2-3")),
            Err(ConfigError::MalformedRange(String::from("1-2-3")))
        );
        assert_eq!(
            parse_columns(Some("1,1-2-3,4")),
            Err(ConfigError::MalformedRange(String::from("1-2-3")))
        );
    }

    #[test]
    fn invalid_pieces() {
        assert!(matches!(
            parse_columns(Some("a")),
            Err(ConfigError::InvalidColumn(_))
        ));
        assert!(matches!(
            parse_columns(Some("1,,2")),
            Err(ConfigError::InvalidColumn(_))
        ));
        assert!(matches!(
            parse_columns(Some("0")),
            Err(ConfigError::InvalidColumn(_))
        ));
        assert!(matches!(
            parse_columns(Some("4-2")),
            Err(ConfigError::DescendingRange(_))
        ));
        assert!(parse_column("-1").is_err());
    }

    #[test]
    fn whitespace_is_tolerated() {
        assert_eq!(parse_columns(Some(" 1, 3 - 4")).unwrap(), vec![0, 2, 3]);
    }
}
