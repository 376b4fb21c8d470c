//! Key path parsing (`m_parts[0].m_rnShape.m_hulls[2]`)

/// One step of a key path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment<'a> {
    /// Member access by name
    Field(&'a str),
    /// Zero-based array index
    Index(usize),
}

/// Split a key path into segments.
///
/// A leading `.` is optional. Returns `None` for malformed paths (empty field
/// names, unclosed or non-numeric brackets).
pub fn parse_path(path: &str) -> Option<Vec<PathSegment<'_>>> {
    let mut segments = Vec::new();
    let mut rest = path.strip_prefix('.').unwrap_or(path);

    while !rest.is_empty() {
        if let Some(after_bracket) = rest.strip_prefix('[') {
            let close = after_bracket.find(']')?;
            let index = after_bracket[..close].trim().parse::<usize>().ok()?;
            segments.push(PathSegment::Index(index));
            rest = &after_bracket[close + 1..];
            // a field following an index needs its dot
            if !rest.is_empty() && !rest.starts_with('[') {
                rest = rest.strip_prefix('.')?;
            }
        } else {
            let end = rest.find(['.', '[']).unwrap_or(rest.len());
            if end == 0 {
                return None;
            }
            segments.push(PathSegment::Field(&rest[..end]));
            rest = &rest[end..];
            if let Some(after_dot) = rest.strip_prefix('.') {
                if after_dot.is_empty() {
                    return None;
                }
                rest = after_dot;
            }
        }
    }

    Some(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_path() {
        let segments = parse_path("m_parts[0].m_rnShape.m_hulls[12].m_Hull").unwrap();
        assert_eq!(
            segments,
            vec![
                PathSegment::Field("m_parts"),
                PathSegment::Index(0),
                PathSegment::Field("m_rnShape"),
                PathSegment::Field("m_hulls"),
                PathSegment::Index(12),
                PathSegment::Field("m_Hull"),
            ]
        );
    }

    #[test]
    fn test_leading_dot_and_nested_indices() {
        let segments = parse_path(".grid[1][2]").unwrap();
        assert_eq!(
            segments,
            vec![PathSegment::Field("grid"), PathSegment::Index(1), PathSegment::Index(2)]
        );
    }

    #[test]
    fn test_malformed_paths() {
        assert!(parse_path("a..b").is_none());
        assert!(parse_path("a[").is_none());
        assert!(parse_path("a[x]").is_none());
        assert!(parse_path("a[0]b").is_none());
        assert!(parse_path("a.").is_none());
    }
}
