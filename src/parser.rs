//! A `nom`-based parser for path expressions.
use crate::ast::{PathExpr, PathSegment};
use nom::{
    IResult, Parser,
    bytes::complete::take_while1,
    character::complete::{char, u64 as nom_u64},
    combinator::{all_consuming, opt},
    sequence::{delimited, pair},
};

/// Parses a dotted path expression into its segments.
///
/// A source piece `items[1]` lowers to a key lookup followed by an index
/// lookup. Parsing is total: a piece that does not match the
/// `identifier[index]` grammar in full (`items[x]`, `a[1]b`, `wei-rd`) is
/// kept verbatim as a plain key, so malformed input degrades to a lookup
/// that resolves to nothing rather than an error.
pub fn parse_path(input: &str) -> PathExpr {
    let mut segments = Vec::new();
    for piece in input.split('.') {
        match indexed_piece(piece) {
            Ok((_, (key, index))) => {
                segments.push(PathSegment::Key(key.to_string()));
                if let Some(index) = index {
                    segments.push(PathSegment::Index(index as usize));
                }
            }
            Err(_) => segments.push(PathSegment::Key(piece.to_string())),
        }
    }
    PathExpr(segments)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_').parse(input)
}

fn index(input: &str) -> IResult<&str, u64> {
    delimited(char('['), nom_u64, char(']')).parse(input)
}

fn indexed_piece(input: &str) -> IResult<&str, (&str, Option<u64>)> {
    all_consuming(pair(identifier, opt(index))).parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> PathSegment {
        PathSegment::Key(k.to_string())
    }

    #[test]
    fn test_plain_keys() {
        let path = parse_path("user.profile.name");
        assert_eq!(path.0, vec![key("user"), key("profile"), key("name")]);
    }

    #[test]
    fn test_indexed_segment_splits_in_two() {
        let path = parse_path("items[1].code");
        assert_eq!(
            path.0,
            vec![key("items"), PathSegment::Index(1), key("code")]
        );
    }

    #[test]
    fn test_identifier_may_start_with_digit_or_underscore() {
        let path = parse_path("_meta.0th[2]");
        assert_eq!(
            path.0,
            vec![key("_meta"), key("0th"), PathSegment::Index(2)]
        );
    }

    #[test]
    fn test_non_digit_index_falls_back_to_plain_key() {
        let path = parse_path("items[x]");
        assert_eq!(path.0, vec![key("items[x]")]);
    }

    #[test]
    fn test_trailing_garbage_falls_back_to_plain_key() {
        let path = parse_path("items[1]extra");
        assert_eq!(path.0, vec![key("items[1]extra")]);
    }

    #[test]
    fn test_unusual_characters_fall_back_to_plain_key() {
        let path = parse_path("wei-rd.[0]");
        assert_eq!(path.0, vec![key("wei-rd"), key("[0]")]);
    }

    #[test]
    fn test_empty_input_is_a_single_empty_key() {
        let path = parse_path("");
        assert_eq!(path.0, vec![key("")]);
    }
}
