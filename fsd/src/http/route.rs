use std::cmp::Ordering;

use itertools::Itertools;

use crate::http::HttpMethod;
use crate::{DefinitionError, Result};

pub(crate) fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Returns the placeholder name for a `{name}` path segment.
pub(crate) fn placeholder_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

/// Orders routes by verb, then path segment by segment. A literal segment
/// sorts before a placeholder at the same index, and two placeholders
/// compare equal regardless of name, so the most specific conflicts
/// surface as adjacent equal routes.
fn route_cmp(a: &HttpMethod, b: &HttpMethod) -> Ordering {
    a.verb.cmp(&b.verb).then_with(|| path_cmp(&a.path, &b.path))
}

fn path_cmp(a: &str, b: &str) -> Ordering {
    for pair in segments(a).zip_longest(segments(b)) {
        let ordering = match pair {
            itertools::EitherOrBoth::Both(a, b) => segment_cmp(a, b),
            itertools::EitherOrBoth::Left(_) => Ordering::Greater,
            itertools::EitherOrBoth::Right(_) => Ordering::Less,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn segment_cmp(a: &str, b: &str) -> Ordering {
    match (placeholder_name(a), placeholder_name(b)) {
        (Some(_), Some(_)) => Ordering::Equal,
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

/// Sorts a view of the methods by route and fails on any adjacent pair
/// with an equal route, naming both methods.
pub(crate) fn check_routes(methods: &[HttpMethod]) -> Result<()> {
    let mut sorted: Vec<&HttpMethod> = methods.iter().collect();
    sorted.sort_by(|a, b| route_cmp(a, b));
    for pair in sorted.windows(2) {
        if route_cmp(pair[0], pair[1]) == Ordering::Equal {
            return Err(DefinitionError::new(
                format!(
                    "methods '{}' and '{}' have the same route: {} {}",
                    pair[0].name, pair[1].name, pair[1].verb, pair[1].path
                ),
                pair[1].position.clone(),
            ));
        }
    }
    Ok(())
}
