//! Failure accumulation shared by the composite schema nodes.
//!
//! Composite nodes run every child check before deciding, so the failure
//! they report lists every failing child rather than the first one. The
//! bookkeeping uses stillwater's applicative [`Validation`].

use indexmap::IndexMap;
use stillwater::{NonEmptyVec, Semigroup, Validation};

use crate::error::{NestedFailures, ValidationFailure};

/// Collects ordered child results: every success in order, or every failure.
pub(crate) fn collect_all<T, I>(results: I) -> Validation<Vec<T>, NonEmptyVec<ValidationFailure>>
where
    I: IntoIterator<Item = Result<T, ValidationFailure>>,
{
    results
        .into_iter()
        .fold(Validation::Success(Vec::new()), |acc, next| match (acc, next) {
            (Validation::Success(mut items), Ok(item)) => {
                items.push(item);
                Validation::Success(items)
            }
            (Validation::Success(_), Err(failure)) => {
                Validation::Failure(NonEmptyVec::singleton(failure))
            }
            (Validation::Failure(failures), Ok(_)) => Validation::Failure(failures),
            (Validation::Failure(failures), Err(failure)) => {
                Validation::Failure(failures.combine(NonEmptyVec::singleton(failure)))
            }
        })
}

/// Collects keyed child results, preserving key order on both sides.
pub(crate) fn collect_keyed<T, I>(
    results: I,
) -> Validation<IndexMap<String, T>, NonEmptyVec<(String, ValidationFailure)>>
where
    I: IntoIterator<Item = (String, Result<T, ValidationFailure>)>,
{
    results
        .into_iter()
        .fold(Validation::Success(IndexMap::new()), |acc, (key, next)| {
            match (acc, next) {
                (Validation::Success(mut items), Ok(item)) => {
                    items.insert(key, item);
                    Validation::Success(items)
                }
                (Validation::Success(_), Err(failure)) => {
                    Validation::Failure(NonEmptyVec::singleton((key, failure)))
                }
                (Validation::Failure(failures), Ok(_)) => Validation::Failure(failures),
                (Validation::Failure(failures), Err(failure)) => {
                    Validation::Failure(failures.combine(NonEmptyVec::singleton((key, failure))))
                }
            }
        })
}

pub(crate) fn as_elements(failures: NonEmptyVec<ValidationFailure>) -> NestedFailures {
    NestedFailures::Elements(failures.into_vec())
}

pub(crate) fn as_fields(failures: NonEmptyVec<(String, ValidationFailure)>) -> NestedFailures {
    NestedFailures::Fields(failures.into_vec().into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::FieldPath;

    fn fail(name: &str) -> ValidationFailure {
        ValidationFailure::new(&FieldPath::named(name), "number", "bad")
    }

    #[test]
    fn test_collect_all_success_keeps_order() {
        let collected = collect_all(vec![Ok(1), Ok(2), Ok(3)]);
        assert_eq!(collected.into_result().ok(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_collect_all_keeps_every_failure() {
        let collected = collect_all(vec![Err(fail("a")), Ok(2), Err(fail("c"))]);
        let failures = collected.into_result().err().map(NonEmptyVec::into_vec);

        let names: Vec<_> = failures
            .unwrap_or_default()
            .into_iter()
            .map(|f| f.key_name)
            .collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_collect_keyed_preserves_keys() {
        let collected = collect_keyed(vec![
            ("x".to_string(), Ok(1)),
            ("y".to_string(), Err(fail("y"))),
        ]);

        match collected {
            Validation::Failure(failures) => {
                let nested = as_fields(failures);
                assert_eq!(nested.len(), 1);
                assert!(matches!(nested, NestedFailures::Fields(ref f) if f.contains_key("y")));
            }
            Validation::Success(_) => panic!("expected failure"),
        }
    }
}
