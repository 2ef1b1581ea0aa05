//! Success/failure combinators on top of [`std::result::Result`].
//!
//! `Ok` is the success (`right`) side and `Err` the failure (`left`) side.
//! `map`, `map_err` (left map), `and_then` (flat map), `is_ok` and `is_err`
//! come from the standard type; [`ResultExt`] adds the rest. Once a chain is
//! `Err`, every later `map`, `and_then` and filter passes the error through.

/// Extra combinators for `Result<R, E>`.
pub trait ResultExt<R, E> {
    /// Reduces both variants to one value.
    fn cata<U>(self, on_err: impl FnOnce(E) -> U, on_ok: impl FnOnce(R) -> U) -> U;

    /// Demotes a success that fails `predicate` to `Err(fail_value)`.
    ///
    /// ```rust
    /// use sortie::ResultExt;
    ///
    /// let hours: Result<u32, &str> = Ok(12);
    /// assert_eq!(hours.filter_or(|h| *h >= 10, "not enough hours"), Ok(12));
    /// assert_eq!(Ok::<u32, &str>(3).filter_or(|h| *h >= 10, "not enough hours"), Err("not enough hours"));
    /// ```
    fn filter_or(self, predicate: impl FnOnce(&R) -> bool, fail_value: E) -> Result<R, E>;

    /// Like [`filter_or`](ResultExt::filter_or) but builds the failure from
    /// the rejected value.
    fn filter_or_else(
        self,
        predicate: impl FnOnce(&R) -> bool,
        fail: impl FnOnce(R) -> E,
    ) -> Result<R, E>;

    /// Narrows the success value to `U`, failing with `fail_value` when the
    /// conversion is refused.
    fn filter_type<U: TryFrom<R>>(self, fail_value: E) -> Result<U, E>;
}

impl<R, E> ResultExt<R, E> for Result<R, E> {
    fn cata<U>(self, on_err: impl FnOnce(E) -> U, on_ok: impl FnOnce(R) -> U) -> U {
        match self {
            Ok(value) => on_ok(value),
            Err(error) => on_err(error),
        }
    }

    fn filter_or(self, predicate: impl FnOnce(&R) -> bool, fail_value: E) -> Result<R, E> {
        self.filter_or_else(predicate, |_| fail_value)
    }

    fn filter_or_else(
        self,
        predicate: impl FnOnce(&R) -> bool,
        fail: impl FnOnce(R) -> E,
    ) -> Result<R, E> {
        match self {
            Ok(value) if predicate(&value) => Ok(value),
            Ok(value) => Err(fail(value)),
            Err(error) => Err(error),
        }
    }

    fn filter_type<U: TryFrom<R>>(self, fail_value: E) -> Result<U, E> {
        self.and_then(|value| U::try_from(value).map_err(|_| fail_value))
    }
}

/// `Ok` for a present value, `Err(fail_value)` for `None`.
pub fn from_option<R, E>(option: Option<R>, fail_value: E) -> Result<R, E> {
    option.ok_or(fail_value)
}

/// Total conjunction: `Ok` of every value iff every result is `Ok`, otherwise
/// the first `Err` in iteration order. Scanning stops at that error.
pub fn all_ok<R, E, I>(results: I) -> Result<Vec<R>, E>
where
    I: IntoIterator<Item = Result<R, E>>,
{
    results.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cata() {
        assert_eq!(Ok::<i32, &str>(2).cata(|e| e.len() as i32, |x| x + 1), 3);
        assert_eq!(Err::<i32, &str>("four").cata(|e| e.len() as i32, |x| x + 1), 4);
    }

    #[test]
    fn test_filter_passes_errors_through() {
        let failed: Result<i32, &str> = Err("original");
        assert_eq!(failed.filter_or(|_| false, "replacement"), Err("original"));
    }

    #[test]
    fn test_filter_or_else_sees_value() {
        let result = Ok::<i32, String>(3).filter_or_else(|x| *x > 5, |x| format!("{} too small", x));
        assert_eq!(result, Err("3 too small".to_string()));
    }

    #[test]
    fn test_filter_type() {
        assert_eq!(Ok::<i64, &str>(7).filter_type::<u8>("out of range"), Ok(7));
        assert_eq!(Ok::<i64, &str>(-1).filter_type::<u8>("out of range"), Err("out of range"));
        assert_eq!(Err::<i64, &str>("early").filter_type::<u8>("out of range"), Err("early"));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(from_option(Some(1), "missing"), Ok(1));
        assert_eq!(from_option(None::<i32>, "missing"), Err("missing"));
    }

    #[test]
    fn test_all_ok_first_error_wins() {
        assert_eq!(all_ok(vec![Ok::<_, &str>(1), Ok(2)]), Ok(vec![1, 2]));
        assert_eq!(all_ok(vec![Ok(1), Err("a"), Err("b")]), Err("a"));
    }
}
