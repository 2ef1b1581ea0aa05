//! Presence/absence combinators on top of [`std::option::Option`].
//!
//! The standard type already provides `Some`/`None`, `is_some`/`is_none`,
//! `map`, `and_then` (flat map) and `filter`. [`OptionExt`] adds the
//! reductions and conversions the rest of the crate relies on, and the free
//! functions build options from nullable and zero-or-one inputs.

use serde_json::Value;

/// Extra combinators for `Option<T>`.
pub trait OptionExt<T> {
    /// Reduces both variants to one value.
    fn cata<U>(self, on_none: impl FnOnce() -> U, on_some: impl FnOnce(T) -> U) -> U;

    /// Replaces `None` with `Some(default)`; a present value is kept.
    fn or_some(self, default: T) -> Option<T>;

    /// Keeps the value only if it converts into the narrower type `U`.
    ///
    /// ```rust
    /// use sortie::OptionExt;
    ///
    /// assert_eq!(Some(200_i64).filter_type::<u8>(), Some(200_u8));
    /// assert_eq!(Some(300_i64).filter_type::<u8>(), None);
    /// ```
    fn filter_type<U: TryFrom<T>>(self) -> Option<U>;

    /// Zero or one element.
    fn to_vec(self) -> Vec<T>;

    /// Exits to JSON, mapping `None` to `null`.
    fn join_value(self) -> Value
    where
        T: Into<Value>;
}

impl<T> OptionExt<T> for Option<T> {
    fn cata<U>(self, on_none: impl FnOnce() -> U, on_some: impl FnOnce(T) -> U) -> U {
        match self {
            Some(value) => on_some(value),
            None => on_none(),
        }
    }

    fn or_some(self, default: T) -> Option<T> {
        Some(self.unwrap_or(default))
    }

    fn filter_type<U: TryFrom<T>>(self) -> Option<U> {
        self.and_then(|value| U::try_from(value).ok())
    }

    fn to_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }

    fn join_value(self) -> Value
    where
        T: Into<Value>,
    {
        self.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Builds an option from a zero-or-one element collection: the first element
/// if there is one.
pub fn from_array<T>(items: impl IntoIterator<Item = T>) -> Option<T> {
    items.into_iter().next()
}

/// Treats both an absent value and JSON `null` as `None`.
pub fn from_json(raw: Option<&Value>) -> Option<&Value> {
    raw.filter(|value| !value.is_null())
}

/// Total conjunction: `Some` of every value iff every option is `Some`.
///
/// Scanning stops at the first `None`; later options are not inspected.
///
/// ```rust
/// use sortie::option::all_some;
///
/// assert_eq!(all_some(vec![Some(1), Some(2)]), Some(vec![1, 2]));
/// assert_eq!(all_some(vec![Some(1), None]), None);
/// ```
pub fn all_some<T, I>(options: I) -> Option<Vec<T>>
where
    I: IntoIterator<Item = Option<T>>,
{
    options.into_iter().collect()
}
