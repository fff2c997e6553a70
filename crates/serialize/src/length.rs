//! Array length directives.

/// Bounds the number of elements written from an array.
///
/// The directive is supplied per call and never stored. It resolves against
/// the actual array length `L`: [`LengthDirective::Full`] and any bound
/// greater than `L` write all `L` elements, a smaller bound writes the first
/// `n` elements and drops the rest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum LengthDirective {
    /// Write the whole array. Corresponds to the integer directive `-1`.
    #[default]
    Full,

    /// Write at most this many elements.
    AtMost(usize),
}

impl LengthDirective {
    /// The number of elements to write from an array of `available`
    /// elements.
    #[must_use]
    pub const fn resolve(self, available: usize) -> usize {
        match self {
            Self::AtMost(bound) if bound < available => bound,
            Self::Full | Self::AtMost(_) => available,
        }
    }
}

/// An integer length directive below `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("length directive {0} is invalid, expected -1 or a non-negative bound")]
pub struct InvalidLengthDirective(pub i64);

impl TryFrom<i64> for LengthDirective {
    type Error = InvalidLengthDirective;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Full),
            // a bound beyond the address space can never truncate
            0.. => Ok(Self::AtMost(usize::try_from(value).unwrap_or(usize::MAX))),
            _ => Err(InvalidLengthDirective(value)),
        }
    }
}

impl TryFrom<i32> for LengthDirective {
    type Error = InvalidLengthDirective;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl From<usize> for LengthDirective {
    fn from(bound: usize) -> Self { Self::AtMost(bound) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_law() {
        assert_eq!(LengthDirective::Full.resolve(5), 5);
        assert_eq!(LengthDirective::AtMost(3).resolve(5), 3);
        assert_eq!(LengthDirective::AtMost(5).resolve(5), 5);
        assert_eq!(LengthDirective::AtMost(10).resolve(5), 5);
        assert_eq!(LengthDirective::AtMost(0).resolve(5), 0);
        assert_eq!(LengthDirective::Full.resolve(0), 0);
    }

    #[test]
    fn from_integers() {
        assert_eq!(LengthDirective::try_from(-1i64), Ok(LengthDirective::Full));
        assert_eq!(LengthDirective::try_from(0i32), Ok(LengthDirective::AtMost(0)));
        assert_eq!(LengthDirective::try_from(7i64), Ok(LengthDirective::AtMost(7)));
        assert_eq!(
            LengthDirective::try_from(-2i32),
            Err(InvalidLengthDirective(-2))
        );
        assert_eq!(
            LengthDirective::try_from(i64::MIN).unwrap_err().to_string(),
            format!(
                "length directive {} is invalid, expected -1 or a \
                 non-negative bound",
                i64::MIN
            )
        );
    }

    #[test]
    fn default_is_full() {
        assert_eq!(LengthDirective::default(), LengthDirective::Full);
        assert_eq!(LengthDirective::from(4usize), LengthDirective::AtMost(4));
    }
}
