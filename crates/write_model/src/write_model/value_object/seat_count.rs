/// Number of seats (sold or available)
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SeatCount(u32);

impl From<u32> for SeatCount {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<SeatCount> for u32 {
    fn from(value: SeatCount) -> Self {
        value.0
    }
}

impl TryFrom<i64> for SeatCount {
    type Error = std::num::TryFromIntError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value).map(Self)
    }
}

impl From<SeatCount> for i64 {
    fn from(value: SeatCount) -> Self {
        i64::from(value.0)
    }
}

impl std::fmt::Display for SeatCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u32_conversion() {
        assert_eq!(u32::from(SeatCount::from(u32::MAX)), u32::MAX);
        assert_eq!(u32::from(SeatCount::from(u32::MIN)), u32::MIN);
    }

    #[test]
    fn test_i64_conversion() {
        assert!(SeatCount::try_from(-1_i64).is_err());
        assert_eq!(SeatCount::try_from(15_i64).ok(), Some(SeatCount::from(15)));
        assert!(SeatCount::try_from(i64::from(u32::MAX) + 1).is_err());
        assert_eq!(i64::from(SeatCount::from(u32::MAX)), i64::from(u32::MAX));
    }
}
