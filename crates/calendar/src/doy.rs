//! Day-of-year newtype and the seasonal day-of-year allow-mask.

use crate::date::AcqDate;
use crate::error::CalendarError;

/// Number of entries in a day-of-year table (leap years have 366 days).
pub const DAYS_IN_LEAP_YEAR: usize = 366;

/// Day-of-year in the Gregorian calendar (1..=366).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Doy(u16);

impl Doy {
    /// Creates a new `Doy` from a day-of-year value.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `doy` is not in 1..=366.
    pub fn new(doy: u16) -> Result<Self, CalendarError> {
        if !(1..=DAYS_IN_LEAP_YEAR as u16).contains(&doy) {
            return Err(CalendarError::InvalidDoy { doy });
        }
        Ok(Self(doy))
    }

    /// Builds a `Doy` from a `chrono` ordinal, which is always in 1..=366.
    pub(crate) fn from_ordinal(ordinal: u32) -> Self {
        Self(ordinal as u16)
    }

    /// Returns the inner day-of-year value (1..=366).
    pub fn get(self) -> u16 {
        self.0
    }

    /// Returns the 0-based index suitable for table lookup (0..=365).
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

/// Allow/deny table over the days of the year.
///
/// Restricts windows and acquisitions to a seasonal subset of the year.
/// The mask is read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoyMask {
    allowed: [bool; DAYS_IN_LEAP_YEAR],
    bounds: (Doy, Doy),
}

impl DoyMask {
    /// A mask that allows every day of the year.
    pub fn all() -> Self {
        Self {
            allowed: [true; DAYS_IN_LEAP_YEAR],
            bounds: (Doy(1), Doy(DAYS_IN_LEAP_YEAR as u16)),
        }
    }

    /// A mask allowing the inclusive day-of-year range `first..=last`.
    ///
    /// When `first > last` the range wraps across the year end, so
    /// `from_range(305, 59)` allows November through February.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if either bound is not in 1..=366.
    pub fn from_range(first: u16, last: u16) -> Result<Self, CalendarError> {
        let first = Doy::new(first)?;
        let last = Doy::new(last)?;
        let mut allowed = [false; DAYS_IN_LEAP_YEAR];
        for (i, slot) in allowed.iter_mut().enumerate() {
            let doy = i as u16 + 1;
            *slot = if first <= last {
                doy >= first.get() && doy <= last.get()
            } else {
                doy >= first.get() || doy <= last.get()
            };
        }
        Ok(Self {
            allowed,
            bounds: (first, last),
        })
    }

    /// A mask allowing exactly the listed days of the year.
    ///
    /// The reported [`bounds`](Self::bounds) are the smallest and largest
    /// allowed day; an empty list yields a mask that allows nothing with
    /// bounds `(1, 1)`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if any entry is not in 1..=366.
    pub fn from_allowed<I>(days: I) -> Result<Self, CalendarError>
    where
        I: IntoIterator<Item = u16>,
    {
        let mut allowed = [false; DAYS_IN_LEAP_YEAR];
        let mut lo: Option<Doy> = None;
        let mut hi: Option<Doy> = None;
        for d in days {
            let doy = Doy::new(d)?;
            allowed[doy.index()] = true;
            lo = Some(lo.map_or(doy, |l| l.min(doy)));
            hi = Some(hi.map_or(doy, |h| h.max(doy)));
        }
        Ok(Self {
            allowed,
            bounds: (lo.unwrap_or(Doy(1)), hi.unwrap_or(Doy(1))),
        })
    }

    /// Returns `true` if `doy` is allowed.
    pub fn is_allowed(&self, doy: Doy) -> bool {
        self.allowed[doy.index()]
    }

    /// Returns `true` if the day-of-year of `date` is allowed.
    pub fn allows(&self, date: AcqDate) -> bool {
        self.is_allowed(date.doy())
    }

    /// The first and last day of the season this mask describes.
    pub fn bounds(&self) -> (Doy, Doy) {
        self.bounds
    }

    /// Number of allowed days.
    pub fn n_allowed(&self) -> usize {
        self.allowed.iter().filter(|&&a| a).count()
    }
}

impl Default for DoyMask {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doy_new_valid() {
        assert_eq!(Doy::new(1).unwrap().get(), 1);
        assert_eq!(Doy::new(366).unwrap().get(), 366);
        assert_eq!(Doy::new(366).unwrap().index(), 365);
    }

    #[test]
    fn doy_new_invalid() {
        assert_eq!(Doy::new(0).unwrap_err(), CalendarError::InvalidDoy { doy: 0 });
        assert_eq!(
            Doy::new(367).unwrap_err(),
            CalendarError::InvalidDoy { doy: 367 }
        );
    }

    #[test]
    fn all_allows_everything() {
        let mask = DoyMask::all();
        assert_eq!(mask.n_allowed(), 366);
        assert_eq!(mask.bounds(), (Doy::new(1).unwrap(), Doy::new(366).unwrap()));
    }

    #[test]
    fn range_inclusive() {
        let mask = DoyMask::from_range(60, 120).unwrap();
        assert!(!mask.is_allowed(Doy::new(59).unwrap()));
        assert!(mask.is_allowed(Doy::new(60).unwrap()));
        assert!(mask.is_allowed(Doy::new(120).unwrap()));
        assert!(!mask.is_allowed(Doy::new(121).unwrap()));
        assert_eq!(mask.n_allowed(), 61);
    }

    #[test]
    fn range_wraps_year_end() {
        let mask = DoyMask::from_range(335, 31).unwrap();
        assert!(mask.is_allowed(Doy::new(366).unwrap()));
        assert!(mask.is_allowed(Doy::new(1).unwrap()));
        assert!(mask.is_allowed(Doy::new(31).unwrap()));
        assert!(!mask.is_allowed(Doy::new(32).unwrap()));
        assert!(!mask.is_allowed(Doy::new(334).unwrap()));
        assert_eq!(mask.n_allowed(), 32 + 31);
    }

    #[test]
    fn range_rejects_bad_bounds() {
        assert!(DoyMask::from_range(0, 10).is_err());
        assert!(DoyMask::from_range(10, 400).is_err());
    }

    #[test]
    fn from_allowed_bounds() {
        let mask = DoyMask::from_allowed([200, 10, 150]).unwrap();
        assert_eq!(mask.n_allowed(), 3);
        assert_eq!(mask.bounds().0.get(), 10);
        assert_eq!(mask.bounds().1.get(), 200);
        assert!(mask.is_allowed(Doy::new(150).unwrap()));
        assert!(!mask.is_allowed(Doy::new(151).unwrap()));
    }

    #[test]
    fn from_allowed_empty() {
        let mask = DoyMask::from_allowed(std::iter::empty()).unwrap();
        assert_eq!(mask.n_allowed(), 0);
    }

    #[test]
    fn allows_date() {
        let mask = DoyMask::from_range(60, 366).unwrap();
        assert!(!mask.allows(AcqDate::new(2021, 2, 28).unwrap()));
        assert!(mask.allows(AcqDate::new(2021, 3, 1).unwrap()));
    }

    #[test]
    fn default_is_all() {
        assert_eq!(DoyMask::default(), DoyMask::all());
    }
}
