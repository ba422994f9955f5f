use chrono::Duration;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Length of `span` in fractional hours, at millisecond resolution.
pub fn fractional_hours(span: Duration) -> f64 {
    span.num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Count, sum and sum of squares of whole-hour values.
///
/// Keeps the population mean and variance as exact integer moments so a
/// value sitting on the `mean ± m·std` edge is never pushed outside it by
/// rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HourMoments {
    count: i128,
    sum: i128,
    sum_of_squares: i128,
}

impl HourMoments {
    pub fn from_hours<I>(hours: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        hours.into_iter().fold(Self::default(), |mut moments, hour| {
            let hour = i128::from(hour);
            moments.count += 1;
            moments.sum += hour;
            moments.sum_of_squares += hour * hour;
            moments
        })
    }

    pub fn count(&self) -> usize {
        usize::try_from(self.count).unwrap_or(usize::MAX)
    }

    /// True when `hour` lies strictly outside `mean ± multiplier * std`.
    ///
    /// Evaluated as `(n·h − S)² > m²·(n·Q − S²)`; both integer sides are exact
    /// and only the multiplier carries floating point.
    pub fn is_outside_band(&self, hour: u32, multiplier: f64) -> bool {
        if self.count == 0 {
            return false;
        }
        let deviation = self.count * i128::from(hour) - self.sum;
        let spread = self.count * self.sum_of_squares - self.sum * self.sum;
        (deviation * deviation) as f64 > multiplier * multiplier * spread as f64
    }
}
