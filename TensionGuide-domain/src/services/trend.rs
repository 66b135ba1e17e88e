use crate::entities::blood_pressure::{Measurement, PressurePair, TrendSignal};

/// Number of readings in each comparison window
pub const TREND_WINDOW: usize = 3;

/// Mean difference in mmHg below which a change is treated as noise
pub const TREND_THRESHOLD_MMHG: f64 = 5.0;

/// Trend of a measurement history ordered oldest to newest
pub fn blood_pressure_trend(measurements: &[Measurement]) -> TrendSignal {
    trend_of(measurements)
}

/// Compare the mean of the last three readings with the three before them.
///
/// `readings` must be ordered oldest to newest. The older window may hold
/// fewer than three readings; when it is empty the result is
/// [`TrendSignal::InsufficientData`].
pub fn trend_of<R: PressurePair>(readings: &[R]) -> TrendSignal {
    let len = readings.len();
    if len < 2 {
        return TrendSignal::InsufficientData;
    }

    let recent = &readings[len.saturating_sub(TREND_WINDOW)..];
    let older = &readings[len.saturating_sub(2 * TREND_WINDOW)..len.saturating_sub(TREND_WINDOW)];

    if recent.is_empty() || older.is_empty() {
        return TrendSignal::InsufficientData;
    }

    let (recent_systolic, recent_diastolic) = mean_pair(recent);
    let (older_systolic, older_diastolic) = mean_pair(older);

    let systolic_diff = recent_systolic - older_systolic;
    let diastolic_diff = recent_diastolic - older_diastolic;

    if systolic_diff > TREND_THRESHOLD_MMHG || diastolic_diff > TREND_THRESHOLD_MMHG {
        TrendSignal::Increasing
    } else if systolic_diff < -TREND_THRESHOLD_MMHG || diastolic_diff < -TREND_THRESHOLD_MMHG {
        TrendSignal::Decreasing
    } else {
        TrendSignal::Stable
    }
}

// Caller guarantees a non-empty window
fn mean_pair<R: PressurePair>(window: &[R]) -> (f64, f64) {
    let (systolic_sum, diastolic_sum) = window.iter().fold((0.0, 0.0), |(s, d), r| {
        (s + r.systolic() as f64, d + r.diastolic() as f64)
    });
    let count = window.len() as f64;
    (systolic_sum / count, diastolic_sum / count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::measurement_series;

    #[test]
    fn test_insufficient_data() {
        assert_eq!(trend_of::<(i32, i32)>(&[]), TrendSignal::InsufficientData);
        assert_eq!(trend_of(&[(120, 80)]), TrendSignal::InsufficientData);
        assert_eq!(blood_pressure_trend(&[]), TrendSignal::InsufficientData);
    }

    #[test]
    fn test_short_histories_have_no_older_window() {
        // With 2 or 3 readings every reading is in the recent window
        assert_eq!(trend_of(&[(120, 80), (160, 100)]), TrendSignal::InsufficientData);
        assert_eq!(
            trend_of(&[(120, 80), (140, 90), (160, 100)]),
            TrendSignal::InsufficientData
        );
    }

    #[test]
    fn test_partial_older_window() {
        // 4 readings: older = [0], recent = [1..4]
        let readings = [(120, 80), (130, 80), (130, 80), (130, 80)];
        assert_eq!(trend_of(&readings), TrendSignal::Increasing);

        // 5 readings: older = [0, 1], recent = [2..5]
        let readings = [(140, 90), (140, 90), (138, 88), (137, 88), (136, 87)];
        assert_eq!(trend_of(&readings), TrendSignal::Stable);
    }

    #[test]
    fn test_stable() {
        let readings = measurement_series(&[(125, 82); 6]);
        assert_eq!(blood_pressure_trend(&readings), TrendSignal::Stable);
    }

    #[test]
    fn test_increasing() {
        let readings = measurement_series(&[
            (118, 80),
            (120, 80),
            (122, 80),
            (128, 80),
            (130, 80),
            (132, 80),
        ]);
        assert_eq!(blood_pressure_trend(&readings), TrendSignal::Increasing);
    }

    #[test]
    fn test_decreasing() {
        let readings = measurement_series(&[
            (130, 85),
            (130, 85),
            (130, 85),
            (120, 85),
            (120, 85),
            (120, 85),
        ]);
        assert_eq!(blood_pressure_trend(&readings), TrendSignal::Decreasing);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Exactly +5 is still stable
        let readings = [(120, 80), (120, 80), (120, 80), (125, 85), (125, 85), (125, 85)];
        assert_eq!(trend_of(&readings), TrendSignal::Stable);

        let readings = [(120, 80), (120, 80), (120, 80), (115, 75), (115, 75), (115, 75)];
        assert_eq!(trend_of(&readings), TrendSignal::Stable);
    }

    #[test]
    fn test_diastolic_alone_drives_trend() {
        let readings = [(120, 70), (120, 70), (120, 70), (120, 80), (120, 80), (120, 80)];
        assert_eq!(trend_of(&readings), TrendSignal::Increasing);
    }

    #[test]
    fn test_increase_checked_before_decrease() {
        // Systolic up 10, diastolic down 10
        let readings = [(120, 90), (120, 90), (120, 90), (130, 80), (130, 80), (130, 80)];
        assert_eq!(trend_of(&readings), TrendSignal::Increasing);
    }

    #[test]
    fn test_only_last_six_readings_count() {
        let mut readings = vec![(200, 120); 10];
        readings.extend([(120, 80), (120, 80), (120, 80), (120, 80), (120, 80), (120, 80)]);
        assert_eq!(trend_of(&readings), TrendSignal::Stable);
    }
}
