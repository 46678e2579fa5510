use crate::models::entry_type::EntryType;
use crate::models::work_subtype::WorkSubtype;

/// Preparation allowance granted on top of direct work with children.
pub const PREP_FACTOR: f64 = 0.5;

/// Prep hours earned by a single booking.
///
/// Only `work / time_with_children` bookings with positive hours earn prep
/// time (half of the booked hours, rounded to two decimals); everything else
/// yields `0.0`.
pub fn prep_hours(entry_type: EntryType, subtype: Option<WorkSubtype>, hours: f64) -> f64 {
    match (entry_type, subtype) {
        (EntryType::Work, Some(WorkSubtype::TimeWithChildren)) if hours > 0.0 => {
            round2(hours * PREP_FACTOR)
        }
        _ => 0.0,
    }
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_with_children_earns_half() {
        assert_eq!(
            prep_hours(EntryType::Work, Some(WorkSubtype::TimeWithChildren), 8.0),
            4.0
        );
        assert_eq!(
            prep_hours(EntryType::Work, Some(WorkSubtype::TimeWithChildren), 2.5),
            1.25
        );
        assert_eq!(
            prep_hours(EntryType::Work, Some(WorkSubtype::TimeWithChildren), 1.5),
            0.75
        );
    }

    #[test]
    fn zero_hours_earn_nothing() {
        assert_eq!(
            prep_hours(EntryType::Work, Some(WorkSubtype::TimeWithChildren), 0.0),
            0.0
        );
    }

    #[test]
    fn other_combinations_earn_nothing() {
        for subtype in WorkSubtype::ALL {
            if subtype == WorkSubtype::TimeWithChildren {
                continue;
            }
            assert_eq!(prep_hours(EntryType::Work, Some(subtype), 8.0), 0.0);
        }
        assert_eq!(prep_hours(EntryType::Work, None, 8.0), 0.0);

        for t in EntryType::ALL.into_iter().filter(|t| !t.is_work()) {
            assert_eq!(prep_hours(t, Some(WorkSubtype::TimeWithChildren), 8.0), 0.0);
            assert_eq!(prep_hours(t, None, 8.0), 0.0);
        }
    }
}
