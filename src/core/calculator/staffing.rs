//! Staffing ratio for child headcounts.

/// Children under three per member of staff.
pub const UNDER_3_RATIO: f64 = 4.25;
/// Children three and older per member of staff.
pub const OVER_3_RATIO: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StaffingRequirement {
    pub under_3: u32,
    pub over_3: u32,
}

impl StaffingRequirement {
    pub fn total(&self) -> u32 {
        self.under_3 + self.over_3
    }
}

/// Staff required for one slot. Each group needs at least one person as soon
/// as a single child is present; halves round to the even neighbour.
pub fn required_staff(under_3: u32, over_3: u32) -> StaffingRequirement {
    StaffingRequirement {
        under_3: staff_for(under_3, UNDER_3_RATIO),
        over_3: staff_for(over_3, OVER_3_RATIO),
    }
}

fn staff_for(count: u32, ratio: f64) -> u32 {
    if count == 0 {
        return 0;
    }
    let needed = (f64::from(count) / ratio).round_ties_even();
    (needed as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_needs_nobody() {
        assert_eq!(required_staff(0, 0), StaffingRequirement::default());
    }

    #[test]
    fn at_least_one_per_group() {
        let r = required_staff(1, 1);
        assert_eq!((r.under_3, r.over_3, r.total()), (1, 1, 2));
    }

    #[test]
    fn under_three_ratio() {
        // 9 / 4.25 = 2.12
        assert_eq!(required_staff(9, 0).under_3, 2);
        // 17 / 4.25 = 4.0
        assert_eq!(required_staff(17, 0).under_3, 4);
    }

    #[test]
    fn halves_round_to_even() {
        assert_eq!(required_staff(0, 25).over_3, 2);
        assert_eq!(required_staff(0, 35).over_3, 4);
        assert_eq!(required_staff(0, 15).over_3, 2);
        assert_eq!(required_staff(0, 5).over_3, 1);
    }
}
