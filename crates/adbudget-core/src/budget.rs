//! Budget exhaustion predicates shared by the reconciler, the dayparting
//! enforcement pass, and the reset jobs.

use rust_decimal::Decimal;

use crate::daypart::within_window;

/// Point-in-time view of one campaign's spend against its brand's budgets.
///
/// Campaign and brand both carry spend counters (duplicated for cheap reads),
/// so a pause/resume decision needs all four figures plus the two budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetSnapshot {
    pub campaign_spend_today: Decimal,
    pub campaign_spend_month: Decimal,
    pub brand_daily_spend: Decimal,
    pub brand_monthly_spend: Decimal,
    pub daily_budget: Decimal,
    pub monthly_budget: Decimal,
}

impl BudgetSnapshot {
    /// True when any spend figure meets or exceeds its budget.
    ///
    /// The reconciler pauses on `>=`, so a campaign exactly at budget counts
    /// as exhausted. [`strictly_under`](Self::strictly_under) uses strict `<`
    /// and fails at the same boundary, so both passes agree that an at-budget
    /// campaign is paused.
    #[must_use]
    pub fn exhausted(&self) -> bool {
        self.campaign_spend_today >= self.daily_budget
            || self.campaign_spend_month >= self.monthly_budget
            || self.brand_daily_spend >= self.daily_budget
            || self.brand_monthly_spend >= self.monthly_budget
    }

    /// True when every spend figure is strictly below its budget.
    #[must_use]
    pub fn strictly_under(&self) -> bool {
        self.campaign_spend_today < self.daily_budget
            && self.campaign_spend_month < self.monthly_budget
            && self.brand_daily_spend < self.daily_budget
            && self.brand_monthly_spend < self.monthly_budget
    }

    /// True when the monthly figures alone are strictly under budget.
    ///
    /// Used by the daily reset, which zeroes today's spend and re-derives
    /// activity from the window and the still-current monthly figures.
    #[must_use]
    pub fn monthly_under(&self) -> bool {
        self.campaign_spend_month < self.monthly_budget
            && self.brand_monthly_spend < self.monthly_budget
    }

    /// True when the daily figures alone are strictly under budget.
    ///
    /// Mirror of [`monthly_under`](Self::monthly_under) for the monthly reset.
    #[must_use]
    pub fn daily_under(&self) -> bool {
        self.campaign_spend_today < self.daily_budget
            && self.brand_daily_spend < self.daily_budget
    }
}

/// The enforcement predicate: a campaign should be active iff it is inside
/// its daypart window and every spend figure is strictly under budget.
#[must_use]
pub fn should_be_active(hour: u32, start: i16, end: i16, snapshot: &BudgetSnapshot) -> bool {
    within_window(hour, start, end) && snapshot.strictly_under()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(today: i64, month: i64, brand_daily: i64, brand_monthly: i64) -> BudgetSnapshot {
        BudgetSnapshot {
            campaign_spend_today: Decimal::from(today),
            campaign_spend_month: Decimal::from(month),
            brand_daily_spend: Decimal::from(brand_daily),
            brand_monthly_spend: Decimal::from(brand_monthly),
            daily_budget: Decimal::from(100),
            monthly_budget: Decimal::from(1000),
        }
    }

    #[test]
    fn under_budget_is_not_exhausted() {
        let s = snapshot(50, 500, 60, 600);
        assert!(!s.exhausted());
        assert!(s.strictly_under());
    }

    #[test]
    fn campaign_daily_at_budget_is_exhausted() {
        let s = snapshot(100, 500, 60, 600);
        assert!(s.exhausted());
        assert!(!s.strictly_under());
    }

    #[test]
    fn brand_monthly_over_budget_is_exhausted() {
        let s = snapshot(50, 500, 60, 1200);
        assert!(s.exhausted());
    }

    #[test]
    fn exhausted_and_strictly_under_agree_at_the_boundary() {
        // Exactly at budget: the reconciler's >= pauses and enforcement's <
        // refuses to reactivate. The two comparators never disagree.
        let s = snapshot(100, 500, 60, 600);
        assert!(s.exhausted());
        assert!(!s.strictly_under());
    }

    #[test]
    fn should_be_active_requires_window_and_budget() {
        let under = snapshot(50, 500, 60, 600);
        assert!(should_be_active(10, 0, 23, &under));
        assert!(!should_be_active(10, 12, 23, &under));

        let over = snapshot(100, 500, 60, 600);
        assert!(!should_be_active(10, 0, 23, &over));
    }

    #[test]
    fn monthly_under_ignores_daily_figures() {
        let s = snapshot(100, 500, 110, 600);
        assert!(s.monthly_under());
        assert!(!s.daily_under());
    }

    #[test]
    fn daily_under_ignores_monthly_figures() {
        let s = snapshot(50, 1000, 60, 1100);
        assert!(s.daily_under());
        assert!(!s.monthly_under());
    }
}
