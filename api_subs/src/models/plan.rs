use chrono::{DateTime, Months, Utc};
use db::models::subscription::PlanKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Monthly,
    Yearly,
}

/// A purchasable plan. The catalog is fixed; prices are in EGP.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub id: PlanKind,
    pub name: &'static str,
    pub price: i64,
    pub period: BillingPeriod,
    pub features: &'static [&'static str],
}

pub const CATALOG: [Plan; 4] = [
    Plan {
        id: PlanKind::Basic,
        name: "Basic",
        price: 200,
        period: BillingPeriod::Monthly,
        features: &[
            "Manage one building",
            "Up to 20 units",
            "Basic support",
            "Monthly reports",
        ],
    },
    Plan {
        id: PlanKind::Standard,
        name: "Standard",
        price: 300,
        period: BillingPeriod::Monthly,
        features: &[
            "Manage up to 3 buildings",
            "Up to 50 units",
            "Priority support",
            "Detailed reports",
            "Automatic notifications",
        ],
    },
    Plan {
        id: PlanKind::Premium,
        name: "Premium",
        price: 500,
        period: BillingPeriod::Monthly,
        features: &[
            "Unlimited buildings",
            "Unlimited units",
            "24/7 support",
            "Custom reports",
            "Advanced notifications",
            "Mobile app",
        ],
    },
    Plan {
        id: PlanKind::Enterprise,
        name: "Enterprise",
        price: 1200,
        period: BillingPeriod::Yearly,
        features: &[
            "Everything in Premium",
            "Multiple user accounts",
            "Third-party integrations",
            "Custom onboarding",
            "Dedicated account manager",
        ],
    },
];

impl Plan {
    pub fn get(kind: PlanKind) -> &'static Plan {
        // The catalog covers every PlanKind variant.
        CATALOG
            .iter()
            .find(|plan| plan.id == kind)
            .unwrap_or(&CATALOG[0])
    }
}

/// Default billing period for a plan: enterprise bills yearly, the rest
/// monthly.
pub fn default_period(plan: PlanKind) -> BillingPeriod {
    match plan {
        PlanKind::Enterprise => BillingPeriod::Yearly,
        _ => BillingPeriod::Monthly,
    }
}

/// End date of a term starting at `start`. `None` only if the date would
/// overflow chrono's range.
pub fn term_end(
    start: DateTime<Utc>,
    plan: PlanKind,
    period: BillingPeriod,
) -> Option<DateTime<Utc>> {
    let months = if period == BillingPeriod::Yearly || plan == PlanKind::Enterprise {
        12
    } else {
        1
    };
    start.checked_add_months(Months::new(months))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn catalog_has_one_entry_per_plan() {
        for kind in [
            PlanKind::Basic,
            PlanKind::Standard,
            PlanKind::Premium,
            PlanKind::Enterprise,
        ] {
            assert_eq!(Plan::get(kind).id, kind);
        }
    }

    #[test]
    fn monthly_term_is_one_month() {
        let start = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        let end = term_end(start, PlanKind::Basic, BillingPeriod::Monthly).unwrap();
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 2, 15, 12, 0, 0).unwrap());
    }

    #[test]
    fn yearly_period_gets_a_year() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let end = term_end(start, PlanKind::Standard, BillingPeriod::Yearly).unwrap();
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn enterprise_always_gets_a_year() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let end = term_end(start, PlanKind::Enterprise, BillingPeriod::Monthly).unwrap();
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn month_end_clamps() {
        // Jan 31 + 1 month lands on Feb 28, not an invalid date.
        let start = Utc.with_ymd_and_hms(2025, 1, 31, 9, 0, 0).unwrap();
        let end = term_end(start, PlanKind::Basic, BillingPeriod::Monthly).unwrap();
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 2, 28, 9, 0, 0).unwrap());
    }
}
