//! Session earnings calculation.
//!
//! Splits a session's worked hours into regular and overtime hours and
//! prices them. Overtime is tiered by how much overtime the owner has
//! already recorded in the same calendar month:
//!
//! - Overtime that keeps the month at or under the threshold (60 hours by
//!   default) is paid at the base overtime multiplier (1.25×).
//! - Overtime beyond the threshold is paid at the excess multiplier (1.5×).
//! - A session that crosses the threshold is split between the two.
//!
//! A holiday session ignores all of this and pays every hour at the
//! holiday multiplier (1.5×).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EarningsRules;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

fn overflowed(field: &str, quantity: &str) -> EngineError {
    EngineError::Validation {
        field: field.to_string(),
        message: format!("{} is too large to compute", quantity),
    }
}

fn checked_product(a: Decimal, b: Decimal, quantity: &str) -> EngineResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflowed("hourly_rate", quantity))
}

fn checked_sum(a: Decimal, b: Decimal, quantity: &str) -> EngineResult<Decimal> {
    a.checked_add(b).ok_or_else(|| overflowed("hourly_rate", quantity))
}

/// How a session's overtime hours fall across the two monthly tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeTiering {
    /// Hours paid at the base overtime multiplier.
    pub hours_at_base: Decimal,
    /// Hours paid at the excess overtime multiplier.
    pub hours_at_excess: Decimal,
}

/// The full earnings breakdown for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsBreakdown {
    /// Hours paid at the plain rate.
    pub regular_hours: Decimal,
    /// Hours beyond the daily regular allowance.
    pub overtime_hours: Decimal,
    /// Overtime hours split by monthly tier.
    pub tiering: OvertimeTiering,
    /// Pay for the regular hours.
    pub regular_earnings: Decimal,
    /// Pay for the overtime hours.
    pub overtime_earnings: Decimal,
    /// Pay for a holiday session.
    pub holiday_earnings: Decimal,
    /// Sum of the three components.
    pub total_earnings: Decimal,
    /// Audit steps recording each rule applied.
    pub audit_steps: Vec<AuditStep>,
}

/// Splits a session's overtime between the monthly tiers.
///
/// `prior_monthly_overtime` is the overtime already recorded this month,
/// not counting this session. Fails with [`EngineError::Validation`]
/// when the monthly total does not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use earnings_engine::calculation::tier_overtime;
/// use rust_decimal::Decimal;
///
/// let tiering = tier_overtime(Decimal::from(6), Decimal::from(58), Decimal::from(60)).unwrap();
/// assert_eq!(tiering.hours_at_base, Decimal::from(2));
/// assert_eq!(tiering.hours_at_excess, Decimal::from(4));
/// ```
pub fn tier_overtime(
    overtime_hours: Decimal,
    prior_monthly_overtime: Decimal,
    monthly_threshold: Decimal,
) -> EngineResult<OvertimeTiering> {
    let month_total = prior_monthly_overtime
        .checked_add(overtime_hours)
        .ok_or_else(|| overflowed("overtime_hours", "monthly overtime"))?;

    if month_total <= monthly_threshold {
        Ok(OvertimeTiering {
            hours_at_base: overtime_hours,
            hours_at_excess: Decimal::ZERO,
        })
    } else if prior_monthly_overtime >= monthly_threshold {
        Ok(OvertimeTiering {
            hours_at_base: Decimal::ZERO,
            hours_at_excess: overtime_hours,
        })
    } else {
        let hours_at_base = monthly_threshold
            .checked_sub(prior_monthly_overtime)
            .ok_or_else(|| overflowed("overtime_hours", "monthly overtime"))?;
        let hours_at_excess = overtime_hours
            .checked_sub(hours_at_base)
            .ok_or_else(|| overflowed("overtime_hours", "monthly overtime"))?;
        Ok(OvertimeTiering {
            hours_at_base,
            hours_at_excess,
        })
    }
}

/// Computes the earnings breakdown for one session.
///
/// # Arguments
///
/// * `hours_worked` - Worked hours for the session
/// * `hourly_rate` - Pay per regular hour
/// * `is_holiday` - Whether the session is paid at the holiday rate
/// * `prior_monthly_overtime` - Overtime already recorded in the session's month
/// * `rules` - Thresholds and multipliers
/// * `step_number_start` - The starting step number for audit trail sequencing
///
/// Negative hours or rates flow straight through. The only failure is
/// arithmetic overflow on absurd magnitudes, reported as
/// [`EngineError::Validation`] against `hourly_rate`.
///
/// # Examples
///
/// ## Overtime crossing the monthly threshold
///
/// ```
/// use earnings_engine::calculation::compute_earnings;
/// use earnings_engine::config::EarningsRules;
/// use rust_decimal::Decimal;
///
/// let rules = EarningsRules::default();
/// let result = compute_earnings(Decimal::from(14), Decimal::from(20), false, Decimal::from(58), &rules, 1).unwrap();
///
/// // 8h regular, 2h at 1.25x, 4h at 1.5x
/// assert_eq!(result.regular_earnings, Decimal::from(160));
/// assert_eq!(result.overtime_earnings, Decimal::from(170));
/// assert_eq!(result.total_earnings, Decimal::from(330));
/// ```
///
/// ## Holiday session
///
/// ```
/// use earnings_engine::calculation::compute_earnings;
/// use earnings_engine::config::EarningsRules;
/// use rust_decimal::Decimal;
///
/// let rules = EarningsRules::default();
/// let result = compute_earnings(Decimal::from(10), Decimal::from(20), true, Decimal::ZERO, &rules, 1).unwrap();
///
/// assert_eq!(result.holiday_earnings, Decimal::from(300));
/// assert_eq!(result.overtime_hours, Decimal::ZERO);
/// ```
pub fn compute_earnings(
    hours_worked: Decimal,
    hourly_rate: Decimal,
    is_holiday: bool,
    prior_monthly_overtime: Decimal,
    rules: &EarningsRules,
    step_number_start: u32,
) -> EngineResult<EarningsBreakdown> {
    if is_holiday {
        return holiday_earnings(hours_worked, hourly_rate, rules, step_number_start);
    }

    let mut audit_steps = Vec::new();
    let mut step_number = step_number_start;
    let threshold = rules.daily_regular_hours;

    if hours_worked <= threshold {
        let regular_earnings = checked_product(hours_worked, hourly_rate, "regular earnings")?;
        audit_steps.push(AuditStep {
            step_number,
            rule_id: "daily_overtime_split".to_string(),
            rule_name: "Daily Overtime Split".to_string(),
            input: serde_json::json!({
                "hours_worked": hours_worked.normalize().to_string(),
                "daily_regular_hours": threshold.normalize().to_string()
            }),
            output: serde_json::json!({
                "regular_hours": hours_worked.normalize().to_string(),
                "overtime_hours": "0",
                "regular_earnings": regular_earnings.normalize().to_string()
            }),
            reasoning: format!(
                "{} hours worked is within the {} hour daily allowance, all paid at ${}",
                hours_worked.normalize(),
                threshold.normalize(),
                hourly_rate.normalize()
            ),
        });

        return Ok(EarningsBreakdown {
            regular_hours: hours_worked,
            overtime_hours: Decimal::ZERO,
            tiering: OvertimeTiering {
                hours_at_base: Decimal::ZERO,
                hours_at_excess: Decimal::ZERO,
            },
            regular_earnings,
            overtime_earnings: Decimal::ZERO,
            holiday_earnings: Decimal::ZERO,
            total_earnings: regular_earnings,
            audit_steps,
        });
    }

    let regular_hours = threshold;
    let overtime_hours = hours_worked
        .checked_sub(threshold)
        .ok_or_else(|| overflowed("hourly_rate", "overtime hours"))?;
    let regular_earnings = checked_product(regular_hours, hourly_rate, "regular earnings")?;

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "daily_overtime_split".to_string(),
        rule_name: "Daily Overtime Split".to_string(),
        input: serde_json::json!({
            "hours_worked": hours_worked.normalize().to_string(),
            "daily_regular_hours": threshold.normalize().to_string()
        }),
        output: serde_json::json!({
            "regular_hours": regular_hours.normalize().to_string(),
            "overtime_hours": overtime_hours.normalize().to_string(),
            "regular_earnings": regular_earnings.normalize().to_string()
        }),
        reasoning: format!(
            "{} hours worked exceeds the {} hour daily allowance by {} hours",
            hours_worked.normalize(),
            threshold.normalize(),
            overtime_hours.normalize()
        ),
    });
    step_number += 1;

    let monthly_threshold = rules.monthly_overtime_threshold;
    let tiering = tier_overtime(overtime_hours, prior_monthly_overtime, monthly_threshold)?;
    let base_rate = checked_product(hourly_rate, rules.overtime_base_multiplier, "overtime rate")?;
    let excess_rate = checked_product(hourly_rate, rules.overtime_excess_multiplier, "overtime rate")?;
    let overtime_earnings = checked_sum(
        checked_product(tiering.hours_at_base, base_rate, "overtime earnings")?,
        checked_product(tiering.hours_at_excess, excess_rate, "overtime earnings")?,
        "overtime earnings",
    )?;
    let total_earnings = checked_sum(regular_earnings, overtime_earnings, "total earnings")?;

    debug!(
        prior_monthly_overtime = %prior_monthly_overtime,
        overtime_hours = %overtime_hours,
        hours_at_base = %tiering.hours_at_base,
        hours_at_excess = %tiering.hours_at_excess,
        "Tiered session overtime"
    );

    let reasoning = if tiering.hours_at_excess == Decimal::ZERO {
        format!(
            "{} prior + {} new overtime hours stays within the {} hour monthly threshold: {} hours × ${} = ${}",
            prior_monthly_overtime.normalize(),
            overtime_hours.normalize(),
            monthly_threshold.normalize(),
            tiering.hours_at_base.normalize(),
            base_rate.normalize(),
            overtime_earnings.normalize()
        )
    } else if tiering.hours_at_base == Decimal::ZERO {
        format!(
            "{} prior overtime hours already reached the {} hour monthly threshold: {} hours × ${} = ${}",
            prior_monthly_overtime.normalize(),
            monthly_threshold.normalize(),
            tiering.hours_at_excess.normalize(),
            excess_rate.normalize(),
            overtime_earnings.normalize()
        )
    } else {
        format!(
            "Session crosses the {} hour monthly threshold: {} hours × ${} + {} hours × ${} = ${}",
            monthly_threshold.normalize(),
            tiering.hours_at_base.normalize(),
            base_rate.normalize(),
            tiering.hours_at_excess.normalize(),
            excess_rate.normalize(),
            overtime_earnings.normalize()
        )
    };

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "monthly_overtime_tier".to_string(),
        rule_name: "Monthly Overtime Tier".to_string(),
        input: serde_json::json!({
            "overtime_hours": overtime_hours.normalize().to_string(),
            "prior_monthly_overtime": prior_monthly_overtime.normalize().to_string(),
            "monthly_threshold": monthly_threshold.normalize().to_string(),
            "hourly_rate": hourly_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "hours_at_base": tiering.hours_at_base.normalize().to_string(),
            "hours_at_excess": tiering.hours_at_excess.normalize().to_string(),
            "base_multiplier": rules.overtime_base_multiplier.normalize().to_string(),
            "excess_multiplier": rules.overtime_excess_multiplier.normalize().to_string(),
            "overtime_earnings": overtime_earnings.normalize().to_string()
        }),
        reasoning,
    });

    Ok(EarningsBreakdown {
        regular_hours,
        overtime_hours,
        tiering,
        regular_earnings,
        overtime_earnings,
        holiday_earnings: Decimal::ZERO,
        total_earnings,
        audit_steps,
    })
}

fn holiday_earnings(
    hours_worked: Decimal,
    hourly_rate: Decimal,
    rules: &EarningsRules,
    step_number: u32,
) -> EngineResult<EarningsBreakdown> {
    let holiday_rate = checked_product(hourly_rate, rules.holiday_multiplier, "holiday rate")?;
    let holiday_earnings = checked_product(hours_worked, holiday_rate, "holiday earnings")?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "holiday_rate".to_string(),
        rule_name: "Holiday Rate".to_string(),
        input: serde_json::json!({
            "hours_worked": hours_worked.normalize().to_string(),
            "hourly_rate": hourly_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "multiplier": rules.holiday_multiplier.normalize().to_string(),
            "rate": holiday_rate.normalize().to_string(),
            "holiday_earnings": holiday_earnings.normalize().to_string()
        }),
        reasoning: format!(
            "Holiday session, every hour at {}×: {} hours × ${} = ${}",
            rules.holiday_multiplier.normalize(),
            hours_worked.normalize(),
            holiday_rate.normalize(),
            holiday_earnings.normalize()
        ),
    };

    Ok(EarningsBreakdown {
        regular_hours: Decimal::ZERO,
        overtime_hours: Decimal::ZERO,
        tiering: OvertimeTiering {
            hours_at_base: Decimal::ZERO,
            hours_at_excess: Decimal::ZERO,
        },
        regular_earnings: Decimal::ZERO,
        overtime_earnings: Decimal::ZERO,
        holiday_earnings,
        total_earnings: holiday_earnings,
        audit_steps: vec![audit_step],
    })
}
