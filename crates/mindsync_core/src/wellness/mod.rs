//! The daily wellness set: six tips picked from the pool with a seed derived
//! only from the calendar date, so every user sees the same list on a given
//! day. Per-user completion is laid over the generated titles afterwards.

mod tips;

pub use tips::TipPool;

use crate::clock::date_key;
use crate::completion::wellness_breakdown;
use crate::error::AppError;
use crate::model::{DailyActivity, WellnessActivity, WellnessCompletion};
use time::Date;

pub const DAILY_SET_SIZE: usize = 6;

const LCG_MULTIPLIER: i64 = 9301;
const LCG_INCREMENT: i64 = 49297;
const LCG_MODULUS: i64 = 233280;

pub fn daily_seed(date: Date) -> i64 {
    let month = i64::from(u8::from(date.month()));
    i64::from(date.year()) * 10_000 + month * 100 + i64::from(date.day())
}

/// Fisher-Yates driven by a small linear congruential generator.
///
/// The swap index is computed in floating point so the order matches the
/// lists users have already seen for past dates.
pub fn seeded_shuffle<T: Clone>(items: &[T], seed: i64) -> Vec<T> {
    let mut shuffled = items.to_vec();
    let mut state = seed;

    for i in (1..shuffled.len()).rev() {
        state = (state * LCG_MULTIPLIER + LCG_INCREMENT).rem_euclid(LCG_MODULUS);
        let j = ((state as f64 / LCG_MODULUS as f64) * (i + 1) as f64).floor() as usize;
        shuffled.swap(i, j);
    }

    shuffled
}

pub fn generate_daily_wellness_set(
    date: Date,
    pool: &TipPool,
) -> Result<Vec<DailyActivity>, AppError> {
    if pool.len() < DAILY_SET_SIZE {
        return Err(AppError::invalid_data(format!(
            "wellness tip pool needs at least {DAILY_SET_SIZE} tips, found {}",
            pool.len()
        )));
    }

    let seed = daily_seed(date);
    let shuffled = seeded_shuffle(pool.tips(), seed);
    tracing::debug!(seed, pool = pool.len(), "generated daily wellness set");

    Ok(shuffled
        .into_iter()
        .take(DAILY_SET_SIZE)
        .enumerate()
        .map(|(index, title)| DailyActivity {
            id: format!("wellness-{seed}-{index}"),
            title,
        })
        .collect())
}

pub fn overlay_completion(
    daily_set: &[DailyActivity],
    records: &[WellnessCompletion],
    date: Date,
) -> Vec<WellnessActivity> {
    let day = date_key(date);
    daily_set
        .iter()
        .map(|activity| WellnessActivity {
            id: activity.id.clone(),
            title: activity.title.clone(),
            completed: records
                .iter()
                .any(|record| record.date == day && record.title == activity.title),
        })
        .collect()
}

/// Generates the set for `date` and overlays the user's records in one step.
pub fn daily_wellness(
    date: Date,
    pool: &TipPool,
    records: &[WellnessCompletion],
) -> Result<Vec<WellnessActivity>, AppError> {
    let daily_set = generate_daily_wellness_set(date, pool)?;
    Ok(overlay_completion(&daily_set, records, date))
}

/// Score for the day: reaching the wellness target already counts as 100.
pub fn wellness_percentage(activities: &[WellnessActivity]) -> u8 {
    wellness_breakdown(activities).percentage
}

/// Adds the record for (`title`, `date`) or removes it if present.
///
/// Returns whether the title is completed afterwards.
pub fn toggle_completion(records: &mut Vec<WellnessCompletion>, title: &str, date: Date) -> bool {
    let day = date_key(date);
    let before = records.len();
    records.retain(|record| !(record.date == day && record.title == title));

    if records.len() != before {
        return false;
    }

    records.push(WellnessCompletion {
        title: title.to_string(),
        date: day,
    });
    true
}
