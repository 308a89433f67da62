// src/domain/progress.rs
//
// 90日プログラムの日数・週・ストリーク計算。日付はすべて UTC の暦日で扱う

use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashSet;

use crate::domain::goal_model;
use crate::domain::journal_entry_model;

pub const PROGRAM_DAYS: i64 = 90;

/// UTC の今日
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// プログラム開始日から数えた日番号（1..=90 に丸める）
pub fn day_number(first_entry_date: Option<NaiveDate>, date: NaiveDate) -> i32 {
    match first_entry_date {
        Some(start) => {
            let days = (date - start).num_days();
            (days + 1).clamp(1, PROGRAM_DAYS) as i32
        }
        None => 1,
    }
}

/// `end` を含めて遡り、内容のある日が何日連続しているか
pub fn streak_ending_at(content_dates: &[NaiveDate], end: NaiveDate) -> i32 {
    let dates: HashSet<NaiveDate> = content_dates.iter().copied().collect();
    let mut streak = 0;
    let mut cursor = end;
    while dates.contains(&cursor) {
        streak += 1;
        cursor -= Duration::days(1);
    }
    streak
}

/// 指定日を含む週の月曜日
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// 週次レビューの週番号。今週の月曜を1週目として数え、過去の週は1に丸める
pub fn review_week_number(week_start: NaiveDate, today: NaiveDate) -> i32 {
    let current_monday = monday_of(today);
    let weeks = (week_start - current_monday).num_days().div_euclid(7);
    (weeks + 1).max(1) as i32
}

/// プログラム開始日から見た現在の週番号（1始まり）
pub fn program_week_number(first_entry_date: NaiveDate, today: NaiveDate) -> i32 {
    let days = (today - first_entry_date).num_days().max(0);
    (days / 7 + 1) as i32
}

/// プログラムの第 `week_number` 週の初日と最終日
pub fn program_week_bounds(first_entry_date: NaiveDate, week_number: i32) -> (NaiveDate, NaiveDate) {
    let start = first_entry_date + Duration::days(7 * (week_number.max(1) as i64 - 1));
    (start, start + Duration::days(6))
}

fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map_or(31, |last| last.day())
}

fn percent(part: usize, whole: usize) -> i64 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as i64
}

/// GET /api/progress/stats のレスポンス
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub weekly_progress: i64,
    pub monthly_progress: String,
    pub days_completed: usize,
    #[serde(rename = "progress90Day")]
    pub progress_90_day: i64,
    pub current_day: i32,
    pub current_streak: i32,
    pub goals_completed: usize,
    pub total_goals: usize,
    pub goals_progress: i64,
}

impl ProgressStats {
    /// entries は entry_date 降順で渡すこと
    pub fn compute(
        entries: &[journal_entry_model::Model],
        goals: &[goal_model::Model],
        today: NaiveDate,
    ) -> Self {
        let first_entry_date = entries.iter().map(|e| e.entry_date).min();
        let with_content: Vec<&journal_entry_model::Model> =
            entries.iter().filter(|e| e.has_content()).collect();

        // プログラム週 = 開始日から7日ごとの区切り。エントリがなければ今日から
        let (week_start, current_day) = match first_entry_date {
            Some(start) => {
                let days_since_start = (today - start).num_days();
                let current_week = days_since_start.div_euclid(7);
                (
                    start + Duration::days(current_week * 7),
                    day_number(Some(start), today),
                )
            }
            None => (today, 1),
        };
        let week_end = week_start + Duration::days(6);

        let weekly_entries = with_content
            .iter()
            .filter(|e| e.entry_date >= week_start && e.entry_date <= week_end)
            .count();

        let month_start = today.with_day(1).unwrap_or(today);
        let monthly_entries = with_content
            .iter()
            .filter(|e| e.entry_date >= month_start)
            .count();

        let total = with_content.len();
        let goals_completed = goals.iter().filter(|g| g.is_completed()).count();

        Self {
            weekly_progress: percent(weekly_entries, 7).min(100),
            monthly_progress: format!("{}/{}", monthly_entries, days_in_month(today)),
            days_completed: total,
            progress_90_day: percent(total, PROGRAM_DAYS as usize).min(100),
            current_day,
            current_streak: with_content.first().map_or(0, |e| e.streak),
            goals_completed,
            total_goals: goals.len(),
            goals_progress: percent(goals_completed, goals.len()),
        }
    }
}
