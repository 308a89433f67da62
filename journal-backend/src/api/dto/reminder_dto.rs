// src/api/dto/reminder_dto.rs
use serde::Serialize;

/// 1種類のリマインダーの送信結果
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderTally {
    pub sent: usize,
    pub skipped: usize,
    pub sent_to: Vec<String>,
    pub skipped_for: Vec<String>,
}

impl ReminderTally {
    pub fn record_sent(&mut self, email: &str) {
        self.sent += 1;
        self.sent_to.push(email.to_string());
    }

    pub fn record_skipped(&mut self, email: &str) {
        self.skipped += 1;
        self.skipped_for.push(email.to_string());
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DailyReminderResponse {
    pub success: bool,
    pub journal: ReminderTally,
    pub goals: ReminderTally,
    pub total: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ReminderResponse {
    pub success: bool,
    pub sent: usize,
    pub skipped: usize,
    pub total: usize,
}

impl ReminderResponse {
    pub fn from_tally(tally: &ReminderTally, total: usize) -> Self {
        Self {
            success: true,
            sent: tally.sent,
            skipped: tally.skipped,
            total,
        }
    }
}
