// src/service/reminder_service.rs
//
// cron から呼ばれるリマインダー送信。ユーザーを順に処理し、1人1通。
// 送信失敗はログに残して次のユーザーへ進む（再送はしない）

use crate::api::dto::reminder_dto::ReminderTally;
use crate::domain::progress::{program_week_bounds, program_week_number, today};
use crate::error::AppResult;
use crate::infrastructure::identity::{AuthUser, IdentityProvider};
use crate::repository::goal_repository::GoalRepository;
use crate::repository::journal_entry_repository::JournalEntryRepository;
use crate::repository::weekly_review_repository::WeeklyReviewRepository;
use crate::service::notification_service::{NotificationService, Recipient};
use crate::utils::email::mask_email;
use crate::utils::email_templates::GoalSnapshot;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// メールを送れるユーザー
struct Addressee {
    id: Option<Uuid>,
    email: String,
    name: String,
}

impl Addressee {
    fn from_user(user: &AuthUser) -> Option<Self> {
        let email = user.email()?.to_string();
        let name = user.display_name().unwrap_or_else(|| email.clone());
        Some(Self {
            id: Uuid::parse_str(&user.id).ok(),
            email,
            name,
        })
    }

    fn recipient(&self) -> Recipient<'_> {
        Recipient {
            email: &self.email,
            name: Some(&self.name),
            user_id: self.id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyReminderReport {
    pub journal: ReminderTally,
    pub goals: ReminderTally,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderReport {
    pub tally: ReminderTally,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestEmailReport {
    pub sent: usize,
    pub failed_emails: Vec<String>,
    pub total: usize,
}

pub struct ReminderService {
    identity: Arc<dyn IdentityProvider>,
    journal_repo: Arc<JournalEntryRepository>,
    goal_repo: Arc<GoalRepository>,
    review_repo: Arc<WeeklyReviewRepository>,
    notifications: Arc<NotificationService>,
}

impl ReminderService {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        journal_repo: Arc<JournalEntryRepository>,
        goal_repo: Arc<GoalRepository>,
        review_repo: Arc<WeeklyReviewRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            identity,
            journal_repo,
            goal_repo,
            review_repo,
            notifications,
        }
    }

    async fn users(&self) -> AppResult<Vec<AuthUser>> {
        let users = self.identity.list_users().await.map_err(|e| {
            error!(error = %e, "Failed to fetch users");
            e
        })?;
        Ok(users)
    }

    /// 今日のエントリがない（または空の）ユーザーへ日記のリマインダー
    async fn remind_journal(&self, user: &Addressee, date: NaiveDate, tally: &mut ReminderTally) {
        let entry = match user.id {
            Some(user_id) => match self.journal_repo.find_by_date(user_id, date).await {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(email = %mask_email(&user.email), error = %e, "Failed to load today's entry");
                    None
                }
            },
            None => None,
        };

        if entry.as_ref().is_some_and(|e| e.has_content()) {
            tally.record_skipped(&user.email);
            return;
        }

        match self.notifications.send_journal_reminder(user.recipient()).await {
            Ok(()) => tally.record_sent(&user.email),
            Err(e) => error!(
                email = %mask_email(&user.email),
                error = %e,
                "Failed to send journal reminder"
            ),
        }
    }

    /// 進行中の目標があるユーザーへ目標のリマインダー
    async fn remind_goals(&self, user: &Addressee, tally: &mut ReminderTally) {
        let Some(user_id) = user.id else {
            tally.record_skipped(&user.email);
            return;
        };

        let goals = match self.goal_repo.find_active_for_user(user_id).await {
            Ok(goals) => goals,
            Err(e) => {
                error!(email = %mask_email(&user.email), error = %e, "Failed to load goals");
                return;
            }
        };

        if goals.is_empty() {
            tally.record_skipped(&user.email);
            return;
        }

        let snapshots: Vec<GoalSnapshot> = goals
            .iter()
            .map(|g| GoalSnapshot {
                title: g.title.clone(),
                progress: g.progress,
            })
            .collect();

        match self
            .notifications
            .send_goal_reminder(user.recipient(), &snapshots)
            .await
        {
            Ok(()) => tally.record_sent(&user.email),
            Err(e) => error!(
                email = %mask_email(&user.email),
                error = %e,
                "Failed to send goal reminder"
            ),
        }
    }

    /// プログラムの今週分のレビューが未作成のユーザーへ週次レビューのリマインダー
    async fn remind_weekly_review(
        &self,
        user: &Addressee,
        date: NaiveDate,
        tally: &mut ReminderTally,
    ) -> AppResult<()> {
        let first_entry_date = match user.id {
            Some(user_id) => self.journal_repo.first_entry_date(user_id).await?,
            None => None,
        };
        let (Some(user_id), Some(first_entry_date)) = (user.id, first_entry_date) else {
            tally.record_skipped(&user.email);
            return Ok(());
        };

        // レビューの週番号は暦週基準なので、期間の重なりで判定する
        let week_number = program_week_number(first_entry_date, date);
        let (week_start, week_end) = program_week_bounds(first_entry_date, week_number);
        if self
            .review_repo
            .exists_overlapping(user_id, week_start, week_end)
            .await?
        {
            tally.record_skipped(&user.email);
            return Ok(());
        }

        match self
            .notifications
            .send_weekly_review_reminder(user.recipient(), week_number)
            .await
        {
            Ok(()) => tally.record_sent(&user.email),
            Err(e) => error!(
                email = %mask_email(&user.email),
                error = %e,
                "Failed to send weekly review reminder"
            ),
        }
        Ok(())
    }

    pub async fn send_daily(&self) -> AppResult<DailyReminderReport> {
        let users = self.users().await?;
        let date = today();
        let mut report = DailyReminderReport {
            total: users.len(),
            ..Default::default()
        };

        for user in users.iter().filter_map(Addressee::from_user) {
            self.remind_journal(&user, date, &mut report.journal).await;
            self.remind_goals(&user, &mut report.goals).await;
        }

        info!(
            journal_sent = report.journal.sent,
            goals_sent = report.goals.sent,
            total = report.total,
            "Daily reminders processed"
        );
        Ok(report)
    }

    pub async fn send_journal_reminders(&self) -> AppResult<ReminderReport> {
        let users = self.users().await?;
        let date = today();
        let mut report = ReminderReport {
            total: users.len(),
            ..Default::default()
        };

        for user in users.iter().filter_map(Addressee::from_user) {
            self.remind_journal(&user, date, &mut report.tally).await;
        }

        info!(sent = report.tally.sent, skipped = report.tally.skipped, "Journal reminders processed");
        Ok(report)
    }

    pub async fn send_goal_reminders(&self) -> AppResult<ReminderReport> {
        let users = self.users().await?;
        let mut report = ReminderReport {
            total: users.len(),
            ..Default::default()
        };

        for user in users.iter().filter_map(Addressee::from_user) {
            self.remind_goals(&user, &mut report.tally).await;
        }

        info!(sent = report.tally.sent, skipped = report.tally.skipped, "Goal reminders processed");
        Ok(report)
    }

    pub async fn send_weekly_review_reminders(&self) -> AppResult<ReminderReport> {
        let users = self.users().await?;
        let date = today();
        let mut report = ReminderReport {
            total: users.len(),
            ..Default::default()
        };

        for user in users.iter().filter_map(Addressee::from_user) {
            if let Err(e) = self
                .remind_weekly_review(&user, date, &mut report.tally)
                .await
            {
                error!(email = %mask_email(&user.email), error = %e, "Weekly review check failed");
            }
        }

        info!(
            sent = report.tally.sent,
            skipped = report.tally.skipped,
            "Weekly review reminders processed"
        );
        Ok(report)
    }

    /// 登録済みの全ユーザーへテストメール
    pub async fn send_test_emails(&self) -> AppResult<TestEmailReport> {
        let users = self.users().await?;
        let mut report = TestEmailReport {
            total: users.len(),
            ..Default::default()
        };

        for user in users.iter().filter_map(Addressee::from_user) {
            match self.notifications.send_test_email(user.recipient()).await {
                Ok(()) => report.sent += 1,
                Err(e) => {
                    error!(email = %mask_email(&user.email), error = %e, "Failed to send test email");
                    report.failed_emails.push(user.email.clone());
                }
            }
        }

        Ok(report)
    }
}
