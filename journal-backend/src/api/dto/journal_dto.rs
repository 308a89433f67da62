// src/api/dto/journal_dto.rs
use crate::domain::journal_entry_model;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- Request DTOs ---

#[derive(Deserialize, Debug, Default)]
pub struct JournalEntryQuery {
    pub date: Option<String>,
}

/// day_number はクライアントから送られても無視する（常にサーバー側で計算）
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct SaveJournalEntryDto {
    pub entry_date: Option<String>,
    pub gratitude: Option<String>,
    pub priority_1: Option<String>,
    pub priority_2: Option<String>,
    pub priority_3: Option<String>,
    pub tasks: Option<Vec<Value>>,
    pub reflection: Option<String>,
    pub mood: Option<String>,
    pub completed: Option<bool>,
}

// --- Response DTOs ---

#[derive(Serialize, Debug)]
pub struct JournalEntryResponse {
    pub entry: Option<journal_entry_model::Model>,
}

#[derive(Serialize, Debug)]
pub struct SaveJournalEntryResponse {
    pub success: bool,
    pub entry: journal_entry_model::Model,
}

#[derive(Serialize, Debug)]
pub struct JournalListResponse {
    pub entries: Vec<journal_entry_model::Model>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FirstEntryResponse {
    pub first_entry_date: Option<NaiveDate>,
}
