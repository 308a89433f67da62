// src/types/patch.rs
//
// 部分更新 (PUT) 用のフィールド型。
// キーなし → 変更しない / null または空文字 → NULL にする / 値 → 更新

use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Deserializer};

pub type Patch<T> = Option<Option<T>>;

/// `#[serde(default, deserialize_with = "deserialize_patch")]` で使う
pub fn deserialize_patch<'de, T, D>(deserializer: D) -> Result<Patch<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// 文字列の更新値を正規化する。空白のみは NULL 扱い
pub fn text_patch(value: Patch<String>) -> Patch<String> {
    value.map(|inner| inner.filter(|v| !v.trim().is_empty()))
}

/// キーが送られてきた項目だけ ActiveModel に反映する
pub fn apply_text_patch(target: &mut ActiveValue<Option<String>>, value: Patch<String>) {
    if let Some(inner) = text_patch(value) {
        *target = Set(inner);
    }
}
