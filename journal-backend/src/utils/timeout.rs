// src/utils/timeout.rs

use crate::error::{AppError, AppResult};
use std::future::Future;
use std::time::Duration;

pub const JOURNAL_SAVE_TIMEOUT: Duration = Duration::from_secs(8);
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(5);
pub const LIST_TIMEOUT: Duration = Duration::from_secs(2);

/// 時間内に終わらなければ GatewayTimeout を返す
pub async fn with_timeout<T, F>(duration: Duration, message: &str, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(duration, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::GatewayTimeout(message.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_times_out() {
        let result: AppResult<()> = with_timeout(Duration::from_millis(20), "slow", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(AppError::GatewayTimeout(m)) if m == "slow"));
    }

    #[tokio::test]
    async fn test_passes_through_result() {
        let result = with_timeout(Duration::from_secs(1), "slow", async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
