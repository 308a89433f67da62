// journal-backend/src/utils/email.rs

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::env;
use thiserror::Error;
use tracing::{debug, info};

/// メール送信エラー
#[derive(Error, Debug)]
pub enum EmailError {
    #[error("SMTP configuration error: {0}")]
    ConfigurationError(String),

    #[error("Failed to send email: {0}")]
    SendError(String),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Missing email configuration: {0}")]
    MissingConfiguration(&'static str),
}

/// メール設定
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP サーバーホスト
    pub smtp_host: String,
    /// SMTP サーバーポート
    pub smtp_port: u16,
    /// SMTP ユーザー名
    pub smtp_username: String,
    /// SMTP パスワード
    pub smtp_password: String,
    /// 送信者メールアドレス
    pub from_email: String,
    /// 送信者名
    pub from_name: String,
    /// 465 番ポートなどの暗黙 TLS を使うか（false なら STARTTLS）
    pub implicit_tls: bool,
    /// 開発モードかどうか（ログ出力のみ）
    pub development_mode: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: "noreply@leveragejournal.com".to_string(),
            from_name: "Leverage Journal".to_string(),
            implicit_tls: false,
            development_mode: true,
        }
    }
}

impl EmailConfig {
    /// 環境変数から設定を読み込み
    pub fn from_env() -> Result<Self, EmailError> {
        let development_mode = env::var("EMAIL_DEVELOPMENT_MODE")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        if development_mode {
            return Ok(Self {
                development_mode: true,
                ..Default::default()
            });
        }

        let defaults = Self::default();

        let smtp_host = env::var("SMTP_HOST").unwrap_or(defaults.smtp_host);

        let smtp_port: u16 = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .map_err(|_| EmailError::ConfigurationError("Invalid SMTP port".to_string()))?;

        let smtp_username = env::var("SMTP_USERNAME")
            .or_else(|_| env::var("EMAIL_USER"))
            .map_err(|_| EmailError::MissingConfiguration("SMTP_USERNAME"))?;

        let smtp_password = env::var("SMTP_PASSWORD")
            .or_else(|_| env::var("EMAIL_PASS"))
            .map_err(|_| EmailError::MissingConfiguration("SMTP_PASSWORD"))?;

        // 未指定なら SMTP アカウント自身から送る
        let from_email = env::var("FROM_EMAIL").unwrap_or_else(|_| smtp_username.clone());

        let from_name = env::var("FROM_NAME").unwrap_or(defaults.from_name);

        let implicit_tls = env::var("SMTP_IMPLICIT_TLS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(smtp_port == 465);

        Ok(Self {
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            from_email,
            from_name,
            implicit_tls,
            development_mode: false,
        })
    }

    /// 設定の検証
    pub fn validate(&self) -> Result<(), EmailError> {
        if self.development_mode {
            return Ok(());
        }

        if self.smtp_host.is_empty() {
            return Err(EmailError::ConfigurationError(
                "SMTP host is required".to_string(),
            ));
        }

        if self.smtp_username.is_empty() || self.smtp_password.is_empty() {
            return Err(EmailError::ConfigurationError(
                "SMTP credentials are required".to_string(),
            ));
        }

        if !is_valid_email(&self.from_email) {
            return Err(EmailError::InvalidAddress(self.from_email.clone()));
        }

        Ok(())
    }
}

/// メール送信内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 宛先メールアドレス
    pub to_email: String,
    /// 宛先名
    pub to_name: Option<String>,
    /// 件名
    pub subject: String,
    /// HTMLボディ
    pub html_body: String,
    /// テキストボディ
    pub text_body: String,
}

/// メール送信の抽象。テストではメモリ上の実装に差し替える
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError>;
}

/// メール送信サービス（lettre の SMTP トランスポート）
pub struct EmailService {
    config: EmailConfig,
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl EmailService {
    /// 新しいEmailServiceを作成
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        config.validate()?;

        let transport = if config.development_mode {
            None
        } else {
            let builder = if config.implicit_tls {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            }
            .map_err(|e| EmailError::ConfigurationError(e.to_string()))?;

            Some(
                builder
                    .port(config.smtp_port)
                    .credentials(Credentials::new(
                        config.smtp_username.clone(),
                        config.smtp_password.clone(),
                    ))
                    .build(),
            )
        };

        Ok(Self { config, transport })
    }

    /// 環境変数から設定を読み込んでEmailServiceを作成
    pub fn from_env() -> Result<Self, EmailError> {
        let config = EmailConfig::from_env()?;
        Self::new(config)
    }

    pub fn is_development_mode(&self) -> bool {
        self.config.development_mode
    }

    fn build_message(&self, message: &EmailMessage) -> Result<Message, EmailError> {
        let from: Mailbox = Mailbox::new(
            Some(self.config.from_name.clone()),
            self.config
                .from_email
                .parse()
                .map_err(|_| EmailError::InvalidAddress(self.config.from_email.clone()))?,
        );
        let to: Mailbox = Mailbox::new(
            message.to_name.clone(),
            message
                .to_email
                .parse()
                .map_err(|_| EmailError::InvalidAddress(message.to_email.clone()))?,
        );

        Message::builder()
            .from(from)
            .to(to)
            .subject(message.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                message.text_body.clone(),
                message.html_body.clone(),
            ))
            .map_err(|e| EmailError::SendError(e.to_string()))
    }

    /// 開発モードでのメールログ出力
    fn log_email(&self, message: &EmailMessage) {
        info!(
            to_email = %mask_email(&message.to_email),
            subject = %message.subject,
            "Email (development mode, not sent)"
        );
        debug!("{}", message.text_body);
    }
}

#[async_trait]
impl Mailer for EmailService {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        if !is_valid_email(&message.to_email) {
            return Err(EmailError::InvalidAddress(message.to_email.clone()));
        }

        let Some(transport) = &self.transport else {
            self.log_email(message);
            return Ok(());
        };

        let email = self.build_message(message)?;
        transport
            .send(email)
            .await
            .map_err(|e| EmailError::SendError(e.to_string()))?;

        info!(
            to_email = %mask_email(&message.to_email),
            subject = %message.subject,
            "Email sent successfully"
        );

        Ok(())
    }
}

// --- ユーティリティ関数 ---

/// 簡単なメールアドレス検証
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    if email.chars().any(char::is_whitespace) {
        return false;
    }

    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// メールアドレスをマスク
pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let masked_local = match local.chars().next() {
            Some(first) if local.chars().count() > 2 => format!("{}****", first),
            _ => "*".repeat(local.chars().count()),
        };
        format!("{}{}", masked_local, domain)
    } else {
        "****@****".to_string()
    }
}

/// 表示名。メタデータの full_name → name → メールのローカル部
pub fn display_name(full_name: Option<&str>, name: Option<&str>, email: &str) -> String {
    full_name
        .or(name)
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| email.split('@').next().unwrap_or(email).to_string())
}
