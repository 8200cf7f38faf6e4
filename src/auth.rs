// 认证系统 - 托管后端身份提供方的封装
// 开发心理：身份提供方是外部协作者，这里只定义接口和会话状态管理
// 设计原则：提供方可注入、会话变更可订阅、离线可用的Mock实现

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User already exists: {0}")]
    UserExists(String),
    #[error("No active session")]
    NotSignedIn,
    #[error("Provider error: {0}")]
    Provider(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

// 不透明的身份提供方接口
pub trait IdentityProvider {
    fn sign_up(&mut self, credentials: &Credentials) -> AuthResult<Session>;
    fn sign_in(&mut self, credentials: &Credentials) -> AuthResult<Session>;
    fn sign_out(&mut self) -> AuthResult<()>;
    fn restore_session(&self) -> Option<Session>;
}

pub type SessionListener = Box<dyn Fn(Option<&Session>)>;

// 会话管理器,持有当前会话并向订阅者广播变更
pub struct SessionManager {
    provider: Box<dyn IdentityProvider>,
    current: Option<Session>,
    listeners: Vec<SessionListener>,
}

impl SessionManager {
    pub fn new(provider: Box<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            current: None,
            listeners: Vec::new(),
        }
    }

    pub fn sign_up(&mut self, credentials: &Credentials) -> AuthResult<Session> {
        let session = self.provider.sign_up(credentials)?;
        info!("用户注册成功: {}", session.email);
        self.current = Some(session.clone());
        self.notify();
        Ok(session)
    }

    pub fn sign_in(&mut self, credentials: &Credentials) -> AuthResult<Session> {
        let session = self.provider.sign_in(credentials)?;
        info!("用户登录成功: {}", session.email);
        self.current = Some(session.clone());
        self.notify();
        Ok(session)
    }

    pub fn sign_out(&mut self) -> AuthResult<()> {
        if self.current.is_none() {
            return Err(AuthError::NotSignedIn);
        }
        self.provider.sign_out()?;
        self.current = None;
        self.notify();
        Ok(())
    }

    /// 从提供方恢复既有会话,应用启动时调用一次。
    pub fn restore(&mut self) -> Option<&Session> {
        self.current = self.provider.restore_session();
        if self.current.is_some() {
            debug!("会话已恢复");
        }
        self.notify();
        self.current.as_ref()
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn on_session_change(&mut self, listener: impl Fn(Option<&Session>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(self.current.as_ref());
        }
    }
}

#[derive(Debug, Clone)]
struct MockUser {
    user_id: String,
    password: String,
}

// 内存用户表,测试和离线模式使用
pub struct MockIdentityProvider {
    users: HashMap<String, MockUser>,
    active: Option<Session>,
    session_ttl: Duration,
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self {
            users: HashMap::new(),
            active: None,
            session_ttl: Duration::hours(24),
        }
    }
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue_session(&mut self, email: &str, user_id: &str) -> Session {
        let session = Session {
            user_id: user_id.to_string(),
            email: email.to_string(),
            token: format!("mock-token-{:08x}{:08x}", fastrand::u32(..), fastrand::u32(..)),
            expires_at: Utc::now() + self.session_ttl,
        };
        self.active = Some(session.clone());
        session
    }
}

impl IdentityProvider for MockIdentityProvider {
    fn sign_up(&mut self, credentials: &Credentials) -> AuthResult<Session> {
        if self.users.contains_key(&credentials.email) {
            return Err(AuthError::UserExists(credentials.email.clone()));
        }
        let user_id = format!("user-{:08x}", fastrand::u32(..));
        self.users.insert(
            credentials.email.clone(),
            MockUser {
                user_id: user_id.clone(),
                password: credentials.password.clone(),
            },
        );
        Ok(self.issue_session(&credentials.email, &user_id))
    }

    fn sign_in(&mut self, credentials: &Credentials) -> AuthResult<Session> {
        let user = self
            .users
            .get(&credentials.email)
            .filter(|user| user.password == credentials.password)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;
        Ok(self.issue_session(&credentials.email, &user.user_id))
    }

    fn sign_out(&mut self) -> AuthResult<()> {
        self.active = None;
        Ok(())
    }

    fn restore_session(&self) -> Option<Session> {
        self.active.clone().filter(|session| !session.is_expired())
    }
}
