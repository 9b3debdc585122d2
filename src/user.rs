use std::{fmt, str::FromStr};

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret, Zeroize};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Copy, Clone, Eq, Hash)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(uuid: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(uuid)?))
    }
}

#[derive(Deserialize, Serialize)]
pub struct Credentials {
    pub email: EmailAddress,
    pub password: Secret<Password>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(transparent)]
pub struct Password(pub String);

impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}
impl CloneableSecret for Password {}
impl DebugSecret for Password {}
impl SerializableSecret for Password {}

impl FromStr for Password {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 6 {
            return Err(anyhow!("Password must be at least 6 characters long"));
        }

        Ok(Self(s.to_string()))
    }
}

#[derive(Deserialize, Serialize)]
pub struct RegisterUserParameters {
    pub first_name: String,
    pub last_name: String,
    #[serde(flatten)]
    pub credentials: Credentials,
}

impl RegisterUserParameters {
    pub fn try_new(
        first_name: String,
        last_name: String,
        credentials: Credentials,
    ) -> Result<Self, anyhow::Error> {
        if first_name.is_empty() {
            return Err(anyhow!("first_name is required"));
        }
        if last_name.is_empty() {
            return Err(anyhow!("last_name is required"));
        }

        Ok(Self {
            first_name,
            last_name,
            credentials,
        })
    }
}

/// An authenticated session as returned by `POST /accounts/login/`.
#[derive(Deserialize, Serialize)]
pub struct Session {
    pub user: User,
    pub token: Secret<SessionToken>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(transparent)]
pub struct SessionToken(pub String);

impl Zeroize for SessionToken {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}
impl CloneableSecret for SessionToken {}
impl DebugSecret for SessionToken {}
impl SerializableSecret for SessionToken {}
