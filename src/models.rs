//! Domain entities persisted by the [`Store`](crate::db::Store).

use std::fmt;
use std::str::FromStr;

use rusqlite::types::Type;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Oldest model year accepted for a vehicle.
pub const MIN_VEHICLE_YEAR: i32 = 1950;

/// A vehicle record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Vehicle {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "ano")]
    pub year: i32,
}

impl Vehicle {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            brand: row.get(2)?,
            year: row.get(3)?,
        })
    }
}

/// Access profile attached to an administrator and embedded in its tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Adm,
    Editor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Adm => "Adm",
            Role::Editor => "Editor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Adm" => Ok(Role::Adm),
            "Editor" => Ok(Role::Editor),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// An administrator account. The password is only ever held as an Argon2 PHC hash.
#[derive(Debug, Clone)]
pub struct Administrator {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl Administrator {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let role: String = row.get(3)?;
        let role = role
            .parse()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

        Ok(Self {
            id: row.get(0)?,
            email: row.get(1)?,
            password_hash: row.get(2)?,
            role,
        })
    }
}
