//! Employee trust level enumeration.

use serde::{Deserialize, Serialize};
use sqlx::Postgres;
use std::fmt;
use std::str::FromStr;

use till_core::AppError;

/// Trust levels available to employees.
///
/// Levels are totally ordered by their integer value:
/// Employee (1) < Manager (2) < Owner (3) < Admin (4). The derived `Ord`
/// follows declaration order, which matches the integer values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TrustLevel {
    /// Records sales.
    Employee = 1,
    /// Manages employees and inventory.
    Manager = 2,
    /// Store owner.
    Owner = 3,
    /// System administrator.
    Admin = 4,
}

impl TrustLevel {
    /// Every level, lowest first.
    pub const ALL: [TrustLevel; 4] = [Self::Employee, Self::Manager, Self::Owner, Self::Admin];

    /// Return the integer level (higher = more trusted).
    pub fn level(&self) -> u8 {
        *self as u8
    }

    /// Convert an integer level back into a trust level.
    pub fn from_level(level: u8) -> Result<Self, AppError> {
        Self::ALL
            .into_iter()
            .find(|t| t.level() == level)
            .ok_or_else(|| AppError::validation(format!("Unrecognized trust level: {level}")))
    }

    /// Check if this level is at least `required`.
    pub fn has_at_least(&self, required: TrustLevel) -> bool {
        self.level() >= required.level()
    }

    /// Return the canonical persisted string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::Manager => "Manager",
            Self::Owner => "Owner",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TrustLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Employee" => Ok(Self::Employee),
            "Manager" => Ok(Self::Manager),
            "Owner" => Ok(Self::Owner),
            "Admin" => Ok(Self::Admin),
            _ => Err(AppError::validation(format!(
                "Unrecognized trust level: '{s}'. Expected one of: Employee, Manager, Owner, Admin"
            ))),
        }
    }
}

// Persisted as the canonical string in a TEXT column. Decoding goes through
// `FromStr`, so an unknown value in the table surfaces as a row error.
impl sqlx::Type<Postgres> for TrustLevel {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <&str as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <&str as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, Postgres> for TrustLevel {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<'q, Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> sqlx::Decode<'r, Postgres> for TrustLevel {
    fn decode(
        value: <Postgres as sqlx::Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <&str as sqlx::Decode<'r, Postgres>>::decode(value)?;
        Ok(raw.parse::<TrustLevel>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_round_trip() {
        for level in TrustLevel::ALL {
            assert_eq!(level.as_str().parse::<TrustLevel>().unwrap(), level);
        }
        for s in ["Employee", "Manager", "Owner", "Admin"] {
            assert_eq!(s.parse::<TrustLevel>().unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_integer_round_trip() {
        for level in TrustLevel::ALL {
            assert_eq!(TrustLevel::from_level(level.level()).unwrap(), level);
        }
        assert_eq!(TrustLevel::Employee.level(), 1);
        assert_eq!(TrustLevel::Admin.level(), 4);
        assert!(TrustLevel::from_level(0).is_err());
        assert!(TrustLevel::from_level(5).is_err());
    }

    #[test]
    fn test_unknown_strings_are_rejected() {
        for s in ["", "admin", "ADMIN", "Superuser", " Manager", "1"] {
            let err = s.parse::<TrustLevel>().unwrap_err();
            assert!(err.message.contains("Unrecognized trust level"));
        }
    }

    #[test]
    fn test_ordering() {
        assert!(TrustLevel::Employee < TrustLevel::Manager);
        assert!(TrustLevel::Manager < TrustLevel::Owner);
        assert!(TrustLevel::Owner < TrustLevel::Admin);
        assert!(TrustLevel::Admin.has_at_least(TrustLevel::Employee));
        assert!(TrustLevel::Manager.has_at_least(TrustLevel::Manager));
        assert!(!TrustLevel::Owner.has_at_least(TrustLevel::Admin));
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let json = serde_json::to_string(&TrustLevel::Owner).unwrap();
        assert_eq!(json, "\"Owner\"");
        assert!(serde_json::from_str::<TrustLevel>("\"owner\"").is_err());
    }
}
