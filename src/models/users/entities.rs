use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::utils::jwt::{JwtUtils, TokenPair};

// 用户角色（两者互斥，创建后不可修改）
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Teacher, // 教师
    Student, // 学生
}

impl UserRole {
    pub const TEACHER: &'static str = "teacher";
    pub const STUDENT: &'static str = "student";

    pub fn all_roles() -> &'static [UserRole] {
        &[UserRole::Teacher, UserRole::Student]
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid user role: '{s}'. Supported roles: teacher, student"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Teacher => write!(f, "{}", UserRole::TEACHER),
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            UserRole::TEACHER => Ok(UserRole::Teacher),
            UserRole::STUDENT => Ok(UserRole::Student),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub password_hash: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn is_teacher(&self) -> bool {
        self.role == UserRole::Teacher
    }

    pub fn is_student(&self) -> bool {
        self.role == UserRole::Student
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(&self) -> Result<TokenPair> {
        Ok(JwtUtils::generate_token_pair(
            self.id,
            &self.role.to_string(),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_str() {
        for role in UserRole::all_roles() {
            assert_eq!(role.to_string().parse::<UserRole>().as_ref(), Ok(role));
        }
    }

    #[test]
    fn test_role_rejects_unknown_values() {
        assert!("admin".parse::<UserRole>().is_err());
        let parsed: std::result::Result<UserRole, _> = serde_json::from_str(r#""principal""#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User {
            id: 1,
            email: "t@example.com".to_string(),
            name: "T".to_string(),
            role: UserRole::Teacher,
            password_hash: "$argon2id$secret".to_string(),
            is_active: true,
            is_admin: false,
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&user).expect("serializable");
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "teacher");
    }
}
