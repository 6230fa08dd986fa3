use serde::Deserialize;

pub const ROLE_ADMIN: &str = "group_admin";
pub const ROLE_USER: &str = "group_user";
pub const ROLE_ANONYMOUS: &str = "anonym";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}
