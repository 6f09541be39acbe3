//! Role-based visibility of school-owned records

use serde::{Deserialize, Serialize};

/// Identifier of a school record
pub type SchoolId = u64;

/// Dashboard account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    School,
    Teacher,
    User,
}

impl Role {
    /// Parse a role name. Unknown names fall back to [`Role::User`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "school" => Role::School,
            "teacher" => Role::Teacher,
            "user" => Role::User,
            other => {
                log::debug!("unknown role `{other}`, treating as user");
                Role::User
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::School => "school",
            Role::Teacher => "teacher",
            Role::User => "user",
        }
    }

    /// Roles whose view is limited to their own school
    pub fn is_school_scoped(&self) -> bool {
        matches!(self, Role::School | Role::Teacher)
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Role::parse(name)
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Role::parse(&name)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The signed-in account a view is rendered for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: u64,
    pub role: Role,
    /// School the account belongs to, for school and teacher accounts
    #[serde(default)]
    pub school: Option<SchoolId>,
}

impl Actor {
    pub fn new(id: u64, role: Role) -> Self {
        Self {
            id,
            role,
            school: None,
        }
    }

    pub fn admin(id: u64) -> Self {
        Self::new(id, Role::Admin)
    }

    pub fn with_school(mut self, school: SchoolId) -> Self {
        self.school = Some(school);
        self
    }
}

/// A record owned by a school
pub trait SchoolScoped {
    fn school_id(&self) -> Option<SchoolId>;
}

/// Whether `actor` may see `item`.
///
/// Admins see everything. School and teacher accounts see records of their
/// own school; a record without a school, or an account without one, is
/// hidden from them. Plain users see nothing.
pub fn can_view<T: SchoolScoped + ?Sized>(actor: &Actor, item: &T) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::School | Role::Teacher => match (actor.school, item.school_id()) {
            (Some(own), Some(owner)) => own == owner,
            _ => false,
        },
        Role::User => false,
    }
}

/// The records of `items` that `actor` may see, in order
pub fn visible<'a, T: SchoolScoped>(actor: &Actor, items: &'a [T]) -> Vec<&'a T> {
    items.iter().filter(|item| can_view(actor, *item)).collect()
}
