//! Team members and the member registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A person on the project team.
///
/// Members are plain values: two members with the same name and role compare
/// equal, and the registry happily stores duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub role: String,
}

impl Member {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.role)
    }
}

/// Member registry: an append-only, ordered list of members.
///
/// Order matters: notifications fan out in registration order.
#[derive(Debug, Clone, Default)]
pub struct Team {
    members: Vec<Member>,
}

impl Team {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_member(&mut self, member: Member) {
        self.members.push(member);
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn find(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
