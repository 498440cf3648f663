// src/author_index.rs

use std::collections::HashMap;

use crate::api::User;

/// Deduplicates author metadata observed while paginating. Last write wins;
/// author records are invariant within a run.
#[derive(Debug, Default)]
pub struct AuthorIndex {
    users: HashMap<String, User>,
}

impl AuthorIndex {
    pub fn new() -> Self {
        AuthorIndex {
            users: HashMap::new(),
        }
    }

    pub fn ingest(&mut self, users: &[User]) {
        for user in users {
            self.users.insert(user.id.clone(), user.clone());
        }
    }

    pub fn lookup(&self, author_id: &str) -> Option<&User> {
        self.users.get(author_id)
    }
}
