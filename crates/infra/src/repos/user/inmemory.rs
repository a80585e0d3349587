use super::IUserRepo;
use crate::repos::shared::inmemory_repo;
use agenda_domain::{User, ID};
use std::sync::Mutex;

pub struct InMemoryUserRepo {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        inmemory_repo::insert(user, &self.users);
        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        inmemory_repo::save(user, &self.users);
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        inmemory_repo::find(user_id, &self.users)
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        inmemory_repo::find_by(&self.users, |u| u.email == email)
            .into_iter()
            .next()
    }

    async fn find_by_username(&self, username: &str) -> Option<User> {
        inmemory_repo::find_by(&self.users, |u| u.username == username)
            .into_iter()
            .next()
    }

    async fn delete(&self, user_id: &ID) -> Option<User> {
        inmemory_repo::delete(user_id, &self.users)
    }
}
