mod inmemory;
mod postgres;

use agenda_domain::{User, ID};
pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    async fn find_by_email(&self, email: &str) -> Option<User>;
    async fn find_by_username(&self, username: &str) -> Option<User>;
    async fn delete(&self, user_id: &ID) -> Option<User>;
}

#[cfg(test)]
mod tests {
    use crate::AgendaContext;
    use agenda_domain::User;

    #[tokio::test]
    async fn crud() {
        let ctx = AgendaContext::create_inmemory();
        let user = User::new(
            "alice".into(),
            "alice@example.com".into(),
            "$argon2id$fakehash".into(),
            100,
        );

        ctx.repos.users.insert(&user).await.expect("To insert user");

        assert_eq!(ctx.repos.users.find(&user.id).await, Some(user.clone()));
        assert_eq!(
            ctx.repos.users.find_by_email("alice@example.com").await,
            Some(user.clone())
        );
        assert_eq!(
            ctx.repos.users.find_by_username("alice").await,
            Some(user.clone())
        );
        assert!(ctx.repos.users.find_by_email("bob@example.com").await.is_none());

        let mut updated = user.clone();
        updated.is_active = false;
        ctx.repos.users.save(&updated).await.expect("To save user");
        assert_eq!(ctx.repos.users.find(&user.id).await, Some(updated));

        assert!(ctx.repos.users.delete(&user.id).await.is_some());
        assert!(ctx.repos.users.find(&user.id).await.is_none());
    }
}
