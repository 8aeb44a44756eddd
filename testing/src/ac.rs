use aepac::policy::{
    Builder,
    Policy,
};
use aepdb_sqlite::SqliteBackend;

use crate::clock::MockClock;

pub async fn create_sqlite_backend() -> anyhow::Result<SqliteBackend> {
    Ok(SqliteBackend::fp("sqlite::memory:".into()).await?)
}

/// A policy backed by a fresh in-memory database and the provided clock;
/// the backend is returned as well to act as the identity provider.
pub async fn create_sqlite_policy(
    clock: MockClock,
) -> anyhow::Result<(SqliteBackend, Policy)> {
    let backend = create_sqlite_backend().await?;
    let policy = Builder::new()
        .platform(backend.clone())
        .clock(clock)
        .build()?;
    Ok((backend, policy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[async_std::test]
    async fn smoke_test_create_policy() -> anyhow::Result<()> {
        create_sqlite_backend().await?;
        create_sqlite_policy(MockClock::new(0)).await?;
        Ok(())
    }
}
