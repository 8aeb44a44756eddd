use aepcore::platform::{
    ConnectorOption,
    PlatformUrl,
};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;

use crate::SqliteBackend;

impl PlatformUrl for SqliteBackend {
    fn url(&self) -> &str {
        self.url.as_ref()
    }
}

impl SqliteBackend {
    pub async fn connect(opts: ConnectorOption) -> Result<SqliteBackend, sqlx::Error> {
        if opts.auto_create_db && !Sqlite::database_exists(&opts.url).await.unwrap_or(false) {
            log::warn!("sqlite database {} does not exist; creating...", &opts.url);
            Sqlite::create_database(&opts.url).await?
        }

        let pool = SqlitePool::connect(&opts.url).await?;
        Ok(SqliteBackend {
            pool: Arc::new(pool),
            url: opts.url,
        })
    }

    pub async fn migrate_aep(self) -> Result<Self, sqlx::Error> {
        sqlx::migrate!("migrations/aepac").run(&*self.pool).await?;
        Ok(self)
    }

    /// Connect and bring the schema up to date.
    pub async fn fp(opts: ConnectorOption) -> Result<SqliteBackend, sqlx::Error> {
        SqliteBackend::connect(opts).await?
            .migrate_aep()
            .await
    }
}

mod ac;

mod default_impl {
    use aepcore::platform::DefaultFPPlatform;
    use crate::SqliteBackend;

    impl DefaultFPPlatform for SqliteBackend {}
}
