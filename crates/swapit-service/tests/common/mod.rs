use diesel::{Connection, sqlite::SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub fn establish_test_connection() -> SqliteConnection {
    let mut connection =
        SqliteConnection::establish(":memory:").expect("Failed to create in-memory database");

    connection
        .run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");

    connection
}

pub mod server_utils {
    use super::*;
    use axum_test::TestServer;
    use std::sync::{Arc, Mutex};
    use swapit_service::{DefaultAppState, create_app, uploads::UploadStore};
    use tempfile::TempDir;

    /// In-memory database plus a throwaway upload directory. The TempDir must
    /// stay alive for the duration of the test.
    pub fn create_test_server() -> (TestServer, Arc<Mutex<SqliteConnection>>, TempDir) {
        let connection = establish_test_connection();
        let db = Arc::new(Mutex::new(connection));

        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
        let uploads = UploadStore::new(upload_dir.path()).expect("Failed to init upload store");

        let state = DefaultAppState::new(db.clone(), uploads);
        let server = TestServer::new(create_app(state)).unwrap();
        (server, db, upload_dir)
    }
}

pub mod test_utils {
    use super::*;
    use diesel::prelude::*;
    use swapit_service::models::Listing;
    use swapit_service::schema::listings;

    pub fn count_listings(conn: &mut SqliteConnection) -> i64 {
        listings::table
            .count()
            .get_result(conn)
            .expect("Failed to count listings")
    }

    pub fn get_listing_by_title(conn: &mut SqliteConnection, title: &str) -> Option<Listing> {
        listings::table
            .filter(listings::title.eq(title))
            .first::<Listing>(conn)
            .optional()
            .expect("Failed to query listing by title")
    }
}
