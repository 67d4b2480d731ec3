#![cfg(feature = "sqlite")]

use sql_courier::prelude::*;
use tokio::runtime::Runtime;

async fn open(prefix: &str, return_query: bool) -> Result<DbConnection, SqlCourierError> {
    let mut builder = DbConfig::builder("main").return_query(return_query);
    if !prefix.is_empty() {
        builder = builder.prefix(prefix);
    }
    let config = builder.finish()?;
    let driver = SqliteDriver::open_in_memory()?;
    let mut conn = DbConnection::with_driver(Box::new(driver), config).await?;
    conn.execute_batch(
        "CREATE TABLE app_users (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            age INTEGER,
            active INTEGER NOT NULL DEFAULT 0,
            nickname TEXT
        );",
    )
    .await?;
    Ok(conn)
}

#[test]
fn crud_roundtrip_against_sqlite() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut conn = open("app_", true).await?;

        // Single-record insert renders a one-row VALUES tuple.
        let data = DataSet::row()
            .set("name", "O'Brien")
            .set("age", 30)
            .set("active", true);
        let inserted = conn.insert("users", &data).await?;
        assert_eq!(inserted.count, 1);
        assert_eq!(inserted.id, 1);
        assert_eq!(
            inserted.query.as_deref(),
            Some(
                "INSERT INTO `app_users` (`name`, `age`, `active`) \
                 VALUES ('O''Brien', 30, 1)"
            )
        );

        // Multi-record insert shares one column list.
        let batch = DataSet::rows(["name", "age", "active"])
            .add(vec!["Ada".into(), 36.into(), true.into()])
            .add(vec!["Grace".into(), SqlValue::Null, false.into()]);
        let inserted = conn.insert("users", &batch).await?;
        assert_eq!(inserted.count, 2);
        assert_eq!(inserted.id, 3);

        let fetched = conn
            .get(
                "users",
                "id, name, age",
                &Conditions::new().and("active", true),
                &Modifiers::new().order("id"),
            )
            .await?;
        assert_eq!(fetched.count, 2);
        let rows = fetched.data.as_slice();
        assert_eq!(rows[0].get("name").and_then(SqlValue::as_text), Some("O'Brien"));
        assert_eq!(rows[1].get("name").and_then(SqlValue::as_text), Some("Ada"));

        // NULL conditions compare with IS NULL.
        let missing_age = conn
            .get("users", "*", &Conditions::new().and("age", SqlValue::Null), &Modifiers::new())
            .await?;
        assert_eq!(missing_age.count, 1);

        let updated = conn
            .update(
                "users",
                &DataSet::row().set("age", 31),
                &Conditions::new().and("name", "O'Brien"),
                &Modifiers::new(),
            )
            .await?;
        assert_eq!(updated.count, 1);
        assert_eq!(
            updated.query.as_deref(),
            Some("UPDATE `app_users` SET `age`=31 WHERE `name`='O''Brien'")
        );

        let deleted = conn
            .delete("users", &Conditions::new().and("active", false), &Modifiers::new())
            .await?;
        assert_eq!(deleted.count, 1);
        assert_eq!(
            deleted.query.as_deref(),
            Some("DELETE FROM `app_users` WHERE `active`=0")
        );

        let remaining = conn
            .get("users", "*", &Conditions::new(), &Modifiers::new())
            .await?;
        assert_eq!(remaining.count, 2);

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn raw_conditions_pass_through_verbatim() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut conn = open("app_", false).await?;
        conn.insert(
            "users",
            &DataSet::rows(["name", "age"])
                .add(vec!["Ada".into(), 36.into()])
                .add(vec!["Grace".into(), 45.into()]),
        )
        .await?;

        let fetched = conn
            .get(
                "users",
                "name",
                &Conditions::raw("age > 40 OR name = 'Ada'"),
                &Modifiers::new().order("age DESC"),
            )
            .await?;
        assert_eq!(fetched.count, 2);
        assert_eq!(
            fetched.data.as_slice()[0].get("name").and_then(SqlValue::as_text),
            Some("Grace")
        );
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn schema_reports_one_row_per_column() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut conn = open("app_", true).await?;

        let outcome = conn.schema("users").await?;
        assert_eq!(outcome.count, 5);
        assert_eq!(outcome.query.as_deref(), Some("PRAGMA table_info(`app_users`)"));

        let names: Vec<_> = outcome
            .data
            .as_slice()
            .iter()
            .filter_map(|row| row.get("name").and_then(SqlValue::as_text))
            .collect();
        assert_eq!(names, ["id", "name", "age", "active", "nickname"]);
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn data_survives_reopening_an_on_disk_database() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("courier.db");
        let config = || {
            DbConfig::builder(path.to_string_lossy().into_owned())
                .charset("utf8")
                .finish()
        };

        let mut conn = DbConnection::connect(DatabaseType::Sqlite, config()?).await?;
        conn.execute_batch("CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT);")
            .await?;
        conn.insert("notes", &DataSet::row().set("body", "persisted")).await?;
        drop(conn);

        let mut conn = DbConnection::connect(DatabaseType::Sqlite, config()?).await?;
        let fetched = conn
            .get("notes", "body", &Conditions::new(), &Modifiers::new().single())
            .await?;
        assert_eq!(
            fetched.data.as_row().and_then(|row| row.get("body")).and_then(SqlValue::as_text),
            Some("persisted")
        );
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn execution_errors_carry_the_statement_text() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut conn = open("", false).await?;

        let err = conn
            .get("no_such_table", "*", &Conditions::new(), &Modifiers::new())
            .await
            .expect_err("missing table must fail");
        match err {
            SqlCourierError::ExecutionError { query, message, .. } => {
                assert_eq!(query, "SELECT * FROM `no_such_table`");
                assert!(message.contains("no_such_table"), "unexpected message: {message}");
            }
            other => panic!("expected execution error, got {other:?}"),
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
