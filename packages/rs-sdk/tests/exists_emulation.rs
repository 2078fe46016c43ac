use std::collections::BTreeMap;

use iseries_rs_sdk::{open_connection, Connection, OpenConnectionConfig, SqliteBackend, Value};

const COUNTRIES: [&str; 7] = ["BE", "NL", "FR", "ES", "DE", "US", "GB"];

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

async fn seeded_connection() -> Connection {
    let backend = SqliteBackend::in_memory().expect("in-memory backend should initialize");
    backend
        .execute_batch(
            "ATTACH DATABASE ':memory:' AS SYSIBM;
             CREATE TABLE SYSIBM.SYSDUMMY1 (IBMREQD TEXT NOT NULL);
             INSERT INTO SYSIBM.SYSDUMMY1 (IBMREQD) VALUES ('Y');
             CREATE TABLE country (code TEXT PRIMARY KEY);
             CREATE TABLE customer (
                 id INTEGER PRIMARY KEY,
                 name TEXT NOT NULL,
                 country1 TEXT NOT NULL DEFAULT ' ',
                 country2 TEXT NOT NULL DEFAULT ' ',
                 country3 TEXT NOT NULL DEFAULT ' ',
                 delete_code TEXT NOT NULL DEFAULT ' '
             );",
        )
        .expect("schema setup should succeed");

    let connection = open_connection(OpenConnectionConfig::new(Box::new(backend)))
        .await
        .expect("open_connection should succeed");

    for code in COUNTRIES {
        connection
            .execute("INSERT INTO country (code) VALUES (?)", &[text(code)])
            .await
            .expect("country insert should succeed");
    }
    for (name, column, code, delete_code) in [
        ("Joske", "country1", "BE", " "),
        ("Zorro", "country2", "ES", "X"),
        ("Julie", "country3", "FR", " "),
        ("Ulrich", "country1", "DE", " "),
    ] {
        connection
            .execute(
                &format!("INSERT INTO customer (name, {column}, delete_code) VALUES (?, ?, ?)"),
                &[text(name), text(code), text(delete_code)],
            )
            .await
            .expect("customer insert should succeed");
    }
    connection
}

#[tokio::test]
async fn emulated_exists_flags_countries_with_live_customers() {
    let connection = seeded_connection().await;

    let is_used = connection.exists_expression(
        "SELECT customer.id FROM customer WHERE customer.delete_code = ? \
         AND (customer.country1 = country.code OR customer.country2 = country.code \
         OR customer.country3 = country.code) LIMIT 1",
        &[text(" ")],
    );
    assert_eq!(is_used.params.len(), 2);

    let result = connection
        .execute(
            &format!("SELECT country.code, {} AS is_used FROM country", is_used.sql),
            &is_used.params,
        )
        .await
        .expect("annotated select should succeed");

    let actual = result
        .rows
        .into_iter()
        .map(|row| match (&row[0], &row[1]) {
            (Value::Text(code), Value::Integer(flag)) => (code.clone(), *flag == 1),
            other => panic!("unexpected row shape: {other:?}"),
        })
        .collect::<BTreeMap<_, _>>();

    let expected = BTreeMap::from([
        ("BE".to_string(), true),
        ("DE".to_string(), true),
        ("ES".to_string(), false),
        ("FR".to_string(), true),
        ("GB".to_string(), false),
        ("NL".to_string(), false),
        ("US".to_string(), false),
    ]);
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn projection_markers_next_to_exists_are_inlined_before_dispatch() {
    let connection = seeded_connection().await;

    let is_used = connection.exists_expression(
        "SELECT 1 FROM customer WHERE customer.delete_code = ? AND customer.country1 = country.code",
        &[text(" ")],
    );
    let mut params = vec![Value::Boolean(false), text("A")];
    params.extend(is_used.params);
    params.push(text("B%"));

    let result = connection
        .execute(
            &format!(
                "SELECT country.code, ? AS is_draft, ? AS status, {} AS is_used \
                 FROM country WHERE country.code LIKE ? ORDER BY country.code",
                is_used.sql
            ),
            &params,
        )
        .await
        .expect("annotated select should succeed");

    assert_eq!(
        result.rows,
        vec![vec![text("BE"), Value::Integer(0), text("A"), Value::Integer(1)]]
    );
}
