//! Flujos completos contra PostgreSQL
//!
//! Requieren una base real: `DATABASE_URL=postgres://... cargo test -- --ignored`

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::str::FromStr;

use tractor_agency::{database::DatabaseConnection, AppState};

use common::{bearer, test_config};

async fn setup() -> (TestServer, String) {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let config = test_config(&database_url);

    let db = DatabaseConnection::new(&config).await.expect("connect");
    db.run_migrations().await.expect("migrations");
    db.seed_default_users().await.expect("seed");

    let server = common::server(AppState::new(db.pool().clone(), config));
    let login = server
        .post("/api/login")
        .json(&json!({ "username": "admin", "password": "admin123" }))
        .await;
    assert_eq!(login.status_code(), StatusCode::OK);
    let token = login.json::<Value>()["token"].as_str().unwrap().to_string();

    (server, token)
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string()).unwrap(),
        other => panic!("expected number, got {}", other),
    }
}

async fn get(server: &TestServer, token: &str, path: &str) -> Value {
    let (name, value) = bearer(token);
    let response = server.get(path).add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::OK, "{}", path);
    response.json()
}

#[tokio::test]
#[ignore]
async fn test_login_with_wrong_password_is_unauthorized() {
    let (server, _) = setup().await;
    let response = server
        .post("/api/login")
        .json(&json!({ "username": "admin", "password": "wrong" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .post("/api/login")
        .json(&json!({ "username": "ghost", "password": "admin123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_exchange_sale_flow() {
    let (server, token) = setup().await;

    let (name, value) = bearer(&token);
    let created = server
        .post("/api/tractors")
        .add_header(name, value)
        .json(&json!({
            "brand": "Massey Ferguson",
            "model": "385",
            "chassis_number": unique("CH"),
            "purchase_price": 500000,
            "supplier_name": "Millat Tractors"
        }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let tractor: Value = created.json();
    let id = tractor["id"].as_i64().unwrap();
    assert_eq!(tractor["status"], "in_stock");
    assert!(tractor["sale_price"].is_null());

    let (name, value) = bearer(&token);
    let sold = server
        .post(&format!("/api/tractors/{}/sell", id))
        .add_header(name, value)
        .json(&json!({
            "sale_price": 700000,
            "customer_name": "Ahmed Khan",
            "customer_phone": "0300-1234567",
            "is_exchange": true,
            "exchange_tractor": { "brand": "Fiat", "model": "480", "purchase_price": 100000 }
        }))
        .await;
    assert_eq!(sold.status_code(), StatusCode::OK);
    let result: Value = sold.json();
    assert_eq!(decimal(&result["profit_loss"]), dec!(100000));
    let exchange_id = result["exchange_id"].as_i64().unwrap();

    let detail = get(&server, &token, &format!("/api/tractors/{}", id)).await;
    assert_eq!(detail["status"], "sold");
    assert_eq!(decimal(&detail["sale_price"]), dec!(700000));
    assert!(detail["sale_date"].is_string());
    assert_eq!(detail["exchange_tractor_id"].as_i64(), Some(exchange_id));
    assert_eq!(detail["exchange_tractor"]["status"], "in_stock");
    assert_eq!(detail["exchange_tractor"]["type"], "used");
    assert_eq!(detail["exchange_tractor"]["supplier_name"], "Ahmed Khan");

    let transactions = detail["transactions"].as_array().unwrap();
    assert_eq!(transactions.iter().filter(|t| t["type"] == "sale").count(), 1);
    assert_eq!(transactions.iter().filter(|t| t["type"] == "purchase").count(), 1);

    // Segunda venta: rechazada sin tocar la primera
    let (name, value) = bearer(&token);
    let again = server
        .post(&format!("/api/tractors/{}/sell", id))
        .add_header(name, value)
        .json(&json!({ "sale_price": 1, "customer_name": "Someone else" }))
        .await;
    assert_eq!(again.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(again.json::<Value>()["code"], "ALREADY_SOLD");

    let detail = get(&server, &token, &format!("/api/tractors/{}", id)).await;
    assert_eq!(detail["customer_name"], "Ahmed Khan");
    assert_eq!(detail["transactions"].as_array().unwrap().len(), transactions.len());

    let sold_list = get(&server, &token, "/api/tractors?status=sold").await;
    assert!(sold_list
        .as_array()
        .unwrap()
        .iter()
        .any(|t| t["id"].as_i64() == Some(id) && t["exchange_tractor"]["id"].as_i64() == Some(exchange_id)));

    // Borrar la permuta anula la referencia del tractor vendido
    let (name, value) = bearer(&token);
    let deleted = server
        .delete(&format!("/api/tractors/{}", exchange_id))
        .add_header(name, value)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::OK);
    let detail = get(&server, &token, &format!("/api/tractors/{}", id)).await;
    assert!(detail["exchange_tractor_id"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_part_stock_and_service_consumption() {
    let (server, token) = setup().await;

    let (name, value) = bearer(&token);
    let created = server
        .post("/api/parts")
        .add_header(name, value)
        .json(&json!({
            "name": "Hydraulic filter",
            "part_number": unique("HF"),
            "stock_quantity": 3,
            "unit_price": 100
        }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let part: Value = created.json();
    let part_id = part["id"].as_i64().unwrap();
    assert_eq!(part["category"], "");
    assert_eq!(part["min_stock"], 5);

    // Vender más de lo disponible no cambia el stock
    let (name, value) = bearer(&token);
    let oversell = server
        .post(&format!("/api/parts/{}/sell", part_id))
        .add_header(name, value)
        .json(&json!({ "quantity": 5, "customer_name": "Bilal" }))
        .await;
    assert_eq!(oversell.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(oversell.json::<Value>()["code"], "INSUFFICIENT_STOCK");
    let part = get(&server, &token, &format!("/api/parts/{}", part_id)).await;
    assert_eq!(part["stock_quantity"], 3);

    // El servicio consume 2 unidades a 100
    let (name, value) = bearer(&token);
    let service = server
        .post("/api/services")
        .add_header(name, value)
        .json(&json!({
            "customer_name": "Farm 12",
            "description": "Hydraulic service",
            "labor_cost": 1500,
            "parts_used": [{ "part_id": part_id, "quantity": 2, "unit_price": 100 }]
        }))
        .await;
    assert_eq!(service.status_code(), StatusCode::CREATED);
    let record: Value = service.json();
    assert_eq!(decimal(&record["parts_cost"]), dec!(200));
    assert_eq!(decimal(&record["total_cost"]), dec!(1700));
    assert_eq!(record["status"], "completed");
    let part = get(&server, &token, &format!("/api/parts/{}", part_id)).await;
    assert_eq!(part["stock_quantity"], 1);

    // Editar la lista repone la anterior y consume la nueva
    let (name, value) = bearer(&token);
    let updated = server
        .put(&format!("/api/services/{}", record["id"].as_i64().unwrap()))
        .add_header(name, value)
        .json(&json!({ "parts_used": [{ "part_id": part_id, "quantity": 1 }] }))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    let updated: Value = updated.json();
    assert_eq!(decimal(&updated["parts_cost"]), dec!(100));
    assert_eq!(
        decimal(&updated["total_cost"]),
        decimal(&updated["labor_cost"]) + decimal(&updated["parts_cost"])
    );
    let part = get(&server, &token, &format!("/api/parts/{}", part_id)).await;
    assert_eq!(part["stock_quantity"], 2);

    // Vaciar la lista devuelve todo al stock y anula el costo de repuestos
    let (name, value) = bearer(&token);
    let emptied = server
        .put(&format!("/api/services/{}", record["id"].as_i64().unwrap()))
        .add_header(name, value)
        .json(&json!({ "parts_used": [] }))
        .await;
    assert_eq!(emptied.status_code(), StatusCode::OK);
    let emptied: Value = emptied.json();
    assert_eq!(decimal(&emptied["parts_cost"]), Decimal::ZERO);
    assert_eq!(decimal(&emptied["total_cost"]), dec!(1500));
    assert!(emptied["parts_used"].as_array().unwrap().is_empty());
    let part = get(&server, &token, &format!("/api/parts/{}", part_id)).await;
    assert_eq!(part["stock_quantity"], 3);

    // Part aparece en el listado de stock bajo
    let low = get(&server, &token, "/api/parts?low_stock=true").await;
    assert!(low.as_array().unwrap().iter().any(|p| p["id"].as_i64() == Some(part_id)));

    // part_number duplicado
    let (name, value) = bearer(&token);
    let duplicate = server
        .post("/api/parts")
        .add_header(name, value)
        .json(&json!({ "name": "Copy", "part_number": part["part_number"] }))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore]
async fn test_profit_loss_matches_ledger_and_expenses() {
    let (server, token) = setup().await;
    let window = "start_date=2001-01-01&end_date=2001-12-31";

    let (name, value) = bearer(&token);
    let purchase = server
        .post("/api/tractors")
        .add_header(name, value)
        .json(&json!({
            "brand": "Belarus",
            "model": "510",
            "purchase_date": "2001-03-15",
            "transactions": [
                { "type": "debit", "category": "Purchase Price", "amount": 300000 },
                { "type": "debit", "category": "Freight", "amount": 5000 },
                { "type": "credit", "category": "Discount", "amount": 2000 }
            ]
        }))
        .await;
    assert_eq!(purchase.status_code(), StatusCode::CREATED);
    // Solo los débitos forman el precio; el descuento queda como fila negativa
    assert_eq!(decimal(&purchase.json::<Value>()["purchase_price"]), dec!(305000));

    let (name, value) = bearer(&token);
    let expense = server
        .post("/api/expenses")
        .add_header(name, value)
        .json(&json!({ "category": "rent", "amount": 12000, "date": "2001-03-20" }))
        .await;
    assert_eq!(expense.status_code(), StatusCode::CREATED);
    assert!(expense.json::<Value>()["created_by"].is_i64());

    let report = get(&server, &token, &format!("/api/reports/profit-loss?{}", window)).await;
    let ledger = get(&server, &token, &format!("/api/reports/transactions?{}", window)).await;
    let expenses = get(&server, &token, &format!("/api/expenses?{}", window)).await;

    let sum_of = |rows: &Value, kind: &str| -> Decimal {
        rows.as_array()
            .unwrap()
            .iter()
            .filter(|row| row["type"] == kind)
            .map(|row| decimal(&row["amount"]))
            .sum()
    };
    let sales = sum_of(&ledger, "sale");
    let purchases = sum_of(&ledger, "purchase");
    let total_expenses: Decimal = expenses
        .as_array()
        .unwrap()
        .iter()
        .map(|row| decimal(&row["amount"]))
        .sum();

    assert_eq!(decimal(&report["total_sales"]), sales);
    assert_eq!(decimal(&report["total_purchases"]), purchases);
    assert_eq!(decimal(&report["total_expenses"]), total_expenses);
    assert_eq!(decimal(&report["net_profit"]), sales - purchases - total_expenses);
    assert!(decimal(&report["expenses_by_category"]["rent"]) >= dec!(12000));
}

#[tokio::test]
#[ignore]
async fn test_lookup_brand_create_is_idempotent() {
    let (server, token) = setup().await;
    let brand_name = unique("Brand");

    let (name, value) = bearer(&token);
    let first = server
        .post("/api/tractors/brands")
        .add_header(name, value)
        .json(&json!({ "name": brand_name }))
        .await;
    assert_eq!(first.status_code(), StatusCode::CREATED);
    let brand: Value = first.json();

    let (name, value) = bearer(&token);
    let second = server
        .post("/api/tractors/brands")
        .add_header(name, value)
        .json(&json!({ "name": brand_name.to_uppercase() }))
        .await;
    assert_eq!(second.status_code(), StatusCode::OK);
    assert_eq!(second.json::<Value>()["id"], brand["id"]);

    let (name, value) = bearer(&token);
    let model = server
        .post("/api/tractors/models")
        .add_header(name, value)
        .json(&json!({ "brand_id": brand["id"], "name": "240" }))
        .await;
    assert_eq!(model.status_code(), StatusCode::CREATED);

    let models = get(
        &server,
        &token,
        &format!("/api/tractors/models?brand_id={}", brand["id"]),
    )
    .await;
    assert_eq!(models.as_array().unwrap().len(), 1);

    let (name, value) = bearer(&token);
    let orphan = server
        .post("/api/tractors/models")
        .add_header(name, value)
        .json(&json!({ "brand_id": i64::MAX, "name": "ghost" }))
        .await;
    assert_eq!(orphan.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_deleting_tractor_detaches_service_records() {
    let (server, token) = setup().await;

    let (name, value) = bearer(&token);
    let tractor: Value = server
        .post("/api/tractors")
        .add_header(name, value)
        .json(&json!({ "brand": "New Holland", "model": "Ghazi", "purchase_price": 400000 }))
        .await
        .json();
    let tractor_id = tractor["id"].as_i64().unwrap();

    let (name, value) = bearer(&token);
    let service = server
        .post("/api/services")
        .add_header(name, value)
        .json(&json!({
            "tractor_id": tractor_id,
            "customer_name": "Farm 7",
            "description": "Oil change",
            "labor_cost": 800
        }))
        .await;
    assert_eq!(service.status_code(), StatusCode::CREATED);
    let service_id = service.json::<Value>()["id"].as_i64().unwrap();

    let (name, value) = bearer(&token);
    let deleted = server
        .delete(&format!("/api/tractors/{}", tractor_id))
        .add_header(name, value)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::OK);

    let record = get(&server, &token, &format!("/api/services/{}", service_id)).await;
    assert!(record["tractor_id"].is_null());
    assert_eq!(decimal(&record["total_cost"]), dec!(800));

    let (name, value) = bearer(&token);
    let gone = server
        .get(&format!("/api/tractors/{}", tractor_id))
        .add_header(name, value)
        .await;
    assert_eq!(gone.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_marking_sold_by_update_writes_no_sale_row() {
    let (server, token) = setup().await;

    let (name, value) = bearer(&token);
    let tractor: Value = server
        .post("/api/tractors")
        .add_header(name, value)
        .json(&json!({ "brand": "Kubota", "model": "L4508", "purchase_price": 350000 }))
        .await
        .json();
    let id = tractor["id"].as_i64().unwrap();

    let (name, value) = bearer(&token);
    let updated = server
        .put(&format!("/api/tractors/{}", id))
        .add_header(name, value)
        .json(&json!({ "status": "sold", "sale_price": 420000, "sale_date": "2025-02-01" }))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);

    let detail = get(&server, &token, &format!("/api/tractors/{}", id)).await;
    assert_eq!(detail["status"], "sold");
    let transactions = detail["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0]["type"], "purchase");
}
