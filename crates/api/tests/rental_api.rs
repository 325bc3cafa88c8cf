//! HTTP-level integration tests for the rental ledger and admin reports.

mod common;

use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use common::{body_json, get_auth, patch_auth, post_auth, post_json_auth, put_json_auth};
use rentdesk_api::background::ledger_sweep::{sweep_once, SweepReport};
use rentdesk_db::models::user::{User, UserRole};
use sqlx::PgPool;

/// Admin token, a tenant with token, and an available shop.
struct Fixture {
    app: axum::Router,
    admin_token: String,
    tenant: User,
    tenant_token: String,
    property_id: i64,
}

async fn setup(pool: PgPool) -> Fixture {
    let (_admin, admin_token) = common::admin_with_token(&pool).await;
    let tenant = common::create_user(&pool, "Asha", "asha@x.in", UserRole::Tenant).await;
    let tenant_token = common::token_for(&tenant);
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "title": "Godowlia Shop",
        "type": "shop",
        "location": { "city": "Varanasi" },
        "rent_per_month": 5000.0,
        "security_deposit": 10000.0
    });
    let response = post_json_auth(app.clone(), "/api/v1/properties", body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let property_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    Fixture {
        app,
        admin_token,
        tenant,
        tenant_token,
        property_id,
    }
}

fn rental_body(property_id: i64, tenant_id: i64) -> serde_json::Value {
    rental_body_from(property_id, tenant_id, "2024-01-15T00:00:00Z")
}

fn rental_body_from(property_id: i64, tenant_id: i64, start_date: &str) -> serde_json::Value {
    serde_json::json!({
        "property_id": property_id,
        "tenant_id": tenant_id,
        "start_date": start_date,
        "monthly_rent": 5000.0,
        "security_deposit": 10000.0,
        "agreement": { "duration_months": 11, "notice_period_days": 30 }
    })
}

fn payment_body(amount: f64) -> serde_json::Value {
    serde_json::json!({
        "amount": amount,
        "period_month": 1,
        "period_year": 2024,
        "payment_method": "upi",
        "transaction_id": "UPI-123"
    })
}

async fn create_rental(f: &Fixture) -> i64 {
    let response = post_json_auth(
        f.app.clone(),
        "/api/v1/rentals",
        rental_body(f.property_id, f.tenant.id),
        &f.admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Another available shop, listed by the fixture's admin.
async fn add_property(f: &Fixture, title: &str) -> i64 {
    let body = serde_json::json!({
        "title": title,
        "type": "shop",
        "location": { "city": "Varanasi" },
        "rent_per_month": 5000.0
    });
    let response = post_json_auth(f.app.clone(), "/api/v1/properties", body, &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn rent(f: &Fixture, property_id: i64, tenant_id: i64, start_date: &str) -> i64 {
    let response = post_json_auth(
        f.app.clone(),
        "/api/v1/rentals",
        rental_body_from(property_id, tenant_id, start_date),
        &f.admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn pay(f: &Fixture, rental_id: i64, amount: f64) {
    let uri = format!("/api/v1/rentals/{rental_id}/payment");
    let response = post_json_auth(f.app.clone(), &uri, payment_body(amount), &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rental_occupies_property_and_charges_first_month(pool: PgPool) {
    let f = setup(pool).await;

    let response = post_json_auth(
        f.app.clone(),
        "/api/v1/rentals",
        rental_body(f.property_id, f.tenant.id),
        &f.admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "active");
    assert_eq!(json["data"]["due_amount"], 5000.0);
    assert_eq!(json["data"]["next_due_date"], "2024-02-15T00:00:00Z");
    assert_eq!(json["data"]["agreement"]["duration_months"], 11);
    assert_eq!(json["data"]["payment_history"].as_array().unwrap().len(), 0);

    let response = common::get(f.app, &format!("/api/v1/properties/{}", f.property_id)).await;
    assert_eq!(body_json(response).await["data"]["status"], "occupied");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_rental_on_occupied_property_is_rejected(pool: PgPool) {
    let f = setup(pool).await;
    create_rental(&f).await;

    let response = post_json_auth(
        f.app.clone(),
        "/api/v1/rentals",
        rental_body(f.property_id, f.tenant.id),
        &f.admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PROPERTY_UNAVAILABLE");
    assert!(json["error"].as_str().unwrap().contains("occupied"));

    let response = get_auth(f.app, "/api/v1/admin/rentals", &f.admin_token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rental_rejects_bad_input(pool: PgPool) {
    let f = setup(pool).await;

    // Tenants cannot create rentals.
    let response = post_json_auth(
        f.app.clone(),
        "/api/v1/rentals",
        rental_body(f.property_id, f.tenant.id),
        &f.tenant_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(
        f.app.clone(),
        "/api/v1/rentals",
        rental_body(999_999, f.tenant.id),
        &f.admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json_auth(
        f.app.clone(),
        "/api/v1/rentals",
        rental_body(f.property_id, 999_999),
        &f.admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let mut zero_rent = rental_body(f.property_id, f.tenant.id);
    zero_rent["monthly_rent"] = serde_json::json!(0.0);
    let response = post_json_auth(f.app.clone(), "/api/v1/rentals", zero_rent, &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut backwards = rental_body(f.property_id, f.tenant.id);
    backwards["end_date"] = serde_json::json!("2023-12-31T00:00:00Z");
    let response = post_json_auth(f.app.clone(), "/api/v1/rentals", backwards, &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing above touched the property.
    let response = common::get(f.app, &format!("/api/v1/properties/{}", f.property_id)).await;
    assert_eq!(body_json(response).await["data"]["status"], "available");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn maintenance_property_cannot_be_rented(pool: PgPool) {
    let f = setup(pool).await;
    let property_uri = format!("/api/v1/properties/{}", f.property_id);

    let body = serde_json::json!({ "status": "maintenance" });
    let response = put_json_auth(f.app.clone(), &property_uri, body, &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(
        f.app.clone(),
        "/api/v1/rentals",
        rental_body(f.property_id, f.tenant.id),
        &f.admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PROPERTY_UNAVAILABLE");
    assert!(json["error"].as_str().unwrap().contains("maintenance"));

    let response = common::get(f.app.clone(), &property_uri).await;
    assert_eq!(body_json(response).await["data"]["status"], "maintenance");
    let response = get_auth(f.app, "/api/v1/admin/rentals", &f.admin_token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn property_edits_cannot_move_the_occupied_status(pool: PgPool) {
    let other_pool = pool.clone();
    let f = setup(pool).await;
    let property_uri = format!("/api/v1/properties/{}", f.property_id);

    // A free property cannot be marked occupied by hand.
    let body = serde_json::json!({ "status": "occupied" });
    let response = put_json_auth(f.app.clone(), &property_uri, body, &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    let response = common::get(f.app.clone(), &property_uri).await;
    assert_eq!(body_json(response).await["data"]["status"], "available");

    // A rented one cannot be released or parked by hand.
    create_rental(&f).await;
    for status in ["available", "maintenance"] {
        let body = serde_json::json!({ "status": status });
        let response = put_json_auth(f.app.clone(), &property_uri, body, &f.admin_token).await;
        assert_eq!(response.status(), StatusCode::CONFLICT, "{status}");
        assert_eq!(body_json(response).await["code"], "CONFLICT");
    }
    let response = common::get(f.app.clone(), &property_uri).await;
    assert_eq!(body_json(response).await["data"]["status"], "occupied");

    // Other fields remain editable.
    let body = serde_json::json!({ "title": "Godowlia Shop (let)" });
    let response = put_json_auth(f.app.clone(), &property_uri, body, &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let ravi = common::create_user(&other_pool, "Ravi", "ravi@x.in", UserRole::Tenant).await;
    let response = post_json_auth(
        f.app,
        "/api/v1/rentals",
        rental_body(f.property_id, ravi.id),
        &f.admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "PROPERTY_UNAVAILABLE");
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn tenant_pays_rent_and_due_drops_to_zero(pool: PgPool) {
    let f = setup(pool).await;
    let rental_id = create_rental(&f).await;

    let uri = format!("/api/v1/rentals/{rental_id}/payment");
    let response = post_json_auth(f.app.clone(), &uri, payment_body(5000.0), &f.tenant_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["due_amount"], 0.0);
    assert_eq!(json["data"]["payment"]["status"], "paid");
    assert_eq!(json["data"]["payment"]["payment_method"], "upi");
    assert_eq!(json["data"]["payment"]["transaction_id"], "UPI-123");

    let response = get_auth(
        f.app.clone(),
        &format!("/api/v1/rentals/{rental_id}"),
        &f.tenant_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["due_amount"], 0.0);
    let history = json["data"]["payment_history"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["amount"], 5000.0);

    // Nothing owed any more.
    let response = get_auth(f.app, "/api/v1/rentals/my-dues", &f.tenant_token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["dues"].as_array().unwrap().len(), 0);
    assert_eq!(json["data"]["total_due"], 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn overpayment_becomes_credit(pool: PgPool) {
    let f = setup(pool).await;
    let rental_id = create_rental(&f).await;

    let uri = format!("/api/v1/rentals/{rental_id}/payment");
    let response = post_json_auth(f.app, &uri, payment_body(6000.0), &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["due_amount"], -1000.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn payment_is_limited_to_the_rentals_tenant(pool: PgPool) {
    let stranger_pool = pool.clone();
    let f = setup(pool).await;
    let rental_id = create_rental(&f).await;
    let stranger = common::create_user(&stranger_pool, "Other", "other@x.in", UserRole::Tenant).await;
    let stranger_token = common::token_for(&stranger);

    let uri = format!("/api/v1/rentals/{rental_id}/payment");
    let response = post_json_auth(f.app.clone(), &uri, payment_body(100.0), &stranger_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(
        f.app.clone(),
        &format!("/api/v1/rentals/{rental_id}"),
        &stranger_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The rejected payment left no trace.
    let response = get_auth(
        f.app,
        &format!("/api/v1/rentals/{rental_id}"),
        &f.admin_token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["due_amount"], 5000.0);
    assert_eq!(json["data"]["payment_history"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_payments_are_rejected(pool: PgPool) {
    let f = setup(pool).await;
    let rental_id = create_rental(&f).await;
    let uri = format!("/api/v1/rentals/{rental_id}/payment");

    let response = post_json_auth(f.app.clone(), &uri, payment_body(0.0), &f.tenant_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut bad_month = payment_body(100.0);
    bad_month["period_month"] = serde_json::json!(13);
    let response = post_json_auth(f.app.clone(), &uri, bad_month, &f.tenant_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut bad_method = payment_body(100.0);
    bad_method["payment_method"] = serde_json::json!("barter");
    let response = post_json_auth(f.app.clone(), &uri, bad_method, &f.tenant_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        f.app,
        "/api/v1/rentals/999999/payment",
        payment_body(100.0),
        &f.admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Tenant views
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn my_rentals_and_dues_include_property_summary(pool: PgPool) {
    let f = setup(pool).await;
    let rental_id = create_rental(&f).await;

    let response = get_auth(f.app.clone(), "/api/v1/rentals/my-rentals", &f.tenant_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let rentals = json["data"].as_array().unwrap();
    assert_eq!(rentals.len(), 1);
    assert_eq!(rentals[0]["id"], rental_id);
    assert_eq!(rentals[0]["property"]["title"], "Godowlia Shop");
    assert_eq!(rentals[0]["property"]["city"], "Varanasi");

    let response = get_auth(f.app.clone(), "/api/v1/rentals/my-dues", &f.tenant_token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["dues"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["total_due"], 5000.0);

    // The admin has no rentals of their own.
    let response = get_auth(f.app, "/api/v1/rentals/my-rentals", &f.admin_token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn my_dues_totals_only_the_callers_outstanding_rentals(pool: PgPool) {
    let other_pool = pool.clone();
    let f = setup(pool).await;
    let ravi = common::create_user(&other_pool, "Ravi", "ravi@x.in", UserRole::Tenant).await;
    let ravi_token = common::token_for(&ravi);

    let owing = rent(&f, f.property_id, f.tenant.id, "2024-03-01T00:00:00Z").await;
    let partial = rent(&f, add_property(&f, "Partial").await, f.tenant.id, "2024-02-01T00:00:00Z").await;
    pay(&f, partial, 2000.0).await;
    let settled = rent(&f, add_property(&f, "Settled").await, f.tenant.id, "2024-01-20T00:00:00Z").await;
    pay(&f, settled, 5000.0).await;
    let credit = rent(&f, add_property(&f, "Credit").await, f.tenant.id, "2024-01-10T00:00:00Z").await;
    pay(&f, credit, 6000.0).await;
    let ended = rent(&f, add_property(&f, "Ended").await, f.tenant.id, "2024-01-05T00:00:00Z").await;
    let uri = format!("/api/v1/rentals/{ended}/terminate");
    let response = post_auth(f.app.clone(), &uri, &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let foreign = rent(&f, add_property(&f, "Foreign").await, ravi.id, "2024-01-01T00:00:00Z").await;

    let response = get_auth(f.app.clone(), "/api/v1/rentals/my-dues", &f.tenant_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let ids: Vec<_> = json["data"]["dues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [partial, owing]);
    assert_eq!(json["data"]["total_due"], 8000.0);

    let response = get_auth(f.app, "/api/v1/rentals/my-dues", &ravi_token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["dues"][0]["id"], foreign);
    assert_eq!(json["data"]["total_due"], 5000.0);
}

// ---------------------------------------------------------------------------
// Termination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn terminate_frees_property_once(pool: PgPool) {
    let f = setup(pool).await;
    let rental_id = create_rental(&f).await;
    let uri = format!("/api/v1/rentals/{rental_id}/terminate");

    let response = post_auth(f.app.clone(), &uri, &f.tenant_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_auth(f.app.clone(), &uri, &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "terminated");
    assert!(json["data"]["end_date"].is_string());

    let response = common::get(f.app.clone(), &format!("/api/v1/properties/{}", f.property_id)).await;
    assert_eq!(body_json(response).await["data"]["status"], "available");

    let response = post_auth(f.app.clone(), &uri, &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The property can be let again.
    create_rental(&f).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn terminate_accepts_explicit_end_date(pool: PgPool) {
    let f = setup(pool).await;
    let rental_id = create_rental(&f).await;
    let uri = format!("/api/v1/rentals/{rental_id}/terminate");

    let body = serde_json::json!({ "end_date": "2024-06-30T00:00:00Z" });
    let response = post_json_auth(f.app.clone(), &uri, body, &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["end_date"], "2024-06-30T00:00:00Z");

    let response = post_auth(f.app, "/api/v1/rentals/999999/terminate", &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Admin reports
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_reports_cover_users_rentals_and_dashboard(pool: PgPool) {
    let f = setup(pool).await;
    let rental_id = create_rental(&f).await;

    let response = get_auth(f.app.clone(), "/api/v1/admin/overdue", &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let overdue = json["data"].as_array().unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0]["id"], rental_id);
    assert_eq!(overdue[0]["tenant"]["email"], "asha@x.in");

    let response = get_auth(f.app.clone(), "/api/v1/admin/users", &f.admin_token).await;
    let json = body_json(response).await;
    let users = json["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));

    let response = get_auth(f.app.clone(), "/api/v1/admin/dashboard", &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["properties"]["total"], 1);
    assert_eq!(json["data"]["properties"]["occupied"], 1);
    assert_eq!(json["data"]["users"]["total"], 2);
    assert_eq!(json["data"]["rentals"]["active"], 1);
    assert_eq!(json["data"]["rentals"]["monthly_rent"], 5000.0);
    assert_eq!(json["data"]["rentals"]["total_dues"], 5000.0);

    // Settled rentals drop off the overdue report.
    let uri = format!("/api/v1/rentals/{rental_id}/payment");
    post_json_auth(f.app.clone(), &uri, payment_body(5000.0), &f.tenant_token).await;
    let response = get_auth(f.app, "/api/v1/admin/overdue", &f.admin_token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn overdue_report_lists_earliest_due_first(pool: PgPool) {
    let f = setup(pool).await;

    let march = rent(&f, f.property_id, f.tenant.id, "2024-03-10T00:00:00Z").await;
    let january = rent(&f, add_property(&f, "Lanka Office").await, f.tenant.id, "2024-01-05T00:00:00Z").await;
    let february = rent(&f, add_property(&f, "Sigra Godown").await, f.tenant.id, "2024-02-20T00:00:00Z").await;
    let settled = rent(&f, add_property(&f, "Assi Kiosk").await, f.tenant.id, "2023-12-01T00:00:00Z").await;
    pay(&f, settled, 5000.0).await;

    let response = get_auth(f.app, "/api/v1/admin/overdue", &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let overdue = json["data"].as_array().unwrap();
    let ids: Vec<_> = overdue.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, [january, february, march]);
    let due_dates: Vec<_> = overdue.iter().map(|r| r["next_due_date"].as_str().unwrap()).collect();
    assert_eq!(
        due_dates,
        ["2024-02-05T00:00:00Z", "2024-03-20T00:00:00Z", "2024-04-10T00:00:00Z"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_endpoints_reject_tenants(pool: PgPool) {
    let f = setup(pool).await;

    for uri in [
        "/api/v1/admin/dashboard",
        "/api/v1/admin/users",
        "/api/v1/admin/rentals",
        "/api/v1/admin/overdue",
    ] {
        let response = get_auth(f.app.clone(), uri, &f.tenant_token).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
    }

    let uri = format!("/api/v1/admin/users/{}/toggle-status", f.tenant.id);
    let response = patch_auth(f.app.clone(), &uri, &f.tenant_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = patch_auth(f.app, "/api/v1/admin/users/999999/toggle-status", &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Ledger sweep
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn sweep_charges_elapsed_months_then_expires(pool: PgPool) {
    let sweep_pool = pool.clone();
    let f = setup(pool).await;

    let mut body = rental_body(f.property_id, f.tenant.id);
    body["end_date"] = serde_json::json!("2024-06-01T00:00:00Z");
    let response = post_json_auth(f.app.clone(), "/api/v1/rentals", body, &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let rental_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // Feb 15, Mar 15 and Apr 15 have started by Apr 20.
    let now = Utc.with_ymd_and_hms(2024, 4, 20, 0, 0, 0).unwrap();
    let report = sweep_once(&sweep_pool, now).await.unwrap();
    assert_eq!(
        report,
        SweepReport {
            rolled_over: 1,
            periods: 3,
            expired: 0
        }
    );

    let uri = format!("/api/v1/rentals/{rental_id}");
    let json = body_json(get_auth(f.app.clone(), &uri, &f.admin_token).await).await;
    assert_eq!(json["data"]["due_amount"], 20000.0);
    assert_eq!(json["data"]["next_due_date"], "2024-05-15T00:00:00Z");

    // A repeated sweep at the same instant charges nothing.
    let report = sweep_once(&sweep_pool, now).await.unwrap();
    assert_eq!(report, SweepReport::default());

    // After the end date: May 15 is charged, then the rental expires.
    let later = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
    let report = sweep_once(&sweep_pool, later).await.unwrap();
    assert_eq!(report.periods, 1);
    assert_eq!(report.expired, 1);

    let json = body_json(get_auth(f.app.clone(), &uri, &f.admin_token).await).await;
    assert_eq!(json["data"]["status"], "expired");
    assert_eq!(json["data"]["due_amount"], 25000.0);

    let response = common::get(f.app, &format!("/api/v1/properties/{}", f.property_id)).await;
    assert_eq!(body_json(response).await["data"]["status"], "available");
}
