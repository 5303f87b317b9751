//! Actions against a fake TechCar backend.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use farol_console::actions::{clients, dashboard, orders, parts};
use farol_console::{ApiClient, DraftState, ErrorCode, Session};
use farol_core::inputs::{CreateClientInput, CreateOrderInput};
use farol_core::{DraftPhase, Money, Part};

const CLIENT_ID: &str = "550e8400-e29b-41d4-a716-446655440000";
const VEHICLE_ID: &str = "6fa459ea-ee8a-3ca4-894e-db77e160355e";
const ORDER_ID: &str = "0b6f9a52-1c4e-4d8a-9f3e-2a1b3c4d5e6f";

async fn setup() -> (MockServer, ApiClient, Session) {
    let server = MockServer::start().await;
    let api = ApiClient::with_base_url(&server.uri()).unwrap();
    (server, api, Session::new("tok"))
}

fn client_input() -> CreateClientInput {
    CreateClientInput {
        name: "ana souza".to_string(),
        cpf_cnpj: "529.982.247-25".to_string(),
        phone: Some("(11) 99999-0000".to_string()),
        email: Some("  ".to_string()),
        address: None,
    }
}

#[tokio::test]
async fn test_create_client_sends_normalized_body() {
    let (server, api, session) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/clients"))
        .and(header("authorization", "Bearer tok"))
        .and(body_partial_json(json!({
            "name": "ANA SOUZA",
            "cpfCnpj": "52998224725"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "message": "Cliente criado com sucesso",
            "data": { "client": { "id": CLIENT_ID } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = clients::create_client(&api, &session, &client_input())
        .await
        .unwrap();
    assert_eq!(response.message, "Cliente criado com sucesso");
}

#[tokio::test]
async fn test_invalid_input_never_reaches_the_backend() {
    let (server, api, session) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut input = client_input();
    input.cpf_cnpj = "111.111.111-11".to_string();

    let err = clients::create_client(&api, &session, &input)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let err = clients::delete_client(&api, &session, "../users")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
}

#[tokio::test]
async fn test_backend_error_message_is_surfaced() {
    let (server, api, session) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/clients"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "success": false,
            "message": "Erro ao criar cliente",
            "error": "CPF/CNPJ já cadastrado",
            "statusCode": 409
        })))
        .mount(&server)
        .await;

    let err = clients::create_client(&api, &session, &client_input())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert_eq!(err.message, "CPF/CNPJ já cadastrado");
}

#[tokio::test]
async fn test_rejected_session() {
    let (server, api, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/clients"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = clients::list_clients(&api, &Session::anonymous())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Unauthorized);
}

#[tokio::test]
async fn test_list_parts_decodes_string_prices() {
    let (server, api, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/parts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "parts": [
                { "id": "a", "name": "PASTILHA", "quantity": 4, "unitPrice": "25.50" },
                { "id": "b", "name": "FILTRO", "quantity": 30, "unitPrice": 18 }
            ] }
        })))
        .mount(&server)
        .await;

    let parts = parts::list_parts(&api, &session).await.unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].unit_price.cents(), 2550);
    assert_eq!(parts[1].unit_price.cents(), 1800);
}

#[tokio::test]
async fn test_delete_accepts_no_content() {
    let (server, api, session) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/api/v1/clients/{CLIENT_ID}")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    clients::delete_client(&api, &session, CLIENT_ID).await.unwrap();
}

#[tokio::test]
async fn test_create_order_posts_draft_and_clears_it() {
    let (server, api, session) = setup().await;
    let drafts = DraftState::new();
    let stock = vec![Part {
        id: "a".to_string(),
        name: "PASTILHA".to_string(),
        quantity: 10,
        unit_price: Money::from_cents(2500),
        description: None,
        created_at: None,
        updated_at: None,
    }];

    orders::add_service_line(&drafts, "revisão", 120.0).unwrap();
    orders::add_part_line(&drafts, "a", 4, &stock).unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/orders"))
        .and(body_partial_json(json!({
            "clientId": CLIENT_ID,
            "vehicleId": VEHICLE_ID,
            "discount": 20.0,
            "totalValue": 200.0,
            "services": [{ "description": "REVISÃO", "price": 120.0 }],
            "items": [{ "partId": "a", "quantity": 4, "unitPrice": 25.0 }]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "message": "Ordem criada",
            "data": { "order": { "id": ORDER_ID } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input = CreateOrderInput {
        client_id: CLIENT_ID.to_string(),
        vehicle_id: VEHICLE_ID.to_string(),
        description: None,
        kilometers: 85000,
        status: None,
        discount: Some(20.0),
    };
    orders::create_order(&api, &session, &drafts, &input)
        .await
        .unwrap();

    assert_eq!(orders::get_draft(&drafts).phase, DraftPhase::Empty);
}

#[tokio::test]
async fn test_failed_create_order_keeps_the_draft() {
    let (server, api, session) = setup().await;
    let drafts = DraftState::new();
    orders::add_service_line(&drafts, "alinhamento", 80.0).unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/orders"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "error": "Falha ao salvar ordem"
        })))
        .mount(&server)
        .await;

    let input = CreateOrderInput {
        client_id: CLIENT_ID.to_string(),
        vehicle_id: VEHICLE_ID.to_string(),
        kilometers: 1,
        ..Default::default()
    };
    let err = orders::create_order(&api, &session, &drafts, &input)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::BackendError);
    assert_eq!(err.message, "Falha ao salvar ordem");
    assert_eq!(orders::get_draft(&drafts).services.len(), 1);
}

#[tokio::test]
async fn test_edits_during_save_survive() {
    let (server, api, session) = setup().await;
    let drafts = DraftState::new();
    orders::add_service_line(&drafts, "alinhamento", 80.0).unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/orders"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "success": true, "message": "Ordem criada" }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let input = CreateOrderInput {
        client_id: CLIENT_ID.to_string(),
        vehicle_id: VEHICLE_ID.to_string(),
        kilometers: 1,
        ..Default::default()
    };
    let edit = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        orders::add_service_line(&drafts, "balanceamento", 60.0).unwrap();
    };
    let (saved, ()) = tokio::join!(
        orders::create_order(&api, &session, &drafts, &input),
        edit
    );
    saved.unwrap();

    let view = orders::get_draft(&drafts);
    assert_eq!(view.services.len(), 2);
    assert_eq!(view.subtotal.cents(), 14000);
}

#[tokio::test]
async fn test_open_order_loads_draft() {
    let (server, api, session) = setup().await;
    let drafts = DraftState::new();

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/orders/{ORDER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "order": {
                "id": ORDER_ID, "clientId": CLIENT_ID, "vehicleId": VEHICLE_ID,
                "status": "IN_PROGRESS", "kilometers": 100,
                "discount": "0", "totalValue": "150.00",
                "services": [{ "description": "TROCA DE ÓLEO", "price": "150.00" }],
                "items": []
            } }
        })))
        .mount(&server)
        .await;

    let order = orders::open_order(&api, &session, &drafts, ORDER_ID)
        .await
        .unwrap();
    assert_eq!(order.total_value.cents(), 15000);

    let view = orders::get_draft(&drafts);
    assert_eq!(view.phase, DraftPhase::HasLines);
    assert_eq!(view.subtotal.cents(), 15000);
}

#[tokio::test]
async fn test_get_order_without_payload_is_not_found() {
    let (server, api, session) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/orders/{ORDER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let err = orders::get_order(&api, &session, ORDER_ID).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn test_order_pdf_bytes() {
    let (server, api, session) = setup().await;
    let pdf = b"%PDF-1.4 fake".to_vec();

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/orders/{ORDER_ID}/pdf")))
        .and(header("authorization", "Bearer tok"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(pdf.clone()),
        )
        .mount(&server)
        .await;

    let bytes = orders::order_pdf(&api, &session, ORDER_ID).await.unwrap();
    assert_eq!(bytes, pdf);
}

#[tokio::test]
async fn test_load_dashboard() {
    let (server, api, session) = setup().await;

    let lists = [
        ("clients", json!({ "clients": [
            { "id": "c1", "name": "ANA", "cpfCnpj": "52998224725" }
        ] })),
        ("vehicles", json!({ "vehicles": [] })),
        ("parts", json!({ "parts": [
            { "id": "a", "name": "PASTILHA", "quantity": 3, "unitPrice": 25 },
            { "id": "b", "name": "FILTRO", "quantity": 30, "unitPrice": 18 }
        ] })),
        ("orders", json!({ "orders": [
            { "id": "o1", "clientId": "c1", "vehicleId": "v1", "status": "COMPLETED",
              "kilometers": 1, "totalValue": "385.00", "createdAt": "2025-03-10T14:30:00.000Z" },
            { "id": "o2", "clientId": "c1", "vehicleId": "v1", "status": "IN_PROGRESS",
              "kilometers": 1, "totalValue": "99.00", "createdAt": "2025-03-11T09:00:00.000Z" }
        ] })),
    ];
    for (resource, data) in lists {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/{resource}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": data })),
            )
            .mount(&server)
            .await;
    }

    let view = dashboard::load_dashboard(&api, &session, 1).await.unwrap();
    assert_eq!(view.summary.total_clients, 1);
    assert_eq!(view.summary.total_vehicles, 0);
    assert_eq!(view.summary.low_stock_parts, 1);
    assert_eq!(view.summary.revenue.cents(), 38500);
    assert_eq!(view.recent_orders.orders[0].id, "o2");
}
