//! GraphQL queries and mutations executed against the schema

mod common;

use common::in_memory_service;
use sales_analytics::graphql::{build_schema, execute_query, GraphQLContext, GraphQLSchema};
use sales_analytics::service::SalesService;
use serde_json::{json, Value};
use std::sync::Arc;

async fn run(
    schema: &GraphQLSchema,
    service: &Arc<SalesService>,
    query: &str,
    variables: Option<Value>,
) -> (Value, Vec<Value>) {
    let response = execute_query(schema, GraphQLContext::new(service.clone()), query, variables).await;
    let errors = response
        .errors
        .iter()
        .map(|e| serde_json::to_value(e).unwrap())
        .collect();
    (response.data.into_json().unwrap(), errors)
}

const CREATE_SALE: &str = r#"
    mutation Create($input: CreateSaleInput!) {
        createSale(input: $input) {
            id
            productName
            quantity
            price
            totalAmount
            saleDate
        }
    }
"#;

#[tokio::test]
async fn test_create_then_list() {
    let schema = build_schema();
    let service = in_memory_service();

    let (data, errors) = run(
        &schema,
        &service,
        CREATE_SALE,
        Some(json!({
            "input": {
                "productName": "Laptop Pro",
                "category": "Electronics",
                "quantity": 2,
                "price": 1299.99,
                "saleDate": "2025-10-15"
            }
        })),
    )
    .await;

    assert!(errors.is_empty(), "{:?}", errors);
    let created = &data["createSale"];
    assert_eq!(created["id"], 1);
    assert_eq!(created["totalAmount"], "2599.98");
    assert_eq!(created["saleDate"], "2025-10-15");

    let (data, errors) = run(&schema, &service, "{ sales { id productName category } }", None).await;
    assert!(errors.is_empty());
    assert_eq!(data["sales"][0]["productName"], "Laptop Pro");
    assert_eq!(data["sales"][0]["category"], "Electronics");
}

#[tokio::test]
async fn test_create_rejects_invalid_input() {
    let schema = build_schema();
    let service = in_memory_service();

    let (_, errors) = run(
        &schema,
        &service,
        CREATE_SALE,
        Some(json!({
            "input": {
                "productName": "",
                "category": "Electronics",
                "quantity": 0,
                "price": 10.0,
                "saleDate": "not-a-date"
            }
        })),
    )
    .await;

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["message"], "Validation failed");
    assert_eq!(errors[0]["extensions"]["code"], "BAD_USER_INPUT");

    let fields: Vec<&str> = errors[0]["extensions"]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"productName"));
    assert!(fields.contains(&"quantity"));
    assert!(fields.contains(&"saleDate"));

    assert_eq!(service.store().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_rejects_total_overflow() {
    let schema = build_schema();
    let service = in_memory_service();

    let (_, errors) = run(
        &schema,
        &service,
        CREATE_SALE,
        Some(json!({
            "input": {
                "productName": "Cargo Ship",
                "category": "Marine",
                "quantity": 2_000_000_000,
                "price": 1e20,
                "saleDate": "2025-10-15"
            }
        })),
    )
    .await;

    assert_eq!(errors[0]["message"], "Validation failed");
    assert_eq!(errors[0]["extensions"]["errors"][0]["field"], "price");
    assert_eq!(service.store().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_missing_sale_is_not_found() {
    let schema = build_schema();
    let service = in_memory_service();

    let (_, errors) = run(&schema, &service, "{ sale(id: 42) { id } }", None).await;
    assert_eq!(errors[0]["message"], "Sale not found");
    assert_eq!(errors[0]["extensions"]["code"], "NOT_FOUND");

    let (_, errors) = run(&schema, &service, "mutation { deleteSale(id: 42) }", None).await;
    assert_eq!(errors[0]["extensions"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_sale() {
    let schema = build_schema();
    let service = in_memory_service();
    service.seed_demo_data().await.unwrap();

    let (data, errors) = run(&schema, &service, "mutation { deleteSale(id: 1) }", None).await;
    assert!(errors.is_empty());
    assert_eq!(data["deleteSale"], true);
    assert_eq!(service.store().count().await.unwrap(), 9);
}

#[tokio::test]
async fn test_analytics_query() {
    let schema = build_schema();
    let service = in_memory_service();
    service.seed_demo_data().await.unwrap();

    let query = r#"
        {
            analytics(asOf: "2025-10-26") {
                kpis { totalRevenue totalSales avgOrderValue }
                trends { date revenue salesCount }
                topProducts { productName totalRevenue totalQuantity }
                salesByCategory { category totalRevenue salesCount }
            }
        }
    "#;

    let (data, errors) = run(&schema, &service, query, None).await;
    assert!(errors.is_empty(), "{:?}", errors);

    let analytics = &data["analytics"];
    assert_eq!(analytics["kpis"]["totalSales"], 10);
    assert_eq!(analytics["kpis"]["totalRevenue"], json!(5709.35));
    assert_eq!(analytics["trends"].as_array().unwrap().len(), 10);
    assert_eq!(analytics["trends"][0]["date"], "2025-10-15");
    assert_eq!(analytics["topProducts"].as_array().unwrap().len(), 5);
    assert_eq!(analytics["topProducts"][0]["productName"], "Laptop Pro");
    assert_eq!(analytics["topProducts"][1]["productName"], "Monitor 27\"");
    assert_eq!(analytics["salesByCategory"][0]["category"], "Electronics");
    assert_eq!(analytics["salesByCategory"][2]["category"], "Stationery");
}

#[tokio::test]
async fn test_analyze_sentiment() {
    let schema = build_schema();
    let service = in_memory_service();

    let query = r#"
        mutation {
            analyzeSentiment(input: { text: "The chair is great but shipping was terrible and slow" }) {
                score
                sentiment
                positive
                negative
                confidence
            }
        }
    "#;

    let (data, errors) = run(&schema, &service, query, None).await;
    assert!(errors.is_empty(), "{:?}", errors);

    let result = &data["analyzeSentiment"];
    assert_eq!(result["score"], 0);
    assert_eq!(result["sentiment"], "neutral");
    assert_eq!(result["positive"], json!(["great"]));
    assert_eq!(result["negative"], json!(["terrible"]));
}

#[tokio::test]
async fn test_analyze_sentiment_requires_text() {
    let schema = build_schema();
    let service = in_memory_service();

    let (_, errors) = run(
        &schema,
        &service,
        r#"mutation { analyzeSentiment(input: { text: "   " }) { score } }"#,
        None,
    )
    .await;

    assert_eq!(errors[0]["message"], "Text is required");
    assert_eq!(errors[0]["extensions"]["code"], "BAD_USER_INPUT");
}
