use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use shopping::{AppState, IdGenerator, InMemorySessionStore, Seed, SessionStore, build_router};
use tower::ServiceExt;

const COOKIE: &str = "shopping_session";

fn app() -> axum::Router {
    let ids = Arc::new(IdGenerator::new());
    let sessions = Arc::new(InMemorySessionStore::new(Seed::builtin(), Arc::clone(&ids)));
    build_router(AppState::new(sessions, ids))
}

struct Client {
    app: axum::Router,
    cookie: Option<String>,
}

impl Client {
    fn new() -> Self {
        Self {
            app: app(),
            cookie: None,
        }
    }

    async fn send(
        &mut self,
        method: Method,
        uri: &str,
        payload: Option<Value>,
    ) -> (StatusCode, Value) {
        let content_type = payload.as_ref().map(|_| "application/json");
        let body = payload.map(|payload| payload.to_string()).unwrap_or_default();
        self.send_raw(method, uri, content_type, body).await
    }

    async fn send_raw(
        &mut self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: impl Into<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder
            .body(Body::from(body.into()))
            .expect("request should build");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("response expected");

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let raw = set_cookie.to_str().expect("cookie should be ascii");
            let pair = raw.split(';').next().expect("cookie should have a pair");
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body should be readable");

        if body.is_empty() {
            return (status, Value::Null);
        }

        let json = serde_json::from_slice::<Value>(&body).expect("body should be valid JSON");
        (status, json)
    }

    async fn get(&mut self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    async fn post(&mut self, uri: &str, payload: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(payload)).await
    }
}

fn list_id(lists: &Value, title: &str) -> u64 {
    lists["data"]["shoppingLists"]
        .as_array()
        .expect("shoppingLists should be array")
        .iter()
        .find(|list| list["title"] == title)
        .and_then(|list| list["id"].as_u64())
        .expect("list should exist")
}

fn titles(values: &Value) -> Vec<String> {
    values
        .as_array()
        .expect("should be array")
        .iter()
        .map(|value| value["title"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn new_session_sees_seeded_lists_sorted() {
    let mut client = Client::new();

    let (status, body) = client.get("/lists").await;
    assert_eq!(status, StatusCode::OK);
    assert!(client.cookie.as_deref().unwrap_or_default().starts_with(COOKIE));

    assert_eq!(
        titles(&body["data"]["shoppingLists"]),
        vec![
            "Additional Items",
            "birthday party items",
            "Work Items",
            "Home Items"
        ]
    );
    let home = &body["data"]["shoppingLists"][3];
    assert_eq!(home["done"], true);
    assert_eq!(home["remaining"], 0);
}

#[tokio::test]
async fn root_redirects_to_lists() {
    let mut client = Client::new();
    let request = Request::builder()
        .uri("/")
        .body(Body::empty())
        .expect("request should build");
    let response = client
        .app
        .clone()
        .oneshot(request)
        .await
        .expect("response expected");

    assert!(response.status().is_redirection());
    assert_eq!(response.headers()[header::LOCATION], "/lists");

    let (status, body) = client.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "ok");
}

#[tokio::test]
async fn show_list_orders_items() {
    let mut client = Client::new();
    let (_, lists) = client.get("/lists").await;
    let id = list_id(&lists, "Work Items");

    let (status, body) = client.get(&format!("/lists/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["shoppingList"]["title"], "Work Items");
    assert_eq!(titles(&body["data"]["items"]), vec!["Ipad", "Coffee", "Pens"]);
}

#[tokio::test]
async fn create_list_validates_title() {
    let mut client = Client::new();
    client.get("/lists").await;

    let (status, created) = client.post("/lists", json!({ "title": "  Hardware  " })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["title"], "Hardware");
    assert_eq!(created["flash"], "The list has been created.");

    let (status, body) = client.post("/lists", json!({ "title": "Hardware" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "List title must be unique.");

    let (status, _) = client.post("/lists", json!({ "title": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = client
        .post("/lists", json!({ "title": "x".repeat(101) }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, lists) = client.get("/lists").await;
    assert_eq!(lists["data"]["shoppingLists"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn items_can_be_added_toggled_and_deleted() {
    let mut client = Client::new();
    let (_, lists) = client.get("/lists").await;
    let id = list_id(&lists, "Additional Items");

    let (status, item) = client
        .post(&format!("/lists/{id}/items"), json!({ "title": "Batteries" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["data"]["purchased"], false);
    let item_id = item["data"]["id"].as_u64().expect("item should have id");

    let (status, toggled) = client
        .send(
            Method::POST,
            &format!("/lists/{id}/items/{item_id}/toggle"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["data"]["purchased"], true);

    let (_, lists) = client.get("/lists").await;
    let additional = lists["data"]["shoppingLists"]
        .as_array()
        .and_then(|all| all.iter().find(|list| list["id"] == id))
        .cloned()
        .expect("list should exist");
    assert_eq!(additional["done"], true);

    let (status, toggled) = client
        .post(
            &format!("/lists/{id}/items/{item_id}/toggle"),
            json!({ "purchased": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["data"]["purchased"], false);

    let (status, _) = client
        .send(Method::DELETE, &format!("/lists/{id}/items/{item_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, shown) = client.get(&format!("/lists/{id}")).await;
    assert_eq!(shown["data"]["items"].as_array().map(Vec::len), Some(0));

    let (status, _) = client
        .send(Method::DELETE, &format!("/lists/{id}/items/{item_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn complete_all_and_delete_list() {
    let mut client = Client::new();
    let (_, lists) = client.get("/lists").await;
    let id = list_id(&lists, "Work Items");

    let (status, body) = client
        .post(&format!("/lists/{id}/complete_all"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["shoppingList"]["done"], true);

    let (status, _) = client.send(Method::DELETE, &format!("/lists/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = client.get(&format!("/lists/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "shopping list not found");
}

#[tokio::test]
async fn rename_keeps_titles_unique() {
    let mut client = Client::new();
    let (_, lists) = client.get("/lists").await;
    let id = list_id(&lists, "Home Items");

    let (status, _) = client
        .send(
            Method::PATCH,
            &format!("/lists/{id}"),
            Some(json!({ "title": "Work Items" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = client
        .send(
            Method::PATCH,
            &format!("/lists/{id}"),
            Some(json!({ "title": "Home Items" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Home Items");

    let (status, body) = client
        .send(
            Method::PATCH,
            &format!("/lists/{id}"),
            Some(json!({ "title": "House" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "House");
}

#[tokio::test]
async fn sessions_do_not_share_lists() {
    let app = app();
    let mut alice = Client {
        app: app.clone(),
        cookie: None,
    };
    let mut bob = Client { app, cookie: None };

    alice.post("/lists", json!({ "title": "Alice only" })).await;
    let (_, alice_lists) = alice.get("/lists").await;
    let (_, bob_lists) = bob.get("/lists").await;

    assert_ne!(alice.cookie, bob.cookie);
    assert!(titles(&alice_lists["data"]["shoppingLists"]).contains(&"Alice only".to_string()));
    assert!(!titles(&bob_lists["data"]["shoppingLists"]).contains(&"Alice only".to_string()));
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let mut client = Client::new();

    let (status, _) = client.get("/lists/999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = client
        .post("/lists/999999/items", json!({ "title": "Ghost" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn toggle_rejects_bodies_it_cannot_read() {
    let mut client = Client::new();
    let (_, lists) = client.get("/lists").await;
    let id = list_id(&lists, "birthday party items");
    let (_, shown) = client.get(&format!("/lists/{id}")).await;
    let item_id = shown["data"]["items"][0]["id"]
        .as_u64()
        .expect("item should have id");
    let toggle = format!("/lists/{id}/items/{item_id}/toggle");

    // JSON without a content type is not silently treated as "no body"
    let (status, body) = client
        .send_raw(Method::POST, &toggle, None, r#"{"purchased": true}"#)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = client
        .send_raw(
            Method::POST,
            &toggle,
            Some("application/json"),
            r#"{"purchased": "yes"}"#,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = client
        .send_raw(Method::POST, &toggle, Some("application/json"), "{")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // none of the rejected requests touched the item
    let (_, shown) = client.get(&format!("/lists/{id}")).await;
    assert_eq!(shown["data"]["items"][0]["purchased"], false);

    let (status, toggled) = client.send_raw(Method::POST, &toggle, None, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["data"]["purchased"], true);
}

#[tokio::test]
async fn cookieless_visitors_do_not_grow_the_store_unbounded() {
    let ids = Arc::new(IdGenerator::new());
    let sessions = Arc::new(
        InMemorySessionStore::new(Seed::builtin(), Arc::clone(&ids)).with_max_sessions(25),
    );
    let store: Arc<dyn SessionStore> = sessions.clone();
    let app = build_router(AppState::new(store, ids));

    for _ in 0..200 {
        let mut visitor = Client {
            app: app.clone(),
            cookie: None,
        };
        let (status, _) = visitor.get("/lists").await;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(sessions.len().await, 25);
}
