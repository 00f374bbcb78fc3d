//! Cross-crate model behavior: wire shapes for chat events, role parsing,
//! and the bilingual value as it appears in JSON.

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use domains::models::{AuthorRef, ChatEvent, ChatMessage, Role, UserIdentity};
use domains::Bilingual;

fn message() -> ChatMessage {
    ChatMessage {
        id: Uuid::new_v4(),
        author: AuthorRef {
            user_id: Uuid::new_v4(),
            username: "olena".into(),
            email: "olena@example.com".into(),
        },
        body: "привіт".into(),
        is_deleted: false,
        created_at: Utc::now(),
    }
}

#[test]
fn chat_events_are_tagged_by_type() {
    let posted = serde_json::to_value(ChatEvent::Posted { message: message() }).unwrap();
    assert_eq!(posted["type"], "posted");
    assert_eq!(posted["message"]["body"], "привіт");

    let id = Uuid::new_v4();
    let deleted = serde_json::to_value(ChatEvent::Deleted { id }).unwrap();
    assert_eq!(deleted["type"], "deleted");
    assert_eq!(deleted["id"], id.to_string());

    let presence = serde_json::to_value(ChatEvent::Presence { online: 7 }).unwrap();
    assert_eq!(presence["type"], "presence");
    assert_eq!(presence["online"], 7);
}

#[test]
fn chat_event_round_trips() {
    let event = ChatEvent::Posted { message: message() };
    let text = serde_json::to_string(&event).unwrap();
    let back: ChatEvent = serde_json::from_str(&text).unwrap();
    assert_eq!(back, event);
}

#[test]
fn bilingual_values_nest_in_json() {
    let value = serde_json::to_value(Bilingual::new("Заголовок", "Headline")).unwrap();
    assert_eq!(value, json!({ "uk": "Заголовок", "en": "Headline" }));

    let back: Bilingual = serde_json::from_value(value).unwrap();
    assert_eq!(back.uk, "Заголовок");
    assert_eq!(back.en, "Headline");
}

#[test]
fn roles_parse_and_print_symmetrically() {
    assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    assert_eq!("member".parse::<Role>().unwrap(), Role::Member);
    assert_eq!(Role::Admin.as_str(), "admin");
    assert!("owner".parse::<Role>().is_err());
}

#[test]
fn only_the_admin_role_grants_admin() {
    let mut identity = UserIdentity {
        id: Uuid::new_v4(),
        username: "olena".into(),
        email: "olena@example.com".into(),
        role: Role::Member,
    };
    assert!(!identity.is_admin());
    identity.role = Role::Admin;
    assert!(identity.is_admin());
}
