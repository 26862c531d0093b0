//! Notes and characters: authenticated CRUD plus per-campaign mirrors.

mod common;

use common::{TestHarness, note_body};
use dvault_client::models::{CreateNote, UpdateNote};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn character_body(id: i64, campaign_id: i64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "campaign_id": campaign_id,
        "user_id": 7,
        "name": name,
        "description": "a wandering bard",
        "filename_backstory": format!("backstory_{id}.txt"),
        "img_name": format!("portrait_{id}.png"),
        "visibility": true,
    })
}

#[tokio::test]
async fn note_list_is_scoped_to_the_campaign() {
    let harness = TestHarness::signed_in("A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/notes/"))
        .and(query_param("campaign_id", "3"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            note_body(10, 3, "Session 1"),
            note_body(11, 3, "Session 2"),
        ])))
        .expect(1)
        .mount(&harness.server)
        .await;

    let notes = harness.client.notes.list_for_campaign(3).await.unwrap();
    assert_eq!(notes.len(), 2);

    let mirrored = harness.client.notes.cached().await.unwrap();
    assert_eq!(mirrored, notes);
}

#[tokio::test]
async fn note_create_and_update_keep_the_mirror_current() {
    let harness = TestHarness::signed_in("A1", "R1").await;

    Mock::given(method("POST"))
        .and(path("/notes/new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(note_body(12, 3, "Loot")))
        .mount(&harness.server)
        .await;

    let note = harness
        .client
        .notes
        .create(CreateNote {
            campaign_id: 3,
            title: "Loot".into(),
            file_name: "loot.txt".into(),
            visibility: true,
        })
        .await
        .unwrap();
    assert_eq!(note.id, 12);

    Mock::given(method("PUT"))
        .and(path("/notes/12/update"))
        .respond_with(ResponseTemplate::new(200).set_body_json(note_body(12, 3, "Loot v2")))
        .mount(&harness.server)
        .await;

    harness
        .client
        .notes
        .update(
            12,
            UpdateNote {
                title: "Loot v2".into(),
                file_name: "loot.txt".into(),
                visibility: true,
            },
        )
        .await
        .unwrap();

    let mirrored = harness.client.notes.cached().await.unwrap();
    assert_eq!(mirrored.len(), 1);
    assert_eq!(mirrored[0].title, "Loot v2");
}

#[tokio::test]
async fn note_delete_drops_the_mirror_row() {
    let harness = TestHarness::signed_in("A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/notes/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([note_body(10, 3, "Keep")])),
        )
        .mount(&harness.server)
        .await;
    harness.client.notes.list_for_campaign(3).await.unwrap();

    Mock::given(method("DELETE"))
        .and(path("/notes/10/delete"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": "deleted" })),
        )
        .mount(&harness.server)
        .await;

    harness.client.notes.delete(10).await.unwrap();
    assert!(harness.client.notes.cached().await.unwrap().is_empty());
}

#[tokio::test]
async fn transcribed_note_tolerates_a_null_author() {
    let harness = TestHarness::signed_in("A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/notes/20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 20,
            "campaign_id": 3,
            "user_id": null,
            "title": "Transcript",
            "creation_date": "2025-04-02",
            "file_name": "transcript.txt",
            "visibility": true,
        })))
        .mount(&harness.server)
        .await;

    let note = harness.client.notes.get(20).await.unwrap();
    assert_eq!(note.user_id, None);
}

#[tokio::test]
async fn character_list_replaces_the_mirror_wholesale() {
    let harness = TestHarness::signed_in("A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/characters/"))
        .and(query_param("campaign_id", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([character_body(30, 3, "Old Hero")])),
        )
        .up_to_n_times(1)
        .mount(&harness.server)
        .await;
    harness.client.characters.list_for_campaign(3).await.unwrap();

    Mock::given(method("GET"))
        .and(path("/characters/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            character_body(31, 3, "Bard"),
            character_body(32, 3, "Rogue"),
        ])))
        .mount(&harness.server)
        .await;
    harness.client.characters.list_for_campaign(3).await.unwrap();

    let mirrored = harness.client.characters.cached().await.unwrap();
    let names: Vec<&str> = mirrored.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Bard", "Rogue"]);
}

#[tokio::test]
async fn character_update_overwrites_the_mirror_row() {
    let harness = TestHarness::signed_in("A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/characters/31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(character_body(31, 3, "Bard")))
        .mount(&harness.server)
        .await;
    harness.client.characters.get(31).await.unwrap();

    Mock::given(method("PUT"))
        .and(path("/characters/31/update"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(character_body(31, 3, "Bard, Renamed")),
        )
        .mount(&harness.server)
        .await;

    harness
        .client
        .characters
        .update(
            31,
            dvault_client::models::UpdateCharacter {
                name: "Bard, Renamed".into(),
                description: "a wandering bard".into(),
                filename_backstory: "backstory_31.txt".into(),
                img_name: "portrait_31.png".into(),
                visibility: true,
            },
        )
        .await
        .unwrap();

    let mirrored = harness.client.characters.cached().await.unwrap();
    assert_eq!(mirrored.len(), 1);
    assert_eq!(mirrored[0].name, "Bard, Renamed");
}
