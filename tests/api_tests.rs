//! Catalogue requests against an in-memory transport

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pokedex_arena::api::{ApiError, Catalogue, Transport};
use pokedex_arena::state::BattleOutcome;
use pretty_assertions::assert_eq;

const BASE: &str = "https://fixture.test/api/v2";

/// Serves canned bodies and records every requested URL.
#[derive(Default)]
struct FixtureTransport {
    bodies: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl FixtureTransport {
    fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }
}

#[async_trait]
impl Transport for FixtureTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        self.bodies
            .get(url)
            .map(|body| body.clone().into_bytes())
            .ok_or_else(|| ApiError::NotFound(url.to_string()))
    }
}

struct Shared(Arc<FixtureTransport>);

#[async_trait]
impl Transport for Shared {
    async fn get(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        self.0.get(url).await
    }
}

fn pokemon(id: u32, name: &str, hp: u32, attack: u32, moves: &[u32]) -> String {
    let moves: Vec<String> = moves
        .iter()
        .map(|m| {
            format!(r#"{{ "move": {{ "name": "move-{m}", "url": "{BASE}/move/{m}/" }} }}"#)
        })
        .collect();
    format!(
        r#"{{
            "id": {id},
            "name": "{name}",
            "sprites": {{ "front_default": "https://img/{id}.png" }},
            "types": [{{ "slot": 1, "type": {{ "name": "normal", "url": "u" }} }}],
            "stats": [
                {{ "base_stat": {hp}, "stat": {{ "name": "hp", "url": "u" }} }},
                {{ "base_stat": {attack}, "stat": {{ "name": "attack", "url": "u" }} }}
            ],
            "moves": [{}]
        }}"#,
        moves.join(",")
    )
}

fn move_body(id: u32) -> String {
    format!(
        r#"{{
            "name": "move-{id}",
            "effect_entries": [
                {{ "effect": "Effet {id}.", "language": {{ "name": "fr", "url": "u" }} }},
                {{ "effect": "Does   thing\n{id}.", "language": {{ "name": "en", "url": "u" }} }}
            ]
        }}"#
    )
}

fn list_body(ids: &[u32]) -> String {
    let results: Vec<String> = ids
        .iter()
        .map(|id| format!(r#"{{ "name": "mon-{id}", "url": "{BASE}/pokemon/{id}/" }}"#))
        .collect();
    format!(r#"{{ "count": 1302, "results": [{}] }}"#, results.join(","))
}

#[tokio::test]
async fn test_listing_loads_every_detail() {
    let transport = FixtureTransport::default()
        .with(format!("{BASE}/pokemon?limit=3"), list_body(&[1, 2, 3]))
        .with(format!("{BASE}/pokemon/1/"), pokemon(1, "bulbasaur", 45, 49, &[]))
        .with(format!("{BASE}/pokemon/2/"), pokemon(2, "ivysaur", 60, 62, &[]))
        .with(format!("{BASE}/pokemon/3/"), pokemon(3, "venusaur", 80, 82, &[]));
    let catalogue = Catalogue::new(format!("{BASE}/"), transport);

    let entries = catalogue.load_listing(3).await.expect("listing loads");

    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["bulbasaur", "ivysaur", "venusaur"]);
    assert_eq!(entries[2].total(), 162);
    assert_eq!(entries[0].sprite.as_deref(), Some("https://img/1.png"));
}

#[tokio::test]
async fn test_listing_fails_when_any_detail_fails() {
    let transport = FixtureTransport::default()
        .with(format!("{BASE}/pokemon?limit=2"), list_body(&[1, 2]))
        .with(format!("{BASE}/pokemon/1/"), pokemon(1, "bulbasaur", 45, 49, &[]));
    let catalogue = Catalogue::new(BASE, transport);

    let result = catalogue.load_listing(2).await;

    assert!(matches!(result, Err(ApiError::NotFound(url)) if url.ends_with("/pokemon/2/")));
}

#[tokio::test]
async fn test_entry_by_name_uses_given_name() {
    let transport = FixtureTransport::default().with(
        format!("{BASE}/pokemon/mr-mime"),
        pokemon(122, "mr-mime", 40, 45, &[]),
    );
    let catalogue = Catalogue::new(BASE, transport);

    let entry = catalogue.entry_by_name("mr-mime").await.expect("found");
    assert_eq!(entry.id, 122);
    assert_eq!(entry.display_name(), "MR-MIME");

    let missing = catalogue.entry_by_name("missingno").await;
    assert!(matches!(missing, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn test_random_pick_fetches_first_ten_moves() {
    let move_ids: Vec<u32> = (1..=12).collect();
    let mut transport = FixtureTransport::default().with(
        format!("{BASE}/pokemon/133"),
        pokemon(133, "eevee", 55, 55, &move_ids),
    );
    for id in &move_ids {
        transport = transport.with(format!("{BASE}/move/{id}/"), move_body(*id));
    }
    let transport = Arc::new(transport);
    let catalogue = Catalogue::new(BASE, Shared(Arc::clone(&transport)));

    let pick = catalogue.random_pick(133).await.expect("pick loads");

    assert_eq!(pick.entry.name, "eevee");
    assert_eq!(pick.moves.len(), 10);
    assert_eq!(pick.moves[0].name, "move-1");
    assert_eq!(pick.moves[0].description.as_deref(), Some("Does thing 1."));

    let requests = transport.requests.lock().expect("requests").clone();
    assert_eq!(requests.len(), 11);
    assert!(!requests.iter().any(|url| url.ends_with("/move/11/")));
}

#[tokio::test]
async fn test_random_pick_with_fewer_than_ten_moves() {
    let transport = Arc::new(
        FixtureTransport::default()
            .with(
                format!("{BASE}/pokemon/129"),
                pokemon(129, "magikarp", 20, 10, &[150, 33, 175]),
            )
            .with(format!("{BASE}/move/150/"), move_body(150))
            .with(format!("{BASE}/move/33/"), move_body(33))
            .with(format!("{BASE}/move/175/"), move_body(175)),
    );
    let catalogue = Catalogue::new(BASE, Shared(Arc::clone(&transport)));

    let pick = catalogue.random_pick(129).await.expect("pick loads");

    assert_eq!(pick.moves.len(), 3);
    let names: Vec<_> = pick.moves.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["move-150", "move-33", "move-175"]);

    let requests = transport.requests.lock().expect("requests").clone();
    assert_eq!(requests.len(), 4);
}

#[tokio::test]
async fn test_random_pick_without_moves() {
    let transport = Arc::new(FixtureTransport::default().with(
        format!("{BASE}/pokemon/235"),
        pokemon(235, "smeargle", 55, 20, &[]),
    ));
    let catalogue = Catalogue::new(BASE, Shared(Arc::clone(&transport)));

    let pick = catalogue.random_pick(235).await.expect("pick loads");

    assert_eq!(pick.entry.name, "smeargle");
    assert!(pick.moves.is_empty());

    let requests = transport.requests.lock().expect("requests").clone();
    assert_eq!(requests, vec![format!("{BASE}/pokemon/235")]);
}

#[tokio::test]
async fn test_random_pick_fails_when_a_move_fails() {
    let transport = FixtureTransport::default()
        .with(
            format!("{BASE}/pokemon/25"),
            pokemon(25, "pikachu", 35, 55, &[84, 86, 98]),
        )
        .with(format!("{BASE}/move/84/"), move_body(84))
        .with(format!("{BASE}/move/98/"), move_body(98));
    let catalogue = Catalogue::new(BASE, transport);

    let result = catalogue.random_pick(25).await;

    assert!(matches!(result, Err(ApiError::NotFound(url)) if url.ends_with("/move/86/")));
}

#[tokio::test]
async fn test_battle_pair_fetches_both_even_when_equal() {
    let transport = Arc::new(FixtureTransport::default().with(
        format!("{BASE}/pokemon/132"),
        pokemon(132, "ditto", 48, 48, &[]),
    ));
    let catalogue = Catalogue::new(BASE, Shared(Arc::clone(&transport)));

    let (left, right) = catalogue.battle_pair(132, 132).await.expect("pair loads");

    assert_eq!(left, right);
    assert_eq!(
        pokedex_arena::dex::battle_outcome(&left, &right),
        BattleOutcome::Tie
    );
    let requests = transport.requests.lock().expect("requests").clone();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_battle_pair_fails_if_either_side_fails() {
    let transport = FixtureTransport::default().with(
        format!("{BASE}/pokemon/6"),
        pokemon(6, "charizard", 78, 84, &[]),
    );
    let catalogue = Catalogue::new(BASE, transport);

    let result = catalogue.battle_pair(6, 9).await;
    assert!(result.is_err());
}
