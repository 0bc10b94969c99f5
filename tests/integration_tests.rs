use std::io::Cursor;
use std::sync::Arc;
use std::thread;

use hybrid_recommender::{
    Catalog, CatalogSchema, Config, EngineConfig, EngineHandle, Error, Item, RecommenderEngine,
};
use tempfile::TempDir;

const GAMES_CSV: &str = "\
title,short_description,tags,popularity
A,space game,,10
B,space adventure,,5
C,cooking recipes,,1
";

fn games() -> Catalog {
    Catalog::from_csv_reader(Cursor::new(GAMES_CSV), &CatalogSchema::default()).unwrap()
}

#[test]
fn shared_content_and_popularity_rank_b_first() {
    let engine = RecommenderEngine::build(games(), &EngineConfig::default()).unwrap();
    let recs = engine.recommend("A", 2, 0.6).unwrap();
    assert_eq!(recs.titles(), vec!["B", "C"]);
}

#[test]
fn pure_popularity_ignores_content() {
    let catalog = Catalog::from_items(vec![
        Item::new("A").with_short_description("space game").with_popularity(10.0),
        Item::new("B").with_short_description("cooking recipes").with_popularity(5.0),
        Item::new("C").with_short_description("space game deluxe").with_popularity(1.0),
    ])
    .unwrap();
    let engine = RecommenderEngine::build(catalog, &EngineConfig::default()).unwrap();
    assert_eq!(engine.recommend("A", 2, 0.0).unwrap().titles(), vec!["B", "C"]);
    assert_eq!(engine.recommend("A", 2, 1.0).unwrap().titles(), vec!["C", "B"]);
}

#[test]
fn unknown_title_and_zero_topn_are_empty() {
    let engine = RecommenderEngine::build(games(), &EngineConfig::default()).unwrap();
    assert!(engine.recommend("Nope", 5, 0.6).unwrap().is_empty());
    assert!(engine.recommend("A", 0, 0.6).unwrap().is_empty());
    assert_eq!(engine.recommend("A", 50, 0.6).unwrap().len(), 2);
}

#[test]
fn builds_are_deterministic() {
    let config = EngineConfig::default();
    let a = RecommenderEngine::build(games(), &config).unwrap();
    let b = RecommenderEngine::build(games(), &config).unwrap();
    assert_eq!(a.similarity(), b.similarity());
    for title in ["A", "B", "C"] {
        assert_eq!(
            a.recommend(title, 5, 0.4).unwrap(),
            b.recommend(title, 5, 0.4).unwrap()
        );
    }
}

#[test]
fn missing_popularity_column_defaults_to_zero() {
    let csv = "title,short_description\nA,red apple\nB,red cherry\nC,blue sky\n";
    let catalog = Catalog::from_csv_reader(Cursor::new(csv), &CatalogSchema::default()).unwrap();
    assert!(catalog.items().all(|item| item.popularity == 0.0));

    let engine = RecommenderEngine::build(catalog, &EngineConfig::default()).unwrap();
    let recs = engine.recommend("A", 2, 0.6).unwrap();
    assert_eq!(recs.titles(), vec!["B", "C"]);
}

#[test]
fn duplicate_titles_are_rejected() {
    let csv = "title,popularity\nA,1\nB,2\nA,3\n";
    match Catalog::from_csv_reader(Cursor::new(csv), &CatalogSchema::default()) {
        Err(Error::DuplicateTitle { title, first_row, row }) => {
            assert_eq!(title, "A");
            assert_eq!(first_row, 0);
            assert_eq!(row, 2);
        }
        other => panic!("expected DuplicateTitle, got {other:?}"),
    }
}

#[test]
fn csv_file_and_config_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let catalog_path = dir.path().join("items.csv");
    std::fs::write(&catalog_path, "name,blurb,views\nA,space game,10\nB,space adventure,5\nC,cooking recipes,1\n").unwrap();
    let config_path = dir.path().join("hybrec.toml");
    std::fs::write(
        &config_path,
        r#"
[engine]
default_alpha = 0.6
default_topn = 1

[schema]
title = "name"
short_description = "blurb"
popularity = "views"
"#,
    )
    .unwrap();

    let config = Config::from_file(&config_path).unwrap();
    let catalog = Catalog::from_csv_path(&catalog_path, &config.schema).unwrap();
    let engine = RecommenderEngine::build(catalog, &config.engine).unwrap();
    let recs = engine.recommend_default("A").unwrap();
    assert_eq!(recs.titles(), vec!["B"]);

    let out = dir.path().join("out.csv");
    recs.to_table().write_csv(std::fs::File::create(&out).unwrap()).unwrap();
    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("title,hybrid_score,popularity\nB,"));
}

#[test]
fn recommendations_serialize_as_a_list() {
    let engine = RecommenderEngine::build(games(), &EngineConfig::default()).unwrap();
    let recs = engine.recommend("A", 1, 0.6).unwrap();
    let json = serde_json::to_value(&recs).unwrap();
    assert_eq!(json[0]["title"], "B");
    assert_eq!(json[0]["popularity"], 5.0);
    assert!(json[0]["hybrid_score"].is_number());
}

#[test]
fn concurrent_queries_during_reload() {
    let handle = Arc::new(EngineHandle::build(games(), EngineConfig::default()).unwrap());
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let handle = Arc::clone(&handle);
            thread::spawn(move || {
                for _ in 0..50 {
                    let engine = handle.current();
                    let recs = engine.recommend("A", 10, 0.5).unwrap();
                    // each snapshot is internally consistent
                    assert_eq!(recs.len(), engine.catalog().len() - 1);
                }
            })
        })
        .collect();

    let bigger = Catalog::from_items(
        games()
            .items()
            .cloned()
            .chain([Item::new("D").with_short_description("space cooking").with_popularity(2.0)]),
    )
    .unwrap();
    handle.reload(bigger).unwrap();

    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(handle.current().catalog().len(), 4);
}
