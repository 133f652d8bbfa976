//! Integration tests for the SQLite car repository.

mod common;

use std::collections::HashSet;

use fast_car_api::{CarPatch, CarRepository, NewCar, Page, SqliteCarRepository};

fn new_car(brand: &str, model: &str) -> NewCar {
    NewCar {
        brand: brand.into(),
        color: "red".into(),
        model: model.into(),
        model_year: 2022,
        factory_year: 2021,
        description: None,
    }
}

async fn repo() -> SqliteCarRepository {
    SqliteCarRepository::new(common::test_pool().await)
}

#[tokio::test]
async fn create_assigns_id_and_roundtrips_fields() {
    let repo = repo().await;
    let mut input = new_car("Toyota", "Corolla");
    input.description = Some("one owner".into());

    let car = repo.create(&input).await.unwrap();
    assert_eq!(car.id, 1);
    assert_eq!(car, input.clone().with_id(1));

    let loaded = repo.get_by_id(car.id).await.unwrap().unwrap();
    assert_eq!(loaded, car);
}

#[tokio::test]
async fn get_missing_returns_none() {
    let repo = repo().await;
    assert_eq!(repo.get_by_id(999).await.unwrap(), None);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let repo = repo().await;
    let first = repo.create(&new_car("Fiat", "Uno")).await.unwrap();
    let second = repo.create(&new_car("Fiat", "Palio")).await.unwrap();
    assert!(repo.delete(second.id).await.unwrap());

    let third = repo.create(&new_car("Fiat", "Argo")).await.unwrap();
    assert!(third.id > second.id);
    assert_ne!(third.id, first.id);
}

#[tokio::test]
async fn list_is_ordered_and_windowed() {
    let repo = repo().await;
    for model in ["A", "B", "C", "D"] {
        repo.create(&new_car("VW", model)).await.unwrap();
    }

    let all = repo.list(Page::default()).await.unwrap();
    let models: Vec<_> = all.iter().map(|c| c.model.as_str()).collect();
    assert_eq!(models, ["A", "B", "C", "D"]);

    let window = repo.list(Page { offset: 1, limit: 2 }).await.unwrap();
    let models: Vec<_> = window.iter().map(|c| c.model.as_str()).collect();
    assert_eq!(models, ["B", "C"]);

    let beyond = repo.list(Page { offset: 10, limit: 100 }).await.unwrap();
    assert!(beyond.is_empty());

    let none = repo.list(Page { offset: 0, limit: 0 }).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn update_overwrites_every_field() {
    let repo = repo().await;
    let mut original = new_car("Toyota", "Corolla");
    original.description = Some("to be dropped".into());
    let car = repo.create(&original).await.unwrap();

    let replacement = new_car("Honda", "Civic");
    let updated = repo.update(car.id, &replacement).await.unwrap().unwrap();
    assert_eq!(updated, replacement.with_id(car.id));
    assert_eq!(updated.description, None);
}

#[tokio::test]
async fn update_missing_returns_none() {
    let repo = repo().await;
    assert_eq!(repo.update(7, &new_car("Ford", "Ka")).await.unwrap(), None);
}

#[tokio::test]
async fn partial_update_changes_only_supplied_fields() {
    let repo = repo().await;
    let mut original = new_car("Toyota", "Corolla");
    original.description = Some("keep me".into());
    let car = repo.create(&original).await.unwrap();

    let patch = CarPatch {
        color: Some("blue".into()),
        factory_year: Some(2020),
        ..CarPatch::default()
    };
    let patched = repo.partial_update(car.id, patch).await.unwrap().unwrap();
    assert_eq!(patched.color, "blue");
    assert_eq!(patched.factory_year, 2020);
    assert_eq!(patched.brand, "Toyota");
    assert_eq!(patched.description.as_deref(), Some("keep me"));

    let stored = repo.get_by_id(car.id).await.unwrap().unwrap();
    assert_eq!(stored, patched);
}

#[tokio::test]
async fn partial_update_can_clear_description() {
    let repo = repo().await;
    let mut original = new_car("Toyota", "Corolla");
    original.description = Some("old".into());
    let car = repo.create(&original).await.unwrap();

    let patch = CarPatch {
        description: Some(None),
        ..CarPatch::default()
    };
    let patched = repo.partial_update(car.id, patch).await.unwrap().unwrap();
    assert_eq!(patched.description, None);
}

#[tokio::test]
async fn partial_update_missing_returns_none() {
    let repo = repo().await;
    let patch = CarPatch {
        color: Some("blue".into()),
        ..CarPatch::default()
    };
    assert_eq!(repo.partial_update(3, patch).await.unwrap(), None);
    assert_eq!(repo.partial_update(3, CarPatch::default()).await.unwrap(), None);
}

#[tokio::test]
async fn delete_reports_whether_a_row_matched() {
    let repo = repo().await;
    let car = repo.create(&new_car("Renault", "Clio")).await.unwrap();
    assert!(repo.delete(car.id).await.unwrap());
    assert!(!repo.delete(car.id).await.unwrap());
    assert_eq!(repo.get_by_id(car.id).await.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_partial_updates_all_succeed_on_a_file_database() {
    let (_dir, pool) = common::file_pool().await;
    let repo = SqliteCarRepository::new(pool);
    let car = repo.create(&new_car("Toyota", "Corolla")).await.unwrap();

    let writers = 40;
    let handles: Vec<_> = (0..writers)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move {
                let patch = CarPatch {
                    color: Some(format!("c{i}")),
                    ..CarPatch::default()
                };
                repo.partial_update(car.id, patch).await
            })
        })
        .collect();

    for handle in handles {
        let patched = handle.await.unwrap().unwrap();
        assert!(patched.is_some());
    }

    let colors: HashSet<String> = (0..writers).map(|i| format!("c{i}")).collect();
    let stored = repo.get_by_id(car.id).await.unwrap().unwrap();
    assert!(colors.contains(&stored.color), "unexpected color {}", stored.color);
    assert_eq!(stored.brand, "Toyota");
    assert_eq!(stored.model, "Corolla");
}
