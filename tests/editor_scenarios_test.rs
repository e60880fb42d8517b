use anyhow::Result;
use std::sync::Arc;
use tiki_menu::app::{CatalogEditor, CommitOutcome, EditorState, GuardedStore};
use tiki_menu::domain::{
    seed_catalog, Catalog, Category, ItemRef, MenuItem, MenuItemDraft, Role, Session,
    StagingField,
};
use tiki_menu::error::MenuError;
use tiki_menu::infra::InMemoryCatalogStore;
use uuid::Uuid;

fn store_with(catalog: Catalog) -> GuardedStore {
    GuardedStore::new(Arc::new(InMemoryCatalogStore::with_catalog(catalog)))
}

fn item(name: &str, price: &str) -> MenuItem {
    MenuItem {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: format!("{name} maison"),
        price: price.to_string(),
        image_path: format!("/plats/{}.jpg", name.to_lowercase()),
    }
}

#[tokio::test]
async fn test_price_edit_scenario() -> Result<()> {
    let a = item("Tataki", "28€");
    let mut catalog = Catalog::new();
    catalog.set_items(Category::Plats, vec![a.clone()]);
    let store = store_with(catalog);
    let admin = Session::admin("Chef");

    let mut editor = CatalogEditor::open(store.clone()).await?;
    assert!(editor.select_category("plats"));
    editor.begin_edit(&admin, ItemRef::Position(0))?;
    editor.update_staging_field(StagingField::Price, "30€");
    editor.commit(&admin).await?;

    let plats = editor.items_in(Category::Plats);
    assert_eq!(plats.len(), 1);
    assert_eq!(plats[0].price, "30€");
    assert_eq!(plats[0].id, a.id);
    assert_eq!(plats[0].name, a.name);
    assert_eq!(plats[0].description, a.description);
    assert_eq!(plats[0].image_path, a.image_path);
    assert_eq!(editor.state(), EditorState::Viewing);

    // The store agrees with the editor's view.
    assert_eq!(store.read(Category::Plats).await?, plats.to_vec());
    Ok(())
}

#[tokio::test]
async fn test_add_missing_description_scenario() -> Result<()> {
    let store = store_with(seed_catalog());
    let admin = Session::admin("Chef");
    let mut editor = CatalogEditor::open(store.clone()).await?;
    editor.select_category("plats");
    let before = editor.items().to_vec();

    editor.begin_add(&admin)?;
    editor.update_staging_field(StagingField::Name, "Poulet coco");
    editor.update_staging_field(StagingField::Price, "24€");
    editor.update_staging_field(StagingField::ImagePath, "/plats/poulet.jpg");

    let err = editor.commit(&admin).await.unwrap_err();
    assert!(matches!(err, MenuError::Validation { ref missing } if missing == &[StagingField::Description]));
    assert_eq!(editor.items(), before.as_slice());
    assert_eq!(store.read(Category::Plats).await?, before);
    assert_eq!(editor.state(), EditorState::Adding);
    Ok(())
}

#[tokio::test]
async fn test_state_is_always_exactly_one_mode() -> Result<()> {
    let store = store_with(seed_catalog());
    let admin = Session::admin("Chef");
    let mut editor = CatalogEditor::open(store).await?;

    // Walk a fixed but varied sequence of operations and check the
    // state/staging pairing after every step.
    let steps = [
        "add", "edit0", "commit", "cancel", "edit1", "add", "fill", "commit", "add", "fill",
        "commit", "edit0", "clear", "commit", "cancel", "commit", "edit2", "fill", "commit",
    ];
    for step in steps {
        let _ = match step {
            "add" => editor.begin_add(&admin).map(|_| ()),
            "edit0" => editor.begin_edit(&admin, ItemRef::Position(0)),
            "edit1" => editor.begin_edit(&admin, ItemRef::Position(1)),
            "edit2" => editor.begin_edit(&admin, ItemRef::Position(2)),
            "fill" => {
                for field in StagingField::ALL {
                    editor.update_staging_field(field, format!("{field}-value"));
                }
                Ok(())
            }
            "clear" => {
                editor.update_staging_field(StagingField::Name, "");
                Ok(())
            }
            "commit" => editor.commit(&admin).await.map(|_| ()),
            "cancel" => {
                editor.cancel();
                Ok(())
            }
            other => unreachable!("{other}"),
        };

        match editor.state() {
            EditorState::Viewing => assert!(editor.staging().is_none(), "after {step}"),
            EditorState::Adding => assert!(editor.staging().is_some(), "after {step}"),
            EditorState::Editing { position } => {
                assert!(editor.staging().is_some(), "after {step}");
                assert!(position < editor.items().len(), "after {step}");
            }
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_delete_then_add_keeps_order() -> Result<()> {
    let store = store_with(seed_catalog());
    let admin = Session::admin("Chef");
    let mut editor = CatalogEditor::open(store).await?;
    let first = editor.items()[0].clone();
    let second = editor.items()[1].clone();

    editor.delete_item(&admin, ItemRef::Position(0)).await?;
    editor.begin_add(&admin)?;
    let draft = MenuItemDraft::new("Accras", "Morue pimentée", "9€", "/entrees/accras.jpg");
    for field in StagingField::ALL {
        editor.update_staging_field(field, draft.get(field));
    }
    let outcome = editor.commit(&admin).await?;

    let names: Vec<&str> = editor.items().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec![second.name.as_str(), "Accras"]);
    assert!(matches!(outcome, CommitOutcome::Added(ref added) if added.id != first.id));
    Ok(())
}

#[tokio::test]
async fn test_member_sees_but_cannot_touch() -> Result<()> {
    let store = store_with(seed_catalog());
    let member = Session::user("Marie", Role::Member);
    let mut editor = CatalogEditor::open(store.clone()).await?;

    assert!(!editor.can_edit(&member));
    for category in Category::ALL {
        editor.select(category);
        assert_eq!(editor.items(), store.read(category).await?.as_slice());
    }

    let before = store.read_all().await?;
    assert!(editor.begin_add(&member).is_err());
    assert!(editor.begin_edit(&member, ItemRef::Position(0)).is_err());
    assert!(editor.delete_item(&member, ItemRef::Position(0)).await.is_err());
    assert_eq!(store.read_all().await?, before);
    Ok(())
}

#[tokio::test]
async fn test_two_editors_share_one_store() -> Result<()> {
    let store = store_with(seed_catalog());
    let admin = Session::admin("Chef");
    let mut first = CatalogEditor::open(store.clone()).await?;
    let mut second = CatalogEditor::open(store.clone()).await?;

    first.select(Category::Desserts);
    first.begin_add(&admin)?;
    let draft = MenuItemDraft::new("Flan coco", "Lait de coco", "8€", "/dessert/flan.jpg");
    for field in StagingField::ALL {
        first.update_staging_field(field, draft.get(field));
    }
    first.commit(&admin).await?;

    // Views are independent until refreshed.
    assert_eq!(second.items_in(Category::Desserts).len(), 1);
    second.refresh().await?;
    assert_eq!(second.items_in(Category::Desserts).len(), 2);
    Ok(())
}
