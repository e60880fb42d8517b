use super::{Catalog, Category, MenuItem, MenuItemDraft};
use crate::constants::SEED_NAMESPACE;
use uuid::Uuid;

const SEED_ITEMS: &[(Category, &str, &str, &str, &str)] = &[
    (
        Category::Entrees,
        "Salade Lyonnaise",
        "Mélange exotique...",
        "14€",
        "/entrees/saladeLyonnaise.png",
    ),
    (
        Category::Entrees,
        "Ravioles aux cèpes",
        "Saumon frais mariné...",
        "16€",
        "/entrees/ravioles.jpeg",
    ),
    (
        Category::Plats,
        "Tataki de Thon",
        "Poisson grillé...",
        "28€",
        "/plats/tatakiThon.jpeg",
    ),
    (
        Category::Desserts,
        "Brioche Perdue",
        "Caramélisé au miel...",
        "10€",
        "/dessert/brioche-perdue.jpg",
    ),
    (
        Category::Boissons,
        "Sex On The Beach",
        "Rhum, jus fruits...",
        "12€",
        "/cocktails/Sexonthebeach.jpg",
    ),
];

/// Deterministic id for a seeded item so restarts keep the same ids.
pub fn seed_item_id(category: Category, name: &str) -> Uuid {
    Uuid::new_v5(
        &SEED_NAMESPACE,
        format!("{}/{}", category.key(), name).as_bytes(),
    )
}

/// The carte the restaurant opens with.
pub fn seed_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    for &(category, name, description, price, image_path) in SEED_ITEMS {
        let draft = MenuItemDraft::new(name, description, price, image_path);
        catalog.push(
            category,
            MenuItem::from_draft(seed_item_id(category, name), draft),
        );
    }
    catalog
}
