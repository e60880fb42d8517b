use crate::error::{MenuError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A dish or drink as displayed on the carte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Display-formatted, e.g. "14€". Never parsed.
    pub price: String,
    /// Opaque locator handed to the static asset service.
    #[serde(rename = "imagePath")]
    pub image_path: String,
}

impl MenuItem {
    pub fn from_draft(id: Uuid, draft: MenuItemDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image_path: draft.image_path,
        }
    }

    pub fn to_draft(&self) -> MenuItemDraft {
        MenuItemDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price.clone(),
            image_path: self.image_path.clone(),
        }
    }
}

/// The staging buffer: an item under construction or modification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default, rename = "imagePath")]
    pub image_path: String,
}

impl MenuItemDraft {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<String>,
        image_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price: price.into(),
            image_path: image_path.into(),
        }
    }

    pub fn get(&self, field: StagingField) -> &str {
        match field {
            StagingField::Name => &self.name,
            StagingField::Description => &self.description,
            StagingField::Price => &self.price,
            StagingField::ImagePath => &self.image_path,
        }
    }

    pub fn set(&mut self, field: StagingField, value: impl Into<String>) {
        let slot = match field {
            StagingField::Name => &mut self.name,
            StagingField::Description => &mut self.description,
            StagingField::Price => &mut self.price,
            StagingField::ImagePath => &mut self.image_path,
        };
        *slot = value.into();
    }

    /// Fields that are still the empty string, in declaration order.
    pub fn missing_fields(&self) -> Vec<StagingField> {
        StagingField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_empty())
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MenuError::Validation { missing })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StagingField {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "description")]
    Description,
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "imagePath")]
    ImagePath,
}

impl StagingField {
    pub const ALL: [StagingField; 4] = [
        StagingField::Name,
        StagingField::Description,
        StagingField::Price,
        StagingField::ImagePath,
    ];

    pub fn key(self) -> &'static str {
        match self {
            StagingField::Name => "name",
            StagingField::Description => "description",
            StagingField::Price => "price",
            StagingField::ImagePath => "imagePath",
        }
    }
}

impl fmt::Display for StagingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StagingField {
    type Err = MenuError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        StagingField::ALL
            .into_iter()
            .find(|f| f.key() == s)
            .ok_or_else(|| MenuError::UnknownField(s.to_string()))
    }
}

/// How a caller points at an item: by display position or by stable id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemRef {
    Position(usize),
    Id(Uuid),
}

impl From<usize> for ItemRef {
    fn from(position: usize) -> Self {
        ItemRef::Position(position)
    }
}

impl From<Uuid> for ItemRef {
    fn from(id: Uuid) -> Self {
        ItemRef::Id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_in_declaration_order() {
        let draft = MenuItemDraft::new("", "Poisson grillé", "", "");
        assert_eq!(
            draft.missing_fields(),
            vec![StagingField::Name, StagingField::Price, StagingField::ImagePath]
        );
    }

    #[test]
    fn test_whitespace_is_not_empty() {
        let draft = MenuItemDraft::new(" ", " ", " ", " ");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let mut draft = MenuItemDraft::new("Tataki de Thon", "", "28€", "/plats/tatakiThon.jpeg");
        let err = draft.validate().unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields: description");

        draft.set(StagingField::Description, "Poisson grillé...");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_field_keys_match_json_names() {
        assert_eq!("imagePath".parse::<StagingField>().unwrap(), StagingField::ImagePath);
        assert!("image_path".parse::<StagingField>().is_err());

        let json = serde_json::to_value(StagingField::ImagePath).unwrap();
        assert_eq!(json, serde_json::json!("imagePath"));
    }

    #[test]
    fn test_item_ref_json_shape() {
        let by_pos: ItemRef = serde_json::from_str(r#"{"position": 2}"#).unwrap();
        assert_eq!(by_pos, ItemRef::Position(2));

        let id = Uuid::new_v4();
        let by_id: ItemRef = serde_json::from_value(serde_json::json!({ "id": id })).unwrap();
        assert_eq!(by_id, ItemRef::Id(id));
    }
}
