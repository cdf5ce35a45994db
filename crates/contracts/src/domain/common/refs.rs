use super::Entity;
use serde::{Deserialize, Serialize};

/// A reference that the backend returns either as a bare id or populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Id(String),
    Populated(T),
}

impl<T: Entity> Ref<T> {
    pub fn id(&self) -> &str {
        match self {
            Ref::Id(id) => id,
            Ref::Populated(value) => value.id(),
        }
    }

    pub fn populated(&self) -> Option<&T> {
        match self {
            Ref::Id(_) => None,
            Ref::Populated(value) => Some(value),
        }
    }

    /// Display label, falls back to the id when not populated.
    pub fn label(&self) -> String {
        match self {
            Ref::Id(id) => id.clone(),
            Ref::Populated(value) => value.display_name(),
        }
    }
}

pub fn ref_id<T: Entity>(value: &Option<Ref<T>>) -> String {
    value.as_ref().map(|r| r.id().to_string()).unwrap_or_default()
}

pub fn ref_label<T: Entity>(value: &Option<Ref<T>>) -> String {
    value.as_ref().map(Ref::label).unwrap_or_else(|| "-".to_string())
}

/// Customer as embedded into sales and invoices
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartySummary {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub consignee_name: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
}

impl Entity for PartySummary {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.company_name
            .clone()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.consignee_name.clone())
            .unwrap_or_else(|| self.id.clone())
    }

    fn aggregate_index() -> &'static str {
        "r001"
    }

    fn collection_name() -> &'static str {
        "parties"
    }

    fn element_name() -> &'static str {
        "Party"
    }

    fn list_name() -> &'static str {
        "Parties"
    }
}

/// Inventory item as embedded into sales, BOMs and processes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub uom: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Entity for ProductSummary {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id.clone())
    }

    fn aggregate_index() -> &'static str {
        "r002"
    }

    fn collection_name() -> &'static str {
        "product"
    }

    fn element_name() -> &'static str {
        "Product"
    }

    fn list_name() -> &'static str {
        "Products"
    }
}

/// Console user as embedded into sales and assignments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserSummary {
    pub fn full_name(&self) -> String {
        let name = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        name.trim().to_string()
    }
}

impl Entity for UserSummary {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        let name = self.full_name();
        if name.is_empty() {
            self.email.clone().unwrap_or_else(|| self.id.clone())
        } else {
            name
        }
    }

    fn aggregate_index() -> &'static str {
        "r003"
    }

    fn collection_name() -> &'static str {
        "user"
    }

    fn element_name() -> &'static str {
        "User"
    }

    fn list_name() -> &'static str {
        "Users"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_accepts_id_or_object() {
        let by_id: Ref<PartySummary> = serde_json::from_str(r#""64f0a1""#).unwrap();
        assert_eq!(by_id.id(), "64f0a1");
        assert_eq!(by_id.label(), "64f0a1");
        assert!(by_id.populated().is_none());

        let populated: Ref<PartySummary> =
            serde_json::from_str(r#"{"_id":"64f0a1","consignee_name":"R. Mehta","company_name":"Mehta Steel"}"#)
                .unwrap();
        assert_eq!(populated.id(), "64f0a1");
        assert_eq!(populated.label(), "Mehta Steel");
    }

    #[test]
    fn test_user_label_falls_back_to_email() {
        let user = UserSummary {
            id: "u1".into(),
            email: Some("ops@example.com".into()),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "ops@example.com");
        assert_eq!(ref_label::<UserSummary>(&None), "-");
    }
}
