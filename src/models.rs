//! Row types for users, inventory items and suppliers, plus the change sets used by updates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// A stored account. `password` is an Argon2 PHC string, never the plaintext.
#[derive(Clone, Debug)]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    pub userid: String,
    pub password: String,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub approved: bool,
    pub role: Role,
}

impl User {
    /// The login payload: every column except the password.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            approved: Some(self.approved),
            ..self.summary()
        }
    }

    /// Listing and lookup payload, which leaves out the approval flag as well.
    pub fn summary(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            userid: self.userid.clone(),
            email: self.email.clone(),
            contact: self.contact.clone(),
            approved: None,
            role: self.role,
        }
    }
}

/// User as returned over HTTP: everything except the password.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: Option<String>,
    pub userid: String,
    pub email: Option<String>,
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
    pub role: Role,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: Option<String>,
    pub userid: String,
    pub password: String,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub approved: bool,
    pub role: Role,
}

/// Profile fields a user may change after signup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserField {
    Name,
    Email,
    Contact,
}

impl UserField {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(UserField::Name),
            "email" => Some(UserField::Email),
            "contact" => Some(UserField::Contact),
            _ => None,
        }
    }

    /// Column name; also the field name used by the API.
    pub fn column(self) -> &'static str {
        match self {
            UserField::Name => "name",
            UserField::Email => "email",
            UserField::Contact => "contact",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub item_id: i64,
    pub item_name: String,
    pub item_quantity: i64,
    pub item_cost: f64,
    pub supplier_name: String,
    pub supplier_id: i64,
    pub image_path: Option<String>,
}

/// Replacement values for an inventory update. `image_path: None` keeps the stored path.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemChanges {
    pub item_name: String,
    pub item_quantity: i64,
    pub item_cost: f64,
    pub supplier_name: String,
    pub image_path: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub supplier_id: i64,
    pub supplier_name: String,
    pub contact: String,
    pub address: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SupplierChanges {
    pub supplier_name: String,
    pub contact: String,
    pub address: Option<String>,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_serializes_with_camel_case_keys() {
        let item = InventoryItem {
            item_id: 10,
            item_name: "Widget".into(),
            item_quantity: 5,
            item_cost: 2.5,
            supplier_name: "Acme".into(),
            supplier_id: 1,
            image_path: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["itemId"], 10);
        assert_eq!(json["supplierName"], "Acme");
        assert!(json["imagePath"].is_null());
    }

    #[test]
    fn profile_drops_password() {
        let user = User {
            id: 1,
            name: Some("Ann".into()),
            userid: "ann".into(),
            password: "$argon2id$secret".into(),
            email: None,
            contact: None,
            approved: false,
            role: Role::User,
        };
        let json = serde_json::to_value(user.profile()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "user");
        assert_eq!(json["approved"], false);

        let json = serde_json::to_value(user.summary()).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("approved").is_none());
    }

    #[test]
    fn only_profile_fields_are_updatable() {
        assert_eq!(UserField::parse("email"), Some(UserField::Email));
        assert_eq!(UserField::parse("role"), None);
        assert_eq!(UserField::parse("password"), None);
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
    }
}
