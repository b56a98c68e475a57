use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// A registered user. Serializes as `{id, email}`; the password hash never leaves the store.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip)]
    pub password: String,
    #[serde(skip)]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: i64,
    pub name: String,
    pub terrain: String,
    pub rotation_period: i64,
    pub diameter: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub hair_color: String,
    pub height: i64,
    pub mass: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteTarget {
    Planet(i64),
    Character(i64),
}

impl FavoriteTarget {
    /// Id of the planet or character this points at.
    pub fn id(self) -> i64 {
        match self {
            FavoriteTarget::Planet(id) | FavoriteTarget::Character(id) => id,
        }
    }

    /// `(character_id, planets_id)` as stored in the favorites table.
    pub fn columns(self) -> (Option<i64>, Option<i64>) {
        match self {
            FavoriteTarget::Planet(id) => (None, Some(id)),
            FavoriteTarget::Character(id) => (Some(id), None),
        }
    }

    pub fn from_columns(character_id: Option<i64>, planets_id: Option<i64>) -> Option<Self> {
        match (character_id, planets_id) {
            (Some(id), None) => Some(FavoriteTarget::Character(id)),
            (None, Some(id)) => Some(FavoriteTarget::Planet(id)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Favorite {
    pub id: i64,
    pub user_id: i64,
    pub target: FavoriteTarget,
}

impl Serialize for Favorite {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (character_id, planets_id) = self.target.columns();
        let mut s = serializer.serialize_struct("Favorite", 4)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("user_id", &self.user_id)?;
        s.serialize_field("character_id", &character_id)?;
        s.serialize_field("planets_id", &planets_id)?;
        s.end()
    }
}
