use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user record as stored and returned by the front end.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub age: u32,
}

/// Client payload for create/update; the id is assigned server-side.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub age: u32,
}

impl User {
    pub fn from_input(id: Uuid, input: UserInput) -> Self {
        Self { id, name: input.name, age: input.age }
    }
}
