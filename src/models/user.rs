use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::user::{
    NewUser as DomainNewUser, UpdateUser as DomainUpdateUser, User as DomainUser,
    UserCredentials as DomainUserCredentials,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub profile_pic: Option<String>,
    pub bio: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub profile_pic: Option<&'a str>,
}

/// `None` fields are skipped, so the stored value is kept.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub profile_pic: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<User> for DomainUser {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            role: value.role.parse().unwrap_or_default(),
            profile_pic: value.profile_pic,
            bio: value.bio,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<User> for DomainUserCredentials {
    fn from(value: User) -> Self {
        let password_hash = value.password_hash.clone();
        Self {
            user: value.into(),
            password_hash,
        }
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(value: &'a DomainNewUser) -> Self {
        Self {
            name: value.name.as_str(),
            email: value.email.as_str(),
            password_hash: value.password_hash.as_str(),
            role: value.role.as_str(),
            profile_pic: value.profile_pic.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateUser> for UpdateUser<'a> {
    fn from(value: &'a DomainUpdateUser) -> Self {
        Self {
            name: value.name.as_deref(),
            email: value.email.as_deref(),
            password_hash: value.password_hash.as_deref(),
            bio: value.bio.as_deref(),
            profile_pic: value.profile_pic.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
