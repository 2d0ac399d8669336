//! Row structs mapping between the database schema and domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{recommendations, skills, trails, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub area_of_interest: Option<String>,
    pub career_objective: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub area_of_interest: Option<&'a str>,
    pub career_objective: Option<&'a str>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserChangeset<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub area_of_interest: Option<&'a str>,
    pub career_objective: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = skills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SkillRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub level: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = skills)]
pub(crate) struct NewSkillRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: &'a str,
    pub level: i32,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = skills)]
pub(crate) struct SkillChangeset<'a> {
    pub name: &'a str,
    pub level: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = trails)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TrailRow {
    pub id: Uuid,
    pub area_of_interest: String,
    pub related_skill: String,
    pub minimum_level: i32,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = trails)]
pub(crate) struct NewTrailRow<'a> {
    pub id: Uuid,
    pub area_of_interest: &'a str,
    pub related_skill: &'a str,
    pub minimum_level: i32,
    pub title: &'a str,
    pub description: &'a str,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = trails)]
pub(crate) struct TrailChangeset<'a> {
    pub area_of_interest: &'a str,
    pub related_skill: &'a str,
    pub minimum_level: i32,
    pub title: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recommendations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecommendationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = recommendations)]
pub(crate) struct NewRecommendationRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub created_at: DateTime<Utc>,
}
