//! Diesel table definitions for the PostgreSQL schema.

diesel::table! {
    users (id) {
        id -> Uuid,
        #[max_length = 120]
        name -> Varchar,
        #[max_length = 150]
        email -> Varchar,
        #[max_length = 80]
        area_of_interest -> Nullable<Varchar>,
        #[max_length = 200]
        career_objective -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    skills (id) {
        id -> Uuid,
        user_id -> Uuid,
        #[max_length = 80]
        name -> Varchar,
        level -> Int4,
    }
}

diesel::table! {
    trails (id) {
        id -> Uuid,
        #[max_length = 80]
        area_of_interest -> Varchar,
        #[max_length = 80]
        related_skill -> Varchar,
        minimum_level -> Int4,
        #[max_length = 120]
        title -> Varchar,
        #[max_length = 500]
        description -> Varchar,
    }
}

diesel::table! {
    recommendations (id) {
        id -> Uuid,
        user_id -> Uuid,
        #[max_length = 120]
        title -> Varchar,
        #[max_length = 500]
        description -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(skills -> users (user_id));
diesel::joinable!(recommendations -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, skills, trails, recommendations);
