//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Local accounts. `email` is unique and stored with a lowercased domain.
    users (id) {
        id -> Uuid,
        #[max_length = 255]
        email -> Varchar,
        password_hash -> Text,
        is_active -> Bool,
        is_staff -> Bool,
        is_superuser -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipes; `user_id` never changes after insert.
    recipes (id) {
        id -> Int8,
        user_id -> Uuid,
        #[max_length = 255]
        title -> Varchar,
        time_minutes -> Int4,
        /// Price in cents, `0 ..= 99999`.
        price_cents -> Int4,
        description -> Text,
        #[max_length = 255]
        link -> Varchar,
    }
}

diesel::table! {
    /// Per-user tags, unique on `(user_id, name)`.
    tags (id) {
        id -> Int8,
        user_id -> Uuid,
        #[max_length = 255]
        name -> Varchar,
    }
}

diesel::table! {
    /// Per-user ingredients, unique on `(user_id, name)`.
    ingredients (id) {
        id -> Int8,
        user_id -> Uuid,
        #[max_length = 255]
        name -> Varchar,
    }
}

diesel::table! {
    recipe_tags (recipe_id, tag_id) {
        recipe_id -> Int8,
        tag_id -> Int8,
    }
}

diesel::table! {
    recipe_ingredients (recipe_id, ingredient_id) {
        recipe_id -> Int8,
        ingredient_id -> Int8,
    }
}

diesel::joinable!(recipes -> users (user_id));
diesel::joinable!(tags -> users (user_id));
diesel::joinable!(ingredients -> users (user_id));
diesel::joinable!(recipe_tags -> recipes (recipe_id));
diesel::joinable!(recipe_tags -> tags (tag_id));
diesel::joinable!(recipe_ingredients -> recipes (recipe_id));
diesel::joinable!(recipe_ingredients -> ingredients (ingredient_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    recipes,
    tags,
    ingredients,
    recipe_tags,
    recipe_ingredients,
);
