//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `email` is unique on `lower(email)`.
    users (id) {
        id -> Uuid,
        #[max_length = 63]
        username -> Varchar,
        #[max_length = 63]
        email -> Varchar,
        /// bcrypt digest; never plaintext.
        #[max_length = 255]
        password -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks, each owned by one user.
    tasks (id) {
        id -> Int8,
        user_id -> Uuid,
        #[max_length = 119]
        title -> Varchar,
        description -> Nullable<Text>,
        /// 1 = LOW, 2 = MEDIUM, 3 = HIGH.
        priority -> Int4,
        /// 1 = PENDING, 2 = COMPLETED.
        status -> Int4,
        due_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, users);
