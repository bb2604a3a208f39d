//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly.

diesel::table! {
    /// One row per registration account. Project and members are JSONB
    /// documents so legacy rows with missing member fields still load.
    registrations (id) {
        id -> Uuid,
        display_name -> Varchar,
        /// Lower-cased primary contact email; unique.
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Varchar,
        /// `user` or `admin`.
        role -> Varchar,
        /// `solo` or `groupe`.
        registration_type -> Varchar,
        group_name -> Nullable<Varchar>,
        project -> Jsonb,
        members -> Jsonb,
        created_at -> Timestamptz,
        /// Maintained by trigger.
        updated_at -> Timestamptz,
    }
}
