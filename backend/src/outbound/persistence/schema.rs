//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Complaint records, loaded by an external import.
    ///
    /// `id` preserves load order; `unique_key` is the city's identifier.
    complaints (id) {
        id -> Int8,
        unique_key -> Varchar,
        /// Filing office district code, e.g. `NYCC01`.
        account -> Varchar,
        /// Complainant's resident district code.
        council_dist -> Nullable<Varchar>,
        opendate -> Nullable<Date>,
        closedate -> Nullable<Date>,
        complaint_type -> Varchar,
        descriptor -> Varchar,
        borough -> Varchar,
    }
}

diesel::table! {
    /// Login accounts with Argon2 PHC password hashes.
    accounts (user_id) {
        user_id -> Uuid,
        username -> Varchar,
        password_hash -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Council-office profile, one per account.
    user_profiles (user_id) {
        user_id -> Uuid,
        full_name -> Varchar,
        /// District number as provisioned, e.g. `"1"`.
        district -> Varchar,
        borough -> Varchar,
    }
}

diesel::table! {
    /// API tokens; at most one per user.
    auth_tokens (key) {
        key -> Varchar,
        user_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(user_profiles -> accounts (user_id));
diesel::joinable!(auth_tokens -> accounts (user_id));

diesel::allow_tables_to_appear_in_same_query!(accounts, auth_tokens, complaints, user_profiles);
