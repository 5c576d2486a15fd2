//! Diesel table definitions matching the embedded migrations.

diesel::table! {
    /// Named JSON blobs (catalog, build selection).
    kv_store (k) {
        /// Blob key.
        k -> Text,
        /// JSON text.
        v -> Text,
        /// RFC3339 UTC time of the last write.
        updated_at -> Text,
    }
}
