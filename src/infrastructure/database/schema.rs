// Shared tables only. The per-tenant vector and customer-status tables are
// created by the tenant provisioner and queried through sql_query, since
// their names carry the tenant suffix.

diesel::table! {
    ingestion_jobs (id) {
        id -> Uuid,
        tenant -> Varchar,
        document_key -> Text,
        content_type -> Text,
        status -> Varchar,
        progress -> Float4,
        chunks_created -> Nullable<Int4>,
        embeddings_created -> Nullable<Int4>,
        error_message -> Nullable<Text>,
        created_at -> Timestamptz,
        started_at -> Nullable<Timestamptz>,
        completed_at -> Nullable<Timestamptz>,
    }
}
