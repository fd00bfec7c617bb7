use std::sync::Arc;

use crate::application::ports::{
    AnswerGenerator, DocumentStore, EmbeddingProvider, SyncQueue,
};
use crate::application::services::{AnswerService, IngestionService, RetrievalService};
use crate::application::tenant_registry::TenantRegistry;
use crate::application::use_cases::{
    ChatUseCase, CreateUploadUrlUseCase, GetCustomerStatusUseCase, GetIngestionStatusUseCase,
    QueryKnowledgeBaseUseCase, ReceiveUploadUseCase, SyncDocumentUseCase,
};
use crate::config::AppConfig;
use crate::domain::repositories::{
    CustomerStatusRepository, IngestionJobRepository, VectorRepository,
};
use crate::infrastructure::database::{
    TenantProvisioner, create_connection_pool, get_connection_from_pool,
    repositories::{PostgresJobRepository, PostgresStatusRepository, PostgresVectorRepository},
    run_migrations,
};
use crate::infrastructure::external_services::{HttpAnswerClient, HttpEmbeddingsClient};
use crate::infrastructure::messaging::{IngestionWorker, MpscSyncQueue};
use crate::infrastructure::object_store::LocalDocumentStore;
use crate::infrastructure::security::UploadSigner;
use crate::presentation::http::handlers::{
    ChatHandler, QueryHandler, StatusHandler, SyncHandler, UploadHandler,
};

pub struct AppContainer {
    // Tenancy
    pub tenant_registry: Arc<TenantRegistry>,

    // Repositories
    pub vector_repository: Arc<dyn VectorRepository>,
    pub job_repository: Arc<dyn IngestionJobRepository>,
    pub status_repository: Arc<dyn CustomerStatusRepository>,

    // External services
    pub embedding_provider: Arc<dyn EmbeddingProvider>,
    pub answer_generator: Arc<dyn AnswerGenerator>,
    pub document_store: Arc<dyn DocumentStore>,

    // Queue and background processing
    pub sync_queue: Arc<dyn SyncQueue>,
    pub ingestion_worker: Arc<IngestionWorker>,

    // Application services
    pub retrieval_service: Arc<RetrievalService>,
    pub answer_service: Arc<AnswerService>,
    pub ingestion_service: Arc<IngestionService>,

    // HTTP handlers
    pub upload_handler: Arc<UploadHandler>,
    pub sync_handler: Arc<SyncHandler>,
    pub query_handler: Arc<QueryHandler>,
    pub chat_handler: Arc<ChatHandler>,
    pub status_handler: Arc<StatusHandler>,
}

impl AppContainer {
    pub fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        // Database pool, shared migrations, per-tenant DDL
        let db_pool = create_connection_pool(&config.database_url)?;
        {
            let mut conn = get_connection_from_pool(&db_pool)?;
            run_migrations(&mut conn)?;
        }
        TenantProvisioner::new(db_pool.clone(), config.embeddings.dimension)
            .provision_all(&config.tenants)?;

        let tenant_registry = Arc::new(TenantRegistry::new(config.tenants.clone()));

        // Repositories
        let vector_repository: Arc<dyn VectorRepository> =
            Arc::new(PostgresVectorRepository::new(db_pool.clone()));
        let job_repository: Arc<dyn IngestionJobRepository> =
            Arc::new(PostgresJobRepository::new(db_pool.clone()));
        let status_repository: Arc<dyn CustomerStatusRepository> =
            Arc::new(PostgresStatusRepository::new(db_pool));

        // External services
        let embedding_provider: Arc<dyn EmbeddingProvider> =
            Arc::new(HttpEmbeddingsClient::new(config.embeddings.clone())?);
        let answer_generator: Arc<dyn AnswerGenerator> =
            Arc::new(HttpAnswerClient::new(config.answers.clone())?);
        let document_store: Arc<dyn DocumentStore> =
            Arc::new(LocalDocumentStore::new(config.storage_root.clone()));
        let upload_signer = Arc::new(UploadSigner::new(config.upload.signing_secret.clone()));

        // Sync queue and background workers
        let (sync_queue, sync_receiver) = MpscSyncQueue::create_pair();
        let sync_queue: Arc<dyn SyncQueue> = Arc::new(sync_queue);
        let sync_receiver = Arc::new(sync_receiver);

        // Application services
        let retrieval_service = Arc::new(RetrievalService::new(
            embedding_provider.clone(),
            vector_repository.clone(),
            config.search.top_k,
            config.search.similarity_threshold,
        ));
        let answer_service = Arc::new(AnswerService::new(answer_generator.clone()));
        let ingestion_service = Arc::new(IngestionService::new(
            embedding_provider.clone(),
            vector_repository.clone(),
            document_store.clone(),
        ));

        let ingestion_worker = Arc::new(
            IngestionWorker::new(
                sync_receiver,
                job_repository.clone(),
                ingestion_service.clone(),
            )
            .with_worker_count(config.worker_count),
        );

        // Use cases
        let create_upload_url_use_case = Arc::new(CreateUploadUrlUseCase::new(
            tenant_registry.clone(),
            upload_signer.clone(),
            config.public_base_url.clone(),
            config.upload.url_ttl_secs,
        ));
        let receive_upload_use_case = Arc::new(ReceiveUploadUseCase::new(
            tenant_registry.clone(),
            upload_signer,
            document_store.clone(),
        ));
        let sync_document_use_case = Arc::new(SyncDocumentUseCase::new(
            tenant_registry.clone(),
            document_store.clone(),
            job_repository.clone(),
            sync_queue.clone(),
        ));
        let get_ingestion_status_use_case = Arc::new(GetIngestionStatusUseCase::new(
            tenant_registry.clone(),
            job_repository.clone(),
        ));
        let query_use_case = Arc::new(QueryKnowledgeBaseUseCase::new(
            tenant_registry.clone(),
            retrieval_service.clone(),
            answer_service.clone(),
        ));
        let chat_use_case = Arc::new(ChatUseCase::new(query_use_case.clone()));
        let get_customer_status_use_case = Arc::new(GetCustomerStatusUseCase::new(
            tenant_registry.clone(),
            status_repository.clone(),
        ));

        // HTTP handlers
        let upload_handler = Arc::new(UploadHandler::new(
            create_upload_url_use_case,
            receive_upload_use_case,
        ));
        let sync_handler = Arc::new(SyncHandler::new(
            sync_document_use_case,
            get_ingestion_status_use_case,
        ));
        let query_handler = Arc::new(QueryHandler::new(query_use_case));
        let chat_handler = Arc::new(ChatHandler::new(chat_use_case));
        let status_handler = Arc::new(StatusHandler::new(get_customer_status_use_case));

        Ok(Self {
            tenant_registry,
            vector_repository,
            job_repository,
            status_repository,
            embedding_provider,
            answer_generator,
            document_store,
            sync_queue,
            ingestion_worker,
            retrieval_service,
            answer_service,
            ingestion_service,
            upload_handler,
            sync_handler,
            query_handler,
            chat_handler,
            status_handler,
        })
    }
}
