use std::sync::Arc;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::gateway::events::EventPublisher;

pub fn create_catalog_service(book_repository: Arc<dyn BookRepository>,
                              events_publisher: Arc<dyn EventPublisher>) -> Arc<dyn CatalogService> {
    Arc::new(CatalogServiceImpl::new(book_repository, events_publisher))
}
