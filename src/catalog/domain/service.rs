use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{BookStatus, LibraryResult};
use crate::gateway::events::EventPublisher;

pub struct CatalogServiceImpl {
    branch_id: String,
    page_size: usize,
    book_repository: Arc<dyn BookRepository>,
    events_publisher: Arc<dyn EventPublisher>,
}

impl CatalogServiceImpl {
    pub fn new(config: &Configuration, book_repository: Arc<dyn BookRepository>,
               events_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            page_size: config.page_size.max(1),
            book_repository,
            events_publisher,
        }
    }

    fn metadata(&self, status: BookStatus) -> HashMap<String, String> {
        HashMap::from([("branch_id".to_string(), self.branch_id.to_string()),
            ("book_status".to_string(), status.to_string())])
    }

    async fn query_all(&self, predicate: &HashMap<String, String>) -> LibraryResult<Vec<BookDto>> {
        let mut books = vec![];
        let mut page: Option<String> = None;
        loop {
            let res = self.book_repository.query(predicate, page.as_deref(), self.page_size).await?;
            tracing::debug!(page_size = res.page_size, records = res.records.len(), "queried books");
            books.extend(res.records.iter().map(BookDto::from));
            match res.next_page {
                Some(next) => page = Some(next),
                None => return Ok(books),
            }
        }
    }

    async fn transition(&self, title: &str, from: BookStatus, to: BookStatus, name: &str) -> LibraryResult<BookDto> {
        let book = self.book_repository.transition(title, from, to).await
            .map_err(|err| {
                tracing::warn!(title, from = %from, to = %to, error = %err, retryable = err.retryable(),
                    "rejected book transition");
                err
            })?;
        let dto = BookDto::from(&book);
        let published = match DomainEvent::updated(name, "catalog", title, &self.metadata(to), &dto) {
            Ok(event) => self.events_publisher.publish(&event).await,
            Err(err) => Err(err.into()),
        };
        if let Err(err) = published {
            // the entry goes back to its prior state so the caller can retry
            tracing::warn!(title, status = %from, error = %err, "{} not published, reverting", name);
            let _ = self.book_repository.revert(&book, from).await?;
            return Err(err);
        }
        tracing::info!(title, branch_id = self.branch_id.as_str(), status = %to, "{}", name);
        Ok(dto)
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        let mut entity = BookEntity::try_from(book).map_err(|err| {
            tracing::warn!(title = book.title.as_str(), kind = book.kind.as_str(), error = %err,
                retryable = err.retryable(), "rejected book");
            err
        })?;
        // every registered book starts out available
        entity.book_status = BookStatus::Available;
        let added = BookDto::from(&entity);
        let event = DomainEvent::added(
            "book_added", "catalog", added.title.as_str(), &self.metadata(entity.book_status), &added)?;
        let _ = self.book_repository.create(&entity).await?;
        if let Err(err) = self.events_publisher.publish(&event).await {
            tracing::warn!(title = added.title.as_str(), error = %err, "book_added not published, removing book");
            let _ = self.book_repository.delete(&entity).await?;
            return Err(err);
        }
        tracing::info!(title = added.title.as_str(), kind = added.kind.as_str(),
            branch_id = self.branch_id.as_str(), "book_added");
        Ok(added)
    }

    async fn find_book(&self, title: &str) -> LibraryResult<BookDto> {
        tracing::debug!(title, "find book");
        self.book_repository.get(title).await.map(|b| BookDto::from(&b))
    }

    async fn checkout_book(&self, title: &str) -> LibraryResult<BookDto> {
        self.transition(title, BookStatus::Available, BookStatus::CheckedOut, "book_checkout").await
    }

    async fn return_book(&self, title: &str) -> LibraryResult<BookDto> {
        self.transition(title, BookStatus::CheckedOut, BookStatus::Available, "book_returned").await
    }

    async fn list_available(&self) -> LibraryResult<Vec<BookDto>> {
        self.query_all(&HashMap::from([
            ("book_status".to_string(), BookStatus::Available.to_string())])).await
    }

    async fn list_books(&self) -> LibraryResult<Vec<BookDto>> {
        self.query_all(&HashMap::new()).await
    }

    async fn count(&self) -> LibraryResult<usize> {
        self.book_repository.count().await
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_trait::async_trait;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::books::dto::BookDto;
    use crate::books::factory::create_book_repository;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::domain::service::CatalogServiceImpl;
    use crate::catalog::factory;
    use crate::core::domain::Configuration;
    use crate::core::events::{DomainEvent, DomainEventType};
    use crate::core::library::{BookStatus, LibraryError};
    use crate::gateway::events::EventPublisher;
    use crate::gateway::memory::publisher::MemoryPublisher;

    lazy_static! {
        static ref SUT_SVC: Arc<dyn CatalogService> = factory::create_catalog_service(&Configuration::new("test"));
    }

    fn unique_title() -> String {
        format!("title-{}", Uuid::new_v4())
    }

    fn build_service(page_size: usize) -> (CatalogServiceImpl, Arc<MemoryPublisher>) {
        let publisher = Arc::new(MemoryPublisher::new());
        let svc = CatalogServiceImpl::new(&Configuration::new("test").with_page_size(page_size),
                                          create_book_repository(), publisher.clone());
        (svc, publisher)
    }

    struct UnreachablePublisher;

    #[async_trait]
    impl EventPublisher for UnreachablePublisher {
        async fn publish(&self, _event: &DomainEvent) -> Result<(), LibraryError> {
            Err(LibraryError::runtime("event bus unreachable", None))
        }
    }

    #[tokio::test]
    async fn test_should_add_book() {
        let catalog_svc = SUT_SVC.clone();

        let before = catalog_svc.count().await.expect("should count");
        let book = BookDto::new(unique_title().as_str(), "test author");
        let _ = catalog_svc.add_book(&book).await.expect("should add book");

        let loaded = catalog_svc.find_book(book.title.as_str()).await.expect("should return book");
        assert_eq!(book.title, loaded.title);
        assert!(catalog_svc.count().await.expect("should count") > before);
    }

    #[tokio::test]
    async fn test_should_reject_invalid_entity() {
        let (catalog_svc, publisher) = build_service(10);

        let mut book = BookDto::new("Wired", "Various");
        book.kind = "Magazine".to_string();
        let res = catalog_svc.add_book(&book).await;
        assert!(matches!(res, Err(LibraryError::InvalidEntity { .. })));
        assert_eq!(0, catalog_svc.count().await.expect("should count"));
        assert_eq!(0, publisher.published().expect("should list events").len());
    }

    #[tokio::test]
    async fn test_should_register_books_as_available() {
        let (catalog_svc, _) = build_service(10);

        let mut book = BookDto::ebook("Dune", "Herbert", 900);
        book.book_status = BookStatus::CheckedOut;
        let added = catalog_svc.add_book(&book).await.expect("should add book");
        assert_eq!(BookStatus::Available, added.book_status);
        assert_eq!(1, catalog_svc.list_available().await.expect("should list").len());
    }

    #[tokio::test]
    async fn test_should_checkout_and_return() {
        let (catalog_svc, publisher) = build_service(10);
        let _ = catalog_svc.add_book(&BookDto::new("1984", "Orwell")).await.expect("should add book");

        let res = catalog_svc.return_book("1984").await;
        assert!(matches!(res, Err(LibraryError::CurrentlyUnavailable { .. })));

        let checked_out = catalog_svc.checkout_book("1984").await.expect("should checkout");
        assert_eq!(BookStatus::CheckedOut, checked_out.book_status);
        let res = catalog_svc.checkout_book("1984").await;
        assert!(matches!(res, Err(LibraryError::CurrentlyUnavailable { .. })));
        assert!(catalog_svc.list_available().await.expect("should list").is_empty());

        let returned = catalog_svc.return_book("1984").await.expect("should return");
        assert_eq!(BookStatus::Available, returned.book_status);
        let res = catalog_svc.return_book("1984").await;
        assert!(matches!(res, Err(LibraryError::CurrentlyUnavailable { .. })));
        assert_eq!(1, catalog_svc.list_available().await.expect("should list").len());

        let events = publisher.published().expect("should list events");
        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(vec!["book_added", "book_checkout", "book_returned"], names);
        assert_eq!(DomainEventType::Updated, events[1].kind);
        assert_eq!(Some(&"CheckedOut".to_string()), events[1].metadata.get("book_status"));
    }

    #[tokio::test]
    async fn test_should_fail_checkout_for_unknown_title() {
        let (catalog_svc, _) = build_service(10);
        let _ = catalog_svc.add_book(&BookDto::new("1984", "Orwell")).await.expect("should add book");

        assert!(matches!(catalog_svc.checkout_book("NoSuchTitle").await, Err(LibraryError::NotFound { .. })));
        assert!(matches!(catalog_svc.return_book("NoSuchTitle").await, Err(LibraryError::NotFound { .. })));
        assert!(matches!(catalog_svc.find_book("NoSuchTitle").await, Err(LibraryError::NotFound { .. })));
        assert_eq!(1, catalog_svc.count().await.expect("should count"));
    }

    #[tokio::test]
    async fn test_should_list_across_pages_in_order() {
        let (catalog_svc, _) = build_service(2);
        for title in ["a", "b", "c", "d", "e"] {
            let _ = catalog_svc.add_book(&BookDto::new(title, "x")).await.expect("should add book");
        }
        let _ = catalog_svc.checkout_book("b").await.expect("should checkout");

        let all: Vec<String> = catalog_svc.list_books().await.expect("should list")
            .into_iter().map(|b| b.title).collect();
        assert_eq!(vec!["a", "b", "c", "d", "e"], all);
        let available: Vec<String> = catalog_svc.list_available().await.expect("should list")
            .into_iter().map(|b| b.title).collect();
        assert_eq!(vec!["a", "c", "d", "e"], available);
    }

    #[tokio::test]
    async fn test_should_keep_duplicate_titles() {
        let (catalog_svc, _) = build_service(10);
        let _ = catalog_svc.add_book(&BookDto::new("1984", "Orwell")).await.expect("should add book");
        let _ = catalog_svc.add_book(&BookDto::print_book("1984", "Orwell", 328)).await.expect("should add book");
        assert_eq!(2, catalog_svc.count().await.expect("should count"));

        assert_eq!("Book", catalog_svc.find_book("1984").await.expect("should find").kind.as_str());
        let _ = catalog_svc.checkout_book("1984").await.expect("should checkout first copy");
        let second = catalog_svc.checkout_book("1984").await.expect("should checkout second copy");
        assert_eq!("PrintBook", second.kind.as_str());
        assert!(catalog_svc.checkout_book("1984").await.is_err());
    }

    #[tokio::test]
    async fn test_should_leave_catalog_unchanged_when_publish_fails() {
        let repo = create_book_repository();
        let config = Configuration::new("test");
        let catalog_svc = CatalogServiceImpl::new(&config, repo.clone(), Arc::new(MemoryPublisher::new()));
        let failing_svc = CatalogServiceImpl::new(&config, repo.clone(), Arc::new(UnreachablePublisher));
        let _ = catalog_svc.add_book(&BookDto::new("1984", "Orwell")).await.expect("should add book");
        let _ = catalog_svc.add_book(&BookDto::print_book("1984", "Orwell", 328)).await.expect("should add book");

        for _ in 0..2 {
            let res = failing_svc.add_book(&BookDto::ebook("Dune", "Herbert", 900)).await;
            assert!(matches!(res, Err(LibraryError::Runtime { .. })));
        }
        assert_eq!(2, catalog_svc.count().await.expect("should count"));
        assert!(matches!(catalog_svc.find_book("Dune").await, Err(LibraryError::NotFound { .. })));

        let _ = catalog_svc.checkout_book("1984").await.expect("should checkout first copy");
        let res = failing_svc.checkout_book("1984").await;
        assert!(matches!(res, Err(LibraryError::Runtime { .. })));
        let available = catalog_svc.list_available().await.expect("should list");
        assert_eq!(1, available.len());
        assert_eq!("PrintBook", available[0].kind.as_str());

        let res = failing_svc.return_book("1984").await;
        assert!(matches!(res, Err(LibraryError::Runtime { .. })));
        assert_eq!(1, catalog_svc.list_available().await.expect("should list").len());

        let second = catalog_svc.checkout_book("1984").await.expect("should checkout after failure");
        assert_eq!("PrintBook", second.kind.as_str());
        let _ = catalog_svc.add_book(&BookDto::ebook("Dune", "Herbert", 900)).await.expect("should add after failure");
        assert_eq!(3, catalog_svc.count().await.expect("should count"));
    }
}
